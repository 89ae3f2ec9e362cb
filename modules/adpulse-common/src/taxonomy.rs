/// Absence sentinel used in string-typed columns instead of a true null.
/// Stands for "no identifiable offer" and "generation failed" alike.
pub const LABEL_NONE: &str = "NONE";

/// Catch-all label the model must use rather than force-fitting a theme.
pub const LABEL_OTHER: &str = "OTHER";

/// One theme of the closed taxonomy, with the illustrative examples the
/// labeling prompt shows next to it.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub name: &'static str,
    pub examples: &'static str,
}

/// The closed 22-theme taxonomy. The exact set is configuration, not logic:
/// the labeling prompt embeds it and the stats reporter counts against it.
pub const TAXONOMY: [Theme; 22] = [
    Theme {
        name: "Seasonal Promotions and Discounts",
        examples: "Christmas sale, Black Friday offers, Easter weekend deals",
    },
    Theme {
        name: "Community Engagement and Events",
        examples: "charity drive, blood donation day, local farmer market",
    },
    Theme {
        name: "Health and Wellness Initiatives",
        examples: "free health check, flu shot clinic, yoga session",
    },
    Theme {
        name: "Family-Friendly Activities",
        examples: "kids' play zone, family movie day, puppet show",
    },
    Theme {
        name: "Fashion and Style Trends",
        examples: "new clothing line launch, styling workshop",
    },
    Theme {
        name: "Food and Culinary Experiences",
        examples: "cooking class, wine tasting, gourmet pop-up",
    },
    Theme {
        name: "Contests and Giveaways",
        examples: "raffle for prizes, social media giveaway",
    },
    Theme {
        name: "Shopping Experiences",
        examples: "free parking, free changing rooms, mall gift card, stroller rental",
    },
    Theme {
        name: "Beauty and Personal Care",
        examples: "skincare demo, hair salon discounts",
    },
    Theme {
        name: "Sustainable Practices and Eco-Friendly Initiatives",
        examples: "recycling program, zero-waste fair",
    },
    Theme {
        name: "Technology and Innovation",
        examples: "tech gadget demo, AR shopping guide",
    },
    Theme {
        name: "Entertainment and Leisure Activities",
        examples: "live concert, art performance",
    },
    Theme {
        name: "Pet Care and Events",
        examples: "pet adoption day, pet grooming promo",
    },
    Theme {
        name: "Cultural and Artistic Experiences",
        examples: "art exhibition, craft workshop",
    },
    Theme {
        name: "Travel and Vacation Essentials",
        examples: "luggage sale, travel insurance promo",
    },
    Theme {
        name: "Home and Lifestyle Products",
        examples: "furniture discounts, home decor ideas",
    },
    Theme {
        name: "Education and Learning Activities",
        examples: "coding camp, book reading",
    },
    Theme {
        name: "Sports and Fitness",
        examples: "sports gear sale, fitness challenge",
    },
    Theme {
        name: "Job Opportunities and Career Development",
        examples: "job fair, career coaching",
    },
    Theme {
        name: "Customer Engagement and Loyalty Programs",
        examples: "new loyalty card, double points week",
    },
    Theme {
        name: "Warnings and Announcements",
        examples: "changed opening hours, construction notice",
    },
    Theme {
        name: "General Discounts and Promotions",
        examples: "everyday low prices, ongoing 2-for-1 deal",
    },
];

/// Whether `name` is a valid persisted label: a taxonomy theme or `OTHER`.
/// The `NONE` sentinel is deliberately not a label.
pub fn is_taxonomy_label(name: &str) -> bool {
    name == LABEL_OTHER || TAXONOMY.iter().any(|t| t.name == name)
}
