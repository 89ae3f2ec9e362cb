pub mod config;
pub mod error;
pub mod taxonomy;
pub mod text;
pub mod types;

pub use config::Config;
pub use error::AdPulseError;
pub use taxonomy::*;
pub use text::*;
pub use types::*;
