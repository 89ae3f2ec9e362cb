use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdPulseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Enrichment pool closed before the batch completed")]
    PoolClosed,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
