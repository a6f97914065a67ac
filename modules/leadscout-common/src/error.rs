use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeadScoutError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Discovery error: {0}")]
    Discovery(String),

    #[error("Enrichment error: {0}")]
    Enrichment(String),

    #[error("Storage error: {0}")]
    Storage(String),
}
