pub mod config;
pub mod error;
pub mod types;

pub use config::{EnrichmentMode, OutputSchema, RunConfig};
pub use error::LeadScoutError;
pub use types::*;
