pub mod apify;
pub mod discovery;
pub mod emit;
pub mod enrich;
pub mod filter;
pub mod rank;
pub mod scout;
pub mod sinks;
pub mod tags;
pub mod throttle;
pub mod traits;

pub use scout::{LeadScout, RunStats};
