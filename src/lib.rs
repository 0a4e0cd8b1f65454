// Analysis building blocks
pub mod algo;
pub mod util;

// Upstream access
pub mod client;
pub mod config;
pub mod ingest;

// Request handlers
pub mod handlers;

// Re-export commonly used types for convenience
pub use hawkeye_core::*;
pub use client::{BirdeyeClient, MarketData};
pub use config::Config;
pub use handlers::Analytics;
