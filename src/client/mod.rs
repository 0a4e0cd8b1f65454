/// Upstream market data access

pub mod birdeye;
pub mod failsafe;

pub use birdeye::{BirdeyeClient, MarketData};
pub use failsafe::{with_retry, RateLimiter, RetryPolicy};
