/// Handler Module for Analysis Requests
///
/// Each handler serves one analysis kind: fetch, transform, then return an
/// immutable report with every number already formatted. Handlers hold no
/// per-request state and share one market data client.

pub mod sniper_handler;
pub mod token_handler;
pub mod wallet_handler;

pub use sniper_handler::{SniperHandler, SniperLine, SniperReport};
pub use token_handler::{Link, Metric, TokenHandler, TokenReport, UniqueWallets};
pub use wallet_handler::{AssetLine, WalletHandler, WalletReport};

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::client::{BirdeyeClient, MarketData};
use crate::config::Config;

/// All analysis handlers wired to one client
pub struct Analytics {
    pub snipers: SniperHandler,
    pub tokens: TokenHandler,
    pub wallets: WalletHandler,
}

impl Analytics {
    /// Build against the live Birdeye API
    pub fn init(config: &Config) -> Result<Self> {
        config.validate()?;
        let client = BirdeyeClient::new(config)?;
        info!(
            base_url = %client.base_url(),
            chain = %config.birdeye.chain,
            throttled = client.is_throttled(),
            "🦅 Birdeye client ready"
        );
        Self::with_client(Arc::new(client), config)
    }

    /// Build against any market data source
    pub fn with_client(client: Arc<dyn MarketData>, config: &Config) -> Result<Self> {
        Ok(Self {
            snipers: SniperHandler::new(Arc::clone(&client), config)?,
            tokens: TokenHandler::new(Arc::clone(&client)),
            wallets: WalletHandler::new(client),
        })
    }
}
