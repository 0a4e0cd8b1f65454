/// Wallet Check Handler
///
/// Values a wallet's holdings and renders them highest value first. Empty
/// wallets are a distinct outcome rather than an empty listing.

use std::sync::Arc;

use hawkeye_core::{IngestError, WalletPortfolio};
use serde::Serialize;
use tracing::{info, instrument};

use crate::client::MarketData;
use crate::ingest::WalletIngestor;
use crate::util::format::{format_currency, format_quantity};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetLine {
    /// "Name (SYMBOL)"
    pub heading: String,
    pub value: String,
    pub balance: String,
    pub symbol: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum WalletReport {
    Empty {
        wallet: String,
    },
    Holdings {
        portfolio: WalletPortfolio,
        total: String,
        assets: Vec<AssetLine>,
    },
}

impl WalletReport {
    pub fn build(portfolio: WalletPortfolio) -> Self {
        if portfolio.is_empty() {
            return WalletReport::Empty {
                wallet: portfolio.wallet_address,
            };
        }

        let assets = portfolio
            .assets
            .iter()
            .map(|asset| AssetLine {
                heading: format!("{} ({})", asset.name, asset.symbol),
                value: format_currency(asset.value_usd),
                balance: format_quantity(asset.ui_amount),
                symbol: asset.symbol.clone(),
                address: asset.address.clone(),
            })
            .collect();

        WalletReport::Holdings {
            total: format_currency(portfolio.total_value_usd),
            assets,
            portfolio,
        }
    }
}

pub struct WalletHandler {
    wallets: WalletIngestor,
}

impl WalletHandler {
    pub fn new(client: Arc<dyn MarketData>) -> Self {
        Self {
            wallets: WalletIngestor::new(client),
        }
    }

    #[instrument(skip(self))]
    pub async fn check(&self, wallet: &str) -> Result<WalletReport, IngestError> {
        let portfolio = self.wallets.fetch_portfolio(wallet).await?;
        info!(assets = portfolio.assets.len(), empty = portfolio.is_empty(), "💼 Wallet portfolio loaded");
        Ok(WalletReport::build(portfolio))
    }
}
