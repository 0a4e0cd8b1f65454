/// Wallet holdings retrieval

use std::sync::Arc;

use hawkeye_core::{IngestError, WalletAsset, WalletPortfolio};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::algo::portfolio::aggregate;
use crate::client::MarketData;

pub const WALLET_TOKENS_PATH: &str = "/v1/wallet/token_list";

#[derive(Debug, Deserialize)]
struct WalletEnvelope {
    success: Option<bool>,
    data: Option<WalletData>,
}

#[derive(Debug, Deserialize)]
struct WalletData {
    wallet: Option<String>,
    #[serde(rename = "totalUsd")]
    total_usd: Option<f64>,
    items: Option<Vec<RawAsset>>,
}

#[derive(Debug, Deserialize)]
struct RawAsset {
    name: Option<String>,
    symbol: Option<String>,
    address: Option<String>,
    #[serde(rename = "uiAmount")]
    ui_amount: Option<f64>,
    #[serde(rename = "valueUsd")]
    value_usd: Option<f64>,
}

impl From<RawAsset> for WalletAsset {
    fn from(raw: RawAsset) -> Self {
        WalletAsset {
            name: raw.name.unwrap_or_else(|| "Unknown Token".to_string()),
            symbol: raw.symbol.unwrap_or_else(|| "???".to_string()),
            address: raw.address.unwrap_or_else(|| "N/A".to_string()),
            ui_amount: raw.ui_amount.unwrap_or(0.0),
            value_usd: raw.value_usd.unwrap_or(0.0),
        }
    }
}

pub struct WalletIngestor {
    client: Arc<dyn MarketData>,
}

impl WalletIngestor {
    pub fn new(client: Arc<dyn MarketData>) -> Self {
        Self { client }
    }

    /// Full holding list of `wallet` in one request, ranked by value
    #[instrument(skip(self))]
    pub async fn fetch_portfolio(&self, wallet: &str) -> Result<WalletPortfolio, IngestError> {
        let body = self
            .client
            .get(WALLET_TOKENS_PATH, &[("wallet", wallet.to_string())])
            .await?;

        // Valid JSON in the wrong shape is a rejection, not a transport fault
        let envelope: WalletEnvelope = serde_json::from_value(body)
            .map_err(|e| IngestError::rejected(format!("malformed wallet response: {}", e)))?;

        if envelope.success == Some(false) {
            return Err(IngestError::rejected("provider reported success=false"));
        }
        let data = envelope
            .data
            .ok_or_else(|| IngestError::rejected("response carried no wallet data"))?;

        let assets: Vec<WalletAsset> = data.items.unwrap_or_default().into_iter().map(WalletAsset::from).collect();
        let wallet_address = data.wallet.unwrap_or_else(|| wallet.to_string());
        let total_usd = data.total_usd.unwrap_or(0.0);

        debug!(wallet = %wallet_address, assets = assets.len(), total_usd, "Fetched wallet holdings");
        Ok(aggregate(&wallet_address, assets, total_usd))
    }
}
