/// Token overview retrieval

use std::sync::Arc;

use hawkeye_core::{IngestError, TokenOverview};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::client::MarketData;

pub const TOKEN_OVERVIEW_PATH: &str = "/defi/token_overview";

#[derive(Debug, Deserialize)]
struct OverviewEnvelope {
    success: Option<bool>,
    data: Option<Value>,
}

pub struct TokenIngestor {
    client: Arc<dyn MarketData>,
}

impl TokenIngestor {
    pub fn new(client: Arc<dyn MarketData>) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn fetch_overview(&self, address: &str) -> Result<TokenOverview, IngestError> {
        let body = self
            .client
            .get(TOKEN_OVERVIEW_PATH, &[("address", address.to_string())])
            .await?;

        // Valid JSON in the wrong shape is a rejection, not a transport fault
        let envelope: OverviewEnvelope = serde_json::from_value(body)
            .map_err(|e| IngestError::rejected(format!("malformed token response: {}", e)))?;

        if envelope.success == Some(false) {
            return Err(IngestError::rejected("provider reported success=false"));
        }

        let data = match envelope.data {
            Some(data) if data.as_object().is_some_and(|fields| !fields.is_empty()) => data,
            _ => {
                warn!(address, "Unexpected token overview response format");
                return Err(IngestError::rejected("response carried no token data"));
            }
        };

        let overview: TokenOverview = serde_json::from_value(data)
            .map_err(|e| IngestError::rejected(format!("malformed token overview: {}", e)))?;

        debug!(address, symbol = overview.symbol.as_deref().unwrap_or("?"), "Fetched token overview");
        Ok(overview)
    }
}
