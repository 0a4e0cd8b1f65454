/// Early trade retrieval
///
/// Trades for an asset are pulled from `seek_by_time` one page at a time through
/// a restartable cursor, until the provider runs dry or the record cap is hit.

use std::sync::Arc;

use hawkeye_core::{FailureCause, IngestError, Trade, TradeSide};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::client::MarketData;
use crate::config;

pub const TRADES_PATH: &str = "/defi/txs/token/seek_by_time";

#[derive(Debug, Deserialize)]
struct TradeEnvelope {
    data: Option<TradeData>,
}

#[derive(Debug, Deserialize)]
struct TradeData {
    items: Option<Vec<RawTrade>>,
}

#[derive(Debug, Deserialize)]
struct RawTrade {
    owner: Option<String>,
    side: Option<String>,
    from: Option<RawLeg>,
    #[serde(rename = "blockUnixTime")]
    block_unix_time: Option<i64>,
    #[serde(rename = "txHash")]
    tx_hash: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLeg {
    #[serde(rename = "uiAmount")]
    ui_amount: Option<f64>,
}

impl RawTrade {
    fn into_trade(self) -> Option<Trade> {
        Some(Trade {
            wallet: self.owner?,
            side: TradeSide::from(self.side?.as_str()),
            counter_amount: self.from.and_then(|leg| leg.ui_amount).unwrap_or(0.0),
            timestamp_unix: self.block_unix_time?,
            tx_hash: self.tx_hash?,
        })
    }
}

/// Decode one `seek_by_time` body. Returns the number of raw items alongside the
/// usable trades so the cursor can detect the last page.
fn parse_trade_page(body: Value) -> Result<(usize, Vec<Trade>), IngestError> {
    let envelope: TradeEnvelope =
        serde_json::from_value(body).map_err(|e| IngestError::failure(FailureCause::Decode(e.to_string())))?;

    let items = envelope.data.and_then(|data| data.items).unwrap_or_default();
    let raw_count = items.len();

    let trades: Vec<Trade> = items.into_iter().filter_map(RawTrade::into_trade).collect();
    if trades.len() < raw_count {
        debug!(dropped = raw_count - trades.len(), "Skipped trades with missing fields");
    }

    Ok((raw_count, trades))
}

/// Lazy cursor over the trade pages of one asset.
///
/// A failed page does not advance the cursor, so calling `next_page` again
/// retries the same offset.
pub struct TradePages<'a> {
    client: &'a dyn MarketData,
    asset: String,
    window_seconds: u64,
    page_size: usize,
    offset: usize,
    exhausted: bool,
}

impl<'a> TradePages<'a> {
    pub fn new(client: &'a dyn MarketData, asset: &str, window_seconds: u64, page_size: usize) -> Self {
        Self {
            client,
            asset: asset.to_string(),
            window_seconds,
            page_size: page_size.max(1),
            offset: 0,
            exhausted: false,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Start over from the first page
    pub fn reset(&mut self) {
        self.offset = 0;
        self.exhausted = false;
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("address", self.asset.clone()),
            ("offset", self.offset.to_string()),
            ("limit", self.page_size.to_string()),
            ("tx_type", "swap".to_string()),
            ("before_time", "0".to_string()),
            ("after_time", self.window_seconds.to_string()),
        ]
    }

    /// Fetch the next page, `None` once the provider has no more trades
    pub async fn next_page(&mut self) -> Result<Option<Vec<Trade>>, IngestError> {
        if self.exhausted {
            return Ok(None);
        }

        let body = self.client.get(TRADES_PATH, &self.query()).await?;
        let (raw_count, trades) = parse_trade_page(body)?;

        self.offset += raw_count;
        if raw_count < self.page_size {
            self.exhausted = true;
        }
        if raw_count == 0 {
            return Ok(None);
        }

        Ok(Some(trades))
    }
}

pub struct TradeIngestor {
    client: Arc<dyn MarketData>,
    page_size: usize,
    max_trades: usize,
}

impl TradeIngestor {
    pub fn new(client: Arc<dyn MarketData>, config: &config::Sniper) -> Self {
        Self {
            client,
            page_size: config.fetch_page_size,
            max_trades: config.max_trades,
        }
    }

    pub fn pages(&self, asset: &str, window_seconds: u64) -> TradePages<'_> {
        TradePages::new(self.client.as_ref(), asset, window_seconds, self.page_size)
    }

    /// All trades inside the listing window, capped at `max_trades`
    #[instrument(skip(self))]
    pub async fn fetch_early_trades(&self, asset: &str, window_seconds: u64) -> Result<Vec<Trade>, IngestError> {
        let mut pages = self.pages(asset, window_seconds);
        let mut trades = Vec::new();

        while trades.len() < self.max_trades {
            match pages.next_page().await? {
                Some(page) => trades.extend(page),
                None => break,
            }
        }

        if trades.len() > self.max_trades {
            trades.truncate(self.max_trades);
        }
        if trades.len() == self.max_trades && !pages.is_exhausted() {
            info!(asset, cap = self.max_trades, "Trade cap reached, remaining pages not fetched");
        }

        debug!(asset, count = trades.len(), pages_offset = pages.offset(), "Fetched early trades");
        Ok(trades)
    }

    /// Same as `fetch_early_trades`, but an upstream failure is logged and
    /// reported as "no trades"
    pub async fn fetch_early_trades_or_empty(&self, asset: &str, window_seconds: u64) -> Vec<Trade> {
        match self.fetch_early_trades(asset, window_seconds).await {
            Ok(trades) => trades,
            Err(e) => {
                warn!(asset, error = %e, "Error fetching trades, treating as empty");
                Vec::new()
            }
        }
    }
}
