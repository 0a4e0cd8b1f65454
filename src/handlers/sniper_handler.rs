/// Sniper Check Handler
///
/// Fetches the early trades of an asset, keeps the buys and pages them for display.
/// Upstream failures on this path are reported as "no snipers".

use std::sync::Arc;

use anyhow::Context;
use hawkeye_core::{Page, SniperRecord};
use serde::Serialize;
use tracing::{info, instrument};

use crate::algo::sniper::analyze;
use crate::client::MarketData;
use crate::config::Config;
use crate::ingest::TradeIngestor;
use crate::util::format::{format_amount, DEFAULT_DECIMALS};
use crate::util::pager::ResultPager;

/// Quote asset the amounts are denominated in
pub const QUOTE_SYMBOL: &str = "SOL";

/// One rendered row of the sniper listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SniperLine {
    /// 1-based position across all pages
    pub ordinal: usize,
    pub wallet: String,
    pub amount: String,
    pub time: String,
    pub tx_hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SniperReport {
    NoSnipers {
        asset: String,
    },
    Found {
        asset: String,
        page: Page<SniperRecord>,
        lines: Vec<SniperLine>,
        footer: String,
    },
}

impl SniperReport {
    /// Page `snipers` and pre-render the rows of `page_number`
    pub fn build(asset: &str, snipers: &[SniperRecord], page_number: usize, pager: &ResultPager) -> Self {
        if snipers.is_empty() {
            return SniperReport::NoSnipers {
                asset: asset.to_string(),
            };
        }

        let page = pager.page(snipers, page_number);
        let first = page.first_ordinal();
        let lines = page
            .items
            .iter()
            .enumerate()
            .map(|(i, record)| SniperLine {
                ordinal: first + i,
                wallet: record.wallet.clone(),
                amount: format!("{} {}", format_amount(Some(record.amount_quote), DEFAULT_DECIMALS), QUOTE_SYMBOL),
                time: record.timestamp.clone(),
                tx_hash: record.tx_hash.clone(),
            })
            .collect();
        let footer = format!(
            "Page {}/{} | Total Snipers Found: {}",
            page.page_number, page.total_pages, page.total_items
        );

        SniperReport::Found {
            asset: asset.to_string(),
            page,
            lines,
            footer,
        }
    }
}

pub struct SniperHandler {
    trades: TradeIngestor,
    pager: ResultPager,
    window_seconds: u64,
}

impl SniperHandler {
    pub fn new(client: Arc<dyn MarketData>, config: &Config) -> anyhow::Result<Self> {
        let pager = ResultPager::new(config.display.page_size).context("Display page size must be non-zero")?;
        Ok(Self {
            trades: TradeIngestor::new(client, &config.sniper),
            pager,
            window_seconds: config.sniper.window_seconds,
        })
    }

    /// Snipers of `asset`, page `page_number`
    #[instrument(skip(self))]
    pub async fn check(&self, asset: &str, page_number: usize) -> SniperReport {
        info!("🔍 Analyzing token trades");

        let trades = self.trades.fetch_early_trades_or_empty(asset, self.window_seconds).await;
        let snipers = analyze(&trades);

        info!(trades = trades.len(), snipers = snipers.len(), "Sniper analysis complete");
        SniperReport::build(asset, &snipers, page_number, &self.pager)
    }
}
