/// Early buyer detection

use hawkeye_core::{SniperRecord, Trade};

use crate::util::format::format_timestamp;

/// Buy-side trades projected to sniper records, in the order the provider returned them.
///
/// The time window is trusted to the ingestor and nothing is re-sorted or deduplicated.
pub fn analyze(trades: &[Trade]) -> Vec<SniperRecord> {
    trades
        .iter()
        .filter(|trade| trade.side.is_buy())
        .map(|trade| SniperRecord {
            wallet: trade.wallet.clone(),
            amount_quote: trade.counter_amount,
            timestamp: format_timestamp(trade.timestamp_unix),
            timestamp_unix: trade.timestamp_unix,
            tx_hash: trade.tx_hash.clone(),
        })
        .collect()
}
