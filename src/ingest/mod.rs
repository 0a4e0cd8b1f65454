/// Ingestion of raw records from the market data provider

pub mod token;
pub mod trades;
pub mod wallet;

pub use token::{TokenIngestor, TOKEN_OVERVIEW_PATH};
pub use trades::{TradeIngestor, TradePages, TRADES_PATH};
pub use wallet::{WalletIngestor, WALLET_TOKENS_PATH};
