use serde::{Deserialize, Serialize};

/// Direction of a swap as reported by the data provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
    /// Anything the provider sends that is neither "buy" nor "sell"
    Other(String),
}

impl TradeSide {
    pub fn is_buy(&self) -> bool {
        matches!(self, TradeSide::Buy)
    }
}

impl From<&str> for TradeSide {
    fn from(side: &str) -> Self {
        match side {
            "buy" => TradeSide::Buy,
            "sell" => TradeSide::Sell,
            other => TradeSide::Other(other.to_string()),
        }
    }
}

/// One observed swap on an asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Wallet that signed the swap
    pub wallet: String,
    pub side: TradeSide,
    /// Quantity of the quote asset exchanged (SOL for most pairs)
    pub counter_amount: f64,
    pub timestamp_unix: i64,
    pub tx_hash: String,
}

/// Early buy event derived from a buy-side trade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SniperRecord {
    pub wallet: String,
    pub amount_quote: f64,
    /// `%Y-%m-%d %H:%M:%S`, UTC
    pub timestamp: String,
    pub timestamp_unix: i64,
    pub tx_hash: String,
}

/// A single token balance inside a wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletAsset {
    pub name: String,
    pub symbol: String,
    pub address: String,
    pub ui_amount: f64,
    pub value_usd: f64,
}

/// Holdings of one wallet, ranked by USD value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletPortfolio {
    pub wallet_address: String,
    /// Provider-supplied total, never recomputed from `assets`
    pub total_value_usd: f64,
    /// Sorted descending by `value_usd`, ties in provider order
    pub assets: Vec<WalletAsset>,
}

impl WalletPortfolio {
    /// A wallet with no value or no holdings is reported as empty
    pub fn is_empty(&self) -> bool {
        self.total_value_usd == 0.0 || self.assets.is_empty()
    }
}

/// Bounded view over an ordered result set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based
    pub page_number: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 1-based position of the first item of this page in the full result set,
    /// saturating at `usize::MAX` for page numbers far past the end
    pub fn first_ordinal(&self) -> usize {
        self.page_number
            .saturating_sub(1)
            .saturating_mul(self.page_size)
            .saturating_add(1)
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }
}

/// Social links published in a token's metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenExtensions {
    pub website: Option<String>,
    pub twitter: Option<String>,
    pub telegram: Option<String>,
    pub discord: Option<String>,
}

/// Market overview of a token as returned by `/defi/token_overview`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenOverview {
    pub address: Option<String>,
    pub symbol: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "logoURI")]
    pub logo_uri: Option<String>,
    pub price: Option<f64>,

    #[serde(rename = "priceChange30mPercent")]
    pub price_change_30m_percent: Option<f64>,
    #[serde(rename = "priceChange1hPercent")]
    pub price_change_1h_percent: Option<f64>,
    #[serde(rename = "priceChange4hPercent")]
    pub price_change_4h_percent: Option<f64>,
    #[serde(rename = "priceChange24hPercent")]
    pub price_change_24h_percent: Option<f64>,

    #[serde(rename = "realMc")]
    pub real_mc: Option<f64>,
    pub liquidity: Option<f64>,
    pub holder: Option<f64>,

    #[serde(rename = "v24hUSD")]
    pub volume_24h_usd: Option<f64>,
    #[serde(rename = "vBuy24hUSD")]
    pub buy_volume_24h_usd: Option<f64>,
    #[serde(rename = "vSell24hUSD")]
    pub sell_volume_24h_usd: Option<f64>,
    #[serde(rename = "v24hChangePercent")]
    pub volume_24h_change_percent: Option<f64>,

    #[serde(rename = "trade24h")]
    pub trades_24h: Option<f64>,
    #[serde(rename = "buy24h")]
    pub buys_24h: Option<f64>,
    #[serde(rename = "sell24h")]
    pub sells_24h: Option<f64>,
    #[serde(rename = "trade24hChangePercent")]
    pub trades_24h_change_percent: Option<f64>,

    #[serde(rename = "uniqueWallet30m")]
    pub unique_wallets_30m: Option<f64>,
    #[serde(rename = "uniqueWallet1h")]
    pub unique_wallets_1h: Option<f64>,
    #[serde(rename = "uniqueWallet4h")]
    pub unique_wallets_4h: Option<f64>,
    #[serde(rename = "uniqueWallet24h")]
    pub unique_wallets_24h: Option<f64>,
    #[serde(rename = "uniqueWallet30mChangePercent")]
    pub unique_wallets_30m_change_percent: Option<f64>,
    #[serde(rename = "uniqueWallet1hChangePercent")]
    pub unique_wallets_1h_change_percent: Option<f64>,
    #[serde(rename = "uniqueWallet4hChangePercent")]
    pub unique_wallets_4h_change_percent: Option<f64>,
    #[serde(rename = "uniqueWallet24hChangePercent")]
    pub unique_wallets_24h_change_percent: Option<f64>,

    #[serde(rename = "circulatingSupply")]
    pub circulating_supply: Option<f64>,
    pub supply: Option<f64>,
    #[serde(rename = "lastTradeUnixTime")]
    pub last_trade_unix_time: Option<i64>,

    pub extensions: Option<TokenExtensions>,
}
