/// Token Lookup Handler
///
/// Builds the token overview report: price and its changes, market metrics,
/// 24h volume and activity, unique wallets, supply, and the supplementary
/// social and chart links.

use std::sync::Arc;

use hawkeye_core::{IngestError, TokenOverview};
use serde::Serialize;
use tracing::instrument;

use crate::client::MarketData;
use crate::ingest::TokenIngestor;
use crate::util::format::{
    format_amount, format_percent, format_timestamp, DEFAULT_DECIMALS, NOT_AVAILABLE, PRICE_DECIMALS,
};

const PLACEHOLDER_LOGO: &str = "https://via.placeholder.com/150";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

impl Link {
    fn new(label: &str, url: String) -> Self {
        Self {
            label: label.to_string(),
            url,
        }
    }
}

/// Label plus pre-formatted value, e.g. ("30m", "🟢 4.20%")
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

impl Metric {
    fn new(label: &str, value: String) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UniqueWallets {
    pub window: String,
    pub count: String,
    pub change: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenReport {
    /// Source data, kept for views derived later from the same lookup
    pub overview: TokenOverview,
    pub address: String,
    pub title: String,
    pub name: String,
    pub logo_uri: String,
    pub price: String,
    pub price_changes: Vec<Metric>,
    pub market: Vec<Metric>,
    pub volume: Vec<Metric>,
    pub activity: Vec<Metric>,
    pub unique_wallets: Vec<UniqueWallets>,
    pub supply: Vec<Metric>,
    pub last_trade: String,
    pub social_links: Vec<Link>,
    pub chart_links: Vec<Link>,
}

fn amount(value: Option<f64>) -> String {
    format_amount(Some(value.unwrap_or(0.0)), DEFAULT_DECIMALS)
}

fn usd(value: Option<f64>) -> String {
    format!("${}", amount(value))
}

/// Non-empty social links in website, twitter, telegram, discord order
pub fn social_links(overview: &TokenOverview) -> Vec<Link> {
    let Some(extensions) = overview.extensions.as_ref() else {
        return Vec::new();
    };

    [
        ("Website", &extensions.website),
        ("Twitter", &extensions.twitter),
        ("Telegram", &extensions.telegram),
        ("Discord", &extensions.discord),
    ]
    .into_iter()
    .filter_map(|(label, url)| {
        url.as_deref()
            .filter(|url| !url.is_empty())
            .map(|url| Link::new(label, url.to_string()))
    })
    .collect()
}

pub fn chart_links(address: &str) -> Vec<Link> {
    vec![
        Link::new("DEX Chart", format!("https://dexscreener.com/solana/{}", address)),
        Link::new("Birdeye Chart", format!("https://birdeye.so/token/{}", address)),
        Link::new("CoinGecko", format!("https://www.coingecko.com/en/coins/{}", address)),
    ]
}

impl TokenReport {
    /// `requested` is used for links when the provider omits the address
    pub fn build(requested: &str, overview: TokenOverview) -> Self {
        let o = &overview;
        let address = o.address.clone().unwrap_or_else(|| requested.to_string());

        let price_changes = vec![
            Metric::new("30m", format_percent(o.price_change_30m_percent)),
            Metric::new("1h", format_percent(o.price_change_1h_percent)),
            Metric::new("4h", format_percent(o.price_change_4h_percent)),
            Metric::new("24h", format_percent(o.price_change_24h_percent)),
        ];

        let market = vec![
            Metric::new("Market Cap", usd(o.real_mc)),
            Metric::new("Liquidity", usd(o.liquidity)),
            Metric::new("Holders", amount(o.holder)),
        ];

        let volume = vec![
            Metric::new("Total Volume", usd(o.volume_24h_usd)),
            Metric::new("Buy Volume", usd(o.buy_volume_24h_usd)),
            Metric::new("Sell Volume", usd(o.sell_volume_24h_usd)),
            Metric::new("Volume Change", format_percent(o.volume_24h_change_percent)),
        ];

        let activity = vec![
            Metric::new("Total Trades", amount(o.trades_24h)),
            Metric::new("Buy Trades", amount(o.buys_24h)),
            Metric::new("Sell Trades", amount(o.sells_24h)),
            Metric::new("Trade Change", format_percent(o.trades_24h_change_percent)),
        ];

        let unique_wallets = [
            ("30m", o.unique_wallets_30m, o.unique_wallets_30m_change_percent),
            ("1h", o.unique_wallets_1h, o.unique_wallets_1h_change_percent),
            ("4h", o.unique_wallets_4h, o.unique_wallets_4h_change_percent),
            ("24h", o.unique_wallets_24h, o.unique_wallets_24h_change_percent),
        ]
        .into_iter()
        .map(|(window, count, change)| UniqueWallets {
            window: window.to_string(),
            count: amount(count),
            change: format_percent(change),
        })
        .collect();

        let supply = vec![
            Metric::new("Circulating Supply", amount(o.circulating_supply)),
            Metric::new("Total Supply", amount(o.supply)),
        ];

        Self {
            title: format!("{} Token Information", o.symbol.as_deref().unwrap_or("Unknown")),
            name: o.name.clone().unwrap_or_else(|| "Unknown".to_string()),
            logo_uri: o.logo_uri.clone().unwrap_or_else(|| PLACEHOLDER_LOGO.to_string()),
            price: format!("${}", format_amount(Some(o.price.unwrap_or(0.0)), PRICE_DECIMALS)),
            price_changes,
            market,
            volume,
            activity,
            unique_wallets,
            supply,
            last_trade: format!("{} UTC", format_timestamp(o.last_trade_unix_time.unwrap_or(0))),
            social_links: social_links(o),
            chart_links: chart_links(&address),
            address: if o.address.is_some() { address } else { NOT_AVAILABLE.to_string() },
            overview,
        }
    }
}

pub struct TokenHandler {
    tokens: TokenIngestor,
}

impl TokenHandler {
    pub fn new(client: Arc<dyn MarketData>) -> Self {
        Self {
            tokens: TokenIngestor::new(client),
        }
    }

    #[instrument(skip(self))]
    pub async fn lookup(&self, address: &str) -> Result<TokenReport, IngestError> {
        let overview = self.tokens.fetch_overview(address).await?;
        Ok(TokenReport::build(address, overview))
    }
}
