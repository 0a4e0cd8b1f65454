//! End-to-end analysis flows against an in-memory market data source

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use hawkeye::config::{self, Config};
use hawkeye::handlers::{Analytics, SniperReport, WalletReport};
use hawkeye::ingest::{TradeIngestor, TOKEN_OVERVIEW_PATH, TRADES_PATH, WALLET_TOKENS_PATH};
use hawkeye::{algo, FailureCause, IngestError, MarketData};

/// Serves canned bodies per path and records every query it receives
#[derive(Default)]
struct FakeMarket {
    trades: Vec<Value>,
    trade_failure_at_offset: Option<usize>,
    wallet_body: Option<Result<Value, IngestError>>,
    token_body: Option<Result<Value, IngestError>>,
    calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl FakeMarket {
    fn with_trades(trades: Vec<Value>) -> Self {
        Self {
            trades,
            ..Default::default()
        }
    }

    fn calls_to(&self, path: &str) -> Vec<Vec<(String, String)>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, q)| q.clone())
            .collect()
    }

    fn trade_page(&self, query: &[(&str, String)]) -> Result<Value, IngestError> {
        let param = |name: &str| -> usize {
            query
                .iter()
                .find(|(k, _)| *k == name)
                .and_then(|(_, v)| v.parse().ok())
                .unwrap()
        };
        let offset = param("offset");
        let limit = param("limit");

        if self.trade_failure_at_offset == Some(offset) {
            return Err(IngestError::failure(FailureCause::Status(503)));
        }

        let items: Vec<Value> = self.trades.iter().skip(offset).take(limit).cloned().collect();
        Ok(json!({ "success": true, "data": { "items": items, "hasNext": offset + limit < self.trades.len() } }))
    }
}

#[async_trait]
impl MarketData for FakeMarket {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, IngestError> {
        self.calls.lock().unwrap().push((
            path.to_string(),
            query.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
        ));

        match path {
            TRADES_PATH => self.trade_page(query),
            WALLET_TOKENS_PATH => self.wallet_body.clone().unwrap_or_else(|| Ok(json!({}))),
            TOKEN_OVERVIEW_PATH => self.token_body.clone().unwrap_or_else(|| Ok(json!({}))),
            other => panic!("unexpected path {}", other),
        }
    }
}

fn trade(n: usize, side: &str) -> Value {
    json!({
        "owner": format!("wallet{}", n),
        "side": side,
        "from": { "uiAmount": n as f64 * 0.5, "symbol": "SOL" },
        "blockUnixTime": 1_700_000_000 + n as i64,
        "txHash": format!("tx{}", n)
    })
}

fn sniper_config(fetch_page_size: usize, max_trades: usize) -> config::Sniper {
    config::Sniper {
        window_seconds: 1,
        fetch_page_size,
        max_trades,
    }
}

#[tokio::test]
async fn three_buys_two_sells_yield_three_snipers_in_order() {
    let market = Arc::new(FakeMarket::with_trades(vec![
        trade(1, "buy"),
        trade(2, "sell"),
        trade(3, "buy"),
        trade(4, "sell"),
        trade(5, "buy"),
    ]));
    let ingestor = TradeIngestor::new(market.clone(), &sniper_config(50, 500));

    let trades = ingestor.fetch_early_trades("Mint111", 1).await.unwrap();
    let snipers = algo::analyze(&trades);

    let hashes: Vec<&str> = snipers.iter().map(|s| s.tx_hash.as_str()).collect();
    assert_eq!(hashes, vec!["tx1", "tx3", "tx5"]);

    let analytics = Analytics::with_client(market, &Config::default()).unwrap();
    match analytics.snipers.check("Mint111", 2).await {
        SniperReport::Found { page, lines, .. } => {
            assert!(page.items.is_empty());
            assert!(lines.is_empty());
            assert_eq!(page.total_pages, 1);
            assert_eq!(page.total_items, 3);
        }
        other => panic!("unexpected report: {:?}", other),
    }
}

#[tokio::test]
async fn trade_query_carries_window_policy() {
    let market = Arc::new(FakeMarket::with_trades(vec![trade(1, "buy")]));
    let ingestor = TradeIngestor::new(market.clone(), &sniper_config(50, 500));

    ingestor.fetch_early_trades("Mint111", 30).await.unwrap();

    let calls = market.calls_to(TRADES_PATH);
    assert_eq!(calls.len(), 1);
    let query = &calls[0];
    let get = |name: &str| query.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str());
    assert_eq!(get("address"), Some("Mint111"));
    assert_eq!(get("offset"), Some("0"));
    assert_eq!(get("limit"), Some("50"));
    assert_eq!(get("tx_type"), Some("swap"));
    assert_eq!(get("before_time"), Some("0"));
    assert_eq!(get("after_time"), Some("30"));
}

#[tokio::test]
async fn pages_are_followed_until_a_short_page() {
    let trades: Vec<Value> = (1..=120).map(|n| trade(n, "buy")).collect();
    let market = Arc::new(FakeMarket::with_trades(trades));
    let ingestor = TradeIngestor::new(market.clone(), &sniper_config(50, 500));

    let fetched = ingestor.fetch_early_trades("Mint111", 1).await.unwrap();

    assert_eq!(fetched.len(), 120);
    assert_eq!(fetched.last().unwrap().tx_hash, "tx120");
    let offsets: Vec<String> = market
        .calls_to(TRADES_PATH)
        .iter()
        .map(|q| q.iter().find(|(k, _)| k == "offset").unwrap().1.clone())
        .collect();
    assert_eq!(offsets, vec!["0", "50", "100"]);
}

#[tokio::test]
async fn exact_multiple_of_page_size_needs_one_empty_fetch() {
    let trades: Vec<Value> = (1..=100).map(|n| trade(n, "buy")).collect();
    let market = Arc::new(FakeMarket::with_trades(trades));
    let ingestor = TradeIngestor::new(market.clone(), &sniper_config(50, 500));

    let fetched = ingestor.fetch_early_trades("Mint111", 1).await.unwrap();

    assert_eq!(fetched.len(), 100);
    assert_eq!(market.calls_to(TRADES_PATH).len(), 3);
}

#[tokio::test]
async fn record_cap_stops_paging() {
    let trades: Vec<Value> = (1..=500).map(|n| trade(n, "buy")).collect();
    let market = Arc::new(FakeMarket::with_trades(trades));
    let ingestor = TradeIngestor::new(market.clone(), &sniper_config(50, 60));

    let fetched = ingestor.fetch_early_trades("Mint111", 1).await.unwrap();

    assert_eq!(fetched.len(), 60);
    assert_eq!(market.calls_to(TRADES_PATH).len(), 2);
}

#[tokio::test]
async fn trade_failure_is_an_error_or_empty_depending_on_caller() {
    let market = Arc::new(FakeMarket {
        trades: (1..=80).map(|n| trade(n, "buy")).collect(),
        trade_failure_at_offset: Some(50),
        ..Default::default()
    });
    let ingestor = TradeIngestor::new(market.clone(), &sniper_config(50, 500));

    let err = ingestor.fetch_early_trades("Mint111", 1).await.unwrap_err();
    assert_eq!(err, IngestError::failure(FailureCause::Status(503)));

    assert!(ingestor.fetch_early_trades_or_empty("Mint111", 1).await.is_empty());

    let analytics = Analytics::with_client(market, &Config::default()).unwrap();
    assert!(matches!(
        analytics.snipers.check("Mint111", 1).await,
        SniperReport::NoSnipers { .. }
    ));
}

#[tokio::test]
async fn cursor_retries_the_failed_offset() {
    let market = FakeMarket {
        trades: (1..=80).map(|n| trade(n, "buy")).collect(),
        trade_failure_at_offset: Some(50),
        ..Default::default()
    };
    let ingestor = TradeIngestor::new(Arc::new(market), &sniper_config(50, 500));
    let mut pages = ingestor.pages("Mint111", 1);

    assert_eq!(pages.next_page().await.unwrap().unwrap().len(), 50);
    assert!(pages.next_page().await.is_err());
    assert_eq!(pages.offset(), 50);

    pages.reset();
    assert_eq!(pages.offset(), 0);
    assert_eq!(pages.next_page().await.unwrap().unwrap()[0].tx_hash, "tx1");
}

#[tokio::test]
async fn wallet_holdings_are_ranked_and_formatted() {
    let market = Arc::new(FakeMarket {
        wallet_body: Some(Ok(json!({
            "success": true,
            "data": {
                "wallet": "Wallet111",
                "totalUsd": 1600.5,
                "items": [
                    { "name": "Bonk", "symbol": "BONK", "address": "bonk-mint", "uiAmount": 1000000.0, "valueUsd": 100.5 },
                    { "name": "Solana", "symbol": "SOL", "address": "sol-mint", "uiAmount": 10.0, "valueUsd": 1500.0 },
                    { "name": "Dust", "symbol": "DUST", "address": "dust-mint", "uiAmount": 0.5 }
                ]
            }
        }))),
        ..Default::default()
    });
    let analytics = Analytics::with_client(market.clone(), &Config::default()).unwrap();

    match analytics.wallets.check("Wallet111").await.unwrap() {
        WalletReport::Holdings { portfolio, total, assets } => {
            let symbols: Vec<&str> = portfolio.assets.iter().map(|a| a.symbol.as_str()).collect();
            assert_eq!(symbols, vec!["SOL", "BONK", "DUST"]);
            assert_eq!(total, "$1,600.50");
            assert_eq!(assets[1].balance, "1,000,000.00");
            assert_eq!(assets[2].value, "$0.000000");
        }
        other => panic!("unexpected report: {:?}", other),
    }

    let calls = market.calls_to(WALLET_TOKENS_PATH);
    assert_eq!(calls[0], vec![("wallet".to_string(), "Wallet111".to_string())]);
}

#[tokio::test]
async fn wallet_with_zero_total_is_empty() {
    let market = Arc::new(FakeMarket {
        wallet_body: Some(Ok(json!({
            "success": true,
            "data": { "wallet": "Wallet111", "totalUsd": 0, "items": [ { "symbol": "DUST", "valueUsd": 0 } ] }
        }))),
        ..Default::default()
    });
    let analytics = Analytics::with_client(market, &Config::default()).unwrap();

    assert_eq!(
        analytics.wallets.check("Wallet111").await.unwrap(),
        WalletReport::Empty {
            wallet: "Wallet111".to_string()
        }
    );
}

#[tokio::test]
async fn wallet_failures_keep_their_kind() {
    let rejected = Arc::new(FakeMarket {
        wallet_body: Some(Ok(json!({ "success": false, "message": "bad wallet" }))),
        ..Default::default()
    });
    let analytics = Analytics::with_client(rejected, &Config::default()).unwrap();
    assert!(matches!(
        analytics.wallets.check("nope").await,
        Err(IngestError::UpstreamRejected { .. })
    ));

    let unreachable = Arc::new(FakeMarket {
        wallet_body: Some(Err(IngestError::failure(FailureCause::Timeout))),
        ..Default::default()
    });
    let analytics = Analytics::with_client(unreachable, &Config::default()).unwrap();
    assert_eq!(
        analytics.wallets.check("Wallet111").await,
        Err(IngestError::failure(FailureCause::Timeout))
    );
}

#[tokio::test]
async fn token_lookup_requires_data() {
    let market = Arc::new(FakeMarket {
        token_body: Some(Ok(json!({ "success": true, "data": null }))),
        ..Default::default()
    });
    let analytics = Analytics::with_client(market, &Config::default()).unwrap();
    assert!(matches!(
        analytics.tokens.lookup("Mint111").await,
        Err(IngestError::UpstreamRejected { .. })
    ));

    let market = Arc::new(FakeMarket {
        token_body: Some(Ok(json!({
            "success": true,
            "data": { "address": "Mint111", "symbol": "BONK", "price": 0.0000231, "priceChange24hPercent": 12.5 }
        }))),
        ..Default::default()
    });
    let analytics = Analytics::with_client(market.clone(), &Config::default()).unwrap();
    let report = analytics.tokens.lookup("Mint111").await.unwrap();

    assert_eq!(report.title, "BONK Token Information");
    assert_eq!(report.price_changes[3].value, "🟢 12.50%");
    assert_eq!(
        market.calls_to(TOKEN_OVERVIEW_PATH)[0],
        vec![("address".to_string(), "Mint111".to_string())]
    );
}

fn rejected(result: Result<impl std::fmt::Debug, IngestError>) -> bool {
    matches!(result, Err(IngestError::UpstreamRejected { .. }))
}

#[tokio::test]
async fn huge_page_number_is_an_empty_listing() {
    let market = Arc::new(FakeMarket::with_trades(vec![trade(1, "buy")]));
    let analytics = Analytics::with_client(market, &Config::default()).unwrap();

    match analytics.snipers.check("Mint111", usize::MAX / 2).await {
        SniperReport::Found { page, lines, .. } => {
            assert!(lines.is_empty());
            assert_eq!(page.total_items, 1);
            assert_eq!(page.total_pages, 1);
        }
        other => panic!("unexpected report: {:?}", other),
    }
}

#[tokio::test]
async fn wallet_without_data_is_rejected() {
    let market = Arc::new(FakeMarket {
        wallet_body: Some(Ok(json!({ "success": true }))),
        ..Default::default()
    });
    let analytics = Analytics::with_client(market, &Config::default()).unwrap();

    assert!(rejected(analytics.wallets.check("Wallet111").await));
}

#[tokio::test]
async fn malformed_wallet_envelope_is_rejected() {
    let market = Arc::new(FakeMarket {
        wallet_body: Some(Ok(json!({ "success": true, "data": { "totalUsd": "12", "items": "oops" } }))),
        ..Default::default()
    });
    let analytics = Analytics::with_client(market, &Config::default()).unwrap();

    assert!(rejected(analytics.wallets.check("Wallet111").await));
}

#[tokio::test]
async fn token_success_false_is_rejected() {
    let market = Arc::new(FakeMarket {
        token_body: Some(Ok(json!({ "success": false, "data": { "symbol": "BONK" } }))),
        ..Default::default()
    });
    let analytics = Analytics::with_client(market, &Config::default()).unwrap();

    assert!(rejected(analytics.tokens.lookup("Mint111").await));
}

#[tokio::test]
async fn malformed_token_payload_is_rejected() {
    let bad_envelope = Arc::new(FakeMarket {
        token_body: Some(Ok(json!({ "success": "yes", "data": { "symbol": "BONK" } }))),
        ..Default::default()
    });
    let analytics = Analytics::with_client(bad_envelope, &Config::default()).unwrap();
    assert!(rejected(analytics.tokens.lookup("Mint111").await));

    let bad_overview = Arc::new(FakeMarket {
        token_body: Some(Ok(json!({ "success": true, "data": { "symbol": "BONK", "price": "cheap" } }))),
        ..Default::default()
    });
    let analytics = Analytics::with_client(bad_overview, &Config::default()).unwrap();
    assert!(rejected(analytics.tokens.lookup("Mint111").await));
}
