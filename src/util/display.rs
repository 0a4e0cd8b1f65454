/// Terminal rendering of analysis reports

use std::fmt::Write;

use colored::Colorize;
use hawkeye_core::IngestError;
use rand::seq::SliceRandom;

use crate::handlers::{Link, Metric, SniperReport, TokenReport, WalletReport};

const BROKE_GIFS: [&str; 3] = [
    "https://media.tenor.com/aj47iJzWZgwAAAPo/broke-no.mp4",
    "https://media.tenor.com/h1-tMFNDA1gAAAPo/broke-poor.mp4",
    "https://media.tenor.com/y6HVvese3nMAAAPo/wallet-penacony.mp4",
];

fn rule(out: &mut String) {
    let _ = writeln!(out, "{}", "=".repeat(70));
}

fn metrics(out: &mut String, heading: &str, items: &[Metric]) {
    let _ = writeln!(out, "\n{}", heading.bold());
    for metric in items {
        let _ = writeln!(out, "   {}: {}", metric.label, metric.value);
    }
}

fn links(out: &mut String, heading: &str, items: &[Link]) {
    let _ = writeln!(out, "\n{}", heading.bold());
    for link in items {
        let _ = writeln!(out, "   {} {}", format!("{}:", link.label), link.url);
    }
}

pub fn render_sniper_report(report: &SniperReport) -> String {
    let mut out = String::new();
    match report {
        SniperReport::NoSnipers { .. } => {
            let _ = writeln!(out, "{}", "No snipers detected!".bright_yellow());
        }
        SniperReport::Found {
            asset,
            page,
            lines,
            footer,
        } => {
            let _ = writeln!(out, "\n{} {}", "🎯", "Sniper Detection Results".bold());
            let _ = writeln!(out, "Contract Address: {}", asset);
            rule(&mut out);
            if page.is_empty() {
                let _ = writeln!(out, "No snipers on page {}", page.page_number);
            }
            for line in lines {
                let _ = writeln!(out, "{}", format!("Sniper #{}", line.ordinal).bold());
                let _ = writeln!(out, "   🔷 Wallet: {}", line.wallet);
                let _ = writeln!(out, "   💰 Amount: {}", line.amount);
                let _ = writeln!(out, "   🕒 Time: {}", line.time);
                let _ = writeln!(out, "   📝 TX: {}", line.tx_hash);
            }
            rule(&mut out);
            let _ = writeln!(out, "{}", footer);
            if page.has_next() {
                let _ = writeln!(
                    out,
                    "{}",
                    format!("More snipers: --page {}", page.page_number + 1).bright_black()
                );
            }
        }
    }
    out
}

pub fn render_token_report(report: &TokenReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", report.title.bold());
    let _ = writeln!(out, "{}", report.name);
    let _ = writeln!(out, "🖼️ Logo: {}", report.logo_uri);
    rule(&mut out);

    let _ = writeln!(out, "\n{}", "💰 Price Information".bold());
    let _ = writeln!(out, "   Current Price: {}", report.price);
    for change in &report.price_changes {
        let _ = writeln!(out, "   {:<4} {}", format!("{}:", change.label), change.value);
    }

    metrics(&mut out, "📊 Market Metrics", &report.market);
    metrics(&mut out, "📈 24h Volume", &report.volume);
    metrics(&mut out, "🔄 24h Trading Activity", &report.activity);

    let _ = writeln!(out, "\n{}", "👥 Unique Wallets".bold());
    for wallets in &report.unique_wallets {
        let _ = writeln!(
            out,
            "   {:<4} {} ({})",
            format!("{}:", wallets.window),
            wallets.count,
            wallets.change
        );
    }

    metrics(&mut out, "📦 Supply Information", &report.supply);

    if !report.social_links.is_empty() {
        links(&mut out, "🔗 Social Links", &report.social_links);
    }
    links(&mut out, "📈 Available Charts", &report.chart_links);

    rule(&mut out);
    let _ = writeln!(out, "Token Address: {} | Last Trade: {}", report.address, report.last_trade);
    out
}

pub fn render_wallet_report(report: &WalletReport) -> String {
    let mut out = String::new();
    match report {
        WalletReport::Empty { .. } => {
            let gif = BROKE_GIFS.choose(&mut rand::thread_rng()).unwrap_or(&BROKE_GIFS[0]);
            let _ = writeln!(out, "{} {}", "Wallet is empty!".bright_yellow(), gif);
        }
        WalletReport::Holdings { portfolio, total, assets } => {
            let _ = writeln!(out, "\n{}", "💼 Wallet Portfolio Summary".bold());
            let _ = writeln!(out, "👛 Wallet Address: {}", portfolio.wallet_address);
            let _ = writeln!(out, "💰 Total Portfolio Value: {}", total.bold());
            let _ = writeln!(out, "{}", "〰️ Assets 〰️");
            for asset in assets {
                let _ = writeln!(out, "\n🪙 {}", asset.heading.bold());
                let _ = writeln!(out, "   💵 Value: {}", asset.value.green());
                let _ = writeln!(out, "   🔢 Balance: {} {}", asset.balance, asset.symbol);
                let _ = writeln!(out, "   📝 CA: {}", asset.address);
            }
            let _ = writeln!(out, "\n{}", "Data provided by Birdeye.so".bright_black());
        }
    }
    out
}

/// User-facing message for a failed lookup; `what` names the data, e.g. "token data"
pub fn render_error(what: &str, error: &IngestError) -> String {
    match error {
        IngestError::IngestionFailure { cause } => {
            format!("❌ Error fetching {}: {}", what, cause).red().to_string()
        }
        IngestError::UpstreamRejected { .. } => format!(
            "❌ Failed to fetch {}. Please verify the address and try again.",
            what
        )
        .red()
        .to_string(),
    }
}
