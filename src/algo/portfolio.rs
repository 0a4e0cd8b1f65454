/// Portfolio valuation and ranking

use std::cmp::Ordering;

use hawkeye_core::{WalletAsset, WalletPortfolio};

fn sort_key(asset: &WalletAsset) -> f64 {
    if asset.value_usd.is_nan() {
        0.0
    } else {
        asset.value_usd
    }
}

/// Rank `assets` by USD value, highest first. Equal values keep their input order.
///
/// `total_usd` is the provider's figure and is not recomputed from the assets.
pub fn aggregate(wallet_address: &str, mut assets: Vec<WalletAsset>, total_usd: f64) -> WalletPortfolio {
    assets.sort_by(|a, b| sort_key(b).partial_cmp(&sort_key(a)).unwrap_or(Ordering::Equal));

    WalletPortfolio {
        wallet_address: wallet_address.to_string(),
        total_value_usd: total_usd,
        assets,
    }
}
