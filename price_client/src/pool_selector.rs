use price_core::SOL_MINT;
use rust_decimal::prelude::ToPrimitive;

use crate::dexscreener_client::TokenPair;

/// Pick the deepest pool trading `token_address` against native SOL.
///
/// Pairs where the token is not the base, or where the quote side is a
/// stablecoin or any other third asset, are excluded outright rather than
/// deprioritized. Liquidity is compared as f64 with strict `>` against a
/// running maximum starting below zero, so absent liquidity (counted as 0)
/// is still selectable and ties keep the first pair in input order. The
/// returned record keeps its original decimal fields.
pub fn select_largest_native_pool<'a>(
    pairs: &'a [TokenPair],
    token_address: &str,
) -> Option<&'a TokenPair> {
    let mut best = None;
    let mut max_liquidity_usd = -1.0_f64;

    for pair in pairs {
        if pair.base_token.address != token_address || pair.quote_token.address != SOL_MINT {
            continue;
        }

        let liquidity_usd = pair
            .liquidity
            .as_ref()
            .and_then(|l| l.usd)
            .and_then(|usd| usd.to_f64())
            .unwrap_or(0.0);

        if liquidity_usd > max_liquidity_usd {
            max_liquidity_usd = liquidity_usd;
            best = Some(pair);
        }
    }

    best
}
