// Price Core - Shared data model for token price aggregation
// Value types, error taxonomy and the provider contract both clients implement

pub mod address;

pub use address::is_valid_token_address;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Wrapped SOL mint. Pool selection only considers pairs quoted against it.
pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";

#[derive(Error, Debug)]
pub enum PriceError {
    #[error("no token addresses provided")]
    NoAddresses,
    #[error("invalid token address: {0}")]
    InvalidAddress(String),
    #[error("upstream request failed: {0}")]
    Upstream(String),
    #[error("no usable price data for tokens: {0:?}")]
    InvalidTokens(Vec<String>),
    #[error("token has no liquidity")]
    NoLiquidity,
    #[error("no trading pairs found for token")]
    TransactionNotFound,
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),
}

pub type Result<T> = std::result::Result<T, PriceError>;

/// USD price for a token together with the liquidity depth backing it.
/// Liquidity is `None` when the upstream reported no liquidity object at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceInfo {
    pub price: Decimal,
    pub liquidity: Option<Decimal>,
}

/// Point-in-time snapshot of a single token beyond bare price.
///
/// Only constructed when liquidity is known and non-zero; callers must not
/// assume freshness beyond the fetch that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenOverview {
    pub price: Decimal,
    pub symbol: String,
    pub decimals: u32,
    pub last_trade_unix_time: i64,
    pub liquidity: Decimal,
    pub supply: Decimal,
}

/// Contract shared by the price providers.
///
/// `fetch_prices` is total: on success the returned map contains an entry for
/// every requested address. Any address without usable price and liquidity
/// data fails the whole call with `PriceError::InvalidTokens` listing every
/// such address.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Fetch current price and liquidity for a list of tokens.
    async fn fetch_prices(
        &self,
        token_addresses: &[String],
    ) -> Result<HashMap<String, PriceInfo>>;

    /// Fetch an enriched overview for a single token.
    async fn fetch_token_overview(&self, address: &str) -> Result<TokenOverview>;
}
