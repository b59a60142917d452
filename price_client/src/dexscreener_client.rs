use anyhow::Result;
use async_trait::async_trait;
use config_manager::DexScreenerConfig;
use price_core::{
    is_valid_token_address, PriceError, PriceInfo, PriceProvider, Result as PriceResult,
    TokenOverview,
};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::pool_selector::select_largest_native_pool;

/// Token-pairs response from DexScreener. `pairs` is `null` for unknown
/// tokens rather than an empty array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPairsResponse {
    #[serde(rename = "schemaVersion")]
    pub schema_version: Option<String>,
    pub pairs: Option<Vec<TokenPair>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairToken {
    pub address: String,
    pub name: Option<String>,
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairLiquidity {
    pub usd: Option<Decimal>,
    pub base: Option<Decimal>,
    pub quote: Option<Decimal>,
}

/// One trading pair for a token. `priceUsd` arrives as a JSON string;
/// the decimal fields deserialize from either strings or numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    #[serde(rename = "baseToken")]
    pub base_token: PairToken,
    #[serde(rename = "quoteToken")]
    pub quote_token: PairToken,
    #[serde(rename = "priceUsd")]
    pub price_usd: Option<Decimal>,
    pub liquidity: Option<PairLiquidity>,
    pub symbol: Option<String>,
    pub decimals: Option<u32>,
    #[serde(rename = "lastTradeUnixTime")]
    pub last_trade_unix_time: Option<i64>,
    pub supply: Option<Decimal>,
}

/// DexScreener API client
#[derive(Debug, Clone)]
pub struct DexScreenerClient {
    config: DexScreenerConfig,
    http_client: Client,
}

impl DexScreenerClient {
    pub fn new(config: DexScreenerConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Get the DexScreener client configuration
    pub fn config(&self) -> &DexScreenerConfig {
        &self.config
    }

    fn validate_token_address(address: &str) -> PriceResult<()> {
        if address.is_empty() {
            return Err(PriceError::NoAddresses);
        }
        if !is_valid_token_address(address) {
            return Err(PriceError::InvalidAddress(address.to_string()));
        }
        Ok(())
    }

    fn validate_token_addresses(token_addresses: &[String]) -> PriceResult<()> {
        if token_addresses.is_empty() {
            return Err(PriceError::NoAddresses);
        }
        for address in token_addresses {
            Self::validate_token_address(address)?;
        }
        Ok(())
    }

    /// Fetch the trading-pair list for a single token.
    async fn fetch_token_pairs(&self, address: &str) -> PriceResult<Vec<TokenPair>> {
        let url = format!(
            "{}/latest/dex/tokens/{}",
            self.config.api_base_url, address
        );

        debug!("Fetching token pairs from DexScreener for {}", address);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| PriceError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PriceError::Upstream(format!("HTTP {}", response.status())));
        }

        let payload: TokenPairsResponse = response
            .json()
            .await
            .map_err(|e| PriceError::Upstream(e.to_string()))?;

        Ok(payload.pairs.unwrap_or_default())
    }

    /// Price and liquidity of the selected pair. Liquidity stays `None`
    /// only when the pair carries no liquidity object at all.
    fn price_info_from_pair(pair: &TokenPair) -> PriceInfo {
        let liquidity = pair
            .liquidity
            .as_ref()
            .map(|l| l.usd.unwrap_or(Decimal::ZERO));

        PriceInfo {
            price: pair.price_usd.unwrap_or(Decimal::ZERO),
            liquidity,
        }
    }

    /// Build an overview from the selected pair; all metadata fields come
    /// from the pair record, zero-defaulted where the upstream left gaps.
    fn overview_from_pair(pair: &TokenPair) -> PriceResult<TokenOverview> {
        let liquidity = match pair
            .liquidity
            .as_ref()
            .map(|l| l.usd.unwrap_or(Decimal::ZERO))
        {
            Some(liquidity) if !liquidity.is_zero() => liquidity,
            _ => return Err(PriceError::NoLiquidity),
        };

        Ok(TokenOverview {
            price: pair.price_usd.unwrap_or(Decimal::ZERO),
            symbol: pair.symbol.clone().unwrap_or_default(),
            decimals: pair.decimals.unwrap_or(0),
            last_trade_unix_time: pair.last_trade_unix_time.unwrap_or(0),
            liquidity,
            supply: pair.supply.unwrap_or(Decimal::ZERO),
        })
    }
}

#[async_trait]
impl PriceProvider for DexScreenerClient {
    /// Fetch current price and liquidity for a list of tokens, one request
    /// per token since the upstream has no batch pairs endpoint. Calls run
    /// strictly sequentially; addresses without a usable pair are collected
    /// and reported together once every address has been tried.
    async fn fetch_prices(
        &self,
        token_addresses: &[String],
    ) -> PriceResult<HashMap<String, PriceInfo>> {
        Self::validate_token_addresses(token_addresses)?;

        let mut prices = HashMap::new();
        let mut invalid_tokens = Vec::new();

        for address in token_addresses {
            let pairs = self.fetch_token_pairs(address).await?;
            match select_largest_native_pool(&pairs, address) {
                Some(pair) => {
                    prices.insert(address.clone(), Self::price_info_from_pair(pair));
                }
                None => invalid_tokens.push(address.clone()),
            }
        }

        if !invalid_tokens.is_empty() {
            warn!(
                "DexScreener returned no usable pools for {} of {} tokens",
                invalid_tokens.len(),
                token_addresses.len()
            );
            return Err(PriceError::InvalidTokens(invalid_tokens));
        }

        info!(
            "Retrieved prices from DexScreener for {} tokens",
            prices.len()
        );
        Ok(prices)
    }

    /// Fetch an enriched overview for a single token from its deepest
    /// native-quoted pool.
    async fn fetch_token_overview(&self, address: &str) -> PriceResult<TokenOverview> {
        Self::validate_token_address(address)?;

        let pairs = self.fetch_token_pairs(address).await?;
        let pair =
            select_largest_native_pool(&pairs, address).ok_or(PriceError::TransactionNotFound)?;

        Self::overview_from_pair(pair)
    }
}
