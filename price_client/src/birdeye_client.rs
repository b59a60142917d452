use anyhow::Result;
use async_trait::async_trait;
use config_manager::BirdEyeConfig;
use price_core::{
    is_valid_token_address, PriceError, PriceInfo, PriceProvider, Result as PriceResult,
    TokenOverview,
};
use reqwest::{Client, Method, Response};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Multi-price response from BirdEye. Entries may be `null` and the whole
/// `data` map may be absent on degenerate responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiPriceResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Option<HashMap<String, Option<TokenPriceData>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPriceData {
    pub value: Option<Decimal>,
    pub liquidity: Option<Decimal>,
    #[serde(rename = "updateUnixTime")]
    pub update_unix_time: Option<i64>,
}

/// BirdEye API client
#[derive(Debug, Clone)]
pub struct BirdEyeClient {
    config: BirdEyeConfig,
    http_client: Client,
}

impl BirdEyeClient {
    pub fn new(config: BirdEyeConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Get the BirdEye client configuration
    pub fn config(&self) -> &BirdEyeConfig {
        &self.config
    }

    /// Dispatch a request with the standard BirdEye headers. Only GET and
    /// POST are meaningful against this API; anything else is a wiring bug
    /// and is rejected before a request is built.
    async fn send_request(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, &str)],
    ) -> PriceResult<Response> {
        let request = if method == Method::GET {
            self.http_client.get(url)
        } else if method == Method::POST {
            self.http_client.post(url)
        } else {
            return Err(PriceError::UnsupportedMethod(method.to_string()));
        };

        request
            .header("accept", "application/json")
            .header("x-chain", &self.config.chain)
            .header("X-API-KEY", &self.config.api_key)
            .query(query)
            .send()
            .await
            .map_err(|e| PriceError::Upstream(e.to_string()))
    }

    fn validate_token_addresses(token_addresses: &[String]) -> PriceResult<()> {
        if token_addresses.is_empty() {
            return Err(PriceError::NoAddresses);
        }
        for address in token_addresses {
            if !is_valid_token_address(address) {
                return Err(PriceError::InvalidAddress(address.clone()));
            }
        }
        Ok(())
    }

    /// Map a multi-price payload onto the requested address list. Every
    /// requested address must come back with both a value and a liquidity
    /// figure; the rest (including addresses the upstream omitted outright)
    /// fail the whole batch.
    fn collect_prices(
        token_addresses: &[String],
        data: &HashMap<String, Option<TokenPriceData>>,
    ) -> PriceResult<HashMap<String, PriceInfo>> {
        let mut price_details = HashMap::new();
        let mut invalid_tokens = Vec::new();

        for address in token_addresses {
            match data.get(address).and_then(|entry| entry.as_ref()) {
                Some(TokenPriceData {
                    value: Some(value),
                    liquidity: Some(liquidity),
                    ..
                }) => {
                    price_details.insert(
                        address.clone(),
                        PriceInfo {
                            price: *value,
                            liquidity: Some(*liquidity),
                        },
                    );
                }
                _ => invalid_tokens.push(address.clone()),
            }
        }

        if !invalid_tokens.is_empty() {
            warn!(
                "BirdEye returned no usable price data for {} of {} tokens",
                invalid_tokens.len(),
                token_addresses.len()
            );
            return Err(PriceError::InvalidTokens(invalid_tokens));
        }

        Ok(price_details)
    }

    /// Build an overview from a single-token multi-price entry. The payload
    /// carries no symbol/decimals/supply metadata, so those fields stay
    /// zeroed.
    fn overview_from_data(
        address: &str,
        token_data: Option<TokenPriceData>,
    ) -> PriceResult<TokenOverview> {
        let Some(token_data) = token_data else {
            return Err(PriceError::InvalidTokens(vec![address.to_string()]));
        };

        let liquidity = match token_data.liquidity {
            Some(liquidity) if !liquidity.is_zero() => liquidity,
            _ => return Err(PriceError::NoLiquidity),
        };

        Ok(TokenOverview {
            price: token_data.value.unwrap_or_default(),
            symbol: String::new(),
            decimals: 0,
            last_trade_unix_time: 0,
            liquidity,
            supply: Decimal::ZERO,
        })
    }
}

#[async_trait]
impl PriceProvider for BirdEyeClient {
    /// Fetch current price and liquidity for a list of tokens via the
    /// multi-price endpoint, in one request.
    async fn fetch_prices(
        &self,
        token_addresses: &[String],
    ) -> PriceResult<HashMap<String, PriceInfo>> {
        Self::validate_token_addresses(token_addresses)?;

        let url = format!("{}/defi/multi_price", self.config.api_base_url);
        let list_address = token_addresses.join(",");

        debug!(
            "Fetching prices from BirdEye for {} tokens",
            token_addresses.len()
        );

        let response = self
            .send_request(
                Method::GET,
                &url,
                &[
                    ("include_liquidity", "true"),
                    ("list_address", &list_address),
                ],
            )
            .await?;

        if !response.status().is_success() {
            return Err(PriceError::Upstream(format!("HTTP {}", response.status())));
        }

        let multi_price: MultiPriceResponse = response
            .json()
            .await
            .map_err(|e| PriceError::Upstream(e.to_string()))?;

        let data = multi_price.data.unwrap_or_default();
        let prices = Self::collect_prices(token_addresses, &data)?;

        info!(
            "Retrieved prices from BirdEye for {} tokens",
            prices.len()
        );
        Ok(prices)
    }

    /// Fetch an overview for a single token via the same endpoint shape.
    async fn fetch_token_overview(&self, address: &str) -> PriceResult<TokenOverview> {
        if address.is_empty() {
            return Err(PriceError::NoAddresses);
        }
        if !is_valid_token_address(address) {
            return Err(PriceError::InvalidAddress(address.to_string()));
        }

        let url = format!("{}/defi/multi_price", self.config.api_base_url);

        debug!("Fetching token overview from BirdEye for {}", address);

        let response = self
            .send_request(
                Method::GET,
                &url,
                &[
                    ("include_liquidity", "true"),
                    ("include_decimals", "true"),
                    ("list_address", address),
                ],
            )
            .await?;

        if !response.status().is_success() {
            return Err(PriceError::InvalidTokens(vec![address.to_string()]));
        }

        let multi_price: MultiPriceResponse = response
            .json()
            .await
            .map_err(|e| PriceError::Upstream(e.to_string()))?;

        let token_data = multi_price.data.unwrap_or_default().remove(address).flatten();
        Self::overview_from_data(address, token_data)
    }
}
