// Price Client - Provider-normalization layer for token price data
// Two upstream clients mapped onto one contract with a shared error taxonomy

pub mod birdeye_client;
pub mod dexscreener_client;
pub mod pool_selector;

// Re-export configs from config_manager
pub use config_manager::{BirdEyeConfig, DexScreenerConfig};

pub use price_core::{
    is_valid_token_address, PriceError, PriceInfo, PriceProvider, Result, TokenOverview, SOL_MINT,
};

pub use birdeye_client::{BirdEyeClient, MultiPriceResponse, TokenPriceData};

pub use dexscreener_client::{
    DexScreenerClient, PairLiquidity, PairToken, TokenPair, TokenPairsResponse,
};

pub use pool_selector::select_largest_native_pool;
