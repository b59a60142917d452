use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] ConfigError),
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

pub type Result<T> = std::result::Result<T, ConfigurationError>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// BirdEye API configuration
    pub birdeye: BirdEyeConfig,

    /// DexScreener API configuration
    pub dexscreener: DexScreenerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirdEyeConfig {
    /// BirdEye API key, sent as the X-API-KEY header
    pub api_key: String,

    /// BirdEye API base URL
    pub api_base_url: String,

    /// Chain identifier sent as the x-chain header
    pub chain: String,

    /// Request timeout in seconds
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DexScreenerConfig {
    /// DexScreener API base URL
    pub api_base_url: String,

    /// Request timeout in seconds
    pub request_timeout_seconds: u64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            birdeye: BirdEyeConfig {
                api_key: "".to_string(), // Must be set in .env or config file
                api_base_url: "https://public-api.birdeye.so".to_string(),
                chain: "solana".to_string(),
                request_timeout_seconds: 30,
            },
            dexscreener: DexScreenerConfig {
                api_base_url: "https://api.dexscreener.com".to_string(),
                request_timeout_seconds: 30,
            },
        }
    }
}

impl BirdEyeConfig {
    /// Validate BirdEye configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(ConfigurationError::InvalidValue(
                "BirdEye API key is required".to_string(),
            ));
        }

        if self.chain.is_empty() {
            return Err(ConfigurationError::InvalidValue(
                "BirdEye chain identifier is required".to_string(),
            ));
        }

        if self.request_timeout_seconds == 0 {
            return Err(ConfigurationError::InvalidValue(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl DexScreenerConfig {
    /// Validate DexScreener configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.is_empty() {
            return Err(ConfigurationError::InvalidValue(
                "DexScreener base URL is required".to_string(),
            ));
        }

        if self.request_timeout_seconds == 0 {
            return Err(ConfigurationError::InvalidValue(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl PricingConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path("config.toml")
    }

    /// Load configuration from a specific file path
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let mut config_builder = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&PricingConfig::default())?);

        // Add config file if it exists
        if config_path.as_ref().exists() {
            info!(
                "Loading configuration from: {}",
                config_path.as_ref().display()
            );
            config_builder = config_builder.add_source(File::from(config_path.as_ref()));
        } else {
            debug!("Config file not found, using defaults and environment variables");
        }

        // Add environment variables with prefix, e.g. PRICING__BIRDEYE__API_KEY
        config_builder = config_builder.add_source(
            Environment::with_prefix("PRICING")
                .try_parsing(true)
                .separator("__"),
        );

        let config = config_builder.build()?;
        let pricing_config: PricingConfig = config.try_deserialize()?;

        pricing_config.validate()?;

        Ok(pricing_config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.birdeye.validate()?;
        self.dexscreener.validate()?;
        Ok(())
    }
}

/// Configuration manager for loading and holding the pricing configuration
#[derive(Debug)]
pub struct ConfigManager {
    config: PricingConfig,
}

impl ConfigManager {
    /// Create a new configuration manager
    pub fn new() -> Result<Self> {
        let config = PricingConfig::load()?;
        info!("Configuration loaded successfully");
        debug!("Configuration: {:#?}", config);

        Ok(Self { config })
    }

    /// Create configuration manager from a specific file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = PricingConfig::load_from_path(path)?;
        Ok(Self { config })
    }

    /// Get a reference to the current configuration
    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Reload configuration from file and environment
    pub fn reload(&mut self) -> Result<()> {
        self.config = PricingConfig::load()?;
        info!("Configuration reloaded");
        Ok(())
    }
}
