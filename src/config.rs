//! Runtime settings, read from the process environment

use config::{Config, ConfigError, Environment};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::api::alpaca::{DATA_API_BASE, PAPER_API_BASE};
use crate::indicators::IndicatorConfig;
use crate::models::TimeFrame;

pub const DEFAULT_SYMBOL: &str = "XRP/USD";
pub const DEFAULT_LOOKBACK: u32 = 50;
pub const DEFAULT_QUANTITY: u32 = 10;

/// Settings for one invocation
///
/// Credentials and endpoints come from `ALPACA_*` variables, trading
/// parameters from `TRADER_*` variables. Neither prefix can set the other's fields.
#[derive(Clone)]
pub struct Settings {
    pub api_key: String,
    pub secret_key: String,
    pub base_url: String,
    pub data_url: String,
    pub symbol: String,
    pub timeframe: TimeFrame,
    pub lookback: u32,
    pub quantity: Decimal,
}

/// Fields read from `ALPACA_*`
#[derive(Deserialize)]
struct AlpacaVars {
    api_key: String,
    secret_key: String,
    base_url: String,
    data_url: String,
}

/// Fields read from `TRADER_*`
#[derive(Deserialize)]
struct TraderVars {
    symbol: String,
    timeframe: TimeFrame,
    lookback: u32,
    quantity: Decimal,
}

impl Settings {
    /// Load settings from the environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_sources(
            Environment::with_prefix("ALPACA"),
            Environment::with_prefix("TRADER"),
        )
    }

    fn from_sources(alpaca: Environment, trader: Environment) -> Result<Self, ConfigError> {
        let alpaca: AlpacaVars = Config::builder()
            .set_default("base_url", PAPER_API_BASE)?
            .set_default("data_url", DATA_API_BASE)?
            .add_source(alpaca)
            .build()?
            .try_deserialize()?;

        let trader: TraderVars = Config::builder()
            .set_default("symbol", DEFAULT_SYMBOL)?
            .set_default("timeframe", TimeFrame::default().as_str())?
            .set_default("lookback", DEFAULT_LOOKBACK.to_string())?
            .set_default("quantity", DEFAULT_QUANTITY.to_string())?
            .add_source(trader)
            .build()?
            .try_deserialize()?;

        let settings = Settings {
            api_key: alpaca.api_key,
            secret_key: alpaca.secret_key,
            base_url: alpaca.base_url,
            data_url: alpaca.data_url,
            symbol: trader.symbol,
            timeframe: trader.timeframe,
            lookback: trader.lookback,
            quantity: trader.quantity,
        };
        settings.validate()?;

        Ok(settings)
    }

    /// Reject values the indicators or the broker cannot work with
    fn validate(&self) -> Result<(), ConfigError> {
        let required = IndicatorConfig::default().min_bars_required();
        if (self.lookback as usize) < required {
            return Err(ConfigError::Message(format!(
                "lookback must be at least {} bars, got {}",
                required, self.lookback
            )));
        }

        if self.quantity <= Decimal::ZERO {
            return Err(ConfigError::Message(format!(
                "quantity must be positive, got {}",
                self.quantity
            )));
        }

        Ok(())
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("secret_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("data_url", &self.data_url)
            .field("symbol", &self.symbol)
            .field("timeframe", &self.timeframe)
            .field("lookback", &self.lookback)
            .field("quantity", &self.quantity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load_from(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Settings::from_sources(
            Environment::with_prefix("ALPACA").source(Some(source.clone())),
            Environment::with_prefix("TRADER").source(Some(source)),
        )
    }

    #[test]
    fn test_defaults() {
        let settings = load_from(&[
            ("ALPACA_API_KEY", "key-id"),
            ("ALPACA_SECRET_KEY", "secret"),
        ])
        .unwrap();

        assert_eq!(settings.api_key, "key-id");
        assert_eq!(settings.secret_key, "secret");
        assert_eq!(settings.base_url, "https://paper-api.alpaca.markets");
        assert_eq!(settings.data_url, "https://data.alpaca.markets");
        assert_eq!(settings.symbol, "XRP/USD");
        assert_eq!(settings.timeframe, TimeFrame::Hour);
        assert_eq!(settings.lookback, 50);
        assert_eq!(settings.quantity, Decimal::from(10));
    }

    #[test]
    fn test_overrides() {
        let settings = load_from(&[
            ("ALPACA_API_KEY", "key-id"),
            ("ALPACA_SECRET_KEY", "secret"),
            ("TRADER_SYMBOL", "BTC/USD"),
            ("TRADER_QUANTITY", "0.25"),
            ("TRADER_LOOKBACK", "100"),
            ("TRADER_TIMEFRAME", "1Day"),
        ])
        .unwrap();

        assert_eq!(settings.symbol, "BTC/USD");
        assert_eq!(settings.quantity, Decimal::new(25, 2));
        assert_eq!(settings.lookback, 100);
        assert_eq!(settings.timeframe, TimeFrame::Day);
    }

    #[test]
    fn test_missing_credentials() {
        let result = load_from(&[("ALPACA_API_KEY", "key-id")]);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("secret_key"));
    }

    #[test]
    fn test_prefixes_do_not_cross() {
        // Credentials only come from ALPACA_*
        let result = load_from(&[
            ("TRADER_API_KEY", "key-id"),
            ("ALPACA_SECRET_KEY", "secret"),
        ]);
        assert!(result.unwrap_err().to_string().contains("api_key"));

        // Trading parameters only come from TRADER_*
        let settings = load_from(&[
            ("ALPACA_API_KEY", "key-id"),
            ("ALPACA_SECRET_KEY", "secret"),
            ("ALPACA_SYMBOL", "BTC/USD"),
            ("TRADER_BASE_URL", "http://localhost:1"),
        ])
        .unwrap();
        assert_eq!(settings.symbol, "XRP/USD");
        assert_eq!(settings.base_url, "https://paper-api.alpaca.markets");
    }

    #[test]
    fn test_lookback_below_indicator_window_rejected() {
        let result = load_from(&[
            ("ALPACA_API_KEY", "key-id"),
            ("ALPACA_SECRET_KEY", "secret"),
            ("TRADER_LOOKBACK", "10"),
        ]);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("lookback must be at least 26"), "{}", err);

        let settings = load_from(&[
            ("ALPACA_API_KEY", "key-id"),
            ("ALPACA_SECRET_KEY", "secret"),
            ("TRADER_LOOKBACK", "26"),
        ])
        .unwrap();
        assert_eq!(settings.lookback, 26);
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        let result = load_from(&[
            ("ALPACA_API_KEY", "key-id"),
            ("ALPACA_SECRET_KEY", "secret"),
            ("TRADER_QUANTITY", "0"),
        ]);
        assert!(result.unwrap_err().to_string().contains("quantity must be positive"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let settings = load_from(&[
            ("ALPACA_API_KEY", "key-id"),
            ("ALPACA_SECRET_KEY", "very-secret"),
        ])
        .unwrap();

        let debug = format!("{:?}", settings);
        assert!(!debug.contains("very-secret"));
        assert!(!debug.contains("key-id"));
        assert!(debug.contains("XRP/USD"));
    }
}
