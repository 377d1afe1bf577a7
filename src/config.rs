// Booking configuration
// Every field has a default so a partial JSON document can override a subset

use crate::hotel::{PricingError, MAX_TAX_RATE_PERCENT};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://easykey.roomsvital.com/bookings/create-booking";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Tax rate must be between 0 and 100 percent, got {0}")]
    InvalidTaxRate(u32),

    #[error("Number of rooms must be at least 1")]
    NoRooms,

    #[error("Booking id prefix must not be empty")]
    EmptyIdPrefix,

    #[error("Config parse error: {0}")]
    ParseError(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    pub endpoint: String,
    // Sent as a bearer token when present
    pub api_key: Option<String>,
    // None keeps a hung request pending
    pub timeout_ms: Option<u64>,
    pub tax_rate_percent: u32,
    pub require_email: bool,
    pub number_of_rooms: u32,
    pub mock_delay_ms: u64,
    pub booking_id_prefix: String,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            timeout_ms: None,
            tax_rate_percent: 12,
            require_email: false,
            number_of_rooms: 1,
            mock_delay_ms: 1500,
            booking_id_prefix: "OYO".to_string(),
        }
    }
}

impl BookingConfig {
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: BookingConfig =
            serde_json::from_str(json_str).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidEndpoint(self.endpoint.clone()));
        }
        if self.tax_rate_percent > MAX_TAX_RATE_PERCENT {
            return Err(ConfigError::InvalidTaxRate(self.tax_rate_percent));
        }
        if self.number_of_rooms == 0 {
            return Err(ConfigError::NoRooms);
        }
        if self.booking_id_prefix.is_empty() {
            return Err(ConfigError::EmptyIdPrefix);
        }
        Ok(())
    }
}
