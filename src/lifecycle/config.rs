//! Storefront configuration.

use crate::model::Money;
use crate::storage::StorageLocation;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DELIVERY_FEE_VAR: &str = "STOREFRONT_DELIVERY_FEE";
pub const DELIVERY_DELAY_VAR: &str = "STOREFRONT_DELIVERY_DELAY_SECS";
pub const STORAGE_PATH_VAR: &str = "STOREFRONT_STORAGE_PATH";
pub const CHANNEL_BUFFER_VAR: &str = "STOREFRONT_CHANNEL_BUFFER";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not valid: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Settings for a [`StorefrontSystem`](super::StorefrontSystem).
#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontConfig {
    /// Added to every order total.
    pub delivery_fee: Money,
    /// How long an order stays `in_transit` before it completes on its own.
    pub delivery_delay: Duration,
    /// Where the saved profile and mirrored orders are kept.
    pub storage: StorageLocation,
    /// Channel capacity of every actor.
    pub channel_buffer: usize,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            delivery_fee: Decimal::new(399, 2),
            delivery_delay: Duration::from_secs(180),
            storage: StorageLocation::Memory,
            channel_buffer: 32,
        }
    }
}

impl StorefrontConfig {
    pub fn with_delivery_fee(mut self, fee: Money) -> Self {
        self.delivery_fee = fee;
        self
    }

    pub fn with_delivery_delay(mut self, delay: Duration) -> Self {
        self.delivery_delay = delay;
        self
    }

    pub fn with_storage(mut self, storage: StorageLocation) -> Self {
        self.storage = storage;
        self
    }

    /// Defaults overridden by `STOREFRONT_*` environment variables.
    ///
    /// - `STOREFRONT_DELIVERY_FEE`: decimal amount, e.g. `4.50`
    /// - `STOREFRONT_DELIVERY_DELAY_SECS`: whole seconds
    /// - `STOREFRONT_STORAGE_PATH`: JSON file for local storage (memory when unset)
    /// - `STOREFRONT_CHANNEL_BUFFER`: at least 1
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) with the variables read through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(fee) = parsed::<Decimal>(&lookup, DELIVERY_FEE_VAR)? {
            if fee.is_sign_negative() {
                return Err(invalid(DELIVERY_FEE_VAR, fee.to_string()));
            }
            config.delivery_fee = fee;
        }
        if let Some(secs) = parsed::<u64>(&lookup, DELIVERY_DELAY_VAR)? {
            config.delivery_delay = Duration::from_secs(secs);
        }
        if let Some(path) = lookup(STORAGE_PATH_VAR).filter(|p| !p.trim().is_empty()) {
            config.storage = StorageLocation::File(PathBuf::from(path));
        }
        if let Some(buffer) = parsed::<usize>(&lookup, CHANNEL_BUFFER_VAR)? {
            if buffer == 0 {
                return Err(invalid(CHANNEL_BUFFER_VAR, "0".to_string()));
            }
            config.channel_buffer = buffer;
        }

        Ok(config)
    }
}

fn parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| invalid(var, raw)),
    }
}

fn invalid(var: &'static str, value: String) -> ConfigError {
    ConfigError::Invalid { var, value }
}
