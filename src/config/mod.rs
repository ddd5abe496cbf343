#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::http_store::HttpProjectStore;
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, validate_url, Validate};
use std::collections::HashMap;
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// 合併命令列與設定檔後的最終設定，設定檔中有的值優先
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSettings {
    pub endpoint: String,
    pub timeout_seconds: u64,
    pub headers: HashMap<String, String>,
    pub log_level: Option<String>,
    pub json_logs: bool,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            headers: HashMap::new(),
            log_level: None,
            json_logs: false,
        }
    }
}

impl StoreSettings {
    pub fn merge(mut self, file: &TomlConfig) -> Result<Self> {
        file.validate()?;

        if let Some(endpoint) = file.endpoint() {
            self.endpoint = endpoint.to_string();
        }
        if let Some(timeout) = file.timeout_seconds() {
            self.timeout_seconds = timeout;
        }
        self.headers.extend(file.headers());
        if let Some(level) = file.log_level() {
            self.log_level = Some(level.to_string());
        }
        self.json_logs |= file.json_logs();
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn build_store(&self) -> Result<HttpProjectStore> {
        self.validate()?;
        HttpProjectStore::with_headers(&self.endpoint, self.timeout(), &self.headers)
    }
}

impl Validate for StoreSettings {
    fn validate(&self) -> Result<()> {
        validate_url("store.endpoint", &self.endpoint)?;
        validate_positive_number("store.timeout_seconds", self.timeout_seconds, 1)?;
        Ok(())
    }
}
