use crate::utils::error::{CostsError, Result};
use crate::utils::validation::{validate_positive_number, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub store: StoreSection,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSection {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CostsError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CostsError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_TOKEN})，找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CostsError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.store.endpoint.as_deref()
    }

    pub fn timeout_seconds(&self) -> Option<u64> {
        self.store.timeout_seconds
    }

    pub fn headers(&self) -> HashMap<String, String> {
        self.store.headers.clone().unwrap_or_default()
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(endpoint) = self.endpoint() {
            validate_url("store.endpoint", endpoint)?;
        }
        if let Some(timeout) = self.timeout_seconds() {
            validate_positive_number("store.timeout_seconds", timeout, 1)?;
        }
        if let Some(level) = self.log_level() {
            let valid_levels = ["trace", "debug", "info", "warn", "error"];
            if !valid_levels.contains(&level) {
                return Err(CostsError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.to_string(),
                    reason: format!("Valid levels: {}", valid_levels.join(", ")),
                });
            }
        }
        Ok(())
    }
}
