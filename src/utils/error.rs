use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CostsError {
    #[error("Budget {budget} cannot be lower than the project cost {cost}")]
    BudgetViolation { budget: Decimal, cost: Decimal },

    #[error("Budget exceeded: services would cost {candidate} against a budget of {budget}")]
    BudgetExceeded { budget: Decimal, candidate: Decimal },

    #[error("Sync with project store failed: {message}")]
    SyncFailure { message: String },

    #[error("Project not found: {id}")]
    NotFound { id: String },

    #[error("No project loaded in this session")]
    NotLoaded,

    #[error("Another operation is still in flight for this session")]
    OperationInFlight,

    #[error("Validation error on '{field}': {reason}")]
    Validation { field: String, reason: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<reqwest::Error> for CostsError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {}", err)
        } else if err.is_decode() {
            format!("could not decode store response: {}", err)
        } else {
            err.to_string()
        };
        CostsError::SyncFailure { message }
    }
}

/// 錯誤分類：本地驗證、遠端同步、配置、系統
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Local,
    Remote,
    Config,
    System,
}

/// 呈現給使用者的訊息類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Success,
    Error,
}

impl CostsError {
    pub fn validation(field: &str, reason: impl Into<String>) -> Self {
        CostsError::Validation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CostsError::BudgetViolation { .. }
            | CostsError::BudgetExceeded { .. }
            | CostsError::NotLoaded
            | CostsError::OperationInFlight
            | CostsError::Validation { .. } => ErrorCategory::Local,
            CostsError::SyncFailure { .. } | CostsError::NotFound { .. } => ErrorCategory::Remote,
            CostsError::InvalidConfigValueError { .. } | CostsError::ConfigValidationError { .. } => {
                ErrorCategory::Config
            }
            CostsError::IoError(_) | CostsError::SerializationError(_) => ErrorCategory::System,
        }
    }

    /// 本地驗證錯誤在呼叫遠端之前就會被偵測到
    pub fn is_local(&self) -> bool {
        self.category() == ErrorCategory::Local
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CostsError::BudgetViolation { .. } => {
                "The budget cannot be lower than the project cost!".to_string()
            }
            CostsError::BudgetExceeded { .. } => {
                "Budget exceeded, check the service cost".to_string()
            }
            CostsError::SyncFailure { .. } => {
                "An error occurred while saving the project.".to_string()
            }
            CostsError::NotFound { id } => format!("Project {} does not exist.", id),
            CostsError::NotLoaded => "The project is still loading.".to_string(),
            CostsError::OperationInFlight => {
                "Please wait for the previous change to finish.".to_string()
            }
            CostsError::Validation { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Local => "Adjust the values and try again",
            ErrorCategory::Remote => "Check that the project API is reachable and retry",
            ErrorCategory::Config => "Fix the configuration file or command-line flags",
            ErrorCategory::System => "Check file permissions and data format",
        }
    }
}

pub type Result<T> = std::result::Result<T, CostsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_errors_are_local() {
        let err = CostsError::BudgetExceeded {
            budget: Decimal::from(100),
            candidate: Decimal::from(110),
        };
        assert!(err.is_local());
        assert!(err.user_friendly_message().contains("Budget exceeded"));
    }

    #[test]
    fn test_remote_errors_category() {
        let err = CostsError::NotFound { id: "7".to_string() };
        assert_eq!(err.category(), ErrorCategory::Remote);
        assert!(!err.is_local());
        assert_eq!(err.user_friendly_message(), "Project 7 does not exist.");
    }
}
