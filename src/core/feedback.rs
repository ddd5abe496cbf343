use crate::utils::error::FeedbackKind;
use serde::{Deserialize, Serialize};

/// 畫面上顯示的提示訊息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: FeedbackKind,
}

impl Feedback {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: FeedbackKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: FeedbackKind::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == FeedbackKind::Error
    }
}

pub const PROJECT_CREATED: &str = "Project created successfully!";
pub const PROJECT_UPDATED: &str = "Project updated successfully!";
pub const PROJECT_UPDATE_FAILED: &str = "An error occurred while updating the project.";
pub const SERVICE_ADDED: &str = "Service added successfully!";
pub const SERVICE_ADD_FAILED: &str = "Error adding service.";
pub const SERVICE_REMOVED: &str = "Service removed successfully!";
pub const SERVICE_REMOVE_FAILED: &str = "Error removing service.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_serializes_type_field() {
        let value = serde_json::to_value(Feedback::error("boom")).unwrap();
        assert_eq!(value, serde_json::json!({"message": "boom", "type": "error"}));
        assert!(!Feedback::success(SERVICE_ADDED).is_error());
    }
}
