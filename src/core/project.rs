use crate::core::feedback::{Feedback, PROJECT_CREATED};
use crate::domain::model::{ProjectDraft, ProjectRecord};
use crate::domain::ports::ProjectStore;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_non_negative_amount, Validate,
};

impl Validate for ProjectDraft {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("name", &self.name)?;
        validate_non_negative_amount("budget", self.budget)?;
        validate_non_empty_string("category", &self.category.name)?;
        Ok(())
    }
}

/// 建立新專案：cost 從 0 開始、沒有任何服務
pub async fn create_project<S: ProjectStore>(
    store: &S,
    draft: &ProjectDraft,
) -> Result<(ProjectRecord, Feedback)> {
    draft.validate()?;

    tracing::debug!("Creating project '{}' with budget {}", draft.name, draft.budget);
    let record = store.create_project(draft).await?;
    tracing::info!("✅ Created project {} ('{}')", record.id, record.name);

    Ok((record, Feedback::success(PROJECT_CREATED)))
}
