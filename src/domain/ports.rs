use crate::domain::model::{Category, ProjectDraft, ProjectId, ProjectRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 專案的遠端儲存，是資料的唯一真實來源
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn fetch_project(&self, id: &ProjectId) -> Result<ProjectRecord>;

    /// 新專案的 cost 為 0、services 為空，id 由儲存端指定
    async fn create_project(&self, draft: &ProjectDraft) -> Result<ProjectRecord>;

    /// 以完整紀錄做部分更新 (PATCH)，回傳儲存端的版本
    async fn update_project(&self, id: &ProjectId, record: &ProjectRecord)
        -> Result<ProjectRecord>;

    async fn list_projects(&self) -> Result<Vec<ProjectRecord>>;

    async fn delete_project(&self, id: &ProjectId) -> Result<()>;

    async fn list_categories(&self) -> Result<Vec<Category>>;
}
