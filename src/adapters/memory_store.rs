use crate::domain::model::{Category, ProjectDraft, ProjectId, ProjectRecord};
use crate::domain::ports::ProjectStore;
use crate::utils::error::{CostsError, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct StoreState {
    projects: Vec<ProjectRecord>,
    categories: Vec<Category>,
    next_id: u64,
    fail_writes: Option<String>,
    write_calls: usize,
}

/// 記憶體內的儲存實作，用於測試與離線示範
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(categories: Vec<Category>) -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState {
                categories,
                ..StoreState::default()
            })),
        }
    }

    /// 直接放入既有紀錄，不經過驗證
    pub async fn insert(&self, record: ProjectRecord) {
        let mut state = self.state.lock().await;
        state.projects.retain(|existing| existing.id != record.id);
        state.projects.push(record);
    }

    /// 之後的寫入都回傳 SyncFailure，直到傳入 None
    pub async fn fail_writes(&self, message: Option<&str>) {
        let mut state = self.state.lock().await;
        state.fail_writes = message.map(str::to_string);
    }

    /// 已收到的寫入請求數 (create / update / delete)
    pub async fn write_calls(&self) -> usize {
        self.state.lock().await.write_calls
    }

    pub async fn get(&self, id: &ProjectId) -> Option<ProjectRecord> {
        let state = self.state.lock().await;
        state.projects.iter().find(|p| &p.id == id).cloned()
    }
}

impl StoreState {
    fn begin_write(&mut self) -> Result<()> {
        self.write_calls += 1;
        match &self.fail_writes {
            Some(message) => Err(CostsError::SyncFailure {
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProjectStore for InMemoryProjectStore {
    async fn fetch_project(&self, id: &ProjectId) -> Result<ProjectRecord> {
        self.get(id).await.ok_or_else(|| CostsError::NotFound {
            id: id.to_string(),
        })
    }

    async fn create_project(&self, draft: &ProjectDraft) -> Result<ProjectRecord> {
        let mut state = self.state.lock().await;
        state.begin_write()?;

        state.next_id += 1;
        let record = ProjectRecord {
            id: ProjectId::new(state.next_id.to_string()),
            name: draft.name.clone(),
            category: draft.category.clone(),
            budget: draft.budget,
            cost: Decimal::ZERO,
            services: Vec::new(),
        };
        state.projects.push(record.clone());
        Ok(record)
    }

    async fn update_project(
        &self,
        id: &ProjectId,
        record: &ProjectRecord,
    ) -> Result<ProjectRecord> {
        let mut state = self.state.lock().await;
        state.begin_write()?;

        let existing = state
            .projects
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| CostsError::NotFound { id: id.to_string() })?;

        *existing = ProjectRecord {
            id: id.clone(),
            ..record.clone()
        };
        Ok(existing.clone())
    }

    async fn list_projects(&self) -> Result<Vec<ProjectRecord>> {
        Ok(self.state.lock().await.projects.clone())
    }

    async fn delete_project(&self, id: &ProjectId) -> Result<()> {
        let mut state = self.state.lock().await;
        state.begin_write()?;

        let before = state.projects.len();
        state.projects.retain(|p| &p.id != id);
        if state.projects.len() == before {
            return Err(CostsError::NotFound { id: id.to_string() });
        }
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        Ok(self.state.lock().await.categories.clone())
    }
}
