use crate::core::session::{ProjectSession, SessionView};
use crate::domain::model::{ProjectId, ProjectRecord, ServiceEntry, ServiceId};
use crate::domain::ports::ProjectStore;
use crate::utils::error::{CostsError, Result};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// 可在多個事件處理器間共用的工作階段。
///
/// 同一時間只允許一個操作；前一個請求尚未完成時，新的操作直接回傳
/// `OperationInFlight`，不排隊。
pub struct SessionHandle<S: ProjectStore> {
    inner: Arc<Mutex<ProjectSession<S>>>,
}

impl<S: ProjectStore> Clone for SessionHandle<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: ProjectStore> SessionHandle<S> {
    pub fn new(store: S) -> Self {
        Self::from_session(ProjectSession::new(store))
    }

    pub fn from_session(session: ProjectSession<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    fn acquire(&self) -> Result<MutexGuard<'_, ProjectSession<S>>> {
        self.inner.try_lock().map_err(|_| {
            tracing::warn!("Rejected operation: another request is still in flight");
            CostsError::OperationInFlight
        })
    }

    pub fn is_busy(&self) -> bool {
        self.inner.try_lock().is_err()
    }

    /// 等待進行中的操作結束後取得快照
    pub async fn view(&self) -> SessionView {
        self.inner.lock().await.view()
    }

    pub async fn load(&self, id: &ProjectId) -> Result<ProjectRecord> {
        let mut session = self.acquire()?;
        session.load(id).await.cloned()
    }

    pub async fn edit_project(&self, updated: ProjectRecord) -> Result<ProjectRecord> {
        let mut session = self.acquire()?;
        session.edit_project(updated).await.cloned()
    }

    pub async fn add_service(&self, entry: ServiceEntry) -> Result<ServiceId> {
        let mut session = self.acquire()?;
        session.add_service(entry).await
    }

    pub async fn remove_service(&self, service_id: &ServiceId) -> Result<ServiceEntry> {
        let mut session = self.acquire()?;
        session.remove_service(service_id).await
    }

    pub fn toggle_project_form(&self) -> Result<bool> {
        Ok(self.acquire()?.toggle_project_form())
    }

    pub fn toggle_service_form(&self) -> Result<bool> {
        Ok(self.acquire()?.toggle_service_form())
    }
}
