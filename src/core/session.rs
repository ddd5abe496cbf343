use crate::core::feedback::{self, Feedback};
use crate::domain::model::{ProjectId, ProjectRecord, ServiceEntry, ServiceId};
use crate::domain::ports::ProjectStore;
use crate::utils::error::{CostsError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_non_negative_amount};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Loading,
    Ready,
}

/// 提供給畫面層的快照
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub state: SessionState,
    pub project: Option<ProjectRecord>,
    pub services: Vec<ServiceEntry>,
    pub feedback: Option<Feedback>,
    pub show_project_form: bool,
    pub show_service_form: bool,
}

/// 單一專案的檢視工作階段。
///
/// 所有寫入都先在副本上計算並驗證，送到儲存端成功後才以回應取代本地狀態；
/// 因此驗證失敗、同步失敗或中途取消的 future 都不會改動本地紀錄。
pub struct ProjectSession<S: ProjectStore> {
    store: S,
    state: SessionState,
    record: Option<ProjectRecord>,
    services: Vec<ServiceEntry>,
    feedback: Option<Feedback>,
    show_project_form: bool,
    show_service_form: bool,
}

impl<S: ProjectStore> ProjectSession<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: SessionState::Loading,
            record: None,
            services: Vec::new(),
            feedback: None,
            show_project_form: false,
            show_service_form: false,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn record(&self) -> Option<&ProjectRecord> {
        self.record.as_ref()
    }

    pub fn services(&self) -> &[ServiceEntry] {
        &self.services
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn show_project_form(&self) -> bool {
        self.show_project_form
    }

    pub fn show_service_form(&self) -> bool {
        self.show_service_form
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            state: self.state,
            project: self.record.clone(),
            services: self.services.clone(),
            feedback: self.feedback.clone(),
            show_project_form: self.show_project_form,
            show_service_form: self.show_service_form,
        }
    }

    pub fn toggle_project_form(&mut self) -> bool {
        self.show_project_form = !self.show_project_form;
        self.show_project_form
    }

    pub fn toggle_service_form(&mut self) -> bool {
        self.show_service_form = !self.show_service_form;
        self.show_service_form
    }

    pub fn clear_feedback(&mut self) {
        self.feedback = None;
    }

    /// 從儲存端載入專案並整個取代本地狀態，不做預算驗證。
    ///
    /// 取得回應前不動本地狀態；載入失敗時保留先前的專案。
    pub async fn load(&mut self, id: &ProjectId) -> Result<&ProjectRecord> {
        tracing::debug!("Loading project {}", id);

        match self.store.fetch_project(id).await {
            Ok(mut record) => {
                match record.services_total() {
                    Some(total) if total != record.cost => {
                        tracing::warn!(
                            "Project {} has cost {} but services sum to {}; using {}",
                            record.id,
                            record.cost,
                            total,
                            total
                        );
                        record.cost = total;
                    }
                    Some(_) => {}
                    None => tracing::warn!("Services of project {} overflow their total", record.id),
                }
                tracing::info!(
                    "📂 Loaded project '{}' ({} services, cost {} of {})",
                    record.name,
                    record.services.len(),
                    record.cost,
                    record.budget
                );
                self.services = record.services.clone();
                self.state = SessionState::Ready;
                Ok(&*self.record.insert(record))
            }
            Err(e) => {
                tracing::warn!("❌ Failed to load project {}: {}", id, e);
                self.feedback = Some(Feedback::error(e.user_friendly_message()));
                Err(e)
            }
        }
    }

    /// 修改專案名稱與預算；services 與 cost 維持本工作階段的版本
    pub async fn edit_project(&mut self, updated: ProjectRecord) -> Result<&ProjectRecord> {
        self.feedback = None;
        let outcome = self.try_edit(updated).await;
        self.finish(outcome, feedback::PROJECT_UPDATED, feedback::PROJECT_UPDATE_FAILED)?;
        self.show_project_form = false;
        self.current()
    }

    async fn try_edit(&mut self, updated: ProjectRecord) -> Result<()> {
        let current = self.current()?;

        if updated.id != current.id {
            return Err(CostsError::validation(
                "id",
                format!("cannot edit project {} from session of {}", updated.id, current.id),
            ));
        }
        if updated.category != current.category {
            return Err(CostsError::validation(
                "category",
                "the project category cannot be changed",
            ));
        }
        validate_non_empty_string("name", &updated.name)?;
        validate_non_negative_amount("budget", updated.budget)?;

        let cost = total_of(current)?;
        if updated.budget < cost {
            tracing::warn!(
                "Rejected edit of {}: budget {} below cost {}",
                current.id,
                updated.budget,
                cost
            );
            return Err(CostsError::BudgetViolation {
                budget: updated.budget,
                cost,
            });
        }

        let candidate = ProjectRecord {
            name: updated.name,
            budget: updated.budget,
            cost,
            ..current.clone()
        };
        let stored = self.sync(&candidate).await?;
        self.commit(stored);
        Ok(())
    }

    /// 新增服務，回傳分配到的服務 id
    pub async fn add_service(&mut self, entry: ServiceEntry) -> Result<ServiceId> {
        self.feedback = None;
        let outcome = self.try_add(entry).await;
        let id = self.finish(outcome, feedback::SERVICE_ADDED, feedback::SERVICE_ADD_FAILED)?;
        self.show_service_form = false;
        Ok(id)
    }

    async fn try_add(&mut self, mut entry: ServiceEntry) -> Result<ServiceId> {
        let current = self.current()?;

        validate_non_empty_string("name", &entry.name)?;
        validate_non_negative_amount("cost", entry.cost)?;

        let id = match entry.id.take() {
            Some(id) if current.find_service(&id).is_none() => id,
            _ => ServiceId::generate(),
        };
        entry.id = Some(id.clone());

        let candidate_cost = total_of(current)?
            .checked_add(entry.cost)
            .ok_or(CostsError::BudgetExceeded {
                budget: current.budget,
                candidate: Decimal::MAX,
            })?;
        if candidate_cost > current.budget {
            tracing::warn!(
                "Rejected service '{}' on {}: {} would exceed budget {}",
                entry.name,
                current.id,
                candidate_cost,
                current.budget
            );
            return Err(CostsError::BudgetExceeded {
                budget: current.budget,
                candidate: candidate_cost,
            });
        }

        let mut candidate = current.clone();
        candidate.services.push(entry);
        candidate.cost = candidate_cost;

        let stored = self.sync(&candidate).await?;
        self.commit(stored);
        Ok(id)
    }

    /// 依 id 移除服務；cost 由剩餘服務重新加總，不接受外部傳入的金額
    pub async fn remove_service(&mut self, service_id: &ServiceId) -> Result<ServiceEntry> {
        self.feedback = None;
        let outcome = self.try_remove(service_id).await;
        self.finish(
            outcome,
            feedback::SERVICE_REMOVED,
            feedback::SERVICE_REMOVE_FAILED,
        )
    }

    async fn try_remove(&mut self, service_id: &ServiceId) -> Result<ServiceEntry> {
        let current = self.current()?;

        let position = current
            .services
            .iter()
            .position(|service| service.id.as_ref() == Some(service_id))
            .ok_or_else(|| {
                CostsError::validation("service", format!("no service with id {}", service_id))
            })?;

        let mut candidate = current.clone();
        let removed = candidate.services.remove(position);
        candidate.cost = total_of(&candidate)?;

        let stored = self.sync(&candidate).await?;
        self.commit(stored);
        Ok(removed)
    }

    fn current(&self) -> Result<&ProjectRecord> {
        match (&self.state, &self.record) {
            (SessionState::Ready, Some(record)) => Ok(record),
            _ => Err(CostsError::NotLoaded),
        }
    }

    /// 送出候選紀錄，並以儲存端回應為準；cost 一律由回應中的服務重新計算
    async fn sync(&self, candidate: &ProjectRecord) -> Result<ProjectRecord> {
        let mut stored = self.store.update_project(&candidate.id, candidate).await?;

        let total = stored.services_total().ok_or_else(|| CostsError::SyncFailure {
            message: format!("services returned for {} overflow their total", stored.id),
        })?;
        if stored.cost != total {
            tracing::warn!(
                "Store returned cost {} for {} but services sum to {}; using {}",
                stored.cost,
                stored.id,
                total,
                total
            );
            stored.cost = total;
        }
        if stored.cost > stored.budget {
            tracing::warn!(
                "Store accepted project {} with cost {} above budget {}",
                stored.id,
                stored.cost,
                stored.budget
            );
        }
        Ok(stored)
    }

    fn commit(&mut self, record: ProjectRecord) {
        self.services = record.services.clone();
        self.record = Some(record);
    }

    fn finish<T>(&mut self, outcome: Result<T>, success: &str, failure: &str) -> Result<T> {
        match outcome {
            Ok(value) => {
                tracing::info!("✅ {}", success);
                self.feedback = Some(Feedback::success(success));
                Ok(value)
            }
            Err(e) => {
                let message = match &e {
                    CostsError::SyncFailure { .. } => failure.to_string(),
                    other => other.user_friendly_message(),
                };
                if !e.is_local() {
                    tracing::error!("❌ {}: {}", failure, e);
                }
                self.feedback = Some(Feedback::error(message));
                Err(e)
            }
        }
    }
}

/// 以服務清單加總出的 cost，溢位視為無效資料
fn total_of(record: &ProjectRecord) -> Result<Decimal> {
    record.services_total().ok_or_else(|| {
        CostsError::validation("cost", format!("services of project {} overflow their total", record.id))
    })
}
