use crate::domain::model::{Category, ProjectDraft, ProjectId, ProjectRecord, ServiceEntry};
use crate::domain::ports::ProjectStore;
use crate::utils::error::{CostsError, Result};
use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;

/// 新建專案時送出的內容：cost 歸零、services 清空
#[derive(Serialize)]
struct NewProjectBody<'a> {
    name: &'a str,
    budget: Decimal,
    category: &'a Category,
    cost: Decimal,
    services: &'a [ServiceEntry],
}

/// 透過 REST/JSON 與專案 API 溝通 (GET/POST/PATCH/DELETE /projects)
#[derive(Debug, Clone)]
pub struct HttpProjectStore {
    client: Client,
    base_url: String,
}

impl HttpProjectStore {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Self::with_headers(base_url, timeout, &HashMap::new())
    }

    pub fn with_headers(
        base_url: &str,
        timeout: Duration,
        headers: &HashMap<String, String>,
    ) -> Result<Self> {
        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        for (name, value) in headers {
            let name = header::HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                CostsError::InvalidConfigValueError {
                    field: "store.headers".to_string(),
                    value: name.clone(),
                    reason: e.to_string(),
                }
            })?;
            let value = header::HeaderValue::from_str(value).map_err(|e| {
                CostsError::InvalidConfigValueError {
                    field: "store.headers".to_string(),
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
            default_headers.insert(name, value);
        }

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(default_headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn project_url(&self, id: &ProjectId) -> String {
        self.url(&format!("/projects/{}", id))
    }

    fn check_status(response: Response, id: Option<&ProjectId>) -> Result<Response> {
        let status = response.status();
        tracing::debug!("Store response status: {}", status);

        if status == StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(CostsError::NotFound { id: id.to_string() });
            }
        }
        if !status.is_success() {
            return Err(CostsError::SyncFailure {
                message: format!("store answered with status {}", status),
            });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response, id: Option<&ProjectId>) -> Result<T> {
        let response = Self::check_status(response, id)?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ProjectStore for HttpProjectStore {
    async fn fetch_project(&self, id: &ProjectId) -> Result<ProjectRecord> {
        let url = self.project_url(id);
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        Self::decode(response, Some(id)).await
    }

    async fn create_project(&self, draft: &ProjectDraft) -> Result<ProjectRecord> {
        let url = self.url("/projects");
        tracing::debug!("POST {}", url);
        let body = NewProjectBody {
            name: &draft.name,
            budget: draft.budget,
            category: &draft.category,
            cost: Decimal::ZERO,
            services: &[],
        };
        let response = self.client.post(&url).json(&body).send().await?;
        Self::decode(response, None).await
    }

    async fn update_project(
        &self,
        id: &ProjectId,
        record: &ProjectRecord,
    ) -> Result<ProjectRecord> {
        let url = self.project_url(id);
        tracing::debug!("PATCH {} ({} services)", url, record.services.len());
        let response = self.client.patch(&url).json(record).send().await?;
        Self::decode(response, Some(id)).await
    }

    async fn list_projects(&self) -> Result<Vec<ProjectRecord>> {
        let url = self.url("/projects");
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        Self::decode(response, None).await
    }

    async fn delete_project(&self, id: &ProjectId) -> Result<()> {
        let url = self.project_url(id);
        tracing::debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await?;
        Self::check_status(response, Some(id))?;
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let url = self.url("/categories");
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        Self::decode(response, None).await
    }
}
