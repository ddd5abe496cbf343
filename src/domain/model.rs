use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// 後端可能用字串或整數當作 id，統一轉成字串
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Integer(i64),
}

fn id_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Integer(n) => n.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(#[serde(deserialize_with = "id_as_string")] String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(#[serde(deserialize_with = "id_as_string")] String);

impl ServiceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// 新服務在客戶端產生隨機 id
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ServiceId>,
    pub name: String,
    pub cost: Decimal,
    #[serde(default)]
    pub description: String,
}

impl ServiceEntry {
    pub fn new(name: impl Into<String>, cost: Decimal, description: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            cost,
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: ProjectId,
    pub name: String,
    pub category: Category,
    pub budget: Decimal,
    #[serde(default)]
    pub cost: Decimal,
    #[serde(default)]
    pub services: Vec<ServiceEntry>,
}

impl ProjectRecord {
    /// 服務金額加總；溢位時回傳 None
    pub fn services_total(&self) -> Option<Decimal> {
        self.services
            .iter()
            .try_fold(Decimal::ZERO, |total, service| total.checked_add(service.cost))
    }

    pub fn remaining_budget(&self) -> Option<Decimal> {
        self.budget.checked_sub(self.cost)
    }

    pub fn find_service(&self, id: &ServiceId) -> Option<&ServiceEntry> {
        self.services
            .iter()
            .find(|service| service.id.as_ref() == Some(id))
    }

    /// cost 以服務清單加總為準
    pub fn is_consistent(&self) -> bool {
        self.services_total() == Some(self.cost) && self.cost <= self.budget
    }
}

/// 建立專案時由使用者填寫的欄位，id、cost、services 由系統決定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub name: String,
    pub budget: Decimal,
    pub category: Category,
}
