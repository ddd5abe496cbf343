// Domain layer: value types and the store port. No transport concerns here.

pub mod model;
pub mod ports;

pub use model::{Category, ProjectDraft, ProjectId, ProjectRecord, ServiceEntry, ServiceId};
pub use ports::ProjectStore;
