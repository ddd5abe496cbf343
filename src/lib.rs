pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};

pub use adapters::{HttpProjectStore, InMemoryProjectStore};
pub use config::StoreSettings;
pub use crate::core::{
    feedback::Feedback,
    handle::SessionHandle,
    project::create_project,
    session::{ProjectSession, SessionState, SessionView},
};
pub use domain::{Category, ProjectDraft, ProjectId, ProjectRecord, ProjectStore, ServiceEntry, ServiceId};
pub use utils::error::{CostsError, Result};
