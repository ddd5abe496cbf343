use crate::config::toml_config::TomlConfig;
use crate::config::{StoreSettings, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECONDS};
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "costs")]
#[command(about = "Manage project budgets and their services against a project API")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub api_endpoint: String,

    #[arg(long, help = "TOML file with [store] and [logging] sections")]
    pub config: Option<PathBuf>,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List all projects
    List,
    /// List available categories
    Categories,
    /// Create a new project with no services
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        budget: Decimal,
        #[arg(long)]
        category_id: String,
        #[arg(long)]
        category_name: String,
    },
    /// Show a project and its services
    Show { id: String },
    /// Change the name or budget of a project
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        budget: Option<Decimal>,
    },
    /// Add a service to a project
    AddService {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        cost: Decimal,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Remove a service from a project
    RemoveService { id: String, service_id: String },
    /// Delete a project
    Delete { id: String },
}

impl CliConfig {
    /// 命令列為基礎，再套用 --config 指定的設定檔
    pub fn settings(&self) -> Result<StoreSettings> {
        let settings = StoreSettings {
            endpoint: self.api_endpoint.clone(),
            timeout_seconds: self.timeout_seconds,
            json_logs: self.json_logs,
            ..StoreSettings::default()
        };

        match &self.config {
            Some(path) => settings.merge(&TomlConfig::from_file(path)?),
            None => Ok(settings),
        }
    }
}
