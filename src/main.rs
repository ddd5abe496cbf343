use clap::Parser;
use project_costs::utils::logger;
use project_costs::{
    create_project, Category, CliConfig, Command, CostsError, HttpProjectStore, ProjectDraft,
    ProjectId, ProjectRecord, ProjectSession, ProjectStore, ServiceEntry, ServiceId,
};

fn print_project(record: &ProjectRecord) {
    println!("Project: {} [{}]", record.name, record.id);
    println!("  Category:  {}", record.category.name);
    println!("  Budget:    {}", record.budget);
    println!("  Used:      {}", record.cost);
    if let Some(remaining) = record.remaining_budget() {
        println!("  Remaining: {}", remaining);
    }
    if record.services.is_empty() {
        println!("  No services registered.");
    }
    for service in &record.services {
        let id = service.id.as_ref().map(ServiceId::as_str).unwrap_or("-");
        println!("  - {} ({}): {} {}", service.name, id, service.cost, service.description);
    }
}

async fn run(command: Command, store: HttpProjectStore) -> Result<(), CostsError> {
    match command {
        Command::List => {
            let projects = store.list_projects().await?;
            if projects.is_empty() {
                println!("No projects registered.");
            }
            for project in projects {
                println!(
                    "{}\t{}\t{}\t{} / {}",
                    project.id, project.name, project.category.name, project.cost, project.budget
                );
            }
        }
        Command::Categories => {
            for category in store.list_categories().await? {
                println!("{}\t{}", category.id, category.name);
            }
        }
        Command::Create {
            name,
            budget,
            category_id,
            category_name,
        } => {
            let draft = ProjectDraft {
                name,
                budget,
                category: Category {
                    id: category_id,
                    name: category_name,
                },
            };
            let (record, feedback) = create_project(&store, &draft).await?;
            println!("✅ {}", feedback.message);
            print_project(&record);
        }
        Command::Show { id } => {
            let mut session = ProjectSession::new(store);
            print_project(session.load(&ProjectId::new(id)).await?);
        }
        Command::Edit { id, name, budget } => {
            let mut session = ProjectSession::new(store);
            let mut updated = session.load(&ProjectId::new(id)).await?.clone();
            if let Some(name) = name {
                updated.name = name;
            }
            if let Some(budget) = budget {
                updated.budget = budget;
            }
            session.toggle_project_form();
            let record = session.edit_project(updated).await?.clone();
            report(&session);
            print_project(&record);
        }
        Command::AddService {
            id,
            name,
            cost,
            description,
        } => {
            let mut session = ProjectSession::new(store);
            session.load(&ProjectId::new(id)).await?;
            session.toggle_service_form();
            let service_id = session
                .add_service(ServiceEntry::new(name, cost, description))
                .await?;
            report(&session);
            println!("🆔 Service id: {}", service_id);
        }
        Command::RemoveService { id, service_id } => {
            let mut session = ProjectSession::new(store);
            session.load(&ProjectId::new(id)).await?;
            let removed = session.remove_service(&ServiceId::new(service_id)).await?;
            report(&session);
            println!("🗑  Removed '{}' ({})", removed.name, removed.cost);
        }
        Command::Delete { id } => {
            store.delete_project(&ProjectId::new(id.clone())).await?;
            println!("✅ Project {} deleted", id);
        }
    }
    Ok(())
}

fn report<S: ProjectStore>(session: &ProjectSession<S>) {
    if let Some(feedback) = session.feedback() {
        println!("✅ {}", feedback.message);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    let settings = match config.settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if settings.json_logs {
        logger::init_json_logger(config.verbose, settings.log_level.as_deref());
    } else {
        logger::init_cli_logger(config.verbose, settings.log_level.as_deref());
    }

    tracing::info!("Starting costs CLI against {}", settings.endpoint);
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let store = settings.build_store()?;

    if let Err(e) = run(config.command, store).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?})",
            e,
            e.category()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.category() {
            project_costs::utils::error::ErrorCategory::Local => 2,
            project_costs::utils::error::ErrorCategory::Remote => 3,
            project_costs::utils::error::ErrorCategory::Config => 1,
            project_costs::utils::error::ErrorCategory::System => 4,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}
