mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use siteops::{ApiClient, StoreRegistry};

use crate::commands::{
    MachineAction, ProjectAction, ReportAction, SupervisorAction, VendorAction,
};
use crate::config::SiteConfig;

#[derive(Parser)]
#[command(
    name = "siteops",
    version,
    about = "Geotechnical site management over a REST backend, with offline seed fallback"
)]
struct Cli {
    /// Override the configured API base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Emit JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage projects
    Projects {
        #[command(subcommand)]
        action: ProjectAction,
    },
    /// Manage supervisors
    Supervisors {
        #[command(subcommand)]
        action: SupervisorAction,
    },
    /// Manage vendors
    Vendors {
        #[command(subcommand)]
        action: VendorAction,
    },
    /// Manage machinery
    Machinery {
        #[command(subcommand)]
        action: MachineAction,
    },
    /// Manage daily execution reports
    Reports {
        #[command(subcommand)]
        action: ReportAction,
    },
    /// Overview counts across all entities
    Dashboard,
    /// Show or change the stored configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Persist a new API base URL
    SetUrl { url: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = SiteConfig::load()?;

    if let Command::Config { action } = &cli.command {
        match action {
            ConfigAction::Show => {
                println!("api_url = {}", config.api_url);
            }
            ConfigAction::SetUrl { url } => {
                // validate before persisting
                ApiClient::new(url)?;
                config.api_url = url.clone();
                config.save()?;
                println!("saved to {}", SiteConfig::config_path()?.display());
            }
        }
        return Ok(());
    }

    let api_url = config.resolve_api_url(cli.api_url.as_deref());

    let client = ApiClient::new(&api_url)?;
    let registry = StoreRegistry::new(client);

    match cli.command {
        Command::Projects { action } => commands::run_projects(&registry, action, cli.json).await,
        Command::Supervisors { action } => {
            commands::run_supervisors(&registry, action, cli.json).await
        }
        Command::Vendors { action } => commands::run_vendors(&registry, action, cli.json).await,
        Command::Machinery { action } => commands::run_machinery(&registry, action, cli.json).await,
        Command::Reports { action } => commands::run_reports(&registry, action, cli.json).await,
        Command::Dashboard => commands::run_dashboard(&registry, cli.json).await,
        Command::Config { .. } => Ok(()),
    }
}
