use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use storypath::{
    Backend, LocationId, ProjectId, StoryPathApi,
    config::Config,
    core::{
        listing::{LocationList, ProjectList},
        qr::qr_payload,
        simulator::load_preview,
    },
};

#[derive(Parser)]
#[command(name = "storypath")]
#[command(about = "Author location-based tours and preview how participants score them")]
struct Cli {
    /// Config file (defaults to ./storypath.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Base URL of the remote project service
    #[arg(long, env = "STORYPATH_API_URL", value_name = "URL")]
    api_url: Option<String>,

    /// Local SQLite database, used when no API URL is set
    #[arg(long, env = "STORYPATH_DATABASE", value_name = "FILE")]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the authoring window
    #[cfg(feature = "gui")]
    Gui,
    /// List projects
    Projects,
    /// List a project's locations
    Locations {
        /// Project id
        project_id: String,
    },
    /// Play through a project as a participant would
    Preview {
        /// Project to preview (defaults to the first project, with every location)
        #[arg(long)]
        project: Option<String>,
        /// Location ids to visit, in order
        #[arg(long = "visit", value_name = "LOCATION_ID")]
        visits: Vec<String>,
    },
    /// Print the text encoded in a location's QR code
    Qr {
        /// Location id
        location_id: String,
    },
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // LOG_FORMAT=json for machine-readable logs, human-readable otherwise
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("storypath=info"));
    if std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?
        .with_overrides(cli.api_url.clone(), cli.database.clone());

    match cli.command {
        #[cfg(feature = "gui")]
        Commands::Gui => storypath::gui::run(config.backend())
            .map_err(|e| anyhow::anyhow!("GUI failed: {}", e)),
        command => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(async {
                let backend = Backend::connect(&config.backend()).await?;
                run_command(&backend, command).await
            })
        }
    }
}

async fn run_command(backend: &Backend, command: Commands) -> Result<()> {
    match command {
        #[cfg(feature = "gui")]
        Commands::Gui => anyhow::bail!("the authoring window runs outside the command runtime"),
        Commands::Projects => {
            let list = ProjectList::load(backend).await;
            if list.is_empty() {
                println!("Your project list is empty.");
            }
            for project in list.projects() {
                println!(
                    "{}\t{}\t{}\tpublished: {}",
                    project.id, project.title, project.description, project.is_published
                );
            }
        }
        Commands::Locations { project_id } => {
            let list = LocationList::load(backend, Some(ProjectId::from(project_id))).await;
            if let Some(error) = list.error() {
                anyhow::bail!("{error}");
            }
            println!("{} - Locations", list.project_title());
            for location in list.locations() {
                println!(
                    "{}\t{}\t{}\t{}\t{} points",
                    location.id,
                    location.location_name,
                    location.location_trigger,
                    location.location_position,
                    location.score_points
                );
            }
        }
        Commands::Preview { project, visits } => {
            let scope = project.map(ProjectId::from);
            let mut simulator = load_preview(backend, scope.as_ref()).await;
            if !simulator.is_ready() {
                println!("Loading... (no project or no locations to preview)");
                return Ok(());
            }
            for visit in visits {
                let id = LocationId::from(visit);
                if !simulator.select(&id) {
                    warn!(%id, "no such location in this preview");
                }
            }
            if let Some(home) = simulator.home() {
                println!("{home}\n");
            }
            if let Some(active) = simulator.active_location() {
                println!("{active}\n");
            }
            println!("{}", simulator.summary());
        }
        Commands::Qr { location_id } => {
            let location = backend.get_location(&LocationId::from(location_id)).await?;
            println!("QR Code for {}", location.location_name);
            println!("{}", qr_payload(&location.id));
        }
    }
    Ok(())
}
