use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use task_tracker::config::Settings;
use task_tracker::error::exit_code;
use task_tracker::{JsonFileStorage, SystemClock, TaskError, TaskRepository, TaskUpdate, render};

/// Track personal tasks in a local JSON file.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Task store to use instead of the configured one
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Configuration file to read settings from
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
enum Commands {
    /// Add a new task
    #[command(visible_alias = "add")]
    Create {
        description: String,
        /// Initial status (defaults to the configured default, "Pending")
        #[arg(long)]
        status: Option<String>,
    },
    /// Show tasks, optionally only those with a given status
    List {
        #[arg(long)]
        status: Option<String>,
    },
    /// Change the description and/or status of a task
    Update {
        id: u32,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Remove a task
    #[command(visible_alias = "rm")]
    Delete { id: u32 },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match setup(&cli) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("Error: {err:#}");
            return ExitCode::from(exit_code::SETUP as u8);
        }
    };

    match run(cli.command, settings) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn setup(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(file) = &cli.file {
        settings.store_path = file.clone();
    }

    tracing_subscriber::fmt()
        .with_max_level(settings.log_level()?)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(store = %settings.store_path.display(), "settings loaded");
    Ok(settings)
}

fn run(command: Commands, settings: Settings) -> Result<String, TaskError> {
    let repository = TaskRepository::new(JsonFileStorage::new(settings.store_path), SystemClock)
        .with_default_status(settings.default_status);

    match command {
        Commands::Create {
            description,
            status,
        } => repository
            .create(description, status)
            .map(|task| render::created(&task)),
        Commands::List { status } => Ok(render::listing(&repository.list(status))),
        Commands::Update {
            id,
            description,
            status,
        } => repository
            .update(
                id,
                TaskUpdate {
                    description,
                    status,
                },
            )
            .map(|task| render::updated(&task)),
        Commands::Delete { id } => repository.delete(id).map(|task| render::deleted(&task)),
    }
}
