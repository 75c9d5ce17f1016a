//! Code Vista storage CLI.
//!
//! Usage:
//!   code-vista path                  # Print the storage file location
//!   code-vista show                  # Print the whole document
//!   code-vista list                  # One line per stored project
//!   code-vista get <path>            # Print one project's analysis
//!   code-vista upsert <file.json>    # Insert or replace an analysis
//!   code-vista set-folder <dir>      # Set the projects folder

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codevista::{ProjAnalysis, ProjectStore, StoreConfig, Upsert};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "code-vista")]
#[command(about = "Code Vista - project analysis storage", long_about = None)]
struct Cli {
    /// Store everything in this directory instead of the per-user config dir
    #[arg(short, long, global = true)]
    storage_dir: Option<PathBuf>,

    /// TOML config file (app_name, storage_dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the storage file path
    Path,

    /// Print the stored document as JSON
    Show,

    /// List stored projects
    List,

    /// Print the analysis stored for a project path
    Get {
        /// Project path (the record key)
        path: String,
    },

    /// Insert or replace a project analysis read from a JSON file ("-" for stdin)
    Upsert {
        file: PathBuf,

        /// Reset last_analyzed to the current time
        #[arg(long)]
        touch: bool,
    },

    /// Set the folder projects are discovered under
    SetFolder {
        folder: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<StoreConfig> {
    let mut config = match &cli.config {
        Some(path) => StoreConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => StoreConfig::default(),
    }
    .with_env_overrides();

    if let Some(dir) = &cli.storage_dir {
        config.storage_dir = Some(dir.clone());
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let store = ProjectStore::open(&config).context("opening storage")?;

    match cli.command {
        Commands::Path => {
            println!("{}", store.storage_path().display());
        }

        Commands::Show => {
            let doc = store.load_data();
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }

        Commands::List => {
            let doc = store.load_data();
            if doc.projects.is_empty() {
                println!("No projects stored");
                return Ok(());
            }
            for project in &doc.projects {
                println!(
                    "{}  {}  files={} loc={}  analyzed {}",
                    project.project_name,
                    project.path,
                    project.summary.total_files,
                    project.summary.total_lines_of_code,
                    project.last_analyzed
                );
            }
        }

        Commands::Get { path } => match store.get_project(&path) {
            Some(project) => println!("{}", serde_json::to_string_pretty(&project)?),
            None => anyhow::bail!("no project stored for '{}'", path),
        },

        Commands::Upsert { file, touch } => {
            let text = if file.as_os_str() == "-" {
                std::io::read_to_string(std::io::stdin()).context("reading stdin")?
            } else {
                fs::read_to_string(&file)
                    .with_context(|| format!("reading {}", file.display()))?
            };
            let mut analysis: ProjAnalysis =
                serde_json::from_str(&text).context("parsing project analysis")?;
            if touch {
                analysis.touch();
            }

            let path = analysis.path.clone();
            match store.update_project(analysis) {
                Upsert::Inserted(_) => println!("✓ Added {}", path),
                Upsert::Replaced(_) => println!("✓ Updated {}", path),
            }
        }

        Commands::SetFolder { folder } => {
            store.set_projects_folder(folder.clone());
            println!("✓ Projects folder set to {}", folder);
        }
    }

    Ok(())
}
