mod commands;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use physio_core::{
    config::records_dir_from_values, CoreConfig, FieldName, JsonRecordStore, PatientId, Section,
};

use commands::{SaveReport, SaveRequest};

const DEFAULT_LOG_DIRECTIVES: &str = "physio=info,physio_core=info";

#[derive(Parser)]
#[command(name = "physio")]
#[command(about = "Physiotherapy clinical history CLI")]
struct Cli {
    /// Directory holding stored clinical histories (overrides PHYSIO_RECORDS_DIR)
    #[arg(long, global = true)]
    records_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the form sections and their fields
    Sections,
    /// Show a stored clinical history, read-only
    Show {
        /// Patient identifier
        patient_id: String,
        /// Section to show (general, history, physical-evaluation, ...)
        #[arg(long, value_parser = parse_section)]
        section: Option<Section>,
        /// Show every section
        #[arg(long)]
        all: bool,
        /// Print the view model as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create or update a clinical history
    Save {
        /// Patient identifier
        patient_id: String,
        /// Patient name shown in the form title
        #[arg(long)]
        name: Option<String>,
        /// Field edit as field=value, e.g. --set consultationReason="Back pain"
        #[arg(long = "set", value_parser = parse_edit)]
        edits: Vec<(FieldName, String)>,
        /// Section to display after submitting
        #[arg(long, value_parser = parse_section)]
        tab: Option<Section>,
    },
    /// Validate a clinical history JSON file without saving it
    Validate {
        /// Path to a clinical history JSON file
        file: PathBuf,
    },
}

fn parse_edit(raw: &str) -> Result<(FieldName, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected field=value, got '{raw}'"))?;
    let field = name.parse::<FieldName>().map_err(|e| e.to_string())?;
    Ok((field, value.to_string()))
}

fn parse_section(raw: &str) -> Result<Section, String> {
    raw.parse::<Section>().map_err(|e| e.to_string())
}

/// `RUST_LOG` when set, otherwise info for this binary and the core crate.
fn log_filter(rust_log: Option<String>) -> EnvFilter {
    match rust_log.filter(|v| !v.trim().is_empty()) {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::new(DEFAULT_LOG_DIRECTIVES),
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let records_dir =
        records_dir_from_values(cli.records_dir, std::env::var("PHYSIO_RECORDS_DIR").ok());
    let cfg = Arc::new(CoreConfig::new(records_dir)?);
    let store = JsonRecordStore::new(cfg);

    match cli.command {
        Some(Commands::Sections) => {
            print!("{}", commands::sections());
        }
        Some(Commands::Show {
            patient_id,
            section,
            all,
            json,
        }) => {
            let patient_id = PatientId::new(&patient_id)?;
            let sections: Vec<Section> = if all {
                Section::ALL.to_vec()
            } else {
                vec![section.unwrap_or_default()]
            };
            for rendered in commands::show(&store, &patient_id, &sections, json).await? {
                println!("{rendered}");
            }
        }
        Some(Commands::Save {
            patient_id,
            name,
            edits,
            tab,
        }) => {
            let patient_id = PatientId::new(&patient_id)?;
            let request = SaveRequest {
                patient_id: patient_id.clone(),
                name,
                edits,
                tab,
            };
            match commands::save(&store, request).await? {
                SaveReport::Saved {
                    path,
                    updated,
                    view,
                } => {
                    let verb = if updated { "Updated" } else { "Saved" };
                    println!(
                        "{} clinical history for patient {} in {}",
                        verb,
                        patient_id,
                        path.display()
                    );
                    if let Some(view) = view {
                        println!("{view}");
                    }
                }
                SaveReport::Invalid { errors, view, .. } => {
                    eprintln!("Clinical history not saved:");
                    eprint!("{}", commands::format_errors(&errors));
                    eprintln!("{view}");
                    anyhow::bail!("{} field(s) failed validation", errors.len());
                }
            }
        }
        Some(Commands::Validate { file }) => {
            let errors = commands::validate_file(&file)?;
            if errors.is_empty() {
                println!("{}: valid", file.display());
            } else {
                eprintln!("{}: invalid", file.display());
                eprint!("{}", commands::format_errors(&errors));
                anyhow::bail!("{} field(s) failed validation", errors.len());
            }
        }
        None => {
            println!("Use 'physio --help' for commands");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(log_filter(std::env::var("RUST_LOG").ok()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    run(Cli::parse()).await
}
