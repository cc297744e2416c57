use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use scout_scheduler::config::AppConfig;
use scout_scheduler::display::{print_issues, print_schedule, render_scouter_text, write_schedule_to_file};
use scout_scheduler::export::{load_schedule_json, write_schedule_csv_file, write_schedule_json};
use scout_scheduler::parser::{load_request, load_roster};
use scout_scheduler::SchedulerError;

#[derive(Parser)]
#[command(name = "scout-scheduler", about = "Builds scouting rotations for a competition event")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check a generation request without producing a schedule
    Validate {
        request: PathBuf,
    },
    /// Generate a schedule and write it as JSON, CSV and text
    Generate {
        request: PathBuf,
        /// Replace the request's scouter list with names from this file
        #[arg(long)]
        scouters: Option<PathBuf>,
    },
    /// Print one scouter's assignments from a saved schedule
    Scouter {
        schedule: PathBuf,
        name: String,
    },
    /// Run the HTTP API
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Validate { request } => {
            let request = load_request(&request)?;
            let errors = request.validate();
            let suggested = request.event.suggested_total_matches();
            if suggested != request.event.total_matches {
                println!(
                    "Note: {} matches are needed for every team to play {} times (request has {})",
                    suggested, request.event.matches_per_team, request.event.total_matches
                );
            }
            if errors.is_empty() {
                println!("Configuration is feasible");
            } else {
                print_issues("Errors", &errors);
                return Err(SchedulerError::Rejected(format!("{} error(s)", errors.len())).into());
            }
        }
        Command::Generate { request, scouters } => {
            let mut request = load_request(&request)?;
            if let Some(path) = scouters {
                request.personnel.scouters = load_roster(&path)?;
                info!("Loaded {} scouters from {}", request.personnel.scouters.len(), path.display());
            }

            let report = match request.generate(&config.generation_options()) {
                Ok(report) => report,
                Err(errors) => {
                    print_issues("Errors", &errors);
                    return Err(SchedulerError::Rejected(format!("{} error(s)", errors.len())).into());
                }
            };

            print_schedule(&report.schedule, &report.warnings);

            let dir = &config.output.directory;
            std::fs::create_dir_all(dir)?;
            let json_path = dir.join("schedule.json");
            let csv_path = dir.join("schedule.csv");
            let text_path = dir.join("schedule.txt");
            write_schedule_json(&report.schedule, &json_path)?;
            write_schedule_csv_file(&report.schedule, &csv_path)?;
            write_schedule_to_file(&report.schedule, &text_path.to_string_lossy())?;

            println!("\nSchedule saved to:");
            println!("  - {}", json_path.display());
            println!("  - {}", csv_path.display());
            println!("  - {}", text_path.display());
        }
        Command::Scouter { schedule, name } => {
            let schedule = load_schedule_json(&schedule)?;
            print!("{}", render_scouter_text(&schedule, &name));
        }
        Command::Serve { port } => {
            let port = port.unwrap_or(config.server.port);
            info!("Starting web server on {}:{}", config.server.host, port);
            scout_scheduler::web::start_server(&config.server.host, port, config.generation_options()).await?;
        }
    }

    Ok(())
}
