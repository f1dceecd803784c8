use anyhow::Result;
use aura_client::PlannerClient;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod state;
mod wizard;

#[derive(Parser, Debug)]
#[command(name = "aura", version, about = "Aura planner CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the planning wizard: upload a syllabus, set goals, refine, export
    Plan {
        /// Path to the syllabus PDF
        #[arg(long)]
        syllabus: PathBuf,

        /// Planner backend base URL (overrides config)
        #[arg(long)]
        api_url: Option<String>,

        /// Where to write a downloaded ICS file (default: aura-planner-schedule.ics)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Inspect the committed calendar events under ~/.aura
    Events {
        #[command(subcommand)]
        command: EventsCommand,
    },

    /// Manage CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum EventsCommand {
    /// List committed events
    List,

    /// Remove all committed events
    Clear,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default ~/.aura/config.toml
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Plan {
            syllabus,
            api_url,
            out,
        } => {
            let base_url = match api_url {
                Some(url) => url,
                None => state::load_config()?.api.base_url,
            };
            let client = PlannerClient::new(base_url);
            wizard::run_plan(client, syllabus, out).await?;
        }

        Command::Events { command } => match command {
            EventsCommand::List => {
                let events = state::read_events()?;
                if events.is_empty() {
                    println!("No committed events.");
                } else {
                    for e in &events {
                        let when = if e.all_day {
                            format!("{} (all day)", e.start.as_deref().unwrap_or("unscheduled"))
                        } else {
                            e.start.as_deref().unwrap_or("unscheduled").to_string()
                        };
                        println!("{:<28} {} {}", e.id.as_deref().unwrap_or("-"), when, e.title);
                    }
                    println!("\n{} events.", events.len());
                }
            }
            EventsCommand::Clear => {
                state::write_events(&[])?;
                println!("Cleared committed events.");
            }
        },

        Command::Config { command } => match command {
            ConfigCommand::Init => {
                state::init_config()?;
            }
        },
    }

    Ok(())
}
