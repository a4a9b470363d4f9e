pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "nutrafuel",
    about = "NutraFuel storefront and agent CLI",
    long_about = "Query storefront and admin agents, render charts and landing pages, browse the \
                  catalog, and inspect runtime configuration.",
    after_help = "Examples:\n  nutrafuel ask rachel_nutrition \"fat burning stack\"\n  \
                  nutrafuel chart customer_experience --query \"Q3 cohorts\" --export out\n  \
                  nutrafuel doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "List storefront and admin agents")]
    Agents,
    #[command(about = "Send one query to an agent and print the reply")]
    Ask {
        agent: String,
        query: String,
        #[arg(long, help = "Query the HTTP agent API instead of the local mock router")]
        remote: bool,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Render the chart attached to an admin agent's replies")]
    Chart {
        agent: String,
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, help = "Write <Title>_data.json into this directory")]
        export: Option<PathBuf>,
        #[arg(long, help = "Print the chart payload as JSON")]
        json: bool,
    },
    #[command(about = "Generate a landing page preview for a campaign request")]
    Landing {
        query: String,
        #[arg(long, help = "Write the HTML to this file instead of stdout")]
        out: Option<PathBuf>,
    },
    #[command(about = "Browse the storefront catalog")]
    Products {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate config, templates, and agent API reachability")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("NUTRAFUEL_CLI_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .compact()
        .try_init();
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Command::Agents => commands::agents::run(),
        Command::Ask { agent, query, remote, json } => {
            commands::ask::run(&agent, &query, remote, json)
        }
        Command::Chart { agent, query, export, json } => {
            commands::chart::run(&agent, &query, export.as_deref(), json)
        }
        Command::Landing { query, out } => commands::landing::run(&query, out.as_deref()),
        Command::Products { category, search } => {
            commands::products::run(category.as_deref(), search.as_deref())
        }
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => commands::doctor::run(json),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
