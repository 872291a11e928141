use anyhow::Result;
use clap::{Parser, Subcommand};

// CLI Commands (cmd_ prefix)
mod cmd_compare;
mod cmd_lookup;
mod cmd_search;
mod cmd_server;
mod cmd_stats;
mod cmd_workload;

// Helper modules (no cmd_ prefix)
mod logger;
mod utils;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Format custom help template with grouped commands
fn format_help_template() -> &'static str {
    concat!(
        "{about-with-newline}\n\n",
        "{usage-heading}\n  {usage}\n\n",
        "Options:\n{options}\n\n",
        "Directory:\n",
        "  lookup    Show the agent and group directories\n",
        "\n",
        "Tickets:\n",
        "  search    Search tickets with a filter expression (capped)\n",
        "\n",
        "Reports:\n",
        "  stats     Ticket counts by status, priority, agent, and type\n",
        "  workload  Per-agent ticket counts and resolution times\n",
        "  compare   Side-by-side metrics for 2 to 10 groups\n",
        "\n",
        "Server:\n",
        "  server    Start HTTP server\n",
        "\n",
        "See 'freshstats <COMMAND> --help' for more information on a specific command.\n"
    )
}

#[derive(Parser)]
#[command(bin_name = "freshstats")]
#[command(version = VERSION)]
#[command(about = concat!("freshstats v", env!("CARGO_PKG_VERSION"), " - Freshservice ticket analytics"))]
#[command(long_about = concat!(
    "freshstats v", env!("CARGO_PKG_VERSION"), " - Freshservice ticket analytics\n\n",
    "Walks paginated Freshservice collections and folds the tickets into\n",
    "statistics, agent workload, and team comparison reports. Every command\n",
    "prints a JSON envelope: {\"success\": true, ...} or {\"success\": false, \"error\": ...}.\n\n",
    "Credentials are read from FRESHSERVICE_DOMAIN and FRESHSERVICE_APIKEY\n",
    "(a .env file in the working directory is loaded first)."
))]
#[command(author)]
#[command(propagate_version = true)]
#[command(help_template = format_help_template())]
pub struct Cli {
    #[command(flatten)]
    connection: utils::ConnectionArgs,

    /// Print JSON on a single line
    #[arg(long, global = true)]
    compact: bool,

    /// Only log errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Enable verbose output
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Lookup(cmd_lookup::LookupCommand),
    Search(cmd_search::SearchCommand),
    Stats(cmd_stats::StatsCommand),
    Workload(cmd_workload::WorkloadCommand),
    Compare(cmd_compare::CompareCommand),
    Server(cmd_server::ServerCommand),
}

fn main() -> Result<()> {
    // Variables in .env become visible to clap's env fallbacks
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logger based on verbosity flags
    logger::init_logger(cli.verbose, cli.quiet);

    let output = utils::Output {
        compact: cli.compact,
    };

    match cli.command {
        Commands::Lookup(cmd) => cmd_lookup::run(cmd, &cli.connection, output)?,
        Commands::Search(cmd) => cmd_search::run(cmd, &cli.connection, output)?,
        Commands::Stats(cmd) => cmd_stats::run(cmd, &cli.connection, output)?,
        Commands::Workload(cmd) => cmd_workload::run(cmd, &cli.connection, output)?,
        Commands::Compare(cmd) => cmd_compare::run(cmd, &cli.connection, output)?,
        Commands::Server(cmd) => cmd_server::run(cmd, &cli.connection)?,
    }

    Ok(())
}

/// Macro to create clap help templates with examples
/// This works around the limitation that {bin} doesn't work in after_help
/// Uses env! macro to get binary name at compile time
#[macro_export]
macro_rules! clap_help {
    (examples: $examples:literal) => {{
        const BIN: &str = env!("CARGO_PKG_NAME");
        concat!(
            "{about-with-newline}\n",
            "{usage-heading} {usage}\n\n",
            "{all-args}\n\n",
            "Examples:\n",
            $examples
        )
        .replace("{bin}", BIN)
    }};
}
