// Server command - start HTTP server
use super::utils::ConnectionArgs;
use anyhow::Result;
use clap::Args;
use freshstats::constants;

#[derive(Args)]
#[command(
    about = "Start HTTP server",
    long_about = "Serve the lookup, search, and report operations as JSON over HTTP. The
server keeps one directory cache for all requests, so agent and group names
are fetched at most once per TTL.

Endpoints: /, /status, /lookup, /tickets/search, /stats/tickets,
/stats/workload, /stats/teams. Invalid parameters answer 400, failures of
the Freshservice API answer 502.",
    help_template = crate::clap_help!(
        examples: "  # Start server on default port (8080)\n  \
                   {bin} server\n\n  \
                   # Custom host and port\n  \
                   {bin} server --host 0.0.0.0 --port 3000\n\n  \
                   # Shorter directory cache\n  \
                   {bin} server --ttl 60"
    )
)]
pub struct ServerCommand {
    /// HTTP server port
    #[arg(long, default_value_t = constants::DEFAULT_SERVER_PORT, help_heading = "Server Options")]
    pub port: u16,

    /// HTTP server host
    #[arg(long, default_value = constants::DEFAULT_SERVER_HOST, help_heading = "Server Options")]
    pub host: String,

    /// Directory cache TTL in seconds
    #[arg(long, default_value_t = constants::DIRECTORY_TTL_SECS, help_heading = "Server Options")]
    pub ttl: u64,
}

pub fn run(cmd: ServerCommand, connection: &ConnectionArgs) -> Result<()> {
    #[cfg(not(feature = "server"))]
    {
        let _ = (cmd, connection); // Suppress unused warnings when server feature is disabled
        anyhow::bail!("Server feature is not enabled. Rebuild with --features server");
    }

    #[cfg(feature = "server")]
    {
        run_server(cmd, connection)
    }
}

#[cfg(feature = "server")]
fn run_server(cmd: ServerCommand, connection: &ConnectionArgs) -> Result<()> {
    use freshstats::server::{StartupConfig, start_server};
    use std::time::Duration;

    let startup_config = StartupConfig {
        client: connection.client_config()?,
        host: cmd.host,
        port: cmd.port,
        directory_ttl: Duration::from_secs(cmd.ttl),
    };

    super::utils::block_on(start_server(startup_config))?
}
