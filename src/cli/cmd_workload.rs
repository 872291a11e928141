// Workload command - per-agent ticket counts and resolution times
use super::utils::{self, ConnectionArgs, Output};
use anyhow::Result;
use clap::Args;
use freshstats::{WorkloadRequest, constants};

#[derive(Args)]
#[command(
    about = "Per-agent ticket counts and resolution times",
    long_about = "Collect the tickets of one agent (--agent) or one group (--group) and report,
per responding agent, how many were assigned, resolved, closed, and still open,
together with resolution times in hours and their average.

The window starts at --after, or --period before now (default 30d), and ends
at --before or now. Agents are sorted by assigned tickets, busiest first.",
    help_template = crate::clap_help!(
        examples: "  # Group workload over the last 30 days\n  \
                   {bin} workload --group 12\n\n  \
                   # One agent over the last week\n  \
                   {bin} workload --agent 4001 --period 7d"
    )
)]
pub struct WorkloadCommand {
    /// Agent id
    #[arg(short, long, conflicts_with = "group")]
    pub agent: Option<u64>,

    /// Agent group id
    #[arg(short, long)]
    pub group: Option<u64>,

    /// Relative window such as 7d, 30d, 90d (ignored when --after is given)
    #[arg(short, long, default_value = constants::DEFAULT_WORKLOAD_PERIOD)]
    pub period: String,

    /// Window start (ISO 8601)
    #[arg(long)]
    pub after: Option<String>,

    /// Window end (ISO 8601), defaults to now
    #[arg(long)]
    pub before: Option<String>,
}

pub fn run(cmd: WorkloadCommand, connection: &ConnectionArgs, output: Output) -> Result<()> {
    let analytics = connection.analytics()?;
    let request = WorkloadRequest {
        agent_id: cmd.agent,
        group_id: cmd.group,
        period: Some(cmd.period),
        created_after: cmd.after,
        created_before: cmd.before,
    };
    let result = utils::block_on(analytics.agent_workload(&request))?;
    output.emit(result)
}
