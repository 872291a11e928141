// Stats command - ticket counts by status, priority, agent, and type
use super::utils::{self, ConnectionArgs, Output};
use anyhow::Result;
use clap::Args;
use freshstats::StatsRequest;

#[derive(Args)]
#[command(
    about = "Ticket counts by status, priority, agent, and type",
    long_about = "Collect every ticket matching the filters and count them by status,
priority, responding agent, and ticket type. At least one of --group, --after,
or --before is required.

Unknown codes are labelled Status-<id> / Priority-<id>, agents missing from the
directory Agent-<id>, tickets without a responder Unassigned.",
    help_template = crate::clap_help!(
        examples: "  # One group, all time\n  \
                   {bin} stats --group 12\n\n  \
                   # Everything created in January\n  \
                   {bin} stats --after 2024-01-01 --before 2024-02-01"
    )
)]
pub struct StatsCommand {
    /// Agent group id
    #[arg(short, long)]
    pub group: Option<u64>,

    /// Only tickets created after this date (ISO 8601)
    #[arg(long)]
    pub after: Option<String>,

    /// Only tickets created before this date (ISO 8601)
    #[arg(long)]
    pub before: Option<String>,

    /// Workspace id
    #[arg(long)]
    pub workspace: Option<u64>,
}

pub fn run(cmd: StatsCommand, connection: &ConnectionArgs, output: Output) -> Result<()> {
    let analytics = connection.analytics()?;
    let request = StatsRequest {
        group_id: cmd.group,
        created_after: cmd.after,
        created_before: cmd.before,
        workspace_id: cmd.workspace,
    };
    let result = utils::block_on(analytics.ticket_stats(&request))?;
    output.emit(result)
}
