// Compare command - side-by-side metrics for several groups
use super::utils::{self, ConnectionArgs, Output};
use anyhow::Result;
use clap::Args;
use freshstats::ComparisonRequest;

#[derive(Args)]
#[command(
    about = "Side-by-side metrics for 2 to 10 groups",
    long_about = "Collect each group's tickets over the same window (default: the last 30
days) and report open, resolved, and closed counts, closure rate, average
resolution time, and the five busiest agents per group. The summary adds the
ticket total across groups and the mean closure rate.

Groups are fetched concurrently; if any group fails the whole comparison fails.",
    help_template = crate::clap_help!(
        examples: "  # Compare three teams\n  \
                   {bin} compare 12 13 14\n\n  \
                   # Over a fixed quarter\n  \
                   {bin} compare 12 13 --after 2024-01-01 --before 2024-04-01"
    )
)]
pub struct CompareCommand {
    /// Agent group ids
    #[arg(required = true, num_args = 1..)]
    pub groups: Vec<u64>,

    /// Window start (ISO 8601), defaults to 30 days ago
    #[arg(long)]
    pub after: Option<String>,

    /// Window end (ISO 8601), defaults to now
    #[arg(long)]
    pub before: Option<String>,
}

pub fn run(cmd: CompareCommand, connection: &ConnectionArgs, output: Output) -> Result<()> {
    let analytics = connection.analytics()?;
    let request = ComparisonRequest {
        group_ids: cmd.groups,
        created_after: cmd.after,
        created_before: cmd.before,
    };
    let result = utils::block_on(analytics.team_comparison(&request))?;
    output.emit(result)
}
