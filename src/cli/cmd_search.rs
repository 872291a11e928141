// Search command - bounded ticket search with a filter expression
use super::utils::{self, ConnectionArgs, Output};
use anyhow::Result;
use clap::Args;
use freshstats::{SearchRequest, constants};

#[derive(Args)]
#[command(
    about = "Search tickets with a filter expression",
    long_about = "Walk the ticket filter endpoint page by page and collect matching tickets
up to --max-results (default 500, at most 1000). The output reports how many
records and pages were fetched and whether the cap cut the walk short.

The expression uses the platform's query language, e.g.
  status:2 AND priority:4
  group_id:12 AND created_at:>'2024-01-01'",
    help_template = crate::clap_help!(
        examples: "  # Open urgent tickets\n  \
                   {bin} search \"status:2 AND priority:4\"\n\n  \
                   # Only a few fields, at most 100 tickets\n  \
                   {bin} search \"group_id:12\" --max-results 100 --fields id,subject,status"
    )
)]
pub struct SearchCommand {
    /// Filter expression
    pub query: String,

    /// Maximum number of tickets to collect (clamped to 1000)
    #[arg(short = 'n', long, default_value_t = constants::DEFAULT_MAX_RESULTS)]
    pub max_results: usize,

    /// Keep only these fields of each ticket
    #[arg(long, value_delimiter = ',')]
    pub fields: Option<Vec<String>>,

    /// Workspace id
    #[arg(long)]
    pub workspace: Option<u64>,
}

pub fn run(cmd: SearchCommand, connection: &ConnectionArgs, output: Output) -> Result<()> {
    let analytics = connection.analytics()?;
    let request = SearchRequest {
        query: cmd.query,
        max_results: cmd.max_results,
        fields: cmd.fields,
        workspace_id: cmd.workspace,
    };
    let result = utils::block_on(analytics.search_tickets(&request))?;
    output.emit(result)
}
