// Lookup command - print the agent and group directories
use super::utils::{self, ConnectionArgs, Output};
use anyhow::Result;
use clap::Args;

#[derive(Args)]
#[command(
    about = "Show the agent and group directories",
    long_about = "Drain the agent and group collections and print the id → name tables the
reports use to label tickets. Agents are named \"first last\", falling back to
their email; groups without a name are shown as Group-<id>.",
    help_template = crate::clap_help!(
        examples: "  # Print both directories\n  \
                   {bin} lookup\n\n  \
                   # Against a specific domain\n  \
                   {bin} lookup --domain acme.freshservice.com"
    )
)]
pub struct LookupCommand {}

pub fn run(_cmd: LookupCommand, connection: &ConnectionArgs, output: Output) -> Result<()> {
    let analytics = connection.analytics()?;
    let result = utils::block_on(analytics.lookup())?;
    output.emit(result)
}
