//! CLI argument parsing for the registration workflow.
//!
//! The CLI is intentionally thin: it routes to the interactive flows and
//! carries no policy of its own.
use clap::{Parser, Subcommand};

/// Root CLI entrypoint.
///
/// Keeping a single `RootArgs` type makes command routing obvious and avoids
/// hidden defaults in subcommand constructors.
#[derive(Parser, Debug)]
#[command(
    name = "voterflow",
    version,
    about = "Interactive voter registration intake",
    after_help = "Commands:\n  register           Run the guarded registration flow\n  tools              Open the calculator utilities menu\n\nExamples:\n  voterflow register\n  voterflow register --json\n  voterflow tools",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    Register(RegisterArgs),
    Tools(ToolsArgs),
}

/// Inputs for the interactive registration flow.
#[derive(Parser, Debug)]
#[command(about = "Collect and validate voter registration fields")]
pub struct RegisterArgs {
    /// Emit the completed record as JSON instead of the prose summary
    #[arg(long)]
    pub json: bool,
}

/// Inputs for the calculator utilities menu.
#[derive(Parser, Debug)]
#[command(about = "Menu of stateless calculator utilities")]
pub struct ToolsArgs {}
