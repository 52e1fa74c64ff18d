use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use voterflow::cli::{Command, RegisterArgs, RootArgs, ToolsArgs};
use voterflow::console::StdConsole;
use voterflow::registration::run_registration;
use voterflow::tools::run_menu;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = RootArgs::parse();
    match args.command {
        Command::Register(args) => cmd_register(args),
        Command::Tools(args) => cmd_tools(args),
    }
}

fn cmd_register(args: RegisterArgs) -> Result<()> {
    let mut console = StdConsole;
    // Both terminal outcomes end the session normally; exit status mapping
    // is left to callers.
    run_registration(&mut console, args.json)?;
    Ok(())
}

fn cmd_tools(_args: ToolsArgs) -> Result<()> {
    let mut console = StdConsole;
    run_menu(&mut console)
}
