use anyhow::Result;

use qualification_dashboard::cli::Cli;
use qualification_dashboard::cli::Command;
use qualification_dashboard::{
    handle_completions, handle_render, handle_serve, handle_validate, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let cli = interpret();
    execute_command(&cli)
}

fn execute_command(cli: &Cli) -> Result<()> {
    let config = cli.data.to_config();
    match &cli.command {
        Command::Serve { port } => handle_serve(*port, config),
        Command::Render {
            team,
            layout,
            output,
        } => handle_render(config, team.as_deref(), *layout, output),
        Command::Validate { tolerance } => handle_validate(config, *tolerance),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
