pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod filter;
pub mod loader;
pub mod presenter;
pub mod services;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use std::path::Path;

use crate::config::settings::{AppConfig, TableLayoutKind};
use crate::services::render::RenderService;
use crate::services::server::ServerService;
use crate::services::validation::ValidationService;

pub fn interpret() -> Cli {
    Cli::parse()
}

pub fn handle_serve(port: u16, config: AppConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_render(
    config: AppConfig,
    team: Option<&str>,
    layout: Option<TableLayoutKind>,
    output: &Path,
) -> Result<()> {
    let service = RenderService::new(config);
    service.run(team, layout, output)
}

pub fn handle_validate(config: AppConfig, tolerance: f64) -> Result<()> {
    let service = ValidationService::new(config, tolerance);
    service.run()
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
