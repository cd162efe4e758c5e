use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::Path;

use crate::config::settings::{AppConfig, TableLayoutKind};
use crate::errors::write_context;
use crate::filter::TeamSelection;
use crate::loader::load_dashboard_data;
use crate::presenter::{render_dashboard, DashboardQuery};

/// One-shot render of the dashboard to a static HTML file
pub struct RenderService {
    config: AppConfig,
}

impl RenderService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(
        &self,
        team: Option<&str>,
        layout: Option<TableLayoutKind>,
        output: &Path,
    ) -> Result<()> {
        let query = DashboardQuery::new(
            TeamSelection::from_param(team),
            layout.unwrap_or(self.config.presentation.default_layout),
        );
        let data = load_dashboard_data(&self.config.data);
        if let Some(error) = data.page_error() {
            anyhow::bail!("{}: {}", error.kind(), error);
        }

        let page = render_dashboard(&self.config, &data, &query);
        fs::write(output, page.html).with_context(|| write_context(output))?;

        info!(
            "Wrote dashboard for team '{}' to {}",
            query.team.label(),
            output.display()
        );
        Ok(())
    }
}
