use anyhow::{bail, Context, Result};
use colored::Colorize;
use log::{info, warn};

use crate::config::settings::AppConfig;
use crate::domain::{
    Cell, Column, MatchupTable, QualificationTable, GD_HEADER, TEAM1_QUAL_HEADER, TEAM2_QUAL_HEADER,
};
use crate::errors::load_context;
use crate::loader::{load_matchups_from_path, load_qualification_from_path};

/// A row that breaks a percentage convention
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub table: &'static str,
    /// 1-based data row
    pub row: usize,
    pub message: String,
}

pub fn check_matchups(table: &MatchupTable, tolerance: f64) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (i, row) in table.iter().enumerate() {
        let mut push = |message: String| {
            violations.push(Violation {
                table: "qualification_stats",
                row: i + 1,
                message,
            })
        };

        for (leg, total) in [("1st", row.leg1_total()), ("2nd", row.leg2_total())] {
            if (total - 100.0).abs() > tolerance {
                push(format!(
                    "{} vs {}: {} leg percentages sum to {:.2}",
                    row.team1, row.team2, leg, total
                ));
            }
        }

        for column in Column::ALL.iter().filter(|c| is_percentage(**c)) {
            if let Cell::Number(value) = row.cell(*column) {
                if !(0.0..=100.0).contains(&value) {
                    push(format!(
                        "{} vs {}: '{}' = {} is outside 0..100",
                        row.team1,
                        row.team2,
                        column.header(),
                        value
                    ));
                }
            }
        }
    }
    violations
}

pub fn check_qualification(table: &QualificationTable, tolerance: f64) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (i, row) in table.iter().enumerate() {
        let mut push = |message: String| {
            violations.push(Violation {
                table: "qualification_by_gd",
                row: i + 1,
                message,
            })
        };

        if (row.total() - 100.0).abs() > tolerance {
            push(format!(
                "{} {}: qualification percentages sum to {:.2}",
                GD_HEADER,
                row.leg1_gd.label,
                row.total()
            ));
        }

        for (header, value) in [
            (TEAM1_QUAL_HEADER, row.team1_qual_pct),
            (TEAM2_QUAL_HEADER, row.team2_qual_pct),
        ] {
            if !(0.0..=100.0).contains(&value) {
                push(format!(
                    "{} {}: '{}' = {} is outside 0..100",
                    GD_HEADER, row.leg1_gd.label, header, value
                ));
            }
        }
    }
    violations
}

fn is_percentage(column: Column) -> bool {
    column.is_numeric() && !matches!(column, Column::Team1Elo | Column::Team2Elo)
}

pub struct ValidationService {
    config: AppConfig,
    tolerance: f64,
}

impl ValidationService {
    pub fn new(config: AppConfig, tolerance: f64) -> Self {
        Self { config, tolerance }
    }

    pub fn run(&self) -> Result<()> {
        let stats_path = &self.config.data.stats_path;
        let gd_path = &self.config.data.by_gd_path;

        let matchups = load_matchups_from_path(stats_path)
            .with_context(|| load_context("matchup stats", stats_path))?;
        let qualification = load_qualification_from_path(gd_path)
            .with_context(|| load_context("qualification odds", gd_path))?;

        let mut violations = check_matchups(&matchups, self.tolerance);
        violations.extend(check_qualification(&qualification, self.tolerance));

        info!(
            "Checked {} matchups and {} goal difference buckets",
            matchups.len(),
            qualification.len()
        );

        if violations.is_empty() {
            println!(
                "{} both tables honour the percentage conventions",
                "OK".green().bold()
            );
            return Ok(());
        }

        for v in &violations {
            warn!("{} row {}: {}", v.table, v.row, v.message);
            println!("{} {} row {}: {}", "FAIL".red().bold(), v.table, v.row, v.message);
        }
        bail!("{} convention violations", violations.len())
    }
}
