use clap::ValueEnum;
use serde::Deserialize;
use std::path::PathBuf;

pub const STATS_PATH_ENV: &str = "QUALIFICATION_STATS_PATH";
pub const BY_GD_PATH_ENV: &str = "QUALIFICATION_BY_GD_PATH";

#[derive(Debug, Clone)]
pub struct DataSettings {
    pub stats_path: PathBuf,
    pub by_gd_path: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            stats_path: env_path(STATS_PATH_ENV, "qualification_stats.csv"),
            by_gd_path: env_path(BY_GD_PATH_ENV, "qualification_by_gd.csv"),
        }
    }
}

fn env_path(var: &str, fallback: &str) -> PathBuf {
    std::env::var(var)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(fallback))
}

#[derive(Debug, Clone)]
pub struct PageSettings {
    pub page_title: &'static str,
    pub heading: &'static str,
    pub description: &'static str,
    pub filter_label: &'static str,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            page_title: "UEFA Qualification Dashboard",
            heading: "🏆 Two-Leg Qualification Simulation Dashboard",
            description: "Analyze win probabilities, Elo profiles, and leg-wise performance",
            filter_label: "🔍 Filter by team",
        }
    }
}

/// Which table presenter configuration the page uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TableLayoutKind {
    /// One table with every column
    Combined,
    /// 1st Leg, 2nd Leg and Overall tables
    Split,
}

/// Bucket order of the goal-difference bar chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GdOrder {
    /// Numeric buckets ascending, non-numeric labels after them in file order
    Ascending,
    /// Exactly the order of the input file
    FileOrder,
}

#[derive(Debug, Clone)]
pub struct PresentationSettings {
    pub default_layout: TableLayoutKind,
    pub gd_order: GdOrder,
}

impl Default for PresentationSettings {
    fn default() -> Self {
        Self {
            default_layout: TableLayoutKind::Split,
            gd_order: GdOrder::Ascending,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub data: DataSettings,
    pub page: PageSettings,
    pub presentation: PresentationSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_path_override() {
        let var = "QUALIFICATION_DASHBOARD_TEST_PATH";
        // SAFETY: the variable name is used by this test only
        unsafe { std::env::set_var(var, "/data/custom_stats.csv") };
        assert_eq!(env_path(var, "fallback.csv"), PathBuf::from("/data/custom_stats.csv"));

        unsafe { std::env::remove_var(var) };
        assert_eq!(env_path(var, "fallback.csv"), PathBuf::from("fallback.csv"));
    }

    #[test]
    fn test_presentation_defaults() {
        let config = AppConfig::new();
        assert_eq!(config.presentation.default_layout, TableLayoutKind::Split);
        assert_eq!(config.presentation.gd_order, GdOrder::Ascending);
    }
}
