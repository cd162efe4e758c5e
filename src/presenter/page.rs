//! Full dashboard page.
//!
//! The page is a pure function of the loaded tables and the query. Changing
//! the sidebar selection submits the form, which re-renders everything.

use chrono::{DateTime, Utc};

use super::chart::{render_elo_scatter, render_qual_bar_chart};
use super::svg::{bar_svg, escape, scatter_svg};
use super::table::{present_tables, TableLayout, TableView};
use crate::config::settings::{AppConfig, TableLayoutKind};
use crate::errors::DataError;
use crate::filter::{apply_filter, team_options, TeamSelection};
use crate::loader::DashboardData;

/// Everything a render depends on besides the data
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardQuery {
    pub team: TeamSelection,
    pub layout: TableLayoutKind,
}

impl DashboardQuery {
    pub fn new(team: TeamSelection, layout: TableLayoutKind) -> Self {
        Self { team, layout }
    }
}

#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub html: String,
    /// False when a missing input replaced the page with an error
    pub complete: bool,
}

pub fn render_dashboard(
    config: &AppConfig,
    data: &DashboardData,
    query: &DashboardQuery,
) -> RenderedPage {
    if let Some(error) = data.page_error() {
        return RenderedPage {
            html: shell(config, &error_page(error)),
            complete: false,
        };
    }

    let filtered = data
        .matchups
        .as_ref()
        .map(|table| apply_filter(table, &query.team));
    let options = match &data.matchups {
        Ok(table) => team_options(table),
        Err(_) => team_options(&Default::default()),
    };

    let tables = match &filtered {
        Ok(table) => tables_section(&present_tables(table, &TableLayout::for_kind(query.layout))),
        Err(e) => error_panel(e),
    };
    let scatter = match &filtered {
        Ok(table) => scatter_svg(&render_elo_scatter(table)),
        Err(e) => error_panel(e),
    };
    let bars = match &data.qualification {
        Ok(table) => bar_svg(&render_qual_bar_chart(table, config.presentation.gd_order)),
        Err(e) => error_panel(e),
    };

    let body = format!(
        r#"<aside class="sidebar">{sidebar}</aside>
<main class="content">
    <h1>{heading}</h1>
    <p class="description">{description}</p>
    <section class="section">
        <h2>📋 Qualification Summary</h2>
        {tables}
    </section>
    <section class="section">
        <h2>📈 Elo Ratings (1st Leg)</h2>
        {scatter}
    </section>
    <section class="section">
        <h2>🎯 Qualification Odds by 1st Leg Goal Difference</h2>
        {bars}
    </section>
    {footer}
</main>"#,
        sidebar = sidebar(config, &options, query),
        heading = escape(config.page.heading),
        description = escape(config.page.description),
        tables = tables,
        scatter = scatter,
        bars = bars,
        footer = footer(data.loaded_at),
    );

    RenderedPage {
        html: shell(config, &body),
        complete: true,
    }
}

fn shell(config: &AppConfig, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
<div class="layout">
{body}
</div>
</body>
</html>"#,
        title = escape(config.page.page_title),
        css = inline_css(),
        body = body,
    )
}

fn sidebar(config: &AppConfig, options: &[String], query: &DashboardQuery) -> String {
    let selected = query.team.label();
    let unlisted = (!options.iter().any(|team| team == selected)).then(|| selected.to_string());
    let options_html: String = options
        .iter()
        .chain(unlisted.iter())
        .map(|team| {
            format!(
                r#"<option value="{value}"{selected}>{value}</option>"#,
                value = escape(team),
                selected = if team == selected { " selected" } else { "" },
            )
        })
        .collect();
    let layout = match query.layout {
        TableLayoutKind::Combined => "combined",
        TableLayoutKind::Split => "split",
    };

    format!(
        r#"<form method="get" action="/">
    <label for="team">{label}</label>
    <select id="team" name="team" onchange="this.form.submit()">{options_html}</select>
    <input type="hidden" name="layout" value="{layout}">
    <noscript><button type="submit">Apply</button></noscript>
</form>"#,
        label = escape(config.page.filter_label),
    )
}

fn tables_section(views: &[TableView]) -> String {
    views.iter().map(table_html).collect::<Vec<_>>().join("\n")
}

fn table_html(view: &TableView) -> String {
    let headers: String = view
        .headers
        .iter()
        .map(|h| format!("<th>{}</th>", escape(h)))
        .collect();
    let rows: String = if view.rows.is_empty() {
        format!(
            r#"<tr><td class="empty" colspan="{}">No matchups</td></tr>"#,
            view.headers.len()
        )
    } else {
        view.rows
            .iter()
            .map(|row| {
                let cells: String = row
                    .iter()
                    .map(|cell| format!("<td>{}</td>", escape(cell)))
                    .collect();
                format!("<tr>{cells}</tr>")
            })
            .collect()
    };

    format!(
        r#"<div class="table-view">
    <h3>{title}</h3>
    <table>
        <thead><tr>{headers}</tr></thead>
        <tbody>{rows}</tbody>
    </table>
</div>"#,
        title = escape(&view.title),
    )
}

fn error_panel(error: &DataError) -> String {
    format!(
        r#"<div class="error"><strong>{kind}</strong> {message}</div>"#,
        kind = error.kind(),
        message = escape(&error.to_string()),
    )
}

fn error_page(error: &DataError) -> String {
    format!(
        r#"<main class="content">
    <h1>Dashboard unavailable</h1>
    {panel}
</main>"#,
        panel = error_panel(error),
    )
}

fn footer(loaded_at: DateTime<Utc>) -> String {
    format!(
        r#"<footer class="footer">Data loaded {}</footer>"#,
        loaded_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

fn inline_css() -> &'static str {
    r#"
body { margin: 0; font-family: -apple-system, "Segoe UI", Roboto, sans-serif; color: #262730; }
.layout { display: flex; min-height: 100vh; }
.sidebar { width: 240px; padding: 24px; background: #f0f2f6; }
.sidebar label { display: block; font-size: 14px; margin-bottom: 8px; }
.sidebar select { width: 100%; padding: 6px; }
.content { flex: 1; padding: 24px 48px; max-width: 1100px; }
.description { color: #555; }
.section { margin-top: 32px; }
.table-view { margin-bottom: 24px; overflow-x: auto; }
table { border-collapse: collapse; font-size: 14px; }
th, td { border: 1px solid #e6e9ef; padding: 4px 10px; text-align: right; }
th { background: #fafafa; }
td:first-child, td:nth-child(2), th:first-child, th:nth-child(2) { text-align: left; }
td.empty { text-align: center; color: #888; }
.chart { width: 100%; height: auto; font-size: 12px; }
.chart .grid { stroke: #e6e9ef; }
.chart-title { font-size: 16px; }
.chart .empty-note { fill: #888; }
.error { padding: 12px 16px; background: #ffecec; color: #7d1a1a; border-radius: 4px; }
.footer { margin-top: 40px; font-size: 12px; color: #888; }
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GdBucket, MatchupRow, MatchupTable, QualificationRow, QualificationTable};
    use std::path::PathBuf;

    fn data() -> DashboardData {
        DashboardData::new(
            Ok(MatchupTable::new(vec![MatchupRow {
                team1: "England".to_string(),
                team2: "Spain".to_string(),
                team1_win_pct: 55.0,
                team2_win_pct: 45.0,
                team1_elo: 2000.0,
                team2_elo: 1950.0,
                leg1_win_pct_t1: 40.0,
                leg1_draw_pct: 30.0,
                leg1_win_pct_t2: 30.0,
                leg2_win_pct_t1: 35.0,
                leg2_draw_pct: 25.0,
                leg2_win_pct_t2: 40.0,
            }])),
            Ok(QualificationTable::new(vec![QualificationRow {
                leg1_gd: GdBucket::parse("0"),
                team1_qual_pct: 50.0,
                team2_qual_pct: 50.0,
            }])),
        )
    }

    fn query(team: &str) -> DashboardQuery {
        DashboardQuery::new(TeamSelection::from_param(Some(team)), TableLayoutKind::Split)
    }

    #[test]
    fn test_page_contains_sections() {
        let page = render_dashboard(&AppConfig::new(), &data(), &query("All"));
        assert!(page.complete);
        assert!(page.html.contains("🏆 Two-Leg Qualification Simulation Dashboard"));
        assert!(page.html.contains("🔍 Filter by team"));
        assert!(page.html.contains(r#"<option value="All" selected>All</option>"#));
        assert!(page.html.contains(r#"<option value="Spain">Spain</option>"#));
        assert_eq!(page.html.matches("<circle").count(), 1);
        assert_eq!(page.html.matches(r#"class="bar""#).count(), 2);
        assert_eq!(page.html.matches(r#"<div class="table-view">"#).count(), 3);
    }

    #[test]
    fn test_absent_team_renders_empty_views() {
        let page = render_dashboard(&AppConfig::new(), &data(), &query("France"));
        assert!(page.complete);
        assert_eq!(page.html.matches("No matchups").count(), 3);
        assert_eq!(page.html.matches("<circle").count(), 0);
        assert!(page.html.contains(r#"<option value="France" selected>France</option>"#));
        assert!(!page.html.contains(r#"<option value="All" selected>"#));
    }

    #[test]
    fn test_missing_file_replaces_page() {
        let data = DashboardData::new(
            Err(DataError::MissingFile {
                path: PathBuf::from("qualification_stats.csv"),
            }),
            data().qualification,
        );
        let page = render_dashboard(&AppConfig::new(), &data, &query("All"));
        assert!(!page.complete);
        assert!(page.html.contains("MissingFileError"));
        assert!(!page.html.contains("<svg"));
    }

    #[test]
    fn test_schema_error_only_hides_dependent_sections() {
        let data = DashboardData::new(
            data().matchups,
            Err(DataError::MalformedRow {
                source_name: "qualification_by_gd.csv".to_string(),
                line: 2,
                expected: 3,
                found: 2,
            }),
        );
        let page = render_dashboard(&AppConfig::new(), &data, &query("All"));
        assert!(page.complete);
        assert!(page.html.contains("MalformedRowError"));
        assert_eq!(page.html.matches("<circle").count(), 1);
        assert_eq!(page.html.matches(r#"class="bar""#).count(), 0);
    }

    #[test]
    fn test_team_names_are_escaped() {
        let mut data = data();
        if let Ok(table) = data.matchups.as_mut() {
            table.rows[0].team1 = "<script>".to_string();
        }
        let page = render_dashboard(&AppConfig::new(), &data, &query("All"));
        assert!(!page.html.contains("<script>"));
        assert!(page.html.contains("&lt;script&gt;"));
    }
}
