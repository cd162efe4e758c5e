use log::warn;
use serde::Serialize;

use crate::config::settings::GdOrder;
use crate::domain::{
    Column, MatchupTable, QualificationRow, QualificationTable, GD_HEADER, TEAM1_QUAL_HEADER,
    TEAM2_QUAL_HEADER,
};

pub const ELO_TITLE: &str = "Elo Comparison (Team 1 vs Team 2)";
pub const QUAL_TITLE: &str = "How 1st Leg Scorelines Shape Qualification Odds";
pub const QUAL_AXIS_LABEL: &str = "Qualification %";

/// Plasma, dark to bright
const COLOR_STOPS: [(u8, u8, u8); 10] = [
    (0x0d, 0x08, 0x87),
    (0x46, 0x03, 0x9f),
    (0x72, 0x01, 0xa8),
    (0x9c, 0x17, 0x9e),
    (0xbd, 0x37, 0x86),
    (0xd8, 0x57, 0x6b),
    (0xed, 0x79, 0x53),
    (0xfb, 0x9f, 0x3a),
    (0xfd, 0xca, 0x26),
    (0xf0, 0xf9, 0x21),
];

pub const SERIES_COLORS: [&str; 2] = ["#636efa", "#ef553b"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub ticks: Vec<f64>,
}

impl Axis {
    /// Axis over `[lo, hi]` widened to round tick values
    pub fn nice(label: &str, lo: f64, hi: f64) -> Self {
        let (lo, hi) = if hi > lo {
            (lo, hi)
        } else if lo == 0.0 {
            (0.0, 1.0)
        } else {
            (lo - lo.abs() * 0.05, hi + hi.abs() * 0.05)
        };
        let step = nice_step((hi - lo) / 5.0);
        let min = (lo / step).floor() * step;
        let max = (hi / step).ceil() * step;
        let count = ((max - min) / step).round() as usize;
        Self {
            label: label.to_string(),
            min,
            max,
            ticks: (0..=count).map(|i| min + i as f64 * step).collect(),
        }
    }

    /// Position of `value` as a fraction of the axis span
    pub fn fraction(&self, value: f64) -> f64 {
        if self.max > self.min {
            (value - self.min) / (self.max - self.min)
        } else {
            0.0
        }
    }
}

fn nice_step(rough: f64) -> f64 {
    let magnitude = 10f64.powf(rough.log10().floor());
    let normalized = rough / magnitude;
    let factor = if normalized < 1.5 {
        1.0
    } else if normalized < 3.0 {
        2.0
    } else if normalized < 7.0 {
        5.0
    } else {
        10.0
    };
    factor * magnitude
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorScale {
    pub label: String,
    pub min: f64,
    pub max: f64,
}

impl ColorScale {
    pub fn color_for(&self, value: f64) -> String {
        let t = if self.max > self.min {
            ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
        } else {
            0.5
        };
        interpolate(t)
    }

    /// Evenly spaced gradient stops for the legend, as (offset, color)
    pub fn gradient(&self) -> Vec<(f64, String)> {
        let last = (COLOR_STOPS.len() - 1) as f64;
        (0..COLOR_STOPS.len())
            .map(|i| {
                let t = i as f64 / last;
                (t, interpolate(t))
            })
            .collect()
    }
}

fn interpolate(t: f64) -> String {
    let scaled = t * (COLOR_STOPS.len() - 1) as f64;
    let index = (scaled.floor() as usize).min(COLOR_STOPS.len() - 2);
    let local = scaled - index as f64;
    let (a, b) = (COLOR_STOPS[index], COLOR_STOPS[index + 1]);
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * local).round() as u8;
    format!("#{:02x}{:02x}{:02x}", mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub color_value: f64,
    pub color: String,
    pub team1: String,
    pub team2: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterChart {
    pub title: String,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub color_scale: ColorScale,
    pub points: Vec<ScatterPoint>,
}

/// One point per matchup: Team 1 Elo against Team 2 Elo, colored by Team 1 Win %
pub fn render_elo_scatter(table: &MatchupTable) -> ScatterChart {
    let xs = table.iter().map(|r| r.team1_elo);
    let ys = table.iter().map(|r| r.team2_elo);
    let cs = table.iter().map(|r| r.team1_win_pct);

    let (x_lo, x_hi) = bounds(xs).unwrap_or((1000.0, 2200.0));
    let (y_lo, y_hi) = bounds(ys).unwrap_or((1000.0, 2200.0));
    let (c_lo, c_hi) = bounds(cs).unwrap_or((0.0, 100.0));

    let color_scale = ColorScale {
        label: Column::Team1WinPct.header().to_string(),
        min: c_lo,
        max: c_hi,
    };
    let points = table
        .iter()
        .map(|row| ScatterPoint {
            x: row.team1_elo,
            y: row.team2_elo,
            color_value: row.team1_win_pct,
            color: color_scale.color_for(row.team1_win_pct),
            team1: row.team1.clone(),
            team2: row.team2.clone(),
        })
        .collect();

    ScatterChart {
        title: ELO_TITLE.to_string(),
        x_axis: Axis::nice(Column::Team1Elo.header(), x_lo, x_hi),
        y_axis: Axis::nice(Column::Team2Elo.header(), y_lo, y_hi),
        color_scale,
        points,
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarGroup {
    pub label: String,
    /// One value per series, in series order
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_axis: Axis,
    pub series: Vec<Series>,
    pub groups: Vec<BarGroup>,
}

impl BarChart {
    pub fn bar_count(&self) -> usize {
        self.groups.iter().map(|g| g.values.len()).sum()
    }
}

/// Buckets in display order. Duplicate labels keep their first row.
pub fn ordered_buckets(table: &QualificationTable, order: GdOrder) -> Vec<&QualificationRow> {
    let mut rows: Vec<&QualificationRow> = Vec::with_capacity(table.len());
    for row in table.iter() {
        if rows.iter().any(|r| r.leg1_gd.label == row.leg1_gd.label) {
            warn!("Duplicate goal difference bucket '{}' ignored", row.leg1_gd.label);
            continue;
        }
        rows.push(row);
    }
    if order == GdOrder::Ascending {
        // Stable: non-numeric labels stay in file order after the numeric ones
        rows.sort_by_key(|r| (r.leg1_gd.value.is_none(), r.leg1_gd.value));
    }
    rows
}

/// Grouped bars: Team 1 and Team 2 qualification side by side per bucket
pub fn render_qual_bar_chart(table: &QualificationTable, order: GdOrder) -> BarChart {
    let groups: Vec<BarGroup> = ordered_buckets(table, order)
        .into_iter()
        .map(|row| BarGroup {
            label: row.leg1_gd.label.clone(),
            values: vec![row.team1_qual_pct, row.team2_qual_pct],
        })
        .collect();

    let peak = groups
        .iter()
        .flat_map(|g| g.values.iter().copied())
        .fold(0.0, f64::max);
    let floor = groups
        .iter()
        .flat_map(|g| g.values.iter().copied())
        .fold(0.0, f64::min);

    BarChart {
        title: QUAL_TITLE.to_string(),
        x_label: GD_HEADER.to_string(),
        y_axis: Axis::nice(QUAL_AXIS_LABEL, floor, peak.max(1.0)),
        series: vec![
            Series {
                name: TEAM1_QUAL_HEADER.to_string(),
                color: SERIES_COLORS[0].to_string(),
            },
            Series {
                name: TEAM2_QUAL_HEADER.to_string(),
                color: SERIES_COLORS[1].to_string(),
            },
        ],
        groups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GdBucket, MatchupRow};

    fn gd_row(label: &str, team1: f64, team2: f64) -> QualificationRow {
        QualificationRow {
            leg1_gd: GdBucket::parse(label),
            team1_qual_pct: team1,
            team2_qual_pct: team2,
        }
    }

    fn matchup(team1: &str, team2: &str, elo1: f64, elo2: f64, win1: f64) -> MatchupRow {
        MatchupRow {
            team1: team1.to_string(),
            team2: team2.to_string(),
            team1_win_pct: win1,
            team2_win_pct: 100.0 - win1,
            team1_elo: elo1,
            team2_elo: elo2,
            leg1_win_pct_t1: 40.0,
            leg1_draw_pct: 30.0,
            leg1_win_pct_t2: 30.0,
            leg2_win_pct_t1: 35.0,
            leg2_draw_pct: 25.0,
            leg2_win_pct_t2: 40.0,
        }
    }

    #[test]
    fn test_three_buckets_six_bars() {
        let table = QualificationTable::new(vec![
            gd_row("-2", 30.0, 70.0),
            gd_row("0", 50.0, 50.0),
            gd_row("2", 70.0, 30.0),
        ]);
        let chart = render_qual_bar_chart(&table, GdOrder::Ascending);

        assert_eq!(chart.groups.len(), 3);
        assert_eq!(chart.bar_count(), 6);
        let even = &chart.groups[1];
        assert_eq!(even.label, "0");
        assert_eq!(even.values[0], even.values[1]);
        assert_eq!(chart.y_axis.label, "Qualification %");
    }

    #[test]
    fn test_buckets_sorted_ascending() {
        let table = QualificationTable::new(vec![
            gd_row("2", 70.0, 30.0),
            gd_row("3+", 90.0, 10.0),
            gd_row("-2", 30.0, 70.0),
            gd_row("0", 50.0, 50.0),
        ]);
        let labels = |order| -> Vec<String> {
            render_qual_bar_chart(&table, order)
                .groups
                .into_iter()
                .map(|g| g.label)
                .collect()
        };
        assert_eq!(labels(GdOrder::Ascending), vec!["-2", "0", "2", "3+"]);
        assert_eq!(labels(GdOrder::FileOrder), vec!["2", "3+", "-2", "0"]);
    }

    #[test]
    fn test_duplicate_bucket_keeps_first() {
        let table = QualificationTable::new(vec![gd_row("1", 60.0, 40.0), gd_row("1", 10.0, 90.0)]);
        let chart = render_qual_bar_chart(&table, GdOrder::FileOrder);
        assert_eq!(chart.groups.len(), 1);
        assert_eq!(chart.groups[0].values, vec![60.0, 40.0]);
    }

    #[test]
    fn test_scatter_one_point_per_row() {
        let table = MatchupTable::new(vec![
            matchup("England", "Spain", 2000.0, 1950.0, 55.0),
            matchup("Porto", "Inter", 1800.0, 1900.0, 40.0),
        ]);
        let chart = render_elo_scatter(&table);

        assert_eq!(chart.points.len(), 2);
        assert_eq!(chart.points[0].x, 2000.0);
        assert_eq!(chart.points[0].y, 1950.0);
        assert_eq!(chart.points[1].team2, "Inter");
        assert_eq!(chart.color_scale.min, 40.0);
        assert_eq!(chart.color_scale.max, 55.0);
        assert_eq!(chart.points[1].color, "#0d0887");
        assert_eq!(chart.points[0].color, "#f0f921");
        assert!(chart.x_axis.min <= 1800.0 && chart.x_axis.max >= 2000.0);
    }

    #[test]
    fn test_scatter_empty_table() {
        let chart = render_elo_scatter(&MatchupTable::default());
        assert!(chart.points.is_empty());
        assert!(!chart.x_axis.ticks.is_empty());
    }

    #[test]
    fn test_single_value_color_is_midpoint() {
        let scale = ColorScale {
            label: "Team 1 Win %".to_string(),
            min: 55.0,
            max: 55.0,
        };
        assert_eq!(scale.color_for(55.0), interpolate(0.5));
    }

    #[test]
    fn test_nice_axis() {
        let axis = Axis::nice("x", 1012.0, 1987.0);
        assert_eq!(axis.min, 1000.0);
        assert_eq!(axis.max, 2000.0);
        assert_eq!(axis.ticks.len(), 6);

        let flat = Axis::nice("y", 2000.0, 2000.0);
        assert!(flat.min < 2000.0 && flat.max > 2000.0);
    }
}
