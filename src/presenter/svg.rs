//! Inline SVG output for the chart models.
//!
//! Charts are drawn into a fixed viewBox and scale with the page width.

use std::fmt::Write as _;

use super::chart::{Axis, BarChart, ScatterChart};

const WIDTH: f64 = 760.0;
const HEIGHT: f64 = 440.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 150.0;
const MARGIN_TOP: f64 = 46.0;
const MARGIN_BOTTOM: f64 = 60.0;
const POINT_RADIUS: f64 = 6.0;

/// Plot area in SVG coordinates
struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl Frame {
    fn new() -> Self {
        Self {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: WIDTH - MARGIN_LEFT - MARGIN_RIGHT,
            height: HEIGHT - MARGIN_TOP - MARGIN_BOTTOM,
        }
    }

    fn x(&self, axis: &Axis, value: f64) -> f64 {
        self.left + axis.fraction(value) * self.width
    }

    fn y(&self, axis: &Axis, value: f64) -> f64 {
        self.top + self.height - axis.fraction(value) * self.height
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn tick_label(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", (value * 100.0).round() / 100.0)
    }
}

fn open_svg(out: &mut String, class: &str, title: &str) {
    let _ = write!(
        out,
        r#"<svg class="chart {class}" viewBox="0 0 {WIDTH} {HEIGHT}" role="img" aria-label="{title}">"#,
        class = class,
        title = escape(title),
    );
    let _ = write!(
        out,
        r#"<text class="chart-title" x="{x}" y="24">{title}</text>"#,
        x = MARGIN_LEFT,
        title = escape(title),
    );
}

fn y_axis(out: &mut String, frame: &Frame, axis: &Axis) {
    for tick in &axis.ticks {
        let y = frame.y(axis, *tick);
        let _ = write!(
            out,
            r#"<line class="grid" x1="{x1:.1}" y1="{y:.1}" x2="{x2:.1}" y2="{y:.1}"/><text class="tick" x="{tx:.1}" y="{ty:.1}" text-anchor="end">{label}</text>"#,
            x1 = frame.left,
            x2 = frame.right(),
            tx = frame.left - 8.0,
            ty = y + 4.0,
            label = tick_label(*tick),
        );
    }
    let _ = write!(
        out,
        r#"<text class="axis-label" transform="translate(18 {cy:.1}) rotate(-90)" text-anchor="middle">{label}</text>"#,
        cy = frame.top + frame.height / 2.0,
        label = escape(&axis.label),
    );
}

fn x_label(out: &mut String, frame: &Frame, label: &str) {
    let _ = write!(
        out,
        r#"<text class="axis-label" x="{cx:.1}" y="{y:.1}" text-anchor="middle">{label}</text>"#,
        cx = frame.left + frame.width / 2.0,
        y = HEIGHT - 14.0,
        label = escape(label),
    );
}

fn empty_note(out: &mut String, frame: &Frame) {
    let _ = write!(
        out,
        r#"<text class="empty-note" x="{cx:.1}" y="{cy:.1}" text-anchor="middle">No data</text>"#,
        cx = frame.left + frame.width / 2.0,
        cy = frame.top + frame.height / 2.0,
    );
}

pub fn scatter_svg(chart: &ScatterChart) -> String {
    let frame = Frame::new();
    let mut out = String::new();
    open_svg(&mut out, "scatter", &chart.title);

    y_axis(&mut out, &frame, &chart.y_axis);
    for tick in &chart.x_axis.ticks {
        let x = frame.x(&chart.x_axis, *tick);
        let _ = write!(
            out,
            r#"<line class="grid" x1="{x:.1}" y1="{y1:.1}" x2="{x:.1}" y2="{y2:.1}"/><text class="tick" x="{x:.1}" y="{ty:.1}" text-anchor="middle">{label}</text>"#,
            y1 = frame.top,
            y2 = frame.bottom(),
            ty = frame.bottom() + 18.0,
            label = tick_label(*tick),
        );
    }
    x_label(&mut out, &frame, &chart.x_axis.label);

    if chart.points.is_empty() {
        empty_note(&mut out, &frame);
    }
    for point in &chart.points {
        let _ = write!(
            out,
            r#"<circle class="point" cx="{cx:.1}" cy="{cy:.1}" r="{POINT_RADIUS}" fill="{fill}"><title>{team1} vs {team2} ({label}: {value:.1})</title></circle>"#,
            cx = frame.x(&chart.x_axis, point.x),
            cy = frame.y(&chart.y_axis, point.y),
            fill = point.color,
            team1 = escape(&point.team1),
            team2 = escape(&point.team2),
            label = escape(&chart.color_scale.label),
            value = point.color_value,
        );
    }

    color_bar(&mut out, &frame, chart);
    out.push_str("</svg>");
    out
}

fn color_bar(out: &mut String, frame: &Frame, chart: &ScatterChart) {
    let scale = &chart.color_scale;
    let x = frame.right() + 40.0;
    let _ = write!(out, r#"<defs><linearGradient id="colorbar" x1="0" y1="1" x2="0" y2="0">"#);
    for (offset, color) in scale.gradient() {
        let _ = write!(
            out,
            r#"<stop offset="{pct:.0}%" stop-color="{color}"/>"#,
            pct = offset * 100.0,
        );
    }
    let _ = write!(
        out,
        r#"</linearGradient></defs><rect x="{x:.1}" y="{y:.1}" width="16" height="{h:.1}" fill="url(#colorbar)"/>"#,
        y = frame.top,
        h = frame.height,
    );
    let _ = write!(
        out,
        r#"<text class="tick" x="{lx:.1}" y="{top:.1}">{max:.1}</text><text class="tick" x="{lx:.1}" y="{bottom:.1}">{min:.1}</text><text class="axis-label" x="{x:.1}" y="{ly:.1}">{label}</text>"#,
        lx = x + 22.0,
        top = frame.top + 10.0,
        bottom = frame.bottom(),
        max = scale.max,
        min = scale.min,
        ly = frame.top - 10.0,
        label = escape(&scale.label),
    );
}

pub fn bar_svg(chart: &BarChart) -> String {
    let frame = Frame::new();
    let mut out = String::new();
    open_svg(&mut out, "bars", &chart.title);

    y_axis(&mut out, &frame, &chart.y_axis);
    x_label(&mut out, &frame, &chart.x_label);

    if chart.groups.is_empty() {
        empty_note(&mut out, &frame);
    }

    let slot = frame.width / chart.groups.len().max(1) as f64;
    let series = chart.series.len().max(1) as f64;
    let bar_width = slot * 0.8 / series;
    let baseline = frame.y(&chart.y_axis, 0.0_f64.max(chart.y_axis.min));

    for (g, group) in chart.groups.iter().enumerate() {
        let start = frame.left + g as f64 * slot + slot * 0.1;
        for (s, value) in group.values.iter().enumerate() {
            let top = frame.y(&chart.y_axis, *value);
            let (y, height) = if top <= baseline {
                (top, baseline - top)
            } else {
                (baseline, top - baseline)
            };
            let name = chart.series.get(s).map(|x| x.name.as_str()).unwrap_or_default();
            let color = chart.series.get(s).map(|x| x.color.as_str()).unwrap_or("#888");
            let _ = write!(
                out,
                r#"<rect class="bar" x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{height:.1}" fill="{color}"><title>{gd} {group}: {name} {value:.1}</title></rect>"#,
                x = start + s as f64 * bar_width,
                w = bar_width,
                gd = escape(&chart.x_label),
                group = escape(&group.label),
                name = escape(name),
            );
        }
        let _ = write!(
            out,
            r#"<text class="tick" x="{cx:.1}" y="{y:.1}" text-anchor="middle">{label}</text>"#,
            cx = frame.left + g as f64 * slot + slot / 2.0,
            y = frame.bottom() + 18.0,
            label = escape(&group.label),
        );
    }

    for (s, entry) in chart.series.iter().enumerate() {
        let y = frame.top + s as f64 * 22.0;
        let _ = write!(
            out,
            r#"<rect x="{x:.1}" y="{y:.1}" width="12" height="12" fill="{color}"/><text class="legend" x="{tx:.1}" y="{ty:.1}">{name}</text>"#,
            x = frame.right() + 12.0,
            color = entry.color,
            tx = frame.right() + 30.0,
            ty = y + 10.0,
            name = escape(&entry.name),
        );
    }

    out.push_str("</svg>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::GdOrder;
    use crate::domain::{GdBucket, MatchupTable, QualificationRow, QualificationTable};
    use crate::presenter::chart::{render_elo_scatter, render_qual_bar_chart};

    #[test]
    fn test_escape() {
        assert_eq!(escape("<a & \"b\">"), "&lt;a &amp; &quot;b&quot;&gt;");
    }

    #[test]
    fn test_bar_svg_draws_every_bar() {
        let table = QualificationTable::new(
            [(-2, 30.0, 70.0), (0, 50.0, 50.0), (2, 70.0, 30.0)]
                .into_iter()
                .map(|(gd, t1, t2)| QualificationRow {
                    leg1_gd: GdBucket::parse(&gd.to_string()),
                    team1_qual_pct: t1,
                    team2_qual_pct: t2,
                })
                .collect(),
        );
        let svg = bar_svg(&render_qual_bar_chart(&table, GdOrder::Ascending));
        assert_eq!(svg.matches(r#"class="bar""#).count(), 6);
        assert!(svg.contains("Qualification %"));
    }

    #[test]
    fn test_empty_scatter_svg() {
        let svg = scatter_svg(&render_elo_scatter(&MatchupTable::default()));
        assert_eq!(svg.matches("<circle").count(), 0);
        assert!(svg.contains("No data"));
    }
}
