pub mod chart;
pub mod page;
pub mod svg;
pub mod table;

pub use chart::{render_elo_scatter, render_qual_bar_chart, BarChart, ScatterChart};
pub use page::{render_dashboard, DashboardQuery};
pub use table::{present_tables, TableLayout, TableView};
