use serde::Serialize;

use crate::config::formats::FormatTable;
use crate::config::settings::TableLayoutKind;
use crate::domain::{Column, MatchupTable};

/// Title and column list of one rendered table
#[derive(Debug, Clone)]
pub struct ViewSpec {
    pub title: &'static str,
    pub columns: Vec<Column>,
}

/// A table presenter configuration: which views, and how cells are formatted
#[derive(Debug, Clone)]
pub struct TableLayout {
    pub views: Vec<ViewSpec>,
    pub formats: FormatTable,
}

impl TableLayout {
    pub fn for_kind(kind: TableLayoutKind) -> Self {
        match kind {
            TableLayoutKind::Combined => Self::combined(),
            TableLayoutKind::Split => Self::split(),
        }
    }

    pub fn combined() -> Self {
        Self {
            views: vec![ViewSpec {
                title: "Qualification Summary",
                columns: Column::ALL.to_vec(),
            }],
            formats: FormatTable::combined(),
        }
    }

    pub fn split() -> Self {
        Self {
            views: vec![
                ViewSpec {
                    title: "1st Leg",
                    columns: vec![
                        Column::Team1,
                        Column::Team2,
                        Column::Leg1WinPctT1,
                        Column::Leg1DrawPct,
                        Column::Leg1WinPctT2,
                    ],
                },
                ViewSpec {
                    title: "2nd Leg",
                    columns: vec![
                        Column::Team1,
                        Column::Team2,
                        Column::Leg2WinPctT1,
                        Column::Leg2DrawPct,
                        Column::Leg2WinPctT2,
                    ],
                },
                ViewSpec {
                    title: "Overall",
                    columns: vec![
                        Column::Team1,
                        Column::Team2,
                        Column::Team1WinPct,
                        Column::Team2WinPct,
                        Column::Team1Elo,
                        Column::Team2Elo,
                    ],
                },
            ],
            formats: FormatTable::split(),
        }
    }
}

/// Display-ready table: every cell already formatted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn present_tables(table: &MatchupTable, layout: &TableLayout) -> Vec<TableView> {
    layout
        .views
        .iter()
        .map(|view| TableView {
            title: view.title.to_string(),
            headers: view.columns.iter().map(|c| c.header().to_string()).collect(),
            rows: table
                .iter()
                .map(|row| {
                    view.columns
                        .iter()
                        .map(|c| layout.formats.format(row.cell(*c), *c))
                        .collect()
                })
                .collect(),
        })
        .collect()
}
