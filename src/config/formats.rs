use crate::domain::{Cell, Column};

/// How one column is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatSpec {
    /// Fixed decimals followed by `%`
    Percent { decimals: usize },
    /// Fixed decimals, no suffix
    Fixed { decimals: usize },
    /// Shortest round-trip representation
    Plain,
}

impl FormatSpec {
    pub fn apply(&self, value: f64) -> String {
        match *self {
            FormatSpec::Percent { decimals } => format!("{:.*}%", decimals, value),
            FormatSpec::Fixed { decimals } => format!("{:.*}", decimals, value),
            FormatSpec::Plain => format!("{}", value),
        }
    }
}

/// Column to format mapping handed to the table presenter
#[derive(Debug, Clone, Default)]
pub struct FormatTable {
    entries: Vec<(Column, FormatSpec)>,
}

impl FormatTable {
    pub fn new(entries: Vec<(Column, FormatSpec)>) -> Self {
        Self { entries }
    }

    pub fn spec(&self, column: Column) -> FormatSpec {
        self.entries
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, spec)| *spec)
            .unwrap_or(FormatSpec::Plain)
    }

    pub fn format(&self, cell: Cell<'_>, column: Column) -> String {
        match cell {
            Cell::Text(text) => text.to_string(),
            Cell::Number(value) => self.spec(column).apply(value),
        }
    }

    /// Every percentage column at one decimal; Elo left as is
    pub fn combined() -> Self {
        Self::new(
            PERCENT_COLUMNS
                .iter()
                .map(|c| (*c, FormatSpec::Percent { decimals: 1 }))
                .collect(),
        )
    }

    /// Percentages at one decimal, Elo rounded to whole points
    pub fn split() -> Self {
        let mut table = Self::combined();
        table
            .entries
            .push((Column::Team1Elo, FormatSpec::Fixed { decimals: 0 }));
        table
            .entries
            .push((Column::Team2Elo, FormatSpec::Fixed { decimals: 0 }));
        table
    }
}

const PERCENT_COLUMNS: [Column; 8] = [
    Column::Team1WinPct,
    Column::Team2WinPct,
    Column::Leg1WinPctT1,
    Column::Leg1DrawPct,
    Column::Leg1WinPctT2,
    Column::Leg2WinPctT1,
    Column::Leg2DrawPct,
    Column::Leg2WinPctT2,
];
