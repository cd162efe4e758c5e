use serde::Serialize;

/// Columns of `qualification_stats.csv`, in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Team1,
    Team2,
    Team1WinPct,
    Team2WinPct,
    Team1Elo,
    Team2Elo,
    Leg1WinPctT1,
    Leg1DrawPct,
    Leg1WinPctT2,
    Leg2WinPctT1,
    Leg2DrawPct,
    Leg2WinPctT2,
}

impl Column {
    pub const ALL: [Column; 12] = [
        Column::Team1,
        Column::Team2,
        Column::Team1WinPct,
        Column::Team2WinPct,
        Column::Team1Elo,
        Column::Team2Elo,
        Column::Leg1WinPctT1,
        Column::Leg1DrawPct,
        Column::Leg1WinPctT2,
        Column::Leg2WinPctT1,
        Column::Leg2DrawPct,
        Column::Leg2WinPctT2,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            Column::Team1 => "Team 1",
            Column::Team2 => "Team 2",
            Column::Team1WinPct => "Team 1 Win %",
            Column::Team2WinPct => "Team 2 Win %",
            Column::Team1Elo => "Team 1 Elo",
            Column::Team2Elo => "Team 2 Elo",
            Column::Leg1WinPctT1 => "1st Leg Win % T1",
            Column::Leg1DrawPct => "1st Leg Draw %",
            Column::Leg1WinPctT2 => "1st Leg Win % T2",
            Column::Leg2WinPctT1 => "2nd Leg Win % T1",
            Column::Leg2DrawPct => "2nd Leg Draw %",
            Column::Leg2WinPctT2 => "2nd Leg Win % T2",
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, Column::Team1 | Column::Team2)
    }
}

pub const GD_HEADER: &str = "1st Leg GD";
pub const TEAM1_QUAL_HEADER: &str = "Team 1 Qualification %";
pub const TEAM2_QUAL_HEADER: &str = "Team 2 Qualification %";

/// A single cell, borrowed from a row
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
}

/// One matchup: Team 1 hosts the first leg, Team 2 the second
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupRow {
    pub team1: String,
    pub team2: String,
    pub team1_win_pct: f64,
    pub team2_win_pct: f64,
    pub team1_elo: f64,
    pub team2_elo: f64,
    pub leg1_win_pct_t1: f64,
    pub leg1_draw_pct: f64,
    pub leg1_win_pct_t2: f64,
    pub leg2_win_pct_t1: f64,
    pub leg2_draw_pct: f64,
    pub leg2_win_pct_t2: f64,
}

impl MatchupRow {
    pub fn cell(&self, column: Column) -> Cell<'_> {
        match column {
            Column::Team1 => Cell::Text(&self.team1),
            Column::Team2 => Cell::Text(&self.team2),
            Column::Team1WinPct => Cell::Number(self.team1_win_pct),
            Column::Team2WinPct => Cell::Number(self.team2_win_pct),
            Column::Team1Elo => Cell::Number(self.team1_elo),
            Column::Team2Elo => Cell::Number(self.team2_elo),
            Column::Leg1WinPctT1 => Cell::Number(self.leg1_win_pct_t1),
            Column::Leg1DrawPct => Cell::Number(self.leg1_draw_pct),
            Column::Leg1WinPctT2 => Cell::Number(self.leg1_win_pct_t2),
            Column::Leg2WinPctT1 => Cell::Number(self.leg2_win_pct_t1),
            Column::Leg2DrawPct => Cell::Number(self.leg2_draw_pct),
            Column::Leg2WinPctT2 => Cell::Number(self.leg2_win_pct_t2),
        }
    }

    pub fn involves(&self, team: &str) -> bool {
        self.team1 == team || self.team2 == team
    }

    pub fn leg1_total(&self) -> f64 {
        self.leg1_win_pct_t1 + self.leg1_draw_pct + self.leg1_win_pct_t2
    }

    pub fn leg2_total(&self) -> f64 {
        self.leg2_win_pct_t1 + self.leg2_draw_pct + self.leg2_win_pct_t2
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct MatchupTable {
    pub rows: Vec<MatchupRow>,
}

impl MatchupTable {
    pub fn new(rows: Vec<MatchupRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MatchupRow> {
        self.rows.iter()
    }
}

/// First-leg goal difference bucket. Labels such as "3+" have no numeric value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GdBucket {
    pub label: String,
    pub value: Option<i64>,
}

impl GdBucket {
    pub fn parse(raw: &str) -> Self {
        let label = raw.trim().to_string();
        let value = label.parse::<i64>().ok();
        Self { label, value }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualificationRow {
    pub leg1_gd: GdBucket,
    pub team1_qual_pct: f64,
    pub team2_qual_pct: f64,
}

impl QualificationRow {
    pub fn total(&self) -> f64 {
        self.team1_qual_pct + self.team2_qual_pct
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct QualificationTable {
    pub rows: Vec<QualificationRow>,
}

impl QualificationTable {
    pub fn new(rows: Vec<QualificationRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QualificationRow> {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gd_bucket_parses_signed_integers() {
        assert_eq!(GdBucket::parse(" -2 ").value, Some(-2));
        assert_eq!(GdBucket::parse("+1").value, Some(1));
        assert_eq!(GdBucket::parse("0").label, "0");
    }

    #[test]
    fn test_gd_bucket_keeps_categorical_labels() {
        let bucket = GdBucket::parse("3+");
        assert_eq!(bucket.label, "3+");
        assert_eq!(bucket.value, None);
    }

    #[test]
    fn test_numeric_columns() {
        let numeric = Column::ALL.iter().filter(|c| c.is_numeric()).count();
        assert_eq!(numeric, 10);
    }
}
