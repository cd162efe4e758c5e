use std::collections::BTreeSet;

use crate::domain::{MatchupRow, MatchupTable};

pub const ALL_TEAMS: &str = "All";

/// Sidebar selection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TeamSelection {
    #[default]
    All,
    Team(String),
}

impl TeamSelection {
    /// Missing, blank and "All" all mean no filter
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(str::trim) {
            None | Some("") | Some(ALL_TEAMS) => TeamSelection::All,
            Some(team) => TeamSelection::Team(team.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TeamSelection::All => ALL_TEAMS,
            TeamSelection::Team(team) => team.as_str(),
        }
    }

    pub fn matches(&self, row: &MatchupRow) -> bool {
        match self {
            TeamSelection::All => true,
            TeamSelection::Team(team) => row.involves(team),
        }
    }
}

/// Every team in either slot, deduplicated and sorted
pub fn list_teams(table: &MatchupTable) -> BTreeSet<String> {
    table
        .iter()
        .flat_map(|row| [row.team1.clone(), row.team2.clone()])
        .collect()
}

/// Dropdown options: "All" followed by the sorted team list
pub fn team_options(table: &MatchupTable) -> Vec<String> {
    std::iter::once(ALL_TEAMS.to_string())
        .chain(list_teams(table))
        .collect()
}

/// Rows involving the selected team, in their original order
pub fn apply_filter(table: &MatchupTable, selection: &TeamSelection) -> MatchupTable {
    match selection {
        TeamSelection::All => table.clone(),
        TeamSelection::Team(_) => MatchupTable::new(
            table
                .iter()
                .filter(|row| selection.matches(row))
                .cloned()
                .collect(),
        ),
    }
}
