pub mod csv_tables;

pub use csv_tables::{
    load_matchups_from_path, load_matchups_from_reader, load_qualification_from_path,
    load_qualification_from_reader,
};

use chrono::{DateTime, Utc};

use crate::config::settings::DataSettings;
use crate::domain::{MatchupTable, QualificationTable};
use crate::errors::DataError;

/// Both input tables of one render. Each table fails independently.
#[derive(Debug)]
pub struct DashboardData {
    pub matchups: Result<MatchupTable, DataError>,
    pub qualification: Result<QualificationTable, DataError>,
    pub loaded_at: DateTime<Utc>,
}

impl DashboardData {
    pub fn new(
        matchups: Result<MatchupTable, DataError>,
        qualification: Result<QualificationTable, DataError>,
    ) -> Self {
        Self {
            matchups,
            qualification,
            loaded_at: Utc::now(),
        }
    }

    /// First error that takes the whole page down, if any
    pub fn page_error(&self) -> Option<&DataError> {
        [self.matchups.as_ref().err(), self.qualification.as_ref().err()]
            .into_iter()
            .flatten()
            .find(|e| e.halts_page())
    }
}

pub fn load_dashboard_data(settings: &DataSettings) -> DashboardData {
    DashboardData::new(
        load_matchups_from_path(&settings.stats_path),
        load_qualification_from_path(&settings.by_gd_path),
    )
}
