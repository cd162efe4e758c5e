use csv::{ReaderBuilder, StringRecord, Trim};
use log::{error, info};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::domain::{
    Column, GdBucket, MatchupRow, MatchupTable, QualificationRow, QualificationTable, GD_HEADER,
    TEAM1_QUAL_HEADER, TEAM2_QUAL_HEADER,
};
use crate::errors::DataError;

/// Load `qualification_stats.csv`
pub fn load_matchups_from_path(path: &Path) -> Result<MatchupTable, DataError> {
    let result = open(path).and_then(|file| load_matchups_from_reader(file, &source_name(path)));
    log_result(path, result.as_ref().map(MatchupTable::len));
    result
}

/// Load `qualification_by_gd.csv`
pub fn load_qualification_from_path(path: &Path) -> Result<QualificationTable, DataError> {
    let result =
        open(path).and_then(|file| load_qualification_from_reader(file, &source_name(path)));
    log_result(path, result.as_ref().map(QualificationTable::len));
    result
}

pub fn load_matchups_from_reader<R: Read>(
    reader: R,
    source_name: &str,
) -> Result<MatchupTable, DataError> {
    let mut table = RecordSource::new(reader, source_name)?;
    let columns = Column::ALL
        .iter()
        .map(|c| table.header.require(c.header(), source_name))
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows = Vec::new();
    while let Some(record) = table.next_record()? {
        let cells = RowCells {
            record: &record,
            source_name,
        };
        let number = |c: Column| cells.number(columns[c as usize], c.header());
        rows.push(MatchupRow {
            team1: cells.text(columns[Column::Team1 as usize], Column::Team1.header())?,
            team2: cells.text(columns[Column::Team2 as usize], Column::Team2.header())?,
            team1_win_pct: number(Column::Team1WinPct)?,
            team2_win_pct: number(Column::Team2WinPct)?,
            team1_elo: number(Column::Team1Elo)?,
            team2_elo: number(Column::Team2Elo)?,
            leg1_win_pct_t1: number(Column::Leg1WinPctT1)?,
            leg1_draw_pct: number(Column::Leg1DrawPct)?,
            leg1_win_pct_t2: number(Column::Leg1WinPctT2)?,
            leg2_win_pct_t1: number(Column::Leg2WinPctT1)?,
            leg2_draw_pct: number(Column::Leg2DrawPct)?,
            leg2_win_pct_t2: number(Column::Leg2WinPctT2)?,
        });
    }
    Ok(MatchupTable::new(rows))
}

pub fn load_qualification_from_reader<R: Read>(
    reader: R,
    source_name: &str,
) -> Result<QualificationTable, DataError> {
    let mut table = RecordSource::new(reader, source_name)?;
    let gd = table.header.require(GD_HEADER, source_name)?;
    let team1 = table.header.require(TEAM1_QUAL_HEADER, source_name)?;
    let team2 = table.header.require(TEAM2_QUAL_HEADER, source_name)?;

    let mut rows = Vec::new();
    while let Some(record) = table.next_record()? {
        let cells = RowCells {
            record: &record,
            source_name,
        };
        rows.push(QualificationRow {
            leg1_gd: GdBucket::parse(&cells.text(gd, GD_HEADER)?),
            team1_qual_pct: cells.number(team1, TEAM1_QUAL_HEADER)?,
            team2_qual_pct: cells.number(team2, TEAM2_QUAL_HEADER)?,
        });
    }
    Ok(QualificationTable::new(rows))
}

fn open(path: &Path) -> Result<File, DataError> {
    if !path.exists() {
        return Err(DataError::MissingFile {
            path: path.to_path_buf(),
        });
    }
    File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn log_result(path: &Path, result: Result<usize, &DataError>) {
    match result {
        Ok(count) => info!("Loaded {} rows from {}", count, path.display()),
        Err(e) => error!("{}: {}", e.kind(), e),
    }
}

/// Header row: name to column position
struct HeaderIndex {
    names: Vec<String>,
}

impl HeaderIndex {
    fn require(&self, name: &'static str, source_name: &str) -> Result<usize, DataError> {
        self.names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| DataError::MissingColumn {
                source_name: source_name.to_string(),
                column: name,
            })
    }

    fn len(&self) -> usize {
        self.names.len()
    }
}

struct RecordSource<R: Read> {
    reader: csv::Reader<R>,
    header: HeaderIndex,
    source_name: String,
}

impl<R: Read> RecordSource<R> {
    fn new(reader: R, source_name: &str) -> Result<Self, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);
        let names = reader
            .headers()
            .map_err(|source| csv_error(source_name, source))?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();
        Ok(Self {
            reader,
            header: HeaderIndex { names },
            source_name: source_name.to_string(),
        })
    }

    /// Next data row, checked against the header's column count
    fn next_record(&mut self) -> Result<Option<StringRecord>, DataError> {
        let mut record = StringRecord::new();
        let more = self
            .reader
            .read_record(&mut record)
            .map_err(|source| csv_error(&self.source_name, source))?;
        if !more {
            return Ok(None);
        }
        if record.len() != self.header.len() {
            return Err(DataError::MalformedRow {
                source_name: self.source_name.clone(),
                line: line_of(&record),
                expected: self.header.len(),
                found: record.len(),
            });
        }
        Ok(Some(record))
    }
}

struct RowCells<'a> {
    record: &'a StringRecord,
    source_name: &'a str,
}

impl RowCells<'_> {
    fn raw(&self, index: usize) -> &str {
        self.record.get(index).unwrap_or_default()
    }

    fn text(&self, index: usize, column: &'static str) -> Result<String, DataError> {
        let value = self.raw(index);
        if value.is_empty() {
            return Err(DataError::EmptyField {
                source_name: self.source_name.to_string(),
                line: line_of(self.record),
                column,
            });
        }
        Ok(value.to_string())
    }

    fn number(&self, index: usize, column: &'static str) -> Result<f64, DataError> {
        let value = self.raw(index);
        // `f64::from_str` also accepts "NaN" and "inf"
        match value.parse::<f64>() {
            Ok(number) if number.is_finite() => Ok(number),
            _ => Err(DataError::TypeMismatch {
                source_name: self.source_name.to_string(),
                line: line_of(self.record),
                column,
                value: value.to_string(),
            }),
        }
    }
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn csv_error(source_name: &str, source: csv::Error) -> DataError {
    DataError::Csv {
        source_name: source_name.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATS_HEADER: &str = "Team 1,Team 2,Team 1 Win %,Team 2 Win %,Team 1 Elo,Team 2 Elo,\
1st Leg Win % T1,1st Leg Draw %,1st Leg Win % T2,2nd Leg Win % T1,2nd Leg Draw %,2nd Leg Win % T2";

    fn stats_csv(rows: &[&str]) -> String {
        let mut csv = String::from(STATS_HEADER);
        for row in rows {
            csv.push('\n');
            csv.push_str(row);
        }
        csv
    }

    #[test]
    fn test_load_matchups() {
        let csv = stats_csv(&["England,Spain,55.0,45.0,2000,1950,40.0,30.0,30.0,35.0,25.0,40.0"]);
        let table = load_matchups_from_reader(csv.as_bytes(), "stats").unwrap();

        assert_eq!(table.len(), 1);
        let row = &table.rows[0];
        assert_eq!(row.team1, "England");
        assert_eq!(row.team2, "Spain");
        assert_eq!(row.team1_elo, 2000.0);
        assert_eq!(row.leg2_win_pct_t2, 40.0);
    }

    #[test]
    fn test_column_order_is_irrelevant() {
        let csv = "Team 2,Team 1,Team 1 Win %,Team 2 Win %,Team 1 Elo,Team 2 Elo,\
1st Leg Win % T1,1st Leg Draw %,1st Leg Win % T2,2nd Leg Win % T1,2nd Leg Draw %,2nd Leg Win % T2,Extra\n\
Spain,England,55,45,2000,1950,40,30,30,35,25,40,x";
        let table = load_matchups_from_reader(csv.as_bytes(), "stats").unwrap();
        assert_eq!(table.rows[0].team1, "England");
        assert_eq!(table.rows[0].team2, "Spain");
    }

    #[test]
    fn test_short_row_is_malformed() {
        let csv = stats_csv(&[
            "England,Spain,55,45,2000,1950,40,30,30,35,25,40",
            "Italy,France,50,50,1900,1950,40,30,30",
        ]);
        let err = load_matchups_from_reader(csv.as_bytes(), "stats").unwrap_err();
        match err {
            DataError::MalformedRow {
                line,
                expected,
                found,
                ..
            } => {
                assert_eq!(line, 3);
                assert_eq!(expected, 12);
                assert_eq!(found, 9);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_is_type_mismatch() {
        let csv = stats_csv(&["England,Spain,55,45,high,1950,40,30,30,35,25,40"]);
        let err = load_matchups_from_reader(csv.as_bytes(), "stats").unwrap_err();
        assert!(matches!(
            err,
            DataError::TypeMismatch {
                column: "Team 1 Elo",
                ..
            }
        ));
    }

    #[test]
    fn test_nan_and_infinity_are_type_mismatches() {
        let header = "1st Leg GD,Team 1 Qualification %,Team 2 Qualification %";
        for (row, column, cell) in [
            ("0,NaN,50", "Team 1 Qualification %", "NaN"),
            ("0,50,inf", "Team 2 Qualification %", "inf"),
        ] {
            let csv = format!("{header}\n{row}");
            let err = load_qualification_from_reader(csv.as_bytes(), "gd").unwrap_err();
            match err {
                DataError::TypeMismatch {
                    column: found,
                    value,
                    ..
                } => {
                    assert_eq!(found, column);
                    assert_eq!(value, cell);
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_infinite_elo_is_type_mismatch() {
        let csv = stats_csv(&["England,Spain,55,45,2000,infinity,40,30,30,35,25,40"]);
        let err = load_matchups_from_reader(csv.as_bytes(), "stats").unwrap_err();
        assert!(matches!(
            err,
            DataError::TypeMismatch {
                column: "Team 2 Elo",
                ..
            }
        ));
    }

    #[test]
    fn test_empty_team_name_is_rejected() {
        let csv = stats_csv(&[",Spain,55,45,2000,1950,40,30,30,35,25,40"]);
        let err = load_matchups_from_reader(csv.as_bytes(), "stats").unwrap_err();
        assert!(matches!(err, DataError::EmptyField { column: "Team 1", .. }));
    }

    #[test]
    fn test_missing_column() {
        let csv = "Team 1,Team 2\nEngland,Spain";
        let err = load_matchups_from_reader(csv.as_bytes(), "stats").unwrap_err();
        assert!(matches!(
            err,
            DataError::MissingColumn {
                column: "Team 1 Win %",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("qualification_dashboard_missing.csv");
        let err = load_matchups_from_path(&path).unwrap_err();
        assert!(err.halts_page());
    }

    #[test]
    fn test_load_qualification() {
        let csv = "1st Leg GD,Team 1 Qualification %,Team 2 Qualification %\n2,70,30\n-2,30,70\n0,50,50";
        let table = load_qualification_from_reader(csv.as_bytes(), "gd").unwrap();

        let labels: Vec<&str> = table.iter().map(|r| r.leg1_gd.label.as_str()).collect();
        assert_eq!(labels, vec!["2", "-2", "0"]);
        assert_eq!(table.rows[1].leg1_gd.value, Some(-2));
        assert_eq!(table.rows[1].team2_qual_pct, 70.0);
    }

    #[test]
    fn test_load_from_path() {
        let path = std::env::temp_dir().join("qualification_dashboard_by_gd_test.csv");
        std::fs::write(
            &path,
            "1st Leg GD,Team 1 Qualification %,Team 2 Qualification %\n0,50,50\n",
        )
        .unwrap();

        let table = load_qualification_from_path(&path).unwrap();
        assert_eq!(table.len(), 1);

        // Cleanup
        std::fs::remove_file(&path).unwrap();
    }
}
