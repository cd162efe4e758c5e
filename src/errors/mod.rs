use std::path::PathBuf;
use thiserror::Error;

/// Failures while turning an input file into a table
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Input file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("{source_name}: missing required column '{column}'")]
    MissingColumn {
        source_name: String,
        column: &'static str,
    },

    #[error("{source_name}: line {line} has {found} columns, header has {expected}")]
    MalformedRow {
        source_name: String,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("{source_name}: line {line}, column '{column}': '{value}' is not a number")]
    TypeMismatch {
        source_name: String,
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("{source_name}: line {line}, column '{column}' is empty")]
    EmptyField {
        source_name: String,
        line: u64,
        column: &'static str,
    },

    #[error("{source_name}: {source}")]
    Csv {
        source_name: String,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DataError {
    /// A missing input halts the whole page; schema errors only the sections
    /// built from the broken table.
    pub fn halts_page(&self) -> bool {
        matches!(self, DataError::MissingFile { .. })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DataError::MissingFile { .. } => "MissingFileError",
            DataError::MissingColumn { .. } | DataError::MalformedRow { .. } => {
                "MalformedRowError"
            }
            DataError::TypeMismatch { .. } | DataError::EmptyField { .. } => "TypeMismatchError",
            DataError::Csv { .. } | DataError::Io { .. } => "ReadError",
        }
    }
}

/// Add context to load errors
pub fn load_context(table: &str, path: &std::path::Path) -> String {
    format!("Failed to load {} from {}", table, path.display())
}

/// Add context to output errors
pub fn write_context(path: &std::path::Path) -> String {
    format!("Failed to write {}", path.display())
}
