//! Error types for pincode loading and lookup.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by every public operation of the crate.
#[derive(Debug, Error)]
pub enum PininError {
    /// The caller supplied something that is not a 6-digit pincode.
    #[error("Invalid pincode: '{pincode}'. Pincode must be a 6-digit number.")]
    InvalidFormat { pincode: String },

    /// A well-formed pincode has no rows in the loaded table.
    #[error("No data found for pincode: '{pincode}'")]
    NotFound { pincode: String },

    /// The backing data file could not be turned into a table.
    #[error("Failed to load pincode data: {source} from file: '{}'", .path.display())]
    DataLoad {
        path: PathBuf,
        #[source]
        source: LoadError,
    },
}

impl PininError {
    pub(crate) fn load(path: impl Into<PathBuf>, source: LoadError) -> Self {
        PininError::DataLoad {
            path: path.into(),
            source,
        }
    }

    /// The load failure reason, if this is a `DataLoad` error.
    pub fn load_error(&self) -> Option<&LoadError> {
        match self {
            PininError::DataLoad { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Why a data file failed to load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Data file not found")]
    FileNotFound,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// None of the candidate encodings decoded the file cleanly.
    #[error("Could not decode CSV file with any supported encoding ({})", .tried.join(", "))]
    Encoding { tried: Vec<&'static str> },

    #[error("Data file is empty")]
    Empty,

    #[error("Failed to parse CSV file: {0}")]
    Parse(#[from] csv::Error),

    #[error("Row {row} has {found} fields, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// A convenience `Result` alias using [`PininError`].
pub type Result<T> = std::result::Result<T, PininError>;
