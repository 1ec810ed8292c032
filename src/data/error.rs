use thiserror::Error;

/// Errors raised while turning uploaded bytes into an analysable dataset.
///
/// Per-cell problems (a non-numeric salary, an empty cell) are never errors;
/// those cells are simply left out of numeric work.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Error reading the file: {0}")]
    Parse(String),

    #[error("Missing columns in the dataset: {}", .missing.join(", "))]
    Validation { missing: Vec<String> },

    #[error("Input is {size} bytes, larger than the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },

    #[error("Unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    /// Missing required columns, when this is a validation failure.
    pub fn missing_columns(&self) -> Option<&[String]> {
        match self {
            DataError::Validation { missing } => Some(missing),
            _ => None,
        }
    }
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        DataError::Parse(err.to_string())
    }
}

pub type DataResult<T> = Result<T, DataError>;
