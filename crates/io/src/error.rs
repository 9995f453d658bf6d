use std::fmt;

/// I/O failures. All of these are fatal for the run that hits them: the
/// pipeline has no retries, the caller surfaces the message and exits
/// non-zero.
#[derive(Debug)]
pub enum IoError {
    /// Workbook file unreachable or unreadable.
    Workbook { path: String, detail: String },
    /// A named sheet is missing or failed to read.
    Sheet { sheet: String, detail: String },
    /// CSV extract read/write error.
    Csv { path: String, detail: String },
    /// Document store error (open, query, transaction).
    Store { detail: String },
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Workbook { path, detail } => {
                write!(f, "cannot open workbook '{path}': {detail}")
            }
            Self::Sheet { sheet, detail } => {
                write!(f, "cannot read sheet '{sheet}': {detail}")
            }
            Self::Csv { path, detail } => write!(f, "CSV error for '{path}': {detail}"),
            Self::Store { detail } => write!(f, "store error: {detail}"),
        }
    }
}

impl std::error::Error for IoError {}

impl From<rusqlite::Error> for IoError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Store {
            detail: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        Self::Store {
            detail: format!("document encoding: {e}"),
        }
    }
}
