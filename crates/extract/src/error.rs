use std::fmt;

use quetzal_io::IoError;

/// Errors raised while reading a workbook against the layout contract.
#[derive(Debug)]
pub enum ExtractError {
    /// A position the layout declares numeric held text that is not a number.
    MalformedCell {
        sheet: String,
        row: usize,
        col: usize,
        found: String,
    },
    /// A sheet addressed by header names is missing a required header.
    MissingColumn { sheet: String, header: String },
    Io(IoError),
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::MalformedCell {
                sheet,
                row,
                col,
                found,
            } => write!(
                f,
                "{sheet}!R{row}C{col}: expected a number, found {found:?}"
            ),
            ExtractError::MissingColumn { sheet, header } => {
                write!(f, "{sheet}: missing required column {header:?}")
            }
            ExtractError::Io(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExtractError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<IoError> for ExtractError {
    fn from(e: IoError) -> Self {
        ExtractError::Io(e)
    }
}
