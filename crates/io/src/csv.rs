// CSV extract writing.
//
// One file per record type, headers from the serde field names — the
// extract files share their schema with the store collections.

use std::path::Path;

use serde::Serialize;

use crate::error::IoError;

/// Write records to `path`, creating parent directories as needed.
/// Returns the number of records written.
pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<usize, IoError> {
    let csv_err = |detail: String| IoError::Csv {
        path: path.display().to_string(),
        detail,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| csv_err(e.to_string()))?;
    }

    let mut writer = csv::Writer::from_path(path).map_err(|e| csv_err(e.to_string()))?;
    for record in records {
        writer.serialize(record).map_err(|e| csv_err(e.to_string()))?;
    }
    writer.flush().map_err(|e| csv_err(e.to_string()))?;
    Ok(records.len())
}
