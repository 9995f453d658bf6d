// Pipeline settings
// Loaded from ./quetzal.toml, ~/.config/quetzal/quetzal.toml, or an
// explicit path, then overridden by QZL_* environment variables.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use quetzal_core::CellPolicy;

use crate::error::ConfigError;

pub const FILE_NAME: &str = "quetzal.toml";

/// Environment variable names recognized as overrides.
pub mod env {
    pub const WORKBOOK: &str = "QZL_WORKBOOK";
    pub const STORE: &str = "QZL_STORE";
    pub const CSV_DIR: &str = "QZL_CSV_DIR";
    pub const YEAR: &str = "QZL_YEAR";
    pub const TOLERANCE: &str = "QZL_TOLERANCE";
    pub const CELL_POLICY: &str = "QZL_CELL_POLICY";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Workbook to audit. Required by every command that reads sheets;
    /// left unset here so the CLI can report its absence cleanly.
    pub workbook: Option<PathBuf>,

    /// SQLite document store path.
    pub store: PathBuf,

    /// Directory CSV exports are written into.
    pub csv_dir: PathBuf,

    /// Fiscal year stamped onto extracted records.
    pub year: i32,

    /// Differences strictly below this are consistent.
    pub tolerance: f64,

    /// What to do with text in a numeric cell.
    pub cell_policy: CellPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            workbook: None,
            store: PathBuf::from("quetzal.db"),
            csv_dir: PathBuf::from("csv_data"),
            year: 2025,
            tolerance: 1.0,
            cell_policy: CellPolicy::FailFast,
        }
    }
}

impl Settings {
    /// Settings file search order: working directory first, then the
    /// user config directory.
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(FILE_NAME)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("quetzal").join(FILE_NAME));
        }
        paths
    }

    /// Loads from an explicit file, or from the first default path that
    /// exists, or plain defaults. Environment overrides apply last.
    pub fn load(explicit: Option<&Path>) -> Result<Settings, ConfigError> {
        let mut settings = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_paths().iter().find(|p| p.exists()) {
                Some(path) => Self::from_file(path)?,
                None => Settings::default(),
            },
        };
        settings.apply_env()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Settings, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(v) = var(env::WORKBOOK) {
            self.workbook = Some(PathBuf::from(v));
        }
        if let Some(v) = var(env::STORE) {
            self.store = PathBuf::from(v);
        }
        if let Some(v) = var(env::CSV_DIR) {
            self.csv_dir = PathBuf::from(v);
        }
        if let Some(v) = var(env::YEAR) {
            self.year = parse(env::YEAR, &v)?;
        }
        if let Some(v) = var(env::TOLERANCE) {
            self.tolerance = parse(env::TOLERANCE, &v)?;
        }
        if let Some(v) = var(env::CELL_POLICY) {
            self.cell_policy = match v.as_str() {
                "fail_fast" => CellPolicy::FailFast,
                "zero_fill" => CellPolicy::ZeroFill,
                other => {
                    return Err(ConfigError::Env {
                        var: env::CELL_POLICY.to_string(),
                        detail: format!("unknown policy {other:?}"),
                    })
                }
            };
        }
        Ok(())
    }
}

fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::Env {
        var: name.to_string(),
        detail: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn defaults_are_usable_without_a_file() {
        let s = Settings::default();
        assert_eq!(s.workbook, None);
        assert_eq!(s.store, PathBuf::from("quetzal.db"));
        assert_eq!(s.tolerance, 1.0);
        assert_eq!(s.cell_policy, CellPolicy::FailFast);
    }

    #[test]
    fn reads_a_partial_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "workbook = \"ksb.xlsx\"\ntolerance = 0.5\ncell_policy = \"zero_fill\""
        )
        .unwrap();
        let s = Settings::from_file(file.path()).unwrap();
        assert_eq!(s.workbook, Some(PathBuf::from("ksb.xlsx")));
        assert_eq!(s.tolerance, 0.5);
        assert_eq!(s.cell_policy, CellPolicy::ZeroFill);
        // untouched fields keep their defaults
        assert_eq!(s.year, 2025);
    }

    #[test]
    fn parse_failures_name_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tolerance = \"high\"").unwrap();
        match Settings::from_file(file.path()) {
            Err(ConfigError::Parse { .. }) => {}
            other => panic!("unexpected: {other:?}"),
        }
    }
}
