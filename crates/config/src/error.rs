use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, detail: String },
    Parse { path: PathBuf, detail: String },
    /// An environment override holds a value the field cannot take.
    Env { var: String, detail: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, detail } => {
                write!(f, "cannot read {}: {detail}", path.display())
            }
            ConfigError::Parse { path, detail } => {
                write!(f, "cannot parse {}: {detail}", path.display())
            }
            ConfigError::Env { var, detail } => write!(f, "invalid {var}: {detail}"),
        }
    }
}

impl std::error::Error for ConfigError {}
