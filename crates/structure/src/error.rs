use std::fmt;

/// Errors at the edges of the engine. Classification itself never fails.
#[derive(Debug)]
pub enum StructureError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (zero budget, zero scan rows, etc.).
    ConfigValidation(String),
    /// Grid snapshot could not be decoded.
    SnapshotParse(String),
    /// IO error (file read, etc.).
    Io(String),
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::SnapshotParse(msg) => write!(f, "snapshot parse error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for StructureError {}

impl From<std::io::Error> for StructureError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
