// Config file resolution
//
// Order: explicit --config (or SHEETSENSE_CONFIG), then the per-user file
// under the platform config dir, then built-in defaults.

use std::path::{Path, PathBuf};

use sheetsense_structure::{StructureConfig, StructureError};

const CONFIG_DIR: &str = "sheetsense";
const CONFIG_FILE: &str = "structure.toml";

/// Where a resolved config came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    User(PathBuf),
    Defaults,
}

impl ConfigSource {
    pub fn describe(&self) -> String {
        match self {
            Self::Explicit(p) => format!("{}", p.display()),
            Self::User(p) => format!("{} (user config)", p.display()),
            Self::Defaults => "built-in defaults".to_string(),
        }
    }
}

/// `~/.config/sheetsense/structure.toml` on Linux, platform equivalent elsewhere.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR).join(CONFIG_FILE))
}

pub fn load_config(explicit: Option<&Path>) -> Result<(StructureConfig, ConfigSource), StructureError> {
    if let Some(path) = explicit {
        let config = read_config(path)?;
        return Ok((config, ConfigSource::Explicit(path.to_path_buf())));
    }

    match user_config_path() {
        Some(path) if path.is_file() => {
            let config = read_config(&path)?;
            log::debug!("using user config {}", path.display());
            Ok((config, ConfigSource::User(path)))
        }
        _ => Ok((StructureConfig::default(), ConfigSource::Defaults)),
    }
}

fn read_config(path: &Path) -> Result<StructureConfig, StructureError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| StructureError::Io(format!("{}: {e}", path.display())))?;
    StructureConfig::from_toml(&text)
        .map_err(|e| match e {
            StructureError::ConfigParse(msg) => {
                StructureError::ConfigParse(format!("{}: {msg}", path.display()))
            }
            StructureError::ConfigValidation(msg) => {
                StructureError::ConfigValidation(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
}
