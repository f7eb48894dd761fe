//! Configuration documents: grid resources, TUI layout and game rules.
//!
//! All three are JSON. The grid document is the only one the engine needs;
//! when it cannot be loaded the built-in [`GridResourceConfig::fallback`]
//! takes its place.

mod grid;
mod layout;
mod loader;

pub use grid::{CellResourceConfig, GridResourceConfig};
pub use layout::{ActionsTextLayout, GridLayout, LayoutConfig, ResourceDisplayLayout, SlotLayout};
pub use loader::{ConfigLoader, ConfigSource, LoadedConfig, load_grid_or_fallback};

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::ConfigError;
use crate::game::GameRules;

/// Read and parse a JSON document.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read and
/// [`ConfigError::Parse`] if it does not match `T`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a rules document. Missing fields keep their defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_rules(path: &Path) -> Result<GameRules, ConfigError> {
    read_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_rules_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"dailyFoodConsumption": 4, "robotSlots": 2}}"#).unwrap();

        let rules = load_rules(file.path()).unwrap();
        assert_eq!(rules.daily_food_consumption, 4);
        assert_eq!(rules.robot_slots, 2);
        assert_eq!(rules.max_deployments_per_day, 3);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_rules(Path::new("/nonexistent/rules.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        let err = load_rules(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
