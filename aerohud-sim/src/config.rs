//! Config file loading for the harness.
//!
//! An explicit `--config` path must exist. Without one, the per-user config
//! directory is checked and defaults are used when nothing is there.

use std::path::{Path, PathBuf};

use aerohud_core::HudConfig;
use anyhow::{Context, Result};
use directories::ProjectDirs;

const CONFIG_FILE: &str = "config.json";

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "aerohud", "aerohud-sim")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

pub fn load_config(explicit: Option<&Path>) -> Result<HudConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path().filter(|path| path.exists()) {
            Some(path) => path,
            None => {
                log::debug!("No config file, using defaults");
                return Ok(HudConfig::default());
            }
        },
    };

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Unable to read config {}", path.display()))?;
    let config: HudConfig = serde_json::from_str(&text)
        .with_context(|| format!("Unable to parse config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config {}", path.display()))?;

    log::info!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerohud_core::TrafficMode;
    use std::io::Write;

    #[test]
    fn test_load_partial_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "declination": 8.0, "maxTargetBugs": 5 }}"#).unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.declination, 8.0);
        assert_eq!(config.max_target_bugs, 5);
        assert_eq!(config.traffic_mode, TrafficMode::HeadingBugs);
    }

    #[test]
    fn test_missing_explicit_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("nope.json"))).unwrap_err();
        assert!(err.to_string().starts_with("Unable to read config"));
    }

    #[test]
    fn test_invalid_config_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "arcSquash": 3.0 }}"#).unwrap();

        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().starts_with("Invalid config"));
    }
}
