use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use super::{ensure_config_dir, get_config_path};

const SAMPLE_CONFIG: &str = "\
# pr-pulse configuration
#
# Repositories whose contributors should appear on the dashboard,
# in owner/repo format.
repositories:
  - open-sauced/app

# Seconds between automatic dashboard refreshes.
auto_refresh_interval: 300

# Whether bot accounts (logins containing \"[bot]\") start visible.
# Toggleable at runtime with the 'b' key.
show_bots: false
";

/// Create a commented sample config file, refusing to overwrite an
/// existing one. Returns the path that was written.
pub fn init_config(path: Option<PathBuf>) -> Result<PathBuf> {
    let config_path = match path {
        Some(p) => p,
        None => {
            ensure_config_dir()?;
            get_config_path()
        }
    };

    if config_path.exists() {
        anyhow::bail!(
            "Config file already exists at {}. Remove it first to re-initialize.",
            config_path.display()
        );
    }

    fs::write(&config_path, SAMPLE_CONFIG)
        .with_context(|| format!("Failed to write config file at {}", config_path.display()))?;

    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_config_parses() {
        let config: crate::config::Config = serde_saphyr::from_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.repositories, vec!["open-sauced/app".to_string()]);
        assert_eq!(config.auto_refresh_interval, 300);
        assert!(!config.show_bots);
    }

    #[test]
    fn test_init_refuses_existing_file() {
        let dir = std::env::temp_dir().join("pr-pulse-init-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.yaml");
        fs::write(&path, "repositories: []\n").unwrap();

        assert!(init_config(Some(path.clone())).is_err());

        fs::remove_file(&path).unwrap();
        let written = init_config(Some(path.clone())).unwrap();
        assert_eq!(written, path);
        fs::remove_file(&path).unwrap();
    }
}
