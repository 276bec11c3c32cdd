use std::fs;
use std::path::PathBuf;

use color_eyre::eyre::WrapErr;
use tracing::debug;

use crate::config::AppConfig;

const CONFIG_DIR: &str = "lazymodal";
const CONFIG_FILE: &str = "config.toml";

pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(CONFIG_DIR))
}

pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join(CONFIG_FILE))
}

/// Load the configuration file, or the defaults when there is none.
pub fn load() -> color_eyre::Result<AppConfig> {
    let Some(path) = config_path() else {
        debug!("No config directory found, using defaults");
        return Ok(AppConfig::default());
    };
    load_from(&path)
}

pub fn load_from(path: &std::path::Path) -> color_eyre::Result<AppConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
    let config: AppConfig = toml::from_str(&content)
        .wrap_err_with(|| format!("Invalid config file {}", path.display()))?;
    debug!(path = %path.display(), "Loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("lazymodal-does-not-exist.toml");
        let config = load_from(&path).unwrap();
        assert_eq!(config.theme.name, "Catppuccin Mocha");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let path = std::env::temp_dir()
            .join(format!("lazymodal-invalid-{}.toml", std::process::id()));
        fs::write(&path, "locale = 3").unwrap();
        let result = load_from(&path);
        fs::remove_file(&path).unwrap();
        assert!(result.is_err());
    }
}
