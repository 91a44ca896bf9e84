use std::{fs, fs::File, io::Write, path::Path};

use anyhow::{Context, Result};
use config::{Config, Environment};
use log::info;

pub fn get_default_config() -> &'static str {
    include_str!("../../config/config.toml")
}

/// Loads the configuration file at `path`, creating it from the defaults if missing.
///
/// Environment variables prefixed with `NANO_RPC_` override file values,
/// with `__` separating nested keys (`NANO_RPC_NODE__URL` sets `node.url`).
pub fn load_configuration(path: &Path) -> Result<Config> {
    if !path.exists() {
        let sources = get_default_config();
        write_config_to(path, sources).context("Could not create default config")?;
        info!(path:% = path.display(); "Created new configuration file");
    }

    let filename = path.to_str().context("Invalid config file path")?;

    Config::builder()
        .add_source(config::File::with_name(filename))
        .add_source(Environment::with_prefix("NANO_RPC").prefix_separator("_").separator("__"))
        .build()
        .context("Could not build config")
}

pub fn write_config_to(path: &Path, source: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create parent directories")?;
    };

    let mut file = File::create(path).context("Failed to create config file")?;
    file.write_all(source.as_bytes())
        .context("Failed to write config content")?;
    file.write_all(b"\n").context("Failed to write newline")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use serial_test::serial;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    #[serial]
    fn test_creates_default_file_when_missing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = load_configuration(&path).unwrap();

        assert!(path.exists());
        let client_config = ClientConfig::from_config(&cfg).unwrap();
        assert_eq!(client_config, ClientConfig::default());
    }

    #[test]
    #[serial]
    fn test_reads_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        write_config_to(&path, "[node]\nurl = \"http://[::1]:7076\"\ntimeout_secs = 3\n").unwrap();

        let cfg = load_configuration(&path).unwrap();
        let client_config = ClientConfig::from_config(&cfg).unwrap();

        assert_eq!(client_config.url.as_str(), "http://[::1]:7076/");
        assert_eq!(client_config.timeout, Duration::from_secs(3));
    }

    #[test]
    #[serial]
    fn test_environment_overrides_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        write_config_to(&path, "[node]\nurl = \"http://127.0.0.1:7076\"\n").unwrap();

        // SAFETY: serialised with the other tests that touch the environment.
        unsafe { std::env::set_var("NANO_RPC_NODE__URL", "http://10.1.1.1:7076") };
        let cfg = load_configuration(&path);
        unsafe { std::env::remove_var("NANO_RPC_NODE__URL") };

        let client_config = ClientConfig::from_config(&cfg.unwrap()).unwrap();
        assert_eq!(client_config.url.as_str(), "http://10.1.1.1:7076/");
    }
}
