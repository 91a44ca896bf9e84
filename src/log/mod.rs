pub mod structured_console_encoder;

use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, anyhow};
use log::{debug, info};
use log4rs::{
    Config,
    config::{Deserializers, RawConfig},
};

use crate::log::structured_console_encoder::StructuredConsoleEncoderDeserializer;

const EXTERNAL_CONFIG_PATH: &str = "log4rs.yml";

/// Initializes logging from `log4rs.yml` in the working directory, or from the embedded defaults.
pub fn init_logging() -> anyhow::Result<()> {
    let path = Path::new(EXTERNAL_CONFIG_PATH);

    if path.exists() {
        log4rs::init_file(path, deserializers()).context("Failed to load external log4rs.yml")?;
        info!(
            path = EXTERNAL_CONFIG_PATH;
            "Logging initialized from external configuration"
        );
        return Ok(());
    }

    let config = embedded_config()?;
    log4rs::init_config(config).context("Failed to initialize logging from embedded config")?;

    debug!("Logging initialized from embedded defaults (no external log4rs.yml found)");
    Ok(())
}

fn deserializers() -> Deserializers {
    let mut deserializers = Deserializers::default();
    deserializers.insert("structured_console", StructuredConsoleEncoderDeserializer);
    deserializers
}

fn embedded_config() -> anyhow::Result<Config> {
    let yaml_content = include_str!("../../resources/default_log4rs.yml");
    let raw_config: RawConfig =
        serde_yaml::from_str(yaml_content).context("Embedded logging configuration is invalid YAML")?;

    let (appenders, errors) = raw_config.appenders_lossy(&deserializers());
    if !errors.is_empty() {
        return Err(anyhow!("Errors parsing embedded appenders: {:?}", errors));
    }

    Config::builder()
        .appenders(appenders)
        .loggers(raw_config.loggers())
        .build(raw_config.root())
        .context("Failed to build logging config")
}

fn reveal_pii() -> bool {
    static REVEAL_PII_CACHE: OnceLock<bool> = OnceLock::new();

    *REVEAL_PII_CACHE.get_or_init(|| {
        std::env::var("REVEAL_PII")
            .map(|v| {
                let val = v.to_lowercase();
                val == "true" || val == "1"
            })
            .unwrap_or(false)
    })
}

/// Masks an account or key, keeping only its first and last characters.
/// If REVEAL_PII is true, returns the original string.
pub fn mask_string(s: &str) -> String {
    if reveal_pii() {
        return s.to_string();
    }

    if s.len() <= 12 || !s.is_ascii() {
        return "***".to_string();
    }

    format!("{}...{}", &s[0..8], &s[s.len() - 6..])
}

/// Returns a redacted placeholder for amounts.
/// If REVEAL_PII is true, returns the actual amount.
pub fn mask_amount(amount: &str) -> String {
    if reveal_pii() {
        return amount.to_string();
    }

    "<REDACTED>".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_builds() {
        assert!(embedded_config().is_ok());
    }

    #[test]
    fn test_mask_string() {
        if reveal_pii() {
            return;
        }
        assert_eq!(
            mask_string("xrb_3t6k35gi95xu6tergt6p69ck76ogmitsa8mnijtpxm9fkcm736xtoncuohr3"),
            "xrb_3t6k...cuohr3"
        );
        assert_eq!(mask_string("xrb_1"), "***");
        assert_eq!(mask_amount("1000"), "<REDACTED>");
    }
}
