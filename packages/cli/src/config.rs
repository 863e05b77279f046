use anyhow::{bail, Context, Result};
use locations_editor::ValidationGate;
use locations_sync::{SyncConfig, API_URL_ENV, DEFAULT_API_URL, DEFAULT_TIMEOUT, TIMEOUT_ENV};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "locations.config.json";

/// Locations configuration file format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Base URL of the collection service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Per-call timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Require a fresh map pick before an edit can be submitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reconfirm_on_edit: Option<bool>,
}

impl Config {
    /// Load config from a directory, falling back to defaults when absent
    pub fn load(cwd: &Path) -> Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load an explicitly named config file, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }
}

/// Values given as command-line flags
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Effective settings after layering flags, environment, file and defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub sync: SyncConfig,
    pub gate: ValidationGate,
}

impl Settings {
    pub fn resolve(
        overrides: &Overrides,
        config: &Config,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let api_url = overrides
            .api_url
            .clone()
            .or_else(|| env(API_URL_ENV).filter(|url| !url.trim().is_empty()))
            .or_else(|| config.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout = match overrides.timeout_secs {
            Some(0) => bail!("--timeout-secs must be greater than zero"),
            Some(secs) => Duration::from_secs(secs),
            None => match env_timeout(&env) {
                Some(timeout) => timeout,
                None => match config.timeout_secs {
                    Some(0) => bail!("timeoutSecs must be greater than zero"),
                    Some(secs) => Duration::from_secs(secs),
                    None => DEFAULT_TIMEOUT,
                },
            },
        };

        let gate = match config.reconfirm_on_edit {
            Some(reconfirm) => ValidationGate::new(reconfirm),
            None => ValidationGate::default(),
        };

        Ok(Self {
            sync: SyncConfig::new(api_url).with_timeout(timeout),
            gate,
        })
    }
}

fn env_timeout(env: &impl Fn(&str) -> Option<String>) -> Option<Duration> {
    let raw = env(TIMEOUT_ENV)?;
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
        _ => {
            tracing::warn!("Ignoring invalid {}={:?}", TIMEOUT_ENV, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "apiUrl": "https://sites.example.org/",
            "timeoutSecs": 3,
            "reconfirmOnEdit": false
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.api_url.as_deref(), Some("https://sites.example.org/"));
        assert_eq!(config.timeout_secs, Some(3));
        assert_eq!(config.reconfirm_on_edit, Some(false));
    }

    #[test]
    fn test_missing_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_NAME),
            r#"{ "apiUrl": "http://10.0.0.5:3000" }"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.api_url.as_deref(), Some("http://10.0.0.5:3000"));
        assert_eq!(config.timeout_secs, None);
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Cannot read config file"));
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_NAME);
        std::fs::write(&path, "{ apiUrl: }").unwrap();
        assert!(Config::load(dir.path()).is_err());
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(&Overrides::default(), &Config::default(), no_env).unwrap();
        assert_eq!(settings.sync.base_url(), DEFAULT_API_URL);
        assert_eq!(settings.sync.timeout, DEFAULT_TIMEOUT);
        assert!(settings.gate.reconfirm_on_edit);
    }

    #[test]
    fn test_precedence_flag_env_file() {
        let config = Config {
            api_url: Some("http://file:1".to_string()),
            timeout_secs: Some(7),
            reconfirm_on_edit: Some(false),
        };
        let env = |key: &str| match key {
            API_URL_ENV => Some("http://env:2".to_string()),
            TIMEOUT_ENV => Some("4".to_string()),
            _ => None,
        };

        let from_env = Settings::resolve(&Overrides::default(), &config, env).unwrap();
        assert_eq!(from_env.sync.base_url(), "http://env:2");
        assert_eq!(from_env.sync.timeout, Duration::from_secs(4));
        assert!(!from_env.gate.reconfirm_on_edit);

        let overrides = Overrides {
            api_url: Some("http://flag:3/".to_string()),
            timeout_secs: Some(9),
        };
        let from_flags = Settings::resolve(&overrides, &config, env).unwrap();
        assert_eq!(from_flags.sync.base_url(), "http://flag:3");
        assert_eq!(from_flags.sync.timeout, Duration::from_secs(9));

        let from_file = Settings::resolve(&Overrides::default(), &config, no_env).unwrap();
        assert_eq!(from_file.sync.base_url(), "http://file:1");
        assert_eq!(from_file.sync.timeout, Duration::from_secs(7));
    }

    #[test]
    fn test_bad_env_timeout_falls_through_to_file() {
        let config = Config {
            timeout_secs: Some(6),
            ..Default::default()
        };
        let env = |key: &str| (key == TIMEOUT_ENV).then(|| "soon".to_string());

        let settings = Settings::resolve(&Overrides::default(), &config, env).unwrap();
        assert_eq!(settings.sync.timeout, Duration::from_secs(6));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let overrides = Overrides {
            timeout_secs: Some(0),
            ..Default::default()
        };
        assert!(Settings::resolve(&overrides, &Config::default(), no_env).is_err());
    }
}
