// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use log::{LevelFilter, debug};
use serde::Deserialize;

use crate::render::TimestampFormat;

const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Warn;

/// Settings read from the optional YAML config file. Every field can be
/// overridden from the command line or the environment.
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub host: Option<String>,
    #[serde(default)]
    pub gateway: bool,
    pub path_prefix: Option<String>,
    pub token: Option<String>,
    pub ca_cert: Option<PathBuf>,
    /// Request timeout, e.g. `30s` or `2m`.
    pub timeout: Option<String>,
    pub time_format: Option<TimestampFormat>,
    pub log_level: Option<String>,
}

impl FileConfig {
    pub fn timeout(&self) -> Result<Option<Duration>> {
        self.timeout
            .as_deref()
            .map(|timeout| {
                humantime::parse_duration(timeout)
                    .with_context(|| format!("invalid timeout {timeout:?} in config file"))
            })
            .transpose()
    }
}

/// Loads the config file if one was given. No path means an empty config.
pub fn load_config(path: Option<&Path>) -> Result<FileConfig> {
    let Some(path) = path else {
        return Ok(FileConfig::default());
    };

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    if contents.trim().is_empty() {
        debug!("config file {} is empty", path.display());
        return Ok(FileConfig::default());
    }

    serde_yaml::from_str(&contents)
        .with_context(|| format!("parsing config file {}", path.display()))
}

/// Parses a log level name. Unknown levels fall back to `warn`.
pub fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" | "warning" => LevelFilter::Warn,
        "error" | "critical" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => DEFAULT_LOG_LEVEL,
    }
}

/// Priority: `--log-level` / PROMRANGE_LOG_LEVEL > config file > warn.
pub fn resolve_log_level(flag: Option<&str>, config: &Result<FileConfig>) -> LevelFilter {
    if let Some(level) = flag {
        return parse_log_level(level);
    }

    config
        .as_ref()
        .ok()
        .and_then(|config| config.log_level.as_deref())
        .map(parse_log_level)
        .unwrap_or(DEFAULT_LOG_LEVEL)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_full_config() {
        let yaml = r#"
host: https://icp.example.com:8443
gateway: true
token: Bearer abc
ca_cert: /etc/promrange/ca.pem
timeout: 45s
time_format: utc
log_level: debug
"#;
        let file = create_test_config(yaml);
        let config = load_config(Some(file.path())).unwrap();

        assert_eq!(config.host.as_deref(), Some("https://icp.example.com:8443"));
        assert!(config.gateway);
        assert_eq!(config.path_prefix, None);
        assert_eq!(config.token.as_deref(), Some("Bearer abc"));
        assert_eq!(config.ca_cert, Some(PathBuf::from("/etc/promrange/ca.pem")));
        assert_eq!(config.timeout().unwrap(), Some(Duration::from_secs(45)));
        assert_eq!(config.time_format, Some(TimestampFormat::Utc));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_minimal_config() {
        let file = create_test_config("host: http://localhost:9090\n");
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.host.as_deref(), Some("http://localhost:9090"));
        assert!(!config.gateway);
        assert_eq!(config.timeout().unwrap(), None);
        assert_eq!(config.time_format, None);
    }

    #[test]
    fn test_no_config_path() {
        assert_eq!(load_config(None).unwrap(), FileConfig::default());
    }

    #[test]
    fn test_empty_config_file() {
        let file = create_test_config("\n");
        assert_eq!(
            load_config(Some(file.path())).unwrap(),
            FileConfig::default()
        );
    }

    #[test]
    fn test_missing_config_file() {
        let err = load_config(Some(Path::new("/nonexistent/promrange.yaml"))).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/promrange.yaml"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let file = create_test_config("host: http://localhost:9090\nhots: typo\n");
        assert!(load_config(Some(file.path())).is_err());
    }

    #[test]
    fn test_invalid_time_format_rejected() {
        let file = create_test_config("time_format: iso\n");
        assert!(load_config(Some(file.path())).is_err());
    }

    #[test]
    fn test_invalid_timeout() {
        let file = create_test_config("timeout: soon\n");
        let config = load_config(Some(file.path())).unwrap();
        assert!(config.timeout().is_err());
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("TRACE"), LevelFilter::Trace);
        assert_eq!(parse_log_level("warning"), LevelFilter::Warn);
        assert_eq!(parse_log_level("critical"), LevelFilter::Error);
        assert_eq!(parse_log_level("off"), LevelFilter::Off);
        assert_eq!(parse_log_level("verbose"), LevelFilter::Warn);
    }

    #[test]
    fn test_log_level_priority() {
        let config = Ok(FileConfig {
            log_level: Some("debug".to_string()),
            ..Default::default()
        });
        assert_eq!(resolve_log_level(Some("error"), &config), LevelFilter::Error);
        assert_eq!(resolve_log_level(None, &config), LevelFilter::Debug);
        assert_eq!(
            resolve_log_level(None, &Ok(FileConfig::default())),
            LevelFilter::Warn
        );
        assert_eq!(
            resolve_log_level(None, &Err(anyhow::anyhow!("broken"))),
            LevelFilter::Warn
        );
    }
}
