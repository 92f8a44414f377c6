//! Runtime configuration
//!
//! Everything is read from the environment once at startup:
//!
//! | Variable              | Meaning                                   |
//! |-----------------------|-------------------------------------------|
//! | `VARPANE_MAX_ELEMENTS`| children listed per node (unset: all)     |
//! | `VARPANE_LOG`         | log file; logging is off when unset       |
//! | `VARPANE_LOG_FILTER`  | `EnvFilter` directive                     |
//! | `VARPANE_CLIPBOARD`   | `osc52` (default) or `off`                |
//! | `VARPANE_LAYOUT`      | initial layout name                       |

use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_LOG_FILTER: &str = "varpane=debug";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a non-negative number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("{name} must be one of {expected}, got {value:?}")]
    InvalidChoice {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipboardMode {
    #[default]
    Osc52,
    Off,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub max_elements: Option<usize>,
    pub log_file: Option<PathBuf>,
    pub log_filter: String,
    pub clipboard: ClipboardMode,
    pub layout: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_elements: None,
            log_file: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            clipboard: ClipboardMode::default(),
            layout: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable lookup; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let mut config = Config::default();

        if let Some(value) = get("VARPANE_MAX_ELEMENTS") {
            let n = value.trim().parse::<usize>().map_err(|_| ConfigError::InvalidNumber {
                name: "VARPANE_MAX_ELEMENTS",
                value: value.clone(),
            })?;
            config.max_elements = Some(n);
        }
        config.log_file = get("VARPANE_LOG").map(PathBuf::from);
        if let Some(filter) = get("VARPANE_LOG_FILTER") {
            config.log_filter = filter;
        }
        if let Some(value) = get("VARPANE_CLIPBOARD") {
            config.clipboard = match value.as_str() {
                "osc52" => ClipboardMode::Osc52,
                "off" => ClipboardMode::Off,
                _ => {
                    return Err(ConfigError::InvalidChoice {
                        name: "VARPANE_CLIPBOARD",
                        expected: "osc52, off",
                        value,
                    })
                }
            };
        }
        config.layout = get("VARPANE_LAYOUT");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.log_filter, "varpane=debug");
    }

    #[test]
    fn test_reads_every_variable() {
        let config = Config::from_lookup(lookup(&[
            ("VARPANE_MAX_ELEMENTS", "200"),
            ("VARPANE_LOG", "/tmp/varpane.log"),
            ("VARPANE_LOG_FILTER", "varpane=trace"),
            ("VARPANE_CLIPBOARD", "off"),
            ("VARPANE_LAYOUT", "memory"),
        ]))
        .unwrap();
        assert_eq!(config.max_elements, Some(200));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/varpane.log")));
        assert_eq!(config.log_filter, "varpane=trace");
        assert_eq!(config.clipboard, ClipboardMode::Off);
        assert_eq!(config.layout.as_deref(), Some("memory"));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("VARPANE_MAX_ELEMENTS", "-3")])),
            Err(ConfigError::InvalidNumber { .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("VARPANE_CLIPBOARD", "x11")])),
            Err(ConfigError::InvalidChoice { .. })
        ));
    }
}
