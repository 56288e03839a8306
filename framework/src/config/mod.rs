//! Startup configuration
//!
//! A flat `key=value` properties file loaded once at startup and immutable
//! afterwards. The framework itself needs `packageScan` (the component
//! namespace) and `templateRoot` (the template directory); applications may
//! add their own keys. Missing required keys are explicit startup errors,
//! not a failure at the point of use.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Config key naming the namespace to scan for components.
pub const PACKAGE_SCAN: &str = "packageScan";
/// Config key naming the template directory.
pub const TEMPLATE_ROOT: &str = "templateRoot";

#[derive(Debug, Clone, Default)]
pub struct Config {
    values: HashMap<String, String>,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    /// Parse properties text: `key=value` lines, `#` or `!` comments,
    /// surrounding whitespace trimmed. Later lines overwrite earlier ones.
    pub fn parse(text: &str) -> Self {
        let mut values = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                values.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn require(&self, key: &'static str) -> Result<&str, ConfigError> {
        self.get(key).ok_or(ConfigError::Missing(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_keys_and_trims_whitespace() {
        let config = Config::parse("packageScan = my_app \ntemplateRoot=templates\n");
        assert_eq!(config.get(PACKAGE_SCAN), Some("my_app"));
        assert_eq!(config.get(TEMPLATE_ROOT), Some("templates"));
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let config = Config::parse("# comment\n! also a comment\n\nkey=value\n");
        assert_eq!(config.get("key"), Some("value"));
        assert_eq!(config.get("# comment"), None);
    }

    #[test]
    fn later_lines_overwrite_earlier_ones() {
        let config = Config::parse("key=first\nkey=second\n");
        assert_eq!(config.get("key"), Some("second"));
    }

    #[test]
    fn value_may_contain_equals() {
        let config = Config::parse("query=a=b\n");
        assert_eq!(config.get("query"), Some("a=b"));
    }

    #[test]
    fn missing_required_key_is_an_explicit_error() {
        let config = Config::parse("");
        let err = config.require(PACKAGE_SCAN).unwrap_err();
        assert!(err.to_string().contains("packageScan"));
    }
}
