use anyhow::{bail, Context, Result};

use crate::data::loader::{LoadOptions, DEFAULT_MAX_INPUT_BYTES};

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values are errors.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub max_input_bytes: u64,
    pub delimiter: u8,
    pub preview_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            delimiter: b',',
            preview_rows: 5,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key → value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let max_input_bytes = match lookup("SALARY_EXPLORER_MAX_BYTES") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .context("SALARY_EXPLORER_MAX_BYTES must be a byte count")?,
            None => defaults.max_input_bytes,
        };

        let delimiter = match lookup("SALARY_EXPLORER_DELIMITER") {
            Some(v) => parse_delimiter(&v)?,
            None => defaults.delimiter,
        };

        let preview_rows = match lookup("SALARY_EXPLORER_PREVIEW_ROWS") {
            Some(v) => v
                .trim()
                .parse::<usize>()
                .context("SALARY_EXPLORER_PREVIEW_ROWS must be a row count")?,
            None => defaults.preview_rows,
        };

        Ok(Config {
            max_input_bytes,
            delimiter,
            preview_rows,
        })
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            delimiter: self.delimiter,
            max_input_bytes: self.max_input_bytes,
        }
    }
}

fn parse_delimiter(value: &str) -> Result<u8> {
    let value = if value == "\\t" { "\t" } else { value };
    match value.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => bail!("SALARY_EXPLORER_DELIMITER must be a single ASCII character, got {value:?}"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(Config::from_lookup(lookup(&[])).unwrap(), Config::default());
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("SALARY_EXPLORER_MAX_BYTES", "1024"),
            ("SALARY_EXPLORER_DELIMITER", "\\t"),
            ("SALARY_EXPLORER_PREVIEW_ROWS", " 10 "),
        ]))
        .unwrap();
        assert_eq!(config.max_input_bytes, 1024);
        assert_eq!(config.delimiter, b'\t');
        assert_eq!(config.preview_rows, 10);
        assert_eq!(config.load_options().delimiter, b'\t');
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(Config::from_lookup(lookup(&[("SALARY_EXPLORER_MAX_BYTES", "lots")])).is_err());
        assert!(Config::from_lookup(lookup(&[("SALARY_EXPLORER_DELIMITER", ";;")])).is_err());
        assert!(Config::from_lookup(lookup(&[("SALARY_EXPLORER_DELIMITER", "é")])).is_err());
    }
}
