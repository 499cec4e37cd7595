/// CatalogView Configuration
///
/// Defaults mirror the product dashboard: 5 rows per page, a "Row size" selector
/// from 5 to 50 in steps of 5, and 5 page-number controls per block. Values can come
/// from a JSON document and be overridden from the environment:
///
/// | Variable                      | Field               |
/// |-------------------------------|---------------------|
/// | `CATALOGVIEW_PAGE_SIZE`       | `default_page_size` |
/// | `CATALOGVIEW_PAGE_BLOCK_SIZE` | `page_block_size`   |
/// | `CATALOGVIEW_FUZZY_MODE`      | `fuzzy.mode`        |
/// | `CATALOGVIEW_FUZZY_MIN_SCORE` | `fuzzy.min_score`   |

use crate::error::ConfigError;
use crate::fuzzy::{FuzzyConfig, FuzzyMode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub default_page_size: usize,
    pub page_size_options: Vec<usize>,
    pub page_block_size: usize,
    pub fuzzy: FuzzyConfig,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            default_page_size: 5,
            page_size_options: (1..=10).map(|n| n * 5).collect(),
            page_block_size: 5,
            fuzzy: FuzzyConfig::default(),
        }
    }
}

impl ViewConfig {
    /// Parse a JSON config; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ViewConfig = serde_json::from_str(json)?;
        config.validate()
    }

    /// Defaults overridden by `CATALOGVIEW_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        ViewConfig::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key/value lookup, then validate.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(size) = parse_var(&lookup, "CATALOGVIEW_PAGE_SIZE")? {
            self.default_page_size = size;
        }
        if let Some(size) = parse_var(&lookup, "CATALOGVIEW_PAGE_BLOCK_SIZE")? {
            self.page_block_size = size;
        }
        if let Some(mode) = lookup("CATALOGVIEW_FUZZY_MODE") {
            self.fuzzy.mode = match mode.to_lowercase().as_str() {
                "subsequence" => FuzzyMode::Subsequence,
                "substring" => FuzzyMode::Substring,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        key: "CATALOGVIEW_FUZZY_MODE".to_string(),
                        value: mode,
                    })
                }
            };
        }
        if let Some(score) = parse_var(&lookup, "CATALOGVIEW_FUZZY_MIN_SCORE")? {
            self.fuzzy.min_score = Some(score);
        }
        self.validate()
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.default_page_size == 0 {
            return Err(ConfigError::NotPositive("default_page_size"));
        }
        if self.page_block_size == 0 {
            return Err(ConfigError::NotPositive("page_block_size"));
        }
        if self.page_size_options.contains(&0) {
            return Err(ConfigError::NotPositive("page_size_options"));
        }
        Ok(self)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { key: key.to_string(), value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ViewConfig::default();
        assert_eq!(config.default_page_size, 5);
        assert_eq!(config.page_block_size, 5);
        assert_eq!(config.page_size_options, vec![5, 10, 15, 20, 25, 30, 35, 40, 45, 50]);
        assert_eq!(config.fuzzy.mode, FuzzyMode::Subsequence);
    }

    #[test]
    fn test_from_json_keeps_missing_defaults() {
        let config = ViewConfig::from_json_str(r#"{"default_page_size": 20, "fuzzy": {"mode": "substring"}}"#).unwrap();
        assert_eq!(config.default_page_size, 20);
        assert_eq!(config.page_block_size, 5);
        assert_eq!(config.fuzzy, FuzzyConfig { mode: FuzzyMode::Substring, min_score: None });
    }

    #[test]
    fn test_invalid_json_config() {
        assert!(matches!(ViewConfig::from_json_str("{"), Err(ConfigError::Json(_))));
        assert!(matches!(
            ViewConfig::from_json_str(r#"{"page_block_size": 0}"#),
            Err(ConfigError::NotPositive("page_block_size"))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let config = ViewConfig::default()
            .with_overrides(lookup(&[
                ("CATALOGVIEW_PAGE_SIZE", "25"),
                ("CATALOGVIEW_FUZZY_MODE", "Substring"),
                ("CATALOGVIEW_FUZZY_MIN_SCORE", "40"),
            ]))
            .unwrap();
        assert_eq!(config.default_page_size, 25);
        assert_eq!(config.fuzzy.mode, FuzzyMode::Substring);
        assert_eq!(config.fuzzy.min_score, Some(40));
    }

    #[test]
    fn test_env_override_errors() {
        let err = ViewConfig::default()
            .with_overrides(lookup(&[("CATALOGVIEW_PAGE_SIZE", "lots")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { ref key, .. } if key == "CATALOGVIEW_PAGE_SIZE"));

        let err = ViewConfig::default()
            .with_overrides(lookup(&[("CATALOGVIEW_PAGE_SIZE", "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotPositive("default_page_size")));
    }
}
