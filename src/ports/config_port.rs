//! Configuration access port trait.

use crate::domain::error::BacktestError;

/// Read access to sectioned key/value configuration.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;

    /// Non-negative whole number, `default` when the key is absent or blank.
    /// Any other value is rejected rather than replaced by the default.
    fn get_count(&self, section: &str, key: &str, default: usize) -> Result<usize, BacktestError> {
        match self
            .get_string(section, key)
            .filter(|s| !s.trim().is_empty())
        {
            None => Ok(default),
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| BacktestError::ConfigInvalid {
                    section: section.to_string(),
                    key: key.to_string(),
                    reason: format!("{key} must be a non-negative whole number, got '{raw}'"),
                }),
        }
    }
}
