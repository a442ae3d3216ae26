//! Generator settings.
//!
//! `GeneratorConfig::default()` is what the free `generate` functions use.
//! `from_env` overlays `MATRIX_*` environment variables on top of it.

/// Options per item: one correct answer plus seven distractors.
pub const OPTION_COUNT: usize = 8;

/// Renderer version tag reported in every payload.
pub const DEFAULT_RENDER_ENGINE: &str = "SVG-v3-rs";

pub const ENV_CELL_SIZE: &str = "MATRIX_CELL_SIZE";
pub const ENV_DISTRACTOR_ATTEMPTS: &str = "MATRIX_DISTRACTOR_ATTEMPTS";
pub const ENV_FILLER_ATTEMPTS: &str = "MATRIX_FILLER_ATTEMPTS";

/// Error from reading configuration overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The variable is set but does not parse as the expected type.
    InvalidValue { key: String, value: String },
    /// The value parsed but is outside the accepted range.
    OutOfRange { key: String, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value for {}: '{}'", key, value)
            }
            ConfigError::OutOfRange { key, value } => {
                write!(f, "Value out of range for {}: {}", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Configuration for item generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Canvas edge length in SVG user units.
    pub cell_size: u32,
    /// Cap on distractor proposals per item.
    pub distractor_attempts: usize,
    /// Random filler tries before falling back to cyclic fillers.
    pub filler_attempts: usize,
    pub render_engine: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            cell_size: 256,
            distractor_attempts: 100,
            filler_attempts: 50,
            render_engine: DEFAULT_RENDER_ENGINE.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Defaults overlaid with `MATRIX_CELL_SIZE`, `MATRIX_DISTRACTOR_ATTEMPTS`
    /// and `MATRIX_FILLER_ATTEMPTS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key/value source. Unset keys keep their
    /// current value.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(size) = parse_override::<u32>(&lookup, ENV_CELL_SIZE)? {
            if size == 0 {
                return Err(ConfigError::OutOfRange {
                    key: ENV_CELL_SIZE.to_string(),
                    value: size.to_string(),
                });
            }
            self.cell_size = size;
        }
        if let Some(n) = parse_override(&lookup, ENV_DISTRACTOR_ATTEMPTS)? {
            self.distractor_attempts = n;
        }
        if let Some(n) = parse_override(&lookup, ENV_FILLER_ATTEMPTS)? {
            self.filler_attempts = n;
        }
        Ok(self)
    }
}

fn parse_override<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let parsed = raw.trim().parse::<T>();
    match parsed {
        Ok(value) => Ok(Some(value)),
        Err(_) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.cell_size, 256);
        assert_eq!(config.distractor_attempts, 100);
        assert_eq!(config.filler_attempts, 50);
        assert_eq!(config.render_engine, "SVG-v3-rs");
    }

    #[test]
    fn test_overrides_apply() {
        let config = GeneratorConfig::default()
            .with_overrides(source(&[
                (ENV_CELL_SIZE, "128"),
                (ENV_FILLER_ATTEMPTS, " 0 "),
            ]))
            .unwrap();
        assert_eq!(config.cell_size, 128);
        assert_eq!(config.distractor_attempts, 100);
        assert_eq!(config.filler_attempts, 0);
    }

    #[test]
    fn test_bad_values_are_reported() {
        let err = GeneratorConfig::default()
            .with_overrides(source(&[(ENV_DISTRACTOR_ATTEMPTS, "lots")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: ENV_DISTRACTOR_ATTEMPTS.to_string(),
                value: "lots".to_string(),
            }
        );
        assert!(err.to_string().contains("MATRIX_DISTRACTOR_ATTEMPTS"));

        let err = GeneratorConfig::default()
            .with_overrides(source(&[(ENV_CELL_SIZE, "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { .. }));
    }
}
