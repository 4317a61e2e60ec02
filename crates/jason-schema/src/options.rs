//! Validator configuration.
//!
//! Defaults suit most callers. Override via environment variables or
//! explicit construction.

use jason_core::ConfigError;

/// Environment variable toggling the built-in structural keyword checks.
pub const ENV_STRUCTURAL_KEYWORDS: &str = "JASON_STRUCTURAL_KEYWORDS";
/// Environment variable overriding the maximum traversal depth.
pub const ENV_MAX_DEPTH: &str = "JASON_MAX_DEPTH";

/// Options controlling instance validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Run the built-in structural keyword checks and descend into child
    /// schemas. When false, only the type and enum checks run at the root.
    pub structural_keywords: bool,
    /// Deepest instance pointer that is still visited. Deeper locations get
    /// a single depth diagnostic instead.
    pub max_depth: usize,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            structural_keywords: true,
            max_depth: 64,
        }
    }
}

impl ValidatorOptions {
    /// Load options from environment variables.
    ///
    /// Variables:
    /// - `JASON_STRUCTURAL_KEYWORDS` (`true`/`false`/`1`/`0`, default: `true`)
    /// - `JASON_MAX_DEPTH` (positive integer, default: 64)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load options through `lookup`, which maps a variable name to its
    /// value. Unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let structural_keywords = match lookup(ENV_STRUCTURAL_KEYWORDS) {
            None => defaults.structural_keywords,
            Some(raw) => match raw.trim() {
                "true" | "1" => true,
                "false" | "0" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        variable: ENV_STRUCTURAL_KEYWORDS,
                        value: raw,
                        expected: "true, false, 1 or 0",
                    })
                }
            },
        };

        let max_depth = match lookup(ENV_MAX_DEPTH) {
            None => defaults.max_depth,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(depth) if depth > 0 => depth,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        variable: ENV_MAX_DEPTH,
                        value: raw,
                        expected: "a positive integer",
                    })
                }
            },
        };

        Ok(Self {
            structural_keywords,
            max_depth,
        })
    }

    /// Enable or disable the built-in structural keyword checks.
    #[must_use]
    pub fn structural_keywords(mut self, enabled: bool) -> Self {
        self.structural_keywords = enabled;
        self
    }

    /// Set the maximum traversal depth.
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}
