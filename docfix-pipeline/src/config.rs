//! Runtime knobs for docstring insertion, loaded from `DOCFIX_*` variables.

use std::fmt;
use std::str::FromStr;

use docfix_core::normalize::DEFAULT_MAX_LINE_WIDTH;

use crate::errors::ConfigError;

/// Narrowest width that still leaves room for nested entries.
pub const MIN_LINE_WIDTH: usize = 20;
pub const DEFAULT_MAX_FILE_CONTEXT_CHARS: usize = 12_000;

/// What a failed declaration means for the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Any failed declaration or errored file asks for review.
    #[default]
    Fail,
    /// Failures are reported but only modifications ask for review.
    Warn,
}

impl FromStr for FailurePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" => Ok(FailurePolicy::Fail),
            "warn" => Ok(FailurePolicy::Warn),
            other => Err(ConfigError::InvalidValue {
                var: "DOCFIX_ON_GENERATION_FAILURE",
                value: other.to_string(),
                expected: "fail | warn",
            }),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailurePolicy::Fail => "fail",
            FailurePolicy::Warn => "warn",
        })
    }
}

/// Config bag for one run. Built once in `main` and passed by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocfixConfig {
    /// Maximum docstring line width, base indent included.
    pub max_line_width: usize,
    /// Send the whole file as background to the generator.
    pub include_file_context: bool,
    /// Cap on the background text, in bytes.
    pub max_file_context_chars: usize,
    pub on_generation_failure: FailurePolicy,
}

impl Default for DocfixConfig {
    fn default() -> Self {
        Self {
            max_line_width: DEFAULT_MAX_LINE_WIDTH,
            include_file_context: true,
            max_file_context_chars: DEFAULT_MAX_FILE_CONTEXT_CHARS,
            on_generation_failure: FailurePolicy::Fail,
        }
    }
}

impl DocfixConfig {
    /// Reads `DOCFIX_MAX_LINE_WIDTH`, `DOCFIX_FILE_CONTEXT`,
    /// `DOCFIX_MAX_FILE_CONTEXT_CHARS` and `DOCFIX_ON_GENERATION_FAILURE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());
        let d = Self::default();

        let cfg = Self {
            max_line_width: match get("DOCFIX_MAX_LINE_WIDTH") {
                Some(v) => parse_usize("DOCFIX_MAX_LINE_WIDTH", &v)?,
                None => d.max_line_width,
            },
            include_file_context: match get("DOCFIX_FILE_CONTEXT") {
                Some(v) => parse_bool("DOCFIX_FILE_CONTEXT", &v)?,
                None => d.include_file_context,
            },
            max_file_context_chars: match get("DOCFIX_MAX_FILE_CONTEXT_CHARS") {
                Some(v) => parse_usize("DOCFIX_MAX_FILE_CONTEXT_CHARS", &v)?,
                None => d.max_file_context_chars,
            },
            on_generation_failure: match get("DOCFIX_ON_GENERATION_FAILURE") {
                Some(v) => v.parse()?,
                None => d.on_generation_failure,
            },
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_line_width < MIN_LINE_WIDTH {
            return Err(ConfigError::TooSmall {
                var: "DOCFIX_MAX_LINE_WIDTH",
                min: MIN_LINE_WIDTH,
            });
        }
        Ok(())
    }
}

fn parse_usize(var: &'static str, v: &str) -> Result<usize, ConfigError> {
    v.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        var,
        value: v.to_string(),
    })
}

fn parse_bool(var: &'static str, v: &str) -> Result<bool, ConfigError> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: v.to_string(),
            expected: "true | false",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = DocfixConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, DocfixConfig::default());
        assert_eq!(cfg.max_line_width, 72);
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = DocfixConfig::from_lookup(lookup(&[
            ("DOCFIX_MAX_LINE_WIDTH", "88"),
            ("DOCFIX_FILE_CONTEXT", "off"),
            ("DOCFIX_ON_GENERATION_FAILURE", "WARN"),
        ]))
        .unwrap();
        assert_eq!(cfg.max_line_width, 88);
        assert!(!cfg.include_file_context);
        assert_eq!(cfg.on_generation_failure, FailurePolicy::Warn);
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            DocfixConfig::from_lookup(lookup(&[("DOCFIX_MAX_LINE_WIDTH", "wide")])),
            Err(ConfigError::InvalidNumber {
                var: "DOCFIX_MAX_LINE_WIDTH",
                value: "wide".into()
            })
        );
        assert!(matches!(
            DocfixConfig::from_lookup(lookup(&[("DOCFIX_MAX_LINE_WIDTH", "10")])),
            Err(ConfigError::TooSmall { .. })
        ));
        assert!("sometimes".parse::<FailurePolicy>().is_err());
    }
}
