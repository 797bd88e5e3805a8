//! Configuration resolution errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("{name} environment variable is required{}", format_hint(.expected))]
    MissingVariable {
        name: &'static str,
        /// Expected shape of the value, quoted back to the user.
        expected: Option<&'static str>,
    },
}

impl ConfigError {
    pub fn missing(name: &'static str) -> Self {
        Self::MissingVariable {
            name,
            expected: None,
        }
    }

    pub fn missing_with_format(name: &'static str, expected: &'static str) -> Self {
        Self::MissingVariable {
            name,
            expected: Some(expected),
        }
    }

    /// Name of the variable that failed validation.
    pub fn variable(&self) -> &'static str {
        match self {
            Self::MissingVariable { name, .. } => name,
        }
    }
}

fn format_hint(expected: &Option<&'static str>) -> String {
    match expected {
        Some(expected) => format!(" (format: {})", expected),
        None => String::new(),
    }
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
