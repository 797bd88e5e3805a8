//! Environment variable sources.
//!
//! Resolvers never touch `std::env` directly; they read through an
//! [`EnvSource`] so tests can hand them a plain map.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::{ConfigError, ConfigResult};

pub const GITHUB_CONNECTION_ARN: &str = "GITHUB_CONNECTION_ARN";
pub const AWS_ACCOUNT_ID: &str = "AWS_ACCOUNT_ID";
pub const GITHUB_REPO: &str = "GITHUB_REPO";
pub const GITHUB_BRANCH: &str = "GITHUB_BRANCH";
pub const AWS_REGION: &str = "AWS_REGION";
pub const STAGE: &str = "STAGE";

pub const DEFAULT_REGION: &str = "eu-central-1";
pub const DEFAULT_BRANCH: &str = "main";

/// Key/value lookup over some environment.
pub trait EnvSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

impl<E: EnvSource + ?Sized> EnvSource for &E {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// Read a variable that must be present and non-empty.
pub fn require<E: EnvSource + ?Sized>(env: &E, key: &'static str) -> ConfigResult<String> {
    non_empty(env, key).ok_or_else(|| ConfigError::missing(key))
}

/// Like [`require`], but the error also names the expected value format.
pub fn require_formatted<E: EnvSource + ?Sized>(
    env: &E,
    key: &'static str,
    expected: &'static str,
) -> ConfigResult<String> {
    non_empty(env, key).ok_or_else(|| ConfigError::missing_with_format(key, expected))
}

/// Read an optional variable, substituting `default` only when it is unset.
///
/// An empty value is kept as-is.
pub fn optional_or<E: EnvSource + ?Sized>(env: &E, key: &str, default: &str) -> String {
    match env.get(key) {
        Some(value) => {
            if value.is_empty() {
                warn!(variable = key, "variable is set but empty; default not applied");
            }
            value
        }
        None => {
            debug!(variable = key, default, "variable unset, using default");
            default.to_string()
        }
    }
}

/// Whether a variable is set to something other than the empty string.
pub fn is_set<E: EnvSource + ?Sized>(env: &E, key: &str) -> bool {
    non_empty(env, key).is_some()
}

fn non_empty<E: EnvSource + ?Sized>(env: &E, key: &str) -> Option<String> {
    env.get(key).filter(|value| !value.is_empty())
}

/// Load a `.env` file from the working directory (or a parent) into the
/// process environment. Variables already set are left untouched.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenv::dotenv() {
        Ok(path) => {
            debug!(path = %path.display(), "loaded .env file");
            Some(path)
        }
        Err(err) if err.not_found() => None,
        Err(err) => {
            warn!(error = %err, "failed to load .env file");
            None
        }
    }
}

/// Mask all but the last four characters of a sensitive value for logging.
pub fn redact(value: &str) -> String {
    let visible: String = value
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if visible.chars().count() == value.chars().count() {
        "*".repeat(value.chars().count())
    } else {
        format!("***{}", visible)
    }
}

#[cfg(test)]
pub(crate) fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
