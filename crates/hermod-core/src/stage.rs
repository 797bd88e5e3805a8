//! Deployment stages and the stage-driven naming and retention rules.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Application name used in stack and resource names.
pub const APP_NAME: &str = "hermod";

/// Deployment environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    #[display("dev")]
    Dev,
    #[display("prod")]
    Prod,
}

impl Stage {
    /// Parse a raw `STAGE` value.
    ///
    /// Only the exact, case-sensitive string `"prod"` selects production.
    /// Anything else, including no value at all, falls back to `Dev`.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some("prod") => Stage::Prod,
            _ => Stage::Dev,
        }
    }

    pub fn is_prod(self) -> bool {
        self == Stage::Prod
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Dev => "dev",
            Stage::Prod => "prod",
        }
    }

    /// Stack name for a directly deployed application, e.g. `dev-hermod`.
    pub fn stack_name(self) -> String {
        format!("{}-{}", self, APP_NAME)
    }

    /// Physical name for a resource owned by this stage, e.g. `hermod-dev-routes`.
    pub fn resource_name(self, base: &str) -> String {
        format!("{}-{}-{}", APP_NAME, self, base)
    }

    /// Physical name with a trailing qualifier, e.g. `hermod-prod-data-replica`.
    pub fn resource_name_with_suffix(self, base: &str, suffix: &str) -> String {
        format!("{}-{}-{}-{}", APP_NAME, self, base, suffix)
    }
}

/// What happens to a durable resource when its stack is torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum RemovalPolicy {
    #[display("retain")]
    Retain,
    #[display("destroy")]
    Destroy,
}

impl RemovalPolicy {
    /// Production keeps its data; every other stage cleans up after itself.
    pub fn for_stage(stage: Stage) -> Self {
        if stage.is_prod() {
            RemovalPolicy::Retain
        } else {
            RemovalPolicy::Destroy
        }
    }

    /// Whether bucket contents should be emptied before the bucket is deleted.
    pub fn auto_delete_objects(self) -> bool {
        self == RemovalPolicy::Destroy
    }
}
