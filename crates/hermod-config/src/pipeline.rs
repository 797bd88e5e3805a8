//! Pipeline configuration for GitHub-driven deployments.

use serde::Serialize;
use tracing::debug;

use crate::ConfigResult;
use crate::env::{
    self, AWS_ACCOUNT_ID, AWS_REGION, DEFAULT_BRANCH, DEFAULT_REGION, EnvSource, GITHUB_BRANCH,
    GITHUB_CONNECTION_ARN, GITHUB_REPO,
};

/// Resolved settings for the self-deploying pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineConfig {
    github_repo: String,
    branch: String,
    connection_arn: String,
    account: String,
    region: String,
}

impl PipelineConfig {
    /// Repository slug, expected as `owner/repo`.
    pub fn github_repo(&self) -> &str {
        &self.github_repo
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// GitHub connection ARN used by the pipeline source.
    pub fn connection_arn(&self) -> &str {
        &self.connection_arn
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

/// Resolve the pipeline configuration.
///
/// Required variables are checked in a fixed order and the first missing one
/// is reported: `GITHUB_CONNECTION_ARN`, then `AWS_ACCOUNT_ID`, then
/// `GITHUB_REPO`. Defaults for branch and region are applied afterwards.
pub fn resolve_pipeline_config<E: EnvSource + ?Sized>(env: &E) -> ConfigResult<PipelineConfig> {
    let connection_arn = env::require(env, GITHUB_CONNECTION_ARN)?;
    let account = env::require(env, AWS_ACCOUNT_ID)?;
    // Presence only; the slash format is not checked.
    let github_repo = env::require_formatted(env, GITHUB_REPO, "owner/repo")?;

    let config = PipelineConfig {
        github_repo,
        branch: env::optional_or(env, GITHUB_BRANCH, DEFAULT_BRANCH),
        connection_arn,
        account,
        region: env::optional_or(env, AWS_REGION, DEFAULT_REGION),
    };
    debug!(
        repo = %config.github_repo,
        branch = %config.branch,
        region = %config.region,
        connection = %env::redact(&config.connection_arn),
        "resolved pipeline config"
    );
    Ok(config)
}
