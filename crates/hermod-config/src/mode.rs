//! Deployment mode selection.
//!
//! `GITHUB_CONNECTION_ARN` decides everything: when it holds a value the
//! pipeline is deployed, otherwise the application goes straight into the
//! configured account.

use derive_more::Display;
use serde::Serialize;
use tracing::info;

use crate::ConfigResult;
use crate::env::{self, EnvSource, GITHUB_CONNECTION_ARN};
use crate::pipeline::{PipelineConfig, resolve_pipeline_config};
use crate::stages::{StageConfig, resolve_stage_config};

/// Which topology to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum ModeKind {
    #[display("pipeline")]
    Pipeline,
    #[display("direct")]
    Direct,
}

/// A selected mode together with its validated configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "config", rename_all = "lowercase")]
pub enum DeploymentMode {
    /// Deploy the CI/CD pipeline, which in turn deploys prod on push.
    Pipeline(PipelineConfig),
    /// Deploy the application stack directly.
    Direct(StageConfig),
}

impl DeploymentMode {
    pub fn kind(&self) -> ModeKind {
        match self {
            DeploymentMode::Pipeline(_) => ModeKind::Pipeline,
            DeploymentMode::Direct(_) => ModeKind::Direct,
        }
    }
}

/// Decide the mode without resolving anything else.
pub fn mode_kind<E: EnvSource + ?Sized>(env: &E) -> ModeKind {
    if env::is_set(env, GITHUB_CONNECTION_ARN) {
        ModeKind::Pipeline
    } else {
        ModeKind::Direct
    }
}

/// Select the deployment mode and resolve the matching configuration.
///
/// Exactly one resolver runs. A resolver error is returned as-is; there is
/// no fallback to the other mode.
pub fn select_mode<E: EnvSource + ?Sized>(env: &E) -> ConfigResult<DeploymentMode> {
    let kind = mode_kind(env);
    info!(mode = %kind, "selected deployment mode");

    match kind {
        ModeKind::Pipeline => resolve_pipeline_config(env).map(DeploymentMode::Pipeline),
        ModeKind::Direct => resolve_stage_config(env).map(DeploymentMode::Direct),
    }
}
