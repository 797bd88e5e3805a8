//! CI/CD pipeline manifests.

use serde::{Deserialize, Serialize};

use crate::stack::{Environment, StackManifest};
use crate::stage::Stage;

/// A self-deploying CI/CD pipeline stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineManifest {
    /// Stack id of the pipeline itself (e.g. "HermodPipeline").
    pub id: String,
    /// Pipeline name in the CI service (e.g. "hermod-pipeline").
    pub pipeline_name: String,
    pub description: String,
    pub environment: Environment,
    /// Where the pipeline pulls its source from.
    pub source: SourceSpec,
    /// Step that builds the workspace and synthesizes the stacks.
    pub synth: ShellStep,
    /// Deployment stages, in order.
    pub stages: Vec<PipelineStage>,
}

/// Source repository connected through a GitHub connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    /// Repository slug in `owner/repo` form.
    pub repository: String,
    pub branch: String,
    pub connection_arn: String,
}

/// A named list of shell commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellStep {
    pub name: String,
    pub commands: Vec<String>,
}

/// A deployment stage within the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStage {
    /// Stage id in the pipeline (e.g. "Prod").
    pub id: String,
    pub stage: Stage,
    pub environment: Environment,
    pub stacks: Vec<StackManifest>,
}
