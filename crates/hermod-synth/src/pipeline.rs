//! The self-deploying CI/CD pipeline stack.
//!
//! GitHub push -> build and synth -> deploy prod.

use hermod_config::PipelineConfig;
use hermod_core::Stage;
use hermod_core::pipeline::{PipelineManifest, PipelineStage, ShellStep, SourceSpec};
use hermod_core::stack::Environment;
use tracing::debug;

use crate::application::{self, ApplicationProps};

pub const PIPELINE_STACK_ID: &str = "HermodPipeline";
pub const PIPELINE_NAME: &str = "hermod-pipeline";
pub const PIPELINE_DESCRIPTION: &str = "Hermod CI/CD Pipeline - deploys prod on GitHub push";

/// Stack id of the application inside each pipeline stage.
pub const STAGE_STACK_ID: &str = "HermodStack";

/// Commands run by the synth step.
pub const SYNTH_COMMANDS: &[&str] = &[
    "cargo build --locked --workspace",
    "cargo clippy --workspace -- -D warnings",
    "cargo test --workspace",
    "cargo run --locked -p hermod-cli -- synth --out cdk.out",
];

/// Build the pipeline stack from a resolved configuration.
///
/// Account and region come from `config`; nothing is read from the
/// environment here. The prod stage names its resources from `Stage::Prod`
/// regardless of `STAGE`.
pub fn build(config: &PipelineConfig) -> PipelineManifest {
    let environment = Environment::new(config.account(), config.region());

    let prod = PipelineStage {
        id: "Prod".to_string(),
        stage: Stage::Prod,
        environment: environment.clone(),
        stacks: vec![application::build(ApplicationProps {
            id: STAGE_STACK_ID.to_string(),
            stage: Stage::Prod,
            environment: None,
        })],
    };

    debug!(
        pipeline = PIPELINE_NAME,
        repo = config.github_repo(),
        branch = config.branch(),
        target = %environment,
        "built pipeline stack"
    );

    PipelineManifest {
        id: PIPELINE_STACK_ID.to_string(),
        pipeline_name: PIPELINE_NAME.to_string(),
        description: PIPELINE_DESCRIPTION.to_string(),
        environment,
        source: SourceSpec {
            repository: config.github_repo().to_string(),
            branch: config.branch().to_string(),
            connection_arn: config.connection_arn().to_string(),
        },
        synth: ShellStep {
            name: "Synth".to_string(),
            commands: SYNTH_COMMANDS.iter().map(|c| c.to_string()).collect(),
        },
        stages: vec![prod],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hermod_config::resolve_pipeline_config;
    use hermod_core::RemovalPolicy;
    use std::collections::HashMap;

    const ARN: &str = "arn:aws:codestar-connections:us-east-1:123456789012:connection/abc";

    fn config() -> PipelineConfig {
        let env: HashMap<String, String> = [
            ("GITHUB_CONNECTION_ARN", ARN),
            ("AWS_ACCOUNT_ID", "123456789012"),
            ("GITHUB_REPO", "myorg/myrepo"),
            ("GITHUB_BRANCH", "release"),
            ("AWS_REGION", "us-east-1"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        resolve_pipeline_config(&env).unwrap()
    }

    #[test]
    fn test_pipeline_metadata() {
        let pipeline = build(&config());
        assert_eq!(pipeline.id, "HermodPipeline");
        assert_eq!(pipeline.pipeline_name, "hermod-pipeline");
        assert_eq!(pipeline.description, PIPELINE_DESCRIPTION);
        assert_eq!(
            pipeline.environment,
            Environment::new("123456789012", "us-east-1")
        );
    }

    #[test]
    fn test_source_passes_config_through() {
        let pipeline = build(&config());
        assert_eq!(
            pipeline.source,
            SourceSpec {
                repository: "myorg/myrepo".to_string(),
                branch: "release".to_string(),
                connection_arn: ARN.to_string(),
            }
        );
    }

    #[test]
    fn test_synth_step() {
        let pipeline = build(&config());
        assert_eq!(pipeline.synth.name, "Synth");
        assert_eq!(pipeline.synth.commands.len(), SYNTH_COMMANDS.len());
        assert!(pipeline.synth.commands.last().unwrap().contains("synth"));
    }

    #[test]
    fn test_single_prod_stage() {
        let pipeline = build(&config());
        assert_eq!(pipeline.stages.len(), 1);

        let prod = &pipeline.stages[0];
        assert_eq!(prod.id, "Prod");
        assert_eq!(prod.stage, Stage::Prod);
        assert_eq!(prod.environment, pipeline.environment);

        let stack = &prod.stacks[0];
        assert_eq!(stack.id, "HermodStack");
        assert_eq!(stack.stage, Stage::Prod);
        assert_eq!(stack.removal_policy, RemovalPolicy::Retain);
        assert!(stack.environment.is_none());
        assert_eq!(
            stack.resource("RoutesTable").unwrap().physical_name.as_deref(),
            Some("hermod-prod-routes")
        );
    }
}
