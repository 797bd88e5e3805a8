//! Topology construction for a selected deployment mode.

use hermod_config::{DeploymentMode, StageConfig};
use hermod_core::stack::Environment;
use hermod_core::synth::{Artifact, CloudAssembly};

use crate::application::{self, ApplicationProps};
use crate::pipeline;

/// Build the assembly for a mode. Exactly one top-level artifact is produced.
pub fn construct(mode: &DeploymentMode) -> CloudAssembly {
    let artifact = match mode {
        DeploymentMode::Pipeline(config) => Artifact::Pipeline(pipeline::build(config)),
        DeploymentMode::Direct(config) => Artifact::Stack(direct_stack(config)),
    };
    CloudAssembly::new(vec![artifact])
}

fn direct_stack(config: &StageConfig) -> hermod_core::stack::StackManifest {
    application::build(ApplicationProps {
        id: config.stack_name().to_string(),
        stage: config.stage(),
        environment: Some(Environment::new(config.account(), config.region())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hermod_config::select_mode;
    use hermod_core::Stage;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_direct_mode_builds_stage_stack() {
        let mode = select_mode(&env(&[
            ("AWS_ACCOUNT_ID", "123456789012"),
            ("AWS_REGION", "eu-west-1"),
            ("STAGE", "prod"),
        ]))
        .unwrap();

        let assembly = construct(&mode);
        assert_eq!(assembly.artifacts.len(), 1);

        let Some(Artifact::Stack(stack)) = assembly.artifact("prod-hermod") else {
            panic!("expected prod-hermod stack");
        };
        assert_eq!(stack.stage, Stage::Prod);
        assert_eq!(
            stack.environment,
            Some(Environment::new("123456789012", "eu-west-1"))
        );
    }

    #[test]
    fn test_pipeline_mode_builds_pipeline() {
        let mode = select_mode(&env(&[
            (
                "GITHUB_CONNECTION_ARN",
                "arn:aws:codestar-connections:eu-central-1:123456789012:connection/abc",
            ),
            ("AWS_ACCOUNT_ID", "123456789012"),
            ("GITHUB_REPO", "myorg/myrepo"),
            ("STAGE", "dev"),
        ]))
        .unwrap();

        let assembly = construct(&mode);
        assert_eq!(assembly.artifacts.len(), 1);

        let Some(Artifact::Pipeline(pipeline)) = assembly.artifact("HermodPipeline") else {
            panic!("expected pipeline artifact");
        };
        assert_eq!(pipeline.source.repository, "myorg/myrepo");
        assert_eq!(pipeline.source.branch, "main");
        assert_eq!(
            pipeline.environment,
            Environment::new("123456789012", "eu-central-1")
        );
        // STAGE does not leak into the prod stage.
        assert_eq!(pipeline.stages[0].stacks[0].stage, Stage::Prod);
    }
}
