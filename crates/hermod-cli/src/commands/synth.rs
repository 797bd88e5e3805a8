//! Synthesis command.

use anyhow::{Context, Result};
use hermod_config::{DeploymentMode, EnvSource, select_mode};
use hermod_synth::{AssemblyWriter, StdoutSynthesizer, SynthOutput, Synthesizer, construct};
use tracing::info;

/// Resolve the mode, build its topology and hand it to a synthesizer.
///
/// A configuration error aborts before anything is constructed.
pub fn run<E: EnvSource + ?Sized>(env: &E, out: &str, dry_run: bool) -> Result<SynthOutput> {
    let mode = select_mode(env)?;
    log_mode(&mode);

    let assembly = construct(&mode);
    let synthesizer: Box<dyn Synthesizer> = if dry_run {
        Box::new(StdoutSynthesizer)
    } else {
        Box::new(AssemblyWriter::new(out))
    };

    let output = synthesizer
        .synth(&assembly)
        .with_context(|| format!("{} synthesis failed", synthesizer.name()))?;

    if let Some(dir) = &output.directory {
        println!(
            "Synthesized {} to {}",
            output.artifacts.join(", "),
            dir.display()
        );
    }
    Ok(output)
}

fn log_mode(mode: &DeploymentMode) {
    match mode {
        DeploymentMode::Pipeline(config) => info!(
            repo = config.github_repo(),
            branch = config.branch(),
            region = config.region(),
            "deploying pipeline"
        ),
        DeploymentMode::Direct(config) => info!(
            stack = config.stack_name(),
            stage = %config.stage(),
            region = config.region(),
            "deploying application stack"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::env;

    #[test]
    fn test_direct_mode_writes_stage_stack() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("cdk.out");

        let output = run(
            &env(&[("AWS_ACCOUNT_ID", "123456789012")]),
            out.to_str().unwrap(),
            false,
        )
        .unwrap();

        assert_eq!(output.artifacts, vec!["dev-hermod".to_string()]);
        assert!(out.join("manifest.json").exists());
        assert!(out.join("dev-hermod.template.json").exists());
    }

    #[test]
    fn test_prod_stage_writes_prod_stack() {
        let dir = tempfile::tempdir().unwrap();

        let output = run(
            &env(&[("AWS_ACCOUNT_ID", "123456789012"), ("STAGE", "prod")]),
            dir.path().to_str().unwrap(),
            false,
        )
        .unwrap();

        assert_eq!(output.artifacts, vec!["prod-hermod".to_string()]);
    }

    #[test]
    fn test_pipeline_mode_writes_pipeline() {
        let dir = tempfile::tempdir().unwrap();

        let output = run(
            &env(&[
                ("GITHUB_CONNECTION_ARN", "arn:aws:codestar-connections:x"),
                ("AWS_ACCOUNT_ID", "123456789012"),
                ("GITHUB_REPO", "myorg/myrepo"),
            ]),
            dir.path().to_str().unwrap(),
            false,
        )
        .unwrap();

        assert_eq!(output.artifacts, vec!["HermodPipeline".to_string()]);
        assert!(dir.path().join("HermodPipeline.template.json").exists());
    }

    #[test]
    fn test_config_error_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("cdk.out");

        let err = run(&env(&[]), out.to_str().unwrap(), false).unwrap_err();
        assert_eq!(
            err.to_string(),
            "AWS_ACCOUNT_ID environment variable is required"
        );
        assert!(!out.exists());
    }

    #[test]
    fn test_pipeline_error_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("cdk.out");

        let err = run(
            &env(&[
                ("GITHUB_CONNECTION_ARN", "arn:aws:codestar-connections:x"),
                ("AWS_ACCOUNT_ID", "123456789012"),
            ]),
            out.to_str().unwrap(),
            false,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "GITHUB_REPO environment variable is required (format: owner/repo)"
        );
        assert!(!out.exists());
    }
}
