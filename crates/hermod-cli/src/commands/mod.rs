//! CLI command implementations.

pub mod synth;

use anyhow::{Context, Result};
use hermod_config::{DeploymentMode, EnvSource, resolve_stage, select_mode};

/// Print the resolved mode and configuration as JSON.
pub fn config<E: EnvSource + ?Sized>(env: &E) -> Result<()> {
    let mode = select_mode(env)?;
    println!("{}", render_mode(&mode)?);
    Ok(())
}

/// Print the resolved stage.
pub fn stage<E: EnvSource + ?Sized>(env: &E) {
    println!("{}", resolve_stage(env));
}

fn render_mode(mode: &DeploymentMode) -> Result<String> {
    serde_json::to_string_pretty(mode).context("Failed to serialize configuration")
}
