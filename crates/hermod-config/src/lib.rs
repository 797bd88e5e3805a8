//! Environment-driven configuration for Hermod deployments.
//!
//! This crate handles:
//! - Environment sources (process environment, `.env` files, plain maps)
//! - Stage resolution for direct deployments
//! - Pipeline configuration for GitHub-driven deployments
//! - Selecting between the two

pub mod env;
pub mod error;
pub mod mode;
pub mod pipeline;
pub mod stages;

pub use env::{EnvSource, ProcessEnv};
pub use error::{ConfigError, ConfigResult};
pub use mode::{DeploymentMode, ModeKind, mode_kind, select_mode};
pub use pipeline::{PipelineConfig, resolve_pipeline_config};
pub use stages::{StageConfig, is_prod, removal_policy, resolve_stage, resolve_stage_config};
