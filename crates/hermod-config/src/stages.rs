//! Stage resolution for direct deployments.

use hermod_core::{RemovalPolicy, Stage};
use serde::Serialize;
use tracing::debug;

use crate::ConfigResult;
use crate::env::{self, AWS_ACCOUNT_ID, AWS_REGION, DEFAULT_REGION, EnvSource, STAGE};

/// Resolved settings for deploying the application straight into one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageConfig {
    stage: Stage,
    account: String,
    region: String,
    stack_name: String,
}

impl StageConfig {
    fn new(stage: Stage, account: String, region: String) -> Self {
        Self {
            stage,
            account,
            region,
            stack_name: stage.stack_name(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Always `{stage}-hermod`.
    pub fn stack_name(&self) -> &str {
        &self.stack_name
    }
}

/// Current stage from `STAGE`. Only the exact value `prod` selects production.
pub fn resolve_stage<E: EnvSource + ?Sized>(env: &E) -> Stage {
    Stage::from_env_value(env.get(STAGE).as_deref())
}

pub fn is_prod<E: EnvSource + ?Sized>(env: &E) -> bool {
    resolve_stage(env) == Stage::Prod
}

/// Removal policy for durable resources in the current stage.
pub fn removal_policy<E: EnvSource + ?Sized>(env: &E) -> RemovalPolicy {
    RemovalPolicy::for_stage(resolve_stage(env))
}

/// Resolve the direct-deployment configuration.
///
/// Fails when `AWS_ACCOUNT_ID` is unset or empty.
pub fn resolve_stage_config<E: EnvSource + ?Sized>(env: &E) -> ConfigResult<StageConfig> {
    let stage = resolve_stage(env);
    let account = env::require(env, AWS_ACCOUNT_ID)?;
    let region = env::optional_or(env, AWS_REGION, DEFAULT_REGION);

    let config = StageConfig::new(stage, account, region);
    debug!(
        stage = %config.stage,
        region = %config.region,
        stack = %config.stack_name,
        "resolved stage config"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;
    use crate::env::env_of;

    #[test]
    fn test_stage_defaults_to_dev() {
        assert_eq!(resolve_stage(&env_of(&[])), Stage::Dev);
        assert_eq!(resolve_stage(&env_of(&[(STAGE, "")])), Stage::Dev);
        assert_eq!(resolve_stage(&env_of(&[(STAGE, "staging")])), Stage::Dev);
        assert_eq!(resolve_stage(&env_of(&[(STAGE, "Prod")])), Stage::Dev);
    }

    #[test]
    fn test_stage_prod_on_exact_match() {
        assert_eq!(resolve_stage(&env_of(&[(STAGE, "prod")])), Stage::Prod);
    }

    #[test]
    fn test_is_prod() {
        assert!(!is_prod(&env_of(&[])));
        assert!(!is_prod(&env_of(&[(STAGE, "dev")])));
        assert!(is_prod(&env_of(&[(STAGE, "prod")])));
    }

    #[test]
    fn test_removal_policy_by_stage() {
        assert_eq!(removal_policy(&env_of(&[])), RemovalPolicy::Destroy);
        assert_eq!(
            removal_policy(&env_of(&[(STAGE, "prod")])),
            RemovalPolicy::Retain
        );
    }

    #[test]
    fn test_missing_account_fails() {
        let err = resolve_stage_config(&env_of(&[])).unwrap_err();
        assert_eq!(err.to_string(), "AWS_ACCOUNT_ID environment variable is required");

        let err = resolve_stage_config(&env_of(&[(AWS_ACCOUNT_ID, "")])).unwrap_err();
        assert_eq!(err, ConfigError::missing(AWS_ACCOUNT_ID));
    }

    #[test]
    fn test_missing_account_fails_even_in_prod() {
        let err = resolve_stage_config(&env_of(&[(STAGE, "prod")])).unwrap_err();
        assert_eq!(err.variable(), AWS_ACCOUNT_ID);
    }

    #[test]
    fn test_dev_config_with_defaults() {
        let env = env_of(&[(AWS_ACCOUNT_ID, "123456789012")]);
        let config = resolve_stage_config(&env).unwrap();

        assert_eq!(config.stage(), Stage::Dev);
        assert_eq!(config.account(), "123456789012");
        assert_eq!(config.region(), "eu-central-1");
        assert_eq!(config.stack_name(), "dev-hermod");
    }

    #[test]
    fn test_prod_config() {
        let env = env_of(&[(AWS_ACCOUNT_ID, "123456789012"), (STAGE, "prod")]);
        let config = resolve_stage_config(&env).unwrap();

        assert_eq!(config.stage(), Stage::Prod);
        assert_eq!(config.stack_name(), "prod-hermod");
    }

    #[test]
    fn test_custom_region() {
        let env = env_of(&[(AWS_ACCOUNT_ID, "123456789012"), (AWS_REGION, "us-east-1")]);
        let config = resolve_stage_config(&env).unwrap();
        assert_eq!(config.region(), "us-east-1");
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let env = env_of(&[(AWS_ACCOUNT_ID, "123456789012"), (STAGE, "prod")]);
        assert_eq!(
            resolve_stage_config(&env).unwrap(),
            resolve_stage_config(&env).unwrap()
        );
    }

    #[test]
    fn test_serializes_all_fields() {
        let env = env_of(&[(AWS_ACCOUNT_ID, "123456789012")]);
        let json = serde_json::to_value(resolve_stage_config(&env).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "stage": "dev",
                "account": "123456789012",
                "region": "eu-central-1",
                "stack_name": "dev-hermod",
            })
        );
    }
}
