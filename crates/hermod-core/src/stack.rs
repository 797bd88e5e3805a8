//! Application stack manifests.
//!
//! A manifest is the resolved description of one deployable stack: where it
//! goes, which stage owns it, and the inventory of named resources it holds.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::stage::{RemovalPolicy, Stage};

/// Target account and region for a stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub account: String,
    pub region: String,
}

impl Environment {
    pub fn new(account: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            region: region.into(),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "aws://{}/{}", self.account, self.region)
    }
}

/// Kind of cloud resource in a stack inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Table,
    Bucket,
    Function,
    RestApi,
    ApiRoute,
    LogGroup,
    EventRule,
    Distribution,
    CachePolicy,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Table => write!(f, "table"),
            ResourceKind::Bucket => write!(f, "bucket"),
            ResourceKind::Function => write!(f, "function"),
            ResourceKind::RestApi => write!(f, "rest_api"),
            ResourceKind::ApiRoute => write!(f, "api_route"),
            ResourceKind::LogGroup => write!(f, "log_group"),
            ResourceKind::EventRule => write!(f, "event_rule"),
            ResourceKind::Distribution => write!(f, "distribution"),
            ResourceKind::CachePolicy => write!(f, "cache_policy"),
        }
    }
}

/// A named resource inside a stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Construct id, unique within the stack (e.g. "RoutesTable").
    pub logical_id: String,
    pub kind: ResourceKind,
    /// Name the resource gets in the cloud account, if it is named explicitly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_name: Option<String>,
    /// Only set for resources that hold data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removal_policy: Option<RemovalPolicy>,
    /// Logical id of the resource this one points at (integration, rule target).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Short free-form detail, e.g. a schedule expression or an HTTP route.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Resource {
    pub fn new(logical_id: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            logical_id: logical_id.into(),
            kind,
            physical_name: None,
            removal_policy: None,
            target: None,
            detail: None,
        }
    }

    pub fn named(mut self, physical_name: impl Into<String>) -> Self {
        self.physical_name = Some(physical_name.into());
        self
    }

    pub fn durable(mut self, policy: RemovalPolicy) -> Self {
        self.removal_policy = Some(policy);
        self
    }

    pub fn targeting(mut self, logical_id: impl Into<String>) -> Self {
        self.target = Some(logical_id.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// A synthesized application stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackManifest {
    /// Stack id as it appears in the deployment tool (e.g. "dev-hermod").
    pub id: String,
    pub description: String,
    pub stage: Stage,
    /// Unset for stacks nested inside a pipeline stage, which inherit the stage env.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
    pub removal_policy: RemovalPolicy,
    pub tags: BTreeMap<String, String>,
    pub resources: Vec<Resource>,
}

impl StackManifest {
    pub fn resources_of(&self, kind: ResourceKind) -> impl Iterator<Item = &Resource> {
        self.resources.iter().filter(move |r| r.kind == kind)
    }

    pub fn resource(&self, logical_id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.logical_id == logical_id)
    }
}
