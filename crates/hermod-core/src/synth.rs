//! Synthesizer trait and cloud assembly types.
//!
//! A synthesizer takes the resolved topology and hands it to whatever
//! performs the actual provisioning (an on-disk assembly, stdout, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::Result;
use crate::pipeline::PipelineManifest;
use crate::stack::StackManifest;

/// Version of the assembly layout written by this crate.
pub const ASSEMBLY_VERSION: &str = "1.0.0";

/// One top-level deployable unit in an assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Artifact {
    /// An application stack deployed straight into one account.
    Stack(StackManifest),
    /// A pipeline that deploys the application stages itself.
    Pipeline(PipelineManifest),
}

impl Artifact {
    /// Artifact id, which is also the stack id.
    pub fn id(&self) -> &str {
        match self {
            Artifact::Stack(stack) => &stack.id,
            Artifact::Pipeline(pipeline) => &pipeline.id,
        }
    }

    /// File name of the template written for this artifact.
    pub fn template_file(&self) -> String {
        format!("{}.template.json", self.id())
    }
}

/// Everything produced by one synthesis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudAssembly {
    pub version: String,
    pub created_at: DateTime<Utc>,
    pub artifacts: Vec<Artifact>,
}

impl CloudAssembly {
    pub fn new(artifacts: Vec<Artifact>) -> Self {
        Self {
            version: ASSEMBLY_VERSION.to_string(),
            created_at: Utc::now(),
            artifacts,
        }
    }

    pub fn artifact(&self, id: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.id() == id)
    }
}

/// Summary of a completed synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthOutput {
    /// Where the assembly ended up, when it was written to disk.
    pub directory: Option<PathBuf>,
    /// Ids of the artifacts that were emitted.
    pub artifacts: Vec<String>,
}

/// Trait for synthesis backends.
pub trait Synthesizer {
    /// Name of this synthesizer.
    fn name(&self) -> &'static str;

    /// Emit the assembly.
    fn synth(&self, assembly: &CloudAssembly) -> Result<SynthOutput>;
}
