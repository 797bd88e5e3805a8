//! Synthesizer backends.
//!
//! Provides:
//! - `AssemblyWriter`: writes `manifest.json` plus one template per artifact
//! - `StdoutSynthesizer`: prints the whole assembly as JSON

use hermod_core::Result;
use hermod_core::stack::Environment;
use hermod_core::synth::{Artifact, CloudAssembly, SynthOutput, Synthesizer};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const MANIFEST_FILE: &str = "manifest.json";
pub const DEFAULT_OUT_DIR: &str = "cdk.out";

/// Top-level index of an assembly directory.
#[derive(Debug, Serialize)]
struct Manifest<'a> {
    version: &'a str,
    created_at: String,
    artifacts: BTreeMap<&'a str, ManifestEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct ManifestEntry<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    template_file: String,
    environment: &'a Environment,
}

impl<'a> Manifest<'a> {
    fn from_assembly(assembly: &'a CloudAssembly) -> Result<Self> {
        let mut artifacts = BTreeMap::new();
        for artifact in &assembly.artifacts {
            let (kind, environment) = match artifact {
                Artifact::Stack(stack) => (
                    "stack",
                    stack.environment.as_ref().ok_or_else(|| {
                        hermod_core::Error::InvalidTopology(format!(
                            "top-level stack '{}' has no target environment",
                            stack.id
                        ))
                    })?,
                ),
                Artifact::Pipeline(pipeline) => ("pipeline", &pipeline.environment),
            };
            let previous = artifacts.insert(
                artifact.id(),
                ManifestEntry {
                    kind,
                    template_file: artifact.template_file(),
                    environment,
                },
            );
            if previous.is_some() {
                return Err(hermod_core::Error::InvalidTopology(format!(
                    "duplicate artifact id '{}'",
                    artifact.id()
                )));
            }
        }

        Ok(Self {
            version: &assembly.version,
            created_at: assembly.created_at.to_rfc3339(),
            artifacts,
        })
    }
}

/// Writes an assembly to a directory.
#[derive(Debug, Clone)]
pub struct AssemblyWriter {
    out_dir: PathBuf,
}

impl AssemblyWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    fn write_json<T: Serialize>(&self, file: &str, value: &T) -> Result<()> {
        let path = self.out_dir.join(file);
        let mut json = serde_json::to_vec_pretty(value)?;
        json.push(b'\n');
        fs::write(&path, json)?;
        debug!(path = %path.display(), "wrote assembly file");
        Ok(())
    }
}

impl Default for AssemblyWriter {
    fn default() -> Self {
        Self::new(DEFAULT_OUT_DIR)
    }
}

impl Synthesizer for AssemblyWriter {
    fn name(&self) -> &'static str {
        "assembly"
    }

    fn synth(&self, assembly: &CloudAssembly) -> Result<SynthOutput> {
        // Validate before touching the filesystem.
        let manifest = Manifest::from_assembly(assembly)?;

        fs::create_dir_all(&self.out_dir)?;
        for artifact in &assembly.artifacts {
            self.write_json(&artifact.template_file(), artifact)?;
        }
        self.write_json(MANIFEST_FILE, &manifest)?;

        let artifacts: Vec<String> = assembly.artifacts.iter().map(|a| a.id().to_string()).collect();
        info!(
            out_dir = %self.out_dir.display(),
            artifacts = ?artifacts,
            "synthesized cloud assembly"
        );

        Ok(SynthOutput {
            directory: Some(self.out_dir.clone()),
            artifacts,
        })
    }
}

/// Prints the assembly to stdout instead of writing files.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSynthesizer;

impl Synthesizer for StdoutSynthesizer {
    fn name(&self) -> &'static str {
        "stdout"
    }

    fn synth(&self, assembly: &CloudAssembly) -> Result<SynthOutput> {
        Manifest::from_assembly(assembly)?;

        let mut stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, assembly)?;
        writeln!(stdout)?;

        Ok(SynthOutput {
            directory: None,
            artifacts: assembly.artifacts.iter().map(|a| a.id().to_string()).collect(),
        })
    }
}
