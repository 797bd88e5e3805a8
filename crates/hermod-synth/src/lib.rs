//! Topology construction and synthesis for Hermod.
//!
//! Provides:
//! - The application stack (tables, buckets, functions, API, schedules, CDN)
//! - The self-deploying pipeline stack
//! - Synthesizers that emit the resulting cloud assembly

pub mod app;
pub mod application;
pub mod assembly;
pub mod pipeline;

pub use app::construct;
pub use assembly::{AssemblyWriter, DEFAULT_OUT_DIR, StdoutSynthesizer};
pub use hermod_core::synth::{CloudAssembly, SynthOutput, Synthesizer};
