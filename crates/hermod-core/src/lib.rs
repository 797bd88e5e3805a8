//! Core domain types for the Hermod infrastructure.
//!
//! This crate contains:
//! - Deployment stages, resource naming and removal policy
//! - Application stack and pipeline manifests
//! - The synthesizer trait and cloud assembly types

pub mod error;
pub mod pipeline;
pub mod stack;
pub mod stage;
pub mod synth;

pub use error::{Error, Result};
pub use stage::{APP_NAME, RemovalPolicy, Stage};
