//! Harness Manifest Library
//!
//! Loads and validates the manifest that tells a tutorial's harness
//! generator which sub-packages and files to copy or strip, and resolves a
//! manifest against a source tree as a dry run.

pub mod cli;
pub mod plan;

pub use harness_manifest_core::{
    subpkg_of, HarnessContract, ManifestConfig, ManifestError, ManifestFormat, ManifestList,
    ManifestResult, ValidationReport, Violation, ViolationKind, TUTORIAL_MANIFEST,
};
pub use plan::{HarnessPlan, IncludeAction, PlanEntry};
