//! Dry-run resolution of a manifest against a source tree
//!
//! A plan lists, relative to the source root, every file a harness
//! generator would copy verbatim or copy with content stripped. Nothing is
//! written; paths the manifest names but the tree lacks are collected as
//! missing instead of failing the resolution.

use anyhow::{anyhow, Context, Result};
use harness_manifest_core::HarnessContract;
use serde::Serialize;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;


/// What the generator does with a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IncludeAction {
    /// Copied unmodified
    Copy,

    /// Copied after the generator strips part of its content
    Strip,
}

impl fmt::Display for IncludeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Copy => f.pad("copy"),
            Self::Strip => f.pad("strip"),
        }
    }
}

/// One file in a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanEntry {
    /// Path relative to the source root
    pub path: PathBuf,

    /// Sub-package the file belongs to
    pub package: String,

    pub action: IncludeAction,
}

/// Files a manifest selects from a source tree
#[derive(Debug, Clone, Serialize)]
pub struct HarnessPlan {
    /// Source tree the plan was resolved against
    pub root: PathBuf,

    /// Selected files: full packages first, then partial packages
    pub entries: Vec<PlanEntry>,

    /// Package directories or files named by the manifest but absent
    pub missing: Vec<PathBuf>,

    /// Package names or file entries that do not stay inside the root
    pub invalid: Vec<String>,
}

impl HarnessPlan {
    /// Resolve `contract` against the tree at `root`
    pub fn resolve<C>(contract: &C, root: &Path) -> Result<Self>
    where
        C: HarnessContract + ?Sized,
    {
        if !root.is_dir() {
            return Err(anyhow!("Source root is not a directory: {:?}", root));
        }

        let mut entries = Vec::new();
        let mut missing = Vec::new();
        let mut invalid = Vec::new();

        for package in contract.full_packages() {
            let Some(relative) = relative_to_root(package) else {
                warn!("Full package escapes the source root: {}", package);
                invalid.push(package.clone());
                continue;
            };

            let dir = root.join(relative);
            if !dir.is_dir() {
                warn!("Full package directory not found: {:?}", dir);
                missing.push(PathBuf::from(package));
                continue;
            }

            for entry in WalkDir::new(&dir).sort_by_file_name() {
                let entry = entry?;
                let path = entry
                    .path()
                    .strip_prefix(root)
                    .with_context(|| format!("{:?} is outside {:?}", entry.path(), root))?
                    .to_path_buf();

                // Symlinked files count like regular ones; dangling links are missing
                if entry.path_is_symlink() && !entry.path().exists() {
                    warn!("Dangling link in full package: {:?}", entry.path());
                    missing.push(path);
                    continue;
                }
                if !entry.path().is_file() {
                    continue;
                }
                entries.push(PlanEntry {
                    path,
                    package: package.clone(),
                    action: IncludeAction::Copy,
                });
            }
        }

        for package in contract.partial_packages() {
            let selected = [
                (contract.full_files_for(package), IncludeAction::Copy),
                (contract.strip_files_for(package), IncludeAction::Strip),
            ];

            for (files, action) in selected {
                for file in files {
                    let Some(path) = relative_to_root(file) else {
                        warn!("Manifest file escapes the source root: {}", file);
                        invalid.push(file.to_string());
                        continue;
                    };

                    if root.join(&path).is_file() {
                        entries.push(PlanEntry {
                            path,
                            package: package.clone(),
                            action,
                        });
                    } else {
                        warn!("Manifest file not found under {:?}: {}", root, file);
                        missing.push(path);
                    }
                }
            }
        }

        info!(
            "Resolved harness plan: {} file(s) to copy, {} to strip, {} missing, {} invalid",
            entries
                .iter()
                .filter(|e| e.action == IncludeAction::Copy)
                .count(),
            entries
                .iter()
                .filter(|e| e.action == IncludeAction::Strip)
                .count(),
            missing.len(),
            invalid.len()
        );

        Ok(Self {
            root: root.to_path_buf(),
            entries,
            missing,
            invalid,
        })
    }

    /// Entries copied unmodified
    pub fn copies(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries
            .iter()
            .filter(|e| e.action == IncludeAction::Copy)
    }

    /// Entries copied with content stripped
    pub fn strips(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries
            .iter()
            .filter(|e| e.action == IncludeAction::Strip)
    }

    /// Whether every path the manifest names was found inside the root
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }
}

impl fmt::Display for HarnessPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{:<8}{}", entry.action, entry.path.display())?;
        }
        for path in &self.missing {
            writeln!(f, "{:<8}{}", "missing", path.display())?;
        }
        for entry in &self.invalid {
            writeln!(f, "{:<8}{}", "invalid", entry)?;
        }
        Ok(())
    }
}

/// Relative path for a manifest entry, or `None` when it is empty, absolute
/// or climbs out with `..`
fn relative_to_root(entry: &str) -> Option<PathBuf> {
    let path = Path::new(entry);
    let mut components = path.components().peekable();
    components.peek()?;

    components
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        .then(|| path.to_path_buf())
}
