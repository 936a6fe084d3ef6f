//! Referential checks over a loaded manifest
//!
//! Violations are collected and returned as data. Nothing here corrects a
//! manifest or decides whether a violation is fatal; that is up to the
//! caller.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::debug;

use crate::manifest::{subpkg_of, ManifestConfig, ManifestList};

/// Category of a manifest violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ViolationKind {
    /// A package repeated within a list, or both fully and partially included
    DuplicatePackage,

    /// A file repeated within a list, or listed as both full and strip file
    DuplicateFile,

    /// A file entry whose sub-package is not partially included
    OrphanFileReference,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DuplicatePackage => "DuplicatePackage",
            Self::DuplicateFile => "DuplicateFile",
            Self::OrphanFileReference => "OrphanFileReference",
        };
        f.write_str(name)
    }
}

/// One broken invariant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub kind: ViolationKind,

    /// The offending package name or file entry
    pub value: String,

    /// Lists the value was found in; two lists for a cross-list conflict
    pub lists: Vec<ManifestList>,
}

impl Violation {
    fn new(kind: ViolationKind, value: &str, lists: Vec<ManifestList>) -> Self {
        Self {
            kind,
            value: value.to_string(),
            lists,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.lists.as_slice()) {
            (ViolationKind::DuplicatePackage, [a, b]) | (ViolationKind::DuplicateFile, [a, b]) => {
                write!(f, "{}: `{}` is listed in both {a} and {b}", self.kind, self.value)
            }
            (ViolationKind::OrphanFileReference, [list]) => match subpkg_of(&self.value) {
                Some(pkg) => write!(
                    f,
                    "{}: `{}` in {list} belongs to `{pkg}`, which is not in {}",
                    self.kind,
                    self.value,
                    ManifestList::PartialPackages
                ),
                None => write!(
                    f,
                    "{}: `{}` in {list} has no `<subpkg>/` prefix",
                    self.kind, self.value
                ),
            },
            (_, lists) => {
                let names: Vec<&str> = lists.iter().map(|l| l.key()).collect();
                write!(
                    f,
                    "{}: `{}` is repeated in {}",
                    self.kind,
                    self.value,
                    names.join(", ")
                )
            }
        }
    }
}

/// Outcome of [`ManifestConfig::validate`]; empty means valid
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    /// Run every check against `manifest`.
    ///
    /// Order: package checks, then file checks, then orphan checks; each in
    /// manifest order.
    pub fn check(manifest: &ManifestConfig) -> Self {
        let mut violations = Vec::new();

        for list in [ManifestList::FullPackages, ManifestList::PartialPackages] {
            for name in repeated(manifest.list(list)) {
                violations.push(Violation::new(
                    ViolationKind::DuplicatePackage,
                    name,
                    vec![list],
                ));
            }
        }
        for name in shared(manifest.full_packages(), manifest.partial_packages()) {
            violations.push(Violation::new(
                ViolationKind::DuplicatePackage,
                name,
                vec![ManifestList::FullPackages, ManifestList::PartialPackages],
            ));
        }

        for list in [ManifestList::FullFiles, ManifestList::StripFiles] {
            for entry in repeated(manifest.list(list)) {
                violations.push(Violation::new(
                    ViolationKind::DuplicateFile,
                    entry,
                    vec![list],
                ));
            }
        }
        for entry in shared(manifest.full_files(), manifest.strip_files()) {
            violations.push(Violation::new(
                ViolationKind::DuplicateFile,
                entry,
                vec![ManifestList::FullFiles, ManifestList::StripFiles],
            ));
        }

        let partial: HashSet<&str> = manifest
            .partial_packages()
            .iter()
            .map(String::as_str)
            .collect();
        for list in [ManifestList::FullFiles, ManifestList::StripFiles] {
            for entry in manifest.list(list) {
                let owned = subpkg_of(entry).is_some_and(|pkg| partial.contains(pkg));
                if !owned {
                    violations.push(Violation::new(
                        ViolationKind::OrphanFileReference,
                        entry,
                        vec![list],
                    ));
                }
            }
        }

        debug!("Manifest validation found {} violation(s)", violations.len());

        Self { violations }
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Violations of one kind, in report order
    pub fn of_kind(&self, kind: ViolationKind) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.kind == kind)
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for violation in &self.violations {
            writeln!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ValidationReport {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

/// Values occurring more than once, each reported once at its first position
fn repeated(entries: &[String]) -> Vec<&str> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for entry in entries {
        *counts.entry(entry.as_str()).or_insert(0) += 1;
    }

    let mut seen = HashSet::new();
    entries
        .iter()
        .map(String::as_str)
        .filter(|entry| counts[entry] > 1 && seen.insert(*entry))
        .collect()
}

/// Values of `right` that also occur in `left`, each reported once
fn shared<'a>(left: &'a [String], right: &'a [String]) -> Vec<&'a str> {
    let left: HashSet<&str> = left.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();
    right
        .iter()
        .map(String::as_str)
        .filter(|entry| left.contains(entry) && seen.insert(*entry))
        .collect()
}
