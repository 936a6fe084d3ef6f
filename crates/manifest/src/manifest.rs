//! The harness manifest and its loaders

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::Path;
use tracing::debug;

use crate::error::{ManifestError, ManifestResult};
use crate::format::ManifestFormat;
use crate::literal;
use crate::validation::ValidationReport;

/// Embedded manifest used by the tutorial's harness generator
pub const TUTORIAL_MANIFEST: &str = include_str!("../data/tutorial-harness.cfg");

/// Names of the four manifest lists, in canonical order
pub const LIST_NAMES: [&str; 4] = [
    ManifestList::FullPackages.key(),
    ManifestList::PartialPackages.key(),
    ManifestList::FullFiles.key(),
    ManifestList::StripFiles.key(),
];

/// Identifies one of the four manifest lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManifestList {
    #[serde(rename = "include_full_subpkgs")]
    FullPackages,
    #[serde(rename = "include_partial_subpkgs")]
    PartialPackages,
    #[serde(rename = "include_partial_subpkgs_full_files")]
    FullFiles,
    #[serde(rename = "include_partial_subpkgs_strip_files")]
    StripFiles,
}

impl ManifestList {
    /// Key used for this list in every on-disk format
    pub const fn key(&self) -> &'static str {
        match self {
            Self::FullPackages => "include_full_subpkgs",
            Self::PartialPackages => "include_partial_subpkgs",
            Self::FullFiles => "include_partial_subpkgs_full_files",
            Self::StripFiles => "include_partial_subpkgs_strip_files",
        }
    }
}

impl fmt::Display for ManifestList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Which sub-packages and files go into a generated harness.
///
/// A manifest is immutable once built. All four lists are required when
/// loading; their order is kept so generated output is reproducible.
/// Loading checks shape only; call [`ManifestConfig::validate`] for the
/// referential checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestConfig {
    /// Sub-packages copied in their entirety
    include_full_subpkgs: Vec<String>,

    /// Sub-packages copied selectively
    include_partial_subpkgs: Vec<String>,

    /// `<subpkg>/<file>` entries copied unmodified
    include_partial_subpkgs_full_files: Vec<String>,

    /// `<subpkg>/<file>` entries copied with content stripped
    include_partial_subpkgs_strip_files: Vec<String>,
}

impl ManifestConfig {
    /// Build a manifest from its four lists
    pub fn new(
        full_packages: Vec<String>,
        partial_packages: Vec<String>,
        full_files: Vec<String>,
        strip_files: Vec<String>,
    ) -> Self {
        Self {
            include_full_subpkgs: full_packages,
            include_partial_subpkgs: partial_packages,
            include_partial_subpkgs_full_files: full_files,
            include_partial_subpkgs_strip_files: strip_files,
        }
    }

    /// The manifest shipped with the tutorial
    pub fn tutorial() -> ManifestResult<Self> {
        Self::parse_with_origin(TUTORIAL_MANIFEST, ManifestFormat::Literal, "<tutorial>")
    }

    /// Load a manifest file, choosing the format from its extension
    pub fn from_file(path: &Path) -> ManifestResult<Self> {
        let format = ManifestFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_with_origin(&content, format, &path.display().to_string())
    }

    /// Parse manifest text in the given format
    pub fn parse(content: &str, format: ManifestFormat) -> ManifestResult<Self> {
        Self::parse_with_origin(content, format, "<input>")
    }

    /// Parse manifest text, naming `origin` in any error
    pub fn parse_with_origin(
        content: &str,
        format: ManifestFormat,
        origin: &str,
    ) -> ManifestResult<Self> {
        let manifest: Self = match format {
            ManifestFormat::Yaml => {
                let doc: serde_yaml::Value = serde_yaml::from_str(content)
                    .map_err(|e| ManifestError::malformed(origin, e))?;
                check_yaml_strings(&doc).map_err(|e| ManifestError::malformed(origin, e))?;
                serde_yaml::from_value(doc).map_err(|e| ManifestError::malformed(origin, e))?
            }
            ManifestFormat::Json => {
                serde_json::from_str(content).map_err(|e| ManifestError::malformed(origin, e))?
            }
            ManifestFormat::Literal => {
                let lists =
                    literal::parse(content).map_err(|e| ManifestError::malformed(origin, e))?;
                serde_json::from_value(serde_json::Value::Object(lists))
                    .map_err(|e| ManifestError::malformed(origin, e))?
            }
        };

        debug!(
            "Loaded {} manifest from {}: {} full, {} partial, {} full files, {} strip files",
            format,
            origin,
            manifest.include_full_subpkgs.len(),
            manifest.include_partial_subpkgs.len(),
            manifest.include_partial_subpkgs_full_files.len(),
            manifest.include_partial_subpkgs_strip_files.len(),
        );

        Ok(manifest)
    }

    /// Serialize the manifest in the given format
    pub fn render(&self, format: ManifestFormat) -> ManifestResult<String> {
        match format {
            ManifestFormat::Yaml => {
                serde_yaml::to_string(self).map_err(|e| ManifestError::Render(e.to_string()))
            }
            ManifestFormat::Json => serde_json::to_string_pretty(self)
                .map(|mut s| {
                    s.push('\n');
                    s
                })
                .map_err(|e| ManifestError::Render(e.to_string())),
            ManifestFormat::Literal => Ok(literal::render(&[
                (LIST_NAMES[0], self.include_full_subpkgs.as_slice()),
                (LIST_NAMES[1], self.include_partial_subpkgs.as_slice()),
                (LIST_NAMES[2], self.include_partial_subpkgs_full_files.as_slice()),
                (LIST_NAMES[3], self.include_partial_subpkgs_strip_files.as_slice()),
            ])),
        }
    }

    /// Write the manifest to `path` in the format implied by its extension
    pub fn save_to_file(&self, path: &Path) -> ManifestResult<()> {
        let content = self.render(ManifestFormat::from_path(path)?)?;
        std::fs::write(path, content).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// SHA-256 of the canonical JSON form, hex encoded
    pub fn fingerprint(&self) -> String {
        // Serializing a struct of string vectors cannot fail
        let canonical = serde_json::to_vec(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        hex::encode(hasher.finalize())
    }

    /// Check the referential invariants between the lists
    pub fn validate(&self) -> ValidationReport {
        ValidationReport::check(self)
    }

    /// Entries of one list
    pub fn list(&self, list: ManifestList) -> &[String] {
        match list {
            ManifestList::FullPackages => &self.include_full_subpkgs,
            ManifestList::PartialPackages => &self.include_partial_subpkgs,
            ManifestList::FullFiles => &self.include_partial_subpkgs_full_files,
            ManifestList::StripFiles => &self.include_partial_subpkgs_strip_files,
        }
    }

    pub fn full_packages(&self) -> &[String] {
        &self.include_full_subpkgs
    }

    pub fn partial_packages(&self) -> &[String] {
        &self.include_partial_subpkgs
    }

    pub fn full_files(&self) -> &[String] {
        &self.include_partial_subpkgs_full_files
    }

    pub fn strip_files(&self) -> &[String] {
        &self.include_partial_subpkgs_strip_files
    }

    /// Whether `name` is copied in its entirety
    pub fn is_full_package(&self, name: &str) -> bool {
        self.include_full_subpkgs.iter().any(|p| p == name)
    }

    /// Whether `name` is copied selectively
    pub fn is_partial_package(&self, name: &str) -> bool {
        self.include_partial_subpkgs.iter().any(|p| p == name)
    }

    /// Full-file entries under `subpkg/`, in manifest order
    pub fn full_files_of(&self, subpkg: &str) -> Vec<&str> {
        files_under(&self.include_partial_subpkgs_full_files, subpkg)
    }

    /// Strip-file entries under `subpkg/`, in manifest order
    pub fn strip_files_of(&self, subpkg: &str) -> Vec<&str> {
        files_under(&self.include_partial_subpkgs_strip_files, subpkg)
    }
}

/// Reject list elements that YAML would otherwise coerce into strings.
///
/// serde_yaml deserializes untagged scalars such as `3`, `true` or `~` into
/// `String`, so only quoted or plain text scalars are accepted here. Other
/// shape problems are left to the typed deserialization.
fn check_yaml_strings(doc: &serde_yaml::Value) -> Result<(), String> {
    let Some(lists) = doc.as_mapping() else {
        return Ok(());
    };

    for name in LIST_NAMES {
        if let Some(serde_yaml::Value::Sequence(items)) = lists.get(name) {
            if let Some(index) = items.iter().position(|item| !item.is_string()) {
                return Err(format!("element {index} of `{name}` is not a string"));
            }
        }
    }

    Ok(())
}

/// Sub-package named by a file entry: the text before the first `/`
pub fn subpkg_of(entry: &str) -> Option<&str> {
    match entry.split_once('/') {
        Some((pkg, _)) if !pkg.is_empty() => Some(pkg),
        _ => None,
    }
}

fn files_under<'a>(entries: &'a [String], subpkg: &str) -> Vec<&'a str> {
    entries
        .iter()
        .filter(|entry| {
            entry
                .strip_prefix(subpkg)
                .is_some_and(|rest| rest.starts_with('/'))
        })
        .map(String::as_str)
        .collect()
}
