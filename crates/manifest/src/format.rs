//! On-disk manifest formats

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{ManifestError, ManifestResult};

/// Serialization formats a manifest can be read from and written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManifestFormat {
    /// YAML mapping of list name to sequence
    Yaml,

    /// JSON object of list name to array
    Json,

    /// Assignment list (`name = [ "a", "b", ]`) with `#` comments
    Literal,
}

impl ManifestFormat {
    /// Infer the format from a file extension
    pub fn from_path(path: &Path) -> ManifestResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            Some("py") | Some("cfg") => Ok(Self::Literal),
            _ => Err(ManifestError::UnknownFormat(path.to_path_buf())),
        }
    }

    /// Preferred file extension
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
            Self::Literal => "cfg",
        }
    }
}

impl fmt::Display for ManifestFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Yaml => "YAML",
            Self::Json => "JSON",
            Self::Literal => "assignment literal",
        };
        f.write_str(name)
    }
}
