//! Tutorial harness manifest
//!
//! Holds the four lists that tell a harness generator which sub-packages to
//! copy whole, which to copy selectively, and which files of the selective
//! ones are copied verbatim or stripped. Loading checks shape; validation
//! checks the references between lists and reports violations as data.

pub mod contract;
pub mod error;
pub mod format;
mod literal;
pub mod manifest;
pub mod validation;

pub use contract::HarnessContract;
pub use error::{ManifestError, ManifestResult};
pub use format::ManifestFormat;
pub use manifest::{subpkg_of, ManifestConfig, ManifestList, LIST_NAMES, TUTORIAL_MANIFEST};
pub use validation::{ValidationReport, Violation, ViolationKind};
