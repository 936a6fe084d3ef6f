//! Read-only view of a manifest as consumed by the harness generator

use crate::manifest::ManifestConfig;

/// What a harness generator needs from a manifest.
///
/// Every method is a pure lookup. Implementations must be immutable after
/// construction so a single instance can be shared between readers.
pub trait HarnessContract: Send + Sync {
    /// Sub-packages copied in their entirety, in manifest order
    fn full_packages(&self) -> &[String];

    /// Sub-packages copied selectively, in manifest order
    fn partial_packages(&self) -> &[String];

    /// Files of `subpkg` copied unmodified
    fn full_files_for(&self, subpkg: &str) -> Vec<&str>;

    /// Files of `subpkg` copied with content stripped
    fn strip_files_for(&self, subpkg: &str) -> Vec<&str>;
}

impl HarnessContract for ManifestConfig {
    fn full_packages(&self) -> &[String] {
        ManifestConfig::full_packages(self)
    }

    fn partial_packages(&self) -> &[String] {
        ManifestConfig::partial_packages(self)
    }

    fn full_files_for(&self, subpkg: &str) -> Vec<&str> {
        self.full_files_of(subpkg)
    }

    fn strip_files_for(&self, subpkg: &str) -> Vec<&str> {
        self.strip_files_of(subpkg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn contract() -> Box<dyn HarnessContract> {
        Box::new(ManifestConfig::tutorial().unwrap())
    }

    #[test]
    fn test_packages_are_disjoint() {
        let contract = contract();
        let full: HashSet<&String> = contract.full_packages().iter().collect();
        assert!(contract
            .partial_packages()
            .iter()
            .all(|pkg| !full.contains(pkg)));
    }

    #[test]
    fn test_file_entries_belong_to_partial_packages() {
        let contract = contract();
        let mut total = 0;
        for pkg in contract.partial_packages() {
            for entry in contract
                .full_files_for(pkg)
                .into_iter()
                .chain(contract.strip_files_for(pkg))
            {
                assert!(entry.starts_with(&format!("{pkg}/")));
                total += 1;
            }
        }
        assert_eq!(total, 11);
    }

    #[test]
    fn test_full_package_has_no_file_entries() {
        let contract = contract();
        assert_eq!(
            contract.full_packages(),
            &["ex-basics".to_string(), "ex-gcd".to_string(), "vc".to_string()]
        );
        assert!(contract.full_files_for("vc").is_empty());
        assert!(contract.strip_files_for("vc").is_empty());
    }
}
