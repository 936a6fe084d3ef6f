use assert_fs::prelude::*;
use assert_fs::TempDir;
use harness_manifest::{
    HarnessContract, HarnessPlan, IncludeAction, ManifestConfig, ManifestFormat, ViolationKind,
    TUTORIAL_MANIFEST,
};
use std::collections::HashSet;
use std::path::PathBuf;

fn write_tutorial_cfg(dir: &TempDir) -> PathBuf {
    let file = dir.child("tutorial-gen-harness-cfg.py");
    file.write_str(TUTORIAL_MANIFEST).unwrap();
    file.path().to_path_buf()
}

#[test]
fn test_load_tutorial_configuration_file() {
    let dir = TempDir::new().unwrap();
    let manifest = ManifestConfig::from_file(&write_tutorial_cfg(&dir)).unwrap();

    assert!(manifest.is_full_package("vc"));
    assert!(manifest.is_partial_package("ex-sorter"));
    assert!(!manifest.is_full_package("ex-sorter"));
    assert_eq!(manifest.full_files_of("ex-sorter").len(), 7);
    assert_eq!(manifest.strip_files_of("ex-sorter").len(), 4);
    assert!(manifest.validate().is_valid());
}

#[test]
fn test_contract_properties_hold_for_valid_manifest() {
    let manifest = ManifestConfig::tutorial().unwrap();
    let contract: &dyn HarnessContract = &manifest;

    let full: HashSet<&str> = contract.full_packages().iter().map(String::as_str).collect();
    let partial: HashSet<&str> = contract
        .partial_packages()
        .iter()
        .map(String::as_str)
        .collect();
    assert!(full.is_disjoint(&partial));

    for pkg in &partial {
        for entry in contract.full_files_for(pkg) {
            assert!(entry.starts_with(&format!("{pkg}/")));
        }
        for entry in contract.strip_files_for(pkg) {
            assert!(entry.starts_with(&format!("{pkg}/")));
        }
    }
}

#[test]
fn test_converted_formats_load_identically() {
    let dir = TempDir::new().unwrap();
    let original = ManifestConfig::from_file(&write_tutorial_cfg(&dir)).unwrap();

    for format in [ManifestFormat::Yaml, ManifestFormat::Json, ManifestFormat::Literal] {
        let path = dir.child(format!("converted.{}", format.extension()));
        original.save_to_file(path.path()).unwrap();

        let reloaded = ManifestConfig::from_file(path.path()).unwrap();
        assert_eq!(reloaded, original, "{format} round trip changed the manifest");
        assert_eq!(reloaded.fingerprint(), original.fingerprint());
    }
}

#[test]
fn test_orphaned_partial_package_files() {
    let dir = TempDir::new().unwrap();
    let edited = TUTORIAL_MANIFEST.replace(
        "include_partial_subpkgs = [\n  \"ex-sorter\",\n]",
        "include_partial_subpkgs = [\n]",
    );
    let file = dir.child("edited.cfg");
    file.write_str(&edited).unwrap();

    let manifest = ManifestConfig::from_file(file.path()).unwrap();
    let report = manifest.validate();

    assert_eq!(report.of_kind(ViolationKind::OrphanFileReference).count(), 11);
}

#[test]
fn test_malformed_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let file = dir.child("broken.yaml");
    file.write_str("include_full_subpkgs: [vc]\ninclude_partial_subpkgs: {}\n")
        .unwrap();

    let err = ManifestConfig::from_file(file.path()).unwrap_err();
    assert!(err.is_malformed());
    assert!(err.to_string().contains("broken.yaml"));
}

#[test]
fn test_plan_against_tutorial_tree() {
    let tree = TempDir::new().unwrap();
    let manifest = ManifestConfig::tutorial().unwrap();

    for pkg in manifest.full_packages() {
        tree.child(format!("{pkg}/{pkg}.mk")).touch().unwrap();
    }
    for entry in manifest.full_files().iter().chain(manifest.strip_files()) {
        tree.child(entry).touch().unwrap();
    }

    let plan = HarnessPlan::resolve(&manifest, tree.path()).unwrap();

    assert!(plan.is_complete());
    assert_eq!(plan.copies().count(), 3 + 7);
    assert_eq!(plan.strips().count(), 4);
    assert!(plan
        .strips()
        .all(|e| e.package == "ex-sorter" && e.action == IncludeAction::Strip));
}
