use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

fn harness_manifest() -> Command {
    Command::cargo_bin("harness-manifest").unwrap()
}

#[test]
fn test_help_lists_commands() {
    harness_manifest()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("plan"));
}

#[test]
fn test_init_then_validate() {
    let dir = TempDir::new().unwrap();

    harness_manifest()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Tutorial manifest created"));

    dir.child("harness-manifest.yaml")
        .assert(predicate::str::contains("include_partial_subpkgs_strip_files"));

    harness_manifest()
        .current_dir(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Manifest is valid!"))
        .stdout(predicate::str::contains("Full files: 7"))
        .stdout(predicate::str::contains("Strip files: 4"));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    dir.child("harness-manifest.json").write_str("{}").unwrap();

    harness_manifest()
        .current_dir(dir.path())
        .args(["init", "-o", "harness-manifest.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    harness_manifest()
        .current_dir(dir.path())
        .args(["init", "-o", "harness-manifest.json", "--force", "--empty"])
        .assert()
        .success();

    dir.child("harness-manifest.json")
        .assert(predicate::str::contains("\"include_full_subpkgs\": []"));
}

#[test]
fn test_validate_reports_duplicate_package() {
    let dir = TempDir::new().unwrap();
    let manifest = dir.child("harness-manifest.yaml");
    manifest
        .write_str(
            "include_full_subpkgs: [ex-gcd, vc, ex-gcd]\n\
             include_partial_subpkgs: []\n\
             include_partial_subpkgs_full_files: []\n\
             include_partial_subpkgs_strip_files: []\n",
        )
        .unwrap();

    harness_manifest()
        .args(["validate", "-c"])
        .arg(manifest.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("1 violation(s)"))
        .stdout(predicate::str::contains("DuplicatePackage: `ex-gcd`"));

    harness_manifest()
        .args(["validate", "--warn-only", "-c"])
        .arg(manifest.path())
        .assert()
        .success();
}

#[test]
fn test_validate_rejects_malformed_manifest() {
    let dir = TempDir::new().unwrap();
    let manifest = dir.child("harness-manifest.json");
    manifest
        .write_str(r#"{"include_full_subpkgs": ["vc", 1]}"#)
        .unwrap();

    harness_manifest()
        .args(["validate", "-c"])
        .arg(manifest.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed manifest"));
}

#[test]
fn test_show_package_as_json() {
    let dir = TempDir::new().unwrap();

    harness_manifest()
        .current_dir(dir.path())
        .args(["init", "-o", "tutorial-gen-harness-cfg.py"])
        .assert()
        .success();

    let output = harness_manifest()
        .current_dir(dir.path())
        .args(["show", "-p", "ex-sorter", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let view: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(view["inclusion"], "partial");
    assert_eq!(view["full_files"].as_array().unwrap().len(), 7);
    assert_eq!(view["strip_files"].as_array().unwrap().len(), 4);
}

#[test]
fn test_plan_strict_fails_on_missing_paths() {
    let dir = TempDir::new().unwrap();
    dir.child("src/vc/vc-trace.v").touch().unwrap();

    harness_manifest()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    harness_manifest()
        .current_dir(dir.path())
        .args(["plan", "-s", "src"])
        .assert()
        .success()
        .stdout(predicate::str::contains("copy    vc/vc-trace.v"))
        .stdout(predicate::str::contains("missing ex-gcd"));

    harness_manifest()
        .current_dir(dir.path())
        .args(["plan", "-s", "src", "--strict"])
        .assert()
        .failure();
}
