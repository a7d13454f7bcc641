use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn release_packages_and_checksums() {
  let env = TestEnv::new();
  let bin = env.write_file("build/app", "compiled");

  env
    .release_cmd()
    .args(["--tag", "v1.2.3"])
    .arg(&bin)
    .assert()
    .success()
    .stdout(predicate::str::contains("1.2.3"))
    .stdout(predicate::str::contains("calculating checksums"));

  assert_eq!(std::fs::read_to_string(env.dist().join("app")).unwrap(), "compiled");
  let sidecar = std::fs::read_to_string(env.dist().join("app.sha256sum")).unwrap();
  assert!(sidecar.ends_with("  app\n"));
  assert_eq!(sidecar.split("  ").next().unwrap().len(), 64);
}

#[test]
fn invalid_tag_fails_with_tag_in_message() {
  let env = TestEnv::new();
  let bin = env.write_file("build/app", "compiled");

  env
    .release_cmd()
    .args(["--tag", "not-a-version"])
    .arg(&bin)
    .assert()
    .failure()
    .stderr(predicate::str::contains("not-a-version"));

  assert!(!env.dist().exists());
}

#[test]
fn failure_is_reported_once() {
  let env = TestEnv::new();
  let bin = env.write_file("build/app", "compiled");

  let output = env
    .release_cmd()
    .args(["--tag", "not-a-version"])
    .arg(&bin)
    .output()
    .unwrap();
  assert!(!output.status.success());

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert_eq!(stderr.matches("failed to parse tag not-a-version").count(), 1, "{stderr}");
}

#[test]
fn snapshot_skips_version_and_continues() {
  let env = TestEnv::new();
  let bin = env.write_file("build/app", "compiled");

  env
    .release_cmd()
    .args(["--tag", "not-a-version", "--snapshot"])
    .arg(&bin)
    .assert()
    .success()
    .stderr(predicate::str::contains("disabled during snapshot mode"));

  assert!(env.dist().join("app.sha256sum").exists());
}

#[test]
fn skip_validate_warns_and_continues() {
  let env = TestEnv::new();
  let bin = env.write_file("build/app", "compiled");

  env
    .release_cmd()
    .args(["--tag", "not-a-version", "--skip-validate"])
    .arg(&bin)
    .assert()
    .success()
    .stderr(predicate::str::contains("current tag is not a semantic tag"));
}

#[test]
fn synthetic_version_prints_release_tag() {
  let env = TestEnv::new();
  let bin = env.write_file("build/app", "compiled");

  env
    .release_cmd()
    .arg("--synthetic-version")
    .arg(&bin)
    .assert()
    .success()
    .stdout(predicate::str::contains("RELEASE."));
}

#[test]
fn config_file_and_flags_select_algorithm_and_format() {
  let env = TestEnv::new();
  let bin = env.write_file("build/app", "compiled");
  let config = env.write_file("relsmith.json", r#"{ "checksum": { "algorithm": "sha512" } }"#);

  env
    .release_cmd()
    .args(["--tag", "v1.0.0", "--format", "tar.gz"])
    .arg("--config")
    .arg(&config)
    .arg(&bin)
    .assert()
    .success();

  assert!(env.dist().join("app.tar.gz").exists());
  assert!(env.dist().join("app.tar.gz.sha512sum").exists());
}

#[test]
fn json_output_lists_artifacts() {
  let env = TestEnv::new();
  let bin = env.write_file("build/app", "compiled");

  let output = env
    .release_cmd()
    .args(["--tag", "v1.0.0", "--json"])
    .arg(&bin)
    .output()
    .unwrap();
  assert!(output.status.success());

  let artifacts: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  let types: Vec<&str> = artifacts
    .as_array()
    .unwrap()
    .iter()
    .map(|a| a["type"].as_str().unwrap())
    .collect();
  assert_eq!(types, ["Binary", "UploadableBinary", "UploadableBinary"]);
}

#[test]
fn missing_config_fails() {
  let env = TestEnv::new();
  let bin = env.write_file("build/app", "compiled");

  env
    .release_cmd()
    .args(["--tag", "v1.0.0", "--config", "/nonexistent/relsmith.json"])
    .arg(&bin)
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to read config"));
}
