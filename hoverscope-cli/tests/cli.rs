//! End-to-end tests for the hoverscope binary against catalogs on disk.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn catalog_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "telescopes.json",
        r#"{
            "display_order": ["type", "status"],
            "jwst": {"name": "James Webb Space Telescope", "aliases": ["JWST", "Webb"],
                     "status": "Operational", "type": "Space telescope", "mirror": "6.5 m",
                     "description": "Infrared flagship."},
            "hst": {"name": "Hubble Space Telescope", "aliases": ["HST", "Hubble"]}
        }"#,
    );
    write(
        dir.path(),
        "surveys.json",
        r#"{"cosmos": {"name": "COSMOS", "type": "Deep field"}}"#,
    );
    write(
        dir.path(),
        "simulations.json",
        r#"{"eagle": {"name": "EAGLE", "code": "GADGET"}}"#,
    );
    write(
        dir.path(),
        "sams.json",
        r#"{"galform": {"name": "GALFORM"}, "broken": {"type": "SAM"}}"#,
    );
    write(
        dir.path(),
        "persons.json",
        r#"{"doe": {"name": "Jane A. Doe", "affiliation": "Somewhere"}}"#,
    );
    dir
}

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

fn hoverscope(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("hoverscope").unwrap();
    cmd.env_remove("HOVERSCOPE_CATALOG_DIR")
        .env_remove("RUST_LOG")
        .arg("--catalog-dir")
        .arg(dir.path());
    cmd
}

#[test]
fn annotate_plain_marks_entities() {
    let dir = catalog_dir();
    hoverscope(&dir)
        .args(["annotate", "--format", "plain", "JWST imaged COSMOS."])
        .assert()
        .success()
        .stdout(predicate::str::contains("[JWST](jwst) imaged [COSMOS](cosmos)."));
}

#[test]
fn annotate_reads_stdin() {
    let dir = catalog_dir();
    hoverscope(&dir)
        .args(["annotate", "--format", "plain"])
        .write_stdin("Doe, J. A. ran EAGLE.")
        .assert()
        .success()
        .stdout(predicate::str::contains("[Doe, J. A.](doe) ran [EAGLE](eagle)."));
}

#[test]
fn annotate_text_flag_and_human_output() {
    let dir = catalog_dir();
    hoverscope(&dir)
        .args(["annotate", "-t", "the Hubble constant and Webb"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 entities:"))
        .stdout(predicate::str::contains("Webb -> jwst"));
}

#[test]
fn annotate_json_carries_char_offsets() {
    let dir = catalog_dir();
    let assert = hoverscope(&dir)
        .args(["annotate", "--format", "json", "-t", "Café JWST"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["matches"], 1);
    let entity = &json["segments"][1];
    assert_eq!(entity["kind"], "entity");
    assert_eq!(entity["entity_id"], "jwst");
    assert_eq!(entity["category"], "instrument");
    assert_eq!(entity["start"], 6);
    assert_eq!(entity["char_start"], 5);
}

#[test]
fn annotate_without_matches() {
    let dir = catalog_dir();
    hoverscope(&dir)
        .args(["annotate", "nothing to see here"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entities found"));
}

#[test]
fn show_renders_profile_order_then_extras() {
    let dir = catalog_dir();
    let assert = hoverscope(&dir).args(["show", "jwst"]).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let type_at = stdout.find("Type").unwrap();
    let status_at = stdout.find("Status").unwrap();
    let mirror_at = stdout.find("Mirror").unwrap();
    let description_at = stdout.find("Infrared flagship.").unwrap();
    assert!(type_at < status_at && status_at < mirror_at && mirror_at < description_at);
}

#[test]
fn show_json() {
    let dir = catalog_dir();
    let assert = hoverscope(&dir)
        .args(["show", "--format", "json", "jwst"])
        .assert()
        .success();
    let json: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(json["name"], "James Webb Space Telescope");
    assert_eq!(json["fields"][0]["label"], "Type");
    assert_eq!(json["fields"][1]["label"], "Status");
}

#[test]
fn show_unknown_entity_fails() {
    let dir = catalog_dir();
    hoverscope(&dir)
        .args(["show", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown entity 'nope'"));
}

#[test]
fn list_filters_by_category_and_reports_skipped() {
    let dir = catalog_dir();
    hoverscope(&dir)
        .args(["list", "--category", "model"])
        .assert()
        .success()
        .stdout(predicate::str::contains("galform"))
        .stdout(predicate::str::contains("jwst").not())
        .stderr(predicate::str::contains("skipped model entry 'broken'"));
}

#[test]
fn missing_required_catalog_fails() {
    let dir = catalog_dir();
    fs::remove_file(dir.path().join("sams.json")).unwrap();
    hoverscope(&dir)
        .args(["annotate", "JWST"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing catalog"));
}

#[test]
fn config_show_reflects_catalog_dir_flag() {
    let dir = catalog_dir();
    hoverscope(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("catalog_dir"))
        .stdout(predicate::str::contains("telescopes.json"));
}

#[test]
fn config_file_renames_catalogs() {
    let dir = catalog_dir();
    fs::rename(dir.path().join("sams.json"), dir.path().join("models.json")).unwrap();
    let config = dir.path().join("config.toml");
    write(dir.path(), "config.toml", "[files]\nmodels = \"models.json\"\n");
    hoverscope(&dir)
        .arg("--config")
        .arg(&config)
        .args(["list", "--category", "model"])
        .assert()
        .success()
        .stdout(predicate::str::contains("galform"));
}
