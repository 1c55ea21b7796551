use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn vna() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("vna"))
}

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, b"x").expect("write");
}

/// Seed a scenario and reconcile it so a manifest exists.
fn seed_reconciled(root: &Path) {
    touch(root, "demo/assets/bgm/theme.ogg");
    touch(root, "demo/assets/se/explosion-02.mp3");
    vna()
        .args(["--root", root.to_str().expect("utf8")])
        .args(["reconcile", "--scenario", "demo"])
        .assert()
        .success();
}

fn read_manifest(root: &Path) -> serde_json::Value {
    serde_json::from_slice(&fs::read(root.join("demo/assets/manifest.json")).expect("read"))
        .expect("json")
}

#[test]
fn one_shot_alias_updates_the_manifest() {
    let tmp = TempDir::new().expect("tmpdir");
    seed_reconciled(tmp.path());

    vna()
        .args(["--root", tmp.path().to_str().expect("utf8")])
        .args(["alias", "--scenario", "demo", "se/explosion-02", "boom"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alias 'boom' -> 'se/explosion-02'"));

    let manifest = read_manifest(tmp.path());
    assert_eq!(manifest["aliasMap"]["boom"], "se/explosion-02");
    assert_eq!(manifest["assets"]["se/explosion-02"]["aliases"][0], "boom");
}

#[test]
fn duplicate_alias_for_same_asset_fails() {
    let tmp = TempDir::new().expect("tmpdir");
    seed_reconciled(tmp.path());
    let root = tmp.path().to_str().expect("utf8");

    vna()
        .args(["--root", root])
        .args(["alias", "--scenario", "demo", "se/explosion-02", "boom"])
        .assert()
        .success();
    vna()
        .args(["--root", root])
        .args(["alias", "--scenario", "demo", "se/explosion-02", "boom"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already carries alias 'boom'"));
}

#[test]
fn alias_owned_by_another_asset_fails_and_keeps_one_mapping() {
    let tmp = TempDir::new().expect("tmpdir");
    seed_reconciled(tmp.path());
    let root = tmp.path().to_str().expect("utf8");

    vna()
        .args(["--root", root])
        .args(["alias", "--scenario", "demo", "se/explosion-02", "se-boom"])
        .assert()
        .success();
    vna()
        .args(["--root", root])
        .args(["alias", "--scenario", "demo", "bgm/theme", "se-boom"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "alias 'se-boom' already points at 'se/explosion-02'",
        ));

    let manifest = read_manifest(tmp.path());
    assert_eq!(manifest["aliasMap"]["se-boom"], "se/explosion-02");
    assert!(
        manifest["assets"]["bgm/theme"].get("aliases").is_none(),
        "rejected alias must not be recorded"
    );
}

#[test]
fn alias_shadowing_an_identifier_fails() {
    let tmp = TempDir::new().expect("tmpdir");
    seed_reconciled(tmp.path());

    vna()
        .args(["--root", tmp.path().to_str().expect("utf8")])
        .args(["alias", "--scenario", "demo", "se/explosion-02", "bgm/theme"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("shadow"));
}

#[test]
fn unknown_asset_fails() {
    let tmp = TempDir::new().expect("tmpdir");
    seed_reconciled(tmp.path());

    vna()
        .args(["--root", tmp.path().to_str().expect("utf8")])
        .args(["alias", "--scenario", "demo", "se/missing", "boom"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown asset id 'se/missing'"));
}

#[test]
fn one_shot_mode_requires_a_scenario() {
    let tmp = TempDir::new().expect("tmpdir");
    seed_reconciled(tmp.path());

    vna()
        .args(["--root", tmp.path().to_str().expect("utf8")])
        .args(["alias", "se/explosion-02", "boom"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--scenario is required"));
}

#[test]
fn interactive_cancellation_exits_cleanly() {
    let tmp = TempDir::new().expect("tmpdir");
    seed_reconciled(tmp.path());

    vna()
        .args(["--root", tmp.path().to_str().expect("utf8")])
        .arg("alias")
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled."));
}

#[test]
fn interactive_search_select_prompt_adds_an_alias() {
    let tmp = TempDir::new().expect("tmpdir");
    seed_reconciled(tmp.path());

    // scenario "1", search "explo", pick "1", alias "boom".
    vna()
        .args(["--root", tmp.path().to_str().expect("utf8")])
        .arg("alias")
        .write_stdin("1\nexplo\n1\nboom\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("alias 'boom' -> 'se/explosion-02'"));

    let manifest = read_manifest(tmp.path());
    assert_eq!(manifest["aliasMap"]["boom"], "se/explosion-02");
}
