#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn cli(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("gardes-cli").unwrap();
    cmd.arg("--data-dir").arg(dir);
    cmd
}

#[test]
fn add_list_and_generate_month() {
    let dir = tempdir().unwrap();
    for name in ["Alice", "Bob", "Chloé"] {
        cli(dir.path())
            .args(["add-staff", "--name", name, "--department", "Urgences"])
            .assert()
            .success();
    }
    cli(dir.path())
        .arg("staff")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bob | Urgences"));

    cli(dir.path())
        .args(["generate", "--month", "2025-09", "--seed", "7"])
        .assert()
        .code(predicate::in_iter(vec![0, 2]))
        .stdout(predicate::str::contains("shift(s) assigned"));

    assert!(dir.path().join("assignments.json").exists());
    cli(dir.path())
        .args(["stats", "--month", "2025-09"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice | day"));
}

#[test]
fn toggle_twice_frees_the_cell() {
    let dir = tempdir().unwrap();
    cli(dir.path())
        .args(["add-staff", "--name", "Alice"])
        .assert()
        .success();
    cli(dir.path())
        .args(["toggle", "--staff", "alice", "--date", "2025-10-01", "--shift", "night"])
        .assert()
        .success()
        .stdout("night\n");
    cli(dir.path())
        .args(["toggle", "--staff", "Alice", "--date", "2025-10-01", "--shift", "night"])
        .assert()
        .success()
        .stdout("off\n");
}

#[test]
fn errors_are_reported() {
    let dir = tempdir().unwrap();
    cli(dir.path())
        .args(["add-staff", "--name", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("staff name cannot be empty"));
    cli(dir.path())
        .args(["generate", "--week", "2025-10-22", "--min-rest-days", "-1"])
        .assert()
        .failure();
    cli(dir.path())
        .args(["set", "--staff", "nobody", "--date", "2025-10-01", "--shift", "day"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown staff"));
}

#[test]
fn import_and_export_csv() {
    let dir = tempdir().unwrap();
    let people = dir.path().join("people.csv");
    std::fs::write(&people, "name,department\nAlice,Réa\nBob,\n").unwrap();
    cli(dir.path())
        .args(["import-staff", "--csv"])
        .arg(&people)
        .assert()
        .success()
        .stdout(predicate::str::contains("imported 2 staff"));

    cli(dir.path())
        .args(["set", "--staff", "Bob", "--date", "2025-10-02", "--shift", "day"])
        .assert()
        .success();

    let out = dir.path().join("week.csv");
    cli(dir.path())
        .args(["export", "--week", "2025-10-01", "--out-csv"])
        .arg(&out)
        .assert()
        .success();
    let csv = std::fs::read_to_string(out).unwrap();
    assert!(csv.starts_with("date,staff_id,name,shift\n"));
    assert!(csv.contains("2025-10-02,"));
    assert!(csv.contains(",Bob,day"));
}

#[test]
fn generate_without_staff_is_a_noop() {
    let dir = tempdir().unwrap();
    cli(dir.path())
        .args(["generate", "--month", "2025-09", "--seed", "1"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("0 shift(s) assigned"))
        .stderr(predicate::str::contains("no staff"));
    assert!(!dir.path().join("assignments.json").exists());

    cli(dir.path())
        .args(["add-staff", "--name", "Alice"])
        .assert()
        .success();
    cli(dir.path())
        .args(["set", "--staff", "Alice", "--date", "2025-09-02", "--shift", "day"])
        .assert()
        .success();
    let before = std::fs::read(dir.path().join("assignments.json")).unwrap();
    cli(dir.path())
        .args(["remove-staff", "--staff", "Alice"])
        .assert()
        .success();
    let after_remove = std::fs::read(dir.path().join("assignments.json")).unwrap();
    assert_ne!(before, after_remove);

    cli(dir.path())
        .args(["generate", "--month", "2025-09", "--seed", "1"])
        .assert()
        .code(0);
    assert_eq!(
        std::fs::read(dir.path().join("assignments.json")).unwrap(),
        after_remove
    );
}
