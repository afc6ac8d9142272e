use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;

fn catedra(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("catedra").unwrap();
    cmd.env("CATEDRA_HOME", home).env_remove("CATEDRA_LOG");
    cmd
}

fn list_json(home: &Path, entity: &str, extra: &[&str]) -> Vec<Value> {
    let output = catedra(home)
        .arg("list")
        .arg(entity)
        .args(extra)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_create_update_delete_roundtrip() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    catedra(home)
        .args(["create", "Event", "title=Jornada de Puertas Abiertas", "capacity=80"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Event created: event-"));

    let events = list_json(home, "Event", &["--order", "-created_date", "--limit", "1"]);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["title"], "Jornada de Puertas Abiertas");
    assert_eq!(events[0]["capacity"], 80);
    let id = events[0]["id"].as_str().unwrap().to_string();

    catedra(home)
        .args(["update", "Event", &id, "capacity=120"])
        .assert()
        .success()
        .stdout(predicate::str::contains("updated"));

    catedra(home)
        .args(["get", "Event", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"capacity\": 120"))
        .stdout(predicate::str::contains("Jornada de Puertas Abiertas"));

    catedra(home)
        .args(["delete", "Event", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("deleted"));

    catedra(home)
        .args(["get", "Event", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("No Event with id"));
}

#[test]
fn test_filter_by_terms() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    let output = catedra(home)
        .args(["filter", "BlogPost", "status=published", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let posts: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert!(!posts.is_empty());
    assert!(posts.iter().all(|p| p["status"] == "published"));
}

#[test]
fn test_create_from_json_data() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    catedra(home)
        .args([
            "create",
            "Subscriber",
            "--data",
            r#"{"email": "lectora@example.com", "language": "es"}"#,
        ])
        .assert()
        .success();

    let subscribers = list_json(home, "Subscriber", &[]);
    assert_eq!(subscribers.len(), 1);
    assert_eq!(subscribers[0]["email"], "lectora@example.com");
    assert!(subscribers[0]["created_date"].is_string());
}

#[test]
fn test_unknown_entity_fails() {
    let temp_dir = tempfile::tempdir().unwrap();

    catedra(temp_dir.path())
        .args(["list", "Widget"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Widget"));
}

#[test]
fn test_update_without_fields_fails() {
    let temp_dir = tempfile::tempdir().unwrap();

    catedra(temp_dir.path())
        .args(["update", "BlogPost", "blogpost-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to update"));
}

#[test]
fn test_corrupted_snapshot_warns_and_recovers() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("catedra_data.json"), "garbage").unwrap();

    catedra(temp_dir.path())
        .args(["list", "BlogPost"])
        .assert()
        .success()
        .stderr(predicate::str::contains("using defaults"))
        .stdout(predicate::str::contains("blogpost-1"));
}

#[test]
fn test_reset_requires_confirmation() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    catedra(home)
        .args(["create", "Subscriber", "email=a@b.c"])
        .assert()
        .success();

    catedra(home)
        .arg("reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("--yes"));
    assert_eq!(list_json(home, "Subscriber", &[]).len(), 1);

    catedra(home).args(["reset", "--yes"]).assert().success();
    assert!(list_json(home, "Subscriber", &[]).is_empty());
}

#[test]
fn test_whoami_and_logout() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    catedra(home)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("admin@catedra.local"));

    catedra(home)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed out"));

    catedra(home)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nobody was signed in"));
}

#[test]
fn test_config_set_changes_default_user() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    catedra(home)
        .args(["config", "user-email", "decana@example.org"])
        .assert()
        .success();

    catedra(home)
        .args(["config", "user-email"])
        .assert()
        .success()
        .stdout(predicate::str::contains("decana@example.org"));

    catedra(home)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("decana@example.org"));
}

#[test]
fn test_kinds_lists_every_table() {
    let temp_dir = tempfile::tempdir().unwrap();

    catedra(temp_dir.path())
        .arg("kinds")
        .assert()
        .success()
        .stdout(predicate::str::contains("BlogPost"))
        .stdout(predicate::str::contains("Subscriber"));
}

#[test]
fn test_config_rejects_key_that_clobbers_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    catedra(home)
        .args(["config", "snapshot-key", "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("holds the configuration"));

    catedra(home)
        .args(["config", "session-key", "catedra_data"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must differ"));

    catedra(home)
        .args(["create", "BlogPost", "title=Persistente"])
        .assert()
        .success();

    catedra(home)
        .args(["config", "snapshot-key"])
        .assert()
        .success()
        .stdout(predicate::str::contains("catedra_data"));

    let posts = list_json(home, "BlogPost", &[]);
    assert!(posts.iter().any(|p| p["title"] == "Persistente"));
}
