use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;

const STORE: &str = "tasks.json";

/// Runs the binary inside `dir`, isolated from any ambient configuration.
fn task_tracker(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("task-tracker").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("TASK_TRACKER_STORE_PATH")
        .env_remove("TASK_TRACKER_DEFAULT_STATUS")
        .env_remove("TASK_TRACKER_LOG_LEVEL");
    cmd
}

fn stored_tasks(dir: &TempDir) -> serde_json::Value {
    let contents = std::fs::read_to_string(dir.child(STORE).path()).unwrap();
    serde_json::from_str(&contents).unwrap()
}

#[test]
fn full_task_lifecycle() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    task_tracker(&dir)
        .args(["create", "Buy milk"])
        .assert()
        .success()
        .stdout("Task added with ID 1\n");

    task_tracker(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1     | Pending      |"))
        .stdout(predicate::str::contains("Buy milk"));

    task_tracker(&dir)
        .args(["update", "1", "--status", "done"])
        .assert()
        .success()
        .stdout("Task 1 updated successfully.\n");

    task_tracker(&dir)
        .args(["list", "--status", "done"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Buy milk"));

    let stored = stored_tasks(&dir);
    assert_eq!(stored[0]["status"], "done");
    assert_eq!(stored[0]["description"], "Buy milk");

    task_tracker(&dir)
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout("Task 1 has been deleted successfully.\n");

    task_tracker(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout("Your task list is empty! Go add something to do.\n");

    Ok(())
}

#[test]
fn stored_file_uses_documented_layout() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    task_tracker(&dir)
        .args(["add", "Write report", "--status", "in progress"])
        .assert()
        .success();

    let stored = stored_tasks(&dir);
    let task = &stored[0];
    assert_eq!(task["id"], 1);
    assert_eq!(task["status"], "in progress");
    assert_eq!(task["createdAt"], task["updatedAt"]);
    let created = task["createdAt"].as_str().unwrap();
    assert!(chrono::NaiveDateTime::parse_from_str(created, "%Y-%m-%d %H:%M:%S").is_ok());

    dir.child(STORE)
        .assert(predicate::str::starts_with("[\n  {\n    \"id\": 1,"));
    Ok(())
}

#[test]
fn filter_without_matches_prints_notice() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    task_tracker(&dir).args(["create", "Buy milk"]).assert().success();

    task_tracker(&dir)
        .args(["list", "--status", "archived"])
        .assert()
        .success()
        .stdout("No tasks with status 'archived' found.\n");
    Ok(())
}

#[test]
fn missing_description_is_rejected_without_writing() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    task_tracker(&dir).arg("create").assert().code(2);
    task_tracker(&dir)
        .args(["create", "  "])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("description is required"));

    dir.child(STORE).assert(predicate::path::missing());
    Ok(())
}

#[test]
fn update_without_fields_is_a_usage_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    task_tracker(&dir)
        .args(["update", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("new description or status"));

    dir.child(STORE).assert(predicate::path::missing());
    Ok(())
}

#[test]
fn unknown_id_leaves_store_byte_for_byte_unchanged() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    task_tracker(&dir).args(["create", "Task 1"]).assert().success();
    task_tracker(&dir).args(["create", "Task 2"]).assert().success();
    let before = std::fs::read(dir.child(STORE).path())?;

    task_tracker(&dir)
        .args(["delete", "99"])
        .assert()
        .code(3)
        .stderr("Error: Task with ID 99 not found.\n");
    task_tracker(&dir)
        .args(["update", "99", "--status", "done"])
        .assert()
        .code(3);

    assert_eq!(std::fs::read(dir.child(STORE).path())?, before);
    Ok(())
}

#[test]
fn create_refuses_when_no_ids_are_left() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let seeded = r#"[
  {
    "id": 4294967295,
    "description": "Last",
    "status": "Pending",
    "createdAt": "2023-01-01 12:00:00",
    "updatedAt": "2023-01-01 12:00:00"
  }
]
"#;
    dir.child(STORE).write_str(seeded)?;

    task_tracker(&dir)
        .args(["create", "Next"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("No task IDs left"));

    dir.child(STORE).assert(seeded);
    task_tracker(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("4294967295"));
    Ok(())
}

#[test]
fn malformed_store_is_treated_as_empty() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    dir.child(STORE).write_str("{ not json")?;

    task_tracker(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout("Your task list is empty! Go add something to do.\n");

    task_tracker(&dir)
        .args(["create", "Fresh start"])
        .assert()
        .success()
        .stdout("Task added with ID 1\n");
    Ok(())
}

#[test]
fn file_flag_and_config_file_select_the_store() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    dir.child("task-tracker.toml")
        .write_str("store_path = \"configured.json\"\ndefault_status = \"Todo\"\n")?;

    task_tracker(&dir).args(["create", "From config"]).assert().success();
    dir.child("configured.json")
        .assert(predicate::str::contains("\"status\": \"Todo\""));

    task_tracker(&dir)
        .args(["--file", "flagged.json", "create", "From flag"])
        .assert()
        .success();
    dir.child("flagged.json")
        .assert(predicate::str::contains("From flag"));
    dir.child(STORE).assert(predicate::path::missing());
    Ok(())
}

#[test]
fn environment_overrides_store_path() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    task_tracker(&dir)
        .env("TASK_TRACKER_STORE_PATH", "from-env.json")
        .args(["create", "From env"])
        .assert()
        .success();

    dir.child("from-env.json").assert(predicate::path::exists());
    Ok(())
}

#[test]
fn bad_log_level_fails_setup() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    task_tracker(&dir)
        .env("TASK_TRACKER_LOG_LEVEL", "chatty")
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown log level"));
    Ok(())
}
