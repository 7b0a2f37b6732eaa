use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("checklist-{nanos}-{file_name}"))
}

fn seed_store(store_path: &PathBuf) {
    let content = serde_json::json!([
        {
            "id": 2,
            "text": "walk dog",
            "completed": false,
            "createdAt": "2026-08-01T10:00:00Z"
        },
        {
            "id": 1,
            "text": "buy milk",
            "completed": true,
            "createdAt": "2026-08-01T09:30:00Z"
        }
    ]);
    std::fs::write(store_path, serde_json::to_string_pretty(&content).unwrap()).unwrap();
}

#[test]
fn list_shows_all_tasks_and_stats() {
    let exe = env!("CARGO_BIN_EXE_checklist");
    let store_path = temp_path("cli-list-all.json");
    seed_store(&store_path);

    let output = Command::new(exe)
        .arg("list")
        .env("CHECKLIST_STORE_PATH", &store_path)
        .output()
        .expect("failed to run list command");

    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("walk dog"));
    assert!(stdout.contains("buy milk"));
    assert!(stdout.contains("pending"));
    assert!(stdout.contains("completed"));
    assert!(stdout.contains("2 tasks, 1 completed"));
}

#[test]
fn list_pending_hides_completed_tasks() {
    let exe = env!("CARGO_BIN_EXE_checklist");
    let store_path = temp_path("cli-list-pending.json");
    seed_store(&store_path);

    let output = Command::new(exe)
        .args(["list", "pending"])
        .env("CHECKLIST_STORE_PATH", &store_path)
        .output()
        .expect("failed to run list command");

    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("walk dog"));
    assert!(!stdout.contains("buy milk"));
}

#[test]
fn list_completed_shows_only_completed_tasks() {
    let exe = env!("CARGO_BIN_EXE_checklist");
    let store_path = temp_path("cli-list-completed.json");
    seed_store(&store_path);

    let output = Command::new(exe)
        .args(["list", "completed"])
        .env("CHECKLIST_STORE_PATH", &store_path)
        .output()
        .expect("failed to run list command");

    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("buy milk"));
    assert!(!stdout.contains("walk dog"));
}

#[test]
fn list_json_preserves_order_and_layout() {
    let exe = env!("CARGO_BIN_EXE_checklist");
    let store_path = temp_path("cli-list-json.json");
    seed_store(&store_path);

    let output = Command::new(exe)
        .args(["--json", "list"])
        .env("CHECKLIST_STORE_PATH", &store_path)
        .output()
        .expect("failed to run list command");

    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(stdout.trim()).expect("json output");
    let tasks = parsed.as_array().expect("json array");
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["id"], 2);
    assert_eq!(tasks[0]["text"], "walk dog");
    assert_eq!(tasks[0]["completed"], false);
    assert_eq!(tasks[0]["createdAt"], "2026-08-01T10:00:00Z");
    assert_eq!(tasks[1]["id"], 1);
}

#[test]
fn list_empty_store_shows_empty_message() {
    let exe = env!("CARGO_BIN_EXE_checklist");
    let store_path = temp_path("cli-list-empty.json");

    let output = Command::new(exe)
        .arg("list")
        .env("CHECKLIST_STORE_PATH", &store_path)
        .output()
        .expect("failed to run list command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("no tasks yet"));
    assert!(stdout.contains("0 tasks, 0 completed"));
}

#[test]
fn list_pending_with_everything_done_shows_empty_message() {
    let exe = env!("CARGO_BIN_EXE_checklist");
    let store_path = temp_path("cli-list-all-done.json");
    let content = serde_json::json!([
        {"id": 1, "text": "buy milk", "completed": true, "createdAt": "2026-08-01T09:30:00Z"}
    ]);
    std::fs::write(&store_path, serde_json::to_string_pretty(&content).unwrap()).unwrap();

    let output = Command::new(exe)
        .args(["list", "pending"])
        .env("CHECKLIST_STORE_PATH", &store_path)
        .output()
        .expect("failed to run list command");

    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("no pending tasks"));
    assert!(stdout.contains("1 tasks, 1 completed"));
}
