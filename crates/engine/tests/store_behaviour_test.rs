//! End-to-end behaviour of the audited database over a real data directory
use docstore_audit::{AuditLogger, FileAuditSink};
use docstore_config::Config;
use docstore_core::{ErrorKind, MERGE_DOCUMENT_NAME};
use docstore_engine::{Database, DocumentStore};
use docstore_storage::FsBackend;
use serde_json::{json, Value};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

async fn setup() -> (Database, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config {
        data_dir: temp_dir.path().to_path_buf(),
        ..Config::default()
    };
    let db = Database::open(&config).await.unwrap();
    (db, temp_dir)
}

fn write(dir: &TempDir, name: &str, content: &str) {
    fs::write(dir.path().join(name), content).unwrap();
}

fn read_json(dir: &TempDir, name: &str) -> Value {
    serde_json::from_str(&fs::read_to_string(dir.path().join(name)).unwrap()).unwrap()
}

#[tokio::test]
async fn test_set_then_get_reads_back_value() {
    let (db, dir) = setup().await;
    write(&dir, "user.json", r#"{"firstname":"Scott"}"#);

    db.set("user.json", "email", "sroberts@talentpath.com").await.unwrap();

    assert_eq!(
        db.get("user.json", Some("email")).await.unwrap(),
        "sroberts@talentpath.com"
    );
    assert_eq!(
        read_json(&dir, "user.json"),
        json!({"firstname": "Scott", "email": "sroberts@talentpath.com"})
    );
}

#[tokio::test]
async fn test_falsy_values_are_invalid_keys() {
    let (db, dir) = setup().await;
    write(&dir, "d.json", r#"{"a":"","b":0,"c":false,"d":null}"#);

    for key in ["a", "b", "c", "d"] {
        assert_eq!(
            db.get("d.json", Some(key)).await.unwrap_err().kind(),
            ErrorKind::InvalidKey
        );
        assert_eq!(
            db.remove("d.json", key).await.unwrap_err().kind(),
            ErrorKind::InvalidKey
        );
    }
}

#[tokio::test]
async fn test_create_twice_then_delete_then_get() {
    let (db, _dir) = setup().await;

    db.create_file("post.json", None).await.unwrap();
    assert_eq!(
        db.create_file("post.json", None).await.unwrap_err().kind(),
        ErrorKind::FileAlreadyExists
    );

    db.delete_file("post.json").await.unwrap();
    assert_eq!(
        db.get("post.json", None).await.unwrap_err().kind(),
        ErrorKind::FileNotFound
    );
}

#[tokio::test]
async fn test_scott_and_andrew_set_algebra() {
    let (db, dir) = setup().await;
    write(&dir, "scott.json", r#"{"firstname":"S","lastname":"R","email":"e"}"#);
    write(&dir, "andrew.json", r#"{"firstname":"A","lastname":"R","username":"u"}"#);

    assert_eq!(
        db.union("scott.json", "andrew.json").await.unwrap(),
        vec!["firstname", "lastname", "email", "username"]
    );
    assert_eq!(
        db.intersect("scott.json", "andrew.json").await.unwrap(),
        vec!["firstname", "lastname"]
    );
    assert_eq!(
        db.difference("scott.json", "andrew.json").await.unwrap(),
        vec!["email", "username"]
    );
}

#[tokio::test]
async fn test_merge_skips_package_and_non_json_files() {
    let (db, dir) = setup().await;
    write(&dir, "user.json", r#"{"a":1}"#);
    write(&dir, "post.json", r#"{"b":2}"#);
    write(&dir, "package.json", r#"{"c":3}"#);
    write(&dir, "notes.txt", "not a document");

    let merged = db.merge_data().await.unwrap();
    assert_eq!(merged.len(), 2);
    assert_eq!(
        read_json(&dir, MERGE_DOCUMENT_NAME),
        json!({"user": {"a": 1}, "post": {"b": 2}})
    );
}

#[tokio::test]
async fn test_merge_is_recomputed_and_includes_previous_merge() {
    let (db, dir) = setup().await;
    write(&dir, "user.json", r#"{"a":1}"#);

    db.merge_data().await.unwrap();
    write(&dir, "user.json", r#"{"a":2}"#);
    db.merge_data().await.unwrap();

    let merged = read_json(&dir, MERGE_DOCUMENT_NAME);
    assert_eq!(merged["user"], json!({"a": 2}));
    assert_eq!(merged["merge"], json!({"user": {"a": 1}}));
}

#[tokio::test]
async fn test_failed_merge_keeps_previous_result() {
    let (db, dir) = setup().await;
    write(&dir, "user.json", r#"{"a":1}"#);
    db.merge_data().await.unwrap();
    let before = fs::read_to_string(dir.path().join(MERGE_DOCUMENT_NAME)).unwrap();

    write(&dir, "broken.json", "{\"a\":");
    assert_eq!(db.merge_data().await.unwrap_err().kind(), ErrorKind::Parse);

    let after = fs::read_to_string(dir.path().join(MERGE_DOCUMENT_NAME)).unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_audit_log_file_format() {
    let (db, dir) = setup().await;

    db.create_file("user.json", None).await.unwrap();
    db.set("user.json", "email", "e").await.unwrap();
    db.get("user.json", Some("email")).await.unwrap();
    db.delete_file("missing.json").await.unwrap_err();

    let log = fs::read_to_string(dir.path().join("log.txt")).unwrap();
    let messages: Vec<&str> = log
        .lines()
        .map(|line| {
            let (message, timestamp) = line.rsplit_once(", ").unwrap();
            assert!(timestamp.parse::<i64>().unwrap() > 0);
            message
        })
        .collect();
    assert_eq!(
        messages,
        vec![
            "File user.json created",
            "user.json email updated to e",
            "e",
            "File missing.json does not exist",
        ]
    );
}

#[tokio::test]
async fn test_custom_sink_and_backend_composition() {
    let temp_dir = TempDir::new().unwrap();
    let backend = FsBackend::new(temp_dir.path().join("docs")).await.unwrap();
    let log_path = temp_dir.path().join("audit.log");
    let db = Database::new(
        DocumentStore::new(Arc::new(backend)),
        AuditLogger::new(Arc::new(FileAuditSink::new(&log_path))),
    );

    db.create_file("a.json", None).await.unwrap();
    assert!(fs::read_to_string(log_path).unwrap().starts_with("File a.json created, "));
}
