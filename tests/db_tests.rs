// tests for the interaction log

use medtriage::{Db, NewRecord, timestamp_now};

fn record<'a>(symptom: &'a str, department: &'a str, risk: &'a str) -> NewRecord<'a> {
    NewRecord {
        symptom,
        department,
        risk,
        timestamp: timestamp_now(),
    }
}

#[tokio::test]
async fn test_open_creates_file_and_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("database.db");

    let db = Db::open(&path).await.unwrap();

    assert!(path.exists());
    assert_eq!(db.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_init_schema_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("database.db");

    let db = Db::open(&path).await.unwrap();
    db.append(&record("cough", "General Medicine", "Low"))
        .await
        .unwrap();
    db.init_schema().await.unwrap();
    drop(db);

    // reopening must keep existing rows
    let db = Db::open(&path).await.unwrap();
    assert_eq!(db.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_append_assigns_increasing_ids() {
    let dir = tempfile::tempdir().unwrap();
    let db = Db::open(dir.path().join("database.db")).await.unwrap();

    let first = db.append(&record("a", "X", "Low")).await.unwrap();
    let second = db.append(&record("b", "Y", "High")).await.unwrap();

    assert!(second > first);
    assert_eq!(db.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_recent_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    let db = Db::open(dir.path().join("database.db")).await.unwrap();

    for symptom in ["one", "two", "three"] {
        db.append(&record(symptom, "General Medicine", "Low"))
            .await
            .unwrap();
    }

    let rows = db.recent(2).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].symptom, "three");
    assert_eq!(rows[1].symptom, "two");
    assert_eq!(rows[0].department, "General Medicine");
    assert!(!rows[0].timestamp.is_empty());
}

#[tokio::test]
async fn test_empty_symptom_is_stored() {
    let dir = tempfile::tempdir().unwrap();
    let db = Db::open(dir.path().join("database.db")).await.unwrap();

    db.append(&record("", "General Medicine", "Low"))
        .await
        .unwrap();

    let rows = db.recent(10).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].symptom, "");
}

#[tokio::test]
async fn test_concurrent_appends() {
    let dir = tempfile::tempdir().unwrap();
    let db = Db::open(dir.path().join("database.db")).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..8 {
        let db = db.clone();
        handles.push(tokio::spawn(async move {
            let symptom = format!("symptom {i}");
            db.append(&record(&symptom, "General Medicine", "Low")).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(db.count().await.unwrap(), 8);
}
