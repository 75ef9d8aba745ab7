// Integration tests for the durable session record.
//
// These verify creation, ordered appends, concurrent-writer safety, and the
// error classes the store reports when its backing record is damaged.

use anyhow::Result;
use std::sync::Arc;
use tempfile::TempDir;
use voicelog::session::conversations_root;
use voicelog::{Role, SessionHandle, SessionLog, SessionLogError, Turn};

fn turn(role: Role, content: &str) -> Turn {
    Turn::now(role, content, "test").expect("non-empty content")
}

#[tokio::test]
async fn create_writes_empty_record() -> Result<()> {
    let dir = TempDir::new()?;
    let session = SessionLog::create(dir.path()).await?;

    let path = session.path();
    assert!(path.starts_with(conversations_root(dir.path())));
    let name = path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("conversation_"));
    assert!(name.ends_with(".json"));

    // The on-disk document is valid and empty from the start
    let raw = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    assert_eq!(value["conversation"], serde_json::json!([]));

    Ok(())
}

#[tokio::test]
async fn full_round_trip() -> Result<()> {
    let dir = TempDir::new()?;
    let session = SessionLog::create(dir.path()).await?;

    session.append(turn(Role::User, "Hi")).await?;
    session.append(turn(Role::Agent, "Hello!")).await?;

    let turns = session.turns().await?;
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0].role, Role::User);
    assert_eq!(turns[0].content, "Hi");
    assert_eq!(turns[1].role, Role::Agent);
    assert_eq!(turns[1].content, "Hello!");
    assert!(turns[0].timestamp <= turns[1].timestamp);

    Ok(())
}

#[tokio::test]
async fn appends_preserve_order_and_timestamps() -> Result<()> {
    let dir = TempDir::new()?;
    let session = SessionLog::create(dir.path()).await?;

    for i in 0..10 {
        session.append(turn(Role::User, &format!("turn {}", i))).await?;
    }

    let turns = session.turns().await?;
    assert_eq!(turns.len(), 10);
    for (i, recorded) in turns.iter().enumerate() {
        assert_eq!(recorded.content, format!("turn {}", i));
    }
    for pair in turns.windows(2) {
        assert!(pair[0].timestamp <= pair[1].timestamp);
    }

    Ok(())
}

#[tokio::test]
async fn late_arriving_turn_cannot_move_timestamps_backwards() -> Result<()> {
    let dir = TempDir::new()?;
    let session = SessionLog::create(dir.path()).await?;

    // Turns are stamped at normalize time, before the writer lock is taken;
    // simulate an earlier-stamped turn losing the race to a later-stamped one
    let mut stale = turn(Role::User, "stamped first, appended second");
    stale.timestamp = stale.timestamp - chrono::Duration::seconds(5);

    session.append(turn(Role::Agent, "appended first")).await?;
    session.append(stale).await?;

    let turns = session.turns().await?;
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[1].content, "stamped first, appended second");
    assert!(
        turns[0].timestamp <= turns[1].timestamp,
        "append order and timestamp order must not diverge: {} then {}",
        turns[0].timestamp,
        turns[1].timestamp
    );

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_appends_lose_nothing() -> Result<()> {
    let dir = TempDir::new()?;
    let session = Arc::new(SessionLog::create(dir.path()).await?);

    let mut tasks = Vec::new();
    for i in 0..8 {
        let session = Arc::clone(&session);
        let role = if i % 2 == 0 { Role::User } else { Role::Agent };
        tasks.push(tokio::spawn(async move {
            session.append(turn(role, &format!("concurrent {}", i))).await
        }));
    }
    for task in tasks {
        task.await??;
    }

    // All writers landed and the record is still parseable
    let turns = session.turns().await?;
    assert_eq!(turns.len(), 8);
    for pair in turns.windows(2) {
        assert!(pair[0].timestamp <= pair[1].timestamp);
    }
    let raw = std::fs::read_to_string(session.path())?;
    serde_json::from_str::<serde_json::Value>(&raw)?;

    Ok(())
}

#[tokio::test]
async fn same_second_sessions_stay_distinct() -> Result<()> {
    let dir = TempDir::new()?;

    let first = SessionLog::create(dir.path()).await?;
    let second = SessionLog::create(dir.path()).await?;

    assert_ne!(first.path(), second.path());
    assert_ne!(first.id(), second.id());

    // Writing to the second never touches the first
    second.append(turn(Role::User, "only here")).await?;
    assert!(first.turns().await?.is_empty());
    assert_eq!(second.turns().await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn malformed_record_reports_append_class_error() -> Result<()> {
    let dir = TempDir::new()?;
    let session = SessionLog::create(dir.path()).await?;

    std::fs::write(session.path(), "{ not json")?;

    let err = session
        .append(turn(Role::User, "lost"))
        .await
        .expect_err("append over a corrupt record must fail");
    assert!(err.is_append_error());
    assert!(matches!(err, SessionLogError::Parse { .. }));

    Ok(())
}

#[tokio::test]
async fn missing_record_reports_append_class_error() -> Result<()> {
    let dir = TempDir::new()?;
    let session = SessionLog::create(dir.path()).await?;

    std::fs::remove_file(session.path())?;

    let err = session
        .append(turn(Role::User, "lost"))
        .await
        .expect_err("append without a backing record must fail");
    assert!(err.is_append_error());

    Ok(())
}

#[tokio::test]
async fn unwritable_base_dir_fails_create() {
    let result = SessionLog::create("/dev/null/not-a-directory").await;
    let err = result.expect_err("create under an impossible path must fail");
    assert!(matches!(err, SessionLogError::Init { .. }));
    assert!(!err.is_append_error());
}

#[tokio::test]
async fn session_handle_guards_initialization() -> Result<()> {
    let handle = SessionHandle::new();

    let err = handle.current_path().expect_err("uninitialized handle");
    assert!(matches!(err, SessionLogError::NotInitialized));

    let dir = TempDir::new()?;
    let session = Arc::new(SessionLog::create(dir.path()).await?);
    assert!(handle.install(Arc::clone(&session)));
    assert_eq!(handle.current_path()?, session.path());

    // A handle binds to exactly one session
    let other = Arc::new(SessionLog::create(dir.path()).await?);
    assert!(!handle.install(other));
    assert_eq!(handle.current_path()?, session.path());

    Ok(())
}

#[tokio::test]
async fn persisted_turn_shape_matches_record_schema() -> Result<()> {
    let dir = TempDir::new()?;
    let session = SessionLog::create(dir.path()).await?;
    session.append(turn(Role::Agent, "Hello!")).await?;

    let raw = std::fs::read_to_string(session.path())?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    let entry = &value["conversation"][0];

    assert_eq!(entry["role"], "agent");
    assert_eq!(entry["content"], "Hello!");
    assert_eq!(entry["source"], "test");
    // RFC 3339 timestamp string
    let ts = entry["timestamp"].as_str().unwrap();
    chrono::DateTime::parse_from_rfc3339(ts)?;

    // The raw document deserializes back into the record schema
    let record: voicelog::ConversationRecord = serde_json::from_str(&raw)?;
    assert_eq!(record.conversation.len(), 1);

    Ok(())
}
