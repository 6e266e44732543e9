//! Integration tests for `PgEventRepository`.
//!
//! These need a PostgreSQL server reachable through `DATABASE_URL`; run them
//! with `cargo test -- --ignored`.

use chrono::Utc;
use sqlx::PgPool;
use tenpin_core::error::DomainError;
use tenpin_core::repository::{EventRepository, StoredEvent};
use tenpin_event_store::pg_event_repository::PgEventRepository;
use uuid::Uuid;

/// Helper to build a `StoredEvent` with sensible defaults.
fn make_stored_event(aggregate_id: Uuid, sequence_number: i64) -> StoredEvent {
    StoredEvent {
        event_id: Uuid::new_v4(),
        aggregate_id,
        event_type: "scoring.roll_recorded".to_string(),
        payload: serde_json::json!({"RollRecorded": {"game_id": aggregate_id, "pins": 7}}),
        sequence_number,
        correlation_id: Uuid::new_v4(),
        causation_id: Uuid::new_v4(),
        occurred_at: Utc::now(),
    }
}

// --- load_events ---

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_load_events_returns_empty_vec_for_nonexistent_aggregate(pool: PgPool) {
    let repo = PgEventRepository::new(pool);

    let events = repo.load_events(Uuid::new_v4()).await.unwrap();

    assert!(events.is_empty());
}

// --- append_events + load_events ---

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_append_and_load_single_event(pool: PgPool) {
    let repo = PgEventRepository::new(pool);
    let aggregate_id = Uuid::new_v4();
    let event = make_stored_event(aggregate_id, 1);
    let expected = event.clone();

    repo.append_events(aggregate_id, 0, &[event]).await.unwrap();

    let loaded = repo.load_events(aggregate_id).await.unwrap();
    assert_eq!(loaded.len(), 1);

    let e = &loaded[0];
    assert_eq!(e.event_id, expected.event_id);
    assert_eq!(e.aggregate_id, aggregate_id);
    assert_eq!(e.event_type, expected.event_type);
    assert_eq!(e.payload, expected.payload);
    assert_eq!(e.sequence_number, 1);
    assert_eq!(e.correlation_id, expected.correlation_id);
    assert_eq!(e.causation_id, expected.causation_id);
    // PostgreSQL TIMESTAMPTZ has microsecond precision.
    assert_eq!(
        e.occurred_at.timestamp_micros(),
        expected.occurred_at.timestamp_micros()
    );
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_sequential_appends_with_correct_expected_version(pool: PgPool) {
    let repo = PgEventRepository::new(pool);
    let aggregate_id = Uuid::new_v4();

    repo.append_events(
        aggregate_id,
        0,
        &[
            make_stored_event(aggregate_id, 1),
            make_stored_event(aggregate_id, 2),
        ],
    )
    .await
    .unwrap();
    repo.append_events(aggregate_id, 2, &[make_stored_event(aggregate_id, 3)])
        .await
        .unwrap();

    let loaded = repo.load_events(aggregate_id).await.unwrap();
    assert_eq!(loaded.len(), 3);
    for (i, event) in loaded.iter().enumerate() {
        assert_eq!(event.sequence_number, i64::try_from(i + 1).unwrap());
    }
}

// --- concurrency ---

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_stale_expected_version_returns_concurrency_conflict(pool: PgPool) {
    let repo = PgEventRepository::new(pool);
    let aggregate_id = Uuid::new_v4();
    repo.append_events(aggregate_id, 0, &[make_stored_event(aggregate_id, 1)])
        .await
        .unwrap();

    let result = repo
        .append_events(aggregate_id, 0, &[make_stored_event(aggregate_id, 1)])
        .await;

    match result {
        Err(DomainError::ConcurrencyConflict {
            aggregate_id: conflict_agg_id,
            expected,
            actual,
        }) => {
            assert_eq!(conflict_agg_id, aggregate_id);
            assert_eq!(expected, 0);
            assert_eq!(actual, 1);
        }
        other => panic!("expected ConcurrencyConflict, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_aggregate_isolation(pool: PgPool) {
    let repo = PgEventRepository::new(pool);
    let agg_a = Uuid::new_v4();
    let agg_b = Uuid::new_v4();

    repo.append_events(agg_a, 0, &[make_stored_event(agg_a, 1)])
        .await
        .unwrap();
    repo.append_events(agg_b, 0, &[make_stored_event(agg_b, 1)])
        .await
        .unwrap();

    assert_eq!(repo.load_events(agg_a).await.unwrap()[0].aggregate_id, agg_a);
    assert_eq!(repo.load_events(agg_b).await.unwrap()[0].aggregate_id, agg_b);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_append_empty_events_is_noop(pool: PgPool) {
    let repo = PgEventRepository::new(pool);
    let aggregate_id = Uuid::new_v4();

    repo.append_events(aggregate_id, 0, &[]).await.unwrap();

    assert!(repo.load_events(aggregate_id).await.unwrap().is_empty());
}
