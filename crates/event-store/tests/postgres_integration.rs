//! PostgreSQL integration tests
//!
//! These tests use a shared PostgreSQL container started through
//! testcontainers, so a Docker daemon must be reachable.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use event_store::{
    EventStore, HistoryEntry, OrderId, PostgresEventStore, SagaEvent, SagaStatus, TransactionId,
};
use futures_util::StreamExt;
use sqlx::PgPool;
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared container info - container stays alive for all tests
struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

/// Global shared container
static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            let temp_pool = PgPool::connect(&connection_string).await.unwrap();
            PostgresEventStore::new(temp_pool.clone())
                .run_migrations()
                .await
                .unwrap();
            temp_pool.close().await;

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

/// Get a fresh store with its own pool and a cleared ledger
async fn get_test_store() -> PostgresEventStore {
    let info = get_container_info().await;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&info.connection_string)
        .await
        .unwrap();

    sqlx::query("TRUNCATE TABLE saga_events RESTART IDENTITY")
        .execute(&pool)
        .await
        .unwrap();

    PostgresEventStore::new(pool)
}

fn at(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap()
}

fn create_test_event(order_id: &str, transaction_id: &str, millis: i64) -> SagaEvent {
    SagaEvent::new(order_id, transaction_id, "PAYMENT_SERVICE", SagaStatus::Success)
        .with_payload_raw(serde_json::json!({ "totalAmount": 10.5 }))
        .with_history(HistoryEntry::new(
            "PAYMENT_SERVICE",
            SagaStatus::Success,
            "payment realized",
            at(millis),
        ))
        .with_created_at(at(millis))
}

#[tokio::test]
async fn append_and_read_back() {
    let store = get_test_store().await;

    let stored = store
        .append(create_test_event("O1", "T1", 100))
        .await
        .unwrap();
    assert!(stored.sequence.is_some());

    let latest = store
        .latest_by_order_id(&OrderId::new("O1"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest, stored);
    assert_eq!(latest.history.len(), 1);
    assert_eq!(latest.payload["totalAmount"], 10.5);
}

#[tokio::test]
async fn append_does_not_deduplicate() {
    let store = get_test_store().await;
    let event = create_test_event("O1", "T1", 100);

    let first = store.append(event.clone()).await.unwrap();
    let second = store.append(event).await.unwrap();

    assert_eq!(store.event_count().await.unwrap(), 2);
    assert!(second.sequence > first.sequence);

    let latest = store
        .latest_by_transaction_id(&TransactionId::new("T1"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.sequence, second.sequence);
}

#[tokio::test]
async fn latest_by_transaction_id_picks_greatest_timestamp() {
    let store = get_test_store().await;

    store.append(create_test_event("O1", "T", 100)).await.unwrap();
    let e2 = store.append(create_test_event("O1", "T", 200)).await.unwrap();

    let latest = store
        .latest_by_transaction_id(&TransactionId::new("T"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.event_id, e2.event_id);
}

#[tokio::test]
async fn equal_timestamps_resolve_to_last_appended() {
    let store = get_test_store().await;

    store.append(create_test_event("O1", "T1", 100)).await.unwrap();
    let later = store.append(create_test_event("O1", "T1", 100)).await.unwrap();

    let latest = store
        .latest_by_order_id(&OrderId::new("O1"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.event_id, later.event_id);
}

#[tokio::test]
async fn missing_keys_return_none() {
    let store = get_test_store().await;

    let latest = store
        .latest_by_order_id(&OrderId::new("missing"))
        .await
        .unwrap();
    assert!(latest.is_none());
}

#[tokio::test]
async fn list_and_stream_are_most_recent_first() {
    let store = get_test_store().await;

    let e1 = store.append(create_test_event("O1", "T1", 100)).await.unwrap();
    let e2 = store.append(create_test_event("O2", "T2", 200)).await.unwrap();
    let e3 = store.append(create_test_event("O3", "T3", 300)).await.unwrap();

    let listed: Vec<_> = store
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.event_id)
        .collect();
    assert_eq!(listed, vec![e3.event_id, e2.event_id, e1.event_id]);

    let streamed: Vec<_> = store
        .stream_all()
        .map(|e| e.unwrap().event_id)
        .collect()
        .await;
    assert_eq!(streamed, listed);
    assert_eq!(store.event_count().await.unwrap(), 3);
}

#[tokio::test]
async fn history_for_transaction_is_oldest_first() {
    let store = get_test_store().await;

    let late = store.append(create_test_event("O1", "T1", 300)).await.unwrap();
    store.append(create_test_event("O2", "T2", 200)).await.unwrap();
    let early = store.append(create_test_event("O1", "T1", 100)).await.unwrap();

    let ids: Vec<_> = store
        .history_for_transaction(&TransactionId::new("T1"))
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.event_id)
        .collect();
    assert_eq!(ids, vec![early.event_id, late.event_id]);
}
