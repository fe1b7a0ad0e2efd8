use async_trait::async_trait;
use futures_util::StreamExt;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{
    EventId, EventStoreError, HistoryEntry, OrderId, Result, SagaEvent, SagaStatus, Sequence,
    TransactionId,
    store::{EventStore, EventStream},
};

const SELECT_COLUMNS: &str =
    "SELECT seq, id, order_id, transaction_id, source, status, payload, history, created_at FROM saga_events";

/// PostgreSQL-backed ledger implementation.
///
/// The `seq` column (`BIGSERIAL`) is the append sequence used to break
/// `created_at` ties.
#[derive(Clone)]
pub struct PostgresEventStore {
    pool: PgPool,
}

impl PostgresEventStore {
    /// Creates a new PostgreSQL event store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_event(row: PgRow) -> Result<SagaEvent> {
        let status: String = row.try_get("status")?;
        let status = status
            .parse::<SagaStatus>()
            .map_err(EventStoreError::CorruptRow)?;
        let history: Vec<HistoryEntry> = serde_json::from_value(row.try_get("history")?)?;

        Ok(SagaEvent {
            event_id: EventId::from_uuid(row.try_get::<Uuid, _>("id")?),
            order_id: OrderId::new(row.try_get::<String, _>("order_id")?),
            transaction_id: TransactionId::new(row.try_get::<String, _>("transaction_id")?),
            source: row.try_get("source")?,
            status,
            payload: row.try_get("payload")?,
            history,
            created_at: row.try_get("created_at")?,
            sequence: Some(Sequence::new(row.try_get("seq")?)),
        })
    }

    async fn fetch_latest(&self, column: &str, key: &str) -> Result<Option<SagaEvent>> {
        let sql = format!(
            "{SELECT_COLUMNS} WHERE {column} = $1 ORDER BY created_at DESC, seq DESC LIMIT 1"
        );
        let row = sqlx::query(&sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_event).transpose()
    }
}

#[async_trait]
impl EventStore for PostgresEventStore {
    #[tracing::instrument(skip(self, event), fields(order_id = %event.order_id, transaction_id = %event.transaction_id))]
    async fn append(&self, mut event: SagaEvent) -> Result<SagaEvent> {
        let history = serde_json::to_value(&event.history)?;

        let seq: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO saga_events (id, order_id, transaction_id, source, status, payload, history, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING seq
            "#,
        )
        .bind(event.event_id.as_uuid())
        .bind(event.order_id.as_str())
        .bind(event.transaction_id.as_str())
        .bind(&event.source)
        .bind(event.status.as_str())
        .bind(&event.payload)
        .bind(history)
        .bind(event.created_at)
        .fetch_one(&self.pool)
        .await?;

        event.sequence = Some(Sequence::new(seq));
        Ok(event)
    }

    async fn latest_by_order_id(&self, order_id: &OrderId) -> Result<Option<SagaEvent>> {
        self.fetch_latest("order_id", order_id.as_str()).await
    }

    async fn latest_by_transaction_id(
        &self,
        transaction_id: &TransactionId,
    ) -> Result<Option<SagaEvent>> {
        self.fetch_latest("transaction_id", transaction_id.as_str())
            .await
    }

    async fn list_all(&self) -> Result<Vec<SagaEvent>> {
        let sql = format!("{SELECT_COLUMNS} ORDER BY created_at DESC, seq DESC");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        rows.into_iter().map(Self::row_to_event).collect()
    }

    fn stream_all(&self) -> EventStream<'_> {
        let stream = sqlx::query(
            r#"
            SELECT seq, id, order_id, transaction_id, source, status, payload, history, created_at
            FROM saga_events
            ORDER BY created_at DESC, seq DESC
            "#,
        )
        .fetch(&self.pool)
        .map(|result| match result {
            Ok(row) => Self::row_to_event(row),
            Err(e) => Err(EventStoreError::Database(e)),
        });

        Box::pin(stream)
    }

    async fn history_for_transaction(
        &self,
        transaction_id: &TransactionId,
    ) -> Result<Vec<SagaEvent>> {
        let sql = format!("{SELECT_COLUMNS} WHERE transaction_id = $1 ORDER BY created_at ASC, seq ASC");
        let rows = sqlx::query(&sql)
            .bind(transaction_id.as_str())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Self::row_to_event).collect()
    }

    async fn event_count(&self) -> Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM saga_events")
            .fetch_one(&self.pool)
            .await?;

        Ok(usize::try_from(count).unwrap_or_default())
    }
}
