//! PostgreSQL payment repository.

use async_trait::async_trait;
use common::{OrderId, TransactionId};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::error::{PaymentError, Result};
use crate::record::{Payment, PaymentId};
use crate::repository::PaymentRepository;
use crate::status::PaymentStatus;

/// PostgreSQL-backed payment repository.
#[derive(Clone)]
pub struct PostgresPaymentRepository {
    pool: PgPool,
}

impl PostgresPaymentRepository {
    /// Creates a new PostgreSQL payment repository.
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

    fn row_to_payment(row: PgRow) -> Result<Payment> {
        let status: String = row.try_get("status")?;

        Ok(Payment {
            id: PaymentId::from_uuid(row.try_get::<Uuid, _>("id")?),
            order_id: OrderId::new(row.try_get::<String, _>("order_id")?),
            transaction_id: TransactionId::new(row.try_get::<String, _>("transaction_id")?),
            total_items: row.try_get("total_items")?,
            total_amount: row.try_get("total_amount")?,
            status: status
                .parse::<PaymentStatus>()
                .map_err(PaymentError::CorruptRow)?,
            version: row.try_get("version")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn insert(&self, payment: Payment) -> Result<Payment> {
        sqlx::query(
            r#"
            INSERT INTO payments (id, order_id, transaction_id, total_items, total_amount, status, version, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(payment.order_id.as_str())
        .bind(payment.transaction_id.as_str())
        .bind(payment.total_items)
        .bind(payment.total_amount)
        .bind(payment.status.as_str())
        .bind(payment.version)
        .bind(payment.created_at)
        .bind(payment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.constraint() == Some("unique_payment_attempt")
            {
                return PaymentError::Duplicate {
                    order_id: payment.order_id.clone(),
                    transaction_id: payment.transaction_id.clone(),
                };
            }
            PaymentError::Database(e)
        })?;

        Ok(payment)
    }

    async fn update(&self, payment: Payment, expected_version: i64) -> Result<Payment> {
        // created_at is immutable after insert.
        let result = sqlx::query(
            r#"
            UPDATE payments
            SET status = $1, version = $2, updated_at = $3
            WHERE id = $4 AND version = $5
            "#,
        )
        .bind(payment.status.as_str())
        .bind(payment.version)
        .bind(payment.updated_at)
        .bind(payment.id.as_uuid())
        .bind(expected_version)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            let actual: Option<i64> =
                sqlx::query_scalar("SELECT version FROM payments WHERE id = $1")
                    .bind(payment.id.as_uuid())
                    .fetch_optional(&self.pool)
                    .await?;

            return Err(match actual {
                Some(actual) => PaymentError::ConcurrencyConflict {
                    payment_id: payment.id,
                    expected: expected_version,
                    actual,
                },
                None => PaymentError::NotFound {
                    order_id: payment.order_id,
                    transaction_id: payment.transaction_id,
                },
            });
        }

        Ok(payment)
    }

    async fn find(
        &self,
        order_id: &OrderId,
        transaction_id: &TransactionId,
    ) -> Result<Option<Payment>> {
        let row: Option<PgRow> = sqlx::query(
            r#"
            SELECT id, order_id, transaction_id, total_items, total_amount, status, version, created_at, updated_at
            FROM payments
            WHERE order_id = $1 AND transaction_id = $2
            "#,
        )
        .bind(order_id.as_str())
        .bind(transaction_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_payment).transpose()
    }
}
