// ============================================================================
// Invoicing Infrastructure - PostgreSQL Invoice Repository
// File: crates/invoicing-infrastructure/src/database/postgres/invoice_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use invoicing_core::domain::Invoice;
use invoicing_core::error::DomainError;
use invoicing_core::repositories::InvoiceRepository;
use invoicing_shared::Pagination;

pub struct PgInvoiceRepository {
    pool: PgPool,
}

impl PgInvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct InvoiceRow {
    pub id: Uuid,
    pub amount: Decimal,
    pub sent_at: DateTime<Utc>,
    pub status: String,
    pub chrono: i32,
    pub customer_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl From<InvoiceRow> for Invoice {
    fn from(row: InvoiceRow) -> Self {
        Invoice {
            id: row.id,
            amount: row.amount,
            sent_at: Some(row.sent_at),
            status: row.status.parse().unwrap_or_default(),
            chrono: row.chrono,
            customer_id: row.customer_id,
            created_at: row.created_at,
            modified_at: row.modified_at,
        }
    }
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    DomainError::DatabaseError(e.to_string())
}

#[async_trait]
impl InvoiceRepository for PgInvoiceRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Invoice>, DomainError> {
        let row: Option<InvoiceRow> = sqlx::query_as(
            r#"
            SELECT id, amount, sent_at, status, chrono, customer_id, created_at, modified_at
            FROM invoices
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding invoice by id", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_by_user(&self, user_id: &Uuid, pagination: Pagination) -> Result<Vec<Invoice>, DomainError> {
        let rows: Vec<InvoiceRow> = sqlx::query_as(
            r#"
            SELECT i.id, i.amount, i.sent_at, i.status, i.chrono, i.customer_id, i.created_at, i.modified_at
            FROM invoices i
            JOIN customers c ON c.id = i.customer_id
            WHERE c.user_id = $1
            ORDER BY i.chrono
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(i64::from(pagination.limit()))
        .bind(i64::from(pagination.offset()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing invoices by user", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_by_customer(&self, customer_id: &Uuid) -> Result<Vec<Invoice>, DomainError> {
        let rows: Vec<InvoiceRow> = sqlx::query_as(
            r#"
            SELECT id, amount, sent_at, status, chrono, customer_id, created_at, modified_at
            FROM invoices
            WHERE customer_id = $1
            ORDER BY chrono
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing invoices by customer", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn last_chrono_in_sequence(&self, customer_id: &Uuid) -> Result<Option<i32>, DomainError> {
        let last: Option<i32> = sqlx::query_scalar(
            r#"
            WITH c AS (SELECT id, user_id FROM customers WHERE id = $1)
            SELECT MAX(i.chrono)
            FROM invoices i, c
            WHERE (c.user_id IS NOT NULL AND i.owner_id = c.user_id)
               OR (c.user_id IS NULL AND i.customer_id = c.id AND i.owner_id IS NULL)
            "#,
        )
        .bind(customer_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("reading last invoice number", e))?;

        Ok(last)
    }

    async fn create(&self, invoice: &Invoice) -> Result<Invoice, DomainError> {
        let sent_at = invoice
            .sent_at
            .ok_or_else(|| DomainError::InternalError("invoice must be dated before persistence".into()))?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("starting invoice transaction", e))?;

        // Concurrent inserts into one sequence queue on the owner's row, or
        // on the customer's row while it has no owner.
        let owner: Option<Uuid> = sqlx::query_scalar("SELECT user_id FROM customers WHERE id = $1 FOR UPDATE")
            .bind(invoice.customer_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| db_error("locking invoice customer", e))?
            .ok_or(DomainError::CustomerNotFound(invoice.customer_id))?;
        if let Some(owner) = owner {
            sqlx::query("SELECT id FROM users WHERE id = $1 FOR UPDATE")
                .bind(owner)
                .execute(&mut *tx)
                .await
                .map_err(|e| db_error("locking invoice owner", e))?;
        }

        let row: InvoiceRow = sqlx::query_as(
            r#"
            INSERT INTO invoices (id, amount, sent_at, status, chrono, customer_id, owner_id, created_at, modified_at)
            VALUES (
                $1, $2, $3, $4,
                COALESCE((
                    SELECT MAX(chrono) FROM invoices
                    WHERE ($6::uuid IS NOT NULL AND owner_id = $6)
                       OR ($6::uuid IS NULL AND customer_id = $5 AND owner_id IS NULL)
                ), 0) + 1,
                $5, $6, $7, $8
            )
            RETURNING id, amount, sent_at, status, chrono, customer_id, created_at, modified_at
            "#,
        )
        .bind(invoice.id)
        .bind(invoice.amount)
        .bind(sent_at)
        .bind(invoice.status.as_str())
        .bind(invoice.customer_id)
        .bind(owner)
        .bind(invoice.created_at)
        .bind(invoice.modified_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| db_error("creating invoice", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("committing invoice", e))?;

        info!("Invoice created successfully: {} (chrono {})", row.id, row.chrono);
        Ok(row.into())
    }

    async fn update(&self, invoice: &Invoice) -> Result<Invoice, DomainError> {
        let sent_at = invoice
            .sent_at
            .ok_or_else(|| DomainError::InternalError("invoice must be dated before persistence".into()))?;

        let row: Option<InvoiceRow> = sqlx::query_as(
            r#"
            UPDATE invoices
            SET amount = $2, sent_at = $3, status = $4, modified_at = $5
            WHERE id = $1
            RETURNING id, amount, sent_at, status, chrono, customer_id, created_at, modified_at
            "#,
        )
        .bind(invoice.id)
        .bind(invoice.amount)
        .bind(sent_at)
        .bind(invoice.status.as_str())
        .bind(invoice.modified_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("updating invoice", e))?;

        row.map(Into::into).ok_or(DomainError::InvoiceNotFound(invoice.id))
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("deleting invoice", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::InvoiceNotFound(*id));
        }
        Ok(())
    }
}
