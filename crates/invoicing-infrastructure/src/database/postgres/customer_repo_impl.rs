// ============================================================================
// Invoicing Infrastructure - PostgreSQL Customer Repository
// File: crates/invoicing-infrastructure/src/database/postgres/customer_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use invoicing_core::domain::Customer;
use invoicing_core::error::DomainError;
use invoicing_core::repositories::CustomerRepository;
use invoicing_shared::Pagination;

pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct CustomerRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: Option<String>,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            company: row.company,
            user_id: row.user_id,
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
impl CustomerRepository for PgCustomerRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Customer>, DomainError> {
        let row: Option<CustomerRow> = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name, email, company, user_id, created_at, modified_at
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding customer by id", e))?;

        Ok(row.map(|r| r.into()))
    }

    async fn list_by_user(&self, user_id: &Uuid, pagination: Pagination) -> Result<Vec<Customer>, DomainError> {
        let rows: Vec<CustomerRow> = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name, email, company, user_id, created_at, modified_at
            FROM customers
            WHERE user_id = $1
            ORDER BY created_at
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(i64::from(pagination.limit()))
        .bind(i64::from(pagination.offset()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing customers", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, customer: &Customer) -> Result<Customer, DomainError> {
        let row: CustomerRow = sqlx::query_as(
            r#"
            INSERT INTO customers (id, first_name, last_name, email, company, user_id, created_at, modified_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, first_name, last_name, email, company, user_id, created_at, modified_at
            "#,
        )
        .bind(customer.id)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.email)
        .bind(&customer.company)
        .bind(customer.user_id)
        .bind(customer.created_at)
        .bind(customer.modified_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let owner_gone = e.as_database_error().is_some_and(|db| db.is_foreign_key_violation());
            match customer.user_id {
                // Owner deleted between authentication and insert.
                Some(owner) if owner_gone => {
                    error!("Customer owner {} no longer exists", owner);
                    DomainError::UserNotFound(owner)
                }
                _ => db_error("creating customer", e),
            }
        })?;

        info!("Customer created successfully: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, customer: &Customer) -> Result<Customer, DomainError> {
        let row: Option<CustomerRow> = sqlx::query_as(
            r#"
            UPDATE customers
            SET first_name = $2, last_name = $3, email = $4, company = $5, user_id = $6, modified_at = $7
            WHERE id = $1
            RETURNING id, first_name, last_name, email, company, user_id, created_at, modified_at
            "#,
        )
        .bind(customer.id)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.email)
        .bind(&customer.company)
        .bind(customer.user_id)
        .bind(customer.modified_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("updating customer", e))?;

        row.map(Into::into).ok_or(DomainError::CustomerNotFound(customer.id))
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        // Invoices go with the customer through ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("deleting customer", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CustomerNotFound(*id));
        }
        Ok(())
    }
}
