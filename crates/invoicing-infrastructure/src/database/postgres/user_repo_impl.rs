// ============================================================================
// Invoicing Infrastructure - PostgreSQL User Repository
// File: crates/invoicing-infrastructure/src/database/postgres/user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};
use uuid::Uuid;

use invoicing_core::domain::{Password, User};
use invoicing_core::error::DomainError;
use invoicing_core::repositories::UserRepository;
use invoicing_shared::utils::mask_email;
use invoicing_shared::Pagination;

use super::map_write_error;

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = r#"
    u.id, u.email, u.roles, u.password, u.first_name, u.last_name,
    u.company, u.street_address, u.postcode, u.city, u.phone_number,
    u.created_at, u.modified_at,
    ARRAY(SELECT c.id FROM customers c WHERE c.user_id = u.id ORDER BY c.created_at) AS customer_ids
"#;

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub roles: Vec<String>,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub street_address: Option<String>,
    pub postcode: Option<String>,
    pub city: Option<String>,
    pub phone_number: Option<String>,
    pub customer_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            roles: row.roles,
            password: Password::Hashed(row.password),
            first_name: row.first_name,
            last_name: row.last_name,
            company: row.company,
            street_address: row.street_address,
            postcode: row.postcode,
            city: row.city,
            phone_number: row.phone_number,
            customer_ids: row.customer_ids,
            created_at: row.created_at,
            modified_at: row.modified_at,
        }
    }
}

fn stored_hash(user: &User) -> Result<&str, DomainError> {
    user.password.hashed().ok_or_else(|| {
        error!("Refusing to store a plaintext password for user {}", user.id);
        DomainError::InternalError("password must be hashed before persistence".into())
    })
}

impl PgUserRepository {
    async fn fetch_one_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!("SELECT {} FROM users u WHERE u.id = $1", USER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error finding user by id: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(row.map(|r| r.into()))
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError> {
        self.fetch_one_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {} FROM users u WHERE LOWER(u.email) = LOWER($1)", USER_COLUMNS))
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e: sqlx::Error| {
                    error!("Database error finding user by email: {}", e);
                    DomainError::DatabaseError(e.to_string())
                })?;

        Ok(row.map(|r| r.into()))
    }

    async fn list(&self, pagination: Pagination) -> Result<Vec<User>, DomainError> {
        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users u ORDER BY u.created_at LIMIT $1 OFFSET $2",
            USER_COLUMNS
        ))
        .bind(i64::from(pagination.limit()))
        .bind(i64::from(pagination.offset()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error listing users: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, user: &User) -> Result<User, DomainError> {
        info!("Creating user with email: {}", mask_email(&user.email));
        let hash = stored_hash(user)?;

        sqlx::query(
            r#"
            INSERT INTO users (
                id, email, roles, password, first_name, last_name,
                company, street_address, postcode, city, phone_number,
                created_at, modified_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.roles)
        .bind(hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.company)
        .bind(&user.street_address)
        .bind(&user.postcode)
        .bind(&user.city)
        .bind(&user.phone_number)
        .bind(user.created_at)
        .bind(user.modified_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error("creating user", &user.email, e))?;

        info!("User created successfully: {}", user.id);
        self.fetch_one_by_id(&user.id).await?.ok_or(DomainError::UserNotFound(user.id))
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let hash = stored_hash(user)?;

        let result = sqlx::query(
            r#"
            UPDATE users
            SET
                email = $2,
                roles = $3,
                password = $4,
                first_name = $5,
                last_name = $6,
                company = $7,
                street_address = $8,
                postcode = $9,
                city = $10,
                phone_number = $11,
                modified_at = $12
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.roles)
        .bind(hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.company)
        .bind(&user.street_address)
        .bind(&user.postcode)
        .bind(&user.city)
        .bind(&user.phone_number)
        .bind(user.modified_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error("updating user", &user.email, e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound(user.id));
        }
        self.fetch_one_by_id(&user.id).await?.ok_or(DomainError::UserNotFound(user.id))
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        // Owned customers are detached by the ON DELETE SET NULL foreign key.
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error deleting user: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound(*id));
        }
        Ok(())
    }
}
