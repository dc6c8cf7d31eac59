//! MySQL implementation of the user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use atelier_core::domain::entities::User;
use atelier_core::errors::DomainError;
use atelier_core::repositories::UserRepository;

use super::{column_error, db_error, map_sqlx_error};

const USER_COLUMNS: &str = "id, name, email, password_hash, google_id, avatar_url, \
     is_admin, refresh_token, created_at, updated_at";

pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;
        let id = Uuid::parse_str(&id).map_err(|e| DomainError::Database {
            message: format!("Invalid user id in row: {e}"),
        })?;

        Ok(User {
            id,
            name: row.try_get("name").map_err(|e| column_error("name", e))?,
            email: row.try_get("email").map_err(|e| column_error("email", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| column_error("password_hash", e))?,
            google_id: row
                .try_get("google_id")
                .map_err(|e| column_error("google_id", e))?,
            avatar_url: row
                .try_get("avatar_url")
                .map_err(|e| column_error("avatar_url", e))?,
            is_admin: row
                .try_get("is_admin")
                .map_err(|e| column_error("is_admin", e))?,
            refresh_token: row
                .try_get("refresh_token")
                .map_err(|e| column_error("refresh_token", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| column_error("updated_at", e))?,
        })
    }

    async fn find_one(&self, query: &str, bind: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(query)
            .bind(bind)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;
        row.as_ref().map(Self::row_to_user).transpose()
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
        self.find_one(&query, &id.to_string()).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?");
        self.find_one(&query, email).await
    }

    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE google_id = ?");
        self.find_one(&query, google_id).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, name, email, password_hash, google_id, avatar_url,
                is_admin, refresh_token, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.google_id)
            .bind(&user.avatar_url)
            .bind(user.is_admin)
            .bind(&user.refresh_token)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, &user.email))?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users
            SET name = ?, email = ?, password_hash = ?, google_id = ?,
                avatar_url = ?, is_admin = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.google_id)
            .bind(&user.avatar_url)
            .bind(user.is_admin)
            .bind(user.updated_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, &user.email))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("User"));
        }
        Ok(user)
    }

    async fn swap_refresh_token(
        &self,
        user_id: Uuid,
        current: Option<&str>,
        next: Option<&str>,
    ) -> Result<bool, DomainError> {
        // Null-safe compare makes this a single atomic compare-and-swap:
        // only the request presenting the currently stored token wins.
        let query = r#"
            UPDATE users
            SET refresh_token = ?, updated_at = NOW()
            WHERE id = ? AND refresh_token <=> ?
        "#;

        let result = sqlx::query(query)
            .bind(next)
            .bind(user_id.to_string())
            .bind(current)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() == 1)
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at");
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;
        rows.iter().map(Self::row_to_user).collect()
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;
        let total: i64 = row.try_get("total").map_err(|e| column_error("total", e))?;
        Ok(total as u64)
    }
}
