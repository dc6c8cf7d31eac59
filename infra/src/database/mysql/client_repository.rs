//! MySQL implementation of the client repository.
//!
//! Clients live in `clients`; linked styles live in the `client_styles`
//! join table, whose composite primary key is what enforces the
//! at-most-once link invariant. Measurements are stored as a JSON column,
//! preserving entry order.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use atelier_core::domain::entities::{Client, Measurement};
use atelier_core::errors::DomainError;
use atelier_core::repositories::ClientRepository;

use super::{column_error, db_error, map_sqlx_error};

const CLIENT_COLUMNS: &str =
    "id, name, phone, email, event_type, measurements, created_at, updated_at";

pub struct MySqlClientRepository {
    pool: MySqlPool,
}

impl MySqlClientRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_client(row: &MySqlRow) -> Result<Client, DomainError> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;
        let id = Uuid::parse_str(&id).map_err(|e| DomainError::Database {
            message: format!("Invalid client id in row: {e}"),
        })?;

        let measurements: serde_json::Value = row
            .try_get("measurements")
            .map_err(|e| column_error("measurements", e))?;
        let measurements: Vec<Measurement> =
            serde_json::from_value(measurements).map_err(|e| DomainError::Database {
                message: format!("Invalid measurements JSON: {e}"),
            })?;

        Ok(Client {
            id,
            name: row.try_get("name").map_err(|e| column_error("name", e))?,
            phone: row.try_get("phone").map_err(|e| column_error("phone", e))?,
            email: row.try_get("email").map_err(|e| column_error("email", e))?,
            event_type: row
                .try_get("event_type")
                .map_err(|e| column_error("event_type", e))?,
            measurements,
            style_ids: Vec::new(),
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| column_error("updated_at", e))?,
        })
    }

    /// Loads linked style ids in link order.
    async fn load_style_ids(&self, client_id: Uuid) -> Result<Vec<Uuid>, DomainError> {
        let rows = sqlx::query(
            "SELECT style_id FROM client_styles WHERE client_id = ? ORDER BY ordinal",
        )
        .bind(client_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.iter()
            .map(|row| {
                let raw: String = row
                    .try_get("style_id")
                    .map_err(|e| column_error("style_id", e))?;
                Uuid::parse_str(&raw).map_err(|e| DomainError::Database {
                    message: format!("Invalid style id in row: {e}"),
                })
            })
            .collect()
    }

    fn measurements_json(client: &Client) -> Result<serde_json::Value, DomainError> {
        serde_json::to_value(&client.measurements).map_err(|e| DomainError::Internal {
            message: format!("Failed to encode measurements: {e}"),
        })
    }
}

#[async_trait]
impl ClientRepository for MySqlClientRepository {
    async fn create(&self, client: Client) -> Result<Client, DomainError> {
        let query = r#"
            INSERT INTO clients (
                id, name, phone, email, event_type, measurements,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(client.id.to_string())
            .bind(&client.name)
            .bind(&client.phone)
            .bind(&client.email)
            .bind(&client.event_type)
            .bind(Self::measurements_json(&client)?)
            .bind(client.created_at)
            .bind(client.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, &client.phone))?;

        Ok(client)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, DomainError> {
        let query = format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE id = ?");
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        match row {
            Some(row) => {
                let mut client = Self::row_to_client(&row)?;
                client.style_ids = self.load_style_ids(client.id).await?;
                Ok(Some(client))
            }
            None => Ok(None),
        }
    }

    async fn search(
        &self,
        name: Option<&str>,
        event_type: Option<&str>,
    ) -> Result<Vec<Client>, DomainError> {
        let query = format!(
            r#"
            SELECT {CLIENT_COLUMNS} FROM clients
            WHERE (? IS NULL OR LOWER(name) LIKE CONCAT('%', LOWER(?), '%'))
              AND (? IS NULL OR LOWER(event_type) LIKE CONCAT('%', LOWER(?), '%'))
            ORDER BY created_at DESC
            "#
        );

        let rows = sqlx::query(&query)
            .bind(name)
            .bind(name)
            .bind(event_type)
            .bind(event_type)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        let mut clients = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut client = Self::row_to_client(row)?;
            client.style_ids = self.load_style_ids(client.id).await?;
            clients.push(client);
        }
        Ok(clients)
    }

    async fn update(&self, client: Client) -> Result<Client, DomainError> {
        let query = r#"
            UPDATE clients
            SET name = ?, phone = ?, email = ?, event_type = ?,
                measurements = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&client.name)
            .bind(&client.phone)
            .bind(&client.email)
            .bind(&client.event_type)
            .bind(Self::measurements_json(&client)?)
            .bind(client.updated_at)
            .bind(client.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, &client.phone))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Client"));
        }

        // Prune join-table rows the record no longer carries; new links are
        // only ever added through `link_style`.
        let stored = self.load_style_ids(client.id).await?;
        for style_id in stored {
            if !client.style_ids.contains(&style_id) {
                sqlx::query("DELETE FROM client_styles WHERE client_id = ? AND style_id = ?")
                    .bind(client.id.to_string())
                    .bind(style_id.to_string())
                    .execute(&self.pool)
                    .await
                    .map_err(db_error)?;
            }
        }

        Ok(client)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        sqlx::query("DELETE FROM client_styles WHERE client_id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        let result = sqlx::query("DELETE FROM clients WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn link_style(&self, client_id: Uuid, style_id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "INSERT INTO client_styles (client_id, style_id) VALUES (?, ?)",
        )
        .bind(client_id.to_string())
        .bind(style_id.to_string())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(true),
            // The composite primary key rejected a second identical link
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Ok(false),
            Err(e) => Err(db_error(e)),
        }
    }

    async fn unlink_style_everywhere(&self, style_id: Uuid) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM client_styles WHERE style_id = ?")
            .bind(style_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM clients")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;
        let total: i64 = row.try_get("total").map_err(|e| column_error("total", e))?;
        Ok(total as u64)
    }
}
