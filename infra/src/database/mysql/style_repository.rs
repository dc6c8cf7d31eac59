//! MySQL implementation of the style repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use std::str::FromStr;
use uuid::Uuid;

use atelier_core::domain::entities::{Style, StyleCategory};
use atelier_core::errors::DomainError;
use atelier_core::repositories::StyleRepository;

use super::{column_error, db_error, map_sqlx_error};

const STYLE_COLUMNS: &str =
    "id, name, category, image_url, image_public_id, description, created_at, updated_at";

pub struct MySqlStyleRepository {
    pool: MySqlPool,
}

impl MySqlStyleRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_style(row: &MySqlRow) -> Result<Style, DomainError> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;
        let id = Uuid::parse_str(&id).map_err(|e| DomainError::Database {
            message: format!("Invalid style id in row: {e}"),
        })?;

        let category: String = row
            .try_get("category")
            .map_err(|e| column_error("category", e))?;
        let category = StyleCategory::from_str(&category).map_err(|e| DomainError::Database {
            message: format!("Invalid category in row: {e}"),
        })?;

        Ok(Style {
            id,
            name: row.try_get("name").map_err(|e| column_error("name", e))?,
            category,
            image_url: row
                .try_get("image_url")
                .map_err(|e| column_error("image_url", e))?,
            image_public_id: row
                .try_get("image_public_id")
                .map_err(|e| column_error("image_public_id", e))?,
            description: row
                .try_get("description")
                .map_err(|e| column_error("description", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| column_error("updated_at", e))?,
        })
    }
}

#[async_trait]
impl StyleRepository for MySqlStyleRepository {
    async fn create(&self, style: Style) -> Result<Style, DomainError> {
        let query = r#"
            INSERT INTO styles (
                id, name, category, image_url, image_public_id, description,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(style.id.to_string())
            .bind(&style.name)
            .bind(style.category.as_str())
            .bind(&style.image_url)
            .bind(&style.image_public_id)
            .bind(&style.description)
            .bind(style.created_at)
            .bind(style.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, &style.name))?;

        Ok(style)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Style>, DomainError> {
        let query = format!("SELECT {STYLE_COLUMNS} FROM styles WHERE id = ?");
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;
        row.as_ref().map(Self::row_to_style).transpose()
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Style>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let query = format!("SELECT {STYLE_COLUMNS} FROM styles WHERE id IN ({placeholders})");

        let mut q = sqlx::query(&query);
        for id in ids {
            q = q.bind(id.to_string());
        }
        let rows = q.fetch_all(&self.pool).await.map_err(db_error)?;

        let fetched = rows
            .iter()
            .map(Self::row_to_style)
            .collect::<Result<Vec<_>, _>>()?;

        // Return in input order; ids whose style vanished are skipped.
        let ordered = ids
            .iter()
            .filter_map(|id| fetched.iter().find(|s| s.id == *id).cloned())
            .collect();
        Ok(ordered)
    }

    async fn search(
        &self,
        category: Option<StyleCategory>,
        name: Option<&str>,
    ) -> Result<Vec<Style>, DomainError> {
        let query = format!(
            r#"
            SELECT {STYLE_COLUMNS} FROM styles
            WHERE (? IS NULL OR category = ?)
              AND (? IS NULL OR LOWER(name) LIKE CONCAT('%', LOWER(?), '%'))
            ORDER BY created_at DESC
            "#
        );

        let category = category.map(|c| c.as_str());
        let rows = sqlx::query(&query)
            .bind(category)
            .bind(category)
            .bind(name)
            .bind(name)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        rows.iter().map(Self::row_to_style).collect()
    }

    async fn update(&self, style: Style) -> Result<Style, DomainError> {
        let query = r#"
            UPDATE styles
            SET name = ?, category = ?, image_url = ?, image_public_id = ?,
                description = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&style.name)
            .bind(style.category.as_str())
            .bind(&style.image_url)
            .bind(&style.image_public_id)
            .bind(&style.description)
            .bind(style.updated_at)
            .bind(style.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, &style.name))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Style"));
        }
        Ok(style)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM styles WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM styles")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;
        let total: i64 = row.try_get("total").map_err(|e| column_error("total", e))?;
        Ok(total as u64)
    }
}
