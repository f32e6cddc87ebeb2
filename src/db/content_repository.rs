// src/db/content_repository.rs
// DOCUMENTATION: Database access layer for website content (settings)
// PURPOSE: Keyed content blocks behind the public content endpoint

use crate::errors::ApiError;
use crate::models::{ContentQuery, CreateContentRequest, UpdateContentRequest, WebsiteContent};
use sqlx::PgPool;
use uuid::Uuid;

/// ContentRepository: All database operations for website content
pub struct ContentRepository;

impl ContentRepository {
    /// Active blocks, optionally filtered by page and section
    /// Ordered the way the public site renders them
    pub async fn list(pool: &PgPool, query: &ContentQuery) -> Result<Vec<WebsiteContent>, ApiError> {
        sqlx::query_as::<_, WebsiteContent>(
            r#"
            SELECT * FROM website_content
            WHERE is_active = true
              AND ($1::text IS NULL OR page = $1)
              AND ($2::text IS NULL OR section = $2)
            ORDER BY page ASC, section ASC, display_order ASC
            "#,
        )
        .bind(&query.page)
        .bind(&query.section)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Content list query error: {}", e);
            ApiError::DatabaseError(e.to_string())
        })
    }

    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<WebsiteContent, ApiError> {
        sqlx::query_as::<_, WebsiteContent>("SELECT * FROM website_content WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching content block: {}", e);
                ApiError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    pub async fn create(
        pool: &PgPool,
        req: &CreateContentRequest,
    ) -> Result<WebsiteContent, ApiError> {
        sqlx::query_as::<_, WebsiteContent>(
            r#"
            INSERT INTO website_content (
                key, title, content, media_url, media_type,
                content_type, page, section, display_order, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&req.key)
        .bind(&req.title)
        .bind(&req.content)
        .bind(&req.media_url)
        .bind(&req.media_type)
        .bind(&req.content_type)
        .bind(&req.page)
        .bind(&req.section)
        .bind(req.display_order)
        .bind(req.is_active)
        .fetch_one(pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                ApiError::AlreadyExists(format!("content key '{}'", req.key))
            }
            _ => {
                log::error!("Failed to create content block: {}", e);
                ApiError::DatabaseError(e.to_string())
            }
        })
    }

    /// Insert or update by key
    /// Dashboard bulk-save path; key identity never changes
    pub async fn upsert_by_key(
        pool: &PgPool,
        req: &CreateContentRequest,
    ) -> Result<WebsiteContent, ApiError> {
        sqlx::query_as::<_, WebsiteContent>(
            r#"
            INSERT INTO website_content (
                key, title, content, media_url, media_type,
                content_type, page, section, display_order, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (key) DO UPDATE
            SET title = EXCLUDED.title,
                content = EXCLUDED.content,
                media_url = EXCLUDED.media_url,
                media_type = EXCLUDED.media_type,
                content_type = EXCLUDED.content_type,
                page = EXCLUDED.page,
                section = EXCLUDED.section,
                display_order = EXCLUDED.display_order,
                is_active = EXCLUDED.is_active,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(&req.key)
        .bind(&req.title)
        .bind(&req.content)
        .bind(&req.media_url)
        .bind(&req.media_type)
        .bind(&req.content_type)
        .bind(&req.page)
        .bind(&req.section)
        .bind(req.display_order)
        .bind(req.is_active)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to upsert content key {}: {}", req.key, e);
            ApiError::DatabaseError(e.to_string())
        })
    }

    /// Partial update - only provided fields are modified
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateContentRequest,
    ) -> Result<WebsiteContent, ApiError> {
        sqlx::query_as::<_, WebsiteContent>(
            r#"
            UPDATE website_content
            SET title = COALESCE($1, title),
                content = COALESCE($2, content),
                media_url = COALESCE($3, media_url),
                media_type = COALESCE($4, media_type),
                content_type = COALESCE($5, content_type),
                display_order = COALESCE($6, display_order),
                is_active = COALESCE($7, is_active),
                updated_at = NOW()
            WHERE id = $8
            RETURNING *
            "#,
        )
        .bind(&req.title)
        .bind(&req.content)
        .bind(&req.media_url)
        .bind(&req.media_type)
        .bind(&req.content_type)
        .bind(req.display_order)
        .bind(req.is_active)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Update failed for content block {}: {}", id, e);
            ApiError::DatabaseError(e.to_string())
        })?
        .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let rows = sqlx::query("DELETE FROM website_content WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Delete failed for content block {}: {}", id, e);
                ApiError::DatabaseError(e.to_string())
            })?
            .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
