// src/db/page_repository.rs
// DOCUMENTATION: Database access layer for pages and their content blocks
// PURPOSE: Page CRUD plus transactional block ordering

use crate::errors::ApiError;
use crate::models::{ContentBlock, CreatePageRequest, Page, UpdatePageRequest};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

/// PageRepository: All database operations for pages and blocks
pub struct PageRepository;

impl PageRepository {
    pub async fn list(pool: &PgPool) -> Result<Vec<Page>, ApiError> {
        sqlx::query_as::<_, Page>("SELECT * FROM pages ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Page list query error: {}", e);
                ApiError::DatabaseError(e.to_string())
            })
    }

    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Page, ApiError> {
        sqlx::query_as::<_, Page>("SELECT * FROM pages WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching page: {}", e);
                ApiError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    pub async fn create(pool: &PgPool, req: &CreatePageRequest) -> Result<Page, ApiError> {
        sqlx::query_as::<_, Page>(
            "INSERT INTO pages (title, slug, status) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&req.title)
        .bind(&req.slug)
        .bind(&req.status)
        .fetch_one(pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                ApiError::AlreadyExists(format!("page with slug '{}'", req.slug))
            }
            _ => {
                log::error!("Failed to create page: {}", e);
                ApiError::DatabaseError(e.to_string())
            }
        })
    }

    pub async fn update(pool: &PgPool, id: Uuid, req: &UpdatePageRequest) -> Result<Page, ApiError> {
        sqlx::query_as::<_, Page>(
            r#"
            UPDATE pages
            SET title = COALESCE($1, title),
                status = COALESCE($2, status),
                updated_at = NOW()
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(&req.title)
        .bind(&req.status)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Update failed for page {}: {}", id, e);
            ApiError::DatabaseError(e.to_string())
        })?
        .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    /// Hard delete; blocks go with the page via ON DELETE CASCADE
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let rows = sqlx::query("DELETE FROM pages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Delete failed for page {}: {}", id, e);
                ApiError::DatabaseError(e.to_string())
            })?
            .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(id.to_string()));
        }

        Ok(())
    }

    /// Blocks of a page in display order
    pub async fn list_blocks(pool: &PgPool, page_id: Uuid) -> Result<Vec<ContentBlock>, ApiError> {
        sqlx::query_as::<_, ContentBlock>(
            "SELECT * FROM content_blocks WHERE page_id = $1 ORDER BY display_order ASC",
        )
        .bind(page_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Block list query error: {}", e);
            ApiError::DatabaseError(e.to_string())
        })
    }

    /// Append a block after the page's current last block
    pub async fn create_block(
        pool: &PgPool,
        page_id: Uuid,
        block_type: &str,
        content: &Value,
    ) -> Result<ContentBlock, ApiError> {
        sqlx::query_as::<_, ContentBlock>(
            r#"
            INSERT INTO content_blocks (page_id, block_type, content, display_order)
            VALUES (
                $1, $2, $3,
                COALESCE((SELECT MAX(display_order) + 1 FROM content_blocks WHERE page_id = $1), 0)
            )
            RETURNING *
            "#,
        )
        .bind(page_id)
        .bind(block_type)
        .bind(content)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create content block: {}", e);
            ApiError::DatabaseError(e.to_string())
        })
    }

    /// Replace a block's JSON payload
    pub async fn update_block_content(
        pool: &PgPool,
        page_id: Uuid,
        block_id: Uuid,
        content: &Value,
    ) -> Result<ContentBlock, ApiError> {
        sqlx::query_as::<_, ContentBlock>(
            r#"
            UPDATE content_blocks
            SET content = $1, updated_at = NOW()
            WHERE id = $2 AND page_id = $3
            RETURNING *
            "#,
        )
        .bind(content)
        .bind(block_id)
        .bind(page_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Update failed for block {}: {}", block_id, e);
            ApiError::DatabaseError(e.to_string())
        })?
        .ok_or_else(|| ApiError::NotFound(block_id.to_string()))
    }

    /// Delete a block, then close the ordering gap in one transaction
    /// so display_order stays 0..n-1
    pub async fn delete_block(pool: &PgPool, page_id: Uuid, block_id: Uuid) -> Result<(), ApiError> {
        let mut tx = pool.begin().await.map_err(|e| {
            log::error!("Failed to open block transaction: {}", e);
            ApiError::DatabaseError(e.to_string())
        })?;

        let rows = sqlx::query("DELETE FROM content_blocks WHERE id = $1 AND page_id = $2")
            .bind(block_id)
            .bind(page_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                log::error!("Delete failed for block {}: {}", block_id, e);
                ApiError::DatabaseError(e.to_string())
            })?
            .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(block_id.to_string()));
        }

        // Resequence the survivors by their current order
        sqlx::query(
            r#"
            UPDATE content_blocks cb
            SET display_order = seq.new_order
            FROM (
                SELECT id, ROW_NUMBER() OVER (ORDER BY display_order ASC) - 1 AS new_order
                FROM content_blocks
                WHERE page_id = $1
            ) seq
            WHERE cb.id = seq.id
            "#,
        )
        .bind(page_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            log::error!("Block resequence failed: {}", e);
            ApiError::DatabaseError(e.to_string())
        })?;

        tx.commit().await.map_err(|e| {
            log::error!("Block delete commit failed: {}", e);
            ApiError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }

    /// Renumber blocks 0..n-1 following the given id order, atomically
    pub async fn reorder_blocks(
        pool: &PgPool,
        page_id: Uuid,
        block_ids: &[Uuid],
    ) -> Result<Vec<ContentBlock>, ApiError> {
        let mut tx = pool.begin().await.map_err(|e| {
            log::error!("Failed to open reorder transaction: {}", e);
            ApiError::DatabaseError(e.to_string())
        })?;

        for (idx, block_id) in block_ids.iter().enumerate() {
            let rows = sqlx::query(
                "UPDATE content_blocks SET display_order = $1, updated_at = NOW()
                 WHERE id = $2 AND page_id = $3",
            )
            .bind(idx as i32)
            .bind(block_id)
            .bind(page_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                log::error!("Reorder failed for block {}: {}", block_id, e);
                ApiError::DatabaseError(e.to_string())
            })?
            .rows_affected();

            if rows == 0 {
                return Err(ApiError::InvalidInput(format!(
                    "block {} does not belong to page {}",
                    block_id, page_id
                )));
            }
        }

        tx.commit().await.map_err(|e| {
            log::error!("Reorder commit failed: {}", e);
            ApiError::DatabaseError(e.to_string())
        })?;

        Self::list_blocks(pool, page_id).await
    }
}
