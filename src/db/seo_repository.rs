// src/db/seo_repository.rs
// DOCUMENTATION: Database access layer for SEO metadata
// PURPOSE: Per-page meta records, upserted by slug

use crate::errors::ApiError;
use crate::models::{SeoMeta, UpsertSeoRequest};
use sqlx::PgPool;
use uuid::Uuid;

/// SeoRepository: All database operations for SEO metadata
pub struct SeoRepository;

impl SeoRepository {
    pub async fn list_all(pool: &PgPool) -> Result<Vec<SeoMeta>, ApiError> {
        sqlx::query_as::<_, SeoMeta>("SELECT * FROM seo_meta ORDER BY page_slug ASC")
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("SEO list query error: {}", e);
                ApiError::DatabaseError(e.to_string())
            })
    }

    pub async fn get_by_slug(pool: &PgPool, page_slug: &str) -> Result<SeoMeta, ApiError> {
        sqlx::query_as::<_, SeoMeta>("SELECT * FROM seo_meta WHERE page_slug = $1")
            .bind(page_slug)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching SEO meta: {}", e);
                ApiError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| ApiError::NotFound(format!("seo meta for '{}'", page_slug)))
    }

    /// Create or replace the metadata for one page
    pub async fn upsert(pool: &PgPool, req: &UpsertSeoRequest) -> Result<SeoMeta, ApiError> {
        sqlx::query_as::<_, SeoMeta>(
            r#"
            INSERT INTO seo_meta (
                page_slug, title, description, keywords, canonical,
                og_title, og_description, og_image, no_index, no_follow
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (page_slug) DO UPDATE
            SET title = EXCLUDED.title,
                description = EXCLUDED.description,
                keywords = EXCLUDED.keywords,
                canonical = EXCLUDED.canonical,
                og_title = EXCLUDED.og_title,
                og_description = EXCLUDED.og_description,
                og_image = EXCLUDED.og_image,
                no_index = EXCLUDED.no_index,
                no_follow = EXCLUDED.no_follow,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(&req.page_slug)
        .bind(&req.title)
        .bind(&req.description)
        .bind(&req.keywords)
        .bind(&req.canonical)
        .bind(&req.og_title)
        .bind(&req.og_description)
        .bind(&req.og_image)
        .bind(req.no_index)
        .bind(req.no_follow)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to upsert SEO meta {}: {}", req.page_slug, e);
            ApiError::DatabaseError(e.to_string())
        })
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let rows = sqlx::query("DELETE FROM seo_meta WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Delete failed for SEO meta {}: {}", id, e);
                ApiError::DatabaseError(e.to_string())
            })?
            .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
