// src/db/navigation_repository.rs
// DOCUMENTATION: Database access layer for navigation items
// PURPOSE: Menu entry queries grouped by location

use crate::errors::ApiError;
use crate::models::{CreateNavigationRequest, NavigationItem, UpdateNavigationRequest};
use sqlx::PgPool;
use uuid::Uuid;

/// NavigationRepository: All database operations for navigation items
pub struct NavigationRepository;

impl NavigationRepository {
    /// All items ordered for menu assembly
    pub async fn list_all(pool: &PgPool) -> Result<Vec<NavigationItem>, ApiError> {
        sqlx::query_as::<_, NavigationItem>(
            "SELECT * FROM navigation_items ORDER BY menu_location ASC, display_order ASC",
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Navigation list query error: {}", e);
            ApiError::DatabaseError(e.to_string())
        })
    }

    /// Active items of one menu location
    pub async fn list_by_location(
        pool: &PgPool,
        location: &str,
    ) -> Result<Vec<NavigationItem>, ApiError> {
        sqlx::query_as::<_, NavigationItem>(
            r#"
            SELECT * FROM navigation_items
            WHERE menu_location = $1 AND is_active = true
            ORDER BY display_order ASC
            "#,
        )
        .bind(location)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Navigation location query error: {}", e);
            ApiError::DatabaseError(e.to_string())
        })
    }

    pub async fn create(
        pool: &PgPool,
        req: &CreateNavigationRequest,
    ) -> Result<NavigationItem, ApiError> {
        sqlx::query_as::<_, NavigationItem>(
            r#"
            INSERT INTO navigation_items (
                title, url, target, icon, parent_id,
                menu_location, display_order, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&req.title)
        .bind(&req.url)
        .bind(&req.target)
        .bind(&req.icon)
        .bind(req.parent_id)
        .bind(&req.menu_location)
        .bind(req.display_order)
        .bind(req.is_active)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create navigation item: {}", e);
            ApiError::DatabaseError(e.to_string())
        })
    }

    /// Partial update - only provided fields are modified
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateNavigationRequest,
    ) -> Result<NavigationItem, ApiError> {
        sqlx::query_as::<_, NavigationItem>(
            r#"
            UPDATE navigation_items
            SET title = COALESCE($1, title),
                url = COALESCE($2, url),
                target = COALESCE($3, target),
                icon = COALESCE($4, icon),
                parent_id = COALESCE($5, parent_id),
                menu_location = COALESCE($6, menu_location),
                display_order = COALESCE($7, display_order),
                is_active = COALESCE($8, is_active),
                updated_at = NOW()
            WHERE id = $9
            RETURNING *
            "#,
        )
        .bind(&req.title)
        .bind(&req.url)
        .bind(&req.target)
        .bind(&req.icon)
        .bind(req.parent_id)
        .bind(&req.menu_location)
        .bind(req.display_order)
        .bind(req.is_active)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Update failed for navigation item {}: {}", id, e);
            ApiError::DatabaseError(e.to_string())
        })?
        .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    /// Hard delete; children cascade at the database level
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let rows = sqlx::query("DELETE FROM navigation_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Delete failed for navigation item {}: {}", id, e);
                ApiError::DatabaseError(e.to_string())
            })?
            .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
