// src/db/cabin_repository.rs
// DOCUMENTATION: Database access layer for cabins
// PURPOSE: Cabin queries used by tour detail and availability checking

use crate::errors::ApiError;
use crate::models::{Cabin, CreateCabinRequest, UpdateCabinRequest};
use sqlx::PgPool;
use uuid::Uuid;

/// CabinRepository: All database operations for cabins
pub struct CabinRepository;

impl CabinRepository {
    /// Active cabins of a tour, cheapest first
    pub async fn list_by_tour(pool: &PgPool, tour_id: Uuid) -> Result<Vec<Cabin>, ApiError> {
        sqlx::query_as::<_, Cabin>(
            "SELECT * FROM cabins WHERE tour_id = $1 AND is_active = true ORDER BY price ASC",
        )
        .bind(tour_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list cabins for tour {}: {}", tour_id, e);
            ApiError::DatabaseError(e.to_string())
        })
    }

    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Cabin, ApiError> {
        sqlx::query_as::<_, Cabin>("SELECT * FROM cabins WHERE id = $1 AND is_active = true")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching cabin: {}", e);
                ApiError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    pub async fn create(
        pool: &PgPool,
        tour_id: Uuid,
        req: &CreateCabinRequest,
    ) -> Result<Cabin, ApiError> {
        let cabin = sqlx::query_as::<_, Cabin>(
            r#"
            INSERT INTO cabins (tour_id, name, price, capacity)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(tour_id)
        .bind(&req.name)
        .bind(req.price)
        .bind(req.capacity)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create cabin: {}", e);
            ApiError::DatabaseError(e.to_string())
        })?;

        log::info!("Created cabin {} on tour {}", cabin.id, tour_id);
        Ok(cabin)
    }

    /// Partial update - only provided fields are modified
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateCabinRequest,
    ) -> Result<Cabin, ApiError> {
        sqlx::query_as::<_, Cabin>(
            r#"
            UPDATE cabins
            SET name = COALESCE($1, name),
                price = COALESCE($2, price),
                capacity = COALESCE($3, capacity),
                updated_at = NOW()
            WHERE id = $4 AND is_active = true
            RETURNING *
            "#,
        )
        .bind(&req.name)
        .bind(req.price)
        .bind(req.capacity)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Update failed for cabin {}: {}", id, e);
            ApiError::DatabaseError(e.to_string())
        })?
        .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    /// Soft delete
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let rows =
            sqlx::query("UPDATE cabins SET is_active = false, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(pool)
                .await
                .map_err(|e| {
                    log::error!("Delete failed for cabin {}: {}", id, e);
                    ApiError::DatabaseError(e.to_string())
                })?
                .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
