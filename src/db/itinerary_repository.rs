// src/db/itinerary_repository.rs
// DOCUMENTATION: Database access layer for itineraries and their days
// PURPOSE: Itinerary CRUD plus transactional day reordering

use crate::errors::ApiError;
use crate::models::{
    CreateItineraryDayRequest, CreateItineraryRequest, Itinerary, ItineraryDay,
    UpdateItineraryDayRequest, UpdateItineraryRequest,
};
use sqlx::PgPool;
use uuid::Uuid;

/// ItineraryRepository: All database operations for itineraries
pub struct ItineraryRepository;

impl ItineraryRepository {
    /// Active itineraries for the public site, ordered for display
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Itinerary>, ApiError> {
        sqlx::query_as::<_, Itinerary>(
            r#"
            SELECT * FROM itineraries
            WHERE is_active = true
            ORDER BY display_order ASC, created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Itinerary list query error: {}", e);
            ApiError::DatabaseError(e.to_string())
        })
    }

    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Itinerary, ApiError> {
        sqlx::query_as::<_, Itinerary>("SELECT * FROM itineraries WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching itinerary: {}", e);
                ApiError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    pub async fn create(
        pool: &PgPool,
        req: &CreateItineraryRequest,
        slug: &str,
    ) -> Result<Itinerary, ApiError> {
        let itinerary = sqlx::query_as::<_, Itinerary>(
            r#"
            INSERT INTO itineraries (
                name, slug, description, duration_days,
                tour_type, destination, display_order
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&req.name)
        .bind(slug)
        .bind(&req.description)
        .bind(req.duration_days)
        .bind(&req.tour_type)
        .bind(&req.destination)
        .bind(req.display_order)
        .fetch_one(pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                ApiError::AlreadyExists(format!("itinerary with slug '{}'", slug))
            }
            _ => {
                log::error!("Failed to create itinerary: {}", e);
                ApiError::DatabaseError(e.to_string())
            }
        })?;

        log::info!("Created itinerary {} ({})", itinerary.name, itinerary.id);
        Ok(itinerary)
    }

    /// Partial update - only provided fields are modified
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateItineraryRequest,
    ) -> Result<Itinerary, ApiError> {
        sqlx::query_as::<_, Itinerary>(
            r#"
            UPDATE itineraries
            SET name = COALESCE($1, name),
                description = COALESCE($2, description),
                duration_days = COALESCE($3, duration_days),
                tour_type = COALESCE($4, tour_type),
                destination = COALESCE($5, destination),
                display_order = COALESCE($6, display_order),
                is_active = COALESCE($7, is_active),
                updated_at = NOW()
            WHERE id = $8
            RETURNING *
            "#,
        )
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.duration_days)
        .bind(&req.tour_type)
        .bind(&req.destination)
        .bind(req.display_order)
        .bind(req.is_active)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Update failed for itinerary {}: {}", id, e);
            ApiError::DatabaseError(e.to_string())
        })?
        .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    /// Soft delete
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let rows = sqlx::query(
            "UPDATE itineraries SET is_active = false, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            log::error!("Delete failed for itinerary {}: {}", id, e);
            ApiError::DatabaseError(e.to_string())
        })?
        .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(id.to_string()));
        }

        Ok(())
    }

    /// Days of an itinerary in day order
    pub async fn list_days(pool: &PgPool, itinerary_id: Uuid) -> Result<Vec<ItineraryDay>, ApiError> {
        sqlx::query_as::<_, ItineraryDay>(
            "SELECT * FROM itinerary_days WHERE itinerary_id = $1 ORDER BY day_number ASC",
        )
        .bind(itinerary_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Day list query error: {}", e);
            ApiError::DatabaseError(e.to_string())
        })
    }

    pub async fn create_day(
        pool: &PgPool,
        itinerary_id: Uuid,
        req: &CreateItineraryDayRequest,
    ) -> Result<ItineraryDay, ApiError> {
        sqlx::query_as::<_, ItineraryDay>(
            r#"
            INSERT INTO itinerary_days (itinerary_id, day_number, title, description, location, meals)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(itinerary_id)
        .bind(req.day_number)
        .bind(&req.title)
        .bind(&req.description)
        .bind(&req.location)
        .bind(&req.meals)
        .fetch_one(pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                ApiError::AlreadyExists(format!("day {} already exists", req.day_number))
            }
            _ => {
                log::error!("Failed to create itinerary day: {}", e);
                ApiError::DatabaseError(e.to_string())
            }
        })
    }

    pub async fn update_day(
        pool: &PgPool,
        itinerary_id: Uuid,
        day_id: Uuid,
        req: &UpdateItineraryDayRequest,
    ) -> Result<ItineraryDay, ApiError> {
        sqlx::query_as::<_, ItineraryDay>(
            r#"
            UPDATE itinerary_days
            SET title = COALESCE($1, title),
                description = COALESCE($2, description),
                location = COALESCE($3, location),
                meals = COALESCE($4, meals),
                updated_at = NOW()
            WHERE id = $5 AND itinerary_id = $6
            RETURNING *
            "#,
        )
        .bind(&req.title)
        .bind(&req.description)
        .bind(&req.location)
        .bind(&req.meals)
        .bind(day_id)
        .bind(itinerary_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Update failed for day {}: {}", day_id, e);
            ApiError::DatabaseError(e.to_string())
        })?
        .ok_or_else(|| ApiError::NotFound(day_id.to_string()))
    }

    pub async fn delete_day(pool: &PgPool, itinerary_id: Uuid, day_id: Uuid) -> Result<(), ApiError> {
        let rows = sqlx::query(
            "DELETE FROM itinerary_days WHERE id = $1 AND itinerary_id = $2",
        )
        .bind(day_id)
        .bind(itinerary_id)
        .execute(pool)
        .await
        .map_err(|e| {
            log::error!("Delete failed for day {}: {}", day_id, e);
            ApiError::DatabaseError(e.to_string())
        })?
        .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(day_id.to_string()));
        }

        Ok(())
    }

    /// Renumber days 1..n following the given id order, atomically.
    /// Runs two passes inside one transaction: day_number carries a
    /// UNIQUE constraint, so rows move to temporary negative numbers
    /// before taking their final position.
    pub async fn reorder_days(
        pool: &PgPool,
        itinerary_id: Uuid,
        day_ids: &[Uuid],
    ) -> Result<Vec<ItineraryDay>, ApiError> {
        let mut tx = pool.begin().await.map_err(|e| {
            log::error!("Failed to open reorder transaction: {}", e);
            ApiError::DatabaseError(e.to_string())
        })?;

        for (idx, day_id) in day_ids.iter().enumerate() {
            let rows = sqlx::query(
                "UPDATE itinerary_days SET day_number = $1, updated_at = NOW()
                 WHERE id = $2 AND itinerary_id = $3",
            )
            .bind(-(idx as i32) - 1)
            .bind(day_id)
            .bind(itinerary_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                log::error!("Reorder failed for day {}: {}", day_id, e);
                ApiError::DatabaseError(e.to_string())
            })?
            .rows_affected();

            if rows == 0 {
                return Err(ApiError::InvalidInput(format!(
                    "day {} does not belong to itinerary {}",
                    day_id, itinerary_id
                )));
            }
        }

        sqlx::query(
            "UPDATE itinerary_days SET day_number = -day_number
             WHERE itinerary_id = $1 AND day_number < 0",
        )
        .bind(itinerary_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            log::error!("Reorder finalize failed: {}", e);
            ApiError::DatabaseError(e.to_string())
        })?;

        tx.commit().await.map_err(|e| {
            log::error!("Reorder commit failed: {}", e);
            ApiError::DatabaseError(e.to_string())
        })?;

        log::info!("Reordered {} days on itinerary {}", day_ids.len(), itinerary_id);
        Self::list_days(pool, itinerary_id).await
    }
}
