// src/db/tour_repository.rs
// DOCUMENTATION: Database access layer for tours (dahabiyas)
// PURPOSE: Abstract tour queries from business logic

use crate::errors::ApiError;
use crate::models::{CreateTourRequest, Tour, TourListQuery, UpdateTourRequest};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

/// TourRepository: All database operations for tours
pub struct TourRepository;

impl TourRepository {
    /// Insert a new tour and return the created record
    /// Used by POST /tours endpoint
    pub async fn create(
        pool: &PgPool,
        req: &CreateTourRequest,
        slug: &str,
    ) -> Result<Tour, ApiError> {
        let tour = sqlx::query_as::<_, Tour>(
            r#"
            INSERT INTO tours (
                name, slug, description, short_description,
                price_per_day, capacity, tour_type, category,
                amenities, features, images, main_image,
                itinerary_id, advantages, meaning
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(&req.name)
        .bind(slug)
        .bind(&req.description)
        .bind(&req.short_description)
        .bind(req.price_per_day)
        .bind(req.capacity)
        .bind(&req.tour_type)
        .bind(&req.category)
        .bind(&req.amenities)
        .bind(&req.features)
        .bind(&req.images)
        .bind(&req.main_image)
        .bind(req.itinerary_id)
        .bind(&req.advantages)
        .bind(&req.meaning)
        .fetch_one(pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                ApiError::AlreadyExists(format!("tour with slug '{}'", slug))
            }
            _ => {
                log::error!("Failed to create tour: {}", e);
                ApiError::DatabaseError(e.to_string())
            }
        })?;

        log::info!("Created tour {} ({})", tour.name, tour.id);
        Ok(tour)
    }

    /// Retrieve an active tour by UUID
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Tour, ApiError> {
        sqlx::query_as::<_, Tour>("SELECT * FROM tours WHERE id = $1 AND is_active = true")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching tour: {}", e);
                ApiError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    /// Retrieve an active tour by slug
    pub async fn get_by_slug(pool: &PgPool, slug: &str) -> Result<Tour, ApiError> {
        sqlx::query_as::<_, Tour>("SELECT * FROM tours WHERE slug = $1 AND is_active = true")
            .bind(slug)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching tour by slug: {}", e);
                ApiError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| ApiError::NotFound(format!("tour '{}'", slug)))
    }

    /// List active tours with optional type/category filters
    /// Returns tuple: (results, total_count) for pagination
    pub async fn list(
        pool: &PgPool,
        query: &TourListQuery,
    ) -> Result<(Vec<Tour>, i64), ApiError> {
        let limit = query.limit.unwrap_or(10).clamp(1, 100);
        let page = query.page.unwrap_or(1).max(1);
        let offset = (page - 1) * limit;

        let tours = sqlx::query_as::<_, Tour>(
            r#"
            SELECT * FROM tours
            WHERE is_active = true
              AND ($1::text IS NULL OR tour_type = $1)
              AND ($2::text IS NULL OR category = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(&query.type_)
        .bind(&query.category)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Tour list query error: {}", e);
            ApiError::DatabaseError(e.to_string())
        })?;

        let total: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM tours
            WHERE is_active = true
              AND ($1::text IS NULL OR tour_type = $1)
              AND ($2::text IS NULL OR category = $2)
            "#,
        )
        .bind(&query.type_)
        .bind(&query.category)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Tour count query error: {}", e);
            ApiError::DatabaseError(e.to_string())
        })?;

        Ok((tours, total.0))
    }

    /// Average testimonial rating per trip_type
    /// Joined onto listings so cards can show a star figure
    pub async fn average_ratings(pool: &PgPool) -> Result<HashMap<String, f64>, ApiError> {
        let rows: Vec<(String, Option<f64>)> = sqlx::query_as(
            r#"
            SELECT trip_type, AVG(rating)::float8
            FROM testimonials
            WHERE is_active = true AND trip_type IS NOT NULL
            GROUP BY trip_type
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Rating aggregation error: {}", e);
            ApiError::DatabaseError(e.to_string())
        })?;

        Ok(rows
            .into_iter()
            .filter_map(|(k, v)| v.map(|avg| (k, avg)))
            .collect())
    }

    /// Partial update - only provided fields are modified
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateTourRequest,
    ) -> Result<Tour, ApiError> {
        let tour = sqlx::query_as::<_, Tour>(
            r#"
            UPDATE tours
            SET name = COALESCE($1, name),
                description = COALESCE($2, description),
                short_description = COALESCE($3, short_description),
                price_per_day = COALESCE($4, price_per_day),
                capacity = COALESCE($5, capacity),
                tour_type = COALESCE($6, tour_type),
                category = COALESCE($7, category),
                amenities = COALESCE($8, amenities),
                features = COALESCE($9, features),
                images = COALESCE($10, images),
                main_image = COALESCE($11, main_image),
                itinerary_id = COALESCE($12, itinerary_id),
                advantages = COALESCE($13, advantages),
                meaning = COALESCE($14, meaning),
                updated_at = NOW()
            WHERE id = $15 AND is_active = true
            RETURNING *
            "#,
        )
        .bind(&req.name)
        .bind(&req.description)
        .bind(&req.short_description)
        .bind(req.price_per_day)
        .bind(req.capacity)
        .bind(&req.tour_type)
        .bind(&req.category)
        .bind(&req.amenities)
        .bind(&req.features)
        .bind(&req.images)
        .bind(&req.main_image)
        .bind(req.itinerary_id)
        .bind(&req.advantages)
        .bind(&req.meaning)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Update failed for tour {}: {}", id, e);
            ApiError::DatabaseError(e.to_string())
        })?
        .ok_or_else(|| ApiError::NotFound(id.to_string()))?;

        log::info!("Updated tour: {}", id);
        Ok(tour)
    }

    /// Soft delete: sets is_active=false instead of physical deletion
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let rows =
            sqlx::query("UPDATE tours SET is_active = false, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(pool)
                .await
                .map_err(|e| {
                    log::error!("Delete failed for tour {}: {}", id, e);
                    ApiError::DatabaseError(e.to_string())
                })?
                .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(id.to_string()));
        }

        log::info!("Deleted tour: {}", id);
        Ok(())
    }
}
