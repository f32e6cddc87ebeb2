// src/db/testimonial_repository.rs
// DOCUMENTATION: Database access layer for testimonials
// PURPOSE: Guest review queries for dashboard and public site

use crate::errors::ApiError;
use crate::models::{CreateTestimonialRequest, Testimonial, UpdateTestimonialRequest};
use sqlx::PgPool;
use uuid::Uuid;

/// TestimonialRepository: All database operations for testimonials
pub struct TestimonialRepository;

impl TestimonialRepository {
    /// Dashboard listing: featured first, then display order, then newest
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Testimonial>, ApiError> {
        sqlx::query_as::<_, Testimonial>(
            r#"
            SELECT * FROM testimonials
            ORDER BY featured DESC, display_order ASC, created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Testimonial list query error: {}", e);
            ApiError::DatabaseError(e.to_string())
        })
    }

    /// Public listing: active only, same ordering
    pub async fn list_public(pool: &PgPool) -> Result<Vec<Testimonial>, ApiError> {
        sqlx::query_as::<_, Testimonial>(
            r#"
            SELECT * FROM testimonials
            WHERE is_active = true
            ORDER BY featured DESC, display_order ASC, created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Testimonial public list query error: {}", e);
            ApiError::DatabaseError(e.to_string())
        })
    }

    pub async fn create(
        pool: &PgPool,
        req: &CreateTestimonialRequest,
    ) -> Result<Testimonial, ApiError> {
        sqlx::query_as::<_, Testimonial>(
            r#"
            INSERT INTO testimonials (
                name, title, company, content, rating, avatar_url,
                featured, is_active, trip_type, display_order
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&req.name)
        .bind(&req.title)
        .bind(&req.company)
        .bind(&req.content)
        .bind(req.rating)
        .bind(&req.avatar_url)
        .bind(req.featured)
        .bind(req.is_active)
        .bind(&req.trip_type)
        .bind(req.display_order)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create testimonial: {}", e);
            ApiError::DatabaseError(e.to_string())
        })
    }

    /// Partial update - only provided fields are modified
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateTestimonialRequest,
    ) -> Result<Testimonial, ApiError> {
        sqlx::query_as::<_, Testimonial>(
            r#"
            UPDATE testimonials
            SET name = COALESCE($1, name),
                title = COALESCE($2, title),
                company = COALESCE($3, company),
                content = COALESCE($4, content),
                rating = COALESCE($5, rating),
                avatar_url = COALESCE($6, avatar_url),
                featured = COALESCE($7, featured),
                is_active = COALESCE($8, is_active),
                trip_type = COALESCE($9, trip_type),
                display_order = COALESCE($10, display_order),
                updated_at = NOW()
            WHERE id = $11
            RETURNING *
            "#,
        )
        .bind(&req.name)
        .bind(&req.title)
        .bind(&req.company)
        .bind(&req.content)
        .bind(req.rating)
        .bind(&req.avatar_url)
        .bind(req.featured)
        .bind(req.is_active)
        .bind(&req.trip_type)
        .bind(req.display_order)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Update failed for testimonial {}: {}", id, e);
            ApiError::DatabaseError(e.to_string())
        })?
        .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let rows = sqlx::query("DELETE FROM testimonials WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Delete failed for testimonial {}: {}", id, e);
                ApiError::DatabaseError(e.to_string())
            })?
            .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
