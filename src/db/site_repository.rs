// src/db/site_repository.rs
// DOCUMENTATION: Database access layer for small site catalogs
// PURPOSE: FAQs, promotions, policies, and amenities

use crate::errors::ApiError;
use crate::models::{
    Amenity, CreateAmenityRequest, CreateFaqRequest, CreatePolicyRequest, CreatePromotionRequest,
    Faq, Policy, Promotion, UpdateFaqRequest, UpdatePolicyRequest, UpdatePromotionRequest,
};
use sqlx::PgPool;
use uuid::Uuid;

pub struct FaqRepository;

impl FaqRepository {
    pub async fn list(pool: &PgPool) -> Result<Vec<Faq>, ApiError> {
        sqlx::query_as::<_, Faq>("SELECT * FROM faqs ORDER BY display_order ASC")
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("FAQ list query error: {}", e);
                ApiError::DatabaseError(e.to_string())
            })
    }

    pub async fn create(pool: &PgPool, req: &CreateFaqRequest) -> Result<Faq, ApiError> {
        sqlx::query_as::<_, Faq>(
            "INSERT INTO faqs (question, answer, display_order) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&req.question)
        .bind(&req.answer)
        .bind(req.display_order)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create FAQ: {}", e);
            ApiError::DatabaseError(e.to_string())
        })
    }

    pub async fn update(pool: &PgPool, id: Uuid, req: &UpdateFaqRequest) -> Result<Faq, ApiError> {
        sqlx::query_as::<_, Faq>(
            r#"
            UPDATE faqs
            SET question = COALESCE($1, question),
                answer = COALESCE($2, answer),
                display_order = COALESCE($3, display_order),
                updated_at = NOW()
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(&req.question)
        .bind(&req.answer)
        .bind(req.display_order)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Update failed for FAQ {}: {}", id, e);
            ApiError::DatabaseError(e.to_string())
        })?
        .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let rows = sqlx::query("DELETE FROM faqs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Delete failed for FAQ {}: {}", id, e);
                ApiError::DatabaseError(e.to_string())
            })?
            .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

pub struct PromotionRepository;

impl PromotionRepository {
    pub async fn list(pool: &PgPool) -> Result<Vec<Promotion>, ApiError> {
        sqlx::query_as::<_, Promotion>("SELECT * FROM promotions ORDER BY start_date DESC")
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Promotion list query error: {}", e);
                ApiError::DatabaseError(e.to_string())
            })
    }

    pub async fn create(pool: &PgPool, req: &CreatePromotionRequest) -> Result<Promotion, ApiError> {
        sqlx::query_as::<_, Promotion>(
            r#"
            INSERT INTO promotions (code, description, discount_percentage, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&req.code)
        .bind(&req.description)
        .bind(req.discount_percentage)
        .bind(req.start_date)
        .bind(req.end_date)
        .fetch_one(pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                ApiError::AlreadyExists(format!("promotion code '{}'", req.code))
            }
            _ => {
                log::error!("Failed to create promotion: {}", e);
                ApiError::DatabaseError(e.to_string())
            }
        })
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdatePromotionRequest,
    ) -> Result<Promotion, ApiError> {
        sqlx::query_as::<_, Promotion>(
            r#"
            UPDATE promotions
            SET description = COALESCE($1, description),
                discount_percentage = COALESCE($2, discount_percentage),
                start_date = COALESCE($3, start_date),
                end_date = COALESCE($4, end_date),
                is_active = COALESCE($5, is_active),
                updated_at = NOW()
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(&req.description)
        .bind(req.discount_percentage)
        .bind(req.start_date)
        .bind(req.end_date)
        .bind(req.is_active)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Update failed for promotion {}: {}", id, e);
            ApiError::DatabaseError(e.to_string())
        })?
        .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let rows = sqlx::query("DELETE FROM promotions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Delete failed for promotion {}: {}", id, e);
                ApiError::DatabaseError(e.to_string())
            })?
            .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

pub struct PolicyRepository;

impl PolicyRepository {
    pub async fn list(pool: &PgPool) -> Result<Vec<Policy>, ApiError> {
        sqlx::query_as::<_, Policy>("SELECT * FROM policies ORDER BY policy_type ASC, title ASC")
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Policy list query error: {}", e);
                ApiError::DatabaseError(e.to_string())
            })
    }

    pub async fn create(pool: &PgPool, req: &CreatePolicyRequest) -> Result<Policy, ApiError> {
        sqlx::query_as::<_, Policy>(
            r#"
            INSERT INTO policies (title, description, policy_type)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&req.title)
        .bind(&req.content)
        .bind(&req.policy_type)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create policy: {}", e);
            ApiError::DatabaseError(e.to_string())
        })
    }

    pub async fn update(pool: &PgPool, id: Uuid, req: &UpdatePolicyRequest) -> Result<Policy, ApiError> {
        sqlx::query_as::<_, Policy>(
            r#"
            UPDATE policies
            SET title = COALESCE($1, title),
                description = COALESCE($2, description),
                policy_type = COALESCE($3, policy_type),
                updated_at = NOW()
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(&req.title)
        .bind(&req.content)
        .bind(&req.policy_type)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Update failed for policy {}: {}", id, e);
            ApiError::DatabaseError(e.to_string())
        })?
        .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let rows = sqlx::query("DELETE FROM policies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Delete failed for policy {}: {}", id, e);
                ApiError::DatabaseError(e.to_string())
            })?
            .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

pub struct AmenityRepository;

impl AmenityRepository {
    pub async fn list(pool: &PgPool) -> Result<Vec<Amenity>, ApiError> {
        sqlx::query_as::<_, Amenity>("SELECT * FROM amenities ORDER BY name ASC")
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Amenity list query error: {}", e);
                ApiError::DatabaseError(e.to_string())
            })
    }

    pub async fn create(pool: &PgPool, req: &CreateAmenityRequest) -> Result<Amenity, ApiError> {
        sqlx::query_as::<_, Amenity>(
            "INSERT INTO amenities (name, icon) VALUES ($1, $2) RETURNING *",
        )
        .bind(&req.name)
        .bind(&req.icon)
        .fetch_one(pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                ApiError::AlreadyExists(format!("amenity '{}'", req.name))
            }
            _ => {
                log::error!("Failed to create amenity: {}", e);
                ApiError::DatabaseError(e.to_string())
            }
        })
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let rows = sqlx::query("DELETE FROM amenities WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Delete failed for amenity {}: {}", id, e);
                ApiError::DatabaseError(e.to_string())
            })?
            .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
