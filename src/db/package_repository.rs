// src/db/package_repository.rs
// DOCUMENTATION: Database access layer for packages
// PURPOSE: Package CRUD with transactional day-plan replacement

use crate::errors::ApiError;
use crate::models::{
    CreatePackageRequest, Package, PackageDay, PackageDayInput, UpdatePackageRequest,
};
use sqlx::PgPool;
use uuid::Uuid;

/// PackageRepository: All database operations for packages
pub struct PackageRepository;

impl PackageRepository {
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Package>, ApiError> {
        sqlx::query_as::<_, Package>(
            "SELECT * FROM packages WHERE is_active = true ORDER BY created_at DESC",
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Package list query error: {}", e);
            ApiError::DatabaseError(e.to_string())
        })
    }

    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Package, ApiError> {
        sqlx::query_as::<_, Package>("SELECT * FROM packages WHERE id = $1 AND is_active = true")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching package: {}", e);
                ApiError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    pub async fn list_days(pool: &PgPool, package_id: Uuid) -> Result<Vec<PackageDay>, ApiError> {
        sqlx::query_as::<_, PackageDay>(
            "SELECT * FROM package_days WHERE package_id = $1 ORDER BY day_number ASC",
        )
        .bind(package_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Package day list query error: {}", e);
            ApiError::DatabaseError(e.to_string())
        })
    }

    /// Insert the package and its day plan in one transaction
    pub async fn create(
        pool: &PgPool,
        req: &CreatePackageRequest,
        slug: &str,
    ) -> Result<Package, ApiError> {
        let mut tx = pool.begin().await.map_err(|e| {
            log::error!("Failed to open package transaction: {}", e);
            ApiError::DatabaseError(e.to_string())
        })?;

        let package = sqlx::query_as::<_, Package>(
            r#"
            INSERT INTO packages (
                name, slug, description, duration_days, price,
                inclusions, exclusions, highlights, main_image
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&req.name)
        .bind(slug)
        .bind(&req.description)
        .bind(req.duration_days)
        .bind(req.price)
        .bind(&req.inclusions)
        .bind(&req.exclusions)
        .bind(&req.highlights)
        .bind(&req.main_image)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                ApiError::AlreadyExists(format!("package with slug '{}'", slug))
            }
            _ => {
                log::error!("Failed to create package: {}", e);
                ApiError::DatabaseError(e.to_string())
            }
        })?;

        Self::insert_days(&mut tx, package.id, &req.itinerary).await?;

        tx.commit().await.map_err(|e| {
            log::error!("Package commit failed: {}", e);
            ApiError::DatabaseError(e.to_string())
        })?;

        log::info!("Created package {} ({})", package.name, package.id);
        Ok(package)
    }

    /// Partial update; when a day plan is provided it replaces the old one
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdatePackageRequest,
    ) -> Result<Package, ApiError> {
        let mut tx = pool.begin().await.map_err(|e| {
            log::error!("Failed to open package transaction: {}", e);
            ApiError::DatabaseError(e.to_string())
        })?;

        let package = sqlx::query_as::<_, Package>(
            r#"
            UPDATE packages
            SET name = COALESCE($1, name),
                description = COALESCE($2, description),
                duration_days = COALESCE($3, duration_days),
                price = COALESCE($4, price),
                inclusions = COALESCE($5, inclusions),
                exclusions = COALESCE($6, exclusions),
                highlights = COALESCE($7, highlights),
                main_image = COALESCE($8, main_image),
                updated_at = NOW()
            WHERE id = $9 AND is_active = true
            RETURNING *
            "#,
        )
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.duration_days)
        .bind(req.price)
        .bind(&req.inclusions)
        .bind(&req.exclusions)
        .bind(&req.highlights)
        .bind(&req.main_image)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            log::error!("Update failed for package {}: {}", id, e);
            ApiError::DatabaseError(e.to_string())
        })?
        .ok_or_else(|| ApiError::NotFound(id.to_string()))?;

        if let Some(days) = &req.itinerary {
            sqlx::query("DELETE FROM package_days WHERE package_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    log::error!("Day plan replace failed for package {}: {}", id, e);
                    ApiError::DatabaseError(e.to_string())
                })?;

            Self::insert_days(&mut tx, id, days).await?;
        }

        tx.commit().await.map_err(|e| {
            log::error!("Package commit failed: {}", e);
            ApiError::DatabaseError(e.to_string())
        })?;

        log::info!("Updated package: {}", id);
        Ok(package)
    }

    /// Soft delete
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let rows =
            sqlx::query("UPDATE packages SET is_active = false, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(pool)
                .await
                .map_err(|e| {
                    log::error!("Delete failed for package {}: {}", id, e);
                    ApiError::DatabaseError(e.to_string())
                })?
                .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn insert_days(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        package_id: Uuid,
        days: &[PackageDayInput],
    ) -> Result<(), ApiError> {
        for day in days {
            sqlx::query(
                "INSERT INTO package_days (package_id, day_number, description) VALUES ($1, $2, $3)",
            )
            .bind(package_id)
            .bind(day.day_number)
            .bind(&day.description)
            .execute(&mut **tx)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                    ApiError::InvalidInput(format!("duplicate day number {}", day.day_number))
                }
                _ => {
                    log::error!("Failed to insert package day: {}", e);
                    ApiError::DatabaseError(e.to_string())
                }
            })?;
        }

        Ok(())
    }
}
