// src/db/user_repository.rs
// DOCUMENTATION: Database access layer for user accounts
// PURPOSE: Abstract account queries from auth logic

use crate::errors::ApiError;
use crate::models::User;
use sqlx::PgPool;
use uuid::Uuid;

/// UserRepository: All database operations for accounts
pub struct UserRepository;

impl UserRepository {
    /// Insert a new account
    /// Unique violation on email maps to 409
    pub async fn create(
        pool: &PgPool,
        email: &str,
        password_hash: &str,
        name: &str,
        role: &str,
    ) -> Result<User, ApiError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, name, role)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .bind(role)
        .fetch_one(pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                ApiError::AlreadyExists(format!("account with email '{}'", email))
            }
            _ => {
                log::error!("Failed to create user {}: {}", email, e);
                ApiError::DatabaseError(e.to_string())
            }
        })?;

        log::info!("Created user account: {}", user.id);
        Ok(user)
    }

    /// Look up an active account by email (login path)
    pub async fn get_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, ApiError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE email = $1 AND is_active = true",
        )
        .bind(email)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch user by email: {}", e);
            ApiError::DatabaseError(e.to_string())
        })?;

        Ok(user)
    }

    /// Look up an active account by id (token resolution)
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<User, ApiError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 AND is_active = true")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch user {}: {}", id, e);
                ApiError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    /// Ids of all active ADMIN accounts (notification fan-out)
    pub async fn admin_ids(pool: &PgPool) -> Result<Vec<Uuid>, ApiError> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            "SELECT id FROM users WHERE role = 'ADMIN' AND is_active = true",
        )
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch admin users: {}", e);
            ApiError::DatabaseError(e.to_string())
        })?;

        Ok(rows.into_iter().map(|r| r.0).collect())
    }
}
