// src/handlers/auth.rs
// DOCUMENTATION: HTTP handlers for accounts and sessions
// PURPOSE: Signup, login, and token-to-profile resolution

use crate::config::Config;
use crate::db::UserRepository;
use crate::errors::ApiError;
use crate::models::{LoginRequest, LoginResponse, Role, SignupRequest};
use crate::services::auth;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// POST /auth/signup
/// Create a USER account
pub async fn signup(
    pool: web::Data<PgPool>,
    req: web::Json<SignupRequest>,
) -> Result<impl Responder, ApiError> {
    if let Err(e) = req.validate() {
        return Err(ApiError::ValidationError(e.to_string()));
    }

    let password_hash = auth::hash_password(&req.password)?;
    let user = UserRepository::create(
        pool.get_ref(),
        &req.email,
        &password_hash,
        &req.name,
        Role::User.as_str(),
    )
    .await?;

    Ok(HttpResponse::Created().json(user.to_response()))
}

/// POST /auth/login
/// Verify credentials and issue a session token
pub async fn login(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: web::Json<LoginRequest>,
) -> Result<impl Responder, ApiError> {
    if let Err(e) = req.validate() {
        return Err(ApiError::ValidationError(e.to_string()));
    }

    // Same response for unknown email and wrong password
    let user = UserRepository::get_by_email(pool.get_ref(), &req.email)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    if !auth::verify_password(&req.password, &user.password_hash)? {
        log::warn!("Failed login attempt for {}", req.email);
        return Err(ApiError::Unauthorized);
    }

    let token = auth::issue_token(config.get_ref(), &user)?;
    log::info!("User {} logged in", user.id);

    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        user: user.to_response(),
    }))
}

/// GET /auth/me
/// Resolve the current session token to a profile
pub async fn me(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
) -> Result<impl Responder, ApiError> {
    let claims = auth::authenticate(&req, config.get_ref())?;

    let user = UserRepository::get_by_id(pool.get_ref(), claims.sub)
        .await
        .map_err(|_| ApiError::Unauthorized)?;

    Ok(HttpResponse::Ok().json(user.to_response()))
}

/// Configuration for auth routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/signup", web::post().to(signup))
            .route("/login", web::post().to(login))
            .route("/me", web::get().to(me)),
    );
}
