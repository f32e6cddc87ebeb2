// src/handlers/content.rs
// DOCUMENTATION: HTTP handlers for website content (settings)
// PURPOSE: Cached public content reads and cache-invalidating admin writes

use crate::config::Config;
use crate::db::ContentRepository;
use crate::errors::ApiError;
use crate::models::{
    ContentQuery, ContentResponse, CreateContentRequest, Role, UpdateContentRequest,
    CONTENT_TYPES, MEDIA_TYPES,
};
use crate::services::auth::require_role;
use crate::services::ContentCache;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

fn check_types(content_type: &str, media_type: Option<&str>) -> Result<(), ApiError> {
    if !CONTENT_TYPES.contains(&content_type) {
        return Err(ApiError::ValidationError(format!(
            "content_type must be one of {}",
            CONTENT_TYPES.join(", ")
        )));
    }
    if let Some(media_type) = media_type {
        if !MEDIA_TYPES.contains(&media_type) {
            return Err(ApiError::ValidationError(format!(
                "media_type must be one of {}",
                MEDIA_TYPES.join(", ")
            )));
        }
    }
    Ok(())
}

/// GET /content?page&section
/// Active blocks plus the flattened settings map, served through the cache
pub async fn get_content(
    pool: web::Data<PgPool>,
    cache: web::Data<Arc<ContentCache>>,
    query: web::Query<ContentQuery>,
) -> Result<impl Responder, ApiError> {
    let key = ContentCache::content_key(query.page.as_deref(), query.section.as_deref());

    if let Some(cached) = cache.get(&key).await {
        return Ok(HttpResponse::Ok()
            .content_type("application/json")
            .body(cached));
    }

    let blocks = ContentRepository::list(pool.get_ref(), &query).await?;
    let response = ContentResponse::from_blocks(blocks);

    let body = serde_json::to_string(&response).map_err(|e| {
        log::error!("Content serialization failed: {}", e);
        ApiError::InternalError
    })?;
    cache.set(key, body.clone()).await;

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(body))
}

/// POST /content (admin)
pub async fn create_content(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    cache: web::Data<Arc<ContentCache>>,
    http_req: HttpRequest,
    req: web::Json<CreateContentRequest>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    if let Err(e) = req.validate() {
        return Err(ApiError::ValidationError(e.to_string()));
    }
    check_types(&req.content_type, req.media_type.as_deref())?;

    let block = ContentRepository::create(pool.get_ref(), &req).await?;
    cache.clear().await;

    Ok(HttpResponse::Created().json(block))
}

/// POST /content/upsert (admin)
/// Insert or update by key; the dashboard bulk-save path
pub async fn upsert_content(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    cache: web::Data<Arc<ContentCache>>,
    http_req: HttpRequest,
    req: web::Json<CreateContentRequest>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    if let Err(e) = req.validate() {
        return Err(ApiError::ValidationError(e.to_string()));
    }
    check_types(&req.content_type, req.media_type.as_deref())?;

    let block = ContentRepository::upsert_by_key(pool.get_ref(), &req).await?;
    cache.clear().await;

    Ok(HttpResponse::Ok().json(block))
}

/// PUT /content/{id} (admin)
pub async fn update_content(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    cache: web::Data<Arc<ContentCache>>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<UpdateContentRequest>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    if let Some(content_type) = &req.content_type {
        check_types(content_type, req.media_type.as_deref())?;
    }

    let block = ContentRepository::update(pool.get_ref(), path.into_inner(), &req).await?;
    cache.clear().await;

    Ok(HttpResponse::Ok().json(block))
}

/// DELETE /content/{id} (admin)
pub async fn delete_content(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    cache: web::Data<Arc<ContentCache>>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    ContentRepository::delete(pool.get_ref(), path.into_inner()).await?;
    cache.clear().await;

    Ok(HttpResponse::NoContent().finish())
}

/// Configuration for content routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/content")
            .route("", web::get().to(get_content))
            .route("", web::post().to(create_content))
            .route("/upsert", web::post().to(upsert_content))
            .route("/{id}", web::put().to(update_content))
            .route("/{id}", web::delete().to(delete_content)),
    );
}
