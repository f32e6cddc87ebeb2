// src/handlers/pages.rs
// DOCUMENTATION: HTTP handlers for pages and content blocks
// PURPOSE: Page CRUD and ordered block management

use crate::config::Config;
use crate::db::PageRepository;
use crate::errors::ApiError;
use crate::models::{
    CreateBlockRequest, CreatePageRequest, ReorderBlocksRequest, Role, UpdateBlockRequest,
    UpdatePageRequest, BLOCK_TYPES, PAGE_STATUSES,
};
use crate::services::auth::require_role;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use std::collections::HashSet;
use uuid::Uuid;
use validator::Validate;

/// GET /pages
pub async fn list_pages(pool: web::Data<PgPool>) -> Result<impl Responder, ApiError> {
    let pages = PageRepository::list(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(pages))
}

/// GET /pages/{id}
/// Page with its ordered blocks
pub async fn get_page(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();
    let page = PageRepository::get_by_id(pool.get_ref(), id).await?;
    let blocks = PageRepository::list_blocks(pool.get_ref(), id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "page": page,
        "blocks": blocks,
    })))
}

/// POST /pages (admin)
/// 409 when the slug is taken
pub async fn create_page(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    req: web::Json<CreatePageRequest>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    if let Err(e) = req.validate() {
        return Err(ApiError::ValidationError(e.to_string()));
    }
    if !PAGE_STATUSES.contains(&req.status.as_str()) {
        return Err(ApiError::ValidationError(format!(
            "status must be one of {}",
            PAGE_STATUSES.join(", ")
        )));
    }

    let page = PageRepository::create(pool.get_ref(), &req).await?;
    Ok(HttpResponse::Created().json(page))
}

/// PUT /pages/{id} (admin)
pub async fn update_page(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<UpdatePageRequest>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    if let Some(status) = &req.status {
        if !PAGE_STATUSES.contains(&status.as_str()) {
            return Err(ApiError::ValidationError(format!(
                "status must be one of {}",
                PAGE_STATUSES.join(", ")
            )));
        }
    }

    let page = PageRepository::update(pool.get_ref(), path.into_inner(), &req).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// DELETE /pages/{id} (admin)
pub async fn delete_page(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    PageRepository::delete(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /pages/{id}/blocks (admin)
pub async fn list_blocks(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    let page_id = path.into_inner();
    PageRepository::get_by_id(pool.get_ref(), page_id).await?;

    let blocks = PageRepository::list_blocks(pool.get_ref(), page_id).await?;
    Ok(HttpResponse::Ok().json(blocks))
}

/// POST /pages/{id}/blocks (admin)
/// New blocks append after the page's current last block
pub async fn create_block(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<CreateBlockRequest>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    if !BLOCK_TYPES.contains(&req.block_type.as_str()) {
        return Err(ApiError::ValidationError(format!(
            "type must be one of {}",
            BLOCK_TYPES.join(", ")
        )));
    }

    let page_id = path.into_inner();
    PageRepository::get_by_id(pool.get_ref(), page_id).await?;

    let content = req.content.clone().unwrap_or_else(|| json!({}));
    let block =
        PageRepository::create_block(pool.get_ref(), page_id, &req.block_type, &content).await?;

    Ok(HttpResponse::Created().json(block))
}

/// PATCH /pages/{id}/blocks/{block_id} (admin)
/// Replace the block's JSON payload
pub async fn update_block(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<(Uuid, Uuid)>,
    req: web::Json<UpdateBlockRequest>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    let (page_id, block_id) = path.into_inner();
    let block =
        PageRepository::update_block_content(pool.get_ref(), page_id, block_id, &req.content)
            .await?;

    Ok(HttpResponse::Ok().json(block))
}

/// DELETE /pages/{id}/blocks/{block_id} (admin)
/// Deletes and closes the ordering gap
pub async fn delete_block(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    let (page_id, block_id) = path.into_inner();
    PageRepository::delete_block(pool.get_ref(), page_id, block_id).await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "content block deleted" })))
}

/// PATCH /pages/{id}/blocks/reorder (admin)
/// The id list must be a permutation of the page's blocks
pub async fn reorder_blocks(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<ReorderBlocksRequest>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    let page_id = path.into_inner();
    let existing = PageRepository::list_blocks(pool.get_ref(), page_id).await?;

    let existing_ids: HashSet<Uuid> = existing.iter().map(|b| b.id).collect();
    let requested_ids: HashSet<Uuid> = req.block_ids.iter().copied().collect();

    if requested_ids.len() != req.block_ids.len() || existing_ids != requested_ids {
        return Err(ApiError::InvalidInput(
            "block_ids must list every block of the page exactly once".to_string(),
        ));
    }

    let blocks = PageRepository::reorder_blocks(pool.get_ref(), page_id, &req.block_ids).await?;
    Ok(HttpResponse::Ok().json(blocks))
}

/// Configuration for page routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/pages")
            .route("", web::get().to(list_pages))
            .route("", web::post().to(create_page))
            .route("/{id}", web::get().to(get_page))
            .route("/{id}", web::put().to(update_page))
            .route("/{id}", web::delete().to(delete_page))
            .route("/{id}/blocks", web::get().to(list_blocks))
            .route("/{id}/blocks", web::post().to(create_block))
            .route("/{id}/blocks/reorder", web::patch().to(reorder_blocks))
            .route("/{id}/blocks/{block_id}", web::patch().to(update_block))
            .route("/{id}/blocks/{block_id}", web::delete().to(delete_block)),
    );
}
