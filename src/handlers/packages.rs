// src/handlers/packages.rs
// DOCUMENTATION: HTTP handlers for packages
// PURPOSE: Public package reads and admin CRUD with day plans

use crate::config::Config;
use crate::db::PackageRepository;
use crate::errors::ApiError;
use crate::models::{
    slugify, CreatePackageRequest, PackageResponse, Role, UpdatePackageRequest,
};
use crate::services::auth::require_role;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// GET /packages
pub async fn list_packages(pool: web::Data<PgPool>) -> Result<impl Responder, ApiError> {
    let packages = PackageRepository::list_active(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(packages))
}

/// GET /packages/{id}
/// One package with its ordered day plan
pub async fn get_package(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();
    let package = PackageRepository::get_by_id(pool.get_ref(), id).await?;
    let itinerary = PackageRepository::list_days(pool.get_ref(), id).await?;

    Ok(HttpResponse::Ok().json(PackageResponse { package, itinerary }))
}

/// POST /packages (admin)
pub async fn create_package(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    req: web::Json<CreatePackageRequest>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    if let Err(e) = req.validate() {
        return Err(ApiError::ValidationError(e.to_string()));
    }

    let slug = match &req.slug {
        Some(slug) if !slug.is_empty() => slug.clone(),
        _ => slugify(&req.name),
    };
    if slug.is_empty() {
        return Err(ApiError::ValidationError(
            "name does not produce a usable slug".to_string(),
        ));
    }

    let package = PackageRepository::create(pool.get_ref(), &req, &slug).await?;
    Ok(HttpResponse::Created().json(package))
}

/// PUT /packages/{id} (admin)
pub async fn update_package(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<UpdatePackageRequest>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    let package = PackageRepository::update(pool.get_ref(), path.into_inner(), &req).await?;
    Ok(HttpResponse::Ok().json(package))
}

/// DELETE /packages/{id} (admin)
/// Soft delete
pub async fn delete_package(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    PackageRepository::delete(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configuration for package routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/packages")
            .route("", web::get().to(list_packages))
            .route("", web::post().to(create_package))
            .route("/{id}", web::get().to(get_package))
            .route("/{id}", web::put().to(update_package))
            .route("/{id}", web::delete().to(delete_package)),
    );
}
