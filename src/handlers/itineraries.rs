// src/handlers/itineraries.rs
// DOCUMENTATION: HTTP handlers for itineraries and their days
// PURPOSE: Public itinerary reads, admin CRUD, transactional reordering

use crate::config::Config;
use crate::db::ItineraryRepository;
use crate::errors::ApiError;
use crate::models::{
    slugify, CreateItineraryDayRequest, CreateItineraryRequest, ItineraryResponse,
    ReorderDaysRequest, Role, UpdateItineraryDayRequest, UpdateItineraryRequest,
};
use crate::services::auth::require_role;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use sqlx::PgPool;
use std::collections::HashSet;
use uuid::Uuid;
use validator::Validate;

/// GET /itineraries
/// Active itineraries in display order
pub async fn list_itineraries(pool: web::Data<PgPool>) -> Result<impl Responder, ApiError> {
    let itineraries = ItineraryRepository::list_active(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(itineraries))
}

/// GET /itineraries/{id}
/// One itinerary with its ordered days
pub async fn get_itinerary(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();
    let itinerary = ItineraryRepository::get_by_id(pool.get_ref(), id).await?;
    let days = ItineraryRepository::list_days(pool.get_ref(), id).await?;

    Ok(HttpResponse::Ok().json(ItineraryResponse { itinerary, days }))
}

/// POST /itineraries (admin/manager)
pub async fn create_itinerary(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    req: web::Json<CreateItineraryRequest>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Manager)?;

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

    let itinerary = ItineraryRepository::create(pool.get_ref(), &req, &slug).await?;
    Ok(HttpResponse::Created().json(itinerary))
}

/// PUT /itineraries/{id} (admin/manager)
pub async fn update_itinerary(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<UpdateItineraryRequest>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Manager)?;

    let itinerary = ItineraryRepository::update(pool.get_ref(), path.into_inner(), &req).await?;
    Ok(HttpResponse::Ok().json(itinerary))
}

/// DELETE /itineraries/{id} (admin/manager)
pub async fn delete_itinerary(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Manager)?;

    ItineraryRepository::delete(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /itineraries/{id}/days
pub async fn list_days(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();
    ItineraryRepository::get_by_id(pool.get_ref(), id).await?;

    let days = ItineraryRepository::list_days(pool.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(days))
}

/// POST /itineraries/{id}/days (admin/manager)
pub async fn create_day(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<CreateItineraryDayRequest>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Manager)?;

    if let Err(e) = req.validate() {
        return Err(ApiError::ValidationError(e.to_string()));
    }

    let id = path.into_inner();
    ItineraryRepository::get_by_id(pool.get_ref(), id).await?;

    let day = ItineraryRepository::create_day(pool.get_ref(), id, &req).await?;
    Ok(HttpResponse::Created().json(day))
}

/// PUT /itineraries/{id}/days/{day_id} (admin/manager)
pub async fn update_day(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<(Uuid, Uuid)>,
    req: web::Json<UpdateItineraryDayRequest>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Manager)?;

    let (itinerary_id, day_id) = path.into_inner();
    let day = ItineraryRepository::update_day(pool.get_ref(), itinerary_id, day_id, &req).await?;
    Ok(HttpResponse::Ok().json(day))
}

/// DELETE /itineraries/{id}/days/{day_id} (admin/manager)
pub async fn delete_day(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Manager)?;

    let (itinerary_id, day_id) = path.into_inner();
    ItineraryRepository::delete_day(pool.get_ref(), itinerary_id, day_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// PATCH /itineraries/{id}/days/reorder (admin/manager)
/// The id list must be a permutation of the itinerary's days;
/// they are renumbered 1..n in one transaction
pub async fn reorder_days(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<ReorderDaysRequest>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Manager)?;

    let itinerary_id = path.into_inner();
    let existing = ItineraryRepository::list_days(pool.get_ref(), itinerary_id).await?;

    let existing_ids: HashSet<Uuid> = existing.iter().map(|d| d.id).collect();
    let requested_ids: HashSet<Uuid> = req.day_ids.iter().copied().collect();

    if requested_ids.len() != req.day_ids.len() || existing_ids != requested_ids {
        return Err(ApiError::InvalidInput(
            "day_ids must list every day of the itinerary exactly once".to_string(),
        ));
    }

    let days = ItineraryRepository::reorder_days(pool.get_ref(), itinerary_id, &req.day_ids).await?;
    Ok(HttpResponse::Ok().json(days))
}

/// Configuration for itinerary routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/itineraries")
            .route("", web::get().to(list_itineraries))
            .route("", web::post().to(create_itinerary))
            .route("/{id}", web::get().to(get_itinerary))
            .route("/{id}", web::put().to(update_itinerary))
            .route("/{id}", web::delete().to(delete_itinerary))
            .route("/{id}/days", web::get().to(list_days))
            .route("/{id}/days", web::post().to(create_day))
            .route("/{id}/days/reorder", web::patch().to(reorder_days))
            .route("/{id}/days/{day_id}", web::put().to(update_day))
            .route("/{id}/days/{day_id}", web::delete().to(delete_day)),
    );
}
