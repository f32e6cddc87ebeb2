// src/handlers/tours.rs
// DOCUMENTATION: HTTP handlers for tour operations
// PURPOSE: Parse requests, call repositories, return responses

use crate::config::Config;
use crate::db::{CabinRepository, ItineraryRepository, TourRepository};
use crate::errors::ApiError;
use crate::models::{
    slugify, CreateCabinRequest, CreateTourRequest, ItineraryResponse, Role, TourDetailResponse,
    TourListItem, TourListQuery, TourListResponse, UpdateCabinRequest, UpdateTourRequest,
    TOUR_CATEGORIES, TOUR_TYPES,
};
use crate::services::auth::require_role;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

fn check_enum(value: &str, allowed: &[&str], field: &str) -> Result<(), ApiError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(ApiError::ValidationError(format!(
            "{} must be one of {}",
            field,
            allowed.join(", ")
        )))
    }
}

/// GET /tours
/// Paginated listing with type/category filters and aggregated ratings
pub async fn list_tours(
    pool: web::Data<PgPool>,
    query: web::Query<TourListQuery>,
) -> Result<impl Responder, ApiError> {
    let query = query.into_inner();

    if let Some(type_) = &query.type_ {
        check_enum(type_, TOUR_TYPES, "type")?;
    }
    if let Some(category) = &query.category {
        check_enum(category, TOUR_CATEGORIES, "category")?;
    }

    let (tours, total) = TourRepository::list(pool.get_ref(), &query).await?;
    let ratings = TourRepository::average_ratings(pool.get_ref()).await?;

    let limit = query.limit.unwrap_or(10).clamp(1, 100);
    let page = query.page.unwrap_or(1).max(1);

    let items = tours
        .into_iter()
        .map(|tour| {
            let average_rating = ratings.get(&tour.tour_type).copied().unwrap_or(0.0);
            TourListItem {
                tour,
                average_rating,
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(TourListResponse {
        tours: items,
        total,
        pages: (total + limit - 1) / limit,
        page,
        limit,
    }))
}

/// GET /tours/{id}
/// Retrieve a tour by UUID or slug, with cabins and itinerary
pub async fn get_tour(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let identifier = path.into_inner();

    // Try UUID first, fall back to slug lookup
    let tour = if let Ok(uuid) = Uuid::parse_str(&identifier) {
        TourRepository::get_by_id(pool.get_ref(), uuid).await?
    } else {
        TourRepository::get_by_slug(pool.get_ref(), &identifier).await?
    };

    let cabins = CabinRepository::list_by_tour(pool.get_ref(), tour.id).await?;

    let itinerary = match tour.itinerary_id {
        Some(itinerary_id) => {
            let itinerary = ItineraryRepository::get_by_id(pool.get_ref(), itinerary_id).await?;
            let days = ItineraryRepository::list_days(pool.get_ref(), itinerary_id).await?;
            Some(ItineraryResponse { itinerary, days })
        }
        None => None,
    };

    Ok(HttpResponse::Ok().json(TourDetailResponse {
        tour,
        cabins: cabins.iter().map(|c| c.to_response()).collect(),
        itinerary,
    }))
}

/// POST /tours (admin)
pub async fn create_tour(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    req: web::Json<CreateTourRequest>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    if let Err(e) = req.validate() {
        return Err(ApiError::ValidationError(e.to_string()));
    }
    check_enum(&req.tour_type, TOUR_TYPES, "tour_type")?;
    check_enum(&req.category, TOUR_CATEGORIES, "category")?;

    let slug = match &req.slug {
        Some(slug) if !slug.is_empty() => slug.clone(),
        _ => slugify(&req.name),
    };
    if slug.is_empty() {
        return Err(ApiError::ValidationError(
            "name does not produce a usable slug".to_string(),
        ));
    }

    let tour = TourRepository::create(pool.get_ref(), &req, &slug).await?;
    Ok(HttpResponse::Created().json(tour))
}

/// PUT /tours/{id} (admin)
pub async fn update_tour(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<UpdateTourRequest>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    if let Some(type_) = &req.tour_type {
        check_enum(type_, TOUR_TYPES, "tour_type")?;
    }
    if let Some(category) = &req.category {
        check_enum(category, TOUR_CATEGORIES, "category")?;
    }

    let tour = TourRepository::update(pool.get_ref(), path.into_inner(), &req).await?;
    Ok(HttpResponse::Ok().json(tour))
}

/// DELETE /tours/{id} (admin)
/// Soft delete
pub async fn delete_tour(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    TourRepository::delete(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /tours/{id}/cabins
pub async fn list_cabins(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let tour_id = path.into_inner();
    TourRepository::get_by_id(pool.get_ref(), tour_id).await?;

    let cabins = CabinRepository::list_by_tour(pool.get_ref(), tour_id).await?;
    Ok(HttpResponse::Ok().json(
        cabins.iter().map(|c| c.to_response()).collect::<Vec<_>>(),
    ))
}

/// POST /tours/{id}/cabins (admin)
pub async fn create_cabin(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<CreateCabinRequest>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    if let Err(e) = req.validate() {
        return Err(ApiError::ValidationError(e.to_string()));
    }

    let tour_id = path.into_inner();
    TourRepository::get_by_id(pool.get_ref(), tour_id).await?;

    let cabin = CabinRepository::create(pool.get_ref(), tour_id, &req).await?;
    Ok(HttpResponse::Created().json(cabin.to_response()))
}

/// PUT /tours/{id}/cabins/{cabin_id} (admin)
pub async fn update_cabin(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<(Uuid, Uuid)>,
    req: web::Json<UpdateCabinRequest>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    let (tour_id, cabin_id) = path.into_inner();
    let cabin = CabinRepository::get_by_id(pool.get_ref(), cabin_id).await?;
    if cabin.tour_id != tour_id {
        return Err(ApiError::NotFound(cabin_id.to_string()));
    }

    let cabin = CabinRepository::update(pool.get_ref(), cabin_id, &req).await?;
    Ok(HttpResponse::Ok().json(cabin.to_response()))
}

/// DELETE /tours/{id}/cabins/{cabin_id} (admin)
pub async fn delete_cabin(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    let (tour_id, cabin_id) = path.into_inner();
    let cabin = CabinRepository::get_by_id(pool.get_ref(), cabin_id).await?;
    if cabin.tour_id != tour_id {
        return Err(ApiError::NotFound(cabin_id.to_string()));
    }

    CabinRepository::delete(pool.get_ref(), cabin_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configuration for tour routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tours")
            .route("", web::get().to(list_tours))
            .route("", web::post().to(create_tour))
            .route("/{id}", web::get().to(get_tour))
            .route("/{id}", web::put().to(update_tour))
            .route("/{id}", web::delete().to(delete_tour))
            .route("/{id}/cabins", web::get().to(list_cabins))
            .route("/{id}/cabins", web::post().to(create_cabin))
            .route("/{id}/cabins/{cabin_id}", web::put().to(update_cabin))
            .route("/{id}/cabins/{cabin_id}", web::delete().to(delete_cabin)),
    );
}
