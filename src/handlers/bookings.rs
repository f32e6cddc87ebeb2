// src/handlers/bookings.rs
// DOCUMENTATION: HTTP handlers for booking operations
// PURPOSE: Booking creation, listings, status changes, cancellation

use crate::config::Config;
use crate::db::{BookingRepository, UserRepository};
use crate::errors::ApiError;
use crate::models::{CreateBookingRequest, Role, UpdateBookingStatusRequest, User};
use crate::services::auth::{authenticate, maybe_authenticate, require_role};
use crate::services::{BookingService, Mailer};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// POST /bookings
/// Authenticated or guest booking creation
pub async fn create_booking(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    mailer: web::Data<Arc<Mailer>>,
    http_req: HttpRequest,
    req: web::Json<CreateBookingRequest>,
) -> Result<impl Responder, ApiError> {
    if let Err(e) = req.validate() {
        return Err(ApiError::ValidationError(e.to_string()));
    }

    // A valid token binds the booking to its account; no token means
    // the request must carry guest contact details
    let user: Option<User> = match maybe_authenticate(&http_req, config.get_ref()) {
        Some(claims) => Some(
            UserRepository::get_by_id(pool.get_ref(), claims.sub)
                .await
                .map_err(|_| ApiError::Unauthorized)?,
        ),
        None => None,
    };

    let booking =
        BookingService::create_booking(pool.get_ref(), mailer.get_ref(), user.as_ref(), &req)
            .await?;

    Ok(HttpResponse::Created().json(booking))
}

/// GET /bookings
/// Current account's bookings, newest first
pub async fn list_my_bookings(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
) -> Result<impl Responder, ApiError> {
    let claims = authenticate(&http_req, config.get_ref())?;

    let bookings = BookingRepository::list_by_user(pool.get_ref(), claims.sub).await?;
    Ok(HttpResponse::Ok().json(bookings))
}

/// GET /bookings/all (admin)
pub async fn list_all_bookings(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    let bookings = BookingRepository::list_all(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(bookings))
}

/// GET /bookings/{id}
/// Visible to the booking's owner or any admin
pub async fn get_booking(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let claims = authenticate(&http_req, config.get_ref())?;

    let booking =
        BookingService::get_booking(pool.get_ref(), path.into_inner(), claims.sub, claims.role())
            .await?;

    Ok(HttpResponse::Ok().json(booking))
}

/// PATCH /bookings/{id}/status (admin)
pub async fn update_booking_status(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    mailer: web::Data<Arc<Mailer>>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<UpdateBookingStatusRequest>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    let booking = BookingService::update_status(
        pool.get_ref(),
        mailer.get_ref(),
        path.into_inner(),
        &req.status,
    )
    .await?;

    Ok(HttpResponse::Ok().json(booking))
}

/// POST /bookings/{id}/cancel
/// Owner or admin cancellation
pub async fn cancel_booking(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    mailer: web::Data<Arc<Mailer>>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let claims = authenticate(&http_req, config.get_ref())?;

    let booking = BookingService::cancel_booking(
        pool.get_ref(),
        mailer.get_ref(),
        path.into_inner(),
        claims.sub,
        claims.role(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(booking))
}

/// Configuration for booking routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/bookings")
            .route("", web::post().to(create_booking))
            .route("", web::get().to(list_my_bookings))
            .route("/all", web::get().to(list_all_bookings))
            .route("/{id}", web::get().to(get_booking))
            .route("/{id}/status", web::patch().to(update_booking_status))
            .route("/{id}/cancel", web::post().to(cancel_booking)),
    );
}
