// src/handlers/availability.rs
// DOCUMENTATION: HTTP handlers for availability checking
// PURPOSE: Booking-flow availability check and monthly calendar

use crate::errors::ApiError;
use crate::models::{AvailabilityRequest, CalendarQuery};
use crate::services::AvailabilityService;
use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;

/// POST /availability
/// Which cabins are open for a date range, and at what total
pub async fn check_availability(
    pool: web::Data<PgPool>,
    req: web::Json<AvailabilityRequest>,
) -> Result<impl Responder, ApiError> {
    let result = AvailabilityService::check(pool.get_ref(), &req).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// GET /availability?tour_id&month&year
/// Day-by-day availability map for one month
pub async fn availability_calendar(
    pool: web::Data<PgPool>,
    query: web::Query<CalendarQuery>,
) -> Result<impl Responder, ApiError> {
    let calendar = AvailabilityService::calendar(pool.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(calendar))
}

/// Configuration for availability routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/availability")
            .route("", web::post().to(check_availability))
            .route("", web::get().to(availability_calendar)),
    );
}
