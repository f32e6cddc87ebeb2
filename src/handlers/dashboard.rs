// src/handlers/dashboard.rs
// DOCUMENTATION: Admin dashboard handlers
// PURPOSE: CRUD for site catalogs, in-app notifications, and statistics

use crate::config::Config;
use crate::db::{
    AmenityRepository, FaqRepository, NavigationRepository, NotificationRepository,
    PolicyRepository, PromotionRepository, SeoRepository, TestimonialRepository,
};
use crate::errors::ApiError;
use crate::models::navigation::build_tree;
use crate::models::{
    CreateAmenityRequest, CreateFaqRequest, CreateNavigationRequest, CreatePolicyRequest,
    CreatePromotionRequest, CreateTestimonialRequest, Role, UpdateFaqRequest,
    UpdateNavigationRequest, UpdatePolicyRequest, UpdatePromotionRequest,
    UpdateTestimonialRequest, UpsertSeoRequest, POLICY_TYPES,
};
use crate::services::auth::require_role;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

// ---- Testimonials ----

pub async fn list_testimonials(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    let testimonials = TestimonialRepository::list_all(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(testimonials))
}

pub async fn create_testimonial(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    req: web::Json<CreateTestimonialRequest>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    if let Err(e) = req.validate() {
        return Err(ApiError::ValidationError(e.to_string()));
    }

    let testimonial = TestimonialRepository::create(pool.get_ref(), &req).await?;
    Ok(HttpResponse::Created().json(testimonial))
}

pub async fn update_testimonial(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<UpdateTestimonialRequest>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    if let Some(rating) = req.rating {
        if !(1..=5).contains(&rating) {
            return Err(ApiError::ValidationError(
                "rating must be between 1 and 5".to_string(),
            ));
        }
    }

    let testimonial =
        TestimonialRepository::update(pool.get_ref(), path.into_inner(), &req).await?;
    Ok(HttpResponse::Ok().json(testimonial))
}

pub async fn delete_testimonial(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    TestimonialRepository::delete(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

// ---- Navigation ----

pub async fn list_navigation(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    let items = NavigationRepository::list_all(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(build_tree(items)))
}

pub async fn create_navigation(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    req: web::Json<CreateNavigationRequest>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    if let Err(e) = req.validate() {
        return Err(ApiError::ValidationError(e.to_string()));
    }

    let item = NavigationRepository::create(pool.get_ref(), &req).await?;
    Ok(HttpResponse::Created().json(item))
}

pub async fn update_navigation(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<UpdateNavigationRequest>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    let item = NavigationRepository::update(pool.get_ref(), path.into_inner(), &req).await?;
    Ok(HttpResponse::Ok().json(item))
}

pub async fn delete_navigation(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    NavigationRepository::delete(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

// ---- SEO ----

pub async fn list_seo(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    let items = SeoRepository::list_all(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(items))
}

pub async fn upsert_seo(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    req: web::Json<UpsertSeoRequest>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    if let Err(e) = req.validate() {
        return Err(ApiError::ValidationError(e.to_string()));
    }

    let meta = SeoRepository::upsert(pool.get_ref(), &req).await?;
    Ok(HttpResponse::Ok().json(meta))
}

pub async fn delete_seo(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    SeoRepository::delete(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

// ---- FAQs ----

pub async fn list_faqs(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    let faqs = FaqRepository::list(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(faqs))
}

pub async fn create_faq(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    req: web::Json<CreateFaqRequest>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    if let Err(e) = req.validate() {
        return Err(ApiError::ValidationError(e.to_string()));
    }

    let faq = FaqRepository::create(pool.get_ref(), &req).await?;
    Ok(HttpResponse::Created().json(faq))
}

pub async fn update_faq(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<UpdateFaqRequest>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    let faq = FaqRepository::update(pool.get_ref(), path.into_inner(), &req).await?;
    Ok(HttpResponse::Ok().json(faq))
}

pub async fn delete_faq(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    FaqRepository::delete(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

// ---- Promotions ----

pub async fn list_promotions(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    let promotions = PromotionRepository::list(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(promotions))
}

pub async fn create_promotion(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    req: web::Json<CreatePromotionRequest>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    if let Err(e) = req.validate() {
        return Err(ApiError::ValidationError(e.to_string()));
    }
    if req.end_date < req.start_date {
        return Err(ApiError::ValidationError(
            "end_date must not precede start_date".to_string(),
        ));
    }

    let promotion = PromotionRepository::create(pool.get_ref(), &req).await?;
    Ok(HttpResponse::Created().json(promotion))
}

pub async fn update_promotion(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<UpdatePromotionRequest>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    let promotion = PromotionRepository::update(pool.get_ref(), path.into_inner(), &req).await?;
    Ok(HttpResponse::Ok().json(promotion))
}

pub async fn delete_promotion(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    PromotionRepository::delete(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

// ---- Policies ----

pub async fn list_policies(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    let policies = PolicyRepository::list(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(policies))
}

pub async fn create_policy(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    req: web::Json<CreatePolicyRequest>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    if let Err(e) = req.validate() {
        return Err(ApiError::ValidationError(e.to_string()));
    }
    if !POLICY_TYPES.contains(&req.policy_type.as_str()) {
        return Err(ApiError::ValidationError(format!(
            "policy_type must be one of {}",
            POLICY_TYPES.join(", ")
        )));
    }

    let policy = PolicyRepository::create(pool.get_ref(), &req).await?;
    Ok(HttpResponse::Created().json(policy))
}

pub async fn update_policy(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
    req: web::Json<UpdatePolicyRequest>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    if let Some(policy_type) = &req.policy_type {
        if !POLICY_TYPES.contains(&policy_type.as_str()) {
            return Err(ApiError::ValidationError(format!(
                "policy_type must be one of {}",
                POLICY_TYPES.join(", ")
            )));
        }
    }

    let policy = PolicyRepository::update(pool.get_ref(), path.into_inner(), &req).await?;
    Ok(HttpResponse::Ok().json(policy))
}

pub async fn delete_policy(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    PolicyRepository::delete(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

// ---- Amenities ----

pub async fn list_amenities(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    let amenities = AmenityRepository::list(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(amenities))
}

pub async fn create_amenity(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    req: web::Json<CreateAmenityRequest>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    if let Err(e) = req.validate() {
        return Err(ApiError::ValidationError(e.to_string()));
    }

    let amenity = AmenityRepository::create(pool.get_ref(), &req).await?;
    Ok(HttpResponse::Created().json(amenity))
}

pub async fn delete_amenity(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    AmenityRepository::delete(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

// ---- Notifications ----

pub async fn list_notifications(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
) -> Result<impl Responder, ApiError> {
    let claims = require_role(&http_req, config.get_ref(), Role::Admin)?;

    let notifications = NotificationRepository::list_for_user(pool.get_ref(), claims.sub).await?;
    Ok(HttpResponse::Ok().json(notifications))
}

pub async fn mark_notification_read(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let claims = require_role(&http_req, config.get_ref(), Role::Admin)?;

    NotificationRepository::mark_read(pool.get_ref(), path.into_inner(), claims.sub).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "read": true })))
}

// ---- Statistics ----

/// Row shape for the grouped booking-status count
#[derive(Debug, Serialize, sqlx::FromRow)]
struct StatusCount {
    status: String,
    count: i64,
}

/// GET /dashboard/stats
/// Headline numbers for the dashboard landing page
pub async fn stats(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    http_req: HttpRequest,
) -> Result<impl Responder, ApiError> {
    require_role(&http_req, config.get_ref(), Role::Admin)?;

    let total_tours: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM tours WHERE is_active = true")
            .fetch_one(pool.get_ref())
            .await
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    let total_users: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM users WHERE is_active = true")
            .fetch_one(pool.get_ref())
            .await
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    let bookings_by_status: Vec<StatusCount> = sqlx::query_as(
        "SELECT status, COUNT(*) as count FROM bookings GROUP BY status ORDER BY count DESC",
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    let revenue: (Option<f64>,) = sqlx::query_as(
        "SELECT SUM(total_price) FROM bookings WHERE status IN ('CONFIRMED', 'COMPLETED')",
    )
    .fetch_one(pool.get_ref())
    .await
    .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    let recent_bookings: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM bookings WHERE created_at > NOW() - INTERVAL '30 days'",
    )
    .fetch_one(pool.get_ref())
    .await
    .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "total_tours": total_tours.0,
        "total_users": total_users.0,
        "bookings_by_status": bookings_by_status,
        "revenue": revenue.0.unwrap_or(0.0),
        "bookings_last_30_days": recent_bookings.0,
    })))
}

/// Configuration for dashboard routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/dashboard")
            .route("/testimonials", web::get().to(list_testimonials))
            .route("/testimonials", web::post().to(create_testimonial))
            .route("/testimonials/{id}", web::put().to(update_testimonial))
            .route("/testimonials/{id}", web::delete().to(delete_testimonial))
            .route("/navigation", web::get().to(list_navigation))
            .route("/navigation", web::post().to(create_navigation))
            .route("/navigation/{id}", web::put().to(update_navigation))
            .route("/navigation/{id}", web::delete().to(delete_navigation))
            .route("/seo", web::get().to(list_seo))
            .route("/seo", web::post().to(upsert_seo))
            .route("/seo/{id}", web::delete().to(delete_seo))
            .route("/faqs", web::get().to(list_faqs))
            .route("/faqs", web::post().to(create_faq))
            .route("/faqs/{id}", web::put().to(update_faq))
            .route("/faqs/{id}", web::delete().to(delete_faq))
            .route("/promotions", web::get().to(list_promotions))
            .route("/promotions", web::post().to(create_promotion))
            .route("/promotions/{id}", web::put().to(update_promotion))
            .route("/promotions/{id}", web::delete().to(delete_promotion))
            .route("/policies", web::get().to(list_policies))
            .route("/policies", web::post().to(create_policy))
            .route("/policies/{id}", web::put().to(update_policy))
            .route("/policies/{id}", web::delete().to(delete_policy))
            .route("/amenities", web::get().to(list_amenities))
            .route("/amenities", web::post().to(create_amenity))
            .route("/amenities/{id}", web::delete().to(delete_amenity))
            .route("/notifications", web::get().to(list_notifications))
            .route(
                "/notifications/{id}/read",
                web::patch().to(mark_notification_read),
            )
            .route("/stats", web::get().to(stats)),
    );
}
