// src/handlers/site.rs
// DOCUMENTATION: Public site read endpoints
// PURPOSE: Testimonials, FAQs, navigation menus, SEO meta, policies

use crate::db::{
    FaqRepository, NavigationRepository, PolicyRepository, SeoRepository, TestimonialRepository,
};
use crate::errors::ApiError;
use crate::models::navigation::build_tree;
use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;

/// GET /testimonials
/// Active testimonials, featured first
pub async fn list_testimonials(pool: web::Data<PgPool>) -> Result<impl Responder, ApiError> {
    let testimonials = TestimonialRepository::list_public(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(testimonials))
}

/// GET /faqs
pub async fn list_faqs(pool: web::Data<PgPool>) -> Result<impl Responder, ApiError> {
    let faqs = FaqRepository::list(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(faqs))
}

/// GET /navigation/{location}
/// Menu tree for one location (header, footer, ...)
pub async fn get_menu(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let items = NavigationRepository::list_by_location(pool.get_ref(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(build_tree(items)))
}

/// GET /seo/{page_slug}
pub async fn get_seo(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<impl Responder, ApiError> {
    let meta = SeoRepository::get_by_slug(pool.get_ref(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(meta))
}

/// GET /policies
pub async fn list_policies(pool: web::Data<PgPool>) -> Result<impl Responder, ApiError> {
    let policies = PolicyRepository::list(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(policies))
}

/// Configuration for public site routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/testimonials", web::get().to(list_testimonials))
        .route("/faqs", web::get().to(list_faqs))
        .route("/navigation/{location}", web::get().to(get_menu))
        .route("/seo/{page_slug}", web::get().to(get_seo))
        .route("/policies", web::get().to(list_policies));
}
