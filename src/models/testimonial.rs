// src/models/testimonial.rs
// DOCUMENTATION: Testimonial structures
// PURPOSE: Guest reviews surfaced on the public site and managed in the dashboard

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents a testimonial record from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Testimonial {
    pub id: Uuid,
    pub name: String,
    pub title: Option<String>,
    pub company: Option<String>,
    pub content: String,
    /// 1-5 stars
    pub rating: i32,
    pub avatar_url: Option<String>,
    /// Featured testimonials sort first on the public site
    pub featured: bool,
    pub is_active: bool,
    /// Links the testimonial to a tour type for rating aggregation
    pub trip_type: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for POST /dashboard/testimonials
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTestimonialRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    pub title: Option<String>,
    pub company: Option<String>,

    #[validate(length(min = 1))]
    pub content: String,

    #[validate(range(min = 1, max = 5))]
    #[serde(default = "default_rating")]
    pub rating: i32,

    pub avatar_url: Option<String>,

    #[serde(default)]
    pub featured: bool,

    #[serde(default = "default_active")]
    pub is_active: bool,

    pub trip_type: Option<String>,

    #[serde(default)]
    pub display_order: i32,
}

fn default_rating() -> i32 {
    5
}

fn default_active() -> bool {
    true
}

/// Request DTO for PUT /dashboard/testimonials/{id}
#[derive(Debug, Deserialize, Default)]
pub struct UpdateTestimonialRequest {
    pub name: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub content: Option<String>,
    pub rating: Option<i32>,
    pub avatar_url: Option<String>,
    pub featured: Option<bool>,
    pub is_active: Option<bool>,
    pub trip_type: Option<String>,
    pub display_order: Option<i32>,
}
