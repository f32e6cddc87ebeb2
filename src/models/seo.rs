// src/models/seo.rs
// DOCUMENTATION: SEO metadata structures
// PURPOSE: Per-page meta tags managed from the dashboard

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents an SEO metadata record from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SeoMeta {
    pub id: Uuid,
    /// Page the metadata applies to, unique
    pub page_slug: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub canonical: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub no_index: bool,
    pub no_follow: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for POST /dashboard/seo (upsert by page_slug)
#[derive(Debug, Deserialize, Validate)]
pub struct UpsertSeoRequest {
    #[validate(length(min = 1, max = 255))]
    pub page_slug: String,

    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub canonical: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,

    #[serde(default)]
    pub no_index: bool,

    #[serde(default)]
    pub no_follow: bool,
}
