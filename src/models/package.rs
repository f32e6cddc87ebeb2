// src/models/package.rs
// DOCUMENTATION: Package structures
// PURPOSE: Fixed-price multi-day products with inclusions and day plans

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents a package record from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Package {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub duration_days: i32,
    pub price: f64,
    pub inclusions: Vec<String>,
    pub exclusions: Vec<String>,
    pub highlights: Vec<String>,
    pub main_image: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One day of a package plan
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PackageDay {
    pub id: Uuid,
    pub package_id: Uuid,
    pub day_number: i32,
    pub description: String,
}

/// Day payload nested inside create/update requests
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PackageDayInput {
    pub day_number: i32,
    pub description: String,
}

/// Request DTO for POST /packages
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePackageRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    pub slug: Option<String>,

    #[validate(length(min = 1))]
    pub description: String,

    #[validate(range(min = 1, max = 60))]
    pub duration_days: i32,

    #[validate(range(min = 0.0))]
    pub price: f64,

    #[serde(default)]
    pub inclusions: Vec<String>,

    #[serde(default)]
    pub exclusions: Vec<String>,

    #[serde(default)]
    pub highlights: Vec<String>,

    #[serde(default)]
    pub main_image: Option<String>,

    /// Day plan; replaces any existing days on update
    #[serde(default)]
    pub itinerary: Vec<PackageDayInput>,
}

/// Request DTO for PUT /packages/{id}
#[derive(Debug, Deserialize, Default)]
pub struct UpdatePackageRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration_days: Option<i32>,
    pub price: Option<f64>,
    pub inclusions: Option<Vec<String>>,
    pub exclusions: Option<Vec<String>>,
    pub highlights: Option<Vec<String>>,
    pub main_image: Option<String>,
    pub itinerary: Option<Vec<PackageDayInput>>,
}

/// Response DTO: package with its ordered day plan
#[derive(Debug, Serialize)]
pub struct PackageResponse {
    #[serde(flatten)]
    pub package: Package,
    pub itinerary: Vec<PackageDay>,
}
