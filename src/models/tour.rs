// src/models/tour.rs
// DOCUMENTATION: Core data structures for tours (dahabiyas)
// PURPOSE: Defines all serialization/deserialization models for API and database

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::{CabinResponse, ItineraryResponse};

/// Allowed values for the tour_type column
pub const TOUR_TYPES: &[&str] = &["STANDARD", "LUXURY", "PREMIUM", "BUDGET"];

/// Allowed values for the category column
pub const TOUR_CATEGORIES: &[&str] = &["STANDARD", "DELUXE", "PREMIUM", "LUXURY"];

/// Represents a complete tour record from the database
/// DOCUMENTATION: This struct maps directly to the tours table in PostgreSQL
/// A "tour" is a bookable dahabiya (Nile sailing vessel) product
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tour {
    /// Unique identifier (UUID v4)
    pub id: Uuid,

    /// Display name - required for all tours
    pub name: String,

    /// URL-safe identifier, unique across tours
    pub slug: String,

    /// Full marketing description
    pub description: String,

    /// One-line summary for listing cards
    pub short_description: Option<String>,

    /// Nightly price per cabin-independent booking
    pub price_per_day: f64,

    /// Maximum passengers across all cabins
    pub capacity: i32,

    /// Tier: STANDARD, LUXURY, PREMIUM, BUDGET
    pub tour_type: String,

    /// Marketing category: STANDARD, DELUXE, PREMIUM, LUXURY
    pub category: String,

    /// On-board amenity names
    pub amenities: Vec<String>,

    /// Feature bullet points
    pub features: Vec<String>,

    /// Gallery image URLs
    pub images: Vec<String>,

    /// Hero image URL
    pub main_image: Option<String>,

    /// Attached itinerary, if any
    pub itinerary_id: Option<Uuid>,

    /// Sales copy: what sets this vessel apart
    pub advantages: Option<String>,

    /// Sales copy: the story behind the name
    pub meaning: Option<String>,

    /// Soft delete flag (false = deleted)
    pub is_active: bool,

    /// When record was created
    pub created_at: DateTime<Utc>,

    /// When record was last modified
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for creating a new tour
/// DOCUMENTATION: Data transfer object for POST /tours endpoint
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct CreateTourRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    /// Optional explicit slug; generated from the name when absent
    pub slug: Option<String>,

    #[validate(length(min = 1))]
    pub description: String,

    pub short_description: Option<String>,

    #[validate(range(min = 0.0))]
    pub price_per_day: f64,

    #[validate(range(min = 1))]
    pub capacity: i32,

    pub tour_type: String,

    pub category: String,

    #[serde(default)]
    pub amenities: Vec<String>,

    #[serde(default)]
    pub features: Vec<String>,

    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default)]
    pub main_image: Option<String>,

    #[serde(default)]
    pub itinerary_id: Option<Uuid>,

    #[serde(default)]
    pub advantages: Option<String>,

    #[serde(default)]
    pub meaning: Option<String>,
}

/// Request DTO for updating an existing tour
/// All fields are optional - only provided fields are updated
#[derive(Debug, Deserialize, Default)]
pub struct UpdateTourRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub price_per_day: Option<f64>,
    pub capacity: Option<i32>,
    pub tour_type: Option<String>,
    pub category: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub features: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub main_image: Option<String>,
    pub itinerary_id: Option<Uuid>,
    pub advantages: Option<String>,
    pub meaning: Option<String>,
}

/// Listing query parameters for GET /tours
#[derive(Debug, Deserialize)]
pub struct TourListQuery {
    /// Filter by tour_type
    #[serde(rename = "type")]
    pub type_: Option<String>,

    /// Filter by category
    pub category: Option<String>,

    /// Page number (1-based)
    pub page: Option<i64>,

    /// Results per page (max 100)
    pub limit: Option<i64>,
}

/// Tour item in listing responses, with rating aggregated from testimonials
#[derive(Debug, Serialize)]
pub struct TourListItem {
    #[serde(flatten)]
    pub tour: Tour,
    pub average_rating: f64,
}

/// Paginated listing response
#[derive(Debug, Serialize)]
pub struct TourListResponse {
    pub tours: Vec<TourListItem>,
    pub total: i64,
    pub pages: i64,
    pub page: i64,
    pub limit: i64,
}

/// Detailed response DTO for GET /tours/{id}
/// Extended with cabins and the attached itinerary
#[derive(Debug, Serialize)]
pub struct TourDetailResponse {
    #[serde(flatten)]
    pub tour: Tour,
    pub cabins: Vec<CabinResponse>,
    pub itinerary: Option<ItineraryResponse>,
}

/// Generate a URL-safe slug from a display name
/// Lowercases, collapses non-alphanumeric runs into single dashes
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Queen Cleopatra"), "queen-cleopatra");
        assert_eq!(slugify("Nile  Jewel II"), "nile-jewel-ii");
    }

    #[test]
    fn test_slugify_strips_punctuation() {
        assert_eq!(slugify("Aswan & Luxor (7 nights)!"), "aswan-luxor-7-nights");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_tour_type_values() {
        assert!(TOUR_TYPES.contains(&"LUXURY"));
        assert!(!TOUR_TYPES.contains(&"DELUXE"));
        assert!(TOUR_CATEGORIES.contains(&"DELUXE"));
    }
}
