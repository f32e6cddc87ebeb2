// src/models/itinerary.rs
// DOCUMENTATION: Itinerary structures
// PURPOSE: Named multi-day tour plans composed of ordered day records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents an itinerary record from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Itinerary {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub duration_days: i32,
    pub tour_type: Option<String>,
    pub destination: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One day of an itinerary, ordered by day_number
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ItineraryDay {
    pub id: Uuid,
    pub itinerary_id: Uuid,
    pub day_number: i32,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub meals: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for POST /itineraries
#[derive(Debug, Deserialize, Validate)]
pub struct CreateItineraryRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    /// Generated from the name when absent
    pub slug: Option<String>,

    pub description: Option<String>,

    #[validate(range(min = 1, max = 60))]
    pub duration_days: i32,

    pub tour_type: Option<String>,
    pub destination: Option<String>,

    #[serde(default)]
    pub display_order: i32,
}

/// Request DTO for PUT /itineraries/{id}
#[derive(Debug, Deserialize, Default)]
pub struct UpdateItineraryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration_days: Option<i32>,
    pub tour_type: Option<String>,
    pub destination: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// Request DTO for POST /itineraries/{id}/days
#[derive(Debug, Deserialize, Validate)]
pub struct CreateItineraryDayRequest {
    #[validate(range(min = 1, max = 60))]
    pub day_number: i32,

    #[validate(length(min = 1, max = 255))]
    pub title: String,

    pub description: Option<String>,
    pub location: Option<String>,

    #[serde(default)]
    pub meals: Vec<String>,
}

/// Request DTO for PUT /itineraries/{id}/days/{day_id}
#[derive(Debug, Deserialize, Default)]
pub struct UpdateItineraryDayRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub meals: Option<Vec<String>>,
}

/// Request DTO for PATCH /itineraries/{id}/days/reorder
/// Days are renumbered 1..n following the order of ids
#[derive(Debug, Deserialize)]
pub struct ReorderDaysRequest {
    pub day_ids: Vec<Uuid>,
}

/// Response DTO: itinerary with its ordered days
#[derive(Debug, Serialize)]
pub struct ItineraryResponse {
    #[serde(flatten)]
    pub itinerary: Itinerary,
    pub days: Vec<ItineraryDay>,
}
