// src/models/cabin.rs
// DOCUMENTATION: Cabin structures for tours
// PURPOSE: Cabins are the bookable units of a dahabiya

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents a cabin record from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Cabin {
    pub id: Uuid,

    /// Owning tour
    pub tour_id: Uuid,

    /// Cabin name (e.g. "Upper Deck Suite")
    pub name: String,

    /// Price per night
    pub price: f64,

    /// Maximum guests in this cabin
    pub capacity: i32,

    /// Soft delete flag
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cabin {
    pub fn to_response(&self) -> CabinResponse {
        CabinResponse {
            id: self.id,
            tour_id: self.tour_id,
            name: self.name.clone(),
            price: self.price,
            capacity: self.capacity,
        }
    }
}

/// Request DTO for POST /tours/{id}/cabins
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCabinRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(range(min = 0.0))]
    pub price: f64,

    #[validate(range(min = 1))]
    pub capacity: i32,
}

/// Request DTO for PUT /tours/{id}/cabins/{cabin_id}
#[derive(Debug, Deserialize, Default)]
pub struct UpdateCabinRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub capacity: Option<i32>,
}

/// Public view of a cabin
#[derive(Debug, Serialize)]
pub struct CabinResponse {
    pub id: Uuid,
    pub tour_id: Uuid,
    pub name: String,
    pub price: f64,
    pub capacity: i32,
}
