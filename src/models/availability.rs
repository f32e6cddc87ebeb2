// src/models/availability.rs
// DOCUMENTATION: DTOs for the availability-checking subsystem
// PURPOSE: Request/response shapes for POST /availability and the calendar

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Request DTO for POST /availability
#[derive(Debug, Deserialize)]
pub struct AvailabilityRequest {
    pub tour_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub guests: i32,
}

/// A cabin open for the requested range
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AvailableCabin {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub capacity: i32,
}

/// Response DTO for POST /availability
#[derive(Debug, Serialize)]
pub struct AvailabilityResult {
    pub is_available: bool,
    pub available_cabins: Vec<AvailableCabin>,
    pub nights: i64,
    pub total_price: f64,
}

/// Query parameters for GET /availability
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub tour_id: Uuid,
    /// Month 1-12
    pub month: u32,
    pub year: i32,
}

/// Day-by-day availability for one month: "YYYY-MM-DD" -> open
/// BTreeMap keeps the JSON keys in date order
pub type AvailabilityCalendar = BTreeMap<String, bool>;
