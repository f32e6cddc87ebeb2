// src/models/booking.rs
// DOCUMENTATION: Booking structures and status lifecycle
// PURPOSE: Defines booking records, request DTOs, and admin notifications

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Booking lifecycle status, stored as text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::Completed => "COMPLETED",
        }
    }

    pub fn parse(s: &str) -> Option<BookingStatus> {
        match s {
            "PENDING" => Some(BookingStatus::Pending),
            "CONFIRMED" => Some(BookingStatus::Confirmed),
            "CANCELLED" => Some(BookingStatus::Cancelled),
            "COMPLETED" => Some(BookingStatus::Completed),
            _ => None,
        }
    }
}

/// Booking kind: a dahabiya cruise or a packaged tour
pub const BOOKING_TYPES: &[&str] = &["TOUR", "PACKAGE"];

/// Represents a complete booking record from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: Uuid,

    /// Human-facing reference (BK-XXXXXXXX), unique
    pub booking_reference: String,

    /// Owning account; None for guest bookings
    pub user_id: Option<Uuid>,

    pub tour_id: Option<Uuid>,
    pub cabin_id: Option<Uuid>,
    pub package_id: Option<Uuid>,

    /// TOUR or PACKAGE
    pub booking_type: String,

    /// First night of the stay
    pub start_date: NaiveDate,

    /// Last night of the stay
    pub end_date: NaiveDate,

    pub guests: i32,

    /// Server-computed total
    pub total_price: f64,

    /// PENDING, CONFIRMED, CANCELLED, COMPLETED
    pub status: String,

    pub special_requests: Option<String>,

    /// Contact details for guest (unauthenticated) bookings
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn status(&self) -> BookingStatus {
        BookingStatus::parse(&self.status).unwrap_or(BookingStatus::Pending)
    }
}

/// Contact details required when booking without an account
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct GuestInfo {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    pub phone: Option<String>,
}

/// Request DTO for POST /bookings
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    /// TOUR or PACKAGE
    #[serde(default = "default_booking_type")]
    pub booking_type: String,

    pub tour_id: Option<Uuid>,
    pub cabin_id: Option<Uuid>,
    pub package_id: Option<Uuid>,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[validate(range(min = 1, max = 100))]
    pub guests: i32,

    pub special_requests: Option<String>,

    /// Required when the request carries no session token
    #[validate]
    pub guest_info: Option<GuestInfo>,
}

fn default_booking_type() -> String {
    "TOUR".to_string()
}

/// Request DTO for PATCH /bookings/{id}/status
#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: String,
}

/// Compact identity attached to booking responses
#[derive(Debug, Serialize)]
pub struct BookingCustomer {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Response DTO for booking endpoints
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    #[serde(flatten)]
    pub booking: Booking,

    /// Resolved customer identity (account or guest contact)
    pub customer: BookingCustomer,

    /// Name of the booked tour or package
    pub item_name: Option<String>,
}

/// In-app notification for admin users
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub notification_type: String,
    pub title: String,
    pub message: String,
    pub data: Value,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Cancelled,
            BookingStatus::Completed,
        ] {
            assert_eq!(BookingStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(BookingStatus::parse("REFUNDED"), None);
    }
}
