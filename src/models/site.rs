// src/models/site.rs
// DOCUMENTATION: Small site-catalog structures
// PURPOSE: FAQs, promotions, policies, and amenity lookup records

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Allowed values for the policies.policy_type column
pub const POLICY_TYPES: &[&str] = &["CANCELLATION", "PAYMENT", "PRIVACY", "TERMS"];

/// Frequently asked question, ordered for display
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Faq {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for POST /dashboard/faqs
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFaqRequest {
    #[validate(length(min = 1))]
    pub question: String,

    #[validate(length(min = 1))]
    pub answer: String,

    #[serde(default)]
    pub display_order: i32,
}

/// Request DTO for PUT /dashboard/faqs/{id}
#[derive(Debug, Deserialize, Default)]
pub struct UpdateFaqRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub display_order: Option<i32>,
}

/// Discount code valid inside a date window
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Promotion {
    pub id: Uuid,
    pub code: String,
    pub description: String,
    pub discount_percentage: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Promotion {
    /// Whether the promotion applies on the given day
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        self.is_active && date >= self.start_date && date <= self.end_date
    }
}

/// Request DTO for POST /dashboard/promotions
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePromotionRequest {
    #[validate(length(min = 1, max = 64))]
    pub code: String,

    #[validate(length(min = 1))]
    pub description: String,

    #[validate(range(min = 0.0, max = 100.0))]
    pub discount_percentage: f64,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Request DTO for PUT /dashboard/promotions/{id}
#[derive(Debug, Deserialize, Default)]
pub struct UpdatePromotionRequest {
    pub description: Option<String>,
    pub discount_percentage: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

/// Typed legal/operational policy text
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Policy {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// CANCELLATION, PAYMENT, PRIVACY, TERMS
    pub policy_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for POST /dashboard/policies
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePolicyRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    #[validate(length(min = 1))]
    pub content: String,

    #[serde(default = "default_policy_type")]
    pub policy_type: String,
}

fn default_policy_type() -> String {
    "CANCELLATION".to_string()
}

/// Request DTO for PUT /dashboard/policies/{id}
#[derive(Debug, Deserialize, Default)]
pub struct UpdatePolicyRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub policy_type: Option<String>,
}

/// Amenity lookup record referenced by name from tours
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Amenity {
    pub id: Uuid,
    pub name: String,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request DTO for POST /dashboard/amenities
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAmenityRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    pub icon: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn promo(start: &str, end: &str, active: bool) -> Promotion {
        Promotion {
            id: Uuid::new_v4(),
            code: "NILE10".to_string(),
            description: "10% off".to_string(),
            discount_percentage: 10.0,
            start_date: start.parse().unwrap(),
            end_date: end.parse().unwrap(),
            is_active: active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_promotion_window() {
        let p = promo("2026-01-01", "2026-01-31", true);
        assert!(p.is_valid_on("2026-01-01".parse().unwrap()));
        assert!(p.is_valid_on("2026-01-31".parse().unwrap()));
        assert!(!p.is_valid_on("2026-02-01".parse().unwrap()));
        assert!(!p.is_valid_on("2025-12-31".parse().unwrap()));
    }

    #[test]
    fn test_inactive_promotion_never_valid() {
        let p = promo("2026-01-01", "2026-01-31", false);
        assert!(!p.is_valid_on("2026-01-15".parse().unwrap()));
    }
}
