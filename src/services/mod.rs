// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod auth;
pub mod availability;
pub mod booking_service;
pub mod cache;
pub mod mailer;

pub use auth::Claims;
pub use availability::AvailabilityService;
pub use booking_service::BookingService;
pub use cache::{start_cleanup_task, ContentCache};
pub use mailer::Mailer;
