// src/services/booking_service.rs
// DOCUMENTATION: Booking orchestration
// PURPOSE: Price computation, availability re-check, persistence,
// and the email/notification fan-out around booking lifecycle changes

use crate::db::{
    BookingRepository, CabinRepository, InsertBooking, NotificationRepository, PackageRepository,
    TourRepository, UserRepository,
};
use crate::errors::ApiError;
use crate::models::{
    BookingResponse, BookingStatus, CreateBookingRequest, Role, User, BOOKING_TYPES,
};
use crate::services::availability::{nights_between, validate_range};
use crate::services::mailer::Mailer;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

pub struct BookingService;

impl BookingService {
    /// Create a booking for an account holder or a guest
    /// DOCUMENTATION: Validates the request, re-checks cabin availability,
    /// prices the stay server-side, persists it as PENDING, then fires
    /// emails and admin notifications (best-effort, never fatal)
    pub async fn create_booking(
        pool: &PgPool,
        mailer: &Mailer,
        user: Option<&User>,
        req: &CreateBookingRequest,
    ) -> Result<BookingResponse, ApiError> {
        validate_range(req.start_date, req.end_date)?;

        if !BOOKING_TYPES.contains(&req.booking_type.as_str()) {
            return Err(ApiError::ValidationError(format!(
                "unknown booking type '{}'",
                req.booking_type
            )));
        }

        // Guest bookings must carry contact details
        if user.is_none() && req.guest_info.is_none() {
            return Err(ApiError::ValidationError(
                "guest_info is required for unauthenticated bookings".to_string(),
            ));
        }

        let nights = nights_between(req.start_date, req.end_date);
        let total_price = match req.booking_type.as_str() {
            "PACKAGE" => {
                let package_id = req.package_id.ok_or_else(|| {
                    ApiError::ValidationError("package_id is required".to_string())
                })?;
                let package = PackageRepository::get_by_id(pool, package_id).await?;
                package.price
            }
            _ => Self::price_tour_stay(pool, req, nights).await?,
        };

        let guest = req.guest_info.as_ref();
        let row = InsertBooking {
            booking_reference: generate_booking_reference(),
            user_id: user.map(|u| u.id),
            tour_id: req.tour_id,
            cabin_id: req.cabin_id,
            package_id: req.package_id,
            booking_type: req.booking_type.clone(),
            start_date: req.start_date,
            end_date: req.end_date,
            guests: req.guests,
            total_price,
            special_requests: req.special_requests.clone(),
            guest_name: guest.map(|g| g.name.clone()),
            guest_email: guest.map(|g| g.email.clone()),
            guest_phone: guest.and_then(|g| g.phone.clone()),
        };

        let booking = BookingRepository::create(pool, &row).await?;
        let response = BookingRepository::get_by_id(pool, booking.id).await?;

        // Lifecycle side effects never fail the booking itself
        mailer.send_booking_created(&response).await;
        if let Err(e) = Self::notify_admins(pool, &response).await {
            log::warn!(
                "Failed to create admin notifications for {}: {}",
                response.booking.booking_reference,
                e
            );
        }

        Ok(response)
    }

    /// Price a tour stay and enforce cabin constraints
    async fn price_tour_stay(
        pool: &PgPool,
        req: &CreateBookingRequest,
        nights: i64,
    ) -> Result<f64, ApiError> {
        let tour_id = req
            .tour_id
            .ok_or_else(|| ApiError::ValidationError("tour_id is required".to_string()))?;
        let tour = TourRepository::get_by_id(pool, tour_id).await?;

        match req.cabin_id {
            Some(cabin_id) => {
                let cabin = CabinRepository::get_by_id(pool, cabin_id).await?;

                if cabin.tour_id != tour.id {
                    return Err(ApiError::InvalidInput(format!(
                        "cabin {} does not belong to tour {}",
                        cabin_id, tour.id
                    )));
                }
                if cabin.capacity < req.guests {
                    return Err(ApiError::InvalidInput(format!(
                        "cabin holds {} guests, {} requested",
                        cabin.capacity, req.guests
                    )));
                }
                // Re-check availability at booking time: the quote the
                // customer saw may have raced another booking
                if BookingRepository::cabin_has_overlap(pool, cabin_id, req.start_date, req.end_date)
                    .await?
                {
                    return Err(ApiError::InvalidInput(
                        "cabin is no longer available for these dates".to_string(),
                    ));
                }

                Ok(cabin.price * nights as f64)
            }
            // Whole-boat booking, priced per day
            None => {
                if tour.capacity < req.guests {
                    return Err(ApiError::InvalidInput(format!(
                        "tour holds {} guests, {} requested",
                        tour.capacity, req.guests
                    )));
                }
                Ok(tour.price_per_day * nights as f64)
            }
        }
    }

    /// Admin-only status change, with a courtesy email to the customer
    pub async fn update_status(
        pool: &PgPool,
        mailer: &Mailer,
        id: Uuid,
        status: &str,
    ) -> Result<BookingResponse, ApiError> {
        let status = BookingStatus::parse(status)
            .ok_or_else(|| ApiError::ValidationError(format!("unknown status '{}'", status)))?;

        let response = BookingRepository::update_status(pool, id, status.as_str()).await?;
        mailer.send_status_update(&response).await;

        Ok(response)
    }

    /// Cancel a booking on behalf of its owner or an admin
    pub async fn cancel_booking(
        pool: &PgPool,
        mailer: &Mailer,
        id: Uuid,
        requester_id: Uuid,
        requester_role: Role,
    ) -> Result<BookingResponse, ApiError> {
        let existing = BookingRepository::get_by_id(pool, id).await?;
        Self::authorize_access(&existing, requester_id, requester_role)?;

        if existing.booking.status() == BookingStatus::Cancelled {
            return Err(ApiError::InvalidInput(
                "booking is already cancelled".to_string(),
            ));
        }

        let response =
            BookingRepository::update_status(pool, id, BookingStatus::Cancelled.as_str()).await?;
        mailer.send_cancellation(&response).await;

        Ok(response)
    }

    /// Fetch one booking, visible to its owner or any admin
    pub async fn get_booking(
        pool: &PgPool,
        id: Uuid,
        requester_id: Uuid,
        requester_role: Role,
    ) -> Result<BookingResponse, ApiError> {
        let response = BookingRepository::get_by_id(pool, id).await?;
        Self::authorize_access(&response, requester_id, requester_role)?;
        Ok(response)
    }

    /// Owner-or-admin check shared by read and cancel paths
    fn authorize_access(
        booking: &BookingResponse,
        requester_id: Uuid,
        requester_role: Role,
    ) -> Result<(), ApiError> {
        if requester_role.satisfies(Role::Admin) {
            return Ok(());
        }
        if booking.booking.user_id == Some(requester_id) {
            return Ok(());
        }
        Err(ApiError::Forbidden)
    }

    /// One in-app notification per active admin account
    async fn notify_admins(pool: &PgPool, booking: &BookingResponse) -> Result<(), ApiError> {
        let admin_ids = UserRepository::admin_ids(pool).await?;
        if admin_ids.is_empty() {
            log::warn!("No admin accounts found, skipping notifications");
            return Ok(());
        }

        let title = format!("New {} booking", booking.booking.booking_type);
        let message = format!(
            "{} booked {} for {} guests",
            booking.customer.name.as_deref().unwrap_or("A guest"),
            booking.item_name.as_deref().unwrap_or("a trip"),
            booking.booking.guests
        );
        let data = json!({
            "booking_id": booking.booking.id,
            "booking_reference": booking.booking.booking_reference,
            "start_date": booking.booking.start_date,
            "end_date": booking.booking.end_date,
            "guests": booking.booking.guests,
            "total_price": booking.booking.total_price,
            "status": booking.booking.status,
        });

        for admin_id in admin_ids {
            NotificationRepository::create(
                pool,
                admin_id,
                "BOOKING_CREATED",
                &title,
                &message,
                &data,
            )
            .await?;
        }

        Ok(())
    }
}

/// Generate a human-facing booking reference: BK- plus eight
/// characters from an alphabet without lookalike glyphs
pub fn generate_booking_reference() -> String {
    use rand::Rng;

    const CHARS: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";
    let mut rng = rand::thread_rng();

    let code: String = (0..8)
        .map(|_| CHARS[rng.gen_range(0..CHARS.len())] as char)
        .collect();

    format!("BK-{}", code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Booking, BookingCustomer};
    use chrono::Utc;

    #[test]
    fn test_reference_format() {
        let reference = generate_booking_reference();
        assert_eq!(reference.len(), 11);
        assert!(reference.starts_with("BK-"));
        assert!(reference[3..]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() && !"IL1O0".contains(c)));
    }

    #[test]
    fn test_references_are_distinct() {
        let a = generate_booking_reference();
        let b = generate_booking_reference();
        assert_ne!(a, b);
    }

    fn booking_owned_by(user_id: Option<Uuid>) -> BookingResponse {
        BookingResponse {
            booking: Booking {
                id: Uuid::new_v4(),
                booking_reference: "BK-TEST1234".to_string(),
                user_id,
                tour_id: None,
                cabin_id: None,
                package_id: None,
                booking_type: "TOUR".to_string(),
                start_date: "2026-03-10".parse().unwrap(),
                end_date: "2026-03-15".parse().unwrap(),
                guests: 2,
                total_price: 0.0,
                status: "PENDING".to_string(),
                special_requests: None,
                guest_name: None,
                guest_email: None,
                guest_phone: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            customer: BookingCustomer {
                name: None,
                email: None,
            },
            item_name: None,
        }
    }

    #[test]
    fn test_owner_can_access() {
        let owner = Uuid::new_v4();
        let booking = booking_owned_by(Some(owner));
        assert!(BookingService::authorize_access(&booking, owner, Role::User).is_ok());
    }

    #[test]
    fn test_stranger_cannot_access() {
        let booking = booking_owned_by(Some(Uuid::new_v4()));
        let stranger = Uuid::new_v4();
        assert!(BookingService::authorize_access(&booking, stranger, Role::User).is_err());
    }

    #[test]
    fn test_admin_can_access_any() {
        let booking = booking_owned_by(Some(Uuid::new_v4()));
        let admin = Uuid::new_v4();
        assert!(BookingService::authorize_access(&booking, admin, Role::Admin).is_ok());
    }

    #[test]
    fn test_guest_booking_not_readable_by_users() {
        // Guest bookings have no owner; only admins may read them back
        let booking = booking_owned_by(None);
        let user = Uuid::new_v4();
        assert!(BookingService::authorize_access(&booking, user, Role::User).is_err());
        assert!(BookingService::authorize_access(&booking, user, Role::Admin).is_ok());
    }
}
