// src/db/booking_repository.rs
// DOCUMENTATION: Database access layer for bookings and admin notifications
// PURPOSE: Booking persistence plus the overlap queries behind availability

use crate::errors::ApiError;
use crate::models::{Booking, BookingCustomer, BookingResponse, Notification};
use chrono::NaiveDate;
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Column values for a new booking row, assembled by the booking service
#[derive(Debug)]
pub struct InsertBooking {
    pub booking_reference: String,
    pub user_id: Option<Uuid>,
    pub tour_id: Option<Uuid>,
    pub cabin_id: Option<Uuid>,
    pub package_id: Option<Uuid>,
    pub booking_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub guests: i32,
    pub total_price: f64,
    pub special_requests: Option<String>,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
}

/// Booking joined with its customer identity and item name
#[derive(Debug, FromRow)]
struct BookingRow {
    #[sqlx(flatten)]
    booking: Booking,
    user_name: Option<String>,
    user_email: Option<String>,
    item_name: Option<String>,
}

impl BookingRow {
    fn into_response(self) -> BookingResponse {
        // Guest bookings carry their own contact details
        let customer = if self.booking.user_id.is_some() {
            BookingCustomer {
                name: self.user_name,
                email: self.user_email,
            }
        } else {
            BookingCustomer {
                name: self.booking.guest_name.clone(),
                email: self.booking.guest_email.clone(),
            }
        };

        BookingResponse {
            booking: self.booking,
            customer,
            item_name: self.item_name,
        }
    }
}

/// Date span of a confirmed booking, keyed by cabin
#[derive(Debug, Clone, FromRow)]
pub struct BookingSpan {
    pub cabin_id: Option<Uuid>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

const JOINED_SELECT: &str = r#"
    SELECT b.*,
           u.name AS user_name,
           u.email AS user_email,
           COALESCE(t.name, p.name) AS item_name
    FROM bookings b
    LEFT JOIN users u ON u.id = b.user_id
    LEFT JOIN tours t ON t.id = b.tour_id
    LEFT JOIN packages p ON p.id = b.package_id
"#;

/// BookingRepository: All database operations for bookings
pub struct BookingRepository;

impl BookingRepository {
    /// Insert a new booking row
    pub async fn create(pool: &PgPool, row: &InsertBooking) -> Result<Booking, ApiError> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (
                booking_reference, user_id, tour_id, cabin_id, package_id,
                booking_type, start_date, end_date, guests, total_price,
                special_requests, guest_name, guest_email, guest_phone
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(&row.booking_reference)
        .bind(row.user_id)
        .bind(row.tour_id)
        .bind(row.cabin_id)
        .bind(row.package_id)
        .bind(&row.booking_type)
        .bind(row.start_date)
        .bind(row.end_date)
        .bind(row.guests)
        .bind(row.total_price)
        .bind(&row.special_requests)
        .bind(&row.guest_name)
        .bind(&row.guest_email)
        .bind(&row.guest_phone)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create booking: {}", e);
            ApiError::DatabaseError(e.to_string())
        })?;

        log::info!(
            "Created booking {} ({})",
            booking.booking_reference,
            booking.id
        );
        Ok(booking)
    }

    /// Retrieve one booking with customer identity and item name
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<BookingResponse, ApiError> {
        let sql = format!("{} WHERE b.id = $1", JOINED_SELECT);

        let row = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching booking: {}", e);
                ApiError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| ApiError::NotFound(id.to_string()))?;

        Ok(row.into_response())
    }

    /// All bookings, newest first (admin listing)
    pub async fn list_all(pool: &PgPool) -> Result<Vec<BookingResponse>, ApiError> {
        let sql = format!("{} ORDER BY b.created_at DESC", JOINED_SELECT);

        let rows = sqlx::query_as::<_, BookingRow>(&sql)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Booking list query error: {}", e);
                ApiError::DatabaseError(e.to_string())
            })?;

        Ok(rows.into_iter().map(BookingRow::into_response).collect())
    }

    /// Bookings belonging to one account, newest first
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<BookingResponse>, ApiError> {
        let sql = format!(
            "{} WHERE b.user_id = $1 ORDER BY b.created_at DESC",
            JOINED_SELECT
        );

        let rows = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(user_id)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("User booking list query error: {}", e);
                ApiError::DatabaseError(e.to_string())
            })?;

        Ok(rows.into_iter().map(BookingRow::into_response).collect())
    }

    /// Set the lifecycle status and return the updated joined record
    pub async fn update_status(
        pool: &PgPool,
        id: Uuid,
        status: &str,
    ) -> Result<BookingResponse, ApiError> {
        let updated =
            sqlx::query("UPDATE bookings SET status = $1, updated_at = NOW() WHERE id = $2")
                .bind(status)
                .bind(id)
                .execute(pool)
                .await
                .map_err(|e| {
                    log::error!("Status update failed for booking {}: {}", id, e);
                    ApiError::DatabaseError(e.to_string())
                })?
                .rows_affected();

        if updated == 0 {
            return Err(ApiError::NotFound(id.to_string()));
        }

        log::info!("Booking {} status -> {}", id, status);
        Self::get_by_id(pool, id).await
    }

    /// Confirmed bookings of a tour whose stay overlaps [start, end]
    /// Overlap is the closed-interval test; see availability service
    pub async fn confirmed_spans_for_tour(
        pool: &PgPool,
        tour_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<BookingSpan>, ApiError> {
        sqlx::query_as::<_, BookingSpan>(
            r#"
            SELECT cabin_id, start_date, end_date
            FROM bookings
            WHERE tour_id = $1
              AND status = 'CONFIRMED'
              AND start_date <= $3
              AND end_date >= $2
            "#,
        )
        .bind(tour_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Overlap query error for tour {}: {}", tour_id, e);
            ApiError::DatabaseError(e.to_string())
        })
    }

    /// Whether a cabin has any confirmed booking overlapping [start, end]
    pub async fn cabin_has_overlap(
        pool: &PgPool,
        cabin_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<bool, ApiError> {
        let row: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM bookings
                WHERE cabin_id = $1
                  AND status = 'CONFIRMED'
                  AND start_date <= $3
                  AND end_date >= $2
            )
            "#,
        )
        .bind(cabin_id)
        .bind(start)
        .bind(end)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Cabin overlap query error for {}: {}", cabin_id, e);
            ApiError::DatabaseError(e.to_string())
        })?;

        Ok(row.0)
    }
}

/// NotificationRepository: in-app notifications for admin users
pub struct NotificationRepository;

impl NotificationRepository {
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        notification_type: &str,
        title: &str,
        message: &str,
        data: &Value,
    ) -> Result<Notification, ApiError> {
        sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (user_id, notification_type, title, message, data)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(notification_type)
        .bind(title)
        .bind(message)
        .bind(data)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create notification: {}", e);
            ApiError::DatabaseError(e.to_string())
        })
    }

    /// Notifications for one account, unread first
    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Notification>, ApiError> {
        sqlx::query_as::<_, Notification>(
            r#"
            SELECT * FROM notifications
            WHERE user_id = $1
            ORDER BY read ASC, created_at DESC
            LIMIT 100
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list notifications: {}", e);
            ApiError::DatabaseError(e.to_string())
        })
    }

    pub async fn mark_read(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<(), ApiError> {
        let rows = sqlx::query(
            "UPDATE notifications SET read = true WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to mark notification read: {}", e);
            ApiError::DatabaseError(e.to_string())
        })?
        .rows_affected();

        if rows == 0 {
            return Err(ApiError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
