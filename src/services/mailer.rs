// src/services/mailer.rs
// DOCUMENTATION: Transactional email client
// PURPOSE: Handle communication with the HTTP mail API for booking emails

use crate::config::Config;
use crate::errors::ApiError;
use crate::models::BookingResponse;
use reqwest::Client;
use serde::Serialize;

/// HTTP mail API client
/// DOCUMENTATION: Sends transactional email through a JSON POST endpoint.
/// Booking flows treat every send as best-effort: failures are logged
/// and never bubble into the originating request.
pub struct Mailer {
    /// HTTP client for making requests
    client: Client,
    /// Mail API endpoint; empty disables sending
    api_url: String,
    /// Mail API key
    api_key: String,
    /// Sender address
    from: String,
    /// Admin notification recipients
    admin_recipients: Vec<String>,
}

/// Outbound message payload
#[derive(Debug, Serialize)]
struct MailPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

impl Mailer {
    pub fn from_config(config: &Config) -> Self {
        Mailer {
            client: Client::new(),
            api_url: config.mail_api_url.clone(),
            api_key: config.mail_api_key.clone(),
            from: config.mail_from.clone(),
            admin_recipients: config.admin_email_list(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.api_url.is_empty()
    }

    /// POST one message to the mail API
    async fn send(&self, to: &str, subject: &str, text: &str) -> Result<(), ApiError> {
        if !self.is_enabled() {
            log::debug!("Mail disabled, skipping '{}' to {}", subject, to);
            return Ok(());
        }

        let payload = MailPayload {
            from: &self.from,
            to,
            subject,
            text,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ApiError::ExternalApiError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::ExternalApiError(format!(
                "mail API returned {}",
                response.status()
            )));
        }

        Ok(())
    }

    /// Best-effort send: log the outcome, swallow the error
    async fn send_or_log(&self, to: &str, subject: &str, text: &str) {
        match self.send(to, subject, text).await {
            Ok(()) => log::info!("Sent '{}' to {}", subject, to),
            Err(e) => log::warn!("Failed to send '{}' to {}: {}", subject, to, e),
        }
    }

    /// Confirmation to the customer plus an alert to every admin address
    pub async fn send_booking_created(&self, booking: &BookingResponse) {
        let reference = &booking.booking.booking_reference;

        if let Some(email) = booking.customer.email.as_deref() {
            let subject = format!("Booking received - {}", reference);
            let text = customer_booking_body(booking);
            self.send_or_log(email, &subject, &text).await;
        } else {
            log::warn!("Booking {} has no customer email", reference);
        }

        let subject = format!("New booking received - {}", reference);
        let text = admin_booking_body(booking);
        for admin in &self.admin_recipients {
            self.send_or_log(admin, &subject, &text).await;
        }
    }

    /// Status-change notice to the customer
    pub async fn send_status_update(&self, booking: &BookingResponse) {
        if let Some(email) = booking.customer.email.as_deref() {
            let subject = format!(
                "Booking update - {}",
                booking.booking.booking_reference
            );
            let text = format!(
                "Hello {},\n\nYour booking {} is now {}.\n",
                booking.customer.name.as_deref().unwrap_or("Guest"),
                booking.booking.booking_reference,
                booking.booking.status
            );
            self.send_or_log(email, &subject, &text).await;
        }
    }

    /// Cancellation notice to the customer
    pub async fn send_cancellation(&self, booking: &BookingResponse) {
        if let Some(email) = booking.customer.email.as_deref() {
            let subject = format!(
                "Booking cancelled - {}",
                booking.booking.booking_reference
            );
            let text = format!(
                "Hello {},\n\nYour booking {} for {} has been cancelled.\n",
                booking.customer.name.as_deref().unwrap_or("Guest"),
                booking.booking.booking_reference,
                booking.item_name.as_deref().unwrap_or("your trip")
            );
            self.send_or_log(email, &subject, &text).await;
        }
    }
}

fn customer_booking_body(booking: &BookingResponse) -> String {
    format!(
        "Hello {},\n\n\
         Thank you for booking {}.\n\
         Reference: {}\n\
         Dates: {} to {}\n\
         Guests: {}\n\
         Total: ${:.2}\n\n\
         We will confirm your booking shortly.\n",
        booking.customer.name.as_deref().unwrap_or("Guest"),
        booking.item_name.as_deref().unwrap_or("your trip"),
        booking.booking.booking_reference,
        booking.booking.start_date,
        booking.booking.end_date,
        booking.booking.guests,
        booking.booking.total_price
    )
}

fn admin_booking_body(booking: &BookingResponse) -> String {
    format!(
        "New {} booking {}\n\
         Customer: {} <{}>\n\
         Item: {}\n\
         Dates: {} to {}\n\
         Guests: {}\n\
         Total: ${:.2}\n",
        booking.booking.booking_type,
        booking.booking.booking_reference,
        booking.customer.name.as_deref().unwrap_or("Guest"),
        booking.customer.email.as_deref().unwrap_or("unknown"),
        booking.item_name.as_deref().unwrap_or("unknown"),
        booking.booking.start_date,
        booking.booking.end_date,
        booking.booking.guests,
        booking.booking.total_price
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Booking, BookingCustomer};
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_booking() -> BookingResponse {
        BookingResponse {
            booking: Booking {
                id: Uuid::new_v4(),
                booking_reference: "BK-TEST1234".to_string(),
                user_id: None,
                tour_id: Some(Uuid::new_v4()),
                cabin_id: None,
                package_id: None,
                booking_type: "TOUR".to_string(),
                start_date: "2026-03-10".parse().unwrap(),
                end_date: "2026-03-15".parse().unwrap(),
                guests: 2,
                total_price: 1500.0,
                status: "PENDING".to_string(),
                special_requests: None,
                guest_name: Some("Nadia".to_string()),
                guest_email: Some("nadia@example.com".to_string()),
                guest_phone: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            customer: BookingCustomer {
                name: Some("Nadia".to_string()),
                email: Some("nadia@example.com".to_string()),
            },
            item_name: Some("Queen Cleopatra".to_string()),
        }
    }

    #[test]
    fn test_customer_body_mentions_reference_and_total() {
        let body = customer_booking_body(&sample_booking());
        assert!(body.contains("BK-TEST1234"));
        assert!(body.contains("$1500.00"));
        assert!(body.contains("Queen Cleopatra"));
    }

    #[test]
    fn test_admin_body_mentions_customer() {
        let body = admin_booking_body(&sample_booking());
        assert!(body.contains("Nadia"));
        assert!(body.contains("nadia@example.com"));
        assert!(body.contains("TOUR"));
    }

    #[tokio::test]
    async fn test_disabled_mailer_is_noop() {
        let mut config = Config::from_env();
        config.mail_api_url = String::new();
        let mailer = Mailer::from_config(&config);

        assert!(!mailer.is_enabled());
        // Must return Ok without any network attempt
        assert!(mailer.send("x@example.com", "subject", "body").await.is_ok());
    }
}
