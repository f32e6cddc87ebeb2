// src/services/availability.rs
// DOCUMENTATION: Availability-checking subsystem
// PURPOSE: Date-range overlap detection against confirmed bookings,
// cabin capacity filtering, and calendar generation for the booking flow

use crate::db::{BookingRepository, BookingSpan, CabinRepository, TourRepository};
use crate::errors::ApiError;
use crate::models::{
    AvailabilityCalendar, AvailabilityRequest, AvailabilityResult, AvailableCabin, Cabin,
    CalendarQuery,
};
use chrono::{Duration, NaiveDate};
use sqlx::PgPool;

pub struct AvailabilityService;

impl AvailabilityService {
    /// Check which cabins of a tour are open for a date range
    /// Used by POST /availability; booking creation runs the same
    /// overlap test per cabin before accepting a reservation
    pub async fn check(
        pool: &PgPool,
        req: &AvailabilityRequest,
    ) -> Result<AvailabilityResult, ApiError> {
        validate_range(req.start_date, req.end_date)?;
        if req.guests < 1 {
            return Err(ApiError::ValidationError(
                "guests must be at least 1".to_string(),
            ));
        }

        // Unknown or soft-deleted tours 404 before any cabin work
        TourRepository::get_by_id(pool, req.tour_id).await?;

        let cabins = CabinRepository::list_by_tour(pool, req.tour_id).await?;
        let spans = BookingRepository::confirmed_spans_for_tour(
            pool,
            req.tour_id,
            req.start_date,
            req.end_date,
        )
        .await?;

        let nights = nights_between(req.start_date, req.end_date);
        let available_cabins = filter_available(&cabins, &spans, req.guests);
        let total_price: f64 = available_cabins
            .iter()
            .map(|c| c.price * nights as f64)
            .sum();

        log::info!(
            "Availability for tour {}: {}/{} cabins open over {} nights",
            req.tour_id,
            available_cabins.len(),
            cabins.len(),
            nights
        );

        Ok(AvailabilityResult {
            is_available: !available_cabins.is_empty(),
            available_cabins,
            nights,
            total_price,
        })
    }

    /// Day-by-day availability for one month
    /// A day is closed when any confirmed booking covers it
    pub async fn calendar(
        pool: &PgPool,
        query: &CalendarQuery,
    ) -> Result<AvailabilityCalendar, ApiError> {
        let (month_start, month_end) = month_bounds(query.year, query.month)?;

        TourRepository::get_by_id(pool, query.tour_id).await?;

        let spans = BookingRepository::confirmed_spans_for_tour(
            pool,
            query.tour_id,
            month_start,
            month_end,
        )
        .await?;

        Ok(build_calendar(month_start, month_end, &spans))
    }
}

/// Closed-interval overlap test between two date ranges.
/// Covers partial overlap at either edge and full containment.
pub fn ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && a_end >= b_start
}

/// Number of nights in a stay, never below 1
pub fn nights_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days().max(1)
}

/// Reject inverted or zero-length ranges
pub fn validate_range(start: NaiveDate, end: NaiveDate) -> Result<(), ApiError> {
    if end <= start {
        return Err(ApiError::ValidationError(
            "end_date must be after start_date".to_string(),
        ));
    }
    Ok(())
}

/// A cabin is open when it holds enough guests and none of the
/// overlapping confirmed bookings is pinned to it
pub fn filter_available(
    cabins: &[Cabin],
    spans: &[BookingSpan],
    guests: i32,
) -> Vec<AvailableCabin> {
    cabins
        .iter()
        .filter(|cabin| {
            let booked = spans.iter().any(|s| s.cabin_id == Some(cabin.id));
            !booked && cabin.capacity >= guests
        })
        .map(|cabin| AvailableCabin {
            id: cabin.id,
            name: cabin.name.clone(),
            price: cabin.price,
            capacity: cabin.capacity,
        })
        .collect()
}

/// First and last day of a calendar month
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), ApiError> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| ApiError::ValidationError(format!("invalid month {}/{}", month, year)))?;

    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or(ApiError::InternalError)?;

    Ok((start, next_month - Duration::days(1)))
}

/// Walk the month day by day and mark each date open/closed
pub fn build_calendar(
    start: NaiveDate,
    end: NaiveDate,
    spans: &[BookingSpan],
) -> AvailabilityCalendar {
    let mut calendar = AvailabilityCalendar::new();
    let mut day = start;

    while day <= end {
        let booked = spans
            .iter()
            .any(|s| day >= s.start_date && day <= s.end_date);
        calendar.insert(day.format("%Y-%m-%d").to_string(), !booked);
        day = day + Duration::days(1);
    }

    calendar
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn cabin(name: &str, capacity: i32, price: f64) -> Cabin {
        Cabin {
            id: Uuid::new_v4(),
            tour_id: Uuid::new_v4(),
            name: name.to_string(),
            price,
            capacity,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn span(cabin_id: Option<Uuid>, start: &str, end: &str) -> BookingSpan {
        BookingSpan {
            cabin_id,
            start_date: date(start),
            end_date: date(end),
        }
    }

    #[test]
    fn test_overlap_at_edges() {
        // Request 10th-15th against booking touching each edge
        assert!(ranges_overlap(
            date("2026-03-08"),
            date("2026-03-10"),
            date("2026-03-10"),
            date("2026-03-15")
        ));
        assert!(ranges_overlap(
            date("2026-03-15"),
            date("2026-03-18"),
            date("2026-03-10"),
            date("2026-03-15")
        ));
    }

    #[test]
    fn test_overlap_containment() {
        // Booking entirely inside the requested range still collides
        assert!(ranges_overlap(
            date("2026-03-11"),
            date("2026-03-13"),
            date("2026-03-10"),
            date("2026-03-15")
        ));
        // And the reverse: request inside an existing booking
        assert!(ranges_overlap(
            date("2026-03-01"),
            date("2026-03-30"),
            date("2026-03-10"),
            date("2026-03-15")
        ));
    }

    #[test]
    fn test_no_overlap_when_disjoint() {
        assert!(!ranges_overlap(
            date("2026-03-01"),
            date("2026-03-05"),
            date("2026-03-06"),
            date("2026-03-10")
        ));
    }

    #[test]
    fn test_nights_between() {
        assert_eq!(nights_between(date("2026-03-10"), date("2026-03-15")), 5);
        assert_eq!(nights_between(date("2026-03-10"), date("2026-03-11")), 1);
        // Degenerate input still prices at least one night
        assert_eq!(nights_between(date("2026-03-10"), date("2026-03-10")), 1);
    }

    #[test]
    fn test_validate_range_rejects_inverted() {
        assert!(validate_range(date("2026-03-10"), date("2026-03-09")).is_err());
        assert!(validate_range(date("2026-03-10"), date("2026-03-10")).is_err());
        assert!(validate_range(date("2026-03-10"), date("2026-03-11")).is_ok());
    }

    #[test]
    fn test_filter_available_by_capacity() {
        let small = cabin("Single", 1, 100.0);
        let large = cabin("Family Suite", 4, 300.0);

        let open = filter_available(&[small, large.clone()], &[], 3);

        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, large.id);
    }

    #[test]
    fn test_filter_available_excludes_booked_cabin() {
        let a = cabin("Nile View", 2, 200.0);
        let b = cabin("Upper Deck", 2, 250.0);
        let spans = vec![span(Some(a.id), "2026-03-10", "2026-03-15")];

        let open = filter_available(&[a, b.clone()], &spans, 2);

        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, b.id);
    }

    #[test]
    fn test_filter_available_ignores_unpinned_spans() {
        // A booking without a cabin does not block individual cabins
        let a = cabin("Nile View", 2, 200.0);
        let spans = vec![span(None, "2026-03-10", "2026-03-15")];

        let open = filter_available(&[a], &spans, 2);
        assert_eq!(open.len(), 1);
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(
            month_bounds(2026, 3).unwrap(),
            (date("2026-03-01"), date("2026-03-31"))
        );
        // December rolls into the next year
        assert_eq!(
            month_bounds(2026, 12).unwrap(),
            (date("2026-12-01"), date("2026-12-31"))
        );
        // Leap February
        assert_eq!(
            month_bounds(2028, 2).unwrap(),
            (date("2028-02-01"), date("2028-02-29"))
        );
        assert!(month_bounds(2026, 13).is_err());
    }

    #[test]
    fn test_build_calendar_marks_booked_days() {
        let (start, end) = month_bounds(2026, 3).unwrap();
        let spans = vec![span(Some(Uuid::new_v4()), "2026-03-10", "2026-03-12")];

        let calendar = build_calendar(start, end, &spans);

        assert_eq!(calendar.len(), 31);
        assert_eq!(calendar["2026-03-09"], true);
        assert_eq!(calendar["2026-03-10"], false);
        assert_eq!(calendar["2026-03-11"], false);
        assert_eq!(calendar["2026-03-12"], false);
        assert_eq!(calendar["2026-03-13"], true);
    }

    #[test]
    fn test_build_calendar_clips_to_month() {
        // Booking straddling the month edge closes only in-month days
        let (start, end) = month_bounds(2026, 3).unwrap();
        let spans = vec![span(None, "2026-02-20", "2026-03-02")];

        let calendar = build_calendar(start, end, &spans);

        assert_eq!(calendar["2026-03-01"], false);
        assert_eq!(calendar["2026-03-02"], false);
        assert_eq!(calendar["2026-03-03"], true);
        assert!(!calendar.contains_key("2026-02-28"));
    }
}
