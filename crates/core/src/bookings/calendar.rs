//! Booking conflict filter and the views built on it.

use std::collections::BTreeMap;

use carrental_shared::types::BookingId;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::BookingError;
use super::types::Booking;

/// Returns the bookings whose inclusive date range contains `date`.
///
/// Every overlapping booking is returned, in input order.
#[must_use]
pub fn bookings_on(bookings: &[Booking], date: NaiveDate) -> Vec<&Booking> {
    bookings.iter().filter(|b| b.covers(date)).collect()
}

/// Whether a day has any booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OccupancyStatus {
    /// At least one booking covers the day.
    Booked,
    /// No booking covers the day.
    Available,
}

/// Occupancy of a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOccupancy {
    /// The day.
    pub date: NaiveDate,
    /// Booked or available.
    pub status: OccupancyStatus,
    /// Bookings covering the day.
    pub booking_ids: Vec<BookingId>,
}

/// Day-by-day occupancy for one calendar month.
///
/// # Errors
///
/// Returns `BookingError::InvalidMonth` if `year`/`month` is not a real month.
pub fn month_occupancy(
    bookings: &[Booking],
    year: i32,
    month: u32,
) -> Result<Vec<DayOccupancy>, BookingError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(BookingError::InvalidMonth { year, month })?;

    let days = first
        .iter_days()
        .take_while(|d| d.month() == month)
        .map(|date| {
            let booking_ids: Vec<BookingId> = bookings_on(bookings, date).iter().map(|b| b.id).collect();
            let status = if booking_ids.is_empty() {
                OccupancyStatus::Available
            } else {
                OccupancyStatus::Booked
            };
            DayOccupancy {
                date,
                status,
                booking_ids,
            }
        })
        .collect();

    Ok(days)
}

/// Upcoming bookings that start in the same calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBookings {
    /// Display label, e.g. "June 2024".
    pub label: String,
    /// Calendar year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
    /// Bookings ordered by pick-up time.
    pub bookings: Vec<Booking>,
}

/// Groups bookings that have not ended before `today` by the month they start in.
///
/// Groups are chronological; bookings inside a group are ordered by pick-up time.
#[must_use]
pub fn group_upcoming_by_month(bookings: &[Booking], today: NaiveDate) -> Vec<MonthBookings> {
    let mut upcoming: Vec<&Booking> = bookings.iter().filter(|b| b.end_date >= today).collect();
    upcoming.sort_by_key(|b| b.starts_at());

    let mut groups: BTreeMap<(i32, u32), Vec<Booking>> = BTreeMap::new();
    for booking in upcoming {
        groups
            .entry((booking.start_date.year(), booking.start_date.month()))
            .or_default()
            .push(booking.clone());
    }

    groups
        .into_iter()
        .map(|((year, month), bookings)| MonthBookings {
            label: month_label(year, month),
            year,
            month,
            bookings,
        })
        .collect()
}

fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{year}-{month}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookings::types::BookingContact;
    use carrental_shared::types::CarId;
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn booking(start: NaiveDate, end: NaiveDate) -> Booking {
        Booking {
            id: BookingId::new(),
            car_id: CarId::new(),
            car_name: "Probox".to_string(),
            car_type: "Wagon".to_string(),
            start_date: start,
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_date: end,
            end_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            destination: "Nakuru".to_string(),
            contact: BookingContact {
                name: "Otieno".to_string(),
                email: "otieno@example.com".to_string(),
                phone: None,
            },
        }
    }

    #[test]
    fn test_booking_covering_date_is_returned() {
        let bookings = vec![booking(date(2024, 6, 1), date(2024, 6, 5))];

        assert_eq!(bookings_on(&bookings, date(2024, 6, 3)).len(), 1);
        assert_eq!(bookings_on(&bookings, date(2024, 6, 1)).len(), 1);
        assert_eq!(bookings_on(&bookings, date(2024, 6, 5)).len(), 1);
        assert!(bookings_on(&bookings, date(2024, 6, 6)).is_empty());
    }

    #[test]
    fn test_overlapping_bookings_all_returned_in_order() {
        let a = booking(date(2024, 6, 1), date(2024, 6, 10));
        let b = booking(date(2024, 6, 3), date(2024, 6, 3));
        let c = booking(date(2024, 6, 4), date(2024, 6, 8));
        let bookings = vec![a.clone(), b.clone(), c];

        let hits: Vec<BookingId> = bookings_on(&bookings, date(2024, 6, 3)).iter().map(|b| b.id).collect();
        assert_eq!(hits, vec![a.id, b.id]);
    }

    #[test]
    fn test_month_occupancy() {
        let spanning = booking(date(2024, 1, 28), date(2024, 2, 2));
        let days = month_occupancy(&[spanning.clone()], 2024, 2).unwrap();

        assert_eq!(days.len(), 29);
        assert_eq!(days[0].status, OccupancyStatus::Booked);
        assert_eq!(days[0].booking_ids, vec![spanning.id]);
        assert_eq!(days[1].status, OccupancyStatus::Booked);
        assert_eq!(days[2].status, OccupancyStatus::Available);
        assert!(days[28].booking_ids.is_empty());
    }

    #[test]
    fn test_month_occupancy_rejects_bad_month() {
        assert_eq!(
            month_occupancy(&[], 2024, 13),
            Err(BookingError::InvalidMonth {
                year: 2024,
                month: 13
            })
        );
    }

    #[test]
    fn test_group_upcoming_by_month() {
        let past = booking(date(2024, 5, 1), date(2024, 5, 3));
        let ongoing = booking(date(2024, 5, 30), date(2024, 6, 2));
        let july = booking(date(2024, 7, 4), date(2024, 7, 6));
        let june = booking(date(2024, 6, 15), date(2024, 6, 16));
        let today = date(2024, 6, 1);

        let groups = group_upcoming_by_month(&[july.clone(), past, june.clone(), ongoing.clone()], today);

        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["May 2024", "June 2024", "July 2024"]);
        assert_eq!(groups[0].bookings, vec![ongoing]);
        assert_eq!(groups[1].bookings, vec![june]);
        assert_eq!(groups[2].bookings, vec![july]);
    }
}
