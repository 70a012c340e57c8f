//! Calendar and time-of-day feature decomposition
//!
//! Conventions here are part of the frozen artifact contract and must
//! match what the transform was fitted with. In particular the weekday
//! index is Monday = 0 (pandas `dt.dayofweek`); the transform artifact
//! records this as `weekday_zero = "monday"` and loading rejects any
//! other value rather than guessing.

use crate::types::ParsedQuery;
use chrono::{Datelike, Timelike};

/// Numeric features derived from the journey date, the two times of day,
/// and the duration. Values are plain (unconditioned) numerics; the
/// conditioner applies the frozen clamp/scale afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemporalFeatures {
    pub journey_day: f64,
    pub journey_month: f64,
    /// Monday = 0 .. Sunday = 6
    pub journey_weekday: f64,
    pub dep_hour: f64,
    pub dep_minute: f64,
    pub arrival_hour: f64,
    pub arrival_minute: f64,
    /// Whole hours of the duration (`minutes / 60`)
    pub duration_hours: f64,
    /// Minute remainder of the duration (`minutes % 60`)
    pub duration_minutes: f64,
}

impl TemporalFeatures {
    /// Feature names in decomposition order, matching the names the
    /// transform artifact uses for these columns.
    pub const NAMES: [&'static str; 9] = [
        "journey_day",
        "journey_month",
        "journey_weekday",
        "dep_hour",
        "dep_minute",
        "arrival_hour",
        "arrival_minute",
        "duration_hours",
        "duration_minutes",
    ];

    /// `(name, value)` pairs in decomposition order.
    pub fn named(&self) -> [(&'static str, f64); 9] {
        [
            ("journey_day", self.journey_day),
            ("journey_month", self.journey_month),
            ("journey_weekday", self.journey_weekday),
            ("dep_hour", self.dep_hour),
            ("dep_minute", self.dep_minute),
            ("arrival_hour", self.arrival_hour),
            ("arrival_minute", self.arrival_minute),
            ("duration_hours", self.duration_hours),
            ("duration_minutes", self.duration_minutes),
        ]
    }
}

/// Decompose a validated query into temporal features.
///
/// Expects an already range-checked query: duration positivity and
/// date/time syntax are enforced by [`crate::types::FlightQuery::parse`]
/// before any decomposition happens.
pub fn decompose(query: &ParsedQuery) -> TemporalFeatures {
    TemporalFeatures {
        journey_day: f64::from(query.journey_date.day()),
        journey_month: f64::from(query.journey_date.month()),
        journey_weekday: f64::from(query.journey_date.weekday().num_days_from_monday()),
        dep_hour: f64::from(query.dep_time.hour()),
        dep_minute: f64::from(query.dep_time.minute()),
        arrival_hour: f64::from(query.arrival_time.hour()),
        arrival_minute: f64::from(query.arrival_time.minute()),
        duration_hours: (query.duration_minutes / 60) as f64,
        duration_minutes: (query.duration_minutes % 60) as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn query(date: (i32, u32, u32), dep: (u32, u32), arr: (u32, u32), dur: i64) -> ParsedQuery {
        ParsedQuery {
            journey_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            dep_time: NaiveTime::from_hms_opt(dep.0, dep.1, 0).unwrap(),
            arrival_time: NaiveTime::from_hms_opt(arr.0, arr.1, 0).unwrap(),
            duration_minutes: dur,
            total_stops: 0,
        }
    }

    #[test]
    fn decomposes_scenario_query() {
        // 2024-01-15 is a Monday.
        let features = decompose(&query((2024, 1, 15), (10, 30), (12, 45), 135));
        assert_eq!(features.journey_day, 15.0);
        assert_eq!(features.journey_month, 1.0);
        assert_eq!(features.journey_weekday, 0.0);
        assert_eq!(features.dep_hour, 10.0);
        assert_eq!(features.dep_minute, 30.0);
        assert_eq!(features.arrival_hour, 12.0);
        assert_eq!(features.arrival_minute, 45.0);
        assert_eq!(features.duration_hours, 2.0);
        assert_eq!(features.duration_minutes, 15.0);
    }

    #[test]
    fn weekday_is_monday_zero() {
        // 2024-01-21 is a Sunday.
        let sunday = decompose(&query((2024, 1, 21), (0, 0), (1, 0), 60));
        assert_eq!(sunday.journey_weekday, 6.0);
    }

    #[test]
    fn duration_split_is_floor_and_remainder() {
        let features = decompose(&query((2024, 6, 1), (6, 0), (7, 0), 59));
        assert_eq!(features.duration_hours, 0.0);
        assert_eq!(features.duration_minutes, 59.0);

        let features = decompose(&query((2024, 6, 1), (6, 0), (7, 0), 60));
        assert_eq!(features.duration_hours, 1.0);
        assert_eq!(features.duration_minutes, 0.0);
    }

    #[test]
    fn named_order_matches_names_constant() {
        let features = decompose(&query((2024, 3, 8), (5, 10), (9, 20), 250));
        for (pair, name) in features.named().iter().zip(TemporalFeatures::NAMES) {
            assert_eq!(pair.0, name);
        }
    }

    #[test]
    fn decomposition_is_deterministic() {
        let q = query((2024, 11, 3), (22, 15), (1, 40), 205);
        assert_eq!(decompose(&q), decompose(&q));
    }
}
