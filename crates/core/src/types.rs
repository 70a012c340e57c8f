//! Request and response data structures

use crate::errors::PredictError;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Raw prediction request, field names matching the HTTP contract.
///
/// `duration` and `total_stops` are kept signed so that out-of-range
/// values arrive here and are rejected with a typed error instead of
/// failing JSON deserialization with an opaque message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightQuery {
    pub airline: String,
    /// Journey date, ISO `YYYY-MM-DD`
    pub date_of_journey: String,
    pub source: String,
    pub destination: String,
    /// Departure time of day, 24-hour `HH:MM`
    pub dep_time: String,
    /// Arrival time of day, 24-hour `HH:MM`
    pub arrival_time: String,
    /// Flight duration in minutes, must be positive
    pub duration: i64,
    /// Number of stops, must be non-negative
    pub total_stops: i64,
    pub additional_info: String,
}

/// Categorical field names the pipeline binds query values to.
pub const CATEGORICAL_FIELDS: [&str; 4] = ["airline", "source", "destination", "additional_info"];

/// A `FlightQuery` whose date/time/numeric fields have been parsed and
/// range-checked. Categorical fields are validated separately against
/// the catalog.
#[derive(Debug, Clone, Copy)]
pub struct ParsedQuery {
    pub journey_date: NaiveDate,
    pub dep_time: NaiveTime,
    pub arrival_time: NaiveTime,
    pub duration_minutes: i64,
    pub total_stops: i64,
}

impl FlightQuery {
    /// Parse and range-check the non-categorical fields.
    ///
    /// Rejects before any feature work happens: a query failing here
    /// never reaches encoding or scaling.
    pub fn parse(&self) -> Result<ParsedQuery, PredictError> {
        let journey_date = NaiveDate::parse_from_str(&self.date_of_journey, "%Y-%m-%d")
            .map_err(|e| {
                PredictError::invalid_input(format!(
                    "date_of_journey {:?} is not a valid ISO date: {e}",
                    self.date_of_journey
                ))
            })?;
        let dep_time = parse_clock("dep_time", &self.dep_time)?;
        let arrival_time = parse_clock("arrival_time", &self.arrival_time)?;

        if self.duration <= 0 {
            return Err(PredictError::invalid_input(format!(
                "duration must be a positive number of minutes, got {}",
                self.duration
            )));
        }
        if self.total_stops < 0 {
            return Err(PredictError::invalid_input(format!(
                "total_stops must be non-negative, got {}",
                self.total_stops
            )));
        }

        Ok(ParsedQuery {
            journey_date,
            dep_time,
            arrival_time,
            duration_minutes: self.duration,
            total_stops: self.total_stops,
        })
    }

    /// Categorical `(field, value)` pairs in catalog field order.
    pub fn categorical_values(&self) -> [(&'static str, &str); 4] {
        [
            ("airline", self.airline.as_str()),
            ("source", self.source.as_str()),
            ("destination", self.destination.as_str()),
            ("additional_info", self.additional_info.as_str()),
        ]
    }
}

fn parse_clock(field: &str, value: &str) -> Result<NaiveTime, PredictError> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|e| {
        PredictError::invalid_input(format!("{field} {value:?} is not a valid HH:MM time: {e}"))
    })
}

/// Scalar prediction plus a human-readable status message.
/// Returned per request and discarded; no further lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionResult {
    pub predicted_price: f64,
    pub message: String,
}

/// Vocabulary projection for client choice lists.
/// Order is a display hint only; encoding uses the frozen vocabulary order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DropdownOptions {
    pub airlines: Vec<String>,
    pub sources: Vec<String>,
    pub destinations: Vec<String>,
    pub additional_info: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_query() -> FlightQuery {
        FlightQuery {
            airline: "Air India".to_string(),
            date_of_journey: "2024-01-15".to_string(),
            source: "Banglore".to_string(),
            destination: "New Delhi".to_string(),
            dep_time: "10:30".to_string(),
            arrival_time: "12:45".to_string(),
            duration: 135,
            total_stops: 0,
            additional_info: "No info".to_string(),
        }
    }

    #[test]
    fn parses_valid_query() {
        let parsed = valid_query().parse().unwrap();
        assert_eq!(parsed.journey_date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(parsed.dep_time, NaiveTime::from_hms_opt(10, 30, 0).unwrap());
        assert_eq!(parsed.arrival_time, NaiveTime::from_hms_opt(12, 45, 0).unwrap());
        assert_eq!(parsed.duration_minutes, 135);
        assert_eq!(parsed.total_stops, 0);
    }

    #[test]
    fn rejects_non_positive_duration() {
        let mut query = valid_query();
        query.duration = -5;
        assert!(matches!(query.parse(), Err(PredictError::InvalidInput(_))));

        query.duration = 0;
        assert!(matches!(query.parse(), Err(PredictError::InvalidInput(_))));
    }

    #[test]
    fn rejects_negative_stops() {
        let mut query = valid_query();
        query.total_stops = -1;
        assert!(matches!(query.parse(), Err(PredictError::InvalidInput(_))));
    }

    #[test]
    fn rejects_malformed_date() {
        let mut query = valid_query();
        query.date_of_journey = "15-01-2024".to_string();
        assert!(matches!(query.parse(), Err(PredictError::InvalidInput(_))));
    }

    #[test]
    fn rejects_malformed_time() {
        let mut query = valid_query();
        query.dep_time = "25:99".to_string();
        let err = query.parse().unwrap_err();
        assert!(err.to_string().contains("dep_time"));
    }
}
