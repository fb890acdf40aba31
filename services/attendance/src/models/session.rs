//! Session model and related payloads

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Wire format for expiry and attendance timestamps.
///
/// Timestamps are naive local instants compared against the local clock with
/// no UTC normalization; changing this silently shifts pass/fail outcomes at
/// deployment boundaries.
pub const WIRE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Serde adapter that keeps timestamps in the wire format on both directions.
pub mod wire_time {
    use super::WIRE_TIME_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(WIRE_TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, WIRE_TIME_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Session entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub location_lat: f64,
    pub location_long: f64,
    #[serde(with = "wire_time")]
    pub expiry_time: NaiveDateTime,
    pub created_by: i64,
}

/// New session creation payload, already validated by the registry
#[derive(Debug, Clone)]
pub struct NewSession {
    pub code: String,
    pub name: String,
    pub location_lat: f64,
    pub location_long: f64,
    pub expiry_time: NaiveDateTime,
    pub created_by: i64,
}

/// Request to create a session.
///
/// Every field is optional at the wire so that the registry can report all
/// the missing keys in one validation error instead of a deserialization 422.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionRequest {
    pub session_name: Option<String>,
    pub location_lat: Option<f64>,
    pub location_long: Option<f64>,
    pub expiry_time: Option<String>,
    pub created_by: Option<i64>,
}

/// Response for session creation
#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub id: i64,
    pub code: String,
}

/// Full session representation for listing endpoints
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: i64,
    pub session_code: String,
    pub session_name: String,
    pub location_lat: f64,
    pub location_long: f64,
    pub expiry_time: String,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        SessionResponse {
            id: session.id,
            session_code: session.code,
            session_name: session.name,
            location_lat: session.location_lat,
            location_long: session.location_long,
            expiry_time: session.expiry_time.format(WIRE_TIME_FORMAT).to_string(),
        }
    }
}

/// Request to create a session distributed as a QR image
#[derive(Debug, Clone, Deserialize)]
pub struct QrSessionRequest {
    pub session_name: Option<String>,
    pub location_lat: Option<f64>,
    pub location_long: Option<f64>,
    /// Minutes from now until expiry (default 5)
    pub expiry_minutes: Option<i64>,
    pub created_by: Option<i64>,
}

/// Response carrying the base64-encoded QR image for a fresh session
#[derive(Debug, Serialize)]
pub struct QrSessionResponse {
    pub qr_code: String,
    pub session_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn wire_time_round_trips_through_the_fixed_pattern() {
        let expiry = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let session = Session {
            id: 1,
            code: "SESSION_1748770200".to_string(),
            name: "Morning lecture".to_string(),
            location_lat: 20.2961,
            location_long: 85.8245,
            expiry_time: expiry,
            created_by: 7,
        };

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["expiry_time"], "2025-06-01 09:30:00");

        let back: Session = serde_json::from_value(json).unwrap();
        assert_eq!(back.expiry_time, expiry);
    }

    #[test]
    fn create_request_tolerates_missing_keys() {
        let req: CreateSessionRequest = serde_json::from_str("{}").unwrap();
        assert!(req.session_name.is_none());
        assert!(req.expiry_time.is_none());
        assert!(req.created_by.is_none());
    }
}
