//! Location Extra-Entry
//!
//! The first consumer of the session's `extra` side channel: a cached
//! device geolocation fix with a deterministic expiry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cached geolocation entry stored under `extra["location"]`
///
/// A failed device query is cached too (`success: false` with an error
/// message) so repeated failures don't hammer the device sensor within
/// the TTL window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationEntry {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(rename = "validUntil")]
    pub valid_until: DateTime<Utc>,
}

impl LocationEntry {
    /// A successful fix, valid until `now + ttl`
    pub fn fix(latitude: f64, longitude: f64, valid_until: DateTime<Utc>) -> Self {
        Self {
            success: true,
            error: None,
            latitude: Some(latitude),
            longitude: Some(longitude),
            valid_until,
        }
    }

    /// A time-boxed negative entry for a denied or failed device query
    pub fn failure(error: impl Into<String>, valid_until: DateTime<Utc>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            latitude: None,
            longitude: None,
            valid_until,
        }
    }

    /// Usable only while it has numeric coordinates and `now < validUntil`
    ///
    /// Staleness is pure wall-clock comparison; there is no sweep.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.latitude.is_some() && self.longitude.is_some() && now < self.valid_until
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_fix_is_fresh_until_valid_until() {
        let now = Utc::now();
        let entry = LocationEntry::fix(1.0, 2.0, now + Duration::seconds(60));
        assert!(entry.is_fresh(now));
        assert!(!entry.is_fresh(now + Duration::seconds(61)));
    }

    #[test]
    fn test_failure_entry_never_fresh() {
        let now = Utc::now();
        let entry = LocationEntry::failure("denied", now + Duration::seconds(60));
        assert!(!entry.is_fresh(now));
    }

    #[test]
    fn test_wire_format() {
        let entry = LocationEntry::fix(1.5, -2.5, "2099-01-01T00:00:00Z".parse().unwrap());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["latitude"], 1.5);
        assert_eq!(json["validUntil"], "2099-01-01T00:00:00Z");
        assert!(json.get("error").is_none());
    }
}
