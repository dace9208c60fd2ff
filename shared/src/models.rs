//! Shared data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored note for one calendar date.
///
/// The serialized camelCase form is both the stored JSON value and the wire
/// shape returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Assignment text.
    pub content: String,
    /// Calendar date (`YYYY-MM-DD`), also the storage key.
    pub date: String,
    /// Set once, at the first write for this date.
    pub created_at: DateTime<Utc>,
    /// Set on every write.
    pub updated_at: DateTime<Utc>,
}

impl Assignment {
    /// Build a fresh record for a date that has no stored assignment yet.
    pub fn new(date: impl Into<String>, content: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            content: content.into(),
            date: date.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rewrite the content, keeping `created_at` from the existing record.
    pub fn revise(self, content: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            content: content.into(),
            updated_at: now,
            ..self
        }
    }
}

/// Create-or-update request body for `PUT /assignments/{date}`.
#[derive(Debug, Deserialize)]
pub struct PutAssignmentRequest {
    pub content: String,
}

/// Standard API response envelope.
///
/// `data` is always present on the wire; a GET for a date with no record
/// returns an explicit `null`, not an omitted field.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn success_with_message(data: Option<T>, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }
}

/// Response envelope for the list endpoint, with result counters.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub success: bool,
    pub data: Vec<Assignment>,
    /// Number of records returned after range filtering.
    pub count: usize,
    /// Size of the fetched key page before filtering.
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_revise_preserves_created_at() {
        let t0 = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap();

        let first = Assignment::new("2025-06-01", "Math p.1-2", t0);
        assert_eq!(first.created_at, t0);
        assert_eq!(first.updated_at, t0);

        let second = first.revise("Math p.3-4", t1);
        assert_eq!(second.created_at, t0);
        assert_eq!(second.updated_at, t1);
        assert_eq!(second.content, "Math p.3-4");
        assert_eq!(second.date, "2025-06-01");
    }

    #[test]
    fn test_assignment_serializes_camel_case() {
        let t0 = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
        let json =
            serde_json::to_value(Assignment::new("2025-06-01", "Read ch. 4", t0)).unwrap();
        assert_eq!(json["date"], "2025-06-01");
        assert_eq!(json["content"], "Read ch. 4");
        assert!(json["createdAt"].is_string());
        assert!(json["updatedAt"].is_string());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_envelope_keeps_explicit_null_data() {
        let response =
            ApiResponse::<Assignment>::success_with_message(None, "No assignment for this date");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert!(json["data"].is_null());
        assert!(json.as_object().unwrap().contains_key("data"));
    }

    #[test]
    fn test_envelope_omits_missing_message() {
        let t0 = Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap();
        let response = ApiResponse::success(Assignment::new("2025-06-01", "x", t0));
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("message").is_none());
    }
}
