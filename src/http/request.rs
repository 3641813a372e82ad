//! Request validation.
//!
//! # Responsibilities
//! - Turn a POST body into a `NewInfraction`
//! - Apply the presence check on required fields
//! - Parse the numeric id path segment
//!
//! # Design Decisions
//! - Presence means truthy: null, false, 0, "", [] and {} all count as missing
//! - Field types are not checked; storage affinity handles conversion

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::Value;

use crate::http::response::ApiError;
use crate::storage::NewInfraction;

pub const NOT_JSON: &str = "Content-Type must be application/json";
pub const INVALID_JSON: &str = "Request body is not valid JSON";
pub const MISSING_FIELDS: &str = "Missing required fields: plate, speed, timestamp";

/// Whether a JSON value counts as present.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// Validate a create request body.
pub fn new_infraction(body: Result<Json<Value>, JsonRejection>) -> Result<NewInfraction, ApiError> {
    let Json(body) = body.map_err(|rejection| match rejection {
        JsonRejection::MissingJsonContentType(_) => ApiError::BadRequest(NOT_JSON),
        _ => ApiError::BadRequest(INVALID_JSON),
    })?;

    let field = |name: &str| body.get(name).filter(|v| is_truthy(v)).cloned();
    match (field("plate"), field("speed"), field("timestamp")) {
        (Some(plate), Some(speed), Some(timestamp)) => Ok(NewInfraction {
            plate,
            speed,
            timestamp,
        }),
        _ => Err(ApiError::BadRequest(MISSING_FIELDS)),
    }
}

/// Parse an id path segment.
///
/// Anything but plain decimal digits does not match the delete route. Digits
/// that overflow a SQLite integer match it but cannot be looked up.
pub fn infraction_id(segment: &str) -> Result<i64, ApiError> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::MethodNotAllowed);
    }
    segment.parse().map_err(|e| {
        ApiError::unhandled(format!("id {segment} out of range: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Result<Json<Value>, JsonRejection> {
        Ok(Json(value))
    }

    #[test]
    fn test_truthiness() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!([]), json!({})] {
            assert!(!is_truthy(&falsy), "{falsy} should be falsy");
        }
        for truthy in [json!(true), json!(-1), json!(0.5), json!("0"), json!([0]), json!({"a": null})] {
            assert!(is_truthy(&truthy), "{truthy} should be truthy");
        }
    }

    #[test]
    fn test_complete_body_is_accepted() {
        let new = new_infraction(body(json!({
            "plate": "ABC123",
            "speed": 80,
            "timestamp": "2024-01-01T00:00:00",
            "camera": "north-gate"
        })))
        .unwrap();
        assert_eq!(new, NewInfraction::new("ABC123", 80, "2024-01-01T00:00:00"));
    }

    #[test]
    fn test_missing_or_falsy_fields_are_rejected() {
        let cases = [
            json!({"plate": "ABC123", "speed": 80}),
            json!({"plate": "ABC123", "speed": 0, "timestamp": "2024-01-01"}),
            json!({"plate": "", "speed": 80, "timestamp": "2024-01-01"}),
            json!({"plate": "ABC123", "speed": 80, "timestamp": null}),
            json!(["ABC123", 80, "2024-01-01"]),
            json!(null),
        ];
        for case in cases {
            let err = new_infraction(body(case.clone())).unwrap_err();
            assert!(
                matches!(err, ApiError::BadRequest(MISSING_FIELDS)),
                "{case} should be rejected"
            );
        }
    }

    #[test]
    fn test_infraction_id() {
        assert_eq!(infraction_id("42").unwrap(), 42);
        assert_eq!(infraction_id("007").unwrap(), 7);
        for segment in ["", "-1", "+1", "abc", "1.5"] {
            assert!(
                matches!(infraction_id(segment), Err(ApiError::MethodNotAllowed)),
                "{segment:?} should not match"
            );
        }
    }

    #[test]
    fn test_oversized_id_is_unhandled() {
        assert!(matches!(
            infraction_id("99999999999999999999"),
            Err(ApiError::Unhandled(_))
        ));
    }
}
