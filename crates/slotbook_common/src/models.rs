// --- File: crates/slotbook_common/src/models.rs ---

use crate::time::canonical_utc;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A bookable interval, as delivered by the booking API or the mock generator.
///
/// Both ends are ISO-8601 UTC strings. They are kept verbatim; ordering and
/// identity use `start_utc`, whose lexical order matches chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub start_utc: String,
    pub end_utc: String,
}

impl Slot {
    pub fn new(start_utc: impl Into<String>, end_utc: impl Into<String>) -> Self {
        Self {
            start_utc: start_utc.into(),
            end_utc: end_utc.into(),
        }
    }
}

/// Body of `GET /api/v1/calendly`. A missing or `null` `slots` field means no slots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlotsResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub slots: Vec<Slot>,
}

impl SlotsResponse {
    /// Reads a successful slot listing. Anything but a JSON object carries no slots.
    pub fn from_body(body: Value) -> Result<Self, serde_json::Error> {
        match body {
            Value::Object(_) => serde_json::from_value(body),
            _ => Ok(Self::default()),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Slot>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Slot>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitee {
    pub name: String,
    pub email: String,
}

/// Body of `POST /api/v1/calendly`.
///
/// The bearer token travels in the `Authorization` header and never in the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingRequest {
    #[serde(skip)]
    pub authorization_token: String,
    pub invitee: Invitee,
    pub start_utc: String,
    pub telegram: String,
}

impl BookingRequest {
    /// Builds the request from a selected slot and raw form input.
    ///
    /// Name and contact are trimmed, the email trimmed and lower-cased, and
    /// the start time normalized to canonical UTC.
    pub fn new(
        authorization_token: impl Into<String>,
        slot: &Slot,
        name: &str,
        email: &str,
        telegram: &str,
    ) -> Self {
        Self {
            authorization_token: authorization_token.into(),
            invitee: Invitee {
                name: name.trim().to_string(),
                email: email.trim().to_lowercase(),
            },
            start_utc: canonical_utc(&slot.start_utc),
            telegram: telegram.trim().to_string(),
        }
    }
}

/// Response of a booking submission. Unknown fields are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BookingResponse {
    /// Reads the body of a successful booking.
    ///
    /// The booking exists once the API answered 2xx, so this never fails: an
    /// object that does not fit is kept whole in `extra`, and an empty body
    /// yields an empty response. Any other body is kept under `extra["body"]`.
    pub fn from_body(body: Value) -> Self {
        match body {
            Value::Object(map) => serde_json::from_value(Value::Object(map.clone()))
                .unwrap_or_else(|_| Self {
                    extra: map,
                    ..Self::default()
                }),
            Value::Null => Self::default(),
            Value::String(text) if text.trim().is_empty() => Self::default(),
            other => {
                let mut extra = Map::new();
                extra.insert("body".to_string(), other);
                Self {
                    extra,
                    ..Self::default()
                }
            }
        }
    }

    /// The payment page to redirect to, ignoring blank values.
    pub fn payment_url(&self) -> Option<&str> {
        self.payment_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_booking_request_body_has_no_token() {
        let slot = Slot::new("2025-05-05T07:00:00.000Z", "2025-05-05T07:30:00.000Z");
        let request = BookingRequest::new("secret", &slot, "  Anna ", " Anna@Example.COM ", " @anna ");

        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body,
            json!({
                "invitee": {"name": "Anna", "email": "anna@example.com"},
                "start_utc": "2025-05-05T07:00:00Z",
                "telegram": "@anna"
            })
        );
        assert_eq!(request.authorization_token, "secret");
    }

    #[test]
    fn test_booking_response_keeps_unknown_fields() {
        let response: BookingResponse = serde_json::from_value(json!({
            "created_at": "2025-05-01T09:00:00Z",
            "payment_url": "  ",
            "booking_id": 42
        }))
        .unwrap();

        assert_eq!(response.created_at.as_deref(), Some("2025-05-01T09:00:00Z"));
        assert_eq!(response.event_url, None);
        assert_eq!(response.payment_url(), None);
        assert_eq!(response.extra.get("booking_id"), Some(&json!(42)));
    }

    #[test]
    fn test_slots_response_defaults_to_empty() {
        let response: SlotsResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.slots.is_empty());
    }

    #[test]
    fn test_null_or_non_object_slots_body_is_empty() {
        let response = SlotsResponse::from_body(json!({"slots": null})).unwrap();
        assert!(response.slots.is_empty());
        assert!(SlotsResponse::from_body(json!("OK")).unwrap().slots.is_empty());
        assert!(SlotsResponse::from_body(json!([1, 2])).unwrap().slots.is_empty());
        assert!(SlotsResponse::from_body(json!({"slots": [{"start_utc": 1}]})).is_err());
    }

    #[test]
    fn test_booking_body_never_fails() {
        assert_eq!(BookingResponse::from_body(json!("")), BookingResponse::default());
        assert_eq!(BookingResponse::from_body(Value::Null), BookingResponse::default());

        let text = BookingResponse::from_body(json!("Created"));
        assert_eq!(text.extra.get("body"), Some(&json!("Created")));
        assert_eq!(text.event_url, None);

        let odd = BookingResponse::from_body(json!({"event_url": 5, "id": "b-1"}));
        assert_eq!(odd.event_url, None);
        assert_eq!(odd.extra.get("id"), Some(&json!("b-1")));

        let full = BookingResponse::from_body(json!({"payment_url": "https://pay.example/x"}));
        assert_eq!(full.payment_url(), Some("https://pay.example/x"));
    }
}
