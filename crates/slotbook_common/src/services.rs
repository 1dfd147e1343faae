// --- File: crates/slotbook_common/src/services.rs ---
//! Service abstractions for the booking flow's external collaborators.
//!
//! The flow controller only talks to the booking API, the credential store
//! and the embedding page through these traits, so each can be swapped for a
//! test double or another deployment.

use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

use crate::error::ApiError;
use crate::models::{BookingRequest, BookingResponse, Slot};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Remote calendar/booking API.
pub trait CalendarApi: Send + Sync {
    /// Available slots between `from_utc` and `to_utc` (ISO-8601 UTC).
    fn fetch_slots(
        &self,
        token: &str,
        from_utc: &str,
        to_utc: &str,
    ) -> BoxFuture<'_, Vec<Slot>, ApiError>;

    /// Books the request's slot. The request carries its own bearer token.
    fn create_booking(&self, request: &BookingRequest) -> BoxFuture<'_, BookingResponse, ApiError>;
}

/// Resolves the bearer token of a practitioner.
pub trait CredentialResolver: Send + Sync {
    fn resolve_token(&self, practitioner_id: &str) -> Option<String>;
}

/// Messages posted to the page embedding the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum HostMessage {
    #[serde(rename = "CLOSE_BOOKING")]
    CloseBooking,
}

/// Target origin for host messages: the widget may be embedded anywhere.
pub const ANY_ORIGIN: &str = "*";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("Host is not reachable: {0}")]
    Unavailable(String),
    #[error("Host refused the request: {0}")]
    Refused(String),
}

/// Capabilities of the page embedding the widget.
pub trait HostBridge: Send + Sync {
    /// Posts `message` to the parent frame.
    fn post_message(&self, message: &HostMessage, target_origin: &str) -> Result<(), HostError>;

    /// Replaces the whole page with `url`.
    fn navigate(&self, url: &str) -> Result<(), HostError>;

    /// Opens `url` in a new tab without giving it access to the widget.
    fn open_external(&self, url: &str) -> Result<(), HostError>;
}
