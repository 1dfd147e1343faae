// --- File: crates/slotbook_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error kinds
pub mod http; // HTTP client adapter
pub mod logging; // Logging utilities
pub mod models; // Wire models of the booking API
pub mod services; // Collaborator traits
pub mod time; // UTC timestamp helpers

// Re-export error types and utilities for easier access
pub use error::{config_missing, credential_missing, ApiError, FieldError, WidgetError};

// Re-export HTTP utilities for easier access
pub use http::client::{create_client, ApiClient};

pub use models::{BookingRequest, BookingResponse, Invitee, Slot, SlotsResponse};
pub use services::{
    BoxFuture, CalendarApi, CredentialResolver, HostBridge, HostError, HostMessage, ANY_ORIGIN,
};
