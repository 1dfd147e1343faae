// --- File: crates/slotbook_flow/src/lib.rs ---
//! The Slotbook booking flow.
//!
//! [`controller::FlowController`] drives one booking from slot loading to a
//! confirmed (and possibly paid) appointment. Everything outside the flow is
//! reached through the traits in `slotbook_common::services`.

pub mod api;
pub mod clock;
pub mod controller;
pub mod credentials;
pub mod display;
pub mod host;
pub mod mock_slots;
pub mod presentation;
pub mod query;
pub mod settings;
pub mod validation;

pub use api::HttpCalendarApi;
pub use clock::{Clock, SystemClock};
pub use controller::{FlowController, FlowDeps, FlowStep, SlotSource, SubmitOutcome};
pub use credentials::StaticCredentials;
pub use display::SlotFormatter;
pub use host::LogHost;
pub use mock_slots::generate_mock_slots;
pub use presentation::FlowView;
pub use query::QueryParams;
pub use settings::FlowSettings;
pub use validation::ContactForm;
