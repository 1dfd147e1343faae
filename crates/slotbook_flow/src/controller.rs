// --- File: crates/slotbook_flow/src/controller.rs ---
//! The booking flow state machine.
//!
//! `slots` → `details` → `success`, with `details` → `slots` allowed. The
//! async operations take `&mut self`, so a mount or submission can never
//! overlap another one.

use chrono::Duration as ChronoDuration;
use serde::Serialize;
use slotbook_common::time::to_iso_millis;
use slotbook_common::{
    config_missing, credential_missing, BookingRequest, BookingResponse, CalendarApi,
    CredentialResolver, HostBridge, HostError, HostMessage, Slot, WidgetError, ANY_ORIGIN,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::mock_slots::generate_mock_slots;
use crate::presentation::{render, FlowView};
use crate::query::QueryParams;
use crate::settings::FlowSettings;
use crate::validation::{validate_submission, ContactForm};

/// Event page reported by mock bookings.
pub const MOCK_EVENT_URL: &str = "https://example.com/mock-event";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowStep {
    Slots,
    Details,
    Success,
}

/// Where the listed slots came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotSource {
    /// Nothing loaded yet.
    None,
    Api,
    Mock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Submission was not possible in the current state (wrong step, busy, finished).
    Ignored,
    Booked,
    /// Booked, and the host was sent to the payment page.
    Redirected { url: String },
    /// Booked, but the host could not navigate; the payment link is in the notice.
    PaymentPending { url: String },
}

/// Collaborators of a flow.
#[derive(Clone)]
pub struct FlowDeps {
    /// `None` when no API base URL is configured; only mock mode works then.
    pub api: Option<Arc<dyn CalendarApi>>,
    pub credentials: Arc<dyn CredentialResolver>,
    pub host: Arc<dyn HostBridge>,
    pub clock: Arc<dyn Clock>,
}

pub struct FlowController {
    query: QueryParams,
    settings: FlowSettings,
    deps: FlowDeps,

    started: bool,
    step: FlowStep,
    loading: bool,
    submitting: bool,
    closed: bool,
    slots: Vec<Slot>,
    source: SlotSource,
    selected: Option<Slot>,
    form: ContactForm,
    notice: Option<WidgetError>,
    booking: Option<BookingResponse>,
    redirected_to: Option<String>,
}

impl FlowController {
    pub fn new(query: QueryParams, settings: FlowSettings, deps: FlowDeps) -> Self {
        Self {
            query,
            settings,
            deps,
            started: false,
            step: FlowStep::Slots,
            loading: false,
            submitting: false,
            closed: false,
            slots: Vec::new(),
            source: SlotSource::None,
            selected: None,
            form: ContactForm::default(),
            notice: None,
            booking: None,
            redirected_to: None,
        }
    }

    // --- state accessors ---

    pub fn step(&self) -> FlowStep {
        self.step
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Success is terminal: only `close` still does anything.
    pub fn is_finished(&self) -> bool {
        self.step == FlowStep::Success
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot_source(&self) -> SlotSource {
        self.source
    }

    pub fn selected(&self) -> Option<&Slot> {
        self.selected.as_ref()
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn notice(&self) -> Option<&WidgetError> {
        self.notice.as_ref()
    }

    pub fn booking(&self) -> Option<&BookingResponse> {
        self.booking.as_ref()
    }

    pub fn redirected_to(&self) -> Option<&str> {
        self.redirected_to.as_deref()
    }

    pub fn settings(&self) -> &FlowSettings {
        &self.settings
    }

    pub fn practitioner_id(&self) -> Option<&str> {
        self.query.practitioner_id()
    }

    pub fn is_mock(&self) -> bool {
        self.query.is_mock_forced()
    }

    pub fn display_price(&self) -> &str {
        self.query.display_price(&self.settings.default_price)
    }

    pub fn view(&self) -> FlowView {
        render(self)
    }

    // --- mount ---

    /// Loads the slots. Runs once; later calls return `false` and do nothing.
    pub async fn mount(&mut self) -> bool {
        if self.started {
            debug!("Flow already mounted");
            return false;
        }
        self.started = true;
        self.loading = true;
        self.load_slots().await;
        self.loading = false;
        true
    }

    async fn load_slots(&mut self) {
        let Some(practitioner_id) = self.practitioner_id().map(str::to_string) else {
            warn!("Page URL carries no practitioner id, showing mock slots");
            self.notice = Some(credential_missing(None));
            self.use_mock_slots();
            return;
        };

        if self.is_mock() {
            info!("Mock mode forced for practitioner {}", practitioner_id);
            self.use_mock_slots();
            return;
        }

        let Some(token) = self.deps.credentials.resolve_token(&practitioner_id) else {
            warn!("No token for practitioner {}, showing mock slots", practitioner_id);
            self.notice = Some(credential_missing(Some(&practitioner_id)));
            self.use_mock_slots();
            return;
        };

        let Some(api) = self.deps.api.clone() else {
            warn!("Booking API is not configured, showing mock slots");
            self.notice = Some(config_missing("api.base_url is not set"));
            self.use_mock_slots();
            return;
        };

        let now = self.deps.clock.now();
        let from_utc = to_iso_millis(now);
        let to_utc = to_iso_millis(now + ChronoDuration::days(i64::from(self.settings.window_days)));

        match api.fetch_slots(&token, &from_utc, &to_utc).await {
            Ok(slots) if !slots.is_empty() => {
                info!("Loaded {} slots for practitioner {}", slots.len(), practitioner_id);
                self.slots = slots;
                self.source = SlotSource::Api;
            }
            Ok(_) => {
                info!("No slots returned for practitioner {}, showing mock slots", practitioner_id);
                self.use_mock_slots();
            }
            Err(err) => {
                warn!("Failed to load slots for practitioner {}: {}", practitioner_id, err);
                self.notice = Some(err.into());
                self.use_mock_slots();
            }
        }
    }

    fn use_mock_slots(&mut self) {
        self.slots = generate_mock_slots(
            self.settings.window_days,
            self.deps.clock.now(),
            self.settings.formatter.tz,
        );
        self.source = SlotSource::Mock;
    }

    // --- slot step ---

    /// Selects the loaded slot starting at `start_utc`.
    pub fn select_slot(&mut self, start_utc: &str) -> bool {
        if self.step != FlowStep::Slots || self.closed {
            return false;
        }
        match self.slots.iter().find(|slot| slot.start_utc == start_utc) {
            Some(slot) => {
                debug!("Selected slot {}", slot.start_utc);
                self.selected = Some(slot.clone());
                true
            }
            None => false,
        }
    }

    pub fn can_next(&self) -> bool {
        self.step == FlowStep::Slots && self.selected.is_some() && !self.loading && !self.closed
    }

    pub fn next(&mut self) -> bool {
        if !self.can_next() {
            return false;
        }
        self.step = FlowStep::Details;
        true
    }

    pub fn can_back(&self) -> bool {
        self.step == FlowStep::Details && !self.submitting && !self.closed
    }

    pub fn back(&mut self) -> bool {
        if !self.can_back() {
            return false;
        }
        self.step = FlowStep::Slots;
        true
    }

    // --- details step ---

    fn form_editable(&self) -> bool {
        !self.is_finished() && !self.submitting && !self.closed
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        if self.form_editable() {
            self.form.name = name.into();
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        if self.form_editable() {
            self.form.email = email.into();
        }
    }

    pub fn set_telegram(&mut self, telegram: impl Into<String>) {
        if self.form_editable() {
            self.form.telegram = telegram.into();
        }
    }

    pub fn set_agreed(&mut self, agreed: bool) {
        if self.form_editable() {
            self.form.agreed = agreed;
        }
    }

    pub fn can_submit(&self) -> bool {
        self.step == FlowStep::Details
            && !self.submitting
            && !self.closed
            && validate_submission(self.selected.as_ref(), &self.form).is_ok()
    }

    /// Books the selected slot.
    ///
    /// Validation failures come back as [`WidgetError::ValidationFailure`]
    /// without any request. Other failures are also kept as the notice and
    /// leave the flow in `details`, ready for another attempt.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, WidgetError> {
        if self.step != FlowStep::Details || self.submitting || self.closed {
            return Ok(SubmitOutcome::Ignored);
        }
        if let Err(fields) = validate_submission(self.selected.as_ref(), &self.form) {
            return Err(WidgetError::ValidationFailure(fields));
        }
        let Some(slot) = self.selected.clone() else {
            return Err(WidgetError::ValidationFailure(Vec::new()));
        };

        self.submitting = true;
        self.notice = None;
        let result = self.perform_submission(&slot).await;
        self.submitting = false;

        match result {
            Ok(response) => Ok(self.complete(response)),
            Err(err) => {
                warn!("Booking of {} failed: {}", slot.start_utc, err);
                self.notice = Some(err.clone());
                Err(err)
            }
        }
    }

    async fn perform_submission(&self, slot: &Slot) -> Result<BookingResponse, WidgetError> {
        if self.is_mock() {
            info!("Mock booking of {}", slot.start_utc);
            tokio::time::sleep(self.settings.mock_latency).await;
            return Ok(BookingResponse {
                created_at: Some(to_iso_millis(self.deps.clock.now())),
                event_url: Some(MOCK_EVENT_URL.to_string()),
                ..BookingResponse::default()
            });
        }

        let practitioner_id = self
            .practitioner_id()
            .ok_or_else(|| credential_missing(None))?;
        let token = self
            .deps
            .credentials
            .resolve_token(practitioner_id)
            .ok_or_else(|| credential_missing(Some(practitioner_id)))?;
        let api = self
            .deps
            .api
            .as_ref()
            .ok_or_else(|| config_missing("api.base_url is not set"))?;

        let request = BookingRequest::new(
            token,
            slot,
            &self.form.name,
            &self.form.email,
            &self.form.telegram,
        );
        info!(
            "Submitting booking of {} for practitioner {}",
            request.start_utc, practitioner_id
        );
        Ok(api.create_booking(&request).await?)
    }

    fn complete(&mut self, response: BookingResponse) -> SubmitOutcome {
        self.step = FlowStep::Success;
        let payment_url = response.payment_url().map(str::to_string);
        self.booking = Some(response);

        let Some(url) = payment_url else {
            info!("Booking confirmed");
            return SubmitOutcome::Booked;
        };

        match self.deps.host.navigate(&url) {
            Ok(()) => {
                info!("Redirecting to payment page {}", url);
                self.redirected_to = Some(url.clone());
                SubmitOutcome::Redirected { url }
            }
            Err(err) => {
                warn!("Host could not open the payment page {}: {}", url, err);
                self.notice = Some(WidgetError::PaymentRedirectRequired { url: url.clone() });
                SubmitOutcome::PaymentPending { url }
            }
        }
    }

    // --- any step ---

    /// Asks the embedding page to close the widget.
    pub fn close(&mut self) -> Result<(), HostError> {
        info!("Closing booking widget");
        self.closed = true;
        self.deps
            .host
            .post_message(&HostMessage::CloseBooking, ANY_ORIGIN)
    }

    /// Opens the offer terms in a new tab. `Ok(false)` when none are configured.
    pub fn open_agreement(&self) -> Result<bool, HostError> {
        match self.settings.agreement_url.as_deref() {
            Some(url) => self.deps.host.open_external(url).map(|()| true),
            None => Ok(false),
        }
    }
}
