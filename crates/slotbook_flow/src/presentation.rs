//! Everything the user reads. Errors carry no display text of their own;
//! it is chosen here.

use serde::Serialize;
use slotbook_common::{ApiError, FieldError, WidgetError};

use crate::controller::{FlowController, FlowStep, SlotSource};

pub fn field_error_text(error: FieldError) -> &'static str {
    match error {
        FieldError::NoSlotSelected => "Оберіть слот",
        FieldError::NameTooShort => "Мінімум 2 символи",
        FieldError::InvalidEmail => "Некоректний email",
        FieldError::ContactTooShort => "Заповни поле",
        FieldError::AgreementMissing => "Потрібна згода з умовами оферти",
    }
}

pub fn notice_text(error: &WidgetError) -> String {
    match error {
        WidgetError::ConfigMissing(_) => "Сервіс запису не налаштовано.".to_string(),
        WidgetError::CredentialMissing {
            practitioner_id: None,
        } => "Не знайдено psyId в query.".to_string(),
        WidgetError::CredentialMissing {
            practitioner_id: Some(id),
        } => format!("Немає токена для psyId={id}."),
        WidgetError::TransportFailure(ApiError::Status { message, .. }) => message.clone(),
        WidgetError::TransportFailure(ApiError::Transport(_)) => {
            "Не вдалося звʼязатися із сервісом запису.".to_string()
        }
        WidgetError::TransportFailure(ApiError::Decode(_)) => {
            "Сервіс запису повернув неочікувану відповідь.".to_string()
        }
        WidgetError::ValidationFailure(fields) => fields
            .iter()
            .map(|field| field_error_text(*field))
            .collect::<Vec<_>>()
            .join("; "),
        WidgetError::PaymentRedirectRequired { url } => {
            format!("Запис створено. Перейдіть до оплати: {url}")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotView {
    pub start_utc: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Render snapshot of a flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowView {
    pub step: FlowStep,
    pub loading: bool,
    pub submitting: bool,
    pub mock: bool,
    pub slot_source: SlotSource,
    pub price: String,
    pub slots: Vec<SlotView>,
    pub selected_label: Option<String>,
    pub notice: Option<String>,
    pub inline_errors: Vec<InlineError>,
    pub can_next: bool,
    pub can_back: bool,
    pub can_submit: bool,
    pub event_url: Option<String>,
    pub payment_url: Option<String>,
}

pub(crate) fn render(flow: &FlowController) -> FlowView {
    let formatter = flow.settings().formatter;
    let selected_start = flow.selected().map(|slot| slot.start_utc.as_str());

    let slots = flow
        .slots()
        .iter()
        .map(|slot| SlotView {
            start_utc: slot.start_utc.clone(),
            label: formatter.format_slot_label(slot),
            selected: Some(slot.start_utc.as_str()) == selected_start,
        })
        .collect();

    let inline_errors = if flow.step() == FlowStep::Details {
        flow.form()
            .inline_errors()
            .into_iter()
            .map(|error| InlineError {
                field: error.field(),
                message: field_error_text(error),
            })
            .collect()
    } else {
        Vec::new()
    };

    let booking = flow.booking();

    FlowView {
        step: flow.step(),
        loading: flow.is_loading(),
        submitting: flow.is_submitting(),
        mock: flow.is_mock(),
        slot_source: flow.slot_source(),
        price: flow.display_price().to_string(),
        slots,
        selected_label: flow.selected().map(|slot| formatter.format_slot_label(slot)),
        notice: flow.notice().map(notice_text),
        inline_errors,
        can_next: flow.can_next(),
        can_back: flow.can_back(),
        can_submit: flow.can_submit(),
        event_url: booking.and_then(|b| b.event_url.clone()),
        payment_url: booking.and_then(|b| b.payment_url().map(str::to_string)),
    }
}
