use once_cell::sync::Lazy;
use regex::Regex;
use slotbook_common::{FieldError, Slot};

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_CONTACT_CHARS: usize = 2;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Raw contact details as typed by the user.
///
/// Values are stored untrimmed; every check trims first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    /// Telegram handle or phone number.
    pub telegram: String,
    /// Offer terms accepted.
    pub agreed: bool,
}

impl ContactForm {
    fn name_ok(&self) -> bool {
        self.name.trim().chars().count() >= MIN_NAME_CHARS
    }

    fn contact_ok(&self) -> bool {
        self.telegram.trim().chars().count() >= MIN_CONTACT_CHARS
    }

    /// Every failing form check, in field order.
    pub fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if !self.name_ok() {
            errors.push(FieldError::NameTooShort);
        }
        if !is_valid_email(&self.email) {
            errors.push(FieldError::InvalidEmail);
        }
        if !self.contact_ok() {
            errors.push(FieldError::ContactTooShort);
        }
        if !self.agreed {
            errors.push(FieldError::AgreementMissing);
        }
        errors
    }

    /// Errors worth showing next to the inputs while the user types: only
    /// fields that hold something and are still invalid.
    pub fn inline_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if !self.name.trim().is_empty() && !self.name_ok() {
            errors.push(FieldError::NameTooShort);
        }
        if !self.email.trim().is_empty() && !is_valid_email(&self.email) {
            errors.push(FieldError::InvalidEmail);
        }
        if !self.telegram.trim().is_empty() && !self.contact_ok() {
            errors.push(FieldError::ContactTooShort);
        }
        errors
    }
}

/// Checks everything a booking needs before any request is made.
pub fn validate_submission(selected: Option<&Slot>, form: &ContactForm) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    if selected.is_none() {
        errors.push(FieldError::NoSlotSelected);
    }
    errors.extend(form.field_errors());

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
