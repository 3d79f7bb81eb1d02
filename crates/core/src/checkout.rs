//! Checkout finalization.
//!
//! A checkout starts in [`CheckoutState::Reviewing`], where the order summary
//! and form are shown. A submission that passes field validation moves it to
//! [`CheckoutState::Submitted`], which is terminal. Nothing is transmitted
//! anywhere; the caller is expected to clear the stored cart on success.

use std::fmt;

use serde::Deserialize;

const MAX_FIELD_LENGTH: usize = 200;
const MAX_EMAIL_LENGTH: usize = 254;
const MAX_POSTAL_CODE_LENGTH: usize = 12;

/// Where a checkout is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutState {
    #[default]
    Reviewing,
    Submitted,
}

/// Raw checkout form as posted by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CheckoutForm {
    pub full_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

/// A checkout form that passed validation, with fields trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOrder {
    pub full_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

/// One validation failure, keyed by form field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All validation failures for one submission, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Message for a field, if it failed.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Failures in form order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether every field passed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for e in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
            first = false;
        }
        Ok(())
    }
}

/// Errors from [`Checkout::submit`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// The form failed validation; the checkout is still reviewing.
    #[error("checkout form is invalid: {0}")]
    Invalid(FieldErrors),
    /// The checkout was already submitted.
    #[error("checkout was already submitted")]
    AlreadySubmitted,
}

impl CheckoutForm {
    /// Apply the form's field rules.
    ///
    /// Every field is required. The email must contain exactly one `@` with
    /// text on both sides and no whitespace, and postal codes are short.
    ///
    /// # Errors
    ///
    /// Returns every failing field at once.
    pub fn validate(&self) -> Result<ValidatedOrder, FieldErrors> {
        let mut errors = FieldErrors::default();

        let full_name = required(&mut errors, "full_name", "Full name", &self.full_name);
        let email = required(&mut errors, "email", "Email", &self.email);
        if let Err(message) = check_email(email) {
            errors.push("email", message);
        }
        let address = required(&mut errors, "address", "Address", &self.address);
        let city = required(&mut errors, "city", "City", &self.city);
        let postal_code = required(&mut errors, "postal_code", "Postal code", &self.postal_code);
        if postal_code.chars().count() > MAX_POSTAL_CODE_LENGTH {
            errors.push(
                "postal_code",
                format!("Postal code must be at most {MAX_POSTAL_CODE_LENGTH} characters"),
            );
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidatedOrder {
            full_name: full_name.to_owned(),
            email: email.to_owned(),
            address: address.to_owned(),
            city: city.to_owned(),
            postal_code: postal_code.to_owned(),
        })
    }
}

/// Trim a field and record an error if it is blank or too long.
fn required<'a>(
    errors: &mut FieldErrors,
    field: &'static str,
    label: &str,
    value: &'a str,
) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(field, format!("{label} is required"));
    } else if trimmed.chars().count() > MAX_FIELD_LENGTH {
        errors.push(field, format!("{label} must be at most {MAX_FIELD_LENGTH} characters"));
    }
    trimmed
}

/// Format rules for a non-blank email; blank input is reported by [`required`].
fn check_email(email: &str) -> Result<(), &'static str> {
    if email.is_empty() {
        return Ok(());
    }
    if email.len() > MAX_EMAIL_LENGTH {
        return Err("Email is too long");
    }
    if email.chars().any(char::is_whitespace) {
        return Err("Email cannot contain spaces");
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(())
        }
        _ => Err("Enter a valid email address"),
    }
}

/// One checkout attempt.
#[derive(Debug, Clone, Default)]
pub struct Checkout {
    state: CheckoutState,
}

impl Checkout {
    /// A checkout in the reviewing state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> CheckoutState {
        self.state
    }

    /// Submit the form.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Invalid`] if validation fails; the state stays
    ///   [`CheckoutState::Reviewing`].
    /// - [`CheckoutError::AlreadySubmitted`] once submitted.
    pub fn submit(&mut self, form: &CheckoutForm) -> Result<ValidatedOrder, CheckoutError> {
        if self.state == CheckoutState::Submitted {
            return Err(CheckoutError::AlreadySubmitted);
        }
        let order = form.validate().map_err(CheckoutError::Invalid)?;
        self.state = CheckoutState::Submitted;
        Ok(order)
    }
}
