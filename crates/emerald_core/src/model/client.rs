//! Client record domain model and form validation.
//!
//! # Responsibility
//! - Define the canonical `{name, email}` record shown in the client table.
//! - Validate add-client form input at the roster boundary.
//!
//! # Invariants
//! - `ClientRecord::new` only returns trimmed, validated records.
//! - Validation reports at most one error per field, and always checks both
//!   fields so the UI can show them together.
//! - Records carry no identifier; position in the roster is their identity.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

// One `@`, no whitespace on either side, and a dot inside the domain part.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// A single client shown in the dashboard table.
///
/// Deserialization trusts stored data and does not re-run validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRecord {
    name: String,
    email: String,
}

impl ClientRecord {
    /// Validates and normalizes a name/email pair into a record.
    ///
    /// # Errors
    /// - Returns per-field errors when either input is invalid.
    pub fn new(
        name: impl AsRef<str>,
        email: impl AsRef<str>,
    ) -> Result<Self, ClientValidationErrors> {
        validate_client(name.as_ref(), email.as_ref())
    }

    /// Builds a record from known-good constants (seed data).
    pub(crate) fn from_trusted(name: &str, email: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    /// Display name, already trimmed.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact address, already trimmed.
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Form field that a validation error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientField {
    Name,
    Email,
}

/// Input validation error for one add-client field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientValidationError {
    /// Name is empty after trimming.
    MissingName,
    /// Email is empty after trimming.
    MissingEmail,
    /// Email is present but not shaped like `local@domain.tld`.
    InvalidEmailFormat,
}

impl ClientValidationError {
    /// Field the error should be rendered next to.
    pub fn field(self) -> ClientField {
        match self {
            Self::MissingName => ClientField::Name,
            Self::MissingEmail | Self::InvalidEmailFormat => ClientField::Email,
        }
    }

    /// Stable machine-readable code for FFI and logs.
    pub fn code(self) -> &'static str {
        match self {
            Self::MissingName => "missing_name",
            Self::MissingEmail => "missing_email",
            Self::InvalidEmailFormat => "invalid_email_format",
        }
    }
}

impl Display for ClientValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingName => write!(f, "client name is required"),
            Self::MissingEmail => write!(f, "client email is required"),
            Self::InvalidEmailFormat => write!(f, "client email must look like name@domain.tld"),
        }
    }
}

impl Error for ClientValidationError {}

/// Field-level validation result for the add-client form.
///
/// At least one slot is populated whenever this value is returned as an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientValidationErrors {
    /// Error for the name input, if any.
    pub name: Option<ClientValidationError>,
    /// Error for the email input, if any.
    pub email: Option<ClientValidationError>,
}

impl ClientValidationErrors {
    /// Returns `true` when neither field has an error.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }

    /// Errors in field order (name, then email).
    pub fn iter(&self) -> impl Iterator<Item = ClientValidationError> + '_ {
        self.name.iter().chain(self.email.iter()).copied()
    }

    /// Returns the error attached to `field`.
    pub fn for_field(&self, field: ClientField) -> Option<ClientValidationError> {
        match field {
            ClientField::Name => self.name,
            ClientField::Email => self.email,
        }
    }
}

impl Display for ClientValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for err in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{err}")?;
            first = false;
        }
        Ok(())
    }
}

impl Error for ClientValidationErrors {}

/// Validates add-client form input.
///
/// Name and email are checked independently; each field reports only its
/// first failing rule. On success the trimmed pair is returned as a record.
pub fn validate_client(name: &str, email: &str) -> Result<ClientRecord, ClientValidationErrors> {
    let name = name.trim();
    let email = email.trim();

    let errors = ClientValidationErrors {
        name: validate_name(name).err(),
        email: validate_email(email).err(),
    };
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ClientRecord {
        name: name.to_string(),
        email: email.to_string(),
    })
}

/// Returns whether `email` matches the accepted address shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn validate_name(trimmed: &str) -> Result<(), ClientValidationError> {
    if trimmed.is_empty() {
        return Err(ClientValidationError::MissingName);
    }
    Ok(())
}

fn validate_email(trimmed: &str) -> Result<(), ClientValidationError> {
    if trimmed.is_empty() {
        return Err(ClientValidationError::MissingEmail);
    }
    if !is_valid_email(trimmed) {
        return Err(ClientValidationError::InvalidEmailFormat);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{is_valid_email, ClientField, ClientValidationError};

    #[test]
    fn email_pattern_accepts_common_addresses() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("john.doe@example.com"));
        assert!(is_valid_email("x+tag@mail.example.co.uk"));
    }

    #[test]
    fn email_pattern_rejects_malformed_addresses() {
        for value in [
            "plainaddress",
            "a@b",
            "@b.com",
            "a@.",
            "a@b.",
            "a b@c.com",
            "a@@b.com",
            "a@b@c.com",
        ] {
            assert!(!is_valid_email(value), "`{value}` should be rejected");
        }
    }

    #[test]
    fn errors_map_to_their_form_fields() {
        assert_eq!(ClientValidationError::MissingName.field(), ClientField::Name);
        assert_eq!(ClientValidationError::MissingEmail.field(), ClientField::Email);
        assert_eq!(
            ClientValidationError::InvalidEmailFormat.field(),
            ClientField::Email
        );
    }
}
