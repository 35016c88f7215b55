//! Contact form rules.

use thiserror::Error;

const NAME_MAX: usize = 100;
const EMAIL_MAX: usize = 254;
const PHONE_MAX: usize = 20;
const SUBJECT_MAX: usize = 200;
const MESSAGE_MAX: usize = 5000;

/// Raw values posted by the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

/// A validated message ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomerMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("contact form has {} invalid field(s)", .errors.len())]
pub struct ContactValidationError {
    pub errors: Vec<FieldError>,
}

impl ContactValidationError {
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }
}

impl ContactSubmission {
    pub fn validate(&self) -> Result<NewCustomerMessage, ContactValidationError> {
        let mut errors = Vec::new();

        let name = required(&mut errors, "name", &self.name, NAME_MAX);
        let email = required(&mut errors, "email", &self.email, EMAIL_MAX);
        if !email.is_empty() && !looks_like_email(&email) {
            errors.push(FieldError {
                field: "email",
                message: "Enter a valid email address.".to_string(),
            });
        }
        let phone = optional(&mut errors, "phone", &self.phone, PHONE_MAX);
        let subject = required(&mut errors, "subject", &self.subject, SUBJECT_MAX);
        let message = required(&mut errors, "message", &self.message, MESSAGE_MAX);

        if !errors.is_empty() {
            return Err(ContactValidationError { errors });
        }

        Ok(NewCustomerMessage {
            name,
            email,
            phone,
            subject,
            message,
        })
    }
}

fn required(errors: &mut Vec<FieldError>, field: &'static str, raw: &str, max: usize) -> String {
    let value = raw.trim();
    if value.is_empty() {
        errors.push(FieldError {
            field,
            message: "This field is required.".to_string(),
        });
    } else if value.chars().count() > max {
        errors.push(too_long(field, max));
    }
    value.to_string()
}

fn optional(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    raw: &str,
    max: usize,
) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    if value.chars().count() > max {
        errors.push(too_long(field, max));
    }
    Some(value.to_string())
}

fn too_long(field: &'static str, max: usize) -> FieldError {
    FieldError {
        field,
        message: format!("Ensure this value has at most {max} characters."),
    }
}

fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !host.starts_with('.') && !tld.is_empty()
}
