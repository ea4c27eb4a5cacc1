use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::domain::models::{SendRequest, SendRequestDraft};

pub const MAX_MESSAGE_LENGTH: usize = 1000;
pub const MIN_REPEAT_COUNT: i64 = 1;
pub const MAX_REPEAT_COUNT: i64 = 100;
pub const MIN_DELAY_MS: i64 = 100;
pub const MAX_DELAY_MS: i64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestField {
    Recipient,
    Country,
    Message,
    Repeat,
    Delay,
}

impl RequestField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestField::Recipient => "recipient",
            RequestField::Country => "country",
            RequestField::Message => "message",
            RequestField::Repeat => "repeat",
            RequestField::Delay => "delay",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(BTreeMap<RequestField, String>);

impl ValidationErrors {
    fn add(&mut self, field: RequestField, reason: &str) {
        self.0.insert(field, reason.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: RequestField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn fields(&self) -> Vec<RequestField> {
        self.0.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RequestField, &str)> {
        self.0.iter().map(|(field, reason)| (*field, reason.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, reason) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field.as_str(), reason)?;
            first = false;
        }
        Ok(())
    }
}

impl SendRequestDraft {
    /// Checks every field independently and reports all violations at once.
    /// Pure and allocation-light, safe to call on every keystroke.
    pub fn validate(&self) -> Result<SendRequest, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let recipient = self.recipient.as_deref().unwrap_or_default();
        let recipient: String = recipient.chars().filter(|c| !c.is_whitespace()).collect();
        if recipient.is_empty() {
            errors.add(RequestField::Recipient, "Phone number is required");
        } else if !is_international_phone(&recipient) {
            errors.add(
                RequestField::Recipient,
                "Please enter a valid phone number (e.g., +1234567890)",
            );
        }

        let country = self.country.as_deref().unwrap_or_default().trim();
        if country.is_empty() {
            errors.add(RequestField::Country, "Please select a country");
        }

        let message = self.message.as_deref().unwrap_or_default();
        if message.trim().is_empty() {
            errors.add(RequestField::Message, "Message is required");
        } else if message_length(message) > MAX_MESSAGE_LENGTH {
            errors.add(
                RequestField::Message,
                "Message must be less than 1000 characters",
            );
        }

        let repeat_count = self.repeat_count.unwrap_or(0);
        if repeat_count < MIN_REPEAT_COUNT {
            errors.add(RequestField::Repeat, "Counter must be at least 1");
        } else if repeat_count > MAX_REPEAT_COUNT {
            errors.add(RequestField::Repeat, "Counter cannot exceed 100");
        }

        let delay_ms = self.delay_ms;
        if !delay_ms.is_some_and(|d| (MIN_DELAY_MS..=MAX_DELAY_MS).contains(&d)) {
            errors.add(RequestField::Delay, "Delay must be between 100ms and 10s");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(SendRequest::from_validated(
            recipient,
            country.to_string(),
            message.to_string(),
            repeat_count as u32,
            delay_ms.unwrap_or(MIN_DELAY_MS) as u64,
        ))
    }
}

/// Length in UTF-16 code units, matching what browser form counters show.
pub fn message_length(message: &str) -> usize {
    message.encode_utf16().count()
}

/// `^\+?[1-9]\d{1,14}$`
fn is_international_phone(value: &str) -> bool {
    let digits = value.strip_prefix('+').unwrap_or(value);
    let bytes = digits.as_bytes();

    (2..=15).contains(&bytes.len())
        && matches!(bytes[0], b'1'..=b'9')
        && bytes.iter().all(u8::is_ascii_digit)
}
