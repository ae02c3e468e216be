use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    core::{
        errors::{AppError, AppResult},
        json::scalar_text,
        types::ReservationRequest,
    },
    reservation::selector::TableSelector,
};

pub const SUCCESS_MESSAGE: &str =
    "Your reservation request has been received! We will contact you for confirmation.";
pub const SEND_FAILED_MESSAGE: &str = "An error occurred while sending your reservation.";
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong.";

/// What the guest typed. The table comes from the [`TableSelector`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReservationFields {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub date: String,
    pub time: String,
    pub persons: String,
    pub note: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormAlert {
    pub kind: AlertKind,
    pub message: String,
}

impl FormAlert {
    pub fn class_list(&self) -> &'static str {
        match self.kind {
            AlertKind::Success => "reservation-form-alert alert alert-success",
            AlertKind::Error => "reservation-form-alert alert alert-danger",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReservationForm {
    pub fields: ReservationFields,
    visible: bool,
    header_visible: bool,
    alert: Option<FormAlert>,
}

impl Default for ReservationForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ReservationForm {
    pub fn new() -> Self {
        Self {
            fields: ReservationFields::default(),
            visible: true,
            header_visible: true,
            alert: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn header_visible(&self) -> bool {
        self.header_visible
    }

    pub fn alert(&self) -> Option<&FormAlert> {
        self.alert.as_ref()
    }

    /// A hidden form has no submit button to press.
    pub fn can_submit(&self) -> bool {
        self.visible
    }

    pub fn build_request(&self, selector: &TableSelector) -> ReservationRequest {
        ReservationRequest {
            table: selector.value().to_string(),
            customer_name: self.fields.name.clone(),
            customer_phone: self.fields.phone.clone(),
            customer_email: self.fields.email.clone(),
            reservation_time: reservation_time(&self.fields.date, &self.fields.time),
            party_size: self.fields.persons.clone(),
            notes: self.fields.note.clone(),
        }
    }

    /// Reflects a submission result on the form. Success hides the form and
    /// resets it; any failure leaves it visible for another attempt.
    pub fn apply_submission(&mut self, selector: &mut TableSelector, result: &AppResult<()>) {
        match result {
            Ok(()) => {
                self.fields = ReservationFields::default();
                selector.reset();
                self.visible = false;
                self.header_visible = false;
                self.alert = Some(FormAlert {
                    kind: AlertKind::Success,
                    message: SUCCESS_MESSAGE.to_string(),
                });
            }
            Err(AppError::Rejected { body, .. }) => {
                let detail = flatten_validation_errors(body)
                    .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
                self.alert = Some(FormAlert {
                    kind: AlertKind::Error,
                    message: format!("Error: {detail}"),
                });
            }
            Err(err) => {
                tracing::warn!(
                    code = err.code(),
                    retryable = err.retryable(),
                    error = %err,
                    "reservation submission failed"
                );
                self.alert = Some(FormAlert {
                    kind: AlertKind::Error,
                    message: SEND_FAILED_MESSAGE.to_string(),
                });
            }
        }
    }
}

/// `{date}T{time}`. Well-formed inputs are canonicalized through chrono;
/// anything else is passed on verbatim for the server to judge.
pub fn reservation_time(date: &str, time: &str) -> String {
    let date = date.trim();
    let time = time.trim();
    let parsed_date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok();
    let parsed_time = NaiveTime::parse_from_str(time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
        .ok();

    match (parsed_date, parsed_time) {
        (Some(date), Some(time)) if time.second() == 0 => {
            format!("{}T{}", date.format("%Y-%m-%d"), time.format("%H:%M"))
        }
        (Some(date), Some(time)) => {
            format!("{}T{}", date.format("%Y-%m-%d"), time.format("%H:%M:%S"))
        }
        _ => format!("{date}T{time}"),
    }
}

/// Joins the values of a validation error body with spaces, flattening one
/// level of lists: `{"phone": ["a", "b"], "email": "c"}` gives `"a b c"`.
/// Returns `None` for bodies that are not objects or lists.
pub fn flatten_validation_errors(body: &Value) -> Option<String> {
    let values: Vec<&Value> = match body {
        Value::Object(object) => object.values().collect(),
        Value::Array(items) => items.iter().collect(),
        _ => return None,
    };

    let parts = values
        .into_iter()
        .flat_map(|value| match value {
            Value::Array(items) => items.iter().map(error_text).collect::<Vec<_>>(),
            other => vec![error_text(other)],
        })
        .collect::<Vec<_>>();
    Some(parts.join(" "))
}

fn error_text(value: &Value) -> String {
    match value {
        Value::Array(items) => items.iter().map(error_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
        other => scalar_text(other).unwrap_or_default(),
    }
}
