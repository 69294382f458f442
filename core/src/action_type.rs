//! The closed vocabulary of synthetic action events.
//!
//! Every event submitted to the synthetic log must name one of these kinds.
//! Validation happens at the boundary, before anything reaches the
//! [`EventLog`](crate::event_log::EventLog).

use crate::error::SyntheticError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Kind of a synthetic action event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Free-form event with caller-defined meaning
    Custom,
    /// UI element was clicked
    Click,
    /// Backing data was changed
    DbUpdate,
    /// Page was scrolled
    Scroll,
    /// A form was submitted
    FormSubmit,
    /// Client navigated between pages
    Navigation,
    /// A booking was made or attempted
    Booking,
    /// A search was run
    Search,
}

impl ActionType {
    /// Every action type, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Custom,
        Self::Click,
        Self::DbUpdate,
        Self::Scroll,
        Self::FormSubmit,
        Self::Navigation,
        Self::Booking,
        Self::Search,
    ];

    /// Wire label of this action type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Custom => "custom",
            Self::Click => "click",
            Self::DbUpdate => "db_update",
            Self::Scroll => "scroll",
            Self::FormSubmit => "form_submit",
            Self::Navigation => "navigation",
            Self::Booking => "booking",
            Self::Search => "search",
        }
    }

    /// Validate a raw label against the closed set.
    ///
    /// # Errors
    ///
    /// Returns [`SyntheticError::InvalidActionType`] carrying the offending
    /// label, or [`ActionLabel::Missing`] when no label was given.
    pub fn validate(label: Option<&str>) -> Result<Self, SyntheticError> {
        match label {
            Some(raw) if !raw.is_empty() => raw.parse(),
            _ => Err(SyntheticError::InvalidActionType(ActionLabel::Missing)),
        }
    }

    /// Validate a label taken straight from a JSON body.
    ///
    /// Non-string values are never valid. Empty ones (`false`, `0`, `[]`,
    /// `{}`) are reported as a missing label, anything else by its compact
    /// JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SyntheticError::InvalidActionType`] when the value is not
    /// one of the known labels.
    pub fn validate_json(label: Option<&Value>) -> Result<Self, SyntheticError> {
        match label {
            Some(Value::String(raw)) => Self::validate(Some(raw.as_str())),
            Some(value) if !is_empty_json(value) => Err(SyntheticError::InvalidActionType(
                ActionLabel::Given(value.to_string()),
            )),
            _ => Self::validate(None),
        }
    }
}

/// `null`, `false`, zero and empty containers carry no label.
fn is_empty_json(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

impl FromStr for ActionType {
    type Err = SyntheticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| SyntheticError::InvalidActionType(ActionLabel::Given(s.to_string())))
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The label a caller submitted, as reported back on rejection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionLabel {
    /// No label (absent, `null`, or empty)
    Missing,
    /// The raw label as given
    Given(String),
}

impl fmt::Display for ActionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Clients match on this exact text.
            Self::Missing => f.write_str("None"),
            Self::Given(raw) => f.write_str(raw),
        }
    }
}
