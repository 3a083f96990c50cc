//! Settings records and their serialization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event type carried by a settings record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingsEvent {
    Refresh,
    Click,
}

/// One settings object as read by the Quantcast tag from `_qevents`.
///
/// Absent keys are skipped entirely; the tag treats key presence as
/// meaningful, so `null` must never reach the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qacct: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<SettingsEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orderid: Option<String>,
}

impl Settings {
    /// Create a record carrying only the account code.
    pub fn for_account(qacct: impl Into<String>) -> Self {
        Self {
            qacct: Some(qacct.into()),
            ..Self::default()
        }
    }

    /// Set a string-valued field, leaving the others untouched.
    pub fn set(&mut self, field: SettingsField, value: impl Into<String>) {
        let value = Some(value.into());
        match field {
            SettingsField::Qacct => self.qacct = value,
            SettingsField::Labels => self.labels = value,
            SettingsField::Uid => self.uid = value,
            SettingsField::Revenue => self.revenue = value,
            SettingsField::OrderId => self.orderid = value,
        }
    }

    /// A record created by a patch before initialization carries no account.
    pub fn is_placeholder(&self) -> bool {
        self.qacct.is_none()
    }
}

/// String-valued keys of a settings record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Qacct,
    Labels,
    Uid,
    Revenue,
    OrderId,
}

impl SettingsField {
    /// Wire name of the key.
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingsField::Qacct => "qacct",
            SettingsField::Labels => "labels",
            SettingsField::Uid => "uid",
            SettingsField::Revenue => "revenue",
            SettingsField::OrderId => "orderid",
        }
    }
}

/// Custom labels attached to an event through its `label` property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomLabels {
    Single(String),
    Many(Vec<String>),
}

impl CustomLabels {
    /// Decode a `label` property. Strings become `Single`, arrays keep their
    /// string elements; anything else is not a label.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(CustomLabels::Single(s.clone())),
            Value::Array(items) => Some(CustomLabels::Many(
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect(),
            )),
            _ => None,
        }
    }

    /// Normalize to a sequence.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            CustomLabels::Single(s) => vec![s],
            CustomLabels::Many(v) => v,
        }
    }
}

impl From<&str> for CustomLabels {
    fn from(s: &str) -> Self {
        CustomLabels::Single(s.into())
    }
}

impl From<String> for CustomLabels {
    fn from(s: String) -> Self {
        CustomLabels::Single(s)
    }
}

impl From<Vec<String>> for CustomLabels {
    fn from(v: Vec<String>) -> Self {
        CustomLabels::Many(v)
    }
}

impl From<CustomLabels> for Value {
    fn from(labels: CustomLabels) -> Value {
        match labels {
            CustomLabels::Single(s) => Value::String(s),
            CustomLabels::Many(v) => Value::Array(v.into_iter().map(Value::String).collect()),
        }
    }
}
