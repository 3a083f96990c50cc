//! Inbound event facades.
//!
//! Events are built fluently and read back through accessors that keep
//! "absent", "empty" and "zero" apart.

use crate::types::CustomLabels;
use serde_json::{Number, Value};
use std::collections::HashMap;

fn string_property<'a>(properties: &'a HashMap<String, Value>, key: &str) -> Option<&'a str> {
    properties.get(key).and_then(Value::as_str)
}

/// Numbers pass through; strings are parsed after dropping `$` signs.
/// Integers stay exact and non-finite values are rejected.
fn numeric_property(properties: &HashMap<String, Value>, key: &str) -> Option<Number> {
    match properties.get(key)? {
        Value::Number(n) => Some(n.clone()),
        Value::String(s) => parse_number(s.replace('$', "").trim()),
        _ => None,
    }
}

fn parse_number(s: &str) -> Option<Number> {
    if let Ok(i) = s.parse::<i64>() {
        return Some(i.into());
    }
    if let Ok(u) = s.parse::<u64>() {
        return Some(u.into());
    }
    s.parse::<f64>().ok().and_then(Number::from_f64)
}

fn labels_property(properties: &HashMap<String, Value>) -> Option<CustomLabels> {
    properties.get("label").and_then(CustomLabels::from_value)
}

/// Decimal string for the wire. Integers are printed exactly; floats drop an
/// integral `.0` and `-0` prints as `0`.
pub(crate) fn decimal_string(value: &Number) -> String {
    if let Some(i) = value.as_i64() {
        return i.to_string();
    }
    if let Some(u) = value.as_u64() {
        return u.to_string();
    }
    match value.as_f64() {
        Some(f) if f == 0.0 => "0".into(),
        Some(f) => format!("{}", f),
        None => value.to_string(),
    }
}

// ============================================
// PAGE
// ============================================

/// A page view.
#[derive(Debug, Clone, Default)]
pub struct Page {
    category: Option<String>,
    name: Option<String>,
    properties: HashMap<String, Value>,
    custom_labels: Vec<String>,
}

impl Page {
    /// Create a page view with no category or name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a page view with a name only.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new().name(name)
    }

    /// Set the page category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the page name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a property.
    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Set the `label` property.
    pub fn label(self, labels: impl Into<CustomLabels>) -> Self {
        let labels: CustomLabels = labels.into();
        self.property("label", labels)
    }

    /// Append to the per-event custom label list.
    pub fn custom_label(mut self, label: impl Into<String>) -> Self {
        self.custom_labels.push(label.into());
        self
    }

    /// Page category.
    pub fn get_category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Page name.
    pub fn get_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Custom labels from the `label` property.
    pub fn labels(&self) -> Option<CustomLabels> {
        labels_property(&self.properties)
    }

    /// The per-event custom label list.
    pub fn custom_labels(&self) -> &[String] {
        &self.custom_labels
    }

    /// `label` property first, then the per-event list.
    pub fn all_custom_labels(&self) -> Vec<String> {
        merge_labels(self.labels(), &self.custom_labels)
    }
}

// ============================================
// TRACK
// ============================================

/// A track event, including completed orders.
#[derive(Debug, Clone)]
pub struct Track {
    event: String,
    properties: HashMap<String, Value>,
    custom_labels: Vec<String>,
}

impl Track {
    /// Create a track event with the given name.
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            properties: HashMap::new(),
            custom_labels: Vec::new(),
        }
    }

    /// Add a property.
    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Set the `label` property.
    pub fn label(self, labels: impl Into<CustomLabels>) -> Self {
        let labels: CustomLabels = labels.into();
        self.property("label", labels)
    }

    /// Append to the per-event custom label list.
    pub fn custom_label(mut self, label: impl Into<String>) -> Self {
        self.custom_labels.push(label.into());
        self
    }

    /// Event name.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Whether this is a completed-order event.
    pub fn is_completed_order(&self) -> bool {
        self.event.eq_ignore_ascii_case(crate::COMPLETED_ORDER)
    }

    /// Numeric `revenue` property. Zero counts as present.
    pub fn revenue(&self) -> Option<Number> {
        numeric_property(&self.properties, "revenue")
    }

    /// Numeric `total` property, falling back to revenue.
    pub fn total(&self) -> Option<Number> {
        numeric_property(&self.properties, "total").or_else(|| self.revenue())
    }

    /// Order id from `orderId` or `order_id`, stringified.
    pub fn order_id(&self) -> Option<String> {
        let value = self
            .properties
            .get("orderId")
            .or_else(|| self.properties.get("order_id"))?;
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(decimal_string(n)),
            _ => None,
        }
    }

    /// `category` property.
    pub fn category(&self) -> Option<&str> {
        string_property(&self.properties, "category")
    }

    /// `repeat` property, only when it is a boolean.
    pub fn repeat(&self) -> Option<bool> {
        self.properties.get("repeat").and_then(Value::as_bool)
    }

    /// Custom labels from the `label` property.
    pub fn labels(&self) -> Option<CustomLabels> {
        labels_property(&self.properties)
    }

    /// The per-event custom label list.
    pub fn custom_labels(&self) -> &[String] {
        &self.custom_labels
    }

    /// `label` property first, then the per-event list.
    pub fn all_custom_labels(&self) -> Vec<String> {
        merge_labels(self.labels(), &self.custom_labels)
    }
}

fn merge_labels(primary: Option<CustomLabels>, rest: &[String]) -> Vec<String> {
    let mut labels = primary.map(CustomLabels::into_vec).unwrap_or_default();
    labels.extend(rest.iter().cloned());
    labels
}

// ============================================
// IDENTIFY
// ============================================

/// An identify call.
#[derive(Debug, Clone, Default)]
pub struct Identify {
    user_id: Option<String>,
}

impl Identify {
    /// Identify a user by id.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    /// An identify call that carries no user id.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// The user id, if any and non-empty.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref().filter(|id| !id.is_empty())
    }
}
