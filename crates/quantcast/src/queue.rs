//! Pending queue of settings records.

use crate::types::{Settings, SettingsField};
use crate::Error;
use tracing::debug;

/// Ordered, append-only queue of settings records waiting for the tag to
/// pick them up.
///
/// Element 0 is special: an identify call may patch it before or after
/// initialization, so it is reachable by index rather than append only.
#[derive(Debug, Default)]
pub struct EventQueue {
    records: Vec<Settings>,
}

impl EventQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    pub fn push(&mut self, record: Settings) {
        debug!(
            index = self.records.len(),
            event = ?record.event,
            labels = record.labels.as_deref().unwrap_or(""),
            "queued settings"
        );
        self.records.push(record);
    }

    /// Set `field` on element 0, creating an empty record first if the queue
    /// is empty. Every other field of element 0 is preserved.
    pub fn patch_first(&mut self, field: SettingsField, value: impl Into<String>) {
        if self.records.is_empty() {
            self.records.push(Settings::default());
        }
        let value = value.into();
        debug!(field = field.as_str(), value = %value, "patched first settings");
        self.records[0].set(field, value);
    }

    /// Queue the initialization record.
    ///
    /// If element 0 is a placeholder left by an earlier [`patch_first`], the
    /// record is merged into it in place; the placeholder's `uid` survives
    /// only when the record has none.
    ///
    /// [`patch_first`]: EventQueue::patch_first
    pub fn push_initial(&mut self, mut record: Settings) {
        match self.records.first_mut() {
            Some(first) if first.is_placeholder() => {
                if record.uid.is_none() {
                    record.uid = first.uid.take();
                }
                debug!(uid = ?record.uid, "merged initial settings into placeholder");
                *first = record;
            }
            _ => self.push(record),
        }
    }

    /// The first record, if any.
    pub fn first(&self) -> Option<&Settings> {
        self.records.first()
    }

    /// All queued records in order.
    pub fn records(&self) -> &[Settings] {
        &self.records
    }

    /// Iterate over queued records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Settings> {
        self.records.iter()
    }

    /// Get the number of records in the queue.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serialize the queue as the JSON array the tag reads.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(&self.records)?)
    }
}

impl<'a> IntoIterator for &'a EventQueue {
    type Item = &'a Settings;
    type IntoIter = std::slice::Iter<'a, Settings>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
