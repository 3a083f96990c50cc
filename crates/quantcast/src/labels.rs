//! Label string formatting.
//!
//! A label string is `prefix.auto[,custom,...]`. Commas separate labels and
//! underscores are reserved by the tag, so every user-supplied token passes
//! through [`sanitize`] first.
//!
//! ```rust
//! use quantcast::labels::{format_labels, LabelKind};
//!
//! let labels = format_labels(LabelKind::Event, Some("my event"), None, &[], false);
//! assert_eq!(labels, "event.my event");
//!
//! let labels = format_labels(LabelKind::Event, Some("my event"), None, &[], true);
//! assert_eq!(labels, "_fp.event.my event");
//! ```

/// Marker prefix used by advertise ("first party") labels.
pub const PROMOTED_PREFIX: &str = "_fp";

/// Category used when a page has neither category nor name.
pub const DEFAULT_CATEGORY: &str = "All";

/// Name used when a page has neither category nor name.
pub const DEFAULT_NAME: &str = "Default";

/// Which label scheme an event uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    /// Page views: `page.<category>.<name>`.
    Page,
    /// Track-style events, completed orders included: `event.<name>`.
    Event,
}

impl LabelKind {
    fn prefix(self, advertise: bool) -> &'static str {
        match (advertise, self) {
            (true, _) => "_fp.event",
            (false, LabelKind::Page) => "page",
            (false, LabelKind::Event) => "event",
        }
    }
}

/// Strip everything except ASCII letters, digits and whitespace.
///
/// A comma takes the whitespace that directly follows it along with it, so
/// `"Category, Name"` collapses to `"CategoryName"`.
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut after_comma = false;
    for c in input.chars() {
        if c == ',' {
            after_comma = true;
            continue;
        }
        if c.is_whitespace() && after_comma {
            continue;
        }
        after_comma = false;
        if c.is_ascii_alphanumeric() || c.is_whitespace() {
            out.push(c);
        }
    }
    out
}

fn sanitize_opt(input: Option<&str>) -> Option<String> {
    input.map(sanitize).filter(|s| !s.is_empty())
}

/// Build a label string.
///
/// For [`LabelKind::Page`], `primary` is the category and `secondary` the
/// page name. For [`LabelKind::Event`], `primary` is the event name and
/// `secondary` is ignored. `custom` labels are appended after the automatic
/// segment in the order given.
pub fn format_labels(
    kind: LabelKind,
    primary: Option<&str>,
    secondary: Option<&str>,
    custom: &[String],
    advertise: bool,
) -> String {
    let auto = match kind {
        LabelKind::Page => {
            let separator = if advertise { " " } else { "." };
            match (sanitize_opt(primary), sanitize_opt(secondary)) {
                (None, None) => [DEFAULT_CATEGORY, DEFAULT_NAME].join(separator),
                (category, name) => category
                    .into_iter()
                    .chain(name)
                    .collect::<Vec<_>>()
                    .join(separator),
            }
        }
        LabelKind::Event => primary.map(sanitize).unwrap_or_default(),
    };

    let mut labels = format!("{}.{}", kind.prefix(advertise), auto);
    let custom = custom_segment(custom);
    if !custom.is_empty() {
        labels.push(',');
        labels.push_str(&custom);
    }
    labels
}

/// Sanitize and comma-join custom labels, dropping any that end up empty.
pub fn custom_segment(custom: &[String]) -> String {
    custom
        .iter()
        .map(|label| sanitize(label))
        .filter(|label| !label.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// An advertise extension label such as `_fp.pcat.tech`.
pub fn promoted_label(segment: &str, value: &str) -> String {
    format!("{}.{}.{}", PROMOTED_PREFIX, segment, value)
}
