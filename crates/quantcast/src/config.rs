//! Adapter configuration.

use crate::loader::{Loader, ReadyFlag, TagConfig};
use crate::user::UserIdentity;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Per-adapter options, as found in the integration settings.
///
/// ```rust
/// let options = quantcast::Options::from_json(r#"{"pCode": "p-ZDsjJUtp583Se"}"#).unwrap();
/// assert_eq!(options.p_code(), "p-ZDsjJUtp583Se");
/// assert!(!options.advertise());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    pub(crate) p_code: String,
    #[serde(default)]
    pub(crate) advertise: bool,
}

impl Options {
    /// Create options for the given account code.
    pub fn new(p_code: impl Into<String>) -> Self {
        Self {
            p_code: p_code.into(),
            advertise: false,
        }
    }

    /// Parse options from integration-settings JSON.
    pub fn from_json(json: &str) -> Result<Self, crate::Error> {
        let options: Options = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Check that the account code is set.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.p_code.is_empty() {
            return Err(crate::Error::Config("pCode cannot be empty".into()));
        }
        Ok(())
    }

    /// Get the account code.
    pub fn p_code(&self) -> &str {
        &self.p_code
    }

    /// Whether advertise labels are in use.
    pub fn advertise(&self) -> bool {
        self.advertise
    }
}

pub(crate) type SecurePredicate = Arc<dyn Fn() -> bool + Send + Sync>;
pub(crate) type ReadyHook = Arc<dyn Fn() + Send + Sync>;

/// Builder for the Quantcast adapter.
pub struct QuantcastBuilder {
    pub(crate) options: Options,
    pub(crate) tag: TagConfig,
    pub(crate) user: Option<Box<dyn UserIdentity>>,
    pub(crate) loader: Option<Box<dyn Loader>>,
    pub(crate) secure: Option<SecurePredicate>,
    pub(crate) ready: ReadyFlag,
    pub(crate) on_ready: Option<ReadyHook>,
}

impl QuantcastBuilder {
    /// Create a new builder with the given account code.
    pub fn new(p_code: impl Into<String>) -> Self {
        Self::from_options(Options::new(p_code))
    }

    /// Create a new builder from parsed options.
    pub fn from_options(options: Options) -> Self {
        Self {
            options,
            tag: TagConfig::default(),
            user: None,
            loader: None,
            secure: None,
            ready: ReadyFlag::new(),
            on_ready: None,
        }
    }

    /// Enable advertise labels.
    pub fn advertise(mut self, advertise: bool) -> Self {
        self.options.advertise = advertise;
        self
    }

    /// Set the user identity lookup.
    ///
    /// Defaults to [`Anonymous`](crate::Anonymous). `uid` on page and track
    /// records comes only from this lookup, so a host that identifies users
    /// should pass a [`UserStore`](crate::UserStore) and update it alongside
    /// `Quantcast::identify`.
    pub fn user(mut self, user: impl UserIdentity + 'static) -> Self {
        self.user = Some(Box::new(user));
        self
    }

    /// Replace the default HTTP tag loader.
    pub fn loader(mut self, loader: impl Loader + 'static) -> Self {
        self.loader = Some(Box::new(loader));
        self
    }

    /// Share a ready flag with a custom loader.
    pub fn ready_flag(mut self, ready: ReadyFlag) -> Self {
        self.ready = ready;
        self
    }

    /// Decide per initialization whether the secure tag is loaded.
    pub fn use_https(mut self, predicate: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.secure = Some(Arc::new(predicate));
        self
    }

    /// Always load the secure (or always the plain) tag.
    pub fn prefer_secure(self, secure: bool) -> Self {
        self.use_https(move || secure)
    }

    /// Called every time a tag load completes.
    pub fn on_ready(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_ready = Some(Arc::new(hook));
        self
    }

    /// Set the plain HTTP tag URL.
    pub fn http_tag_url(mut self, url: impl Into<String>) -> Self {
        self.tag.http_url = url.into();
        self
    }

    /// Set the HTTPS tag URL.
    pub fn https_tag_url(mut self, url: impl Into<String>) -> Self {
        self.tag.https_url = url.into();
        self
    }

    /// Set the tag request timeout.
    pub fn load_timeout(mut self, timeout: Duration) -> Self {
        self.tag.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for QuantcastBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuantcastBuilder")
            .field("options", &self.options)
            .field("tag", &self.tag)
            .field("custom_loader", &self.loader.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{DEFAULT_HTTPS_TAG_URL, DEFAULT_HTTP_TAG_URL, DEFAULT_TIMEOUT};

    #[test]
    fn test_options_from_json_defaults() {
        let options = Options::from_json(r#"{"pCode": "p-test"}"#).unwrap();

        assert_eq!(options.p_code(), "p-test");
        assert!(!options.advertise());
    }

    #[test]
    fn test_options_from_json_advertise() {
        let options = Options::from_json(r#"{"pCode": "p-test", "advertise": true}"#).unwrap();
        assert!(options.advertise());
    }

    #[test]
    fn test_options_empty_p_code_fails() {
        let result = Options::from_json(r#"{"pCode": ""}"#);
        assert!(matches!(result, Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_options_missing_p_code_fails() {
        let result = Options::from_json(r#"{"advertise": true}"#);
        assert!(matches!(result, Err(crate::Error::Serialization(_))));
    }

    #[test]
    fn test_builder_defaults() {
        let builder = QuantcastBuilder::new("p-test");

        assert_eq!(builder.options.p_code(), "p-test");
        assert!(!builder.options.advertise());
        assert_eq!(builder.tag.http_url, DEFAULT_HTTP_TAG_URL);
        assert_eq!(builder.tag.https_url, DEFAULT_HTTPS_TAG_URL);
        assert_eq!(builder.tag.timeout, DEFAULT_TIMEOUT);
        assert!(builder.user.is_none());
        assert!(builder.loader.is_none());
    }

    #[test]
    fn test_builder_custom_values() {
        let builder = QuantcastBuilder::new("p-test")
            .advertise(true)
            .http_tag_url("http://localhost/quant.js")
            .https_tag_url("https://localhost/quant.js")
            .load_timeout(Duration::from_secs(3));

        assert!(builder.options.advertise());
        assert_eq!(builder.tag.http_url, "http://localhost/quant.js");
        assert_eq!(builder.tag.https_url, "https://localhost/quant.js");
        assert_eq!(builder.tag.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_builder_accepts_string_and_str() {
        let _ = QuantcastBuilder::new("p-test");
        let _ = QuantcastBuilder::new(String::from("p-test"));
        let _ = QuantcastBuilder::new("p-test").https_tag_url(String::from("https://example.com"));
    }
}
