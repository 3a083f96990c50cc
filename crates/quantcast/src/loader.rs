//! Tag script loading.

use crate::Error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Default plain HTTP tag URL.
pub const DEFAULT_HTTP_TAG_URL: &str = "http://edge.quantserve.com/quant.js";

/// Default HTTPS tag URL.
pub const DEFAULT_HTTPS_TAG_URL: &str = "https://secure.quantserve.com/quant.js";

/// Default tag request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Which tag variant to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagVariant {
    Http,
    Https,
}

impl TagVariant {
    /// Pick the variant from a "use secure transport" decision.
    pub fn from_secure(secure: bool) -> Self {
        if secure {
            TagVariant::Https
        } else {
            TagVariant::Http
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TagVariant::Http => "http",
            TagVariant::Https => "https",
        }
    }
}

/// Invoked once the tag has loaded.
pub type ReadyCallback = Box<dyn FnOnce() + Send + 'static>;

/// Loads the tag script and reports completion.
pub trait Loader: Send + Sync {
    /// Start loading `variant`. `on_ready` runs at most once, after the tag
    /// has loaded; a failed load never calls it.
    fn load(&self, variant: TagVariant, on_ready: ReadyCallback);
}

/// Set once the tag is live. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct ReadyFlag(Arc<AtomicBool>);

impl ReadyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Tag URLs and request timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagConfig {
    pub http_url: String,
    pub https_url: String,
    pub timeout: Duration,
}

impl TagConfig {
    /// URL for a variant.
    pub fn url(&self, variant: TagVariant) -> &str {
        match variant {
            TagVariant::Http => &self.http_url,
            TagVariant::Https => &self.https_url,
        }
    }
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            http_url: DEFAULT_HTTP_TAG_URL.into(),
            https_url: DEFAULT_HTTPS_TAG_URL.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Loader that fetches the tag script over HTTP on the ambient tokio runtime.
#[derive(Debug, Clone)]
pub struct HttpTagLoader {
    client: reqwest::Client,
    config: TagConfig,
    ready: ReadyFlag,
}

impl HttpTagLoader {
    /// Create a loader that raises `ready` once a fetch succeeds.
    pub fn new(config: TagConfig, ready: ReadyFlag) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            config,
            ready,
        })
    }

    /// Fetch the tag script and mark the tag ready.
    pub async fn fetch(&self, variant: TagVariant) -> Result<(), Error> {
        let url = self.config.url(variant);
        debug!(url = %url, variant = variant.as_str(), "loading tag");

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(status = %status, url = %url, "tag request failed");
            return Err(Error::TagLoad {
                status: status.as_u16(),
            });
        }

        let script = response.bytes().await?;
        debug!(bytes = script.len(), "tag loaded");

        self.ready.set();
        Ok(())
    }
}

impl Loader for HttpTagLoader {
    fn load(&self, variant: TagVariant, on_ready: ReadyCallback) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                warn!(variant = variant.as_str(), "no tokio runtime, tag not loaded");
                return;
            }
        };

        let loader = self.clone();
        handle.spawn(async move {
            match loader.fetch(variant).await {
                Ok(()) => on_ready(),
                Err(e) => warn!(error = %e, "tag load failed"),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_from_secure() {
        assert_eq!(TagVariant::from_secure(true), TagVariant::Https);
        assert_eq!(TagVariant::from_secure(false), TagVariant::Http);
        assert_eq!(TagVariant::Https.as_str(), "https");
    }

    #[test]
    fn test_url_selection() {
        let config = TagConfig::default();

        assert_eq!(config.url(TagVariant::Http), DEFAULT_HTTP_TAG_URL);
        assert_eq!(config.url(TagVariant::Https), DEFAULT_HTTPS_TAG_URL);
    }

    #[test]
    fn test_ready_flag_shared() {
        let flag = ReadyFlag::new();
        let other = flag.clone();

        assert!(!flag.is_set());
        other.set();
        assert!(flag.is_set());
    }

    #[test]
    fn test_load_without_runtime_is_silent() {
        let ready = ReadyFlag::new();
        let loader = HttpTagLoader::new(TagConfig::default(), ready.clone()).unwrap();

        loader.load(
            TagVariant::Https,
            Box::new(|| panic!("ready without a runtime")),
        );

        assert!(!ready.is_set());
    }
}
