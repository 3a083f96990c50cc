//! Quantcast adapter implementation.

use crate::config::{Options, QuantcastBuilder, ReadyHook, SecurePredicate};
use crate::facade::{decimal_string, Identify, Page, Track};
use crate::labels::{format_labels, promoted_label, sanitize, LabelKind};
use crate::loader::{HttpTagLoader, Loader, ReadyFlag, TagVariant};
use crate::queue::EventQueue;
use crate::types::{Settings, SettingsEvent, SettingsField};
use crate::user::{Anonymous, UserIdentity};
use crate::Error;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Translates analytics events into Quantcast settings records.
///
/// # Example
///
/// ```rust,no_run
/// use quantcast::{Page, Quantcast, Track, UserStore};
///
/// # fn main() -> Result<(), quantcast::Error> {
/// let user = UserStore::new();
/// let mut qc = Quantcast::builder("p-ZDsjJUtp583Se")
///     .user(user.clone())
///     .build()?;
///
/// qc.initialize(Some(&Page::new().category("Docs").name("Intro")));
/// qc.track(&Track::new("signup").property("revenue", 10));
///
/// println!("{}", qc.to_json()?);
/// # Ok(())
/// # }
/// ```
pub struct Quantcast {
    options: Options,
    queue: EventQueue,
    user: Box<dyn UserIdentity>,
    loader: Box<dyn Loader>,
    secure: SecurePredicate,
    ready: ReadyFlag,
    on_ready: Option<ReadyHook>,
}

impl Quantcast {
    /// Create a new builder with the given account code.
    pub fn builder(p_code: impl Into<String>) -> QuantcastBuilder {
        QuantcastBuilder::new(p_code)
    }

    /// Get the adapter options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The pending queue, for whatever drains it.
    pub fn queue(&self) -> &EventQueue {
        &self.queue
    }

    /// Serialize the pending queue.
    pub fn to_json(&self) -> Result<String, Error> {
        self.queue.to_json()
    }

    /// Whether the tag has finished loading.
    pub fn is_ready(&self) -> bool {
        self.ready.is_set()
    }

    fn current_user(&self) -> Option<String> {
        self.user.user_id().filter(|id| !id.is_empty())
    }

    fn labels_for(
        &self,
        kind: LabelKind,
        primary: Option<&str>,
        secondary: Option<&str>,
        custom: &[String],
    ) -> String {
        format_labels(kind, primary, secondary, custom, self.options.advertise)
    }

    // ============================================
    // INITIALIZE
    // ============================================

    /// Queue the initial settings and start loading the tag.
    #[instrument(skip_all, fields(account = %self.options.p_code))]
    pub fn initialize(&mut self, page: Option<&Page>) {
        let mut settings = Settings::for_account(&self.options.p_code);
        settings.uid = self.current_user();
        if let Some(page) = page {
            settings.labels = Some(self.labels_for(
                LabelKind::Page,
                page.get_category(),
                page.get_name(),
                &[],
            ));
        }
        self.queue.push_initial(settings);

        let variant = TagVariant::from_secure((self.secure)());
        info!(variant = variant.as_str(), "initializing quantcast");

        let hook = self.on_ready.clone();
        self.loader.load(
            variant,
            Box::new(move || {
                debug!("quantcast tag ready");
                if let Some(hook) = hook {
                    hook();
                }
            }),
        );
    }

    // ============================================
    // PAGE
    // ============================================

    /// Queue a page view.
    pub fn page(&mut self, page: &Page) {
        let labels = self.labels_for(
            LabelKind::Page,
            page.get_category(),
            page.get_name(),
            &page.all_custom_labels(),
        );
        let settings = Settings {
            event: Some(SettingsEvent::Refresh),
            labels: Some(labels),
            uid: self.current_user(),
            ..Settings::for_account(&self.options.p_code)
        };
        self.queue.push(settings);
    }

    // ============================================
    // IDENTIFY
    // ============================================

    /// Carry the user id on the first queued record.
    ///
    /// Only element 0 is patched. Later `page` and `track` records read the
    /// user id from the [`UserIdentity`] lookup, so the host must also feed
    /// that lookup (for example [`UserStore::identify`]) for them to carry
    /// `uid`.
    ///
    /// [`UserStore::identify`]: crate::UserStore::identify
    pub fn identify(&mut self, identify: &Identify) {
        if let Some(id) = identify.user_id() {
            self.queue.patch_first(SettingsField::Uid, id);
        }
    }

    // ============================================
    // TRACK
    // ============================================

    /// Queue a track event. Completed orders take their own path.
    pub fn track(&mut self, track: &Track) {
        if track.is_completed_order() {
            self.completed_order(track);
            return;
        }

        let labels = self.labels_for(
            LabelKind::Event,
            Some(track.event()),
            None,
            &track.all_custom_labels(),
        );
        let settings = Settings {
            event: Some(SettingsEvent::Click),
            labels: Some(labels),
            uid: self.current_user(),
            revenue: track.revenue().map(|n| decimal_string(&n)),
            orderid: track.order_id(),
            ..Settings::for_account(&self.options.p_code)
        };
        self.queue.push(settings);
    }

    /// Queue a completed order.
    pub fn completed_order(&mut self, track: &Track) {
        let mut labels = self.labels_for(
            LabelKind::Event,
            Some(track.event()),
            None,
            &track.all_custom_labels(),
        );

        if self.options.advertise {
            let category = track.category().map(sanitize).filter(|c| !c.is_empty());
            if let Some(category) = category {
                labels.push(',');
                labels.push_str(&promoted_label("pcat", &category));
            }
            if let Some(repeat) = track.repeat() {
                let customer = if repeat { "repeat" } else { "new" };
                labels.push(',');
                labels.push_str(&promoted_label("customer", customer));
            }
        }

        // Quantcast expects completed orders as a refresh, not a click.
        let settings = Settings {
            event: Some(SettingsEvent::Refresh),
            labels: Some(labels),
            revenue: track.total().map(|n| decimal_string(&n)),
            orderid: track.order_id(),
            ..Settings::for_account(&self.options.p_code)
        };
        self.queue.push(settings);
    }
}

impl QuantcastBuilder {
    /// Build the adapter.
    pub fn build(self) -> Result<Quantcast, Error> {
        self.options.validate()?;

        let loader: Box<dyn Loader> = match self.loader {
            Some(loader) => loader,
            None => Box::new(HttpTagLoader::new(self.tag, self.ready.clone())?),
        };

        let user: Box<dyn UserIdentity> = match self.user {
            Some(user) => user,
            None => Box::new(Anonymous),
        };
        let secure: SecurePredicate = match self.secure {
            Some(secure) => secure,
            None => Arc::new(|| true),
        };

        Ok(Quantcast {
            options: self.options,
            queue: EventQueue::new(),
            user,
            loader,
            secure,
            ready: self.ready,
            on_ready: self.on_ready,
        })
    }
}

impl std::fmt::Debug for Quantcast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Quantcast")
            .field("options", &self.options)
            .field("queue", &self.queue)
            .field("ready", &self.ready.is_set())
            .finish_non_exhaustive()
    }
}
