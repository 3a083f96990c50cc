//! Quantcast audience-measurement adapter for Rust.
//!
//! Turns page, track, identify and completed-order events into the settings
//! records the Quantcast tag reads from its `_qevents` queue.
//!
//! # Example
//!
//! ```rust,ignore
//! use quantcast::{Identify, Page, Quantcast, Track};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), quantcast::Error> {
//!     let mut qc = Quantcast::builder("p-ZDsjJUtp583Se")
//!         .advertise(true)
//!         .build()?;
//!
//!     qc.identify(&Identify::new("usr_123"));
//!     qc.initialize(Some(&Page::new().category("Docs").name("Intro")));
//!
//!     qc.track(&Track::new("completed order")
//!         .property("orderId", "780bc55")
//!         .property("total", 99.99)
//!         .property("category", "tech"));
//!
//!     println!("{}", qc.to_json()?);
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod facade;
pub mod labels;
mod loader;
mod queue;
mod translator;
pub mod types;
mod user;

pub use config::{Options, QuantcastBuilder};
pub use error::Error;
pub use facade::{Identify, Page, Track};
pub use loader::{
    HttpTagLoader, Loader, ReadyCallback, ReadyFlag, TagConfig, TagVariant,
    DEFAULT_HTTPS_TAG_URL, DEFAULT_HTTP_TAG_URL, DEFAULT_TIMEOUT,
};
pub use queue::EventQueue;
pub use translator::Quantcast;
pub use types::{CustomLabels, Settings, SettingsEvent, SettingsField};
pub use user::{Anonymous, UserIdentity, UserStore};

/// Track events with this name (compared ASCII case-insensitively) are
/// handled as completed orders.
pub const COMPLETED_ORDER: &str = "completed order";
