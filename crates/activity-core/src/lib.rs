//! Core domain logic for the activity recognition viewer.
//!
//! This crate contains the fundamental types and logic for:
//! - Events: raw motion notifications and their one-time classification
//! - Store: the append-only session log with change notifications
//! - View: filtering, ordering and labelling rows for display
//! - Sources: the boundary to the motion service, including feed replay

mod event;
pub mod monitor;
pub mod source;
pub mod store;
mod types;
pub mod view;

pub use event::{ActivityEvent, ActivityKind, RawActivity};
pub use monitor::ActivityMonitor;
pub use source::{ActivityHandler, ActivitySource, ReplaySource};
pub use store::{EventStore, StoreChange, SubscriptionId};
pub use types::{Confidence, ConfidenceFilter, ValidationError};
pub use view::{BadgeColor, DisplayKind, classify, confidence_badge, format_start_time, project};
