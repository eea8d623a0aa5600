//! # indi-sdk: linear, query-style access to INDI devices
//!
//! The INDI protocol is callback-driven: drivers announce devices and typed
//! property vectors whenever they feel like it, and a native client surfaces
//! that state through present-or-absent accessors plus event hooks. This
//! crate adapts that push model so callers can write linear code instead:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use indi_api::{BlobMode, SwitchState};
//! use indi_sdk::{Session, SessionConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run(connection: Arc<dyn indi_api::Connection>) -> indi_sdk::Result<()> {
//! let session = Session::new(connection, SessionConfig::new("indi", 7624));
//! if !session.connect() {
//!     return Ok(()); // logged; nothing to resolve against
//! }
//!
//! let cancel = CancellationToken::new();
//! let telescope = session.resolve_device("Telescope Simulator", &cancel).await?;
//!
//! let mut switches = telescope.get_switch_property("CONNECTION", &cancel).await?;
//! if !telescope.is_connected() {
//!     switches.reset();
//!     switches.set_state(0, SwitchState::On);
//!     session.send_new(switches.record());
//! }
//!
//! session.set_blob_mode("CCD Simulator", "CCD1", BlobMode::Also);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Session (connect / enumerate / submit)
//!     ↓
//! DeviceView (resolve properties by name, typed or generic)
//!     ↓
//! Property / Widget variants (typed snapshots, five kinds each)
//!     ↓
//! indi-api (Connection trait over the native client)
//! ```
//!
//! Every resolution goes through [`poll::resolve`], which converts the
//! external layer's "announced eventually, absent right now" state into one
//! awaitable result with an explicit timeout and a cancellation token.
//! Everything a view returns is a point-in-time snapshot: later driver
//! updates are observed by resolving again, never in place.

pub use device::DeviceView;
pub use error::{Result, SdkError};
pub use poll::PollOptions;
pub use property::{
    BlobProperty, LightProperty, NumberProperty, Property, SwitchProperty, TextProperty,
};
pub use session::{LogEvents, Session, SessionConfig};
pub use widget::{BlobWidget, LightWidget, NumberWidget, SwitchWidget, TextWidget, Widget};

// Re-export the boundary types callers hold alongside the views.
pub use indi_api::{
    AttrValue, BlobMode, LightState, PropertyKind, PropertyRecord, PropertyState, SwitchState,
};

pub mod capture;
pub mod delegate;
pub mod naming;
pub mod poll;

mod device;
mod error;
mod property;
mod session;
mod widget;
