//! Boundary types and traits for the INDI device-control protocol
//!
//! This crate defines the surface the adaptation layer (`indi-sdk`) consumes:
//! plain record structs describing devices, properties and their widgets as
//! last reported by an INDI server, plus the [`Connection`] trait mirroring
//! the external client's call surface and the [`ClientEvents`] hooks it fires.
//!
//! Nothing here speaks the wire protocol; a `Connection` implementation
//! (typically a binding to a native INDI client) is the sole writer of record
//! state. Every accessor returns a point-in-time snapshot.
//!
//! With the `test-support` feature enabled, [`mock::MockConnection`] provides
//! an in-memory implementation for tests and examples.

pub mod connection;
pub mod record;
pub mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod mock;

pub use connection::{ClientEvents, Connection};
pub use record::{AttrValue, DeviceRecord, PropertyRecord, WidgetPayload, WidgetRecord};
pub use types::{BlobMode, LightState, PropertyKind, PropertyState, SwitchState};
