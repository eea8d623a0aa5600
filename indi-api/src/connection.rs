//! The external client's call surface and callback hooks
//!
//! [`Connection`] mirrors the native INDI client one-to-one: present-or-absent
//! accessors over state the client maintains out-of-band, plus fire-and-forget
//! submission of new property values. Implementations own all synchronization;
//! callers treat every return value as a point-in-time snapshot.

use std::sync::Arc;

use crate::record::{DeviceRecord, PropertyRecord};
use crate::types::BlobMode;

/// Call surface of the external device-control client.
///
/// Device and property announcement is monotonic per name: once a name is
/// announced it stays present until an explicit removal event, so repeated
/// lookups are idempotent and safe to retry.
pub trait Connection: Send + Sync {
    /// Initiate the server session. `false` on failure.
    fn connect_server(&self) -> bool;

    /// Tear the session down. Idempotent; `false` if nothing was connected.
    fn disconnect_server(&self) -> bool;

    /// Snapshot of currently known devices, in announcement order.
    fn get_devices(&self) -> Vec<DeviceRecord>;

    /// Snapshot of one device, if announced.
    fn get_device(&self, name: &str) -> Option<DeviceRecord>;

    /// Snapshot of one property of a device, if attached.
    fn get_property(&self, device: &str, name: &str) -> Option<PropertyRecord>;

    /// Snapshot of every property currently attached to a device, in
    /// announcement order. Empty for unknown devices.
    fn get_properties(&self, device: &str) -> Vec<PropertyRecord>;

    /// Submit a modified property for the driver to apply. Fire-and-forget;
    /// delivery and acknowledgement surface later as regular updates.
    fn send_new_property(&self, record: &PropertyRecord);

    /// Configure binary payload delivery for a device channel. Must be set
    /// before blob widgets carry data.
    fn set_blob_mode(&self, mode: BlobMode, device: &str, channel: &str);

    /// Install the hook set the client fires on protocol events. Replaces
    /// any previously registered handler.
    fn register_events(&self, events: Arc<dyn ClientEvents>);
}

/// Hooks fired by the external client as protocol events arrive.
///
/// Delivery is single-threaded with respect to the adaptation layer. These
/// are an extension point; the resolution path never depends on them.
#[allow(unused_variables)]
pub trait ClientEvents: Send + Sync {
    fn on_device_added(&self, device: &DeviceRecord) {}
    fn on_device_removed(&self, device: &DeviceRecord) {}
    fn on_property_added(&self, property: &PropertyRecord) {}
    fn on_property_updated(&self, property: &PropertyRecord) {}
    fn on_property_removed(&self, property: &PropertyRecord) {}
    fn on_message(&self, device: &str, message: &str) {}
    fn on_server_connected(&self) {}
    fn on_server_disconnected(&self, exit_code: i32) {}
}
