//! In-memory [`Connection`] for tests and examples
//!
//! `MockConnection` plays the external client: tests announce devices and
//! properties through it and the adaptation layer observes them exactly as it
//! would observe a live server. Submitted property values are captured for
//! assertion and applied to the stored records so follow-up reads see them.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::connection::{ClientEvents, Connection};
use crate::record::{DeviceRecord, PropertyRecord};
use crate::types::BlobMode;

#[derive(Default)]
struct Inner {
    connected: bool,
    devices: Vec<DeviceRecord>,
    properties: Vec<PropertyRecord>,
    sent: Vec<PropertyRecord>,
    blob_modes: Vec<(BlobMode, String, String)>,
    events: Option<Arc<dyn ClientEvents>>,
}

/// In-memory stand-in for the external INDI client.
#[derive(Default)]
pub struct MockConnection {
    inner: RwLock<Inner>,
    refuse_connect: bool,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// A connection whose `connect_server` always fails.
    pub fn refusing() -> Self {
        Self {
            inner: RwLock::default(),
            refuse_connect: true,
        }
    }

    /// Announce a device. Re-announcing a known name is a no-op, matching
    /// the protocol's monotonic announcement semantics.
    pub fn announce_device(&self, name: &str) {
        let record = DeviceRecord {
            name: name.to_string(),
            driver: None,
        };
        let events = {
            let mut inner = self.inner.write();
            if inner.devices.iter().any(|d| d.name == name) {
                return;
            }
            inner.devices.push(record.clone());
            inner.events.clone()
        };
        debug!(device = %record.name, "mock device announced");
        if let Some(events) = events {
            events.on_device_added(&record);
        }
    }

    /// Remove a device and its properties.
    pub fn retract_device(&self, name: &str) {
        let (removed, events) = {
            let mut inner = self.inner.write();
            let slot = inner.devices.iter().position(|d| d.name == name);
            let removed = slot.map(|i| inner.devices.remove(i));
            inner.properties.retain(|p| p.device != name);
            (removed, inner.events.clone())
        };
        if let (Some(record), Some(events)) = (removed, events) {
            events.on_device_removed(&record);
        }
    }

    /// Attach or update a property on its device.
    pub fn announce_property(&self, record: PropertyRecord) {
        let (existing, events) = {
            let mut inner = self.inner.write();
            let slot = inner
                .properties
                .iter()
                .position(|p| p.device == record.device && p.name == record.name);
            match slot {
                Some(i) => inner.properties[i] = record.clone(),
                None => inner.properties.push(record.clone()),
            }
            (slot.is_some(), inner.events.clone())
        };
        debug!(device = %record.device, property = %record.name, "mock property announced");
        if let Some(events) = events {
            if existing {
                events.on_property_updated(&record);
            } else {
                events.on_property_added(&record);
            }
        }
    }

    /// Every record submitted through `send_new_property`, oldest first.
    pub fn sent(&self) -> Vec<PropertyRecord> {
        self.inner.read().sent.clone()
    }

    /// Every blob-mode configuration call, oldest first.
    pub fn blob_modes(&self) -> Vec<(BlobMode, String, String)> {
        self.inner.read().blob_modes.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.inner.read().connected
    }
}

impl Connection for MockConnection {
    fn connect_server(&self) -> bool {
        if self.refuse_connect {
            return false;
        }
        let events = {
            let mut inner = self.inner.write();
            inner.connected = true;
            inner.events.clone()
        };
        if let Some(events) = events {
            events.on_server_connected();
        }
        true
    }

    fn disconnect_server(&self) -> bool {
        let (was_connected, events) = {
            let mut inner = self.inner.write();
            let was = inner.connected;
            inner.connected = false;
            (was, inner.events.clone())
        };
        if was_connected {
            if let Some(events) = events {
                events.on_server_disconnected(0);
            }
        }
        was_connected
    }

    fn get_devices(&self) -> Vec<DeviceRecord> {
        self.inner.read().devices.clone()
    }

    fn get_device(&self, name: &str) -> Option<DeviceRecord> {
        self.inner
            .read()
            .devices
            .iter()
            .find(|d| d.name == name)
            .cloned()
    }

    fn get_property(&self, device: &str, name: &str) -> Option<PropertyRecord> {
        self.inner
            .read()
            .properties
            .iter()
            .find(|p| p.device == device && p.name == name)
            .cloned()
    }

    fn get_properties(&self, device: &str) -> Vec<PropertyRecord> {
        self.inner
            .read()
            .properties
            .iter()
            .filter(|p| p.device == device)
            .cloned()
            .collect()
    }

    fn send_new_property(&self, record: &PropertyRecord) {
        let mut inner = self.inner.write();
        inner.sent.push(record.clone());
        // Apply the submission so follow-up snapshots observe it, the way a
        // driver echoes accepted values back.
        if let Some(slot) = inner
            .properties
            .iter_mut()
            .find(|p| p.device == record.device && p.name == record.name)
        {
            *slot = record.clone();
        }
    }

    fn set_blob_mode(&self, mode: BlobMode, device: &str, channel: &str) {
        self.inner
            .write()
            .blob_modes
            .push((mode, device.to_string(), channel.to_string()));
    }

    fn register_events(&self, events: Arc<dyn ClientEvents>) {
        self.inner.write().events = Some(events);
    }
}
