//! Session lifecycle and device enumeration over the external client
//!
//! `Session` is the entry point: it owns the shared [`Connection`] handle and
//! the polling configuration, and hands out transient [`DeviceView`]s. The
//! external client remains the sole writer of device state; the session only
//! reads snapshots and submits new property values.

use std::sync::Arc;

use indi_api::{BlobMode, ClientEvents, Connection, DeviceRecord, PropertyRecord};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::device::DeviceView;
use crate::error::Result;
use crate::poll::{self, PollOptions};

/// Connection target and polling behavior, passed at construction.
///
/// No ambient globals: the interval and deadline configured here are the
/// ones every resolution made through this session uses.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub host: String,
    pub port: u16,
    pub poll: PollOptions,
}

impl SessionConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            poll: PollOptions::default(),
        }
    }

    pub fn with_poll(mut self, poll: PollOptions) -> Self {
        self.poll = poll;
        self
    }
}

/// Connected session against one INDI server.
pub struct Session {
    connection: Arc<dyn Connection>,
    config: SessionConfig,
}

impl Session {
    /// Wrap an external client handle. The log-only event hooks are
    /// installed immediately; see [`LogEvents`].
    pub fn new(connection: Arc<dyn Connection>, config: SessionConfig) -> Self {
        connection.register_events(Arc::new(LogEvents));
        Self { connection, config }
    }

    /// Initiate the server session.
    ///
    /// Returns `false` on failure (logged, never raised), so callers must
    /// check the result explicitly before resolving anything.
    pub fn connect(&self) -> bool {
        info!(host = %self.config.host, port = self.config.port, "connecting to INDI server");
        let connected = self.connection.connect_server();
        if !connected {
            error!(host = %self.config.host, port = self.config.port, "connection failed");
        }
        connected
    }

    /// Tear the session down. Idempotent.
    pub fn disconnect(&self) {
        info!(host = %self.config.host, port = self.config.port, "disconnecting");
        self.connection.disconnect_server();
    }

    /// Snapshot of currently known devices, in the external layer's order.
    ///
    /// Empty until discovery announces something; callers needing a device
    /// that has not yet appeared should use [`Session::resolve_device`].
    pub fn list_devices(&self) -> Vec<DeviceView> {
        self.connection
            .get_devices()
            .into_iter()
            .map(|record| self.view(record.name))
            .collect()
    }

    /// Suspend until a device of exactly this name is announced.
    pub async fn resolve_device(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<DeviceView> {
        let record = poll::resolve(
            || self.connection.get_device(name),
            &self.config.poll,
            cancel,
        )
        .await?;
        debug!(device = %record.name, "device resolved");
        Ok(self.view(record.name))
    }

    /// Configure which binary channels the server pushes for a device.
    ///
    /// Must be called before blob widgets on that channel carry payloads.
    pub fn set_blob_mode(&self, device: &str, channel: &str, mode: BlobMode) {
        debug!(%device, %channel, ?mode, "setting blob mode");
        self.connection.set_blob_mode(mode, device, channel);
    }

    /// Submit a modified property record for the driver to apply.
    ///
    /// Fire-and-forget: acceptance surfaces later as a regular update, which
    /// callers observe by re-resolving the property.
    pub fn send_new(&self, record: &PropertyRecord) {
        debug!(device = %record.device, property = %record.name, "submitting property");
        self.connection.send_new_property(record);
    }

    /// Polling configuration in effect for this session.
    pub fn poll_options(&self) -> &PollOptions {
        &self.config.poll
    }

    fn view(&self, name: String) -> DeviceView {
        DeviceView::new(name, Arc::clone(&self.connection), self.config.poll)
    }
}

/// Log-only implementation of the external client's callback surface.
///
/// Every protocol event becomes a debug line and nothing feeds back into
/// resolution state. Replace via
/// [`Connection::register_events`] for reactive behavior.
pub struct LogEvents;

impl ClientEvents for LogEvents {
    fn on_device_added(&self, device: &DeviceRecord) {
        debug!(device = %device.name, "new device");
    }

    fn on_device_removed(&self, device: &DeviceRecord) {
        debug!(device = %device.name, "device removed");
    }

    fn on_property_added(&self, property: &PropertyRecord) {
        debug!(
            device = %property.device,
            property = %property.name,
            code = property.type_code,
            "new property"
        );
    }

    fn on_property_updated(&self, property: &PropertyRecord) {
        debug!(
            device = %property.device,
            property = %property.name,
            state = %property.state,
            "property updated"
        );
    }

    fn on_property_removed(&self, property: &PropertyRecord) {
        debug!(device = %property.device, property = %property.name, "property removed");
    }

    fn on_message(&self, device: &str, message: &str) {
        debug!(%device, %message, "server message");
    }

    fn on_server_connected(&self) {
        debug!("server connected");
    }

    fn on_server_disconnected(&self, exit_code: i32) {
        debug!(exit_code, "server disconnected");
    }
}
