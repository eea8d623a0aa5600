//! Transient per-device accessor
//!
//! A `DeviceView` holds only the device's protocol-assigned name and the
//! shared connection; every accessor re-resolves the underlying record, so a
//! view never goes stale and never caches. Equality is by underlying record
//! identity (same name over the same connection): two resolutions of one
//! name yield distinct view instances that compare equal.

use std::sync::Arc;

use indi_api::{AttrValue, Connection, PropertyKind, SwitchState, WidgetPayload};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::delegate::Delegating;
use crate::error::{Result, SdkError};
use crate::poll::{self, PollOptions};
use crate::property::{
    BlobProperty, LightProperty, NumberProperty, Property, SwitchProperty, TextProperty,
};

/// Accessor over one named device.
#[derive(Clone)]
pub struct DeviceView {
    name: String,
    connection: Arc<dyn Connection>,
    poll: PollOptions,
}

impl DeviceView {
    pub(crate) fn new(name: String, connection: Arc<dyn Connection>, poll: PollOptions) -> Self {
        Self {
            name,
            connection,
            poll,
        }
    }

    /// Protocol-assigned device name (case-sensitive).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the device's own `CONNECTION` switch reports it connected.
    ///
    /// `false` while the property is absent or every element is off.
    pub fn is_connected(&self) -> bool {
        let Some(record) = self.connection.get_property(&self.name, "CONNECTION") else {
            return false;
        };
        record.widgets.iter().any(|w| {
            w.name == "CONNECT"
                && matches!(
                    w.payload,
                    WidgetPayload::Switch {
                        state: SwitchState::On
                    }
                )
        })
    }

    /// Suspend until the named property is attached, then dispatch it to its
    /// typed variant (kind inferred from the resolved record).
    pub async fn get_property(&self, name: &str, cancel: &CancellationToken) -> Result<Property> {
        let record = poll::resolve(
            || self.connection.get_property(&self.name, name),
            &self.poll,
            cancel,
        )
        .await?;
        Property::from_record(record)
    }

    /// Resolve a property known to be a Number vector.
    pub async fn get_number_property(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<NumberProperty> {
        match self.get_property(name, cancel).await? {
            Property::Number(p) => Ok(p),
            other => Err(mismatch(name, PropertyKind::Number, &other)),
        }
    }

    /// Resolve a property known to be a Switch vector.
    pub async fn get_switch_property(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<SwitchProperty> {
        match self.get_property(name, cancel).await? {
            Property::Switch(p) => Ok(p),
            other => Err(mismatch(name, PropertyKind::Switch, &other)),
        }
    }

    /// Resolve a property known to be a Text vector.
    pub async fn get_text_property(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<TextProperty> {
        match self.get_property(name, cancel).await? {
            Property::Text(p) => Ok(p),
            other => Err(mismatch(name, PropertyKind::Text, &other)),
        }
    }

    /// Resolve a property known to be a Light vector.
    pub async fn get_light_property(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<LightProperty> {
        match self.get_property(name, cancel).await? {
            Property::Light(p) => Ok(p),
            other => Err(mismatch(name, PropertyKind::Light, &other)),
        }
    }

    /// Resolve a property known to be a Blob vector.
    pub async fn get_blob_property(
        &self,
        name: &str,
        cancel: &CancellationToken,
    ) -> Result<BlobProperty> {
        match self.get_property(name, cancel).await? {
            Property::Blob(p) => Ok(p),
            other => Err(mismatch(name, PropertyKind::Blob, &other)),
        }
    }

    /// Synchronous snapshot of the properties currently attached.
    ///
    /// No polling: returns whatever is known right now, possibly empty.
    /// Records the factory cannot dispatch are skipped with a warning.
    pub fn list_properties(&self) -> Vec<Property> {
        self.connection
            .get_properties(&self.name)
            .into_iter()
            .filter_map(|record| match Property::from_record(record) {
                Ok(property) => Some(property),
                Err(err) => {
                    warn!(device = %self.name, %err, "skipping undispatchable property");
                    None
                }
            })
            .collect()
    }
}

impl Delegating for DeviceView {
    /// Looks up against a current snapshot of the device record, so
    /// forwarding stops resolving once the device is retracted.
    fn record_attr(&self, name: &str) -> Option<AttrValue> {
        self.connection
            .get_device(&self.name)
            .and_then(|record| record.attribute(name))
    }
}

fn mismatch(name: &str, requested: PropertyKind, actual: &Property) -> SdkError {
    SdkError::KindMismatch {
        name: name.to_string(),
        requested,
        actual: actual.kind(),
    }
}

impl PartialEq for DeviceView {
    /// Underlying-record identity: same protocol name over the same
    /// connection. View instances themselves are transient.
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Arc::ptr_eq(&self.connection, &other.connection)
    }
}

impl std::fmt::Debug for DeviceView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceView").field("name", &self.name).finish()
    }
}
