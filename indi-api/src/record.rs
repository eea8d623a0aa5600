//! Record structs describing device state as last reported by the server
//!
//! Records are plain, cloneable snapshots handed across the boundary. The
//! external client is the sole writer of the underlying state; holding a
//! record does not track later updates. Identity is the protocol-assigned
//! name (case-sensitive), never the snapshot instance.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{LightState, PropertyKind, PropertyState, SwitchState};

/// Snapshot of a device as currently known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Protocol-assigned unique device name, e.g. `"Telescope Simulator"`.
    pub name: String,
    /// Driver executable name, when the server reports one.
    pub driver: Option<String>,
}

impl DeviceRecord {
    /// Ad-hoc attribute lookup by the external API's camelCase names.
    ///
    /// Serves the delegation fallback; the declared accessors above are the
    /// primary surface.
    pub fn attribute(&self, name: &str) -> Option<AttrValue> {
        match name {
            "deviceName" => Some(AttrValue::Text(self.name.clone())),
            "driverName" => self.driver.clone().map(AttrValue::Text),
            _ => None,
        }
    }
}

/// Snapshot of one property vector: a named, typed group of widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    /// Owning device name.
    pub device: String,
    /// Property name, e.g. `"EQUATORIAL_EOD_COORD"`.
    pub name: String,
    /// Human-readable label.
    pub label: String,
    /// Group the driver files this property under, e.g. `"Main Control"`.
    pub group: String,
    /// Raw INDI type code. Kept raw so an out-of-range code reaches the
    /// factory and fails there instead of being silently dropped here.
    pub type_code: u8,
    /// Driver-reported property state.
    pub state: PropertyState,
    /// Permission string as reported, e.g. `"rw"`.
    pub permission: String,
    /// Last-update timestamp string as reported by the driver.
    pub timestamp: String,
    /// Widgets in protocol order. Order is semantic (index 0 = RA, 1 = DEC
    /// for coordinate vectors) and must be preserved verbatim.
    pub widgets: Vec<WidgetRecord>,
}

impl PropertyRecord {
    /// The property kind, if the raw type code maps to one.
    pub fn kind(&self) -> Option<PropertyKind> {
        PropertyKind::from_code(self.type_code)
    }

    /// Ad-hoc attribute lookup by the external API's camelCase names.
    pub fn attribute(&self, name: &str) -> Option<AttrValue> {
        match name {
            "deviceName" => Some(AttrValue::Text(self.device.clone())),
            "name" => Some(AttrValue::Text(self.name.clone())),
            "label" => Some(AttrValue::Text(self.label.clone())),
            "groupName" => Some(AttrValue::Text(self.group.clone())),
            "permission" => Some(AttrValue::Text(self.permission.clone())),
            "timestamp" => Some(AttrValue::Text(self.timestamp.clone())),
            "stateAsString" => Some(AttrValue::Text(self.state.to_string())),
            _ => None,
        }
    }
}

/// Snapshot of one widget (the smallest addressable element of a property).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetRecord {
    /// Widget name, e.g. `"RA"`.
    pub name: String,
    /// Human-readable label.
    pub label: String,
    /// Kind-specific payload.
    pub payload: WidgetPayload,
}

impl WidgetRecord {
    /// The kind implied by this widget's concrete payload representation.
    pub fn kind(&self) -> PropertyKind {
        match self.payload {
            WidgetPayload::Number { .. } => PropertyKind::Number,
            WidgetPayload::Switch { .. } => PropertyKind::Switch,
            WidgetPayload::Text { .. } => PropertyKind::Text,
            WidgetPayload::Light { .. } => PropertyKind::Light,
            WidgetPayload::Blob { .. } => PropertyKind::Blob,
        }
    }

    /// Ad-hoc attribute lookup by the external API's camelCase names.
    pub fn attribute(&self, name: &str) -> Option<AttrValue> {
        match name {
            "name" => Some(AttrValue::Text(self.name.clone())),
            "label" => Some(AttrValue::Text(self.label.clone())),
            _ => match (&self.payload, name) {
                (WidgetPayload::Number { value, .. }, "value") => {
                    Some(AttrValue::Number(*value))
                }
                (WidgetPayload::Number { format, .. }, "format") => {
                    Some(AttrValue::Text(format.clone()))
                }
                (WidgetPayload::Switch { state }, "stateAsString") => {
                    Some(AttrValue::Text(state.to_string()))
                }
                (WidgetPayload::Text { text }, "text") => Some(AttrValue::Text(text.clone())),
                (WidgetPayload::Light { state }, "stateAsString") => {
                    Some(AttrValue::Text(state.to_string()))
                }
                (WidgetPayload::Blob { data, .. }, "size") => {
                    Some(AttrValue::Number(data.len() as f64))
                }
                (WidgetPayload::Blob { format, .. }, "format") => {
                    Some(AttrValue::Text(format.clone()))
                }
                _ => None,
            },
        }
    }
}

/// Kind-specific widget payload.
///
/// This union is closed: each of the external client's five widget
/// representations maps to exactly one variant, so dispatch on it is a
/// total match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WidgetPayload {
    Number {
        value: f64,
        min: f64,
        max: f64,
        step: f64,
        /// printf-style display format, e.g. `"%10.6m"`.
        format: String,
    },
    Switch {
        state: SwitchState,
    },
    Text {
        text: String,
    },
    Light {
        state: LightState,
    },
    Blob {
        /// Raw payload bytes. Populated only after blob delivery is enabled
        /// for the channel.
        data: Vec<u8>,
        /// Format tag including the leading dot, e.g. `".fits"`.
        format: String,
    },
}

/// Value returned by the ad-hoc attribute surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    Text(String),
    Number(f64),
    Flag(bool),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(s) => write!(f, "{}", s),
            AttrValue::Number(n) => write!(f, "{}", n),
            AttrValue::Flag(b) => write!(f, "{}", b),
        }
    }
}
