//! Protocol enums shared by records and the adaptation layer
//!
//! The numeric codes follow the INDI client library's constants so that a
//! native binding can map its values straight through.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The five property kinds a driver can announce.
///
/// A property's kind is fixed at creation and shared by every widget it
/// contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyKind {
    Number,
    Switch,
    Text,
    Light,
    Blob,
}

impl PropertyKind {
    /// Map a raw INDI type code to a kind.
    ///
    /// Returns `None` for codes outside the five known kinds (including the
    /// protocol's own "unknown" sentinel).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Number),
            1 => Some(Self::Switch),
            2 => Some(Self::Text),
            3 => Some(Self::Light),
            4 => Some(Self::Blob),
            _ => None,
        }
    }

    /// The raw INDI type code for this kind.
    pub fn code(self) -> u8 {
        match self {
            Self::Number => 0,
            Self::Switch => 1,
            Self::Text => 2,
            Self::Light => 3,
            Self::Blob => 4,
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Number => "Number",
            Self::Switch => "Switch",
            Self::Text => "Text",
            Self::Light => "Light",
            Self::Blob => "Blob",
        };
        write!(f, "{}", name)
    }
}

/// Property-level state reported by the driver (the IPS codes).
///
/// Orchestration code polls this while an operation is in flight, e.g. a
/// slew holds the coordinate property `Busy` until the mount settles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyState {
    #[default]
    Idle,
    Ok,
    Busy,
    Alert,
}

impl fmt::Display for PropertyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "Idle",
            Self::Ok => "Ok",
            Self::Busy => "Busy",
            Self::Alert => "Alert",
        };
        write!(f, "{}", name)
    }
}

/// On/off state of a switch widget (the ISS codes).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwitchState {
    #[default]
    Off,
    On,
}

impl fmt::Display for SwitchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if *self == Self::On { "On" } else { "Off" })
    }
}

/// Health/alert state of a light widget.
///
/// Lights reuse the IPS state codes but carry them per widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightState {
    #[default]
    Idle,
    Ok,
    Busy,
    Alert,
}

impl fmt::Display for LightState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "Idle",
            Self::Ok => "Ok",
            Self::Busy => "Busy",
            Self::Alert => "Alert",
        };
        write!(f, "{}", name)
    }
}

/// Blob delivery policy for a device channel (the B_* codes).
///
/// `Also` interleaves binary payloads with regular updates; `Only` suppresses
/// everything else on the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlobMode {
    Never,
    Also,
    Only,
}
