//! Typed widget views and their textual renderings
//!
//! [`Widget::from_record`] dispatches on the record's concrete payload
//! representation: a total match, since each of the external client's five
//! widget shapes maps to exactly one variant. Each variant renders itself as
//! `name(label) = <value>`; a blob renders its byte size only, never the
//! payload, so logs stay bounded.

use std::fmt;

use indi_api::{AttrValue, LightState, PropertyKind, SwitchState, WidgetPayload, WidgetRecord};

use crate::delegate::Delegating;

/// A resolved widget, dispatched by its payload representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Number(NumberWidget),
    Switch(SwitchWidget),
    Text(TextWidget),
    Light(LightWidget),
    Blob(BlobWidget),
}

impl Widget {
    /// Dispatch a record to its typed variant by its concrete payload.
    pub fn from_record(record: &WidgetRecord) -> Self {
        let name = record.name.clone();
        let label = record.label.clone();
        match &record.payload {
            WidgetPayload::Number {
                value,
                min,
                max,
                step,
                format,
            } => Self::Number(NumberWidget {
                name,
                label,
                value: *value,
                min: *min,
                max: *max,
                step: *step,
                format: format.clone(),
            }),
            WidgetPayload::Switch { state } => Self::Switch(SwitchWidget {
                name,
                label,
                state: *state,
            }),
            WidgetPayload::Text { text } => Self::Text(TextWidget {
                name,
                label,
                text: text.clone(),
            }),
            WidgetPayload::Light { state } => Self::Light(LightWidget {
                name,
                label,
                state: *state,
            }),
            WidgetPayload::Blob { data, format } => Self::Blob(BlobWidget {
                name,
                label,
                data: data.clone(),
                format: format.clone(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Number(w) => &w.name,
            Self::Switch(w) => &w.name,
            Self::Text(w) => &w.name,
            Self::Light(w) => &w.name,
            Self::Blob(w) => &w.name,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Number(w) => &w.label,
            Self::Switch(w) => &w.label,
            Self::Text(w) => &w.label,
            Self::Light(w) => &w.label,
            Self::Blob(w) => &w.label,
        }
    }

    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Number(_) => PropertyKind::Number,
            Self::Switch(_) => PropertyKind::Switch,
            Self::Text(_) => PropertyKind::Text,
            Self::Light(_) => PropertyKind::Light,
            Self::Blob(_) => PropertyKind::Blob,
        }
    }

    /// Rebuild the boundary record this widget was dispatched from.
    /// Inverse of [`Widget::from_record`].
    pub fn to_record(&self) -> WidgetRecord {
        let payload = match self {
            Self::Number(w) => WidgetPayload::Number {
                value: w.value,
                min: w.min,
                max: w.max,
                step: w.step,
                format: w.format.clone(),
            },
            Self::Switch(w) => WidgetPayload::Switch { state: w.state },
            Self::Text(w) => WidgetPayload::Text {
                text: w.text.clone(),
            },
            Self::Light(w) => WidgetPayload::Light { state: w.state },
            Self::Blob(w) => WidgetPayload::Blob {
                data: w.data.clone(),
                format: w.format.clone(),
            },
        };
        WidgetRecord {
            name: self.name().to_string(),
            label: self.label().to_string(),
            payload,
        }
    }
}

impl fmt::Display for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(w) => w.fmt(f),
            Self::Switch(w) => w.fmt(f),
            Self::Text(w) => w.fmt(f),
            Self::Light(w) => w.fmt(f),
            Self::Blob(w) => w.fmt(f),
        }
    }
}

impl Delegating for Widget {
    /// The record's attribute table is the single source of the camelCase
    /// names, so the lookup goes through [`Widget::to_record`].
    fn record_attr(&self, name: &str) -> Option<AttrValue> {
        self.to_record().attribute(name)
    }
}

/// One numeric element, with the driver's range and display metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberWidget {
    pub name: String,
    pub label: String,
    pub value: f64,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// printf-style display format, e.g. `"%10.6m"`.
    pub format: String,
}

impl fmt::Display for NumberWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}) = {}", self.name, self.label, self.value)
    }
}

/// One on/off element.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchWidget {
    pub name: String,
    pub label: String,
    pub state: SwitchState,
}

impl fmt::Display for SwitchWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}) = {}", self.name, self.label, self.state)
    }
}

/// One text element.
#[derive(Debug, Clone, PartialEq)]
pub struct TextWidget {
    pub name: String,
    pub label: String,
    pub text: String,
}

impl fmt::Display for TextWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}) = {}", self.name, self.label, self.text)
    }
}

/// One health/alert element.
#[derive(Debug, Clone, PartialEq)]
pub struct LightWidget {
    pub name: String,
    pub label: String,
    pub state: LightState,
}

impl fmt::Display for LightWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}) = {}", self.name, self.label, self.state)
    }
}

/// One binary payload element.
#[derive(Debug, Clone, PartialEq)]
pub struct BlobWidget {
    pub name: String,
    pub label: String,
    /// Raw payload bytes; empty until delivery is enabled for the channel.
    pub data: Vec<u8>,
    /// Format tag including the leading dot, e.g. `".fits"`.
    pub format: String,
}

impl BlobWidget {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

impl fmt::Display for BlobWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}) = <blob {} bytes>",
            self.name,
            self.label,
            self.size()
        )
    }
}
