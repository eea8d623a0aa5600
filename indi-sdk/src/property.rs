//! Typed property views and the kind-dispatching factory
//!
//! [`Property::from_record`] resolves a generic property record into one of
//! the five typed variants by its raw INDI type code; an out-of-range code
//! fails with [`SdkError::UnknownPropertyKind`] and constructs nothing.
//! Construction also enforces that every widget's payload representation
//! matches the property's kind, the one way a widget record can be
//! undispatchable here, since the payload union itself is closed.
//!
//! Views are point-in-time snapshots. Setters mutate the local copy only;
//! changes reach the driver through `Session::send_new` with the view's
//! [`record`](Property::record), and fresh state requires re-resolving.

use std::fmt;

use indi_api::{
    AttrValue, LightState, PropertyKind, PropertyRecord, PropertyState, SwitchState, WidgetPayload,
};

use crate::delegate::Delegating;
use crate::error::{Result, SdkError};
use crate::widget::{BlobWidget, Widget};

/// A resolved property, dispatched to its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    Number(NumberProperty),
    Switch(SwitchProperty),
    Text(TextProperty),
    Light(LightProperty),
    Blob(BlobProperty),
}

impl Property {
    /// Dispatch a record to its typed variant by the reported kind code.
    pub fn from_record(record: PropertyRecord) -> Result<Self> {
        let kind = match PropertyKind::from_code(record.type_code) {
            Some(kind) => kind,
            None => return Err(SdkError::UnknownPropertyKind(record.type_code)),
        };
        // Kind uniformity: a property's widgets all share its kind.
        if let Some(stray) = record.widgets.iter().find(|w| w.kind() != kind) {
            return Err(SdkError::UnknownWidgetRepresentation {
                property: record.name.clone(),
                widget: stray.name.clone(),
                kind,
            });
        }
        Ok(match kind {
            PropertyKind::Number => Self::Number(NumberProperty { record }),
            PropertyKind::Switch => Self::Switch(SwitchProperty { record }),
            PropertyKind::Text => Self::Text(TextProperty { record }),
            PropertyKind::Light => Self::Light(LightProperty { record }),
            PropertyKind::Blob => Self::Blob(BlobProperty { record }),
        })
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

    pub fn record(&self) -> &PropertyRecord {
        match self {
            Self::Number(p) => &p.record,
            Self::Switch(p) => &p.record,
            Self::Text(p) => &p.record,
            Self::Light(p) => &p.record,
            Self::Blob(p) => &p.record,
        }
    }

    pub fn name(&self) -> &str {
        &self.record().name
    }

    pub fn device(&self) -> &str {
        &self.record().device
    }

    pub fn label(&self) -> &str {
        &self.record().label
    }

    /// Group the driver files this property under; what a device page
    /// groups by.
    pub fn group(&self) -> &str {
        &self.record().group
    }

    pub fn state(&self) -> PropertyState {
        self.record().state
    }

    /// Widget views in protocol order, built lazily from the snapshot.
    pub fn widgets(&self) -> Vec<Widget> {
        self.record().widgets.iter().map(Widget::from_record).collect()
    }

    /// Widget at the protocol-assigned index, if present.
    pub fn widget(&self, index: usize) -> Option<Widget> {
        self.record().widgets.get(index).map(Widget::from_record)
    }

    pub fn len(&self) -> usize {
        self.record().widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record().widgets.is_empty()
    }
}

impl Delegating for Property {
    fn record_attr(&self, name: &str) -> Option<AttrValue> {
        self.record().attribute(name)
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.kind())
    }
}

macro_rules! shared_accessors {
    ($view:ident, $kind:expr) => {
        impl $view {
            pub fn name(&self) -> &str {
                &self.record.name
            }

            pub fn device(&self) -> &str {
                &self.record.device
            }

            pub fn label(&self) -> &str {
                &self.record.label
            }

            pub fn group(&self) -> &str {
                &self.record.group
            }

            pub fn kind(&self) -> PropertyKind {
                $kind
            }

            pub fn state(&self) -> PropertyState {
                self.record.state
            }

            pub fn widgets(&self) -> Vec<Widget> {
                self.record.widgets.iter().map(Widget::from_record).collect()
            }

            pub fn widget(&self, index: usize) -> Option<Widget> {
                self.record.widgets.get(index).map(Widget::from_record)
            }

            pub fn len(&self) -> usize {
                self.record.widgets.len()
            }

            pub fn is_empty(&self) -> bool {
                self.record.widgets.is_empty()
            }

            /// The snapshot backing this view; pass to `Session::send_new`
            /// to submit local mutations.
            pub fn record(&self) -> &PropertyRecord {
                &self.record
            }
        }

        impl Delegating for $view {
            fn record_attr(&self, name: &str) -> Option<AttrValue> {
                self.record.attribute(name)
            }
        }
    };
}

/// A vector of numeric values (coordinates, exposure times, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct NumberProperty {
    record: PropertyRecord,
}

shared_accessors!(NumberProperty, PropertyKind::Number);

impl NumberProperty {
    /// Numeric values in protocol order.
    pub fn values(&self) -> Vec<f64> {
        self.record
            .widgets
            .iter()
            .filter_map(|w| match w.payload {
                WidgetPayload::Number { value, .. } => Some(value),
                _ => None,
            })
            .collect()
    }

    /// Set the value at the protocol-assigned index on the local snapshot.
    pub fn set_value(&mut self, index: usize, new_value: f64) {
        if let Some(WidgetPayload::Number { value, .. }) =
            self.record.widgets.get_mut(index).map(|w| &mut w.payload)
        {
            *value = new_value;
        }
    }
}

/// A vector of on/off switches.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchProperty {
    record: PropertyRecord,
}

shared_accessors!(SwitchProperty, PropertyKind::Switch);

impl SwitchProperty {
    /// Switch states in protocol order.
    pub fn states(&self) -> Vec<SwitchState> {
        self.record
            .widgets
            .iter()
            .filter_map(|w| match w.payload {
                WidgetPayload::Switch { state } => Some(state),
                _ => None,
            })
            .collect()
    }

    /// Clear every element to `Off`.
    ///
    /// One-of-many switch vectors require this before turning exactly one
    /// element on.
    pub fn reset(&mut self) {
        for widget in &mut self.record.widgets {
            if let WidgetPayload::Switch { state } = &mut widget.payload {
                *state = SwitchState::Off;
            }
        }
    }

    /// Set one element's state on the local snapshot.
    pub fn set_state(&mut self, index: usize, new_state: SwitchState) {
        if let Some(WidgetPayload::Switch { state }) =
            self.record.widgets.get_mut(index).map(|w| &mut w.payload)
        {
            *state = new_state;
        }
    }
}

/// A vector of text values.
#[derive(Debug, Clone, PartialEq)]
pub struct TextProperty {
    record: PropertyRecord,
}

shared_accessors!(TextProperty, PropertyKind::Text);

impl TextProperty {
    /// Text values in protocol order.
    pub fn texts(&self) -> Vec<String> {
        self.record
            .widgets
            .iter()
            .filter_map(|w| match &w.payload {
                WidgetPayload::Text { text } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Set one element's text on the local snapshot.
    pub fn set_text(&mut self, index: usize, new_text: &str) {
        if let Some(WidgetPayload::Text { text }) =
            self.record.widgets.get_mut(index).map(|w| &mut w.payload)
        {
            *text = new_text.to_string();
        }
    }
}

/// A vector of read-only health/alert lights.
#[derive(Debug, Clone, PartialEq)]
pub struct LightProperty {
    record: PropertyRecord,
}

shared_accessors!(LightProperty, PropertyKind::Light);

impl LightProperty {
    /// Light states in protocol order.
    pub fn states(&self) -> Vec<LightState> {
        self.record
            .widgets
            .iter()
            .filter_map(|w| match w.payload {
                WidgetPayload::Light { state } => Some(state),
                _ => None,
            })
            .collect()
    }
}

/// A vector of binary payloads (image frames and the like).
#[derive(Debug, Clone, PartialEq)]
pub struct BlobProperty {
    record: PropertyRecord,
}

shared_accessors!(BlobProperty, PropertyKind::Blob);

impl BlobProperty {
    /// Byte size of the primary (first) payload; 0 while undelivered.
    pub fn size(&self) -> usize {
        self.primary()
            .map(|(data, _)| data.len())
            .unwrap_or_default()
    }

    /// Format tag of the primary (first) payload, e.g. `".fits"`.
    pub fn format(&self) -> Option<&str> {
        self.primary().map(|(_, format)| format)
    }

    /// Blob widget views in protocol order.
    pub fn blobs(&self) -> Vec<BlobWidget> {
        self.widgets()
            .into_iter()
            .filter_map(|w| match w {
                Widget::Blob(blob) => Some(blob),
                _ => None,
            })
            .collect()
    }

    fn primary(&self) -> Option<(&Vec<u8>, &str)> {
        self.record.widgets.first().and_then(|w| match &w.payload {
            WidgetPayload::Blob { data, format } => Some((data, format.as_str())),
            _ => None,
        })
    }
}
