use std::time::Duration;

use indi_api::PropertyKind;
use thiserror::Error;

/// Errors surfaced by the adaptation layer.
///
/// Factory and mismatch errors are local to the single resolution call that
/// produced them; nothing here is fatal to the process. Connection failures
/// are reported through `Session::connect` returning `false`, not through
/// this enum.
#[derive(Debug, Error)]
pub enum SdkError {
    /// A property record reported a type code outside the five known kinds.
    /// A defect signal from the driver side; aborts the one operation.
    #[error("unknown property kind code {0}")]
    UnknownPropertyKind(u8),

    /// A widget's concrete payload representation does not match its
    /// property's kind, so the widget factory cannot map it.
    #[error("widget {widget:?} of property {property:?} does not carry a {kind} payload")]
    UnknownWidgetRepresentation {
        property: String,
        widget: String,
        kind: PropertyKind,
    },

    /// A typed property accessor resolved a property of a different kind.
    #[error("property {name:?} is a {actual} property, not {requested}")]
    KindMismatch {
        name: String,
        requested: PropertyKind,
        actual: PropertyKind,
    },

    /// Delegated forwarding found no matching operation on the held record.
    #[error("no such operation on the underlying record: {0}")]
    MissingOperation(String),

    /// A polling resolution did not yield a value within its deadline.
    #[error("resolution timed out after {0:?}")]
    Timeout(Duration),

    /// The caller's cancellation token fired while a resolution was waiting.
    #[error("resolution cancelled")]
    Cancelled,

    /// Writing a captured blob payload failed.
    #[error("blob capture I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for results that can return an [`SdkError`].
pub type Result<T> = std::result::Result<T, SdkError>;
