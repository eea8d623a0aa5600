//! Fallback delegation from view types to their underlying records
//!
//! Every declared operation in this crate is a statically typed method; this
//! trait exists only for ad-hoc forwarding to attributes the views do not
//! re-declare (driver metadata, timestamps, display formats). Callers name
//! the operation in this crate's snake_case convention and it is translated
//! to the external API's camelCase form before lookup.

use indi_api::AttrValue;

use crate::error::{Result, SdkError};
use crate::naming::camel_case;

/// Uniform fallback access surface over a held external record.
pub trait Delegating {
    /// Look up an attribute by its already-translated camelCase name.
    fn record_attr(&self, name: &str) -> Option<AttrValue>;

    /// Forward an undeclared operation to the held record.
    ///
    /// Fails with [`SdkError::MissingOperation`] (naming the translated
    /// form) when the record exposes nothing under that name.
    fn forward(&self, op: &str) -> Result<AttrValue> {
        let translated = camel_case(op);
        self.record_attr(&translated)
            .ok_or(SdkError::MissingOperation(translated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OneAttr;

    impl Delegating for OneAttr {
        fn record_attr(&self, name: &str) -> Option<AttrValue> {
            (name == "groupName").then(|| AttrValue::Text("Main Control".to_string()))
        }
    }

    #[test]
    fn forward_translates_then_looks_up() {
        let value = OneAttr.forward("group_name").unwrap();
        assert_eq!(value, AttrValue::Text("Main Control".to_string()));
    }

    #[test]
    fn missing_operation_names_the_translated_form() {
        let err = OneAttr.forward("get_blob_data").unwrap_err();
        match err {
            SdkError::MissingOperation(name) => assert_eq!(name, "getBlobData"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
