//! Identifier translation between this crate's snake_case surface and the
//! external client's camelCase convention

/// Translate a lowercase, underscore-separated identifier to the external
/// API's camelCase form: the first word stays verbatim, every following word
/// is capitalized, and all are concatenated.
///
/// Pure and total; empty input yields empty output. One-directional: no
/// reverse mapping exists anywhere in the system.
///
/// ```
/// use indi_sdk::naming::camel_case;
///
/// assert_eq!(camel_case("get_switch"), "getSwitch");
/// assert_eq!(camel_case("set_blob_mode"), "setBlobMode");
/// ```
pub fn camel_case(identifier: &str) -> String {
    let mut parts = identifier.split('_');
    let mut out = String::with_capacity(identifier.len());
    if let Some(first) = parts.next() {
        out.push_str(first);
    }
    for part in parts {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
