//! Object identifier encoding for URL path segments.
//!
//! Catalog object IDs are resource paths such as
//! `resource://Warehouse/SALES/ORDERS`, which cannot be placed in a URL path
//! as-is. The service accepts two encodings:
//!
//! - plain percent-encoding (`%2F`)
//! - the tilde form, where `~` replaces `%` as the escape marker (`~2F`),
//!   which survives proxies that decode `%2F` back into a path separator
//!
//! The object endpoints of the access API expect the tilde form.

/// Encode an object ID for use as a single URL path segment.
///
/// Every byte outside the RFC 3986 unreserved set is percent-encoded. With
/// `tilde` set, a literal `~` is escaped first and then every `%` marker is
/// rewritten to `~`, so the result is unambiguous.
pub fn encode_id(id: &str, tilde: bool) -> String {
    let encoded = urlencoding::encode(id);
    if !tilde {
        return encoded.into_owned();
    }
    encoded.replace('~', "%7E").replace('%', "~")
}
