//! Signature base string construction.

use crate::encode::percent_encode;
use crate::normalize::normalize_parameters;
use crate::parameter::Parameter;

/// Build the signature base string.
///
/// Format: `enc(method)&enc(url)&enc(normalized_params)&enc(consumer_secret)&enc(token_secret)`
///
/// Every segment is encoded as a whole, so the `&` and `=` separators of the
/// normalized parameters end up as `%26` and `%3D` and the five top-level
/// segments stay unambiguous.
pub fn build_base_string<'a>(
    method: &str,
    url: &str,
    parameters: impl IntoIterator<Item = &'a Parameter>,
    consumer_secret: &str,
    token_secret: &str,
) -> String {
    [
        method,
        url,
        normalize_parameters(parameters).as_str(),
        consumer_secret,
        token_secret,
    ]
    .map(percent_encode)
    .join("&")
}
