//! Percent, form and Base64 encoding (RFC 5849 Section 3.6).

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str};

use crate::error::OAuthError;
use crate::parameter::Parameter;

/// OAuth unreserved characters: A-Z a-z 0-9 - . _ ~
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode string per RFC 3986 with uppercase hex digits.
pub fn percent_encode(input: &str) -> String {
    percent_encoding::percent_encode(input.as_bytes(), OAUTH_ENCODE_SET).to_string()
}

/// Decode a percent-encoded string.
///
/// `+` is kept as-is; OAuth never encodes a space as `+`.
pub fn percent_decode(input: &str) -> Result<String, OAuthError> {
    percent_decode_str(input)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| OAuthError::Encoding(format!("invalid UTF-8 in {input:?}: {e}")))
}

/// Form-encode parameters as `name=value` pairs joined by `&`.
///
/// An absent value encodes like an empty one.
pub fn form_encode<'a>(parameters: impl IntoIterator<Item = &'a Parameter>) -> String {
    parameters
        .into_iter()
        .map(|p| {
            format!(
                "{}={}",
                percent_encode(&p.name),
                percent_encode(p.value_or_empty())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Parse an `application/x-www-form-urlencoded` string into parameters,
/// preserving order and duplicates.
///
/// `+` decodes to a space. A pair without `=` yields a parameter with no value.
pub fn decode_form(form: &str) -> Result<Vec<Parameter>, OAuthError> {
    form.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((name, value)) => Ok(Parameter::new(
                decode_form_component(name)?,
                decode_form_component(value)?,
            )),
            None => Ok(Parameter::without_value(decode_form_component(pair)?)),
        })
        .collect()
}

fn decode_form_component(input: &str) -> Result<String, OAuthError> {
    percent_decode(&input.replace('+', " "))
}

/// Base64-encode bytes (standard alphabet, padded).
pub fn base64_encode(bytes: &[u8]) -> String {
    BASE64_STANDARD.encode(bytes)
}

/// Decode standard Base64.
pub fn base64_decode(input: &str) -> Result<Vec<u8>, OAuthError> {
    BASE64_STANDARD
        .decode(input)
        .map_err(|e| OAuthError::Encoding(format!("invalid Base64: {e}")))
}
