//! Parameter normalization (RFC 5849 Section 3.4.1.3.2).
//!
//! Parameters are sorted by the key `enc(name) + " " + enc(value)` and then
//! form-encoded. The space sorts below every character that can appear in an
//! encoded name, so `a` always precedes `ab` regardless of values.

use std::cmp::Ordering;

use crate::encode::{form_encode, percent_encode};
use crate::parameter::{OAUTH_SIGNATURE, Parameter};

/// A parameter paired with its precomputed sort key.
///
/// Lives only for the duration of one [`normalize_parameters`] call.
struct ComparableParameter<'a> {
    parameter: &'a Parameter,
    key: String,
}

impl<'a> ComparableParameter<'a> {
    fn new(parameter: &'a Parameter) -> Self {
        let key = format!(
            "{} {}",
            percent_encode(&parameter.name),
            percent_encode(parameter.value_or_empty())
        );
        Self { parameter, key }
    }
}

impl Ord for ComparableParameter<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl PartialOrd for ComparableParameter<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ComparableParameter<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for ComparableParameter<'_> {}

/// Normalize request parameters into the string that gets signed.
///
/// `oauth_signature` is excluded. The output depends only on the multiset of
/// `(name, value)` pairs: input order never matters, and duplicates appear
/// adjacent in their original relative order. Empty input yields `""`.
pub fn normalize_parameters<'a>(parameters: impl IntoIterator<Item = &'a Parameter>) -> String {
    let mut sorted: Vec<ComparableParameter<'_>> = parameters
        .into_iter()
        .filter(|p| p.name != OAUTH_SIGNATURE)
        .map(ComparableParameter::new)
        .collect();

    // Vec::sort is stable
    sorted.sort();

    form_encode(sorted.iter().map(|c| c.parameter))
}
