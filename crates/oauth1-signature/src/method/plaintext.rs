//! `PLAINTEXT` (RFC 5849 Section 3.4.4).

use subtle::ConstantTimeEq;

use super::{SignatureMethod, secrets_key};
use crate::consumer::{SecretSource, Secrets};
use crate::error::OAuthError;

/// The signature is the secrets themselves; the base string is ignored.
#[derive(Debug)]
pub struct Plaintext {
    name: String,
    secrets: Secrets,
}

impl Plaintext {
    pub const NAME: &'static str = "PLAINTEXT";

    pub fn new(name: &str, source: &dyn SecretSource) -> Self {
        Self {
            name: name.to_owned(),
            secrets: Secrets::initialize(name, source),
        }
    }

    pub(crate) fn construct(
        name: &str,
        source: &dyn SecretSource,
    ) -> Result<Box<dyn SignatureMethod>, OAuthError> {
        Ok(Box::new(Self::new(name, source)))
    }
}

impl SignatureMethod for Plaintext {
    fn name(&self) -> &str {
        &self.name
    }

    fn secrets(&self) -> &Secrets {
        &self.secrets
    }

    fn sign(&self, _base_string: &str) -> Result<String, OAuthError> {
        Ok(secrets_key(&self.secrets))
    }

    fn verify(&self, signature: &str, _base_string: &str) -> Result<bool, OAuthError> {
        let expected = secrets_key(&self.secrets);
        Ok(signature.as_bytes().ct_eq(expected.as_bytes()).into())
    }
}
