//! `HMAC-SHA1` (RFC 5849 Section 3.4.2).

use hmac::{Hmac, Mac};
use sha1::Sha1;

use super::{SignatureMethod, secrets_key};
use crate::consumer::{SecretSource, Secrets};
use crate::encode::{base64_decode, base64_encode};
use crate::error::OAuthError;

type HmacSha1Mac = Hmac<Sha1>;

/// Base64 of `HMAC-SHA1(enc(consumer_secret)&enc(token_secret), base_string)`.
#[derive(Debug)]
pub struct HmacSha1 {
    name: String,
    secrets: Secrets,
}

impl HmacSha1 {
    pub const NAME: &'static str = "HMAC-SHA1";

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

    fn mac(&self, base_string: &str) -> Result<HmacSha1Mac, OAuthError> {
        let mut mac = HmacSha1Mac::new_from_slice(secrets_key(&self.secrets).as_bytes())?;
        mac.update(base_string.as_bytes());
        Ok(mac)
    }
}

impl SignatureMethod for HmacSha1 {
    fn name(&self) -> &str {
        &self.name
    }

    fn secrets(&self) -> &Secrets {
        &self.secrets
    }

    fn sign(&self, base_string: &str) -> Result<String, OAuthError> {
        let tag = self.mac(base_string)?.finalize().into_bytes();
        Ok(base64_encode(&tag))
    }

    fn verify(&self, signature: &str, base_string: &str) -> Result<bool, OAuthError> {
        // A signature that is not Base64 cannot match
        let Ok(tag) = base64_decode(signature) else {
            return Ok(false);
        };
        Ok(self.mac(base_string)?.verify_slice(&tag).is_ok())
    }
}
