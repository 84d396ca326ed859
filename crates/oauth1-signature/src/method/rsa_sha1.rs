//! `RSA-SHA1` (RFC 5849 Section 3.4.3).
//!
//! Keys are read from the secret source as PEM text:
//! - `RSA-SHA1.PrivateKey` (PKCS#8 or PKCS#1), required for signing
//! - `RSA-SHA1.PublicKey` (SPKI or PKCS#1), derived from the private key when absent

use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha1::Sha1;

use super::SignatureMethod;
use super::key::{load_private_key, load_public_key};
use crate::consumer::{SecretSource, Secrets};
use crate::encode::{base64_decode, base64_encode};
use crate::error::OAuthError;

/// Property holding the consumer's PEM private key.
pub const PRIVATE_KEY: &str = "RSA-SHA1.PrivateKey";

/// Property holding the consumer's PEM public key.
pub const PUBLIC_KEY: &str = "RSA-SHA1.PublicKey";

/// RSASSA-PKCS1-v1_5 over SHA-1, Base64-encoded.
#[derive(Debug)]
pub struct RsaSha1 {
    name: String,
    secrets: Secrets,
    private_key: Option<RsaPrivateKey>,
    public_key: Option<RsaPublicKey>,
}

impl RsaSha1 {
    pub const NAME: &'static str = "RSA-SHA1";

    /// Load keys from `source`. Missing keys are only an error once a
    /// signature is made or checked.
    pub fn new(name: &str, source: &dyn SecretSource) -> Result<Self, OAuthError> {
        let private_key = source
            .property(PRIVATE_KEY)
            .map(|pem| load_private_key(pem.as_bytes()))
            .transpose()?;
        let public_key = match source.property(PUBLIC_KEY) {
            Some(pem) => Some(load_public_key(pem.as_bytes())?),
            None => private_key.as_ref().map(RsaPublicKey::from),
        };

        Ok(Self {
            name: name.to_owned(),
            secrets: Secrets::initialize(name, source),
            private_key,
            public_key,
        })
    }

    pub(crate) fn construct(
        name: &str,
        source: &dyn SecretSource,
    ) -> Result<Box<dyn SignatureMethod>, OAuthError> {
        Ok(Box::new(Self::new(name, source)?))
    }
}

impl SignatureMethod for RsaSha1 {
    fn name(&self) -> &str {
        &self.name
    }

    fn secrets(&self) -> &Secrets {
        &self.secrets
    }

    fn sign(&self, base_string: &str) -> Result<String, OAuthError> {
        let private_key = self
            .private_key
            .clone()
            .ok_or_else(|| OAuthError::MissingKey(PRIVATE_KEY.to_owned()))?;
        let signing_key = SigningKey::<Sha1>::new(private_key);
        let signature = signing_key.sign(base_string.as_bytes());
        Ok(base64_encode(&signature.to_bytes()))
    }

    fn verify(&self, signature: &str, base_string: &str) -> Result<bool, OAuthError> {
        let public_key = self
            .public_key
            .clone()
            .ok_or_else(|| OAuthError::MissingKey(PUBLIC_KEY.to_owned()))?;
        let Ok(bytes) = base64_decode(signature) else {
            return Ok(false);
        };
        let Ok(signature) = Signature::try_from(bytes.as_slice()) else {
            return Ok(false);
        };
        let verifying_key = VerifyingKey::<Sha1>::new(public_key);
        Ok(verifying_key
            .verify(base_string.as_bytes(), &signature)
            .is_ok())
    }
}
