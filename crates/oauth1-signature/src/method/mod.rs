//! Signature methods: the sign/verify contract and its implementations.
//!
//! A method instance owns its [`Secrets`], fixed when it is constructed, and
//! is never shared between requests. Use [`crate::registry`] to pick one by
//! the `oauth_signature_method` a request names.

mod hmac_sha1;
pub(crate) mod key;
mod plaintext;
mod rsa_sha1;

pub use hmac_sha1::HmacSha1;
pub use key::{load_private_key, load_public_key};
pub use plaintext::Plaintext;
pub use rsa_sha1::{PRIVATE_KEY, PUBLIC_KEY, RsaSha1};

use std::fmt::Debug;

use crate::base_string::build_base_string;
use crate::consumer::Secrets;
use crate::encode::percent_encode;
use crate::error::OAuthError;
use crate::message::OAuthMessage;
use crate::parameter::OAUTH_SIGNATURE;

/// A pair of algorithms for computing and verifying an OAuth signature.
pub trait SignatureMethod: Debug + Send + Sync {
    /// Name this instance was resolved under (e.g. `HMAC-SHA1-Accessor`).
    fn name(&self) -> &str;

    /// Secrets the base string and signature are computed with.
    fn secrets(&self) -> &Secrets;

    /// Compute the signature for the given base string.
    fn sign(&self, base_string: &str) -> Result<String, OAuthError>;

    /// Decide whether `signature` is correct for `base_string`.
    ///
    /// A mismatch is `Ok(false)`, not an error. Implementations compare in
    /// constant time.
    fn verify(&self, signature: &str, base_string: &str) -> Result<bool, OAuthError>;

    /// Base string for `message` under this instance's secrets.
    fn base_string(&self, message: &OAuthMessage) -> String {
        let secrets = self.secrets();
        build_base_string(
            message.method(),
            message.url(),
            message.parameters(),
            &secrets.consumer_secret,
            &secrets.token_secret,
        )
    }

    /// Signature for `message`, without modifying it.
    fn signature(&self, message: &OAuthMessage) -> Result<String, OAuthError> {
        self.sign(&self.base_string(message))
    }

    /// Sign `message` and append the result as `oauth_signature`.
    fn sign_message(&self, message: &mut OAuthMessage) -> Result<(), OAuthError> {
        let signature = self.signature(message)?;
        message.add_parameter((OAUTH_SIGNATURE, signature));
        Ok(())
    }

    /// Verify the `oauth_signature` that `message` carries.
    ///
    /// # Errors
    ///
    /// Returns `OAuthError::MissingParameter` if the message has no signature.
    fn verify_message(&self, message: &OAuthMessage) -> Result<bool, OAuthError> {
        let signature = message.signature()?;
        self.verify(signature, &self.base_string(message))
    }
}

/// `enc(consumer_secret)&enc(token_secret)`: the HMAC key and the PLAINTEXT
/// signature.
fn secrets_key(secrets: &Secrets) -> String {
    format!(
        "{}&{}",
        percent_encode(&secrets.consumer_secret),
        percent_encode(&secrets.token_secret)
    )
}
