//! OAuth 1.0 request signing and verification.
//!
//! This crate computes the signature base string for a request and signs or
//! verifies it with a pluggable signature method:
//! - [`normalize_parameters`]: canonical, order-independent parameter string
//! - [`build_base_string`]: method, URL, parameters and secrets joined into the
//!   string that gets signed
//! - [`SignatureMethod`]: sign/verify contract with `HMAC-SHA1`, `PLAINTEXT`
//!   and `RSA-SHA1` implementations
//! - [`registry`]: selects a method by the (untrusted) `oauth_signature_method`
//!   name and rejects unknown names
//!
//! HTTP transport and credential storage stay with the caller.
//!
//! # Example
//!
//! ```ignore
//! use oauth1_signature::{OAuthAccessor, OAuthConsumer, OAuthMessage, Parameter};
//!
//! let consumer = OAuthConsumer::new("consumer_key", Some("consumer_secret".to_owned()));
//! let accessor = OAuthAccessor::new(consumer).with_token("token", "token_secret");
//!
//! let mut message = OAuthMessage::new(
//!     "GET",
//!     "https://api.example.com/photos",
//!     [Parameter::new("size", "original")],
//! )?;
//! message.add_required_parameters(&accessor)?;
//! oauth1_signature::sign(&mut message, &accessor)?;
//!
//! let header = message.authorization_header(None);
//! ```

mod base_string;
mod consumer;
mod encode;
mod message;
mod normalize;
mod parameter;
mod signing;

pub mod error;
pub mod method;
pub mod registry;

pub use base_string::build_base_string;
pub use consumer::{ACCESSOR_SECRET, ACCESSOR_SUFFIX, OAuthAccessor, OAuthConsumer, SecretSource, Secrets};
pub use encode::{base64_decode, base64_encode, decode_form, form_encode, percent_decode, percent_encode};
pub use error::{OAuthError, RsaKeyError};
pub use message::{DEFAULT_SIGNATURE_METHOD, OAuthMessage, decode_authorization};
pub use method::SignatureMethod;
pub use normalize::normalize_parameters;
pub use parameter::{
    OAUTH_CALLBACK, OAUTH_CONSUMER_KEY, OAUTH_NONCE, OAUTH_SIGNATURE, OAUTH_SIGNATURE_METHOD,
    OAUTH_TIMESTAMP, OAUTH_TOKEN, OAUTH_VERIFIER, OAUTH_VERSION, Parameter, VERSION_1_0,
};
pub use registry::{MethodConstructor, MethodRegistry};
pub use signing::{sign, verify};
