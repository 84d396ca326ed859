//! Error types for OAuth 1.0 signing.

use std::str::Utf8Error;
use std::time::SystemTimeError;

/// OAuth problem code reported when a signature method is not acceptable.
pub const SIGNATURE_METHOD_REJECTED: &str = "signature_method_rejected";

/// OAuth problem code reported when a required parameter is absent.
pub const PARAMETER_ABSENT: &str = "parameter_absent";

/// Error from signing or verification.
#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    /// The requested signature method is not registered.
    ///
    /// Callers must treat the request as unauthenticated rather than retry
    /// with another method.
    #[error("signature method rejected: {name}")]
    SignatureMethodRejected {
        /// Method name as supplied by the request.
        name: String,
    },

    /// A parameter the operation depends on is missing from the message.
    #[error("missing parameter: {0}")]
    MissingParameter(String),

    /// The message itself is malformed (e.g. empty method or URL).
    #[error("invalid message: {0}")]
    InvalidMessage(String),

    /// Percent or Base64 decoding failed.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// RSA key loading/parsing error.
    #[error("RSA key error")]
    RsaKey(#[from] RsaKeyError),

    /// A key required by the signature method is not configured.
    #[error("missing key: {0}")]
    MissingKey(String),

    /// HMAC key rejected by the MAC implementation.
    #[error("invalid HMAC key length")]
    InvalidKeyLength(#[from] hmac::digest::InvalidLength),

    /// System clock is set before the Unix epoch.
    #[error("failed to compute timestamp")]
    Clock(#[from] SystemTimeError),
}

impl OAuthError {
    /// OAuth problem code for errors that map onto one, as sent back in an
    /// `oauth_problem` response parameter.
    #[must_use]
    pub fn problem(&self) -> Option<&'static str> {
        match self {
            Self::SignatureMethodRejected { .. } => Some(SIGNATURE_METHOD_REJECTED),
            Self::MissingParameter(_) => Some(PARAMETER_ABSENT),
            _ => None,
        }
    }
}

/// RSA key loading/parsing error.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RsaKeyError {
    /// Invalid UTF-8 in key material.
    #[error("invalid UTF-8 in key")]
    InvalidUtf8(#[from] Utf8Error),

    /// PKCS#1 key parsing error.
    #[error("PKCS#1 key error")]
    Pkcs1(#[from] rsa::pkcs1::Error),

    /// PKCS#8 key parsing error (returned when both private key formats fail).
    #[error("PKCS#8 key error")]
    Pkcs8(#[from] rsa::pkcs8::Error),

    /// SPKI public key parsing error (returned when both public key formats fail).
    #[error("SPKI key error")]
    Spki(#[from] rsa::pkcs8::spki::Error),
}
