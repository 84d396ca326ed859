//! Consumer credentials and the secrets a signature method signs with.

use std::collections::HashMap;

/// Property holding a consumer secret that overrides the regular one for
/// `*-Accessor` signature methods.
pub const ACCESSOR_SECRET: &str = "oauth_accessor_secret";

/// Suffix marking a signature method name as accessor-specific.
pub const ACCESSOR_SUFFIX: &str = "-Accessor";

/// Source of the secrets and key material used to initialize a signature method.
///
/// Implemented by [`OAuthConsumer`] and [`OAuthAccessor`]; credential stores
/// can implement it directly.
pub trait SecretSource {
    /// Shared consumer secret, if the consumer has one.
    fn consumer_secret(&self) -> Option<&str>;

    /// Token secret for the current access or request token.
    fn token_secret(&self) -> Option<&str> {
        None
    }

    /// Named property (accessor secret, RSA keys, ...).
    fn property(&self, name: &str) -> Option<&str>;
}

/// A registered OAuth consumer.
#[derive(Debug, Clone, Default)]
pub struct OAuthConsumer {
    pub consumer_key: String,
    pub consumer_secret: Option<String>,
    pub callback_url: Option<String>,
    properties: HashMap<String, String>,
}

impl OAuthConsumer {
    pub fn new(consumer_key: impl Into<String>, consumer_secret: Option<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret,
            callback_url: None,
            properties: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_callback_url(mut self, callback_url: impl Into<String>) -> Self {
        self.callback_url = Some(callback_url.into());
        self
    }

    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_property(name, value);
        self
    }

    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(name.into(), value.into());
    }
}

impl SecretSource for OAuthConsumer {
    fn consumer_secret(&self) -> Option<&str> {
        self.consumer_secret.as_deref()
    }

    fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }
}

/// A consumer together with the token it currently acts with.
#[derive(Debug, Clone)]
pub struct OAuthAccessor {
    pub consumer: OAuthConsumer,
    pub access_token: Option<String>,
    pub token_secret: Option<String>,
}

impl OAuthAccessor {
    pub fn new(consumer: OAuthConsumer) -> Self {
        Self {
            consumer,
            access_token: None,
            token_secret: None,
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>, token_secret: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self.token_secret = Some(token_secret.into());
        self
    }
}

impl SecretSource for OAuthAccessor {
    fn consumer_secret(&self) -> Option<&str> {
        self.consumer.consumer_secret()
    }

    fn token_secret(&self) -> Option<&str> {
        self.token_secret.as_deref()
    }

    fn property(&self, name: &str) -> Option<&str> {
        self.consumer.property(name)
    }
}

/// Secrets a signature method instance signs with. Missing secrets are empty.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secrets {
    pub consumer_secret: String,
    pub token_secret: String,
}

impl Secrets {
    /// Resolve the secrets for the signature method `algorithm_name`.
    ///
    /// For names ending in `-Accessor` the [`ACCESSOR_SECRET`] property, when
    /// present, replaces the consumer secret. Never fails: anything missing
    /// becomes `""`.
    pub fn initialize(algorithm_name: &str, source: &dyn SecretSource) -> Self {
        let accessor_secret = if algorithm_name.ends_with(ACCESSOR_SUFFIX) {
            source.property(ACCESSOR_SECRET)
        } else {
            None
        };
        let consumer_secret = accessor_secret.or_else(|| source.consumer_secret());

        Self {
            consumer_secret: consumer_secret.unwrap_or_default().to_owned(),
            token_secret: source.token_secret().unwrap_or_default().to_owned(),
        }
    }
}

// Secrets must never end up in logs
impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("consumer_secret", &"<redacted>")
            .field("token_secret", &"<redacted>")
            .finish()
    }
}
