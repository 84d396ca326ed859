//! Consumer configuration for OAuth 1.0 signing.
//!
//! Parses `oauth.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! ```toml
//! [consumer]
//! key = "dpf43f3p2l4k3l03"
//! secret = "${OAUTH_CONSUMER_SECRET}"
//! private_key_file = "keys/consumer.pem"
//!
//! [signature]
//! method = "HMAC-SHA1"
//! realm = "https://api.example.com/"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `consumer.key`
//! - `consumer.secret`
//! - `consumer.accessor_secret`
//! - `consumer.callback_url`

mod expand;

use std::path::{Path, PathBuf};

use oauth1_signature::method::{PRIVATE_KEY, PUBLIC_KEY, RsaSha1, load_private_key, load_public_key};
use oauth1_signature::{
    ACCESSOR_SECRET, DEFAULT_SIGNATURE_METHOD, OAuthAccessor, OAuthConsumer, OAuthError,
    RsaKeyError, SignatureMethod, registry,
};
use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "oauth.toml";

/// Application configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Consumer credentials.
    pub consumer: ConsumerConfig,
    /// Signature settings.
    pub signature: SignatureConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Consumer credentials.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ConsumerConfig {
    /// OAuth consumer key.
    pub key: String,
    /// Shared consumer secret.
    pub secret: Option<String>,
    /// Secret used instead of `secret` by `*-Accessor` signature methods.
    pub accessor_secret: Option<String>,
    /// Callback URL registered for the consumer.
    pub callback_url: Option<String>,
    /// PEM private key for `RSA-SHA1` (relative to the config file).
    pub private_key_file: Option<PathBuf>,
    /// PEM public key for `RSA-SHA1` (relative to the config file).
    pub public_key_file: Option<PathBuf>,
}

/// Signature settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SignatureConfig {
    /// Signature method name, as sent in `oauth_signature_method`.
    pub method: String,
    /// Realm for the `Authorization` header.
    pub realm: Option<String>,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            method: DEFAULT_SIGNATURE_METHOD.to_owned(),
            realm: None,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`consumer.secret`").
        field: String,
        /// Error message (e.g., "${`OAUTH_SECRET`} environment variable not found").
        message: String,
    },
    /// Key file could not be parsed.
    #[error("Key error in {}: {source}", path.display())]
    Key {
        /// Key file path.
        path: PathBuf,
        /// Parse error.
        source: RsaKeyError,
    },
    /// Signature method could not be resolved.
    #[error("OAuth error: {0}")]
    OAuth(#[from] OAuthError),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `oauth.toml` in current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns error if no config file is found, or parsing or validation fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match config_path {
            Some(path) => path.to_path_buf(),
            None => Self::discover_config().ok_or_else(|| {
                ConfigError::NotFound(PathBuf::from(CONFIG_FILENAME))
            })?,
        };
        if !path.exists() {
            return Err(ConfigError::NotFound(path));
        }
        Self::load_from_file(&path)
    }

    /// Parse configuration from TOML text.
    ///
    /// Relative key file paths are resolved against `config_dir`.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion or validation fails.
    pub fn parse(content: &str, config_dir: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;
        config.resolve_paths(config_dir);

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::parse(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());

        tracing::debug!(
            path = %path.display(),
            method = %config.signature.method,
            "Loaded OAuth configuration"
        );
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are properly set and contain valid values.
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_consumer()?;
        self.validate_signature()?;
        Ok(())
    }

    /// Validate consumer configuration.
    fn validate_consumer(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.consumer.key, "consumer.key")?;
        if let Some(ref callback_url) = self.consumer.callback_url {
            require_http_url(callback_url, "consumer.callback_url")?;
        }
        Ok(())
    }

    /// Validate signature configuration.
    fn validate_signature(&self) -> Result<(), ConfigError> {
        let method = &self.signature.method;
        require_non_empty(method, "signature.method")?;

        // Checked against the process-wide registry so custom methods
        // registered before loading are accepted
        if !registry::global().contains(method) {
            return Err(ConfigError::Validation(format!(
                "signature.method {method} is not a supported signature method"
            )));
        }

        if method == RsaSha1::NAME
            && self.consumer.private_key_file.is_none()
            && self.consumer.public_key_file.is_none()
        {
            return Err(ConfigError::Validation(format!(
                "{} requires consumer.private_key_file or consumer.public_key_file",
                RsaSha1::NAME
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let consumer = &mut self.consumer;
        consumer.key = expand::expand_env(&consumer.key, "consumer.key")?;
        consumer.secret = expand::expand_env_opt(consumer.secret.as_ref(), "consumer.secret")?;
        consumer.accessor_secret = expand::expand_env_opt(
            consumer.accessor_secret.as_ref(),
            "consumer.accessor_secret",
        )?;
        consumer.callback_url =
            expand::expand_env_opt(consumer.callback_url.as_ref(), "consumer.callback_url")?;
        Ok(())
    }

    /// Resolve relative key file paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        for path in [
            &mut self.consumer.private_key_file,
            &mut self.consumer.public_key_file,
        ]
        .into_iter()
        .flatten()
        {
            if path.is_relative() {
                *path = config_dir.join(&*path);
            }
        }
    }

    /// Build the consumer described by this configuration.
    ///
    /// Key files are read and checked here, so a bad key surfaces before the
    /// first request is signed.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if a key file cannot be read and
    /// `ConfigError::Key` if it does not hold a valid PEM key.
    pub fn consumer(&self) -> Result<OAuthConsumer, ConfigError> {
        let conf = &self.consumer;
        let mut consumer = OAuthConsumer::new(&conf.key, conf.secret.clone());
        if let Some(ref callback_url) = conf.callback_url {
            consumer = consumer.with_callback_url(callback_url);
        }
        if let Some(ref accessor_secret) = conf.accessor_secret {
            consumer.set_property(ACCESSOR_SECRET, accessor_secret);
        }
        if let Some(ref path) = conf.private_key_file {
            let pem = read_key_file(path, |pem| load_private_key(pem).map(drop))?;
            consumer.set_property(PRIVATE_KEY, pem);
        }
        if let Some(ref path) = conf.public_key_file {
            let pem = read_key_file(path, |pem| load_public_key(pem).map(drop))?;
            consumer.set_property(PUBLIC_KEY, pem);
        }
        Ok(consumer)
    }

    /// Build an accessor for the configured consumer acting with a token.
    ///
    /// # Errors
    ///
    /// Same as [`Config::consumer`].
    pub fn accessor(&self, token: &str, token_secret: &str) -> Result<OAuthAccessor, ConfigError> {
        Ok(OAuthAccessor::new(self.consumer()?).with_token(token, token_secret))
    }

    /// Resolve the configured signature method for `accessor`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::OAuth` if the method has been rejected or cannot
    /// be constructed.
    pub fn resolve_method(
        &self,
        accessor: &OAuthAccessor,
    ) -> Result<Box<dyn SignatureMethod>, ConfigError> {
        registry::resolve_method(&self.signature.method, accessor).map_err(|e| {
            tracing::debug!(method = %self.signature.method, error = %e, "Signature method not resolved");
            e.into()
        })
    }
}

/// Read a PEM key file and check it parses.
fn read_key_file(
    path: &Path,
    check: impl Fn(&[u8]) -> Result<(), RsaKeyError>,
) -> Result<String, ConfigError> {
    let pem = std::fs::read_to_string(path)?;
    check(pem.as_bytes()).map_err(|source| ConfigError::Key {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(pem)
}
