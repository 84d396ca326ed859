//! Signature method registry.
//!
//! Maps the `oauth_signature_method` names a request may carry to
//! constructors. Lookups of unknown names fail closed with
//! [`OAuthError::SignatureMethodRejected`]; there is no default method.
//!
//! # Thread Safety
//!
//! [`MethodRegistry`] guards its map with an `RwLock`, so `register` and
//! `resolve` can run concurrently from any thread. Every `resolve` builds a
//! fresh instance that the caller owns outright.
//!
//! # Example
//!
//! ```ignore
//! use oauth1_signature::{OAuthConsumer, registry};
//!
//! let consumer = OAuthConsumer::new("key", Some("secret".to_owned()));
//! let method = registry::resolve_method("HMAC-SHA1", &consumer)?;
//! let signature = method.sign("GET&...")?;
//! ```

use std::collections::HashMap;
use std::sync::{LazyLock, PoisonError, RwLock};

use crate::consumer::{ACCESSOR_SUFFIX, SecretSource};
use crate::error::OAuthError;
use crate::method::{HmacSha1, Plaintext, RsaSha1, SignatureMethod};

/// Builds a method instance for the name it was resolved under.
pub type MethodConstructor =
    fn(&str, &dyn SecretSource) -> Result<Box<dyn SignatureMethod>, OAuthError>;

/// Name to constructor mapping.
pub struct MethodRegistry {
    methods: RwLock<HashMap<String, MethodConstructor>>,
}

impl MethodRegistry {
    /// Registry with no methods at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            methods: RwLock::new(HashMap::new()),
        }
    }

    /// Registry holding the built-in methods: `HMAC-SHA1`, `PLAINTEXT`, their
    /// `-Accessor` variants, and `RSA-SHA1`.
    #[must_use]
    pub fn with_builtins() -> Self {
        let registry = Self::empty();
        registry.register(HmacSha1::NAME, HmacSha1::construct);
        registry.register(&accessor_name(HmacSha1::NAME), HmacSha1::construct);
        registry.register(Plaintext::NAME, Plaintext::construct);
        registry.register(&accessor_name(Plaintext::NAME), Plaintext::construct);
        registry.register(RsaSha1::NAME, RsaSha1::construct);
        registry
    }

    /// Register `constructor` under `name`, replacing any previous entry.
    pub fn register(&self, name: &str, constructor: MethodConstructor) {
        let previous = self
            .methods
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_owned(), constructor);
        tracing::debug!(name, replaced = previous.is_some(), "Registered signature method");
    }

    /// Construct a new method instance for `name`, initialized from `source`.
    ///
    /// # Errors
    ///
    /// Returns `OAuthError::SignatureMethodRejected` if `name` is not
    /// registered (exact, case-sensitive match), or whatever the constructor
    /// reports.
    pub fn resolve(
        &self,
        name: &str,
        source: &dyn SecretSource,
    ) -> Result<Box<dyn SignatureMethod>, OAuthError> {
        // Copy the fn pointer out so the lock is not held while constructing
        let constructor = self
            .methods
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .copied();

        let Some(constructor) = constructor else {
            return Err(OAuthError::SignatureMethodRejected {
                name: name.to_owned(),
            });
        };
        constructor(name, source)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .methods
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

impl Default for MethodRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for MethodRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodRegistry")
            .field("methods", &self.names())
            .finish()
    }
}

fn accessor_name(name: &str) -> String {
    format!("{name}{ACCESSOR_SUFFIX}")
}

/// Process-wide registry, populated with the built-ins on first use.
static GLOBAL: LazyLock<MethodRegistry> = LazyLock::new(MethodRegistry::with_builtins);

/// The process-wide registry.
pub fn global() -> &'static MethodRegistry {
    &GLOBAL
}

/// Register a method in the process-wide registry.
pub fn register_method(name: &str, constructor: MethodConstructor) {
    GLOBAL.register(name, constructor);
}

/// Resolve a method from the process-wide registry.
pub fn resolve_method(
    name: &str,
    source: &dyn SecretSource,
) -> Result<Box<dyn SignatureMethod>, OAuthError> {
    GLOBAL.resolve(name, source)
}
