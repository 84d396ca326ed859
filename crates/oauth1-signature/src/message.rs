//! OAuth request message: method, URL and parameters.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::consumer::OAuthAccessor;
use crate::encode::{percent_decode, percent_encode};
use crate::error::OAuthError;
use crate::parameter::{
    OAUTH_CONSUMER_KEY, OAUTH_NONCE, OAUTH_SIGNATURE, OAUTH_SIGNATURE_METHOD, OAUTH_TIMESTAMP,
    OAUTH_TOKEN, OAUTH_VERSION, Parameter, VERSION_1_0,
};

/// Signature method added by [`OAuthMessage::add_required_parameters`] when
/// the message does not name one.
pub const DEFAULT_SIGNATURE_METHOD: &str = "HMAC-SHA1";

const AUTH_SCHEME: &str = "OAuth";

/// An HTTP request as seen by OAuth signing.
///
/// The URL is used exactly as it goes into the base string; query parameters
/// belong in the parameter list. Method and URL are fixed at construction and
/// never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthMessage {
    method: String,
    url: String,
    parameters: Vec<Parameter>,
}

impl OAuthMessage {
    /// Create a message.
    ///
    /// # Errors
    ///
    /// Returns `OAuthError::InvalidMessage` if `method` or `url` is empty.
    pub fn new(
        method: impl Into<String>,
        url: impl Into<String>,
        parameters: impl IntoIterator<Item = Parameter>,
    ) -> Result<Self, OAuthError> {
        let method = method.into();
        let url = url.into();
        if method.is_empty() {
            return Err(OAuthError::InvalidMessage("HTTP method is empty".to_owned()));
        }
        if url.is_empty() {
            return Err(OAuthError::InvalidMessage("URL is empty".to_owned()));
        }
        Ok(Self {
            method,
            url,
            parameters: parameters.into_iter().collect(),
        })
    }

    /// HTTP request method.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Request URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn add_parameter(&mut self, parameter: impl Into<Parameter>) {
        self.parameters.push(parameter.into());
    }

    pub fn add_parameters(&mut self, parameters: impl IntoIterator<Item = Parameter>) {
        self.parameters.extend(parameters);
    }

    /// Value of the first parameter called `name`.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(Parameter::value_or_empty)
    }

    /// Value of the first parameter called `name`, or `MissingParameter`.
    pub fn require_parameter(&self, name: &str) -> Result<&str, OAuthError> {
        self.parameter(name)
            .ok_or_else(|| OAuthError::MissingParameter(name.to_owned()))
    }

    /// The `oauth_signature` this message carries.
    pub fn signature(&self) -> Result<&str, OAuthError> {
        self.require_parameter(OAUTH_SIGNATURE)
    }

    /// The `oauth_signature_method` this message names.
    pub fn signature_method(&self) -> Result<&str, OAuthError> {
        self.require_parameter(OAUTH_SIGNATURE_METHOD)
    }

    /// Add the protocol parameters a signed request needs, keeping any the
    /// message already has.
    ///
    /// Adds `oauth_consumer_key`, `oauth_token` (if the accessor has one),
    /// `oauth_signature_method`, `oauth_timestamp`, `oauth_nonce` and
    /// `oauth_version`.
    pub fn add_required_parameters(&mut self, accessor: &OAuthAccessor) -> Result<(), OAuthError> {
        if self.parameter(OAUTH_CONSUMER_KEY).is_none() {
            self.add_parameter((OAUTH_CONSUMER_KEY, accessor.consumer.consumer_key.as_str()));
        }
        if self.parameter(OAUTH_TOKEN).is_none()
            && let Some(token) = &accessor.access_token
        {
            self.add_parameter((OAUTH_TOKEN, token.as_str()));
        }
        if self.parameter(OAUTH_SIGNATURE_METHOD).is_none() {
            self.add_parameter((OAUTH_SIGNATURE_METHOD, DEFAULT_SIGNATURE_METHOD));
        }
        if self.parameter(OAUTH_TIMESTAMP).is_none() {
            self.add_parameter((OAUTH_TIMESTAMP, generate_timestamp()?));
        }
        if self.parameter(OAUTH_NONCE).is_none() {
            self.add_parameter((OAUTH_NONCE, generate_nonce()));
        }
        if self.parameter(OAUTH_VERSION).is_none() {
            self.add_parameter((OAUTH_VERSION, VERSION_1_0));
        }
        Ok(())
    }

    /// Build the `Authorization` header value carrying this message's
    /// `oauth_*` parameters, in insertion order.
    pub fn authorization_header(&self, realm: Option<&str>) -> String {
        let realm = realm.map(|r| format!("realm=\"{}\"", percent_encode(r)));
        let header_parts: Vec<String> = realm
            .into_iter()
            .chain(
                self.parameters
                    .iter()
                    .filter(|p| p.name.starts_with("oauth_"))
                    .map(|p| {
                        format!(
                            "{}=\"{}\"",
                            percent_encode(&p.name),
                            percent_encode(p.value_or_empty())
                        )
                    }),
            )
            .collect();
        format!("{AUTH_SCHEME} {}", header_parts.join(", "))
    }
}

/// Parse the parameters of an `OAuth` `Authorization` header.
///
/// `realm` is not a signed parameter and is skipped. A header using another
/// scheme yields no parameters.
pub fn decode_authorization(header: &str) -> Result<Vec<Parameter>, OAuthError> {
    let Some(params) = header
        .split_once(' ')
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case(AUTH_SCHEME))
        .map(|(_, params)| params)
    else {
        return Ok(Vec::new());
    };

    let mut parameters = Vec::new();
    for part in params.split(',') {
        let Some((name, value)) = part.split_once('=') else {
            continue;
        };
        let name = percent_decode(name.trim())?;
        if name.is_empty() || name.eq_ignore_ascii_case("realm") {
            continue;
        }
        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(value);
        parameters.push(Parameter::new(name, percent_decode(value)?));
    }
    Ok(parameters)
}

/// Generate cryptographically random nonce (32 hex characters).
fn generate_nonce() -> String {
    let bytes: [u8; 16] = rand::random();
    hex::encode(bytes)
}

/// Generate Unix timestamp.
fn generate_timestamp() -> Result<String, OAuthError> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)?
        .as_secs()
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consumer::OAuthConsumer;
    use pretty_assertions::assert_eq;

    fn accessor() -> OAuthAccessor {
        OAuthAccessor::new(OAuthConsumer::new("dpf43f3p2l4k3l03", Some("kd94hf93k423kf44".to_owned())))
            .with_token("nnch734d00sl2jdk", "pfkkdhi9sl3r4s00")
    }

    #[test]
    fn test_empty_method_rejected() {
        let result = OAuthMessage::new("", "http://example.com/", []);
        assert!(matches!(result, Err(OAuthError::InvalidMessage(_))));
    }

    #[test]
    fn test_empty_url_rejected() {
        let result = OAuthMessage::new("GET", "", []);
        assert!(matches!(result, Err(OAuthError::InvalidMessage(_))));
    }

    #[test]
    fn test_signed_base_string_carries_method_and_url() {
        use crate::method::{Plaintext, SignatureMethod};

        let mut message = OAuthMessage::new("POST", "https://example.com/r", []).unwrap();
        assert_eq!(message.method(), "POST");
        assert_eq!(message.url(), "https://example.com/r");

        let method = Plaintext::new("PLAINTEXT", &OAuthConsumer::new("k", Some("s".to_owned())));
        assert_eq!(method.base_string(&message), "POST&https%3A%2F%2Fexample.com%2Fr&&s&");
        method.sign_message(&mut message).unwrap();
        assert_eq!(message.method(), "POST");
        assert_eq!(message.url(), "https://example.com/r");
    }

    #[test]
    fn test_parameter_lookup_returns_first() {
        let message = OAuthMessage::new(
            "GET",
            "http://example.com/",
            [Parameter::new("a", "1"), Parameter::new("a", "2")],
        )
        .unwrap();
        assert_eq!(message.parameter("a"), Some("1"));
        assert_eq!(message.parameter("b"), None);
    }

    #[test]
    fn test_missing_signature() {
        let message = OAuthMessage::new("GET", "http://example.com/", []).unwrap();
        let err = message.signature().unwrap_err();
        assert!(matches!(err, OAuthError::MissingParameter(ref name) if name == "oauth_signature"));
    }

    #[test]
    fn test_nonce_uniqueness() {
        let nonce1 = generate_nonce();
        let nonce2 = generate_nonce();
        assert_ne!(nonce1, nonce2);
        assert_eq!(nonce1.len(), 32);
    }

    #[test]
    fn test_add_required_parameters() {
        let mut message = OAuthMessage::new("GET", "http://example.com/", []).unwrap();
        message.add_required_parameters(&accessor()).unwrap();

        assert_eq!(message.parameter("oauth_consumer_key"), Some("dpf43f3p2l4k3l03"));
        assert_eq!(message.parameter("oauth_token"), Some("nnch734d00sl2jdk"));
        assert_eq!(message.parameter("oauth_signature_method"), Some("HMAC-SHA1"));
        assert_eq!(message.parameter("oauth_version"), Some("1.0"));
        assert_eq!(message.parameter("oauth_nonce").unwrap().len(), 32);
        let timestamp: u64 = message.parameter("oauth_timestamp").unwrap().parse().unwrap();
        assert!(timestamp > 1_600_000_000);
    }

    #[test]
    fn test_add_required_parameters_keeps_existing() {
        let mut message = OAuthMessage::new(
            "GET",
            "http://example.com/",
            [
                Parameter::new("oauth_signature_method", "PLAINTEXT"),
                Parameter::new("oauth_nonce", "fixed"),
            ],
        )
        .unwrap();
        message.add_required_parameters(&accessor()).unwrap();

        assert_eq!(message.parameter("oauth_signature_method"), Some("PLAINTEXT"));
        assert_eq!(message.parameter("oauth_nonce"), Some("fixed"));
        let methods = message
            .parameters()
            .iter()
            .filter(|p| p.name == "oauth_signature_method")
            .count();
        assert_eq!(methods, 1);
    }

    #[test]
    fn test_add_required_parameters_without_token() {
        let accessor = OAuthAccessor::new(OAuthConsumer::new("key", None));
        let mut message = OAuthMessage::new("POST", "http://example.com/request", []).unwrap();
        message.add_required_parameters(&accessor).unwrap();
        assert_eq!(message.parameter("oauth_token"), None);
    }

    #[test]
    fn test_authorization_header() {
        let message = OAuthMessage::new(
            "GET",
            "http://example.com/",
            [
                Parameter::new("oauth_consumer_key", "key"),
                Parameter::new("file", "vacation.jpg"),
                Parameter::new("oauth_signature", "a+b/c="),
            ],
        )
        .unwrap();
        assert_eq!(
            message.authorization_header(Some("http://example.com/")),
            "OAuth realm=\"http%3A%2F%2Fexample.com%2F\", oauth_consumer_key=\"key\", \
             oauth_signature=\"a%2Bb%2Fc%3D\""
        );
        assert_eq!(
            message.authorization_header(None),
            "OAuth oauth_consumer_key=\"key\", oauth_signature=\"a%2Bb%2Fc%3D\""
        );
    }

    #[test]
    fn test_decode_authorization() {
        let header = "OAuth realm=\"Example\", oauth_consumer_key=\"key\", \
                      oauth_signature=\"a%2Bb%2Fc%3D\",oauth_version=\"1.0\"";
        let params = decode_authorization(header).unwrap();
        assert_eq!(
            params,
            vec![
                Parameter::new("oauth_consumer_key", "key"),
                Parameter::new("oauth_signature", "a+b/c="),
                Parameter::new("oauth_version", "1.0"),
            ]
        );
    }

    #[test]
    fn test_decode_authorization_other_scheme() {
        let params = decode_authorization("Basic dXNlcjpwYXNz").unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn test_header_round_trip() {
        let mut message = OAuthMessage::new("GET", "http://example.com/", []).unwrap();
        message.add_required_parameters(&accessor()).unwrap();
        message.add_parameter(("oauth_signature", "x y&z"));

        let decoded = decode_authorization(&message.authorization_header(Some("r"))).unwrap();
        assert_eq!(decoded, message.parameters());
    }
}
