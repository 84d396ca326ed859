//! Sign and verify messages by the method they name.

use crate::consumer::SecretSource;
use crate::error::OAuthError;
use crate::message::OAuthMessage;
use crate::method::SignatureMethod;
use crate::registry;

/// Sign `message` with the method named by its `oauth_signature_method`,
/// appending `oauth_signature`.
///
/// # Errors
///
/// Returns `MissingParameter` if the message names no method and
/// `SignatureMethodRejected` if the method is not registered.
pub fn sign(message: &mut OAuthMessage, source: &dyn SecretSource) -> Result<(), OAuthError> {
    let method = registry::resolve_method(message.signature_method()?, source)?;
    method.sign_message(message)
}

/// Verify the `oauth_signature` of `message` with the method it names.
///
/// `Ok(false)` is a signature mismatch; any `Err` also means the request is
/// not authenticated.
pub fn verify(message: &OAuthMessage, source: &dyn SecretSource) -> Result<bool, OAuthError> {
    let method = registry::resolve_method(message.signature_method()?, source)?;
    method.verify_message(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consumer::{ACCESSOR_SECRET, OAuthAccessor, OAuthConsumer};
    use crate::parameter::Parameter;
    use pretty_assertions::assert_eq;

    fn accessor() -> OAuthAccessor {
        OAuthAccessor::new(OAuthConsumer::new(
            "dpf43f3p2l4k3l03",
            Some("kd94hf93k423kf44".to_owned()),
        ))
        .with_token("nnch734d00sl2jdk", "pfkkdhi9sl3r4s00")
    }

    fn message(method: &str) -> OAuthMessage {
        OAuthMessage::new(
            "GET",
            "http://photos.example.net/photos",
            [
                Parameter::new("file", "vacation.jpg"),
                Parameter::new("size", "original"),
                Parameter::new("oauth_signature_method", method),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_sign_then_verify() {
        for name in ["HMAC-SHA1", "HMAC-SHA1-Accessor", "PLAINTEXT", "PLAINTEXT-Accessor"] {
            let mut message = message(name);
            sign(&mut message, &accessor()).unwrap();
            assert!(verify(&message, &accessor()).unwrap(), "{name}");
        }
    }

    #[test]
    fn test_sign_appends_one_signature() {
        let mut message = message("HMAC-SHA1");
        sign(&mut message, &accessor()).unwrap();
        let signatures = message
            .parameters()
            .iter()
            .filter(|p| p.name == "oauth_signature")
            .count();
        assert_eq!(signatures, 1);
        assert_eq!(message.parameters().len(), 4);
    }

    #[test]
    fn test_verify_detects_tampering() {
        let mut message = message("HMAC-SHA1");
        sign(&mut message, &accessor()).unwrap();

        let signature = message.signature().unwrap().to_owned();
        let mut tampered = OAuthMessage::new(
            "GET",
            "http://photos.example.net/photos",
            [
                Parameter::new("file", "vacation.jpf"),
                Parameter::new("size", "original"),
                Parameter::new("oauth_signature_method", "HMAC-SHA1"),
            ],
        )
        .unwrap();
        tampered.add_parameter(("oauth_signature", signature));
        assert!(!verify(&tampered, &accessor()).unwrap());
    }

    #[test]
    fn test_verify_with_wrong_token_secret() {
        let mut message = message("HMAC-SHA1");
        sign(&mut message, &accessor()).unwrap();

        let other = OAuthAccessor::new(accessor().consumer).with_token("nnch734d00sl2jdk", "wrong");
        assert!(!verify(&message, &other).unwrap());
    }

    #[test]
    fn test_accessor_secret_must_match() {
        let consumer = OAuthConsumer::new("key", Some("regular".to_owned()))
            .with_property(ACCESSOR_SECRET, "accessor");
        let mut message = message("HMAC-SHA1-Accessor");
        sign(&mut message, &consumer).unwrap();

        assert!(verify(&message, &consumer).unwrap());
        let without_accessor = OAuthConsumer::new("key", Some("regular".to_owned()));
        assert!(!verify(&message, &without_accessor).unwrap());
    }

    #[test]
    fn test_unknown_method_fails_closed() {
        let mut message = message("BOGUS");
        let err = sign(&mut message, &accessor()).unwrap_err();
        assert!(matches!(err, OAuthError::SignatureMethodRejected { .. }));
        assert!(message.signature().is_err());

        message.add_parameter(("oauth_signature", "anything"));
        assert!(verify(&message, &accessor()).is_err());
    }

    #[test]
    fn test_missing_method() {
        let mut message = OAuthMessage::new("GET", "http://example.com/", []).unwrap();
        let err = sign(&mut message, &accessor()).unwrap_err();
        assert!(matches!(err, OAuthError::MissingParameter(ref name) if name == "oauth_signature_method"));
    }

    #[test]
    fn test_full_request_flow() {
        let accessor = accessor();
        let mut message = OAuthMessage::new(
            "POST",
            "https://api.example.com/status",
            [Parameter::new("status", "Hello Ladies + Gentlemen")],
        )
        .unwrap();
        message.add_required_parameters(&accessor).unwrap();
        sign(&mut message, &accessor).unwrap();

        // Server side: parameters arrive split between the header and the body
        let header = message.authorization_header(Some("Example"));
        let mut received = OAuthMessage::new(
            "POST",
            "https://api.example.com/status",
            [Parameter::new("status", "Hello Ladies + Gentlemen")],
        )
        .unwrap();
        received.add_parameters(crate::message::decode_authorization(&header).unwrap());

        assert!(verify(&received, &accessor).unwrap());
    }
}
