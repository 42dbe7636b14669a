//! Tests for response envelope decoding.

use super::{PostcodeDetails, PostcodeError, ResultEnvelope, error_message, unwrap_result};

mod unwrapping {
    use super::*;

    #[test]
    fn boolean_result_is_extracted() {
        let result: Option<bool> = unwrap_result(br#"{"status":200,"result":true}"#).unwrap();

        assert_eq!(result, Some(true));
    }

    #[test]
    fn false_is_not_confused_with_null() {
        let result: Option<bool> = unwrap_result(br#"{"result":false}"#).unwrap();

        assert_eq!(result, Some(false));
    }

    #[test]
    fn null_result_is_none() {
        let result: Option<Vec<String>> =
            unwrap_result(br#"{"status":200,"result":null}"#).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn object_result_is_decoded() {
        let result: Option<PostcodeDetails> =
            unwrap_result(br#"{"status":200,"result":{"postcode":"N11 1QZ","outcode":"N11"}}"#)
                .unwrap();

        let details = result.unwrap();
        assert_eq!(details.postcode(), Some("N11 1QZ"));
        assert_eq!(details.outcode(), Some("N11"));
    }

    #[test]
    fn status_is_captured_when_present() {
        let envelope: ResultEnvelope<bool> =
            ResultEnvelope::from_slice(br#"{"status":200,"result":true}"#).unwrap();

        assert_eq!(envelope.status, Some(200));
        assert_eq!(envelope.result, Some(true));
    }

    #[test]
    fn status_is_optional() {
        let envelope: ResultEnvelope<bool> =
            ResultEnvelope::from_slice(br#"{"result":true}"#).unwrap();

        assert_eq!(envelope.status, None);
    }
}

mod malformed {
    use super::*;

    fn assert_malformed(body: &[u8]) {
        let result = unwrap_result::<bool>(body);
        assert!(
            matches!(result, Err(PostcodeError::MalformedResponse { .. })),
            "expected malformed for {:?}, got {result:?}",
            String::from_utf8_lossy(body)
        );
    }

    #[test]
    fn invalid_json_is_malformed() {
        assert_malformed(b"<html>502 Bad Gateway</html>");
    }

    #[test]
    fn empty_body_is_malformed() {
        assert_malformed(b"");
    }

    #[test]
    fn non_object_is_malformed() {
        assert_malformed(b"[true]");
    }

    #[test]
    fn missing_result_key_is_malformed() {
        assert_malformed(br#"{"status":200}"#);
    }

    #[test]
    fn wrong_result_shape_is_malformed() {
        assert_malformed(br#"{"status":200,"result":"yes"}"#);
    }

    #[test]
    fn reason_names_the_problem() {
        let err = unwrap_result::<bool>(br#"{"status":200}"#).unwrap_err();

        assert!(err.to_string().contains("`result`"));
    }
}

mod error_messages {
    use super::*;

    #[test]
    fn error_field_is_extracted() {
        let message = error_message(br#"{"status":400,"error":"Invalid longitude/latitude submitted"}"#);

        assert_eq!(
            message.as_deref(),
            Some("Invalid longitude/latitude submitted")
        );
    }

    #[test]
    fn missing_error_field_is_none() {
        assert!(error_message(br#"{"status":500}"#).is_none());
        assert!(error_message(b"Internal Server Error").is_none());
    }
}
