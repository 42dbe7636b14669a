//! Tests for the validation rules.

use super::{POSTCODE_INVALID_MESSAGE, PostcodeFormatRule, PostcodeRule, ValidationRule};
use crate::client::PostcodeError;
use crate::test_fixtures::{MockClient, client, decoded_url};
use crate::transport::HttpError;

mod postcode_rule {
    use super::*;

    #[tokio::test]
    async fn existing_postcode_passes() {
        let client = client(MockClient::json(r#"{"status":200,"result":true}"#));
        let rule = PostcodeRule::new(&client);

        assert!(rule.passes("postcode", "N11 1QZ").await.unwrap());
        assert_eq!(
            decoded_url(&client.transport().last_request()),
            "https://api.postcodes.io/postcodes/N11 1QZ/validate"
        );
    }

    #[tokio::test]
    async fn unknown_postcode_fails() {
        let client = client(MockClient::json(r#"{"status":200,"result":false}"#));
        let rule = PostcodeRule::new(&client);

        assert!(!rule.passes("postcode", "test").await.unwrap());
    }

    #[tokio::test]
    async fn blank_value_fails_without_request() {
        let client = client(MockClient::new(vec![]));
        let rule = PostcodeRule::new(&client);

        assert!(!rule.passes("postcode", "").await.unwrap());
        assert_eq!(client.transport().calls(), 0);
    }

    #[tokio::test]
    async fn parent_directory_value_fails_without_request() {
        let client = client(MockClient::new(vec![]));
        let rule = PostcodeRule::new(&client);

        assert!(!rule.passes("postcode", "..").await.unwrap());
        assert_eq!(client.transport().calls(), 0);
    }

    #[tokio::test]
    async fn transport_failure_is_an_error_not_a_failed_check() {
        let client = client(MockClient::failing(HttpError::Timeout));
        let rule = PostcodeRule::new(&client);

        let err = rule.passes("postcode", "N11 1QZ").await.unwrap_err();

        assert!(matches!(err, PostcodeError::Transport(HttpError::Timeout)));
    }

    #[tokio::test]
    async fn rule_can_be_copied_and_shared() {
        let client = client(MockClient::new(vec![
            Ok(crate::transport::HttpResponse::json(
                http::StatusCode::OK,
                r#"{"result":true}"#,
            )),
            Ok(crate::transport::HttpResponse::json(
                http::StatusCode::OK,
                r#"{"result":false}"#,
            )),
        ]));
        let rule = PostcodeRule::new(&client);
        let copy = rule;

        assert!(rule.passes("home", "N11 1QZ").await.unwrap());
        assert!(!copy.passes("work", "ZZ1 1ZZ").await.unwrap());
        assert_eq!(client.transport().calls(), 2);
    }

    #[test]
    fn message_is_fixed() {
        let client = client(MockClient::new(vec![]));

        assert_eq!(
            PostcodeRule::new(&client).message(),
            "The submitted postcode is not a valid UK postcode"
        );
    }
}

mod format_rule {
    use super::*;

    #[tokio::test]
    async fn checks_format_only() {
        let rule = PostcodeFormatRule;

        assert!(rule.passes("postcode", "YY99 9YY").await.unwrap());
        assert!(!rule.passes("postcode", "not a postcode").await.unwrap());
    }

    #[test]
    fn shares_message_with_api_rule() {
        assert_eq!(PostcodeFormatRule.message(), POSTCODE_INVALID_MESSAGE);
    }
}
