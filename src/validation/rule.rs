//! Validation rules for postcode input fields.

use std::convert::Infallible;
use std::future::Future;

use super::is_valid_postcode_format;
use crate::client::{PostcodeClient, PostcodeError};
use crate::transport::HttpClient;

/// Failure message shared by the postcode rules.
pub const POSTCODE_INVALID_MESSAGE: &str = "The submitted postcode is not a valid UK postcode";

/// A predicate over one named input field.
///
/// `passes` answers whether `value` is acceptable for `attribute`; `message`
/// is shown to the user when it is not. An `Err` means the rule could not
/// decide, which callers must not treat as a failed validation.
pub trait ValidationRule: Send + Sync {
    /// Why the rule could not decide.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns `Ok(true)` if `value` satisfies the rule.
    fn passes(
        &self,
        attribute: &str,
        value: &str,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Human-readable failure message.
    fn message(&self) -> &str;
}

/// Checks that a postcode exists, using the API's `validate` endpoint.
///
/// Borrows the client; the caller owns its lifecycle.
///
/// # Example
///
/// ```no_run
/// use postcodes_io::client::PostcodeClient;
/// use postcodes_io::transport::ReqwestClient;
/// use postcodes_io::validation::{PostcodeRule, ValidationRule};
///
/// # async fn example() -> Result<(), postcodes_io::client::PostcodeError> {
/// let client = PostcodeClient::with_default_base_url(ReqwestClient::new())?;
/// let rule = PostcodeRule::new(&client);
/// if !rule.passes("postcode", "N11 1QZ").await? {
///     eprintln!("{}", rule.message());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PostcodeRule<'a, H> {
    client: &'a PostcodeClient<H>,
}

impl<'a, H> PostcodeRule<'a, H> {
    /// Creates a rule backed by `client`.
    #[must_use]
    pub const fn new(client: &'a PostcodeClient<H>) -> Self {
        Self { client }
    }
}

impl<H> Clone for PostcodeRule<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H> Copy for PostcodeRule<'_, H> {}

impl<H: HttpClient> ValidationRule for PostcodeRule<'_, H> {
    type Error = PostcodeError;

    async fn passes(&self, attribute: &str, value: &str) -> Result<bool, PostcodeError> {
        let valid = self.client.validate(value).await?;
        if !valid {
            tracing::debug!(attribute, value, "Postcode rejected by API");
        }
        Ok(valid)
    }

    fn message(&self) -> &str {
        POSTCODE_INVALID_MESSAGE
    }
}

/// Checks only the postcode format, without a request.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostcodeFormatRule;

impl ValidationRule for PostcodeFormatRule {
    type Error = Infallible;

    async fn passes(&self, _attribute: &str, value: &str) -> Result<bool, Infallible> {
        Ok(is_valid_postcode_format(value))
    }

    fn message(&self) -> &str {
        POSTCODE_INVALID_MESSAGE
    }
}
