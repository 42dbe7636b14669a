//! Application execution logic.
//!
//! This module runs one [`Action`] against the API and prints the result
//! as pretty JSON.

use std::io::Write;

use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use postcodes_io::client::{BulkEntry, PostcodeClient, PostcodeError};
use postcodes_io::config::{Action, ValidatedConfig};
use postcodes_io::transport::{HttpClient, HttpError, ReqwestClient};
use postcodes_io::validation::{PostcodeRule, ValidationRule, normalize_postcode};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to build the HTTP transport.
    #[error("Failed to create HTTP client: {0}")]
    Transport(#[source] HttpError),

    /// The API call failed.
    #[error(transparent)]
    Api(#[from] PostcodeError),

    /// Failed to encode the result.
    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),

    /// Failed to write the result.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Whether the command answered yes or no.
///
/// Only `validate` and `check` can answer no; every other action that
/// returns is positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Success, or a valid postcode
    Positive,
    /// An invalid postcode
    Negative,
}

impl From<bool> for Outcome {
    fn from(valid: bool) -> Self {
        if valid { Self::Positive } else { Self::Negative }
    }
}

/// Executes one action against the configured API.
///
/// Output is buffered and written to stdout only once the call succeeded.
///
/// # Errors
///
/// Returns an error if the transport cannot be built, the API call fails,
/// or the output cannot be written.
pub async fn execute(config: &ValidatedConfig, action: Action) -> Result<Outcome, RunError> {
    let http = ReqwestClient::with_options(config.timeout, &config.user_agent)
        .map_err(RunError::Transport)?;
    let client = PostcodeClient::new(http, config.base_url.clone())?;

    let mut buffer = Vec::new();
    let outcome = dispatch(&client, action, &mut buffer).await?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&buffer)?;
    stdout.flush()?;

    Ok(outcome)
}

/// Runs `action` with `client` and writes the JSON result to `out`.
async fn dispatch<H: HttpClient, W: Write>(
    client: &PostcodeClient<H>,
    action: Action,
    out: &mut W,
) -> Result<Outcome, RunError> {
    tracing::debug!(?action, "Running action");

    match action {
        Action::Validate { postcode } => return validate(client, &postcode, out).await,
        Action::Check { postcode } => return check(&postcode, out),
        Action::Lookup { postcode } => write_json(out, &client.get_postcode(&postcode).await?)?,
        Action::Bulk { postcodes, filter } => {
            let results = client.get_postcodes_filtered(&postcodes, &filter).await?;
            let entries: Vec<_> = postcodes
                .into_iter()
                .zip(results)
                .map(|(query, result)| BulkEntry { query, result })
                .collect();
            write_json(out, &entries)?;
        }
        Action::Outcode { outcode } => {
            write_json(out, &client.get_outward_code(&outcode).await?)?;
        }
        Action::Random => write_json(out, &client.get_random_postcode().await?)?,
        Action::Query { text } => write_json(out, &client.query(&text).await?)?,
        Action::Nearest { postcode } => write_json(out, &client.nearest(&postcode).await?)?,
        Action::Terminated { postcode } => {
            write_json(out, &client.get_terminated_postcode(&postcode).await?)?;
        }
        Action::Autocomplete { partial } => {
            write_json(out, &client.autocomplete(&partial).await?)?;
        }
        Action::OutcodesNear {
            longitude,
            latitude,
        } => {
            let results = client
                .nearest_outward_codes_for_lng_lat(longitude, latitude)
                .await?;
            write_json(out, &results)?;
        }
        Action::NearestOutcode {
            outcode,
            limit,
            radius,
        } => {
            let results = client
                .get_nearest_outward_code(&outcode, limit, radius)
                .await?;
            write_json(out, &results)?;
        }
        Action::PostcodesNear {
            longitude,
            latitude,
        } => {
            let results = client
                .nearest_postcodes_for_lng_lat(longitude, latitude)
                .await?;
            write_json(out, &results)?;
        }
        Action::Reverse { points } => {
            write_json(out, &client.bulk_reverse_geocoding(&points).await?)?;
        }
    }

    Ok(Outcome::Positive)
}

async fn validate<H: HttpClient, W: Write>(
    client: &PostcodeClient<H>,
    postcode: &str,
    out: &mut W,
) -> Result<Outcome, RunError> {
    let rule = PostcodeRule::new(client);
    let valid = rule.passes("postcode", postcode).await?;
    if !valid {
        tracing::info!(postcode, "{}", rule.message());
    }

    write_json(out, &json!({ "postcode": postcode, "valid": valid }))?;
    Ok(valid.into())
}

fn check<W: Write>(postcode: &str, out: &mut W) -> Result<Outcome, RunError> {
    let normalized = normalize_postcode(postcode);
    let valid = normalized.is_some();

    write_json(
        out,
        &json!({ "postcode": postcode, "valid": valid, "normalized": normalized }),
    )?;
    Ok(valid.into())
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<(), RunError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
