//! One fetch, printed to a console.
//!
//! Output lines written here are the program's visible contract; logging
//! goes through `log` and ends up on stderr.

use crate::api::{Client, Transport, extract_observations};
use crate::error::BlsError;
use crate::models::{Observation, SeriesRequest};
use std::io::Write;

pub const NO_DATA_NOTICE: &str = "BLS server had no data; county probably doesn't exist.";
pub const POST_ERROR_PREFIX: &str = "Error while making POST request:";
pub const MALFORMED_PREFIX: &str = "Couldn't extract time series from BLS response:";

/// How a successful fetch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Observations(usize),
    /// The series came back without any data points. Not an error.
    Empty,
}

/// Fetch the single series described by `request` and print the result to `out`.
///
/// An empty series is reported as `Outcome::Empty` together with a notice that
/// the county probably does not exist. That is a guess: an empty series can
/// also mean the year range has no data.
///
/// ### Errors
/// - transport-level failures, after printing one `Error while making POST request` line
/// - `BlsError::MalformedResponse` when the body is not JSON or `Results.series[0].data`
///   is absent, after printing one `Couldn't extract time series` line
/// - `BlsError::Console` when writing to `out` fails
pub fn fetch_and_report<T, W>(
    client: &Client<T>,
    request: &SeriesRequest,
    out: &mut W,
) -> Result<Outcome, BlsError>
where
    T: Transport,
    W: Write,
{
    emit(out, format_args!("Getting series with id = {}", request.series_id()))?;

    let body = match client.fetch_raw(request) {
        Ok(body) => body,
        Err(e) => {
            emit(out, format_args!("{} {}", failure_prefix(&e), e))?;
            return Err(e);
        }
    };

    let data = match extract_observations(&body) {
        Ok(data) => data,
        Err(e) => {
            emit(out, format_args!("{} {}", MALFORMED_PREFIX, e))?;
            return Err(e);
        }
    };

    emit(out, format_args!("{}", render(&data)))?;

    if data.is_empty() {
        emit(out, format_args!("{}", NO_DATA_NOTICE))?;
        return Ok(Outcome::Empty);
    }
    Ok(Outcome::Observations(data.len()))
}

/// Console prefix for an error raised by `Client::fetch_raw`.
///
/// A body that arrived but is not JSON is a bad response, not a failed POST.
pub fn failure_prefix(e: &BlsError) -> &'static str {
    match e {
        BlsError::MalformedResponse(_) => MALFORMED_PREFIX,
        _ => POST_ERROR_PREFIX,
    }
}

/// Pretty JSON array of the observations, as returned by the API.
pub fn render(data: &[Observation]) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| format!("{:?}", data))
}

fn emit<W: Write>(out: &mut W, line: std::fmt::Arguments<'_>) -> Result<(), BlsError> {
    writeln!(out, "{}", line).map_err(BlsError::Console)
}
