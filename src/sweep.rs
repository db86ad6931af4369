//! Walk a set of county ids, one request each, and keep the ones that have data.
//!
//! County codes are not contiguous, so the usual way to collect a state is to
//! ask for every code in `SS000..=SS199` and drop the empty answers.

use crate::api::{Client, Transport, extract_observations};
use crate::error::BlsError;
use crate::models::{CleanObservation, CountyId, SeriesRequest};
use crate::report::{MALFORMED_PREFIX, failure_prefix};
use log::info;
use std::collections::BTreeMap;
use std::io::Write;
use std::str::FromStr;

/// Cleaned series keyed by county id.
pub type CountyData = BTreeMap<String, Vec<CleanObservation>>;

/// Inclusive range of numeric county codes, e.g. `37000:37199`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountyRange {
    pub start: u32,
    pub end: u32,
}

impl CountyRange {
    pub fn counties(self) -> impl Iterator<Item = CountyId> {
        (self.start..=self.end).map(CountyId::from_number)
    }
}

impl FromStr for CountyRange {
    type Err = String;

    /// Accepts `NNNNN` or `NNNNN:NNNNN`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let num = |p: &str| {
            p.trim()
                .parse::<u32>()
                .map_err(|e| format!("invalid county code {:?}: {}", p, e))
        };
        let (start, end) = match s.split_once(':') {
            Some((a, b)) => (num(a)?, num(b)?),
            None => {
                let n = num(s)?;
                (n, n)
            }
        };
        if start > end {
            return Err(format!("county range {}:{} is reversed", start, end));
        }
        Ok(Self { start, end })
    }
}

/// Parse a comma/semicolon separated list of ranges.
pub fn parse_ranges(s: &str) -> Result<Vec<CountyRange>, String> {
    s.split([',', ';'])
        .map(str::trim)
        .filter(|x| !x.is_empty())
        .map(CountyRange::from_str)
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct SweepResult {
    pub data: CountyData,
    /// Counties that answered with an empty series.
    pub missing: Vec<String>,
    /// Counties whose request or response failed.
    pub failed: Vec<String>,
}

/// Years and key shared by every request of a sweep.
#[derive(Debug, Clone)]
pub struct SweepParams {
    pub start_year: String,
    pub end_year: String,
    pub registration_key: Option<String>,
}

/// Fetch every county in order, printing one progress line per county.
///
/// Failures never stop the sweep; the county lands in `failed` and the next
/// one is tried. Only a broken `out` aborts.
pub fn sweep<T, W, I>(
    client: &Client<T>,
    counties: I,
    params: &SweepParams,
    out: &mut W,
) -> Result<SweepResult, BlsError>
where
    T: Transport,
    W: Write,
    I: IntoIterator<Item = CountyId>,
{
    let mut result = SweepResult::default();

    for county in counties {
        let request = SeriesRequest::for_county(
            &county,
            params.start_year.as_str(),
            params.end_year.as_str(),
            params.registration_key.clone(),
        );
        let id = county.to_string();

        let body = match client.fetch_raw(&request) {
            Ok(body) => body,
            Err(e) => {
                writeln!(out, "{} {}", failure_prefix(&e), e).map_err(BlsError::Console)?;
                result.failed.push(id);
                continue;
            }
        };

        let data = match extract_observations(&body) {
            Ok(data) => data,
            Err(_) => {
                let raw = serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string());
                writeln!(out, "{}\n{}", MALFORMED_PREFIX, raw).map_err(BlsError::Console)?;
                result.failed.push(id);
                continue;
            }
        };

        if data.is_empty() {
            writeln!(out, "County ID {} did not exist", id).map_err(BlsError::Console)?;
            result.missing.push(id);
            continue;
        }

        let cleaned = match data
            .iter()
            .map(CleanObservation::try_from)
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(cleaned) => cleaned,
            Err(e) => {
                writeln!(out, "County ID {}: {}", id, e).map_err(BlsError::Console)?;
                result.failed.push(id);
                continue;
            }
        };

        writeln!(out, "Got {} data items for county id {}", cleaned.len(), id)
            .map_err(BlsError::Console)?;
        result.data.insert(id, cleaned);
    }

    info!(
        "sweep done: {} with data, {} missing, {} failed",
        result.data.len(),
        result.missing.len(),
        result.failed.len()
    );
    Ok(result)
}
