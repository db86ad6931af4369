use crate::error::BlsError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// LAUS series prefix: county-level, not seasonally adjusted.
pub const SERIES_PREFIX: &str = "LAUCN";
/// LAUS measure code for the unemployment rate.
pub const UNEMPLOYMENT_RATE_SUFFIX: &str = "0000000003";

/// Five-digit FIPS code of a U.S. county, e.g. `"37119"` for Mecklenburg County, NC.
///
/// The code is not validated; whatever is given ends up in the series id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CountyId(String);

impl CountyId {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Build from a numeric code, zero-padded on the left to five digits.
    pub fn from_number(code: u32) -> Self {
        Self(format!("{:05}", code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// BLS series identifier for a county's unemployment rate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesId(String);

impl SeriesId {
    pub fn for_county(county: &CountyId) -> Self {
        Self(format!(
            "{}{}{}",
            SERIES_PREFIX,
            county.as_str(),
            UNEMPLOYMENT_RATE_SUFFIX
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of a `timeseries/data` POST. Always carries exactly one series id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesRequest {
    #[serde(rename = "registrationKey", skip_serializing_if = "Option::is_none")]
    registration_key: Option<String>,
    #[serde(rename = "seriesid")]
    series_ids: [SeriesId; 1],
    #[serde(rename = "startyear")]
    start_year: String,
    #[serde(rename = "endyear")]
    end_year: String,
}

impl SeriesRequest {
    pub fn new(
        series: SeriesId,
        start_year: impl Into<String>,
        end_year: impl Into<String>,
        registration_key: Option<String>,
    ) -> Self {
        Self {
            registration_key,
            series_ids: [series],
            start_year: start_year.into(),
            end_year: end_year.into(),
        }
    }

    /// Shorthand for the unemployment-rate series of `county`.
    pub fn for_county(
        county: &CountyId,
        start_year: impl Into<String>,
        end_year: impl Into<String>,
        registration_key: Option<String>,
    ) -> Self {
        Self::new(
            SeriesId::for_county(county),
            start_year,
            end_year,
            registration_key,
        )
    }

    pub fn series_id(&self) -> &SeriesId {
        &self.series_ids[0]
    }

    pub fn series_ids(&self) -> &[SeriesId] {
        &self.series_ids
    }

    pub fn start_year(&self) -> &str {
        &self.start_year
    }

    pub fn end_year(&self) -> &str {
        &self.end_year
    }

    pub fn has_registration_key(&self) -> bool {
        self.registration_key.is_some()
    }
}

/// One data point as returned by the API. Passed through untouched.
pub type Observation = Value;

/// Top-level response of `timeseries/data`. Unknown fields are ignored.
///
/// Only `Results.series[].data` is typed; `status` and `message` are
/// diagnostics and accept any JSON.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseEnvelope {
    pub status: Option<Value>,
    pub message: Option<Value>,
    #[serde(rename = "Results")]
    pub results: Option<Results>,
}

impl ResponseEnvelope {
    pub fn status_text(&self) -> Option<String> {
        match &self.status {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        }
    }

    /// `message` entries as text. Strings are kept as-is, other values are
    /// rendered as JSON, a lone string or object counts as one entry.
    pub fn messages(&self) -> Vec<String> {
        let text = |v: &Value| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string());
        match &self.message {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.iter().filter(|v| !v.is_null()).map(text).collect(),
            Some(other) => vec![text(other)],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Results {
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Series {
    #[serde(rename = "seriesID")]
    pub series_id: Option<Value>,
    pub data: Vec<Observation>,
}

/// Observation reduced to the fields worth keeping.
///
/// `month` comes from `period` without its `M` prefix, so the annual
/// average period `M13` becomes month 13.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanObservation {
    pub year: i32,
    pub month: u32,
    #[serde(rename = "periodName")]
    pub period_name: String,
    pub value: f64,
}

impl TryFrom<&Observation> for CleanObservation {
    type Error = BlsError;

    fn try_from(obs: &Observation) -> Result<Self, Self::Error> {
        let year = str_field(obs, "year")?;
        let year = year
            .trim()
            .parse::<i32>()
            .map_err(|e| BlsError::MalformedObservation(format!("year {:?}: {}", year, e)))?;

        let period = str_field(obs, "period")?;
        let month = period
            .strip_prefix('M')
            .and_then(|m| m.parse::<u32>().ok())
            .ok_or_else(|| BlsError::MalformedObservation(format!("period {:?}", period)))?;

        let value = str_field(obs, "value")?;
        let value = value
            .trim()
            .parse::<f64>()
            .map_err(|e| BlsError::MalformedObservation(format!("value {:?}: {}", value, e)))?;

        // periodName is informational only; tolerate its absence.
        let period_name = obs
            .get("periodName")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            year,
            month,
            period_name,
            value,
        })
    }
}

fn str_field<'a>(obs: &'a Value, name: &str) -> Result<&'a str, BlsError> {
    obs.get(name).and_then(Value::as_str).ok_or_else(|| {
        BlsError::MalformedObservation(format!("missing string field `{}` in {}", name, obs))
    })
}
