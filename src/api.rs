//! Synchronous client for the **BLS Public Data API (v2)**.
//!
//! Only the `timeseries/data` endpoint is used: one POST per series, with the
//! request described by `models::SeriesRequest`. There is no retry and no
//! pagination; the caller gets exactly one result or one error per call.
//!
//! ### Notes
//! - The HTTP exchange sits behind the `Transport` trait so the fetch flow can
//!   be driven without a network.
//! - The API reports problems (unknown series, daily quota) in a top-level
//!   `message` array. These are logged at warn level.
//!
//! Typical usage:
//! ```no_run
//! # use bls_series::{Client, CountyId, SeriesRequest};
//! let client: Client = Client::default();
//! let request = SeriesRequest::for_county(&CountyId::new("37119"), "2006", "2014", None);
//! let observations = client.fetch_series(&request)?;
//! # Ok::<(), bls_series::BlsError>(())
//! ```

use crate::error::BlsError;
use crate::models::{Observation, ResponseEnvelope, SeriesRequest};
use log::{debug, warn};
use reqwest::blocking::Client as HttpClient;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://api.bls.gov/publicAPI/v2/timeseries/data/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// One request/response exchange carrying JSON both ways.
pub trait Transport {
    fn post_json(&self, url: &str, body: &Value) -> Result<Value, BlsError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post_json(&self, url: &str, body: &Value) -> Result<Value, BlsError> {
        (**self).post_json(url, body)
    }
}

/// `Transport` backed by a blocking reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: HttpClient,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, BlsError> {
        let http = HttpClient::builder()
            .timeout(timeout) // total request timeout
            .connect_timeout(Duration::from_secs(10).min(timeout))
            // A followed 301/302 turns the POST into a body-less GET.
            .redirect(Policy::none())
            .user_agent(concat!("bls-series/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    fn post_json(&self, url: &str, body: &Value) -> Result<Value, BlsError> {
        let resp = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(BlsError::Status(status.as_u16()));
        }
        let text = resp.text()?;
        serde_json::from_str(&text)
            .map_err(|e| BlsError::MalformedResponse(format!("body is not JSON: {}", e)))
    }
}

#[derive(Debug, Clone)]
pub struct Client<T = HttpTransport> {
    pub endpoint: String,
    transport: T,
}

impl Default for Client {
    fn default() -> Self {
        let transport = HttpTransport::new(DEFAULT_TIMEOUT).expect("reqwest client build");
        Self::with_transport(transport)
    }
}

impl Client {
    /// HTTP client with a custom total timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, BlsError> {
        Ok(Self::with_transport(HttpTransport::new(timeout)?))
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            transport,
        }
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// POST the request and return the decoded JSON body as-is.
    pub fn fetch_raw(&self, request: &SeriesRequest) -> Result<Value, BlsError> {
        let body = serde_json::to_value(request).map_err(BlsError::Encode)?;
        debug!(
            "POST {} series={} years={}..{}",
            self.endpoint,
            request.series_id(),
            request.start_year(),
            request.end_year()
        );
        self.transport.post_json(&self.endpoint, &body)
    }

    /// POST the request and return the observations of its single series.
    pub fn fetch_series(&self, request: &SeriesRequest) -> Result<Vec<Observation>, BlsError> {
        let body = self.fetch_raw(request)?;
        extract_observations(&body)
    }
}

/// Pull `Results.series[0].data` out of a response body.
///
/// Every step of the path is checked; a missing step yields
/// `BlsError::MalformedResponse` carrying the API's own messages, if any.
pub fn extract_observations(body: &Value) -> Result<Vec<Observation>, BlsError> {
    let envelope = parse_envelope(body)?;

    let status = envelope.status_text();
    let messages = envelope.messages();
    for msg in &messages {
        warn!("bls api: {}", msg);
    }

    let describe = |what: &str| {
        let mut detail = what.to_string();
        if let Some(status) = &status {
            detail.push_str(&format!(" (status {})", status));
        }
        if !messages.is_empty() {
            detail.push_str(&format!(": {}", messages.join("; ")));
        }
        BlsError::MalformedResponse(detail)
    };

    let results = envelope
        .results
        .ok_or_else(|| describe("no `Results` in response"))?;
    let series = results
        .series
        .into_iter()
        .next()
        .ok_or_else(|| describe("`Results.series` is empty"))?;
    Ok(series.data)
}

fn parse_envelope(body: &Value) -> Result<ResponseEnvelope, BlsError> {
    if !body.is_object() {
        return Err(BlsError::MalformedResponse(format!(
            "expected a JSON object, got {}",
            body
        )));
    }
    ResponseEnvelope::deserialize(body)
        .map_err(|e| BlsError::MalformedResponse(format!("unexpected shape: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_first_series_data() {
        let body = json!({
            "status": "REQUEST_SUCCEEDED",
            "responseTime": 31,
            "message": [],
            "Results": {"series": [
                {"seriesID": "LAUCN371190000000003", "data": [{"year": "2013"}]},
                {"seriesID": "other", "data": []}
            ]}
        });
        let data = extract_observations(&body).unwrap();
        assert_eq!(data, vec![json!({"year": "2013"})]);
    }

    #[test]
    fn missing_results_carries_api_messages() {
        let body = json!({
            "status": "REQUEST_NOT_PROCESSED",
            "message": ["daily threshold reached"]
        });
        let err = extract_observations(&body).unwrap_err();
        let text = err.to_string();
        assert!(matches!(err, BlsError::MalformedResponse(_)));
        assert!(text.contains("REQUEST_NOT_PROCESSED"), "{text}");
        assert!(text.contains("daily threshold reached"), "{text}");
    }

    #[test]
    fn odd_diagnostic_fields_do_not_hide_valid_data() {
        let data = json!([{"year": "2013", "period": "M01", "value": "9.0"}]);
        for extra in [
            json!({"message": null, "status": null}),
            json!({"message": [{"code": 1}], "status": 0}),
            json!({"message": "one line", "status": {"code": "OK"}}),
        ] {
            let mut body = extra.clone();
            body["Results"] = json!({"series": [{"seriesID": 42, "data": data.clone()}]});
            let got = extract_observations(&body).unwrap();
            assert_eq!(&got, data.as_array().unwrap(), "{extra}");
        }
    }

    #[test]
    fn non_string_messages_are_still_reported() {
        let body = json!({"status": "REQUEST_NOT_PROCESSED", "message": [{"code": 1}, "quota"]});
        let text = extract_observations(&body).unwrap_err().to_string();
        assert!(text.contains(r#"{"code":1}"#), "{text}");
        assert!(text.contains("quota"), "{text}");
    }

    #[test]
    fn non_object_body_is_malformed() {
        let err = extract_observations(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, BlsError::MalformedResponse(_)));
    }
}
