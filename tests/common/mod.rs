#![allow(dead_code)]

use bls_series::BlsError;
use bls_series::api::Transport;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;

/// What the fake transport hands back for one call.
pub enum Reply {
    Body(Value),
    Status(u16),
}

/// Transport that replays canned replies and records every request body.
#[derive(Default)]
pub struct FakeTransport {
    replies: RefCell<VecDeque<Reply>>,
    pub requests: RefCell<Vec<(String, Value)>>,
}

impl FakeTransport {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: RefCell::new(replies.into_iter().collect()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl Transport for FakeTransport {
    fn post_json(&self, url: &str, body: &Value) -> Result<Value, BlsError> {
        self.requests
            .borrow_mut()
            .push((url.to_string(), body.clone()));
        match self.replies.borrow_mut().pop_front() {
            Some(Reply::Body(v)) => Ok(v),
            Some(Reply::Status(code)) => Err(BlsError::Status(code)),
            None => panic!("unexpected request to {url}"),
        }
    }
}

pub fn series_body(data: Value) -> Value {
    serde_json::json!({
        "status": "REQUEST_SUCCEEDED",
        "responseTime": 12,
        "message": [],
        "Results": {"series": [{"seriesID": "LAUCN371190000000003", "data": data}]}
    })
}

/// Serve one canned HTTP response on a local port and return its URL.
///
/// The request is read in full (headers plus `Content-Length` body) before
/// the response is written.
pub fn serve_once(response: String) -> String {
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap();
                }
            }
        }
        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body).unwrap();
        let mut stream = reader.into_inner();
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
    });
    format!("http://{}/publicAPI/v2/timeseries/data/", addr)
}

pub fn http_response(status_line: &str, headers: &[(&str, &str)], body: &str) -> String {
    let mut out = format!("HTTP/1.1 {}\r\n", status_line);
    for (name, value) in headers {
        out.push_str(&format!("{}: {}\r\n", name, value));
    }
    out.push_str(&format!(
        "Content-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    ));
    out
}
