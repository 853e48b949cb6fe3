//! `MockTransport` — a scripted test double for `HttpTransport`.
//!
//! Useful in unit tests where spinning up a real HTTP server is either
//! unavailable or irrelevant.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::http::{HttpRequest, HttpResponse, HttpTransport, ResponseBody};
use crate::NodeError;

/// A mock transport that records every request it receives and replies with
/// programmer-scripted responses, consumed in order.
///
/// Once the script runs dry, further requests get an empty 200 response.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, NodeError>>>,
    /// All requests seen by this transport (in call order).
    pub calls: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a 200 response with a pre-parsed JSON body.
    pub fn respond_json(self, value: Value) -> Self {
        self.push(Ok(HttpResponse::ok(ResponseBody::Json(value))))
    }

    /// Script a 200 response with a plain-text body.
    pub fn respond_text(self, text: impl Into<String>) -> Self {
        self.push(Ok(HttpResponse::ok(ResponseBody::Text(text.into()))))
    }

    /// Script a 200 response with no body.
    pub fn respond_empty(self) -> Self {
        self.push(Ok(HttpResponse::ok(ResponseBody::Empty)))
    }

    /// Script a transport failure.
    pub fn respond_error(self, message: impl Into<String>) -> Self {
        self.push(Err(NodeError::Transport(message.into())))
    }

    fn push(self, response: Result<HttpResponse, NodeError>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    /// Number of requests this transport has received.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Clone of the `index`-th recorded request.
    ///
    /// # Panics
    /// Panics if fewer than `index + 1` requests were made.
    pub fn request_at(&self, index: usize) -> HttpRequest {
        self.calls.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn request(&self, request: HttpRequest) -> Result<HttpResponse, NodeError> {
        self.calls.lock().unwrap().push(request);

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::ok(ResponseBody::Empty)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use serde_json::json;

    fn get(url: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: url.to_owned(),
            headers: vec![],
            body: None,
        }
    }

    #[tokio::test]
    async fn scripted_responses_are_consumed_in_order() {
        let transport = MockTransport::new()
            .respond_json(json!({ "n": 1 }))
            .respond_text("second");

        let first = transport.request(get("http://a")).await.unwrap();
        let second = transport.request(get("http://b")).await.unwrap();
        let third = transport.request(get("http://c")).await.unwrap();

        assert_eq!(first.body, ResponseBody::Json(json!({ "n": 1 })));
        assert_eq!(second.body, ResponseBody::Text("second".into()));
        assert_eq!(third.body, ResponseBody::Empty);

        assert_eq!(transport.call_count(), 3);
        assert_eq!(transport.request_at(1).url, "http://b");
    }

    #[tokio::test]
    async fn scripted_errors_are_returned() {
        let transport = MockTransport::new().respond_error("connection refused");
        let err = transport.request(get("http://a")).await.unwrap_err();
        assert!(matches!(err, NodeError::Transport(_)));
    }
}
