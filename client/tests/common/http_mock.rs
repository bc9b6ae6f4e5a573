//! HTTP mock server helpers for testing outbound HTTP calls.
//!
//! A thin wrapper around `wiremock` for declarative HTTP stubbing.
//!
//! # Quick Start
//!
//! ```ignore
//! use crate::common::http_mock::MockHttpServer;
//!
//! #[tokio::test]
//! async fn test_external_api_call() {
//!     let server = MockHttpServer::start().await;
//!
//!     server
//!         .expect_get("/bills/")
//!         .respond_with_json(json!([]))
//!         .mount()
//!         .await;
//!
//!     let client = HttpParliaScopeClient::new(server.url());
//! }
//! ```
//!
//! # Patterns
//!
//! - **Success response**: `.respond_with_json(value)`
//! - **Error response**: `.respond_with_status(400).with_json_response(value)`
//! - **Timeout simulation**: `.respond_with_delay(Duration::from_secs(30))`
//! - **Request verification**: `.expect_times(1)` then `server.verify().await`
//!
//! Path matching ignores the query string; use `server.inner()` with
//! `wiremock` matchers directly when the query matters.

#![allow(dead_code)]

use serde_json::Value;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
pub use wiremock::MockServer as WiremockServer;
use wiremock::{Mock, ResponseTemplate};

/// A running stub server.
pub struct MockHttpServer {
    server: WiremockServer,
}

impl MockHttpServer {
    pub async fn start() -> Self {
        Self {
            server: WiremockServer::start().await,
        }
    }

    /// Base URL to hand to the client under test.
    pub fn url(&self) -> String {
        self.server.uri()
    }

    pub const fn inner(&self) -> &WiremockServer {
        &self.server
    }

    /// Panics if any stub's `expect_times` was not met.
    pub async fn verify(&self) {
        self.server.verify().await;
    }

    pub fn expect_get(&self, route: &str) -> Stub<'_> {
        Stub::new(&self.server, "GET", route)
    }

    pub fn expect_post(&self, route: &str) -> Stub<'_> {
        Stub::new(&self.server, "POST", route)
    }

    pub fn expect_patch(&self, route: &str) -> Stub<'_> {
        Stub::new(&self.server, "PATCH", route)
    }

    pub fn expect_delete(&self, route: &str) -> Stub<'_> {
        Stub::new(&self.server, "DELETE", route)
    }
}

/// A stubbed route, built up and then mounted on the server.
pub struct Stub<'a> {
    server: &'a WiremockServer,
    method: &'static str,
    route: String,
    headers: Vec<(String, String)>,
    status: u16,
    body: Option<Value>,
    delay: Option<Duration>,
    times: Option<u64>,
}

impl<'a> Stub<'a> {
    fn new(server: &'a WiremockServer, method: &'static str, route: &str) -> Self {
        Self {
            server,
            method,
            route: route.to_string(),
            headers: Vec::new(),
            status: 200,
            body: None,
            delay: None,
            times: None,
        }
    }

    /// Only match requests carrying this header value.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Only match requests with `Authorization: Bearer <token>`.
    #[must_use]
    pub fn with_bearer(self, token: &str) -> Self {
        self.with_header("Authorization", &format!("Bearer {token}"))
    }

    /// Answer 200 with a JSON body.
    #[must_use]
    pub fn respond_with_json(mut self, body: Value) -> Self {
        self.status = 200;
        self.body = Some(body);
        self
    }

    /// Answer with this status; combine with `with_json_response` for a body.
    #[must_use]
    pub const fn respond_with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Set the JSON body without changing the status.
    #[must_use]
    pub fn with_json_response(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    #[must_use]
    pub const fn respond_with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    #[must_use]
    pub const fn expect_times(mut self, times: u64) -> Self {
        self.times = Some(times);
        self
    }

    pub async fn mount(self) {
        let mut template = ResponseTemplate::new(self.status);
        if let Some(body) = self.body {
            template = template.set_body_json(body);
        }
        if let Some(delay) = self.delay {
            template = template.set_delay(delay);
        }

        let mut builder = Mock::given(method(self.method)).and(path(self.route.as_str()));
        for (name, value) in &self.headers {
            builder = builder.and(header(name.as_str(), value.as_str()));
        }

        let mut mock = builder.respond_with(template);
        if let Some(times) = self.times {
            mock = mock.expect(times);
        }

        mock.mount(self.server).await;
    }
}
