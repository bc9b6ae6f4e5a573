//! Common test utilities for integration tests.
//!
//! - [`http_mock::MockHttpServer`] - stub the ParliaScope backend over HTTP

pub mod http_mock;
