//! ParliaScope backend API client.
//!
//! # Architecture
//!
//! The module uses a trait-based design for testability:
//!
//! - [`ParliaScopeApi`] - Trait defining every backend operation
//! - [`HttpParliaScopeClient`] - Real HTTP implementation using reqwest
//! - [`mock::MockParliaScopeClient`] - Scripted mock for unit tests (behind `test-utils` feature)
//!
//! Every HTTP call goes through one helper, [`HttpParliaScopeClient::request`],
//! which joins the base URL and path, attaches `Authorization: Bearer` when a
//! token is given, encodes the body as JSON or as an OAuth2 password-grant
//! form, and maps failures onto the two kinds in [`ApiError`].
//!
//! # Testing Patterns
//!
//! ## Unit Tests (Mock Implementation)
//!
//! ```ignore
//! use parliascope_client::api::mock::MockParliaScopeClient;
//!
//! let mock = MockParliaScopeClient::new();
//! mock.push_json("me", json!({"id": 1, "email": "a@b.ke"}));
//!
//! let mut session = AuthSession::new(mock, MemoryTokenStore::default());
//! ```
//!
//! ## Integration Tests (HTTP Stubbing)
//!
//! ```ignore
//! let server = MockHttpServer::start().await;
//! server
//!     .expect_get("/auth/me")
//!     .with_header("Authorization", "Bearer t0k3n")
//!     .respond_with_json(json!({"id": 1}))
//!     .mount()
//!     .await;
//!
//! let client = HttpParliaScopeClient::new(server.url());
//! let user = client.me("t0k3n").await.unwrap();
//! ```

mod client;
mod error;

pub use client::{Body, HttpParliaScopeClient, ParliaScopeApi, NO_BODY};
pub use error::{ApiError, GENERIC_FAILURE_MESSAGE, NETWORK_ERROR_MESSAGE};

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
