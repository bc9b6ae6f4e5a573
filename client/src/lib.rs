//! Client library for the ParliaScope parliamentary API.
//!
//! - [`api`] - the backend operations behind one trait, with an HTTP client and a test mock
//! - [`session`] and [`token`] - sign-in state and the persisted bearer token
//! - [`chat`], [`search`], [`bills`], [`representatives`], [`alerts`] - multi-request flows
//! - [`config`] - layered YAML and environment configuration
//!
//! Transport types are re-exported from `ps-types` as [`types`].

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

pub mod alerts;
pub mod api;
pub mod bills;
pub mod chat;
pub mod config;
pub mod representatives;
pub mod search;
pub mod session;
pub mod token;

pub use ps_types as types;
