//! Transport types for the ParliaScope HTTP API.
//!
//! Everything here mirrors the backend's JSON schema. The types carry no
//! invariants of their own beyond shape: validation, uniqueness and
//! aggregation (ratings, impacts, summaries) all happen server-side.
//!
//! The [`filter`] module holds the only client-side derivation: narrowing an
//! already-fetched list by a case-insensitive substring.

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

pub mod auth;
pub mod bills;
pub mod chat;
pub mod content;
pub mod error;
pub mod filter;
pub mod location;
pub mod representatives;
pub mod subscriptions;

mod timestamp;

pub use auth::{LoginRequest, ProfileUpdate, SignupRequest, TokenResponse, User};
pub use bills::{AnalysisAccepted, Bill, BillImpact, Sentiment};
pub use chat::{ChatAnswer, ChatMessage, ChatRequest, ChatRole, ChatSource};
pub use content::{CrawlReport, DailyBrief, Document, SearchHistoryItem, SearchResult};
pub use error::ErrorBody;
pub use filter::{filter_by_query, Searchable};
pub use location::{LocationItem, ReverseGeocode};
pub use representatives::{Representative, Review, ReviewCreate};
pub use subscriptions::{Subscription, SubscriptionCreate};
