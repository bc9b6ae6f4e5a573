//! Alert subscriptions.

use serde::{Deserialize, Serialize};

/// A topic (or MP) the user receives alerts for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subscription {
    pub id: i64,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub speaker_id: Option<i64>,
}

/// Body of `POST /subscriptions/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubscriptionCreate {
    pub topic: String,
}
