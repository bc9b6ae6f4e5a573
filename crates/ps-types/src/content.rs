//! Hansard documents, search, audio briefs and ingestion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_default_from_null;

/// A processed Hansard transcript from `GET /docs/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub id: i64,
    /// Empty for transcripts ingested before a title was extracted.
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub title: String,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub ai_summary: Option<String>,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
}

/// One speech segment matched by the server's hybrid search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    pub id: i64,
    pub speaker_name: String,
    pub content: String,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchHistoryItem {
    pub query: String,
    #[serde(default, with = "crate::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Today's audio summary from `GET /audio/daily-brief`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyBrief {
    pub title: String,
    pub audio_url: String,
    #[serde(default)]
    pub transcript: String,
}

/// Outcome of `POST /ingest/crawl`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CrawlReport {
    pub status: String,
    #[serde(default)]
    pub ingested_now: u32,
}
