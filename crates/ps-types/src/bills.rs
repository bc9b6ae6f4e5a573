//! Bills and their AI-generated demographic impact cards.

use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_default_from_null;
use std::fmt;

/// A bill tracked by the impact engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bill {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub document_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub impacts: Vec<BillImpact>,
}

impl Bill {
    /// Bills with no impact cards have not been analysed yet.
    #[must_use]
    pub fn is_analyzed(&self) -> bool {
        !self.impacts.is_empty()
    }
}

/// How a bill affects one demographic archetype (students, SMEs, farmers...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BillImpact {
    pub id: i64,
    pub archetype: String,
    pub description: String,
    /// Free text from the model, usually `Positive`, `Negative` or `Neutral`.
    pub sentiment: String,
}

impl BillImpact {
    #[must_use]
    pub fn sentiment(&self) -> Sentiment {
        Sentiment::classify(&self.sentiment)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Case-insensitive exact match on the label; anything else, including
    /// labels with surrounding whitespace, is neutral.
    #[must_use]
    pub fn classify(label: &str) -> Self {
        if label.eq_ignore_ascii_case("positive") {
            Self::Positive
        } else if label.eq_ignore_ascii_case("negative") {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        };
        f.write_str(label)
    }
}

/// Acknowledgement from `POST /bills/{id}/analyze`. The analysis itself runs
/// as a background job; impacts show up on a later `GET /bills/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisAccepted {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_boundaries() {
        let cases = [
            ("Positive", Sentiment::Positive),
            ("POSITIVE", Sentiment::Positive),
            ("positive ", Sentiment::Neutral),
            (" negative", Sentiment::Neutral),
            ("negative", Sentiment::Negative),
            ("Negative", Sentiment::Negative),
            ("Neutral", Sentiment::Neutral),
            ("mixed", Sentiment::Neutral),
            ("", Sentiment::Neutral),
        ];

        for (label, expected) in cases {
            assert_eq!(Sentiment::classify(label), expected, "label '{label}'");
        }
    }

    #[test]
    fn bill_without_impacts_is_not_analyzed() {
        let bill: Bill = serde_json::from_value(serde_json::json!({
            "id": 4,
            "title": "Finance Bill 2025",
            "summary": null,
            "impacts": []
        }))
        .unwrap();

        assert!(!bill.is_analyzed());
        assert!(bill.document_url.is_none());
    }
}
