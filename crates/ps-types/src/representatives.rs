//! Members of parliament and citizen reviews of them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_aux::field_attributes::deserialize_default_from_null;

/// A legislator profile from `/representatives/`.
///
/// Counters and the average rating are computed server-side; rows seeded
/// before those columns existed send `null`, which decodes as zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Representative {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub party: Option<String>,
    #[serde(default)]
    pub county_id: Option<i64>,
    #[serde(default)]
    pub constituency_id: Option<i64>,
    #[serde(default)]
    pub county_name: Option<String>,
    #[serde(default)]
    pub constituency_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub sittings_attended: u32,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub votes_cast: u32,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub bills_sponsored: u32,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub average_rating: f64,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub reviews: Vec<Review>,
}

/// A citizen's rating of a representative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Review {
    pub id: i64,
    /// 1 to 5, enforced by the backend.
    pub rating: u8,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub comment: String,
    /// The reviewer's full name at posting time; accounts without one post
    /// anonymously.
    #[serde(default = "anonymous", deserialize_with = "name_or_anonymous")]
    pub user_name: String,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
}

fn anonymous() -> String {
    "Anonymous Citizen".to_string()
}

fn name_or_anonymous<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(anonymous))
}

/// Body of `POST /representatives/{id}/reviews`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewCreate {
    pub rating: u8,
    pub comment: String,
}
