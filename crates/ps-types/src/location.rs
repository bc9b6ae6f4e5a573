//! Administrative geography: counties and constituencies.

use serde::{Deserialize, Serialize};

/// A county or constituency as listed by `/location/*`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocationItem {
    pub id: i64,
    pub name: String,
}

/// Result of `GET /location/reverse`.
///
/// The backend answers 200 even when the geocoder is unavailable; in that
/// case both locations are absent and `detail` or `error` says why.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReverseGeocode {
    #[serde(default)]
    pub county: Option<LocationItem>,
    #[serde(default)]
    pub constituency: Option<LocationItem>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ReverseGeocode {
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.county.is_some()
    }
}
