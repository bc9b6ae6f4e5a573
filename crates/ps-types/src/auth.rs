//! Account and credential types.

use serde::{Deserialize, Deserializer, Serialize};

/// The signed-in citizen, as returned by `/auth/me` and `/auth/profile`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    /// National ID number. Older accounts stored it as an integer.
    #[serde(default, deserialize_with = "deserialize_id_number")]
    pub id_number: Option<String>,
    #[serde(default)]
    pub county_id: Option<i64>,
    #[serde(default)]
    pub constituency_id: Option<i64>,
    #[serde(default)]
    pub county_name: Option<String>,
    #[serde(default)]
    pub constituency_name: Option<String>,
    #[serde(default)]
    pub whatsapp_number: Option<String>,
    #[serde(default)]
    pub push_token: Option<String>,
}

impl User {
    /// Best human-readable label: full name, then email, then the numeric id.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.full_name
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| format!("user #{}", self.id))
    }
}

fn deserialize_id_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    }))
}

/// Body of `POST /auth/signup`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,
    pub county_id: i64,
    pub constituency_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// OAuth2 password-grant form for `POST /auth/login`.
///
/// The backend's form handler names the email field `username`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: email.into(),
            password: password.into(),
        }
    }
}

/// Bearer token issued by signup and login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Partial update for `PATCH /auth/profile`. Unset fields are left untouched
/// server-side, so they are omitted from the body entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constituency_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push_token: Option<String>,
}

impl ProfileUpdate {
    /// True when no field is set and the PATCH would be a no-op.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.id_number.is_none()
            && self.county_id.is_none()
            && self.constituency_id.is_none()
            && self.whatsapp_number.is_none()
            && self.push_token.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_accepts_numeric_id_number() {
        let user: User = serde_json::from_value(json!({
            "id": 7,
            "email": "wanjiku@example.com",
            "id_number": 12_345_678,
            "county_id": 47,
            "constituency_id": null
        }))
        .unwrap();

        assert_eq!(user.id_number.as_deref(), Some("12345678"));
        assert_eq!(user.county_id, Some(47));
        assert!(user.constituency_id.is_none());
        assert!(user.whatsapp_number.is_none());
    }

    #[test]
    fn user_display_name_falls_back() {
        let mut user: User = serde_json::from_value(json!({"id": 3})).unwrap();
        assert_eq!(user.display_name(), "user #3");

        user.email = Some("a@b.ke".into());
        assert_eq!(user.display_name(), "a@b.ke");

        user.full_name = Some("Achieng Otieno".into());
        assert_eq!(user.display_name(), "Achieng Otieno");
    }

    #[test]
    fn profile_update_omits_unset_fields() {
        let update = ProfileUpdate {
            whatsapp_number: Some("+254700000000".into()),
            ..ProfileUpdate::default()
        };

        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"whatsapp_number": "+254700000000"})
        );
        assert!(!update.is_empty());
        assert!(ProfileUpdate::default().is_empty());
    }

    #[test]
    fn token_type_defaults_to_bearer() {
        let token: TokenResponse = serde_json::from_value(json!({"access_token": "abc"})).unwrap();
        assert_eq!(token.token_type, "bearer");
    }
}
