use thiserror::Error;

/// Shown when the request never produced a usable response.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

/// Shown for HTTP failures whose body carried no `detail`.
pub const GENERIC_FAILURE_MESSAGE: &str = "Request failed";

/// The two ways a backend call can fail.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("API error: {status} - {}", .detail.as_deref().unwrap_or(GENERIC_FAILURE_MESSAGE))]
    Http { status: u16, detail: Option<String> },

    /// No response, or a 2xx body that could not be decoded.
    #[error("Network error: {0}")]
    Network(String),
}

impl ApiError {
    /// Text suitable for showing to the user as-is.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Http { detail, .. } => detail
                .clone()
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
            Self::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
        }
    }

    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(_) => None,
        }
    }

    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_prefers_detail() {
        let err = ApiError::Http {
            status: 400,
            detail: Some("Email already registered".into()),
        };
        assert_eq!(err.user_message(), "Email already registered");
        assert_eq!(err.to_string(), "API error: 400 - Email already registered");
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn http_error_without_detail_is_generic() {
        let err = ApiError::Http {
            status: 500,
            detail: None,
        };
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn network_error_has_fixed_message() {
        let err = ApiError::Network("connection refused".into());
        assert_eq!(err.user_message(), NETWORK_ERROR_MESSAGE);
        assert!(err.status().is_none());
    }

    #[test]
    fn only_401_is_unauthorized() {
        let unauthorized = ApiError::Http {
            status: 401,
            detail: Some("Invalid token".into()),
        };
        let forbidden = ApiError::Http {
            status: 403,
            detail: None,
        };
        assert!(unauthorized.is_unauthorized());
        assert!(!forbidden.is_unauthorized());
    }
}
