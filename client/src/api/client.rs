//! HTTP client for the ParliaScope backend.
//!
//! # Example
//!
//! ```ignore
//! use parliascope_client::api::{HttpParliaScopeClient, ParliaScopeApi};
//!
//! let client = HttpParliaScopeClient::new("http://localhost:8000");
//! let bills = client.list_bills(None).await?;
//! println!("{} bills tracked", bills.len());
//! ```

use async_trait::async_trait;
use ps_types::{
    AnalysisAccepted, Bill, ChatAnswer, ChatRequest, CrawlReport, DailyBrief, Document, ErrorBody,
    LocationItem, LoginRequest, ProfileUpdate, Representative, ReverseGeocode, Review,
    ReviewCreate, SearchHistoryItem, SearchResult, SignupRequest, Subscription,
    SubscriptionCreate, TokenResponse, User,
};
use reqwest::{Method, Response};
use serde::{de::DeserializeOwned, Serialize};
use urlencoding::encode;

use super::error::ApiError;

/// Request body encoding.
#[derive(Debug, Clone, Copy)]
pub enum Body<B> {
    /// `application/json`
    Json(B),
    /// `application/x-www-form-urlencoded`, used only by the OAuth2 login form.
    Form(B),
}

/// Placeholder for requests without a body.
pub const NO_BODY: Option<Body<()>> = None;

/// Operations exposed by the ParliaScope backend.
///
/// Use `HttpParliaScopeClient` for real HTTP calls, or
/// `mock::MockParliaScopeClient` in tests.
#[async_trait]
pub trait ParliaScopeApi: Send + Sync {
    /// Create an account; the backend signs the new user in immediately.
    async fn signup(&self, request: &SignupRequest) -> Result<TokenResponse, ApiError>;

    /// Exchange email and password for a bearer token.
    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ApiError>;

    /// The user the token belongs to. Answers 401 for expired or bad tokens.
    async fn me(&self, token: &str) -> Result<User, ApiError>;

    async fn update_profile(&self, token: &str, update: &ProfileUpdate)
        -> Result<User, ApiError>;

    async fn counties(&self) -> Result<Vec<LocationItem>, ApiError>;

    async fn constituencies(&self, county_id: i64) -> Result<Vec<LocationItem>, ApiError>;

    /// Resolve coordinates to a county and constituency.
    async fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<ReverseGeocode, ApiError>;

    async fn list_bills(&self, token: Option<&str>) -> Result<Vec<Bill>, ApiError>;

    async fn get_bill(&self, bill_id: i64) -> Result<Bill, ApiError>;

    /// Queue a background impact analysis of `raw_text` for a bill.
    async fn analyze_bill(
        &self,
        token: Option<&str>,
        bill_id: i64,
        raw_text: &str,
    ) -> Result<AnalysisAccepted, ApiError>;

    async fn list_representatives(
        &self,
        county_id: Option<i64>,
        constituency_id: Option<i64>,
    ) -> Result<Vec<Representative>, ApiError>;

    async fn get_representative(&self, id: i64) -> Result<Representative, ApiError>;

    async fn create_review(
        &self,
        token: &str,
        representative_id: i64,
        review: &ReviewCreate,
    ) -> Result<Review, ApiError>;

    /// Server-side hybrid search over transcript segments.
    async fn search(
        &self,
        query: &str,
        speaker_id: Option<i64>,
    ) -> Result<Vec<SearchResult>, ApiError>;

    async fn search_history(&self) -> Result<Vec<SearchHistoryItem>, ApiError>;

    async fn list_documents(&self) -> Result<Vec<Document>, ApiError>;

    /// Ask the Hansard assistant a question.
    async fn chat(&self, query: &str) -> Result<ChatAnswer, ApiError>;

    async fn list_subscriptions(&self, token: &str) -> Result<Vec<Subscription>, ApiError>;

    async fn create_subscription(
        &self,
        token: &str,
        subscription: &SubscriptionCreate,
    ) -> Result<Subscription, ApiError>;

    async fn delete_subscription(&self, token: &str, id: i64) -> Result<(), ApiError>;

    /// Today's audio brief in `lang` (`en` or `sw`).
    async fn daily_brief(&self, lang: &str) -> Result<DailyBrief, ApiError>;

    /// Ask the backend to crawl and ingest the latest Hansard PDFs.
    async fn crawl(&self, limit: u32, ai_parsing: bool) -> Result<CrawlReport, ApiError>;
}

/// HTTP-based implementation of `ParliaScopeApi`.
#[derive(Clone)]
pub struct HttpParliaScopeClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpParliaScopeClient {
    /// Create a new client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client with a custom `reqwest::Client` (for testing with custom config).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a request and decode the JSON response.
    ///
    /// `path` starts with `/` and may carry an already-encoded query string.
    ///
    /// # Errors
    /// `ApiError::Http` for non-2xx responses, with the body's `detail` when
    /// present; `ApiError::Network` when no response arrives or the body
    /// cannot be decoded as `T`.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Body<B>>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let response = self.send(method, path, token, body).await?;
        Ok(response.json::<T>().await?)
    }

    /// Like [`Self::request`] for endpoints that answer without a body.
    ///
    /// # Errors
    /// Same as [`Self::request`].
    pub async fn request_empty<B>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Body<B>>,
    ) -> Result<(), ApiError>
    where
        B: Serialize,
    {
        self.send(method, path, token, body).await?;
        Ok(())
    }

    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Body<B>>,
    ) -> Result<Response, ApiError>
    where
        B: Serialize,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, path, authenticated = token.is_some(), "sending request");

        let mut request = self.client.request(method.clone(), &url);

        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        request = match body {
            Some(Body::Json(body)) => request.json(&body),
            Some(Body::Form(body)) => request.form(&body),
            None => request,
        };

        let response = request.send().await.map_err(|err| {
            tracing::debug!(%method, path, error = %err, "request failed without a response");
            ApiError::from(err)
        })?;

        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let detail = ErrorBody::detail_from_body(&text);
            tracing::debug!(%method, path, status = status.as_u16(), ?detail, "request rejected");
            return Err(ApiError::Http {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl ParliaScopeApi for HttpParliaScopeClient {
    async fn signup(&self, request: &SignupRequest) -> Result<TokenResponse, ApiError> {
        self.request(Method::POST, "/auth/signup", None, Some(Body::Json(request)))
            .await
    }

    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ApiError> {
        self.request(Method::POST, "/auth/login", None, Some(Body::Form(request)))
            .await
    }

    async fn me(&self, token: &str) -> Result<User, ApiError> {
        self.request(Method::GET, "/auth/me", Some(token), NO_BODY)
            .await
    }

    async fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> Result<User, ApiError> {
        self.request(
            Method::PATCH,
            "/auth/profile",
            Some(token),
            Some(Body::Json(update)),
        )
        .await
    }

    async fn counties(&self) -> Result<Vec<LocationItem>, ApiError> {
        self.request(Method::GET, "/location/counties", None, NO_BODY)
            .await
    }

    async fn constituencies(&self, county_id: i64) -> Result<Vec<LocationItem>, ApiError> {
        let path = format!("/location/constituencies?county_id={county_id}");
        self.request(Method::GET, &path, None, NO_BODY).await
    }

    async fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<ReverseGeocode, ApiError> {
        let path = format!("/location/reverse?lat={lat}&lng={lng}");
        self.request(Method::GET, &path, None, NO_BODY).await
    }

    async fn list_bills(&self, token: Option<&str>) -> Result<Vec<Bill>, ApiError> {
        self.request(Method::GET, "/bills/", token, NO_BODY).await
    }

    async fn get_bill(&self, bill_id: i64) -> Result<Bill, ApiError> {
        let path = format!("/bills/{bill_id}");
        self.request(Method::GET, &path, None, NO_BODY).await
    }

    async fn analyze_bill(
        &self,
        token: Option<&str>,
        bill_id: i64,
        raw_text: &str,
    ) -> Result<AnalysisAccepted, ApiError> {
        let path = format!("/bills/{bill_id}/analyze?raw_text={}", encode(raw_text));
        self.request(Method::POST, &path, token, NO_BODY).await
    }

    async fn list_representatives(
        &self,
        county_id: Option<i64>,
        constituency_id: Option<i64>,
    ) -> Result<Vec<Representative>, ApiError> {
        let mut params = Vec::new();
        if let Some(id) = county_id {
            params.push(format!("county_id={id}"));
        }
        if let Some(id) = constituency_id {
            params.push(format!("constituency_id={id}"));
        }

        let mut path = "/representatives/".to_string();
        if !params.is_empty() {
            path = format!("{path}?{}", params.join("&"));
        }

        self.request(Method::GET, &path, None, NO_BODY).await
    }

    async fn get_representative(&self, id: i64) -> Result<Representative, ApiError> {
        let path = format!("/representatives/{id}");
        self.request(Method::GET, &path, None, NO_BODY).await
    }

    async fn create_review(
        &self,
        token: &str,
        representative_id: i64,
        review: &ReviewCreate,
    ) -> Result<Review, ApiError> {
        let path = format!("/representatives/{representative_id}/reviews");
        self.request(Method::POST, &path, Some(token), Some(Body::Json(review)))
            .await
    }

    async fn search(
        &self,
        query: &str,
        speaker_id: Option<i64>,
    ) -> Result<Vec<SearchResult>, ApiError> {
        let mut path = format!("/search/query?q={}", encode(query));
        if let Some(id) = speaker_id {
            path = format!("{path}&speaker_id={id}");
        }
        self.request(Method::GET, &path, None, NO_BODY).await
    }

    async fn search_history(&self) -> Result<Vec<SearchHistoryItem>, ApiError> {
        self.request(Method::GET, "/search/history", None, NO_BODY)
            .await
    }

    async fn list_documents(&self) -> Result<Vec<Document>, ApiError> {
        self.request(Method::GET, "/docs/", None, NO_BODY).await
    }

    async fn chat(&self, query: &str) -> Result<ChatAnswer, ApiError> {
        let body = ChatRequest {
            query: query.to_string(),
        };
        self.request(Method::POST, "/chat/hansard", None, Some(Body::Json(&body)))
            .await
    }

    async fn list_subscriptions(&self, token: &str) -> Result<Vec<Subscription>, ApiError> {
        self.request(Method::GET, "/subscriptions/", Some(token), NO_BODY)
            .await
    }

    async fn create_subscription(
        &self,
        token: &str,
        subscription: &SubscriptionCreate,
    ) -> Result<Subscription, ApiError> {
        self.request(
            Method::POST,
            "/subscriptions/",
            Some(token),
            Some(Body::Json(subscription)),
        )
        .await
    }

    async fn delete_subscription(&self, token: &str, id: i64) -> Result<(), ApiError> {
        let path = format!("/subscriptions/{id}");
        self.request_empty(Method::DELETE, &path, Some(token), NO_BODY)
            .await
    }

    async fn daily_brief(&self, lang: &str) -> Result<DailyBrief, ApiError> {
        let path = format!("/audio/daily-brief?lang={}", encode(lang));
        self.request(Method::GET, &path, None, NO_BODY).await
    }

    async fn crawl(&self, limit: u32, ai_parsing: bool) -> Result<CrawlReport, ApiError> {
        let path = format!("/ingest/crawl?limit={limit}&ai_parsing={ai_parsing}");
        self.request(Method::POST, &path, None, NO_BODY).await
    }
}
