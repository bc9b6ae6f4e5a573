//! Mock implementation for unit testing.
//!
//! Responses are scripted per endpoint as JSON values and handed out in
//! FIFO order; every call is recorded with its token and arguments.

#![allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]

use async_trait::async_trait;
use ps_types::{
    AnalysisAccepted, Bill, ChatAnswer, CrawlReport, DailyBrief, Document, LocationItem,
    LoginRequest, ProfileUpdate, Representative, ReverseGeocode, Review, ReviewCreate,
    SearchHistoryItem, SearchResult, SignupRequest, Subscription, SubscriptionCreate,
    TokenResponse, User,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use super::{ApiError, ParliaScopeApi};

/// A recorded call against the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall {
    /// Trait method name, e.g. `"me"` or `"list_bills"`.
    pub endpoint: &'static str,
    pub token: Option<String>,
    pub args: Value,
}

/// Mock implementation of `ParliaScopeApi` for unit tests.
///
/// Script responses with `push_json` / `push_error` using the trait method
/// name as the endpoint key, and verify with `calls()` / `call_count()`.
/// Endpoints without a scripted response answer HTTP 404.
#[derive(Default)]
pub struct MockParliaScopeClient {
    results: Mutex<HashMap<&'static str, VecDeque<Result<Value, ApiError>>>>,
    calls: Mutex<Vec<MockCall>>,
}

impl MockParliaScopeClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful JSON response for `endpoint`.
    pub fn push_json(&self, endpoint: &'static str, body: Value) {
        self.push_result(endpoint, Ok(body));
    }

    /// Queue a failure for `endpoint`.
    pub fn push_error(&self, endpoint: &'static str, error: ApiError) {
        self.push_result(endpoint, Err(error));
    }

    pub fn push_result(&self, endpoint: &'static str, result: Result<Value, ApiError>) {
        self.results
            .lock()
            .unwrap()
            .entry(endpoint)
            .or_default()
            .push_back(result);
    }

    /// All calls in the order they were made.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls made to `endpoint`.
    pub fn call_count(&self, endpoint: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.endpoint == endpoint)
            .count()
    }

    fn respond<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        token: Option<&str>,
        args: Value,
    ) -> Result<T, ApiError> {
        self.calls.lock().unwrap().push(MockCall {
            endpoint,
            token: token.map(String::from),
            args,
        });

        let next = self
            .results
            .lock()
            .unwrap()
            .get_mut(endpoint)
            .and_then(VecDeque::pop_front);

        match next {
            Some(Ok(body)) => {
                serde_json::from_value(body).map_err(|err| ApiError::Network(err.to_string()))
            }
            Some(Err(err)) => Err(err),
            None => Err(ApiError::Http {
                status: 404,
                detail: Some(format!("no scripted response for {endpoint}")),
            }),
        }
    }
}

#[async_trait]
impl ParliaScopeApi for MockParliaScopeClient {
    async fn signup(&self, request: &SignupRequest) -> Result<TokenResponse, ApiError> {
        self.respond("signup", None, serde_json::to_value(request).unwrap())
    }

    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ApiError> {
        self.respond("login", None, json!({"username": request.username}))
    }

    async fn me(&self, token: &str) -> Result<User, ApiError> {
        self.respond("me", Some(token), Value::Null)
    }

    async fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> Result<User, ApiError> {
        self.respond(
            "update_profile",
            Some(token),
            serde_json::to_value(update).unwrap(),
        )
    }

    async fn counties(&self) -> Result<Vec<LocationItem>, ApiError> {
        self.respond("counties", None, Value::Null)
    }

    async fn constituencies(&self, county_id: i64) -> Result<Vec<LocationItem>, ApiError> {
        self.respond("constituencies", None, json!({"county_id": county_id}))
    }

    async fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<ReverseGeocode, ApiError> {
        self.respond("reverse_geocode", None, json!({"lat": lat, "lng": lng}))
    }

    async fn list_bills(&self, token: Option<&str>) -> Result<Vec<Bill>, ApiError> {
        self.respond("list_bills", token, Value::Null)
    }

    async fn get_bill(&self, bill_id: i64) -> Result<Bill, ApiError> {
        self.respond("get_bill", None, json!({"bill_id": bill_id}))
    }

    async fn analyze_bill(
        &self,
        token: Option<&str>,
        bill_id: i64,
        raw_text: &str,
    ) -> Result<AnalysisAccepted, ApiError> {
        self.respond(
            "analyze_bill",
            token,
            json!({"bill_id": bill_id, "raw_text": raw_text}),
        )
    }

    async fn list_representatives(
        &self,
        county_id: Option<i64>,
        constituency_id: Option<i64>,
    ) -> Result<Vec<Representative>, ApiError> {
        self.respond(
            "list_representatives",
            None,
            json!({"county_id": county_id, "constituency_id": constituency_id}),
        )
    }

    async fn get_representative(&self, id: i64) -> Result<Representative, ApiError> {
        self.respond("get_representative", None, json!({"id": id}))
    }

    async fn create_review(
        &self,
        token: &str,
        representative_id: i64,
        review: &ReviewCreate,
    ) -> Result<Review, ApiError> {
        self.respond(
            "create_review",
            Some(token),
            json!({
                "representative_id": representative_id,
                "rating": review.rating,
                "comment": review.comment,
            }),
        )
    }

    async fn search(
        &self,
        query: &str,
        speaker_id: Option<i64>,
    ) -> Result<Vec<SearchResult>, ApiError> {
        self.respond(
            "search",
            None,
            json!({"query": query, "speaker_id": speaker_id}),
        )
    }

    async fn search_history(&self) -> Result<Vec<SearchHistoryItem>, ApiError> {
        self.respond("search_history", None, Value::Null)
    }

    async fn list_documents(&self) -> Result<Vec<Document>, ApiError> {
        self.respond("list_documents", None, Value::Null)
    }

    async fn chat(&self, query: &str) -> Result<ChatAnswer, ApiError> {
        self.respond("chat", None, json!({"query": query}))
    }

    async fn list_subscriptions(&self, token: &str) -> Result<Vec<Subscription>, ApiError> {
        self.respond("list_subscriptions", Some(token), Value::Null)
    }

    async fn create_subscription(
        &self,
        token: &str,
        subscription: &SubscriptionCreate,
    ) -> Result<Subscription, ApiError> {
        self.respond(
            "create_subscription",
            Some(token),
            json!({"topic": subscription.topic}),
        )
    }

    async fn delete_subscription(&self, token: &str, id: i64) -> Result<(), ApiError> {
        self.respond("delete_subscription", Some(token), json!({"id": id}))
    }

    async fn daily_brief(&self, lang: &str) -> Result<DailyBrief, ApiError> {
        self.respond("daily_brief", None, json!({"lang": lang}))
    }

    async fn crawl(&self, limit: u32, ai_parsing: bool) -> Result<CrawlReport, ApiError> {
        self.respond(
            "crawl",
            None,
            json!({"limit": limit, "ai_parsing": ai_parsing}),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_responses_are_fifo() {
        let mock = MockParliaScopeClient::new();
        mock.push_json("counties", json!([{"id": 1, "name": "Mombasa"}]));
        mock.push_json("counties", json!([{"id": 47, "name": "Nairobi"}]));

        assert_eq!(mock.counties().await.unwrap()[0].name, "Mombasa");
        assert_eq!(mock.counties().await.unwrap()[0].name, "Nairobi");
        assert_eq!(mock.call_count("counties"), 2);
    }

    #[tokio::test]
    async fn unscripted_endpoint_answers_404() {
        let mock = MockParliaScopeClient::new();
        let err = mock.get_bill(3).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(mock.calls()[0].args, json!({"bill_id": 3}));
    }

    #[tokio::test]
    async fn delete_accepts_null_body() {
        let mock = MockParliaScopeClient::new();
        mock.push_json("delete_subscription", Value::Null);
        assert!(mock.delete_subscription("tok", 5).await.is_ok());
        assert_eq!(mock.calls()[0].token.as_deref(), Some("tok"));
    }
}
