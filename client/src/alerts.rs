//! Alert topic subscriptions.

use ps_types::{Subscription, SubscriptionCreate};

use crate::api::{ApiError, ParliaScopeApi};

/// Subscribe to `topic` and return the refreshed subscription list.
/// Blank topics are not sent and yield `Ok(None)`.
///
/// # Errors
/// Failures of either request.
pub async fn add_topic<A>(
    api: &A,
    token: &str,
    topic: &str,
) -> Result<Option<Vec<Subscription>>, ApiError>
where
    A: ParliaScopeApi + ?Sized,
{
    let topic = topic.trim();
    if topic.is_empty() {
        return Ok(None);
    }

    let created = api
        .create_subscription(
            token,
            &SubscriptionCreate {
                topic: topic.to_string(),
            },
        )
        .await?;
    tracing::info!(subscription_id = created.id, topic, "subscribed");

    api.list_subscriptions(token).await.map(Some)
}

/// Unsubscribe and return the refreshed subscription list.
///
/// # Errors
/// Failures of either request.
pub async fn remove_subscription<A>(
    api: &A,
    token: &str,
    id: i64,
) -> Result<Vec<Subscription>, ApiError>
where
    A: ParliaScopeApi + ?Sized,
{
    api.delete_subscription(token, id).await?;
    tracing::info!(subscription_id = id, "unsubscribed");
    api.list_subscriptions(token).await
}

/// Subscriptions that carry a topic; MP-only subscriptions are skipped.
#[must_use]
pub fn topics(subscriptions: &[Subscription]) -> Vec<&Subscription> {
    subscriptions
        .iter()
        .filter(|sub| sub.topic.as_deref().is_some_and(|t| !t.is_empty()))
        .collect()
}
