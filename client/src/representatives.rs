//! Representative reviews.

use ps_types::{Representative, ReviewCreate};

use crate::api::{ApiError, ParliaScopeApi};

/// Post a review, then refetch the representative so the new review and
/// the recomputed average rating are visible.
///
/// # Errors
/// Failures of either request; a rejected review skips the refetch.
pub async fn submit_review<A>(
    api: &A,
    token: &str,
    representative_id: i64,
    rating: u8,
    comment: &str,
) -> Result<Representative, ApiError>
where
    A: ParliaScopeApi + ?Sized,
{
    let review = ReviewCreate {
        rating,
        comment: comment.trim().to_string(),
    };
    let created = api.create_review(token, representative_id, &review).await?;
    tracing::info!(representative_id, review_id = created.id, rating, "review posted");

    api.get_representative(representative_id).await
}
