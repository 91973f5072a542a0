//! Review endpoints.

use super::{ApiClient, ApiError};
use crate::models::review::{Review, ReviewDraft};

/// `GET /reviews/movie/{movieId}` — all reviews for one movie.
pub async fn for_movie(client: &ApiClient, movie_id: i64) -> Result<Vec<Review>, ApiError> {
    client.get(&format!("/reviews/movie/{movie_id}"), None).await
}

/// `GET /reviews/user/{userId}` — all reviews written by one user.
pub async fn for_user(
    client: &ApiClient,
    user_id: i64,
    token: &str,
) -> Result<Vec<Review>, ApiError> {
    client
        .get(&format!("/reviews/user/{user_id}"), Some(token))
        .await
}

/// `POST /reviews/movie/{movieId}` — create the caller's review.
pub async fn create(
    client: &ApiClient,
    movie_id: i64,
    draft: &ReviewDraft,
    token: &str,
) -> Result<Review, ApiError> {
    client
        .post(&format!("/reviews/movie/{movie_id}"), draft, Some(token))
        .await
}

/// `PUT /reviews/{id}` — update the caller's own review.
pub async fn update(
    client: &ApiClient,
    id: i64,
    draft: &ReviewDraft,
    token: &str,
) -> Result<Review, ApiError> {
    client.put(&format!("/reviews/{id}"), draft, Some(token)).await
}

/// `DELETE /reviews/{id}` — delete the caller's own review.
pub async fn delete(client: &ApiClient, id: i64, token: &str) -> Result<(), ApiError> {
    client.delete(&format!("/reviews/{id}"), Some(token)).await
}
