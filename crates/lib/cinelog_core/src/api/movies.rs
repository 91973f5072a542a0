//! Movie endpoints.
//!
//! Reads are anonymous; mutations require a bearer token from an ADMIN
//! session (role enforcement lives in `workflow::admin` ahead of dispatch,
//! and on the server behind it).

use super::{ApiClient, ApiError};
use crate::models::movie::{Movie, MovieDraft};

/// `GET /movies` — the full catalog.
pub async fn list(client: &ApiClient) -> Result<Vec<Movie>, ApiError> {
    client.get("/movies", None).await
}

/// `GET /movies/{id}` — one movie, including its server-computed rating.
pub async fn get(client: &ApiClient, id: i64) -> Result<Movie, ApiError> {
    client.get(&format!("/movies/{id}"), None).await
}

/// `POST /movies`.
pub async fn create(
    client: &ApiClient,
    draft: &MovieDraft,
    token: &str,
) -> Result<Movie, ApiError> {
    client.post("/movies", draft, Some(token)).await
}

/// `PUT /movies/{id}`.
pub async fn update(
    client: &ApiClient,
    id: i64,
    draft: &MovieDraft,
    token: &str,
) -> Result<Movie, ApiError> {
    client.put(&format!("/movies/{id}"), draft, Some(token)).await
}

/// `DELETE /movies/{id}`.
pub async fn delete(client: &ApiClient, id: i64, token: &str) -> Result<(), ApiError> {
    client.delete(&format!("/movies/{id}"), Some(token)).await
}
