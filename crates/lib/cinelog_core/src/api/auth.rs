//! Auth endpoints — login and registration, plus the user-facing message
//! taxonomy for their failure modes.

use tracing::info;

use super::{ApiClient, ApiError};
use crate::models::auth::{AuthResponse, LoginRequest, RegisterRequest, Session};

/// `POST /auth/login` — authenticate and build a session from the response.
pub async fn login(
    client: &ApiClient,
    username: &str,
    password: &str,
) -> Result<Session, ApiError> {
    let body = LoginRequest { username, password };
    let response: AuthResponse = client.post("/auth/login", &body, None).await?;
    let session = Session::try_from(response).map_err(|e| ApiError::Decode(e.to_string()))?;
    info!(username, "logged in");
    Ok(session)
}

/// `POST /auth/register` — create an account. Does not authenticate; the
/// caller logs in separately afterwards.
pub async fn register(
    client: &ApiClient,
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), ApiError> {
    let body = RegisterRequest {
        username,
        email,
        password,
    };
    client.post_unit("/auth/register", &body, None).await?;
    info!(username, "registered");
    Ok(())
}

/// Map a login failure onto its user-facing message.
pub fn login_failure_message(error: &ApiError) -> String {
    match error {
        ApiError::Unauthorized(_) => {
            "Invalid username or password. Please check your credentials.".to_string()
        }
        ApiError::Forbidden(_) => {
            "Access forbidden: the backend security configuration is blocking the request."
                .to_string()
        }
        ApiError::NotFound(_) => {
            "Login endpoint not found. Check that the backend exposes /auth/login.".to_string()
        }
        ApiError::Server { message, .. } => format!("Server error: {message}"),
        ApiError::Network(_) => {
            "Cannot connect to the backend. Make sure it is running and reachable.".to_string()
        }
        other => other.to_string(),
    }
}

/// Map a registration failure onto its user-facing message.
pub fn register_failure_message(error: &ApiError) -> String {
    match error {
        ApiError::Conflict(_) => {
            "Username or email already exists. Please use different credentials.".to_string()
        }
        ApiError::Validation(message) => {
            if message == "<no body>" {
                "Invalid registration data. Please check all fields.".to_string()
            } else {
                message.clone()
            }
        }
        ApiError::Forbidden(_) => {
            "Access forbidden: the backend security configuration is blocking the request."
                .to_string()
        }
        ApiError::NotFound(_) => {
            "Registration endpoint not found. Check that the backend exposes /auth/register."
                .to_string()
        }
        ApiError::Network(_) => {
            "Cannot connect to the backend. Make sure it is running and reachable.".to_string()
        }
        ApiError::Server { message, .. } => format!("Server error: {message}"),
        other => other.to_string(),
    }
}
