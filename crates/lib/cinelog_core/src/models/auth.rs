//! Authentication domain models.

use serde::{Deserialize, Serialize};

/// User role as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "USER")]
    User,
    #[serde(rename = "ADMIN")]
    Admin,
}

/// Authenticated identity (no credential material).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Login response body: user fields plus the bearer token.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub id: i64,
    pub username: String,
    pub role: Role,
    pub token: Option<String>,
}

/// One serialized session record: identity plus bearer credential.
///
/// Persisted as a single unit rather than split across separate user/token
/// entries with ad hoc field stripping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub token: String,
}

impl TryFrom<AuthResponse> for Session {
    type Error = &'static str;

    fn try_from(resp: AuthResponse) -> Result<Self, Self::Error> {
        let token = resp.token.ok_or("login response did not include a token")?;
        Ok(Session {
            user: User {
                id: resp.id,
                username: resp.username,
                role: resp.role,
            },
            token,
        })
    }
}

/// Login request body.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Registration request body.
#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}
