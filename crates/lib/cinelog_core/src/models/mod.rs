//! Domain models.
//!
//! These mirror the backend's JSON wire shapes (camelCase field names),
//! distinct from any state the client derives from them.

pub mod auth;
pub mod movie;
pub mod review;

pub use auth::{Role, Session, User};
pub use movie::{Movie, MovieDraft};
pub use review::{Review, ReviewDraft};
