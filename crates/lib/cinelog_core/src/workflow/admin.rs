//! Admin movie CRUD workflow — role gating and form lifecycle.
//!
//! Every mutating operation re-validates identity and role immediately
//! before dispatch, even though the UI that reaches it is already gated:
//! stale UI state must not be able to issue an unauthorized request.

use thiserror::Error;

use crate::models::auth::Session;
use crate::models::movie::{Movie, MovieDraft};

/// Maximum poster URL length accepted by the backend's column.
pub const MAX_POSTER_URL_LEN: usize = 255;

/// Admin workflow errors. All of these fail locally, before any network call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AdminError {
    #[error("Please log in first")]
    NotAuthenticated,

    #[error("Admin access required")]
    NotAdmin,

    #[error(
        "Poster URL is too long ({len} characters). Maximum allowed is {MAX_POSTER_URL_LEN} \
         characters. Tip: use a direct image URL instead of a redirect URL — right-click the \
         image and copy the image address."
    )]
    PosterUrlTooLong { len: usize },

    #[error("{0}")]
    Invalid(String),
}

/// Require an authenticated ADMIN session.
pub fn ensure_admin(session: Option<&Session>) -> Result<(), AdminError> {
    let session = session.ok_or(AdminError::NotAuthenticated)?;
    if !session.user.is_admin() {
        return Err(AdminError::NotAdmin);
    }
    Ok(())
}

/// Reject over-long poster URLs before dispatch. A 255-character URL is the
/// longest accepted value.
pub fn validate_poster_url(url: &str) -> Result<(), AdminError> {
    if url.len() > MAX_POSTER_URL_LEN {
        return Err(AdminError::PosterUrlTooLong { len: url.len() });
    }
    Ok(())
}

/// The admin panel's movie form: entered fields plus the id being edited
/// (`None` while creating).
#[derive(Debug, Default)]
pub struct MovieForm {
    pub draft: MovieDraft,
    editing: Option<i64>,
    open: bool,
    last_error: Option<String>,
}

impl MovieForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn editing(&self) -> Option<i64> {
        self.editing
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Open an empty form for a new movie.
    pub fn open_create(&mut self) {
        self.draft = MovieDraft::default();
        self.editing = None;
        self.open = true;
        self.last_error = None;
    }

    /// Open the form pre-filled from an existing movie.
    pub fn open_edit(&mut self, movie: &Movie) {
        self.draft = MovieDraft {
            title: movie.title.clone(),
            director: movie.director.clone(),
            genre: movie.genre.clone(),
            release_date: Some(movie.release_date),
            duration: movie.duration,
            description: movie.description.clone(),
            poster_url: movie.poster_url.clone(),
        };
        self.editing = Some(movie.id);
        self.open = true;
        self.last_error = None;
    }

    /// Clear entered values and close the form (the success path).
    pub fn reset(&mut self) {
        self.draft = MovieDraft::default();
        self.editing = None;
        self.open = false;
        self.last_error = None;
    }

    /// Validate role and fields and hand back the draft to dispatch.
    /// Failures leave the form open with its values intact.
    pub fn prepare(&self, session: Option<&Session>) -> Result<MovieDraft, AdminError> {
        ensure_admin(session)?;
        if let Some(url) = &self.draft.poster_url {
            validate_poster_url(url)?;
        }
        if self.draft.title.trim().is_empty() {
            return Err(AdminError::Invalid("Title is required".into()));
        }
        Ok(self.draft.clone())
    }

    /// Resolve a dispatched mutation: success resets and closes the form,
    /// failure surfaces the raw server error and keeps the entered values.
    pub fn complete(&mut self, result: Result<(), String>) {
        match result {
            Ok(()) => self.reset(),
            Err(error) => self.last_error = Some(error),
        }
    }
}
