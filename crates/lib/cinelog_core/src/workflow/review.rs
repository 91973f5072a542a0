//! Review form state machine — create, edit, and delete lifecycle for a
//! single movie's review form.
//!
//! At most one form (compose or edit) is open at a time per movie view; the
//! state enum itself enforces that. Guards reject unauthenticated attempts
//! without any state transition, and a failed submit returns to the form
//! state with the entered fields retained.

use thiserror::Error;

use crate::models::auth::Session;
use crate::models::review::{Review, ReviewDraft};

/// Guard and transition errors for the review form.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReviewFormError {
    #[error("Please log in to submit a review")]
    NotAuthenticated,

    #[error("You have already reviewed this movie")]
    AlreadyReviewed,

    #[error("There is no review to {0}")]
    NoExistingReview(&'static str),

    #[error("Only the author can modify this review")]
    NotAuthor,

    #[error("{0}")]
    Invalid(String),

    #[error("Deletion requires explicit confirmation")]
    NotConfirmed,

    #[error("Operation not allowed in the current form state")]
    BadTransition,
}

/// Form lifecycle states.
#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    /// No form shown.
    Viewing,
    /// New review being written (no prior review exists).
    Composing { draft: ReviewDraft },
    /// Create request in flight.
    Submitting { draft: ReviewDraft },
    /// Existing review being edited; `snapshot` holds the pre-edit values.
    Editing {
        draft: ReviewDraft,
        snapshot: ReviewDraft,
    },
    /// Update request in flight.
    Saving {
        draft: ReviewDraft,
        snapshot: ReviewDraft,
    },
    /// Delete request in flight.
    Deleting,
}

/// The review form for one movie, tracking the user's existing review (if
/// any) and the current form state.
#[derive(Debug)]
pub struct ReviewForm {
    movie_id: i64,
    existing: Option<Review>,
    state: FormState,
    last_error: Option<String>,
}

impl ReviewForm {
    pub fn new(movie_id: i64, existing: Option<Review>) -> Self {
        Self {
            movie_id,
            existing,
            state: FormState::Viewing,
            last_error: None,
        }
    }

    pub fn movie_id(&self) -> i64 {
        self.movie_id
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn existing(&self) -> Option<&Review> {
        self.existing.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The rating/comment currently shown: the open form's fields, else the
    /// stored review's values.
    pub fn displayed(&self) -> Option<(u8, &str)> {
        match &self.state {
            FormState::Composing { draft }
            | FormState::Submitting { draft }
            | FormState::Editing { draft, .. }
            | FormState::Saving { draft, .. } => Some((draft.rating, draft.comment.as_str())),
            FormState::Viewing | FormState::Deleting => self
                .existing
                .as_ref()
                .map(|r| (r.rating, r.comment.as_str())),
        }
    }

    fn require_author(&self, session: Option<&Session>) -> Result<i64, ReviewFormError> {
        let session = session.ok_or(ReviewFormError::NotAuthenticated)?;
        let review = self
            .existing
            .as_ref()
            .ok_or(ReviewFormError::NoExistingReview("modify"))?;
        if review.user_id != session.user.id {
            return Err(ReviewFormError::NotAuthor);
        }
        Ok(review.id)
    }

    /// `Viewing → Composing`. Requires an authenticated session and no prior
    /// review; a rejected attempt leaves the state untouched.
    pub fn begin_compose(&mut self, session: Option<&Session>) -> Result<(), ReviewFormError> {
        if self.state != FormState::Viewing {
            return Err(ReviewFormError::BadTransition);
        }
        if session.is_none() {
            return Err(ReviewFormError::NotAuthenticated);
        }
        if self.existing.is_some() {
            return Err(ReviewFormError::AlreadyReviewed);
        }
        self.state = FormState::Composing {
            draft: ReviewDraft {
                rating: 0,
                comment: String::new(),
            },
        };
        self.last_error = None;
        Ok(())
    }

    /// `Viewing → Editing`, fields pre-filled from the existing review.
    pub fn begin_edit(&mut self, session: Option<&Session>) -> Result<(), ReviewFormError> {
        if self.state != FormState::Viewing {
            return Err(ReviewFormError::BadTransition);
        }
        self.require_author(session)?;
        let review = match &self.existing {
            Some(review) => review,
            None => return Err(ReviewFormError::NoExistingReview("edit")),
        };
        let draft = ReviewDraft {
            rating: review.rating,
            comment: review.comment.clone(),
        };
        self.state = FormState::Editing {
            snapshot: draft.clone(),
            draft,
        };
        self.last_error = None;
        Ok(())
    }

    pub fn set_rating(&mut self, rating: u8) -> Result<(), ReviewFormError> {
        match &mut self.state {
            FormState::Composing { draft } | FormState::Editing { draft, .. } => {
                draft.rating = rating;
                Ok(())
            }
            _ => Err(ReviewFormError::BadTransition),
        }
    }

    pub fn set_comment(&mut self, comment: &str) -> Result<(), ReviewFormError> {
        match &mut self.state {
            FormState::Composing { draft } | FormState::Editing { draft, .. } => {
                draft.comment = comment.to_string();
                Ok(())
            }
            _ => Err(ReviewFormError::BadTransition),
        }
    }

    /// Explicit cancel: `Composing → Viewing` discards the draft;
    /// `Editing → Viewing` reverts to the pre-edit snapshot (the stored
    /// review is untouched, so displayed values round-trip exactly).
    pub fn cancel(&mut self) -> Result<(), ReviewFormError> {
        match self.state {
            FormState::Composing { .. } | FormState::Editing { .. } => {
                self.state = FormState::Viewing;
                self.last_error = None;
                Ok(())
            }
            _ => Err(ReviewFormError::BadTransition),
        }
    }

    /// Validate and move into the in-flight state (`Composing → Submitting`
    /// or `Editing → Saving`). Returns the normalized draft to dispatch plus
    /// the review id when this is an update.
    pub fn submit(
        &mut self,
        session: Option<&Session>,
    ) -> Result<(ReviewDraft, Option<i64>), ReviewFormError> {
        if session.is_none() {
            return Err(ReviewFormError::NotAuthenticated);
        }
        match self.state.clone() {
            FormState::Composing { draft } => {
                draft.validate().map_err(ReviewFormError::Invalid)?;
                let normalized = draft.normalized();
                self.state = FormState::Submitting {
                    draft: normalized.clone(),
                };
                Ok((normalized, None))
            }
            FormState::Editing { draft, snapshot } => {
                draft.validate().map_err(ReviewFormError::Invalid)?;
                let review_id = self.require_author(session)?;
                let normalized = draft.normalized();
                self.state = FormState::Saving {
                    draft: normalized.clone(),
                    snapshot,
                };
                Ok((normalized, Some(review_id)))
            }
            _ => Err(ReviewFormError::BadTransition),
        }
    }

    /// Resolve an in-flight create/update. Success stores the server's review
    /// and closes the form; failure returns to the form state with fields
    /// retained and the error recorded.
    pub fn complete_submit(&mut self, result: Result<Review, String>) {
        let state = std::mem::replace(&mut self.state, FormState::Viewing);
        match (state, result) {
            (FormState::Submitting { .. } | FormState::Saving { .. }, Ok(review)) => {
                self.existing = Some(review);
                self.last_error = None;
            }
            (FormState::Submitting { draft }, Err(error)) => {
                self.state = FormState::Composing { draft };
                self.last_error = Some(error);
            }
            (FormState::Saving { draft, snapshot }, Err(error)) => {
                self.state = FormState::Editing { draft, snapshot };
                self.last_error = Some(error);
            }
            (state, _) => {
                // Late or duplicate completion; keep whatever state we were in.
                self.state = state;
            }
        }
    }

    /// `Viewing → Deleting`, gated by an explicit confirmation. Returns the
    /// id of the review to delete.
    pub fn request_delete(
        &mut self,
        session: Option<&Session>,
        confirmed: bool,
    ) -> Result<i64, ReviewFormError> {
        if self.state != FormState::Viewing {
            return Err(ReviewFormError::BadTransition);
        }
        let review_id = self.require_author(session)?;
        if !confirmed {
            return Err(ReviewFormError::NotConfirmed);
        }
        self.state = FormState::Deleting;
        self.last_error = None;
        Ok(review_id)
    }

    /// Resolve an in-flight delete: success removes the stored review,
    /// failure returns to `Viewing` with the error recorded. No undo.
    pub fn complete_delete(&mut self, result: Result<(), String>) {
        if self.state != FormState::Deleting {
            return;
        }
        self.state = FormState::Viewing;
        match result {
            Ok(()) => {
                self.existing = None;
                self.last_error = None;
            }
            Err(error) => {
                self.last_error = Some(error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::{Role, User};
    use chrono::{TimeZone, Utc};

    fn session(user_id: i64) -> Session {
        Session {
            user: User {
                id: user_id,
                username: "alice".into(),
                role: Role::User,
            },
            token: "tok".into(),
        }
    }

    fn existing_review(user_id: i64) -> Review {
        Review {
            id: 55,
            movie_id: 7,
            user_id,
            username: Some("alice".into()),
            rating: 4,
            comment: "solid".into(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
        }
    }

    fn server_review(rating: u8, comment: &str) -> Review {
        Review {
            id: 55,
            movie_id: 7,
            user_id: 1,
            username: Some("alice".into()),
            rating,
            comment: comment.into(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn unauthenticated_compose_attempt_does_not_transition() {
        let mut form = ReviewForm::new(7, None);
        let err = form.begin_compose(None).unwrap_err();
        assert_eq!(err, ReviewFormError::NotAuthenticated);
        assert_eq!(*form.state(), FormState::Viewing);
    }

    #[test]
    fn compose_is_blocked_once_a_review_exists() {
        let mut form = ReviewForm::new(7, Some(existing_review(1)));
        let err = form.begin_compose(Some(&session(1))).unwrap_err();
        assert_eq!(err, ReviewFormError::AlreadyReviewed);
    }

    #[test]
    fn successful_create_round_trip() {
        let mut form = ReviewForm::new(7, None);
        form.begin_compose(Some(&session(1))).unwrap();
        form.set_rating(5).unwrap();
        form.set_comment("  excellent  ").unwrap();

        let (draft, review_id) = form.submit(Some(&session(1))).unwrap();
        assert_eq!(draft.comment, "excellent");
        assert!(review_id.is_none());
        assert!(matches!(form.state(), FormState::Submitting { .. }));

        form.complete_submit(Ok(server_review(5, "excellent")));
        assert_eq!(*form.state(), FormState::Viewing);
        assert_eq!(form.existing().unwrap().rating, 5);
    }

    #[test]
    fn failed_create_returns_to_composing_with_fields_retained() {
        let mut form = ReviewForm::new(7, None);
        form.begin_compose(Some(&session(1))).unwrap();
        form.set_rating(3).unwrap();
        form.set_comment("decent").unwrap();
        form.submit(Some(&session(1))).unwrap();

        form.complete_submit(Err("server rejected it".into()));
        match form.state() {
            FormState::Composing { draft } => {
                assert_eq!(draft.rating, 3);
                assert_eq!(draft.comment, "decent");
            }
            other => panic!("expected Composing, got {other:?}"),
        }
        assert_eq!(form.last_error(), Some("server rejected it"));
    }

    #[test]
    fn submit_rejects_out_of_range_rating_before_dispatch() {
        let mut form = ReviewForm::new(7, None);
        form.begin_compose(Some(&session(1))).unwrap();
        form.set_comment("fine").unwrap();
        // Rating left at 0 (unselected).
        let err = form.submit(Some(&session(1))).unwrap_err();
        assert!(matches!(err, ReviewFormError::Invalid(_)));
        assert!(matches!(form.state(), FormState::Composing { .. }));
    }

    #[test]
    fn submit_rejects_empty_comment() {
        let mut form = ReviewForm::new(7, None);
        form.begin_compose(Some(&session(1))).unwrap();
        form.set_rating(4).unwrap();
        form.set_comment("   ").unwrap();
        assert!(form.submit(Some(&session(1))).is_err());
    }

    #[test]
    fn edit_prefills_from_the_existing_review() {
        let mut form = ReviewForm::new(7, Some(existing_review(1)));
        form.begin_edit(Some(&session(1))).unwrap();
        assert_eq!(form.displayed(), Some((4, "solid")));
    }

    #[test]
    fn only_the_author_can_edit() {
        let mut form = ReviewForm::new(7, Some(existing_review(1)));
        let err = form.begin_edit(Some(&session(2))).unwrap_err();
        assert_eq!(err, ReviewFormError::NotAuthor);
        assert_eq!(*form.state(), FormState::Viewing);
    }

    #[test]
    fn cancel_reverts_to_pre_edit_values_exactly() {
        let mut form = ReviewForm::new(7, Some(existing_review(1)));
        form.begin_edit(Some(&session(1))).unwrap();
        form.set_rating(1).unwrap();
        form.set_comment("changed my mind entirely").unwrap();

        form.cancel().unwrap();
        assert_eq!(*form.state(), FormState::Viewing);
        // Round trip through Editing -> cancel -> Viewing is a data no-op.
        assert_eq!(form.displayed(), Some((4, "solid")));
    }

    #[test]
    fn failed_save_stays_in_editing_with_error() {
        let mut form = ReviewForm::new(7, Some(existing_review(1)));
        form.begin_edit(Some(&session(1))).unwrap();
        form.set_rating(2).unwrap();
        let (_, review_id) = form.submit(Some(&session(1))).unwrap();
        assert_eq!(review_id, Some(55));

        form.complete_submit(Err("conflict".into()));
        assert!(matches!(form.state(), FormState::Editing { .. }));
        assert_eq!(form.last_error(), Some("conflict"));
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut form = ReviewForm::new(7, Some(existing_review(1)));
        let err = form.request_delete(Some(&session(1)), false).unwrap_err();
        assert_eq!(err, ReviewFormError::NotConfirmed);
        assert_eq!(*form.state(), FormState::Viewing);

        let id = form.request_delete(Some(&session(1)), true).unwrap();
        assert_eq!(id, 55);
        assert_eq!(*form.state(), FormState::Deleting);
    }

    #[test]
    fn successful_delete_removes_the_review() {
        let mut form = ReviewForm::new(7, Some(existing_review(1)));
        form.request_delete(Some(&session(1)), true).unwrap();
        form.complete_delete(Ok(()));
        assert!(form.existing().is_none());
        assert_eq!(*form.state(), FormState::Viewing);
    }

    #[test]
    fn failed_delete_keeps_the_review_and_reports() {
        let mut form = ReviewForm::new(7, Some(existing_review(1)));
        form.request_delete(Some(&session(1)), true).unwrap();
        form.complete_delete(Err("gone already?".into()));
        assert!(form.existing().is_some());
        assert_eq!(form.last_error(), Some("gone already?"));
    }

    #[test]
    fn only_one_form_can_be_open() {
        let mut form = ReviewForm::new(7, None);
        form.begin_compose(Some(&session(1))).unwrap();
        assert_eq!(
            form.begin_compose(Some(&session(1))).unwrap_err(),
            ReviewFormError::BadTransition
        );
    }
}
