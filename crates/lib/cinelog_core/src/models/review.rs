//! Review models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum review comment length accepted by the backend.
pub const MAX_COMMENT_LEN: usize = 1000;

/// Valid star rating range, inclusive.
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// A review record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub movie_id: i64,
    pub user_id: i64,
    /// Populated by the backend from `user_id`; absent on some endpoints.
    pub username: Option<String>,
    pub rating: u8,
    pub comment: String,
    #[serde(alias = "reviewDate")]
    pub created_at: DateTime<Utc>,
}

/// Review payload for create/update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewDraft {
    pub rating: u8,
    pub comment: String,
}

impl ReviewDraft {
    /// Validate the submit guard: rating in range, non-empty trimmed comment
    /// within the length limit. Returns a user-facing message on failure.
    pub fn validate(&self) -> Result<(), String> {
        if !RATING_RANGE.contains(&self.rating) {
            return Err(format!(
                "Rating must be between {} and {} stars",
                RATING_RANGE.start(),
                RATING_RANGE.end()
            ));
        }
        let trimmed = self.comment.trim();
        if trimmed.is_empty() {
            return Err("Comment must not be empty".to_string());
        }
        if trimmed.len() > MAX_COMMENT_LEN {
            return Err(format!(
                "Comment exceeds the {MAX_COMMENT_LEN} character limit"
            ));
        }
        Ok(())
    }

    /// Draft with the comment trimmed, as dispatched to the backend.
    pub fn normalized(&self) -> ReviewDraft {
        ReviewDraft {
            rating: self.rating,
            comment: self.comment.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(rating: u8, comment: &str) -> ReviewDraft {
        ReviewDraft {
            rating,
            comment: comment.to_string(),
        }
    }

    #[test]
    fn ratings_outside_one_to_five_are_rejected() {
        assert!(draft(0, "fine").validate().is_err());
        assert!(draft(6, "fine").validate().is_err());
        for rating in 1..=5 {
            assert!(draft(rating, "fine").validate().is_ok());
        }
    }

    #[test]
    fn whitespace_only_comment_is_rejected() {
        assert!(draft(4, "   \n\t").validate().is_err());
    }

    #[test]
    fn comment_at_limit_passes_over_limit_fails() {
        assert!(draft(3, &"x".repeat(MAX_COMMENT_LEN)).validate().is_ok());
        assert!(draft(3, &"x".repeat(MAX_COMMENT_LEN + 1)).validate().is_err());
    }

    #[test]
    fn normalized_trims_the_comment() {
        assert_eq!(draft(5, "  great  ").normalized().comment, "great");
    }

    #[test]
    fn review_accepts_review_date_alias() {
        let review: Review = serde_json::from_str(
            r#"{
                "id": 101,
                "movieId": 1,
                "userId": 9,
                "username": "moviebuff23",
                "rating": 5,
                "comment": "A masterpiece.",
                "reviewDate": "2024-01-15T00:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(review.rating, 5);
        assert_eq!(review.username.as_deref(), Some("moviebuff23"));
    }
}
