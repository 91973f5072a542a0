//! Fenced movie-detail state.
//!
//! The detail view's fetches are tied to a changing key (the movie id from
//! navigation). Each fetch is tagged with the key and an epoch; a response
//! whose tag no longer matches is discarded, so a late response for a movie
//! the user has navigated away from can never overwrite newer state.

use tracing::debug;

use crate::models::movie::Movie;
use crate::models::review::Review;

/// Tag issued when a fetch begins; handed back with the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTag {
    movie_id: i64,
    epoch: u64,
}

impl FetchTag {
    pub fn movie_id(&self) -> i64 {
        self.movie_id
    }
}

/// State for one movie-detail view: the movie record plus its reviews.
#[derive(Debug, Default)]
pub struct DetailState {
    key: Option<i64>,
    epoch: u64,
    movie: Option<Movie>,
    reviews: Vec<Review>,
}

impl DetailState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn movie(&self) -> Option<&Movie> {
        self.movie.as_ref()
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn reviews_mut(&mut self) -> &mut Vec<Review> {
        &mut self.reviews
    }

    /// Start a (re)fetch for `movie_id`. Bumps the epoch so any still-running
    /// fetch for this view is superseded; switching to a different movie also
    /// drops the previous movie's data.
    pub fn begin(&mut self, movie_id: i64) -> FetchTag {
        if self.key != Some(movie_id) {
            self.movie = None;
            self.reviews.clear();
            self.key = Some(movie_id);
        }
        self.epoch += 1;
        FetchTag {
            movie_id,
            epoch: self.epoch,
        }
    }

    fn accepts(&self, tag: FetchTag) -> bool {
        self.key == Some(tag.movie_id) && self.epoch == tag.epoch
    }

    /// Apply a fetched movie. Returns `false` when the response was stale
    /// and has been discarded.
    pub fn apply_movie(&mut self, tag: FetchTag, movie: Movie) -> bool {
        if !self.accepts(tag) {
            debug!(movie_id = tag.movie_id, "discarding stale movie response");
            return false;
        }
        self.movie = Some(movie);
        true
    }

    /// Apply fetched reviews, replacing the list wholesale. Returns `false`
    /// when the response was stale.
    pub fn apply_reviews(&mut self, tag: FetchTag, reviews: Vec<Review>) -> bool {
        if !self.accepts(tag) {
            debug!(movie_id = tag.movie_id, "discarding stale reviews response");
            return false;
        }
        self.reviews = reviews;
        true
    }
}
