//! Review aggregate — ordering, statistics, and local list maintenance for
//! one movie's reviews.
//!
//! Statistics are a single pure function of the review collection so every
//! call site agrees on count, mean, and the "no ratings" sentinel. The value
//! of record for a movie's average is still the server's: after any mutation
//! the parent movie is re-fetched (see `service`).

use crate::models::review::Review;

/// Derived statistics for a review collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewStats {
    pub count: usize,
    /// Mean rating rounded to 1 decimal; `None` when there are no reviews.
    /// "Zero reviews" and "rated zero" are distinct states.
    pub average: Option<f64>,
}

impl ReviewStats {
    /// Compute count and rounded mean from the current review set.
    pub fn compute(reviews: &[Review]) -> Self {
        if reviews.is_empty() {
            return Self {
                count: 0,
                average: None,
            };
        }
        let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
        let mean = f64::from(sum) / reviews.len() as f64;
        Self {
            count: reviews.len(),
            average: Some((mean * 10.0).round() / 10.0),
        }
    }
}

/// Split a review list into (current user's review, everyone else's),
/// preserving the fetch order of the remainder.
pub fn partition(reviews: Vec<Review>, user_id: Option<i64>) -> (Option<Review>, Vec<Review>) {
    let Some(user_id) = user_id else {
        return (None, reviews);
    };
    let mut own = None;
    let mut others = Vec::with_capacity(reviews.len());
    for review in reviews {
        if own.is_none() && review.user_id == user_id {
            own = Some(review);
        } else {
            others.push(review);
        }
    }
    (own, others)
}

/// Order reviews for display: the current user's review pinned first,
/// the remainder newest first. The sort is stable, so fetch order breaks
/// creation-time ties.
pub fn order_for_display(reviews: Vec<Review>, user_id: Option<i64>) -> Vec<Review> {
    let (own, mut others) = partition(reviews, user_id);
    others.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let mut ordered = Vec::with_capacity(others.len() + 1);
    if let Some(own) = own {
        ordered.push(own);
    }
    ordered.extend(others);
    ordered
}

/// Replace the review with the same id, or append when absent.
pub fn upsert(reviews: &mut Vec<Review>, review: Review) {
    match reviews.iter_mut().find(|r| r.id == review.id) {
        Some(slot) => *slot = review,
        None => reviews.push(review),
    }
}

/// Remove a review by id. Returns whether anything was removed.
pub fn remove(reviews: &mut Vec<Review>, id: i64) -> bool {
    let before = reviews.len();
    reviews.retain(|r| r.id != id);
    reviews.len() != before
}

/// Per-user profile statistics across that user's own reviews.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileStats {
    pub total_reviews: usize,
    pub average_rating: Option<f64>,
    /// The genre the user has reviewed most often, ties broken by first seen.
    pub favorite_genre: Option<String>,
}

/// Compute profile statistics from a user's reviews and the genres of the
/// movies they belong to (`genre_of(movie_id)`).
pub fn profile_stats<'a, F>(reviews: &[Review], mut genre_of: F) -> ProfileStats
where
    F: FnMut(i64) -> Option<&'a str>,
{
    let stats = ReviewStats::compute(reviews);

    let mut counts: Vec<(String, usize)> = Vec::new();
    for review in reviews {
        let Some(genre) = genre_of(review.movie_id) else {
            continue;
        };
        match counts.iter_mut().find(|(g, _)| g == genre) {
            Some((_, n)) => *n += 1,
            None => counts.push((genre.to_string(), 1)),
        }
    }
    let mut favorite: Option<(String, usize)> = None;
    for (genre, n) in counts {
        match &favorite {
            Some((_, best)) if *best >= n => {}
            _ => favorite = Some((genre, n)),
        }
    }
    let favorite_genre = favorite.map(|(genre, _)| genre);

    ProfileStats {
        total_reviews: stats.count,
        average_rating: stats.average,
        favorite_genre,
    }
}
