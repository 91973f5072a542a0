//! Catalog state — the fetched movie list and its derived views.
//!
//! Derived views (filtered/sorted lists, genre options, summary stats) are
//! pure and total: they always produce a fresh list from the source without
//! mutating it, and are recomputed whenever source or filter changes.

use crate::models::movie::Movie;

/// Sort order for the catalog view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Title ascending, case-insensitive.
    #[default]
    Title,
    /// Average rating descending; movies without ratings sort as 0.
    Rating,
    /// Release date descending (most recent first).
    ReleaseDate,
}

/// Search term, genre selection, and sort order for the derived view.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    /// Case-insensitive substring match on title OR director OR genre.
    pub search: Option<String>,
    /// Exact match on the genre value. Composes with `search` by AND.
    pub genre: Option<String>,
    pub sort: SortKey,
}

impl CatalogFilter {
    pub fn is_active(&self) -> bool {
        self.search.is_some() || self.genre.is_some()
    }

    /// Drop search and genre, keeping the sort order.
    pub fn clear(&mut self) {
        self.search = None;
        self.genre = None;
    }
}

/// Summary numbers for the catalog overview.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogStats {
    pub movie_count: usize,
    pub genre_count: usize,
    /// Mean of the available per-movie average ratings; `None` when no movie
    /// has been rated yet.
    pub mean_rating: Option<f64>,
}

/// Holds the fetched movie list; a cache of server truth, replaced wholesale
/// on every (re)load.
#[derive(Debug, Default)]
pub struct CatalogState {
    movies: Vec<Movie>,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the source list with a fresh server response.
    pub fn set_movies(&mut self, movies: Vec<Movie>) {
        self.movies = movies;
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Unique genre values present in the source list, in first-seen order,
    /// so a genre dropdown always matches the loaded data.
    pub fn genres(&self) -> Vec<String> {
        let mut genres: Vec<String> = Vec::new();
        for movie in &self.movies {
            if !genres.iter().any(|g| g == &movie.genre) {
                genres.push(movie.genre.clone());
            }
        }
        genres
    }

    /// Compute the filtered, sorted derived view.
    pub fn filtered(&self, filter: &CatalogFilter) -> Vec<Movie> {
        let mut view: Vec<Movie> = self
            .movies
            .iter()
            .filter(|movie| Self::matches_search(movie, filter.search.as_deref()))
            .filter(|movie| Self::matches_genre(movie, filter.genre.as_deref()))
            .cloned()
            .collect();

        match filter.sort {
            SortKey::Title => {
                view.sort_by_key(|m| m.title.to_lowercase());
            }
            SortKey::Rating => {
                view.sort_by(|a, b| {
                    let ra = a.average_rating.unwrap_or(0.0);
                    let rb = b.average_rating.unwrap_or(0.0);
                    rb.partial_cmp(&ra).unwrap_or(std::cmp::Ordering::Equal)
                });
            }
            SortKey::ReleaseDate => {
                view.sort_by(|a, b| b.release_date.cmp(&a.release_date));
            }
        }
        view
    }

    pub fn stats(&self) -> CatalogStats {
        let rated: Vec<f64> = self
            .movies
            .iter()
            .filter_map(|m| m.average_rating)
            .collect();
        let mean_rating = if rated.is_empty() {
            None
        } else {
            Some(rated.iter().sum::<f64>() / rated.len() as f64)
        };
        CatalogStats {
            movie_count: self.movies.len(),
            genre_count: self.genres().len(),
            mean_rating,
        }
    }

    fn matches_search(movie: &Movie, search: Option<&str>) -> bool {
        let Some(term) = search else { return true };
        let term = term.to_lowercase();
        if term.is_empty() {
            return true;
        }
        movie.title.to_lowercase().contains(&term)
            || movie.director.to_lowercase().contains(&term)
            || movie.genre.to_lowercase().contains(&term)
    }

    fn matches_genre(movie: &Movie, genre: Option<&str>) -> bool {
        match genre {
            Some(genre) if !genre.is_empty() => movie.genre == genre,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn movie(id: i64, title: &str, director: &str, genre: &str, rating: Option<f64>) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            director: director.to_string(),
            genre: genre.to_string(),
            release_date: NaiveDate::from_ymd_opt(2000 + id as i32, 1, 1).unwrap(),
            duration: Some(120),
            description: String::new(),
            poster_url: None,
            average_rating: rating,
        }
    }

    fn catalog() -> CatalogState {
        let mut state = CatalogState::new();
        state.set_movies(vec![
            movie(1, "The Matrix", "Wachowski", "Sci-Fi", Some(4.8)),
            movie(2, "Heat", "Michael Mann", "Action", Some(4.5)),
            movie(3, "Alien", "Ridley Scott", "Sci-Fi", None),
        ]);
        state
    }

    #[test]
    fn search_matches_title_director_or_genre_case_insensitively() {
        let state = catalog();
        let mut filter = CatalogFilter::default();

        filter.search = Some("matrix".into());
        assert_eq!(state.filtered(&filter).len(), 1);

        filter.search = Some("RIDLEY".into());
        assert_eq!(state.filtered(&filter)[0].title, "Alien");

        filter.search = Some("sci".into());
        assert_eq!(state.filtered(&filter).len(), 2);
    }

    #[test]
    fn search_and_genre_compose_with_and() {
        let state = catalog();
        let mut filter = CatalogFilter {
            search: Some("matrix".into()),
            genre: Some("Action".into()),
            sort: SortKey::Title,
        };
        // "The Matrix" is Sci-Fi, so the AND composition yields nothing.
        assert!(state.filtered(&filter).is_empty());

        filter.genre = None;
        assert_eq!(state.filtered(&filter).len(), 1);
    }

    #[test]
    fn genre_filter_is_exact_match() {
        let state = catalog();
        let filter = CatalogFilter {
            genre: Some("Sci".into()),
            ..Default::default()
        };
        assert!(state.filtered(&filter).is_empty());
    }

    #[test]
    fn title_sort_is_case_insensitive_ascending() {
        let mut state = CatalogState::new();
        state.set_movies(vec![
            movie(1, "zodiac", "F", "Crime", None),
            movie(2, "Alien", "R", "Sci-Fi", None),
            movie(3, "heat", "M", "Action", None),
        ]);
        let titles: Vec<String> = state
            .filtered(&CatalogFilter::default())
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(titles, vec!["Alien", "heat", "zodiac"]);
    }

    #[test]
    fn rating_sort_treats_missing_as_zero() {
        let state = catalog();
        let filter = CatalogFilter {
            sort: SortKey::Rating,
            ..Default::default()
        };
        let ids: Vec<i64> = state.filtered(&filter).into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn release_date_sort_is_newest_first() {
        let state = catalog();
        let filter = CatalogFilter {
            sort: SortKey::ReleaseDate,
            ..Default::default()
        };
        let ids: Vec<i64> = state.filtered(&filter).into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn filtering_does_not_mutate_the_source() {
        let state = catalog();
        let filter = CatalogFilter {
            search: Some("matrix".into()),
            ..Default::default()
        };
        let _ = state.filtered(&filter);
        assert_eq!(state.movies().len(), 3);
    }

    #[test]
    fn genres_are_unique_in_first_seen_order() {
        let state = catalog();
        assert_eq!(state.genres(), vec!["Sci-Fi", "Action"]);
    }

    #[test]
    fn stats_ignore_unrated_movies_in_the_mean() {
        let stats = catalog().stats();
        assert_eq!(stats.movie_count, 3);
        assert_eq!(stats.genre_count, 2);
        let mean = stats.mean_rating.unwrap();
        assert!((mean - 4.65).abs() < 1e-9);
    }

    #[test]
    fn stats_mean_is_none_for_unrated_catalog() {
        let mut state = CatalogState::new();
        state.set_movies(vec![movie(1, "Alien", "R", "Sci-Fi", None)]);
        assert_eq!(state.stats().mean_rating, None);
    }

    #[test]
    fn clear_keeps_the_sort_order() {
        let mut filter = CatalogFilter {
            search: Some("x".into()),
            genre: Some("Action".into()),
            sort: SortKey::Rating,
        };
        filter.clear();
        assert!(!filter.is_active());
        assert_eq!(filter.sort, SortKey::Rating);
    }
}
