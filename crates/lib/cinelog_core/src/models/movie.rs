//! Movie catalog models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A movie record as returned by the backend.
///
/// `average_rating` is server-derived from the current review set; the client
/// re-fetches it after review mutations rather than recomputing it locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub director: String,
    /// Free text, possibly a comma-separated list.
    pub genre: String,
    pub release_date: NaiveDate,
    /// Runtime in minutes.
    pub duration: Option<u32>,
    pub description: String,
    pub poster_url: Option<String>,
    /// `None` until the first review exists ("no ratings", not zero).
    #[serde(default, alias = "avgRating")]
    pub average_rating: Option<f64>,
}

/// Movie payload for create/update (no id, no derived rating).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDraft {
    pub title: String,
    pub director: String,
    pub genre: String,
    pub release_date: Option<NaiveDate>,
    pub duration: Option<u32>,
    pub description: String,
    pub poster_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_decodes_camel_case() {
        let movie: Movie = serde_json::from_str(
            r#"{
                "id": 3,
                "title": "The Batman",
                "director": "Matt Reeves",
                "genre": "Action, Crime, Drama",
                "releaseDate": "2022-03-04",
                "duration": 176,
                "description": "Second year in Gotham.",
                "posterUrl": "https://example.test/batman.jpg",
                "averageRating": 4.6
            }"#,
        )
        .unwrap();
        assert_eq!(movie.release_date, NaiveDate::from_ymd_opt(2022, 3, 4).unwrap());
        assert_eq!(movie.average_rating, Some(4.6));
    }

    #[test]
    fn missing_average_rating_is_none_not_zero() {
        let movie: Movie = serde_json::from_str(
            r#"{
                "id": 1,
                "title": "Weapons",
                "director": "Zach Cregger",
                "genre": "Mystery, Horror",
                "releaseDate": "2025-08-08",
                "description": "Every kid vanishes at 02:17."
            }"#,
        )
        .unwrap();
        assert_eq!(movie.average_rating, None);
        assert_eq!(movie.duration, None);
    }

    #[test]
    fn avg_rating_alias_is_accepted() {
        let movie: Movie = serde_json::from_str(
            r#"{
                "id": 2,
                "title": "Oppenheimer",
                "director": "Christopher Nolan",
                "genre": "Biography, Drama",
                "releaseDate": "2023-07-21",
                "description": "The life of J. Robert Oppenheimer.",
                "avgRating": 4.0
            }"#,
        )
        .unwrap();
        assert_eq!(movie.average_rating, Some(4.0));
    }
}
