use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// A movie enriched with metadata, as stored in the dataset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    pub title: String,
    pub year: i32,
    /// Comma-separated genre list, e.g. "Action, Sci-Fi"
    pub genre: String,
    pub director: String,
    pub plot: String,
    /// IMDb rating on a 0.0 to 10.0 scale, 0.0 when unknown
    pub rating: f64,
}

/// A recommended title with the similarity score that ranked it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub title: String,
    pub score: f64,
}

// ============================================================================
// OMDb API Types
// ============================================================================

const OMDB_MISSING: &str = "N/A";

/// Raw response from the OMDb `?t=` lookup
///
/// OMDb reports lookup failures in-band: `Response` is `"False"` and `Error`
/// carries the reason, with every other field absent.
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbMovie {
    #[serde(rename = "Response")]
    pub response: String,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    #[serde(rename = "Genre", default)]
    pub genre: Option<String>,
    #[serde(rename = "Director", default)]
    pub director: Option<String>,
    #[serde(rename = "Plot", default)]
    pub plot: Option<String>,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<String>,
}

impl OmdbMovie {
    /// Converts the payload into a record, `query` naming the title that was asked for
    pub fn into_record(self, query: &str) -> AppResult<MovieRecord> {
        if !self.response.eq_ignore_ascii_case("true") {
            let reason = self.error.unwrap_or_else(|| "Movie not found!".to_string());
            return Err(AppError::NotFound(format!("{} ({})", query, reason)));
        }

        let title = self
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                AppError::ExternalApi(format!("OMDb response for '{}' has no title", query))
            })?;

        Ok(MovieRecord {
            title,
            year: parse_year(self.year.as_deref()),
            genre: known_text(self.genre),
            director: known_text(self.director),
            plot: known_text(self.plot),
            rating: parse_rating(self.imdb_rating.as_deref()),
        })
    }
}

/// Series report ranges like "2005–2008"; the first year wins
fn parse_year(raw: Option<&str>) -> i32 {
    raw.map(|value| {
        value
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect::<String>()
    })
    .and_then(|digits| digits.parse().ok())
    .unwrap_or(0)
}

fn parse_rating(raw: Option<&str>) -> f64 {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|rating| rating.is_finite())
        .unwrap_or(0.0)
}

fn known_text(raw: Option<String>) -> String {
    match raw {
        Some(text) if text.trim() != OMDB_MISSING => text.trim().to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_omdb_movie_to_record() {
        let json = r#"{
            "Title": "Inception",
            "Year": "2010",
            "Genre": "Action, Adventure, Sci-Fi",
            "Director": "Christopher Nolan",
            "Plot": "A thief who steals corporate secrets through dream-sharing technology.",
            "imdbRating": "8.8",
            "Response": "True"
        }"#;

        let movie: OmdbMovie = serde_json::from_str(json).unwrap();
        let record = movie.into_record("Inception").unwrap();
        assert_eq!(record.title, "Inception");
        assert_eq!(record.year, 2010);
        assert_eq!(record.genre, "Action, Adventure, Sci-Fi");
        assert_eq!(record.director, "Christopher Nolan");
        assert_eq!(record.rating, 8.8);
    }

    #[test]
    fn test_omdb_not_found_response() {
        let json = r#"{"Response": "False", "Error": "Movie not found!"}"#;

        let movie: OmdbMovie = serde_json::from_str(json).unwrap();
        let err = movie.into_record("Nonexistent Film").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(err.to_string().contains("Nonexistent Film"));
    }

    #[test]
    fn test_omdb_missing_values_default() {
        let json = r#"{
            "Title": "Obscure Short",
            "Year": "N/A",
            "Genre": "N/A",
            "Director": "N/A",
            "Plot": "N/A",
            "imdbRating": "N/A",
            "Response": "True"
        }"#;

        let movie: OmdbMovie = serde_json::from_str(json).unwrap();
        let record = movie.into_record("Obscure Short").unwrap();
        assert_eq!(record.year, 0);
        assert_eq!(record.genre, "");
        assert_eq!(record.director, "");
        assert_eq!(record.plot, "");
        assert_eq!(record.rating, 0.0);
    }

    #[test]
    fn test_omdb_year_range_uses_start() {
        assert_eq!(parse_year(Some("2005–2008")), 2005);
        assert_eq!(parse_year(Some("1999")), 1999);
        assert_eq!(parse_year(None), 0);
    }

    #[test]
    fn test_omdb_success_without_title_is_rejected() {
        let json = r#"{"Response": "True", "Year": "2010"}"#;

        let movie: OmdbMovie = serde_json::from_str(json).unwrap();
        let err = movie.into_record("Inception").unwrap_err();
        assert!(matches!(err, AppError::ExternalApi(_)));
    }

    #[test]
    fn test_movie_record_field_names() {
        let record = MovieRecord {
            title: "Up".to_string(),
            year: 2009,
            genre: "Animation, Adventure, Comedy".to_string(),
            director: "Pete Docter".to_string(),
            plot: "A balloon salesman flies his house to South America.".to_string(),
            rating: 8.3,
        };

        let value = serde_json::to_value(&record).unwrap();
        for field in ["title", "year", "genre", "director", "plot", "rating"] {
            assert!(value.get(field).is_some(), "missing field {}", field);
        }
    }
}
