// The movie record and the checks applied to what the user types.

use crate::error::{MovieError, Result};

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;

/// One row of the `movies` table. `title` is the unique key.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub title: String,
    pub year: i32,
    pub rating: f64,
    pub poster: String,
}

impl Movie {
    pub fn new(title: impl Into<String>, year: i32, rating: f64, poster: impl Into<String>) -> Self {
        Movie {
            title: title.into(),
            year,
            rating,
            poster: poster.into(),
        }
    }
}

/// Rating as stored, without rounding. Whole numbers keep a trailing `.0`.
pub fn rating_text(rating: f64) -> String {
    format!("{:?}", rating)
}

/// Trim a user-entered title and reject it when nothing is left.
pub fn validate_title(input: &str) -> Result<&str> {
    let title = input.trim();
    if title.is_empty() {
        return Err(MovieError::validation("Movie name is empty"));
    }
    Ok(title)
}

/// Parse a rating typed at the prompt. Must be a number in `0..=10`.
pub fn parse_rating(input: &str) -> Result<f64> {
    let rating: f64 = input
        .trim()
        .parse()
        .map_err(|_| MovieError::validation("Invalid input!"))?;
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(MovieError::validation(
            "Invalid rating! Must be between 0 and 10.",
        ));
    }
    Ok(rating)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_trimmed() {
        assert_eq!(validate_title("  Heat ").unwrap(), "Heat");
        assert!(matches!(
            validate_title("   "),
            Err(MovieError::Validation(_))
        ));
    }

    #[test]
    fn ratings_print_as_stored() {
        assert_eq!(rating_text(7.25), "7.25");
        assert_eq!(rating_text(6.33), "6.33");
        assert_eq!(rating_text(7.0), "7.0");
        assert_eq!(rating_text(0.0), "0.0");
    }

    #[test]
    fn rating_bounds_are_inclusive() {
        assert_eq!(parse_rating("0").unwrap(), 0.0);
        assert_eq!(parse_rating(" 10 ").unwrap(), 10.0);
        assert_eq!(parse_rating("7.5").unwrap(), 7.5);
    }

    #[test]
    fn rating_rejects_garbage_and_out_of_range() {
        let err = parse_rating("ten").unwrap_err();
        assert_eq!(err.to_string(), "Invalid input!");
        let err = parse_rating("10.1").unwrap_err();
        assert_eq!(err.to_string(), "Invalid rating! Must be between 0 and 10.");
        assert!(parse_rating("-1").is_err());
        assert!(parse_rating("NaN").is_err());
    }
}
