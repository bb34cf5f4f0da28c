// Error taxonomy shared by every menu action.

use thiserror::Error;

/// Every failure a menu action can report to the user.
#[derive(Error, Debug)]
pub enum MovieError {
    #[error("Movie '{0}' not found!")]
    NotFound(String),

    #[error("Movie '{0}' already exists!")]
    AlreadyExists(String),

    #[error("{0}")]
    Validation(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MovieError {
    pub fn validation(message: impl Into<String>) -> Self {
        MovieError::Validation(message.into())
    }

    /// True for failures talking to the metadata API.
    pub fn is_request(&self) -> bool {
        matches!(self, MovieError::Request(_) | MovieError::Http(_))
    }
}

pub type Result<T> = std::result::Result<T, MovieError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_menu_wording() {
        assert_eq!(
            MovieError::NotFound("Alien".into()).to_string(),
            "Movie 'Alien' not found!"
        );
        assert_eq!(
            MovieError::AlreadyExists("Alien".into()).to_string(),
            "Movie 'Alien' already exists!"
        );
        assert_eq!(
            MovieError::validation("Movie name is empty").to_string(),
            "Movie name is empty"
        );
    }

    #[test]
    fn request_kinds() {
        assert!(MovieError::Request("Error 500".into()).is_request());
        assert!(!MovieError::NotFound("x".into()).is_request());
    }
}
