// API client module: a small blocking HTTP client for the OMDb metadata
// API. One GET per lookup, fixed timeout, no retry.

use crate::config::Config;
use crate::error::{MovieError, Result};
use crate::movie::Movie;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The exact `Error` value OMDb sends when a title has no match. It comes
/// back with HTTP 200.
const NOT_FOUND_MESSAGE: &str = "Movie not found!";

/// Blocking OMDb client holding the reqwest client, the endpoint and the
/// API key sent with every request.
#[derive(Clone)]
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

/// The subset of the OMDb title response we use. Every field is optional
/// because error responses only carry `Response` and `Error`.
#[derive(Deserialize, Debug)]
struct OmdbResponse {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

impl OmdbClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(OmdbClient {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Create a client from the loaded config. Fails when no API key is
    /// configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| MovieError::Config("OMDB_API_KEY is not set".into()))?;
        Self::new(config.api_url.clone(), api_key)
    }

    /// Look a title up and return it as a `Movie` ready to insert.
    pub fn fetch(&self, title: &str) -> Result<Movie> {
        debug!(title, url = %self.base_url, "fetching movie metadata");
        let res = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), ("t", title)])
            .send()?;

        let status = res.status();
        let body = res.text()?;
        let parsed: Option<OmdbResponse> = serde_json::from_str(&body).ok();

        if let Some(OmdbResponse { error: Some(err), .. }) = &parsed {
            if err == NOT_FOUND_MESSAGE {
                return Err(MovieError::NotFound(title.to_string()));
            }
        }

        if !status.is_success() {
            return Err(MovieError::Request(format!(
                "Error {}: {}",
                status.as_u16(),
                body
            )));
        }

        let data = parsed.ok_or_else(|| {
            MovieError::Request(format!("unexpected response body: {}", body))
        })?;
        if let Some(err) = data.error {
            return Err(MovieError::Request(err));
        }
        into_movie(data)
    }
}

fn into_movie(data: OmdbResponse) -> Result<Movie> {
    let title = data
        .title
        .ok_or_else(|| MovieError::Request("response has no Title".into()))?;

    let year_text = data.year.unwrap_or_default();
    let year = parse_year(&year_text).ok_or_else(|| {
        MovieError::Request(format!("unexpected Year '{}' for '{}'", year_text, title))
    })?;

    let rating_text = data.imdb_rating.unwrap_or_default();
    let rating = rating_text.trim().parse::<f64>().unwrap_or_else(|_| {
        warn!(title = %title, rating = %rating_text, "no usable imdbRating, storing 0");
        0.0
    });

    Ok(Movie {
        title,
        year,
        rating,
        poster: data.poster.unwrap_or_default(),
    })
}

/// OMDb years can be ranges like "2005–2008"; the leading number is the
/// release year.
fn parse_year(text: &str) -> Option<i32> {
    let digits: String = text
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
