// SQLite-backed movie store. The handle only remembers the database path;
// each operation opens its own connection and drops it before returning,
// so there is no long-lived connection to share or lock.

use crate::error::{MovieError, Result};
use crate::movie::Movie;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const SCHEMA_SQL: &str = "
    CREATE TABLE IF NOT EXISTS movies (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT UNIQUE NOT NULL,
        year INTEGER NOT NULL,
        rating REAL NOT NULL,
        poster TEXT NOT NULL
    );
";

/// Handle to the movies database file.
#[derive(Debug, Clone)]
pub struct MovieStore {
    path: PathBuf,
}

impl MovieStore {
    /// Open (or create) the store at `path`. Missing parent directories are
    /// created and the schema is applied idempotently.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let store = MovieStore { path };
        store.connect()?.execute_batch(SCHEMA_SQL)?;
        debug!(path = %store.path.display(), "movie store ready");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.path)?)
    }

    /// All movies in insertion order.
    pub fn list(&self) -> Result<Vec<Movie>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT title, year, rating, poster FROM movies ORDER BY id")?;
        let movies = stmt
            .query_map([], |row| {
                Ok(Movie {
                    title: row.get(0)?,
                    year: row.get(1)?,
                    rating: row.get(2)?,
                    poster: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(movies)
    }

    pub fn get(&self, title: &str) -> Result<Option<Movie>> {
        let conn = self.connect()?;
        let movie = conn
            .query_row(
                "SELECT title, year, rating, poster FROM movies WHERE title = ?1",
                params![title],
                |row| {
                    Ok(Movie {
                        title: row.get(0)?,
                        year: row.get(1)?,
                        rating: row.get(2)?,
                        poster: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(movie)
    }

    pub fn contains(&self, title: &str) -> Result<bool> {
        Ok(self.get(title)?.is_some())
    }

    /// Insert a movie. A duplicate title is logged and reported as
    /// `AlreadyExists`; the table is left untouched.
    pub fn add(&self, movie: &Movie) -> Result<()> {
        let conn = self.connect()?;
        let inserted = conn.execute(
            "INSERT INTO movies (title, year, rating, poster) VALUES (?1, ?2, ?3, ?4)",
            params![movie.title, movie.year, movie.rating, movie.poster],
        );

        match inserted {
            Ok(_) => {
                debug!(title = %movie.title, "movie added");
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(err, msg))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                warn!(title = %movie.title, error = ?msg, "insert rejected by constraint");
                Err(MovieError::AlreadyExists(movie.title.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete by title. Returns whether a row was removed.
    pub fn delete(&self, title: &str) -> Result<bool> {
        let conn = self.connect()?;
        let removed = conn.execute("DELETE FROM movies WHERE title = ?1", params![title])?;
        debug!(title, removed, "delete");
        Ok(removed > 0)
    }

    /// Set a new rating. Returns whether a row was changed.
    pub fn update_rating(&self, title: &str, rating: f64) -> Result<bool> {
        let conn = self.connect()?;
        let changed = conn.execute(
            "UPDATE movies SET rating = ?1 WHERE title = ?2",
            params![rating, title],
        )?;
        debug!(title, rating, changed, "update rating");
        Ok(changed > 0)
    }
}
