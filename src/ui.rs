// UI layer: the numbered menu loop. Each handler prompts with `dialoguer`,
// calls into storage / api / website, and prints the outcome. Domain errors
// are reported here and never leave a single menu action.

use crate::api::OmdbClient;
use crate::error::{MovieError, Result as MovieResult};
use crate::histogram;
use crate::movie::{parse_rating, rating_text, validate_title, Movie};
use crate::search::{self, SearchOutcome};
use crate::stats::{self, round1};
use crate::storage::MovieStore;
use crate::website::WebsiteGenerator;
use anyhow::Result;
use crossterm::style::Stylize;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// One menu entry. The discriminant is the number the user types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Exit = 0,
    List = 1,
    Add = 2,
    Delete = 3,
    Update = 4,
    Stats = 5,
    Random = 6,
    Search = 7,
    SortedByRating = 8,
    GenerateWebsite = 9,
    RatingHistogram = 10,
}

impl Command {
    pub const ALL: [Command; 11] = [
        Command::Exit,
        Command::List,
        Command::Add,
        Command::Delete,
        Command::Update,
        Command::Stats,
        Command::Random,
        Command::Search,
        Command::SortedByRating,
        Command::GenerateWebsite,
        Command::RatingHistogram,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Command::Exit => "Exit",
            Command::List => "List movies",
            Command::Add => "Add movie",
            Command::Delete => "Delete movie",
            Command::Update => "Update movie",
            Command::Stats => "Stats",
            Command::Random => "Random movie",
            Command::Search => "Search movie",
            Command::SortedByRating => "Movies sorted by rating",
            Command::GenerateWebsite => "Generate website",
            Command::RatingHistogram => "Create rating histogram",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", *self as u8, self.label())
    }
}

impl FromStr for Command {
    type Err = MovieError;

    fn from_str(s: &str) -> MovieResult<Self> {
        let number: u8 = s
            .trim()
            .parse()
            .map_err(|_| MovieError::validation("Invalid choice!"))?;
        Command::ALL
            .into_iter()
            .find(|c| *c as u8 == number)
            .ok_or_else(|| MovieError::validation("Invalid choice!"))
    }
}

/// Everything a handler needs. Passed explicitly to the menu loop.
pub struct App {
    pub store: MovieStore,
    /// `None` when no API key is configured.
    pub api: Option<OmdbClient>,
    pub website: WebsiteGenerator,
}

/// Run the menu until the user picks 0. Only terminal IO failures are
/// returned; everything else is printed and the loop continues.
pub fn main_menu(app: &App) -> Result<()> {
    println!("{0} My Movies Database {0}", "*".repeat(10));

    loop {
        print_menu();
        let choice: String = Input::new()
            .with_prompt("Enter choice (0-10)")
            .allow_empty(true)
            .interact_text()?;

        let command = match choice.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                report(&e);
                pause()?;
                continue;
            }
        };
        tracing::debug!(?command, "menu choice");

        let outcome = match command {
            Command::Exit => {
                println!("Bye!");
                return Ok(());
            }
            Command::List => list_movies(&app.store),
            Command::Add => add_movie(app)?,
            Command::Delete => delete_movie(&app.store)?,
            Command::Update => update_movie(&app.store)?,
            Command::Stats => show_stats(&app.store),
            Command::Random => random_movie(&app.store),
            Command::Search => search_movie(&app.store)?,
            Command::SortedByRating => sorted_by_rating(&app.store),
            Command::GenerateWebsite => generate_website(app),
            Command::RatingHistogram => rating_histogram(&app.store)?,
        };
        if let Err(e) = outcome {
            report(&e);
        }

        pause()?;
    }
}

fn print_menu() {
    println!("\nMenu:");
    for command in Command::ALL {
        println!("{}", command);
    }
    println!();
}

fn pause() -> Result<()> {
    let _: String = Input::new()
        .with_prompt("Press enter to continue")
        .allow_empty(true)
        .interact_text()?;
    Ok(())
}

fn prompt(text: &str) -> Result<String> {
    Ok(Input::new()
        .with_prompt(text)
        .allow_empty(true)
        .interact_text()?)
}

fn report(err: &MovieError) {
    if err.is_request() {
        tracing::warn!(error = %err, "metadata lookup failed");
    } else {
        tracing::debug!(error = %err, "menu action failed");
    }
    println!("{}", error_message(err).red());
}

fn error_message(err: &MovieError) -> String {
    if err.is_request() {
        format!("Error: {}\nCheck your network connection and OMDB_API_KEY.", err)
    } else {
        format!("Error: {}", err)
    }
}

fn success(message: String) {
    println!("{}", message.green());
}

fn movie_line(movie: &Movie) -> String {
    format!("{} ({}): {}", movie.title, movie.year, rating_text(movie.rating))
}

fn list_movies(store: &MovieStore) -> MovieResult<()> {
    let movies = store.list()?;
    println!("\n{} movies in database:", movies.len());
    for movie in &movies {
        println!("{}", movie_line(movie));
    }
    Ok(())
}

/// Outer `Result` is terminal IO, inner is the action outcome.
fn add_movie(app: &App) -> Result<MovieResult<()>> {
    let input = prompt("Enter new movie name")?;
    Ok(fetch_and_store(app, &input))
}

fn fetch_and_store(app: &App, input: &str) -> MovieResult<()> {
    let title = validate_title(input)?;
    if app.store.contains(title)? {
        return Err(MovieError::AlreadyExists(title.to_string()));
    }
    let api = app
        .api
        .as_ref()
        .ok_or_else(|| MovieError::Config("OMDB_API_KEY is not set".into()))?;

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Looking up '{}'...", title));
    spinner.enable_steady_tick(Duration::from_millis(100));
    let fetched = api.fetch(title);
    spinner.finish_and_clear();

    let movie = fetched?;
    app.store.add(&movie)?;
    success(format!("Movie '{}' added successfully!", movie.title));
    Ok(())
}

fn delete_movie(store: &MovieStore) -> Result<MovieResult<()>> {
    let input = prompt("Enter movie name to delete")?;
    let outcome = validate_title(&input).and_then(|title| {
        if !store.delete(title)? {
            return Err(MovieError::NotFound(title.to_string()));
        }
        success(format!("Movie '{}' deleted successfully!", title));
        Ok(())
    });
    Ok(outcome)
}

fn update_movie(store: &MovieStore) -> Result<MovieResult<()>> {
    let input = prompt("Enter movie name to update")?;
    let title = match validate_title(&input) {
        Ok(title) => title,
        Err(e) => return Ok(Err(e)),
    };
    match store.contains(title) {
        Ok(true) => {}
        Ok(false) => return Ok(Err(MovieError::NotFound(title.to_string()))),
        Err(e) => return Ok(Err(e)),
    }

    let rating_input = prompt("Enter new rating (0-10)")?;
    let outcome = parse_rating(&rating_input).and_then(|rating| {
        if !store.update_rating(title, rating)? {
            return Err(MovieError::NotFound(title.to_string()));
        }
        success(format!("Movie '{}' successfully updated!", title));
        Ok(())
    });
    Ok(outcome)
}

fn show_stats(store: &MovieStore) -> MovieResult<()> {
    let movies = store.list()?;
    let Some(summary) = stats::summarize(&movies) else {
        println!("\nNo movies in database.");
        return Ok(());
    };

    println!("\nAverage rating: {:.1}", round1(summary.average));
    println!("Median rating: {:.1}", round1(summary.median));

    println!("\nBest movie(s):");
    for movie in &summary.best {
        println!("{}, {}", movie.title, rating_text(movie.rating));
    }
    println!("\nWorst movie(s):");
    for movie in &summary.worst {
        println!("{}, {}", movie.title, rating_text(movie.rating));
    }
    Ok(())
}

fn random_movie(store: &MovieStore) -> MovieResult<()> {
    let movies = store.list()?;
    match stats::pick_random(&movies, &mut rand::rng()) {
        Some(movie) => println!(
            "\nYour movie for tonight: {} ({}), rating {}",
            movie.title,
            movie.year,
            rating_text(movie.rating)
        ),
        None => println!("\nNo movies in database."),
    }
    Ok(())
}

fn search_movie(store: &MovieStore) -> Result<MovieResult<()>> {
    let input = prompt("Enter part of movie name")?;
    let query = input.trim().to_lowercase();
    if query.is_empty() {
        return Ok(Err(MovieError::validation("Movie name is empty")));
    }

    let movies = match store.list() {
        Ok(movies) => movies,
        Err(e) => return Ok(Err(e)),
    };
    println!();
    match search::search(movies, &query) {
        SearchOutcome::Matches(found) => {
            for movie in &found {
                println!("{}", movie_line(movie));
            }
        }
        SearchOutcome::Suggestions(similar) => {
            println!("Did you mean:");
            for (movie, score) in &similar {
                println!("- {} ({}) [{}%]", movie.title, rating_text(movie.rating), score);
            }
        }
        SearchOutcome::NoResults => println!("No results for '{}'.", query),
    }
    Ok(Ok(()))
}

fn sorted_by_rating(store: &MovieStore) -> MovieResult<()> {
    let movies = stats::sorted_by_rating(store.list()?);
    println!("\n{} movies in database (sorted by rating):", movies.len());
    for movie in &movies {
        println!("{}: {}", movie.title, rating_text(movie.rating));
    }
    Ok(())
}

fn generate_website(app: &App) -> MovieResult<()> {
    let path = app.website.build(&app.store)?;
    success(format!(
        "Website was generated successfully: {}",
        path.display()
    ));
    Ok(())
}

fn rating_histogram(store: &MovieStore) -> Result<MovieResult<()>> {
    let input = prompt("Enter filename to save histogram (e.g., histogram.svg)")?;
    let outcome = validate_filename(&input).and_then(|name| {
        let ratings: Vec<f64> = store.list()?.iter().map(|m| m.rating).collect();
        let written = histogram::write_histogram(&ratings, Path::new(name))?;
        success(format!("Histogram saved to {}", written.display()));
        Ok(())
    });
    Ok(outcome)
}

fn validate_filename(input: &str) -> MovieResult<&str> {
    let name = input.trim();
    if name.is_empty() {
        return Err(MovieError::validation("Filename is empty"));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn every_number_maps_to_its_command() {
        for (i, command) in Command::ALL.iter().enumerate() {
            assert_eq!(i.to_string().parse::<Command>().unwrap(), *command);
        }
        assert_eq!(" 10 ".parse::<Command>().unwrap(), Command::RatingHistogram);
    }

    #[test]
    fn invalid_choices() {
        for bad in ["", "11", "-1", "two", "1.0"] {
            let err = bad.parse::<Command>().unwrap_err();
            assert_eq!(err.to_string(), "Invalid choice!");
        }
    }

    #[test]
    fn menu_lines() {
        assert_eq!(Command::Exit.to_string(), "0. Exit");
        assert_eq!(
            Command::SortedByRating.to_string(),
            "8. Movies sorted by rating"
        );
    }

    fn test_app(dir: &tempfile::TempDir) -> App {
        let store = MovieStore::open(dir.path().join("movies.db")).unwrap();
        App {
            store,
            api: None,
            website: WebsiteGenerator {
                template_path: dir.path().join("index_template.html"),
                output_path: dir.path().join("index.html"),
                site_title: "Movie App".into(),
            },
        }
    }

    #[test]
    fn add_rejects_known_title_before_any_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(&dir);
        app.store
            .add(&Movie::new("Alien", 1979, 8.5, "p"))
            .unwrap();

        let err = fetch_and_store(&app, " Alien ").unwrap_err();
        assert!(matches!(err, MovieError::AlreadyExists(t) if t == "Alien"));
        assert_eq!(app.store.list().unwrap().len(), 1);
    }

    #[test]
    fn add_without_api_key_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(&dir);
        assert!(matches!(
            fetch_and_store(&app, "Heat"),
            Err(MovieError::Config(_))
        ));
        assert!(matches!(
            fetch_and_store(&app, "   "),
            Err(MovieError::Validation(_))
        ));
    }

    #[test]
    fn filename_must_not_be_blank() {
        assert!(validate_filename("  ").is_err());
        assert_eq!(validate_filename(" h.svg ").unwrap(), "h.svg");
    }

    fn matrix_server() -> MockServer {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .query_param("apikey", "k")
                .query_param("t", "matrix");
            then.status(200).json_body(json!({
                "Title": "The Matrix",
                "Year": "1999",
                "imdbRating": "8.7",
                "Poster": "https://img/matrix.jpg",
                "Response": "True"
            }));
        });
        server
    }

    #[test]
    fn add_stores_the_looked_up_movie() {
        let dir = tempfile::tempdir().unwrap();
        let server = matrix_server();
        let mut app = test_app(&dir);
        app.api = Some(OmdbClient::new(server.url("/"), "k").unwrap());

        fetch_and_store(&app, "matrix").unwrap();

        let movies = app.store.list().unwrap();
        assert_eq!(
            movies,
            vec![Movie::new("The Matrix", 1999, 8.7, "https://img/matrix.jpg")]
        );
    }

    #[test]
    fn add_reports_duplicate_canonical_title() {
        let dir = tempfile::tempdir().unwrap();
        let server = matrix_server();
        let mut app = test_app(&dir);
        app.api = Some(OmdbClient::new(server.url("/"), "k").unwrap());
        app.store
            .add(&Movie::new("The Matrix", 1999, 9.0, "mine"))
            .unwrap();

        let err = fetch_and_store(&app, "matrix").unwrap_err();
        assert!(matches!(err, MovieError::AlreadyExists(ref t) if t == "The Matrix"));

        let movies = app.store.list().unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].rating, 9.0);
    }

    #[test]
    fn listing_shows_stored_rating() {
        assert_eq!(
            movie_line(&Movie::new("X", 2000, 7.25, "")),
            "X (2000): 7.25"
        );
        assert_eq!(movie_line(&Movie::new("Z", 2000, 6.33, "")), "Z (2000): 6.33");
        assert_eq!(movie_line(&Movie::new("Up", 2009, 8.0, "")), "Up (2009): 8.0");
    }

    #[test]
    fn request_failures_get_a_hint() {
        let msg = error_message(&MovieError::Request("Error 401: nope".into()));
        assert!(msg.starts_with("Error: Request failed: Error 401: nope"));
        assert!(msg.contains("OMDB_API_KEY"));

        let msg = error_message(&MovieError::NotFound("Heat".into()));
        assert_eq!(msg, "Error: Movie 'Heat' not found!");
    }
}
