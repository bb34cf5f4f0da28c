// Static website export: every stored movie becomes a grid item that is
// spliced into the HTML template.

use crate::config::Config;
use crate::error::Result;
use crate::movie::Movie;
use crate::storage::MovieStore;
use std::path::PathBuf;
use tracing::debug;

pub const TITLE_PLACEHOLDER: &str = "__TEMPLATE_TITLE__";
pub const GRID_PLACEHOLDER: &str = "__TEMPLATE_MOVIE_GRID__";

/// Where to read the template, where to write the page and what to call it.
#[derive(Debug, Clone)]
pub struct WebsiteGenerator {
    pub template_path: PathBuf,
    pub output_path: PathBuf,
    pub site_title: String,
}

impl WebsiteGenerator {
    pub fn from_config(config: &Config) -> Self {
        WebsiteGenerator {
            template_path: config.template_path.clone(),
            output_path: config.site_output.clone(),
            site_title: config.site_title.clone(),
        }
    }

    /// Re-render the page from the current store contents. Returns the path
    /// written.
    pub fn build(&self, store: &MovieStore) -> Result<PathBuf> {
        let template = std::fs::read_to_string(&self.template_path)?;
        let movies = store.list()?;
        let html = render(&template, &self.site_title, &movies);

        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.output_path, html)?;
        debug!(path = %self.output_path.display(), movies = movies.len(), "website written");
        Ok(self.output_path.clone())
    }
}

/// Substitute both placeholders. No IO.
pub fn render(template: &str, site_title: &str, movies: &[Movie]) -> String {
    let grid: String = movies.iter().map(serialize_movie).collect();
    template
        .replace(TITLE_PLACEHOLDER, &escape_html(site_title))
        .replace(GRID_PLACEHOLDER, &grid)
}

pub fn serialize_movie(movie: &Movie) -> String {
    format!(
        r#"<li>
    <div class="movie">
        <img class="movie-poster"
             src="{}"/>
        <div class="movie-title">{}</div>
        <div class="movie-year">{}</div>
    </div>
</li>
"#,
        escape_html(&movie.poster),
        escape_html(&movie.title),
        movie.year
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
