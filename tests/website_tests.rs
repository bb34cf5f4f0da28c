use moviedb_cli::website::WebsiteGenerator;
use moviedb_cli::{Movie, MovieStore};
use std::path::PathBuf;
use tempfile::TempDir;

const TEMPLATE: &str = r#"<html><head><title>__TEMPLATE_TITLE__</title></head>
<body><h1>__TEMPLATE_TITLE__</h1><ol class="movie-grid">__TEMPLATE_MOVIE_GRID__</ol></body></html>"#;

fn setup() -> (TempDir, MovieStore, WebsiteGenerator) {
    let dir = TempDir::new().unwrap();
    let template_path = dir.path().join("index_template.html");
    std::fs::write(&template_path, TEMPLATE).unwrap();
    let store = MovieStore::open(dir.path().join("movies.db")).unwrap();
    let website = WebsiteGenerator {
        template_path,
        output_path: dir.path().join("site").join("index.html"),
        site_title: "Movie App".into(),
    };
    (dir, store, website)
}

#[test]
fn empty_store_gives_empty_grid() {
    let (_dir, store, website) = setup();
    let path = website.build(&store).unwrap();

    let html = std::fs::read_to_string(path).unwrap();
    assert_eq!(
        html,
        TEMPLATE
            .replace("__TEMPLATE_TITLE__", "Movie App")
            .replace("__TEMPLATE_MOVIE_GRID__", "")
    );
    assert!(!html.contains("__TEMPLATE_"));
}

#[test]
fn build_reflects_current_store() {
    let (_dir, store, website) = setup();
    store
        .add(&Movie::new("Alien", 1979, 8.5, "https://img/alien.jpg"))
        .unwrap();
    store
        .add(&Movie::new("Heat", 1995, 8.3, "https://img/heat.jpg"))
        .unwrap();

    let html = std::fs::read_to_string(website.build(&store).unwrap()).unwrap();
    assert_eq!(html.matches("<li>").count(), 2);
    assert!(html.contains("Alien"));

    store.delete("Alien").unwrap();
    let html = std::fs::read_to_string(website.build(&store).unwrap()).unwrap();
    assert_eq!(html.matches("<li>").count(), 1);
    assert!(!html.contains("Alien"));
}

#[test]
fn missing_template_is_an_error() {
    let (dir, store, mut website) = setup();
    website.template_path = dir.path().join("nope.html");
    assert!(website.build(&store).is_err());
}

#[test]
fn shipped_template_has_both_placeholders() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates/index_template.html");
    let template = std::fs::read_to_string(path).unwrap();
    assert!(template.contains("__TEMPLATE_TITLE__"));
    assert!(template.contains("__TEMPLATE_MOVIE_GRID__"));
}
