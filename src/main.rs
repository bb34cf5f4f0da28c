// Entrypoint for the CLI application.
// - Keeps `main` small: load config, open the store, build the API client
//   and hand everything to the menu loop.

use anyhow::Context;
use moviedb_cli::{
    api::OmdbClient, config::Config, logger, storage::MovieStore, ui, website::WebsiteGenerator,
};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    logger::init_cli_logger();

    config.validate().context("Startup check failed")?;

    let store = MovieStore::open(&config.db_path)
        .with_context(|| format!("Failed to open store at {}", config.db_path.display()))?;

    // Without an API key the app still runs; adding movies reports the
    // missing key instead.
    let api = match OmdbClient::from_config(&config) {
        Ok(client) => Some(client),
        Err(e) => {
            tracing::debug!(error = %e, "metadata lookups disabled");
            None
        }
    };

    let app = ui::App {
        store,
        api,
        website: WebsiteGenerator::from_config(&config),
    };

    ui::main_menu(&app)?;
    Ok(())
}
