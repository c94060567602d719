// src/main.rs

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use moviedeck::application::{commands, CreateMovieDto, ErrorResponse, MovieDto, UpdateMovieDto};
use moviedeck::config::{AppConfig, CliConfig, FileConfig};
use moviedeck::db::{get_connection, get_database_stats, verify_database_integrity};
use moviedeck::{
    create_connection_pool, register_audit_handlers, AppState, DataStatus, DocumentCollection,
    EventBus, Movie, MovieProvider, SqliteDocumentCollection,
};

#[derive(Parser, Debug)]
#[clap(name = "moviedeck", version, about = "Shared movie catalog")]
struct CliArgs {
    /// Path to a TOML config file.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Path to the SQLite database file.
    #[clap(long)]
    pub db: Option<PathBuf>,

    /// Name of the movie collection inside the database.
    #[clap(long)]
    pub collection: Option<String>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every movie in the catalog.
    List {
        /// Print JSON instead of one line per movie.
        #[clap(long)]
        json: bool,
    },

    /// Add a new movie.
    Add {
        #[clap(long)]
        title: String,
        #[clap(long)]
        genre: String,
        #[clap(long)]
        year: String,
    },

    /// Edit a movie; omitted fields keep their current value.
    Edit {
        id: String,
        #[clap(long)]
        title: Option<String>,
        #[clap(long)]
        genre: Option<String>,
        #[clap(long)]
        year: Option<String>,
    },

    /// Delete a movie by id.
    Delete { id: String },

    /// Print the catalog on every change until Ctrl-C.
    Watch,

    /// Check the database and print storage statistics.
    Stats,
}

/// Prints each snapshot delivered to the watch command
struct PrintingStatus;

impl DataStatus for PrintingStatus {
    fn on_data_updated(&self, movies: &[Movie]) {
        println!("--- {} movie(s) ---", movies.len());
        for movie in movies {
            println!("{}  {}", movie.id, movie);
        }
    }

    fn on_error(&self, error: &str) {
        eprintln!("Catalog error: {}", error);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to install log subscriber")?;

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let cli_config = CliConfig {
        database_path: cli_args.db.clone(),
        collection: cli_args.collection.clone(),
        poll_interval_ms: None,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    // 1. INFRASTRUCTURE
    log::debug!("Opening catalog database at {:?}", config.database_path);
    let pool = Arc::new(
        create_connection_pool(&config.database_path)
            .with_context(|| format!("Failed to open database {:?}", config.database_path))?,
    );
    let event_bus = Arc::new(EventBus::new());
    register_audit_handlers(&event_bus);

    // 2. COLLECTION
    let collection = Arc::new(SqliteDocumentCollection::open(
        Arc::clone(&pool),
        config.collection.clone(),
    )?);

    // 3. PROVIDER
    let movie_provider = Arc::new(MovieProvider::new(
        Arc::clone(&collection) as Arc<dyn DocumentCollection>,
        Arc::clone(&event_bus),
    ));
    let state = AppState::new(event_bus, movie_provider);

    match cli_args.command {
        Command::List { json } => {
            let movies = commands::list_movies(&state).await.map_err(command_error)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&movies)?);
            } else if movies.is_empty() {
                println!("No movies in '{}'", config.collection);
            } else {
                for movie in &movies {
                    print_movie(movie);
                }
            }
        }

        Command::Add { title, genre, year } => {
            let movie = commands::create_movie(CreateMovieDto { title, genre, year }, &state)
                .await
                .map_err(command_error)?;
            print!("Added: ");
            print_movie(&movie);
        }

        Command::Edit {
            id,
            title,
            genre,
            year,
        } => {
            let dto = UpdateMovieDto {
                id,
                title,
                genre,
                year,
            };
            let movie = commands::update_movie(dto, &state)
                .await
                .map_err(command_error)?;
            print!("Updated: ");
            print_movie(&movie);
        }

        Command::Delete { id } => {
            let movie = commands::delete_movie(&id, &state)
                .await
                .map_err(command_error)?;
            print!("Deleted: ");
            print_movie(&movie);
        }

        Command::Watch => {
            let mut poller = collection.start_change_polling(config.poll_interval)?;
            let listener = state
                .movie_provider
                .listen_for_updates(Arc::new(PrintingStatus));

            log::info!(
                "Watching collection '{}', press Ctrl-C to stop",
                config.collection
            );
            tokio::signal::ctrl_c()
                .await
                .context("Failed to listen for Ctrl-C")?;

            listener.stop();
            poller.stop();
        }

        Command::Stats => {
            let conn = get_connection(&pool)?;
            verify_database_integrity(&conn)?;
            let stats = get_database_stats(&conn)?;

            println!("Database:     {:?}", config.database_path);
            println!("Integrity:    ok");
            println!("Schema:       v{}", stats.schema_version);
            println!(
                "Size:         {} bytes ({} pages of {})",
                stats.size_bytes, stats.page_count, stats.page_size
            );
            println!("Documents:    {}", stats.document_count);
            println!("Collections:  {}", stats.collection_count);
        }
    }

    Ok(())
}

fn print_movie(movie: &MovieDto) {
    println!(
        "{}  {} ({}) - {}",
        movie.id, movie.title, movie.year, movie.genre
    );
}

/// Turn a command's JSON error back into a readable message
fn command_error(raw: String) -> anyhow::Error {
    match serde_json::from_str::<ErrorResponse>(&raw) {
        Ok(response) => match response.details {
            Some(details) => anyhow!("{} ({})", response.message, details),
            None => anyhow!(response.message),
        },
        Err(_) => anyhow!(raw),
    }
}
