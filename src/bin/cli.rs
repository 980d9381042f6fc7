//! MovieDB CLI
//!
//! Command-line interface over a MovieDB collection file.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use moviedb::command::{Command, Response};
use moviedb::{Config, Engine, MovieError};
use tracing_subscriber::{fmt, EnvFilter};

/// MovieDB CLI
#[derive(Parser, Debug)]
#[command(name = "moviedb-cli")]
#[command(about = "Query and edit a JSON movie catalogue")]
#[command(version)]
struct Args {
    /// Collection file
    #[arg(short, long, env = "DATA_PATH", default_value = "./data/movies.json")]
    data_path: PathBuf,

    /// Allow creating records whose id is already taken
    #[arg(long)]
    allow_duplicate_ids: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create an empty collection file if none exists
    Init,

    /// List every movie
    List,

    /// Get a movie by id
    Get {
        /// The movie id
        id: String,
    },

    /// Movies released in a year
    Year {
        year: String,
    },

    /// Movies released between two years, inclusive
    Range {
        from: String,
        to: String,
    },

    /// Movies at least this many minutes long
    MinDuration {
        minutes: String,
    },

    /// Movies whose title contains TITLE (any case) released in YEAR
    Search {
        title: String,
        year: String,
    },

    /// Movies rated at or above RATING
    MinRating {
        rating: String,
    },

    /// Movies rated at or below RATING
    MaxRating {
        rating: String,
    },

    /// Movies at or above the top-rated threshold
    Top,

    /// Movies at or below the low-rated threshold
    Low,

    /// Collection summary
    Metrics,

    /// Append a movie given as a JSON object
    Create {
        json: String,
    },

    /// Merge a JSON object of fields onto a movie
    Update {
        id: String,
        json: String,
    },

    /// Delete a movie by id
    Delete {
        id: String,
    },
}

fn main() {
    // Logs go to stderr; stdout carries only JSON
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,moviedb=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), MovieError> {
    tracing::debug!("MovieDB CLI v{}", moviedb::VERSION);

    let config = Config::builder()
        .data_path(&args.data_path)
        .enforce_unique_ids(!args.allow_duplicate_ids)
        .create_if_missing(matches!(args.command, Commands::Init))
        .build();

    let engine = Engine::open(config)?;

    match to_command(args.command)? {
        Some(command) => print_response(&engine.execute(command)?),
        None => {
            tracing::info!("collection ready at {}", engine.data_path().display());
            Ok(())
        }
    }
}

/// Map a subcommand onto an engine command; `None` for `init`, which is
/// fully handled by opening the engine
fn to_command(command: Commands) -> Result<Option<Command>, MovieError> {
    let command = match command {
        Commands::Init => return Ok(None),
        Commands::List => Command::All,
        Commands::Get { id } => Command::Get { id },
        Commands::Year { year } => Command::ByYear { year },
        Commands::Range { from, to } => Command::ByYearRange { from, to },
        Commands::MinDuration { minutes } => Command::ByMinDuration { minutes },
        Commands::Search { title, year } => Command::ByTitleAndYear { title, year },
        Commands::MinRating { rating } => Command::ByMinRating { rating },
        Commands::MaxRating { rating } => Command::ByMaxRating { rating },
        Commands::Top => Command::TopRated,
        Commands::Low => Command::LowRated,
        Commands::Metrics => Command::Metrics,
        Commands::Create { json } => Command::Create {
            movie: serde_json::from_str(&json)?,
        },
        Commands::Update { id, json } => Command::Update {
            id,
            patch: serde_json::from_str(&json)?,
        },
        Commands::Delete { id } => Command::Delete { id },
    };
    Ok(Some(command))
}

fn print_response(response: &Response) -> Result<(), MovieError> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(())
}
