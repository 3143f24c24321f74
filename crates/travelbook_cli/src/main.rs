//! TravelBook command-line host.
//!
//! # Responsibility
//! - Drive the place store without a UI: add, list and show saved places.
//! - Provide `ping` / `version` probes to verify `travelbook_core` linkage.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use travelbook_core::config::resolve_db_path;
use travelbook_core::{Coordinate, PlaceId, PlaceService, SqlitePlaceRepository};

#[derive(Parser, Debug)]
#[command(name = "travelbook")]
#[command(about = "Saved places with a title, a comment and a map pin", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Place store file (default: $TRAVELBOOK_DB_PATH or the temp directory)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Check core linkage
    Ping,

    /// Print the core version
    Version,

    /// Save a new place
    Add {
        /// Place name
        title: String,

        /// Free-form comment
        comment: String,

        /// Latitude in degrees
        #[arg(allow_negative_numbers = true)]
        latitude: f64,

        /// Longitude in degrees
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },

    /// List saved places in insertion order
    List,

    /// Show one saved place
    Show {
        /// Place ID
        id: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ping => println!("travelbook_core ping={}", travelbook_core::ping()),
        Commands::Version => {
            println!("travelbook_core version={}", travelbook_core::core_version())
        }
        Commands::Add {
            title,
            comment,
            latitude,
            longitude,
        } => {
            let service = open_service(cli.db)?;
            let id = service
                .create_place(title, comment, Coordinate::new(latitude, longitude))
                .context("failed to save place")?;
            println!("{id}");
        }
        Commands::List => {
            let service = open_service(cli.db)?;
            let places = service
                .fetch_all_places()
                .context("failed to list places")?;
            for place in places {
                println!("{}\t{}\t{}", place.id, place.title, place.subtitle);
            }
        }
        Commands::Show { id } => {
            let service = open_service(cli.db)?;
            let id = parse_place_id(&id)?;
            let Some(place) = service.fetch_place(id).context("failed to load place")? else {
                bail!("no place with id {id}");
            };
            println!("title: {}", place.title);
            println!("comment: {}", place.subtitle);
            println!(
                "coordinate: {}, {}",
                place.coordinate.latitude, place.coordinate.longitude
            );
        }
    }

    Ok(())
}

fn open_service(db: Option<PathBuf>) -> Result<PlaceService<SqlitePlaceRepository>> {
    let path = db.unwrap_or_else(resolve_db_path);
    let repo = SqlitePlaceRepository::open(&path)
        .with_context(|| format!("failed to open place store at {}", path.display()))?;
    Ok(PlaceService::new(repo))
}

fn parse_place_id(raw: &str) -> Result<PlaceId> {
    PlaceId::parse_str(raw.trim()).with_context(|| format!("invalid place id `{raw}`"))
}
