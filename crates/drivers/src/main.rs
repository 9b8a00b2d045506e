mod config;
mod logging;

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use caption_thumbs_adapters::{
    present_generated, present_located, present_stats, present_sweep, FsThumbnailStorage,
    ImageCrateThumbnailEncoder, SystemClock,
};
use caption_thumbs_application::{
    ApplicationError, DiscardThumbnailCommand, GenerateThumbnailCommand, LocateThumbnailQuery,
    StorageStatsQuery, SweepThumbnailsCommand, ThumbnailService,
};
use caption_thumbs_domain::ThumbnailBounds;
use clap::{Parser, Subcommand};
use config::AppConfig;
use tracing::debug;

/// Thumbnail store for caption previews.
#[derive(Parser, Debug)]
#[command(name = "caption-thumbs", version)]
struct Cli {
    /// Base data directory; thumbnails live in its `thumbnails` subdirectory
    #[arg(long, global = true)]
    data_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum Command {
    /// Build a thumbnail from base64 or data-URL text
    Generate {
        query_id: String,
        /// File holding the encoded image; stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Print the thumbnail path for a query id
    Locate { query_id: String },
    /// Delete every stored file older than the age limit
    Sweep {
        #[arg(long)]
        max_age_days: Option<u32>,
    },
    /// Count stored files and their total size
    Stats,
    /// Delete the thumbnail for a query id
    Discard { query_id: String },
}

#[derive(Debug, Clone)]
enum CommandError {
    Usage(String),
    Runtime(String),
}

impl From<ApplicationError> for CommandError {
    fn from(error: ApplicationError) -> Self {
        match error {
            ApplicationError::Domain(_) | ApplicationError::InvalidInput(_) => {
                Self::Usage(error.to_string())
            }
            other => Self::Runtime(other.to_string()),
        }
    }
}

fn main() -> ExitCode {
    logging::init_logging();
    let cli = Cli::parse();

    let mut config = AppConfig::from_env();
    if let Some(data_path) = cli.data_path {
        config.data_path = data_path;
    }
    debug!(?config, "configuration resolved");

    let result = build_thumbnail_service(&config)
        .map_err(CommandError::from)
        .and_then(|service| run_command(cli.command, &service, &config));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(CommandError::Usage(msg)) => {
            eprintln!("{msg}");
            ExitCode::from(2)
        }
        Err(CommandError::Runtime(msg)) => {
            eprintln!("{msg}");
            ExitCode::from(1)
        }
    }
}

fn build_thumbnail_service(config: &AppConfig) -> Result<ThumbnailService, ApplicationError> {
    let bounds = ThumbnailBounds::square(config.max_dimension)?;
    Ok(ThumbnailService::new(
        Box::new(ImageCrateThumbnailEncoder::new(config.quality)),
        Box::new(FsThumbnailStorage::open(config.storage_root())?),
        Box::new(SystemClock),
        bounds,
    ))
}

fn run_command(
    command: Command,
    service: &ThumbnailService,
    config: &AppConfig,
) -> Result<(), CommandError> {
    match command {
        Command::Generate { query_id, input } => {
            let encoded_image = read_encoded_image(input)?;
            let thumbnail = service.generate(GenerateThumbnailCommand {
                encoded_image,
                query_id,
            })?;
            println!("{}", present_generated(&thumbnail)?);
        }
        Command::Locate { query_id } => {
            let path = service.locate(LocateThumbnailQuery {
                query_id: query_id.clone(),
            })?;
            let rendered = present_located(&query_id, path.as_deref());
            if path.is_none() {
                return Err(CommandError::Runtime(rendered));
            }
            println!("{rendered}");
        }
        Command::Sweep { max_age_days } => {
            let report = service.sweep(SweepThumbnailsCommand {
                max_age_days: max_age_days.unwrap_or(config.max_age_days),
            })?;
            println!("{}", present_sweep(&report)?);
        }
        Command::Stats => {
            let stats = service.stats(StorageStatsQuery)?;
            println!("{}", present_stats(&stats)?);
        }
        Command::Discard { query_id } => {
            let removed = service.discard(DiscardThumbnailCommand {
                query_id: query_id.clone(),
            })?;
            if removed {
                println!("discarded thumbnail for query {query_id}");
            } else {
                println!("no thumbnail for query {query_id}");
            }
        }
    }
    Ok(())
}

fn read_encoded_image(input: Option<PathBuf>) -> Result<String, CommandError> {
    match input {
        Some(path) => std::fs::read_to_string(&path).map_err(|error| {
            CommandError::Runtime(format!("cannot read {}: {error}", path.display()))
        }),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|error| CommandError::Runtime(format!("cannot read stdin: {error}")))?;
            Ok(buffer)
        }
    }
}
