mod error;
mod ports;
mod service;
mod use_cases;

pub use error::ApplicationError;
pub use ports::{Clock, EncodedThumbnail, StoredFile, ThumbnailEncoder, ThumbnailStorage};
pub use service::ThumbnailService;
pub use use_cases::{
    DiscardThumbnailCommand, GenerateThumbnailCommand, LocateThumbnailQuery, StorageStatsQuery,
    SweepThumbnailsCommand,
};
