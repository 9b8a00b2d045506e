mod bounds;
mod error;
mod payload;
mod query;
mod stats;
mod thumbnail;

pub use bounds::ThumbnailBounds;
pub use error::DomainError;
pub use payload::ImagePayload;
pub use query::{QueryId, ThumbnailName, THUMBNAIL_SUFFIX};
pub use stats::{StorageStats, SweepReport, BYTES_PER_MEGABYTE};
pub use thumbnail::{GeneratedThumbnail, STORAGE_SEGMENT};
