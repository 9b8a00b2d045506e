use std::path::{Path, PathBuf};
use std::time::SystemTime;

use caption_thumbs_domain::{ImagePayload, ThumbnailBounds, ThumbnailName};

use crate::ApplicationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedThumbnail {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Turns a text-encoded image into thumbnail-sized JPEG bytes.
pub trait ThumbnailEncoder {
    fn encode_thumbnail(
        &self,
        payload: ImagePayload<'_>,
        bounds: ThumbnailBounds,
    ) -> Result<EncodedThumbnail, ApplicationError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub path: PathBuf,
    pub size: u64,
    pub modified: SystemTime,
}

/// Flat directory of thumbnails. Implementations resolve names against a
/// single root fixed at construction.
pub trait ThumbnailStorage {
    fn root(&self) -> &Path;

    /// Writes `bytes` under `name`, replacing any previous file.
    fn write(&self, name: &ThumbnailName, bytes: &[u8]) -> Result<PathBuf, ApplicationError>;

    fn locate(&self, name: &ThumbnailName) -> Result<Option<PathBuf>, ApplicationError>;

    /// Regular files directly under the root, whatever their name.
    fn list_files(&self) -> Result<Vec<StoredFile>, ApplicationError>;

    fn remove(&self, path: &Path) -> Result<(), ApplicationError>;
}

pub trait Clock {
    fn now(&self) -> SystemTime;
}
