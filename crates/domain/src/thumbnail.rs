use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Directory under the data path that holds every thumbnail.
pub const STORAGE_SEGMENT: &str = "thumbnails";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedThumbnail {
    pub file_name: String,
    pub absolute_path: PathBuf,
    /// Relative to the storage root, safe to hand to clients.
    pub relative_path: String,
    pub width: u32,
    pub height: u32,
    pub bytes: u64,
}

impl GeneratedThumbnail {
    pub fn relative_path_for(root: &Path, absolute_path: &Path) -> String {
        absolute_path
            .strip_prefix(root)
            .unwrap_or(absolute_path)
            .to_string_lossy()
            .into_owned()
    }
}
