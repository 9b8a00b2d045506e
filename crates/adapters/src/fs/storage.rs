use std::fs;
use std::path::{Path, PathBuf};

use caption_thumbs_application::{ApplicationError, StoredFile, ThumbnailStorage};
use caption_thumbs_domain::ThumbnailName;
use tracing::debug;
use walkdir::WalkDir;

/// Thumbnails kept as plain files in one directory.
#[derive(Debug, Clone)]
pub struct FsThumbnailStorage {
    root: PathBuf,
}

impl FsThumbnailStorage {
    /// Creates `root` if needed and pins it as an absolute path.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, ApplicationError> {
        let root = root.into();
        if root.as_os_str().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "thumbnail storage root must not be empty".to_string(),
            ));
        }

        fs::create_dir_all(&root).map_err(|error| {
            ApplicationError::Io(format!("cannot create {}: {error}", root.display()))
        })?;
        let root = root
            .canonicalize()
            .map_err(|error| ApplicationError::Io(error.to_string()))?;

        debug!(root = %root.display(), "thumbnail storage ready");
        Ok(Self { root })
    }

    fn path_for(&self, name: &ThumbnailName) -> PathBuf {
        self.root.join(name.as_str())
    }
}

impl ThumbnailStorage for FsThumbnailStorage {
    fn root(&self) -> &Path {
        &self.root
    }

    fn write(&self, name: &ThumbnailName, bytes: &[u8]) -> Result<PathBuf, ApplicationError> {
        let path = self.path_for(name);
        fs::write(&path, bytes).map_err(|error| {
            ApplicationError::Io(format!("cannot write {}: {error}", path.display()))
        })?;
        Ok(path)
    }

    fn locate(&self, name: &ThumbnailName) -> Result<Option<PathBuf>, ApplicationError> {
        let path = self.path_for(name);
        Ok(path.is_file().then_some(path))
    }

    fn list_files(&self) -> Result<Vec<StoredFile>, ApplicationError> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) if error.depth() == 0 => {
                    return Err(ApplicationError::Io(error.to_string()));
                }
                Err(error) => {
                    // Usually an entry removed while we were listing.
                    debug!(%error, "skipping unreadable storage entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(error) => {
                    debug!(path = %entry.path().display(), %error, "skipping vanished entry");
                    continue;
                }
            };
            let modified = metadata
                .modified()
                .map_err(|error| ApplicationError::Io(error.to_string()))?;

            files.push(StoredFile {
                path: entry.into_path(),
                size: metadata.len(),
                modified,
            });
        }

        Ok(files)
    }

    fn remove(&self, path: &Path) -> Result<(), ApplicationError> {
        fs::remove_file(path).map_err(|error| {
            ApplicationError::Io(format!("cannot remove {}: {error}", path.display()))
        })
    }
}
