use std::path::PathBuf;

use caption_thumbs_adapters::ImageCrateThumbnailEncoder;
use caption_thumbs_application::SweepThumbnailsCommand;
use caption_thumbs_domain::{ThumbnailBounds, STORAGE_SEGMENT};
use tracing::warn;

pub const DATA_PATH_ENV: &str = "DATA_PATH";
pub const MAX_DIMENSION_ENV: &str = "THUMB_MAX_DIMENSION";
pub const QUALITY_ENV: &str = "THUMB_QUALITY";
pub const MAX_AGE_DAYS_ENV: &str = "THUMB_MAX_AGE_DAYS";

/// Resolved once in `main` and handed to whatever needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub max_dimension: u32,
    pub quality: u8,
    pub max_age_days: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("./data"),
            max_dimension: ThumbnailBounds::DEFAULT_MAX_SIDE,
            quality: ImageCrateThumbnailEncoder::DEFAULT_QUALITY,
            max_age_days: SweepThumbnailsCommand::DEFAULT_MAX_AGE_DAYS,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            data_path: lookup(DATA_PATH_ENV)
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            max_dimension: parse_or(&lookup, MAX_DIMENSION_ENV, defaults.max_dimension).max(1),
            quality: parse_or(&lookup, QUALITY_ENV, defaults.quality).clamp(1, 100),
            max_age_days: parse_or(&lookup, MAX_AGE_DAYS_ENV, defaults.max_age_days),
        }
    }

    pub fn storage_root(&self) -> PathBuf {
        self.data_path.join(STORAGE_SEGMENT)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    raw.trim().parse().unwrap_or_else(|_| {
        warn!(key, value = %raw, "ignoring unparsable setting");
        default
    })
}
