use std::path::Path;

use caption_thumbs_application::ApplicationError;
use caption_thumbs_domain::{GeneratedThumbnail, StorageStats, SweepReport};
use serde::Serialize;

pub fn present_generated(thumbnail: &GeneratedThumbnail) -> Result<String, ApplicationError> {
    to_json(thumbnail)
}

pub fn present_stats(stats: &StorageStats) -> Result<String, ApplicationError> {
    to_json(stats)
}

pub fn present_sweep(report: &SweepReport) -> Result<String, ApplicationError> {
    to_json(report)
}

pub fn present_located(query_id: &str, path: Option<&Path>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => format!("no thumbnail for query {query_id}"),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApplicationError> {
    serde_json::to_string_pretty(value).map_err(|error| ApplicationError::Encode(error.to_string()))
}
