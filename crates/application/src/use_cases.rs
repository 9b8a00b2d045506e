#[derive(Debug, Clone)]
pub struct GenerateThumbnailCommand {
    pub encoded_image: String,
    pub query_id: String,
}

#[derive(Debug, Clone)]
pub struct LocateThumbnailQuery {
    pub query_id: String,
}

#[derive(Debug, Clone, Copy)]
pub struct SweepThumbnailsCommand {
    pub max_age_days: u32,
}

impl SweepThumbnailsCommand {
    pub const DEFAULT_MAX_AGE_DAYS: u32 = 30;
}

impl Default for SweepThumbnailsCommand {
    fn default() -> Self {
        Self {
            max_age_days: Self::DEFAULT_MAX_AGE_DAYS,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StorageStatsQuery;

#[derive(Debug, Clone)]
pub struct DiscardThumbnailCommand {
    pub query_id: String,
}
