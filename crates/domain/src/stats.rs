use serde::{Deserialize, Serialize};

pub const BYTES_PER_MEGABYTE: u64 = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageStats {
    pub count: usize,
    pub total_bytes: u64,
    /// Megabytes rounded to two decimals, kept as display text.
    pub total_megabytes: String,
}

impl StorageStats {
    pub fn from_sizes(sizes: impl IntoIterator<Item = u64>) -> Self {
        let (count, total_bytes) = sizes
            .into_iter()
            .fold((0_usize, 0_u64), |(count, total), size| {
                (count + 1, total.saturating_add(size))
            });
        Self {
            count,
            total_bytes,
            total_megabytes: format_megabytes(total_bytes),
        }
    }
}

impl Default for StorageStats {
    fn default() -> Self {
        Self::from_sizes(std::iter::empty())
    }
}

fn format_megabytes(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / BYTES_PER_MEGABYTE as f64)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepReport {
    pub deleted: usize,
    pub failed: usize,
    pub max_age_days: u32,
    /// Entries modified strictly before this unix timestamp were eligible.
    pub cutoff_unix_secs: u64,
}
