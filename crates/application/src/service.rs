use std::path::PathBuf;
use std::time::{Duration, UNIX_EPOCH};

use caption_thumbs_domain::{
    GeneratedThumbnail, ImagePayload, QueryId, StorageStats, SweepReport, ThumbnailBounds,
};
use tracing::{debug, info, warn};

use crate::{
    ApplicationError, Clock, DiscardThumbnailCommand, GenerateThumbnailCommand,
    LocateThumbnailQuery, StorageStatsQuery, SweepThumbnailsCommand, ThumbnailEncoder,
    ThumbnailStorage,
};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

pub struct ThumbnailService {
    encoder: Box<dyn ThumbnailEncoder>,
    storage: Box<dyn ThumbnailStorage>,
    clock: Box<dyn Clock>,
    bounds: ThumbnailBounds,
}

impl ThumbnailService {
    pub fn new(
        encoder: Box<dyn ThumbnailEncoder>,
        storage: Box<dyn ThumbnailStorage>,
        clock: Box<dyn Clock>,
        bounds: ThumbnailBounds,
    ) -> Self {
        Self {
            encoder,
            storage,
            clock,
            bounds,
        }
    }

    pub fn bounds(&self) -> ThumbnailBounds {
        self.bounds
    }

    pub fn generate(
        &self,
        command: GenerateThumbnailCommand,
    ) -> Result<GeneratedThumbnail, ApplicationError> {
        self.try_generate(&command).inspect_err(|error| {
            warn!(query_id = %command.query_id, %error, "thumbnail generation failed");
        })
    }

    fn try_generate(
        &self,
        command: &GenerateThumbnailCommand,
    ) -> Result<GeneratedThumbnail, ApplicationError> {
        let query_id = QueryId::new(command.query_id.as_str())?;
        let payload = ImagePayload::parse(&command.encoded_image)?;

        let encoded = self.encoder.encode_thumbnail(payload, self.bounds)?;
        let name = query_id.thumbnail_name();
        let absolute_path = self.storage.write(&name, &encoded.bytes)?;

        let file_name = name.into_string();
        let thumbnail = GeneratedThumbnail {
            relative_path: GeneratedThumbnail::relative_path_for(
                self.storage.root(),
                &absolute_path,
            ),
            file_name,
            absolute_path,
            width: encoded.width,
            height: encoded.height,
            bytes: encoded.bytes.len() as u64,
        };

        info!(
            query_id = %query_id,
            path = %thumbnail.absolute_path.display(),
            width = thumbnail.width,
            height = thumbnail.height,
            "thumbnail generated"
        );
        Ok(thumbnail)
    }

    pub fn locate(&self, query: LocateThumbnailQuery) -> Result<Option<PathBuf>, ApplicationError> {
        let query_id = QueryId::new(query.query_id)?;
        self.storage.locate(&query_id.thumbnail_name())
    }

    pub fn sweep(&self, command: SweepThumbnailsCommand) -> Result<SweepReport, ApplicationError> {
        let max_age = Duration::from_secs(u64::from(command.max_age_days) * SECONDS_PER_DAY);
        let cutoff = self.clock.now().checked_sub(max_age).unwrap_or(UNIX_EPOCH);

        let files = self.storage.list_files().inspect_err(|error| {
            warn!(
                root = %self.storage.root().display(),
                %error,
                "thumbnail sweep could not list storage"
            );
        })?;

        let mut report = SweepReport {
            max_age_days: command.max_age_days,
            cutoff_unix_secs: cutoff
                .duration_since(UNIX_EPOCH)
                .map(|duration| duration.as_secs())
                .unwrap_or_default(),
            ..SweepReport::default()
        };

        for file in files.iter().filter(|file| file.modified < cutoff) {
            match self.storage.remove(&file.path) {
                Ok(()) => {
                    debug!(path = %file.path.display(), "removed expired thumbnail");
                    report.deleted += 1;
                }
                Err(error) => {
                    warn!(
                        path = %file.path.display(),
                        %error,
                        "failed to remove expired thumbnail"
                    );
                    report.failed += 1;
                }
            }
        }

        info!(
            deleted = report.deleted,
            failed = report.failed,
            max_age_days = command.max_age_days,
            "thumbnail sweep finished"
        );
        Ok(report)
    }

    pub fn stats(&self, _query: StorageStatsQuery) -> Result<StorageStats, ApplicationError> {
        let files = self.storage.list_files().inspect_err(|error| {
            warn!(
                root = %self.storage.root().display(),
                %error,
                "thumbnail stats could not list storage"
            );
        })?;
        Ok(StorageStats::from_sizes(files.iter().map(|file| file.size)))
    }

    pub fn discard(&self, command: DiscardThumbnailCommand) -> Result<bool, ApplicationError> {
        let query_id = QueryId::new(command.query_id)?;
        let Some(path) = self.storage.locate(&query_id.thumbnail_name())? else {
            return Ok(false);
        };
        self.storage.remove(&path)?;
        info!(query_id = %query_id, path = %path.display(), "thumbnail discarded");
        Ok(true)
    }
}
