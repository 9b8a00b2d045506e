pub mod codec;
pub mod fs;
pub mod presenters;

pub use codec::ImageCrateThumbnailEncoder;
pub use fs::{FsThumbnailStorage, SystemClock};
pub use presenters::{present_generated, present_located, present_stats, present_sweep};

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::time::{Duration, SystemTime};

    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use caption_thumbs_application::{
        GenerateThumbnailCommand, LocateThumbnailQuery, StorageStatsQuery, SweepThumbnailsCommand,
        ThumbnailService,
    };
    use caption_thumbs_domain::{StorageStats, ThumbnailBounds};
    use filetime::FileTime;
    use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
    use tempfile::TempDir;

    use super::*;

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    fn service_at(root: &std::path::Path) -> ThumbnailService {
        ThumbnailService::new(
            Box::new(ImageCrateThumbnailEncoder::default()),
            Box::new(FsThumbnailStorage::open(root).expect("open storage")),
            Box::new(SystemClock),
            ThumbnailBounds::default(),
        )
    }

    fn png_data_url(width: u32, height: u32) -> String {
        let img = ImageBuffer::from_fn(width, height, |x, _y| Rgb([(x % 256) as u8, 40, 90]));
        let mut png = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .expect("png");
        format!("data:image/png;base64,{}", STANDARD.encode(png))
    }

    fn backdate(path: &std::path::Path, age: Duration) {
        let mtime = FileTime::from_system_time(SystemTime::now() - age);
        filetime::set_file_mtime(path, mtime).expect("set mtime");
    }

    #[test]
    fn generate_then_locate_on_disk() {
        let dir = TempDir::new().expect("tempdir");
        let service = service_at(&dir.path().join("thumbnails"));

        let thumb = service
            .generate(GenerateThumbnailCommand {
                encoded_image: png_data_url(640, 480),
                query_id: "caption-7".to_string(),
            })
            .expect("generate should work");

        assert_eq!(thumb.file_name, "caption-7_thumb.jpg");
        assert_eq!(thumb.relative_path, "caption-7_thumb.jpg");
        assert!(thumb.absolute_path.is_file());
        let written = image::open(&thumb.absolute_path).expect("open thumbnail");
        assert_eq!((written.width(), written.height()), (200, 150));

        let located = service
            .locate(LocateThumbnailQuery {
                query_id: "caption-7".to_string(),
            })
            .expect("locate should work");
        assert_eq!(located, Some(thumb.absolute_path));
    }

    #[test]
    fn failed_generate_leaves_no_file() {
        let dir = TempDir::new().expect("tempdir");
        let service = service_at(dir.path());

        let result = service.generate(GenerateThumbnailCommand {
            encoded_image: "data:image/png;base64,bm90IGFuIGltYWdl".to_string(),
            query_id: "broken".to_string(),
        });

        assert!(result.is_err());
        assert_eq!(
            service.stats(StorageStatsQuery).expect("stats"),
            StorageStats::default()
        );
    }

    #[test]
    fn sweep_keeps_only_recent_files() {
        let dir = TempDir::new().expect("tempdir");
        let service = service_at(dir.path());
        for (name, age) in [
            ("day0_thumb.jpg", Duration::ZERO),
            ("day29_thumb.jpg", DAY * 29),
            ("day31_thumb.jpg", DAY * 31),
            ("day100.log", DAY * 100),
        ] {
            let path = dir.path().join(name);
            std::fs::write(&path, b"x").expect("write");
            backdate(&path, age);
        }

        let report = service
            .sweep(SweepThumbnailsCommand::default())
            .expect("sweep should work");

        assert_eq!(report.deleted, 2);
        assert!(dir.path().join("day0_thumb.jpg").exists());
        assert!(dir.path().join("day29_thumb.jpg").exists());
        assert!(!dir.path().join("day31_thumb.jpg").exists());
        assert!(!dir.path().join("day100.log").exists());
    }

    #[test]
    fn stats_count_bytes_on_disk() {
        let dir = TempDir::new().expect("tempdir");
        let service = service_at(dir.path());
        assert_eq!(
            service.stats(StorageStatsQuery).expect("stats"),
            StorageStats::default()
        );

        std::fs::write(dir.path().join("a_thumb.jpg"), vec![0_u8; 1_000_000]).expect("write");
        std::fs::write(dir.path().join("b_thumb.jpg"), vec![0_u8; 2_097_152]).expect("write");

        let stats = service.stats(StorageStatsQuery).expect("stats");
        assert_eq!(stats.count, 2);
        assert_eq!(stats.total_bytes, 3_097_152);
        assert_eq!(stats.total_megabytes, "2.95");
    }
}
