use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use caption_thumbs_application::{ApplicationError, EncodedThumbnail, ThumbnailEncoder};
use caption_thumbs_domain::{ImagePayload, ThumbnailBounds};
use image::DynamicImage;
use jpeg_encoder::{ColorType, Encoder};

/// Browsers are not consistent about padding on data URLs.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decodes with the `image` crate and writes progressive JPEG.
#[derive(Debug, Clone, Copy)]
pub struct ImageCrateThumbnailEncoder {
    quality: u8,
}

impl ImageCrateThumbnailEncoder {
    pub const DEFAULT_QUALITY: u8 = 80;

    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }
}

impl Default for ImageCrateThumbnailEncoder {
    fn default() -> Self {
        Self::new(Self::DEFAULT_QUALITY)
    }
}

impl ThumbnailEncoder for ImageCrateThumbnailEncoder {
    fn encode_thumbnail(
        &self,
        payload: ImagePayload<'_>,
        bounds: ThumbnailBounds,
    ) -> Result<EncodedThumbnail, ApplicationError> {
        let source = decode_payload(payload)?;
        let (width, height) = bounds.fit(source.width(), source.height());
        let resized = if (width, height) == (source.width(), source.height()) {
            source
        } else {
            source.thumbnail_exact(width, height)
        };

        let bytes = encode_progressive_jpeg(&resized, self.quality)?;
        Ok(EncodedThumbnail {
            bytes,
            width,
            height,
        })
    }
}

fn decode_payload(payload: ImagePayload<'_>) -> Result<DynamicImage, ApplicationError> {
    let compact: String = payload
        .encoded()
        .chars()
        .filter(|ch| !ch.is_ascii_whitespace())
        .collect();
    let raw = PAYLOAD_ENGINE
        .decode(compact)
        .map_err(|error| ApplicationError::Decode(format!("invalid base64 payload: {error}")))?;
    image::load_from_memory(&raw).map_err(|error| ApplicationError::Decode(error.to_string()))
}

fn encode_progressive_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, ApplicationError> {
    let too_large = || {
        ApplicationError::Encode(format!(
            "{}x{} exceeds the JPEG size limit",
            image.width(),
            image.height()
        ))
    };
    let width = u16::try_from(image.width()).map_err(|_| too_large())?;
    let height = u16::try_from(image.height()).map_err(|_| too_large())?;

    let rgb = image.to_rgb8();
    let mut bytes = Vec::new();
    let mut encoder = Encoder::new(&mut bytes, quality);
    encoder.set_progressive(true);
    encoder
        .encode(rgb.as_raw(), width, height, ColorType::Rgb)
        .map_err(|error| ApplicationError::Encode(error.to_string()))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use base64::engine::general_purpose::STANDARD;
    use image::{ImageBuffer, ImageFormat, Rgb};

    use super::*;

    fn png_base64(width: u32, height: u32) -> String {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128_u8])
        });
        let mut png = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .expect("png");
        STANDARD.encode(png)
    }

    fn encode(raw: &str) -> Result<EncodedThumbnail, ApplicationError> {
        let payload = ImagePayload::parse(raw).expect("payload");
        ImageCrateThumbnailEncoder::default().encode_thumbnail(payload, ThumbnailBounds::default())
    }

    #[test]
    fn shrinks_large_image_keeping_aspect() {
        let out = encode(&png_base64(500, 300)).expect("thumbnail");

        assert_eq!((out.width, out.height), (200, 120));
        let decoded = image::load_from_memory(&out.bytes).expect("decode jpeg");
        assert_eq!((decoded.width(), decoded.height()), (200, 120));
    }

    #[test]
    fn keeps_small_image_size() {
        let out = encode(&png_base64(64, 48)).expect("thumbnail");

        let decoded = image::load_from_memory(&out.bytes).expect("decode jpeg");
        assert_eq!((decoded.width(), decoded.height()), (64, 48));
    }

    #[test]
    fn writes_progressive_jpeg() {
        let out = encode(&png_base64(300, 300)).expect("thumbnail");

        assert_eq!(&out.bytes[..2], &[0xFF, 0xD8]);
        let has_progressive_frame = out.bytes.windows(2).any(|pair| pair == [0xFF, 0xC2]);
        assert!(has_progressive_frame);
    }

    #[test]
    fn data_url_and_bare_payload_encode_identically() {
        let bare = png_base64(320, 240);
        let data_url = format!("data:image/png;base64,{bare}");

        let from_bare = encode(&bare).expect("thumbnail");
        let from_data_url = encode(&data_url).expect("thumbnail");

        assert_eq!(from_bare.bytes, from_data_url.bytes);
    }

    #[test]
    fn tolerates_missing_padding_and_line_breaks() {
        let encoded = png_base64(20, 20);
        let unpadded = encoded.trim_end_matches('=');
        let (head, tail) = unpadded.split_at(unpadded.len() / 2);

        let out = encode(&format!("{head}\n{tail}")).expect("thumbnail");

        assert_eq!((out.width, out.height), (20, 20));
    }

    #[test]
    fn rejects_invalid_base64() {
        let result = encode("data:image/png;base64,@@@not-base64@@@");
        assert!(matches!(result, Err(ApplicationError::Decode(_))));
    }

    #[test]
    fn accepts_gif_data_url() {
        let out = encode(
            "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAICRAEAOw==",
        )
        .expect("thumbnail");

        assert_eq!((out.width, out.height), (1, 1));
        assert!(image::load_from_memory(&out.bytes).is_ok());
    }

    #[test]
    fn accepts_bmp_and_tiff_payloads() {
        for format in [ImageFormat::Bmp, ImageFormat::Tiff] {
            let img = ImageBuffer::from_fn(400, 100, |x, _y| Rgb([(x % 256) as u8, 10, 200]));
            let mut raw = Vec::new();
            DynamicImage::ImageRgb8(img)
                .write_to(&mut Cursor::new(&mut raw), format)
                .expect("source image");

            let out = encode(&STANDARD.encode(raw)).expect("thumbnail");

            assert_eq!((out.width, out.height), (200, 50), "{format:?}");
        }
    }

    #[test]
    fn rejects_non_image_bytes() {
        let result = encode(&STANDARD.encode(b"just some text"));
        assert!(matches!(result, Err(ApplicationError::Decode(_))));
    }

    #[test]
    fn quality_is_clamped() {
        assert_eq!(ImageCrateThumbnailEncoder::new(0).quality(), 1);
        assert_eq!(ImageCrateThumbnailEncoder::new(255).quality(), 100);
    }
}
