use crate::DomainError;

/// Box a thumbnail must fit inside. Images are scaled down to fit, keeping
/// their aspect ratio, and are never scaled up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailBounds {
    max_width: u32,
    max_height: u32,
}

impl ThumbnailBounds {
    pub const DEFAULT_MAX_SIDE: u32 = 200;

    pub fn new(max_width: u32, max_height: u32) -> Result<Self, DomainError> {
        if max_width == 0 || max_height == 0 {
            return Err(DomainError::ZeroBounds {
                width: max_width,
                height: max_height,
            });
        }
        Ok(Self {
            max_width,
            max_height,
        })
    }

    pub fn square(max_side: u32) -> Result<Self, DomainError> {
        Self::new(max_side, max_side)
    }

    pub fn max_width(self) -> u32 {
        self.max_width
    }

    pub fn max_height(self) -> u32 {
        self.max_height
    }

    pub fn contains(self, width: u32, height: u32) -> bool {
        width <= self.max_width && height <= self.max_height
    }

    /// Target dimensions for a `width` x `height` source.
    pub fn fit(self, width: u32, height: u32) -> (u32, u32) {
        if width == 0 || height == 0 || self.contains(width, height) {
            return (width, height);
        }

        let (w, h) = (u64::from(width), u64::from(height));
        let (max_w, max_h) = (u64::from(self.max_width), u64::from(self.max_height));

        // Compare max_w / w against max_h / h without floating point.
        let (fit_w, fit_h) = if max_w * h <= max_h * w {
            (max_w, rounded_div(h * max_w, w))
        } else {
            (rounded_div(w * max_h, h), max_h)
        };

        (fit_w.clamp(1, max_w) as u32, fit_h.clamp(1, max_h) as u32)
    }
}

impl Default for ThumbnailBounds {
    fn default() -> Self {
        Self {
            max_width: Self::DEFAULT_MAX_SIDE,
            max_height: Self::DEFAULT_MAX_SIDE,
        }
    }
}

fn rounded_div(numerator: u64, denominator: u64) -> u64 {
    (numerator + denominator / 2) / denominator
}
