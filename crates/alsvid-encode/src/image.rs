//! Image shape analysis and channel access.

use ndarray::{ArrayD, Axis};

use crate::error::{EncodeError, EncodeResult};

/// A classical pixel array, caller-owned and read-only here.
///
/// 2-D arrays are grayscale; 3-D arrays are channel-last. Values are
/// conventionally in `[0, 1]`.
pub type PixelArray = ArrayD<f64>;

/// The interpreted layout of a pixel array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageLayout {
    /// A single-channel `height × width` image.
    Gray { height: usize, width: usize },
    /// A `height × width × 3` RGB image.
    Rgb { height: usize, width: usize },
    /// A `height × width × channels` image with a generic channel count.
    Multi {
        height: usize,
        width: usize,
        channels: usize,
    },
}

impl ImageLayout {
    /// Classify a pixel array by rank and channel count.
    ///
    /// Rank 2 is grayscale; rank 3 with a trailing dimension of 1 collapses
    /// to grayscale, 3 is RGB, anything else is generic multi-channel. Other
    /// ranks are rejected.
    pub fn of(image: &PixelArray) -> EncodeResult<Self> {
        match image.shape() {
            [height, width] => Ok(Self::Gray {
                height: *height,
                width: *width,
            }),
            [height, width, 1] => Ok(Self::Gray {
                height: *height,
                width: *width,
            }),
            [height, width, 3] => Ok(Self::Rgb {
                height: *height,
                width: *width,
            }),
            [height, width, channels] => Ok(Self::Multi {
                height: *height,
                width: *width,
                channels: *channels,
            }),
            shape => Err(EncodeError::InvalidShape { ndim: shape.len() }),
        }
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        match *self {
            Self::Gray { height, .. } | Self::Rgb { height, .. } | Self::Multi { height, .. } => {
                height
            }
        }
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        match *self {
            Self::Gray { width, .. } | Self::Rgb { width, .. } | Self::Multi { width, .. } => width,
        }
    }

    /// Number of pixel positions per channel.
    pub fn num_pixels(&self) -> usize {
        self.height() * self.width()
    }

    /// Number of color channels.
    pub fn num_channels(&self) -> usize {
        match *self {
            Self::Gray { .. } => 1,
            Self::Rgb { .. } => 3,
            Self::Multi { channels, .. } => channels,
        }
    }

    /// Whether the image is square.
    pub fn is_square(&self) -> bool {
        self.height() == self.width()
    }
}

/// Row-major pixel scan of one channel.
///
/// Scan order is raster order: pixel `i` sits at row `i / width`, column
/// `i % width`.
pub fn channel_pixels(image: &PixelArray, channel: usize) -> Vec<f64> {
    if image.ndim() == 2 {
        image.iter().copied().collect()
    } else {
        image
            .index_axis(Axis(2), channel)
            .iter()
            .copied()
            .collect()
    }
}
