//! SIMD-accelerated frame resizing.
//!
//! Uses the fast_image_resize crate, which is several times faster than
//! the image crate's own resize and picks AVX2/NEON automatically.

use crate::error::LoadError;
use fast_image_resize::{images::Image, FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::{DynamicImage, GrayImage};
use std::path::Path;

/// Resizes decoded frames to the common comparison resolution.
///
/// The inner resizer caches SIMD lookup state, so one instance should be
/// reused across a whole run.
pub struct FrameResizer {
    resizer: Resizer,
}

impl FrameResizer {
    /// Create a new resizer
    pub fn new() -> Self {
        Self {
            resizer: Resizer::new(),
        }
    }

    /// Resize the frame decoded from `path` to `width` x `height` and
    /// convert it to grayscale.
    ///
    /// Aspect ratio is deliberately not preserved: every frame is
    /// stretched to exactly the common resolution so pixel positions
    /// line up for change detection. Failures carry `path`, so the run
    /// aborts naming the offending frame.
    pub fn resize_to_grayscale(
        &mut self,
        path: &Path,
        image: &DynamicImage,
        width: u32,
        height: u32,
    ) -> Result<GrayImage, LoadError> {
        // Grayscale first: resizing one channel is cheaper than three
        let gray = image.to_luma8();
        let (src_width, src_height) = gray.dimensions();

        if src_width == 0 || src_height == 0 {
            return Err(LoadError::EmptyFrame {
                path: path.to_path_buf(),
            });
        }

        let src = Image::from_vec_u8(src_width, src_height, gray.into_raw(), PixelType::U8)
            .map_err(|e| resize_failure(path, e))?;
        let mut dst = Image::new(width, height, PixelType::U8);

        // Bilinear keeps the operation deterministic and cheap; change
        // detection does not benefit from a sharper kernel
        let options =
            ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Bilinear));

        self.resizer
            .resize(&src, &mut dst, &options)
            .map_err(|e| resize_failure(path, e))?;

        GrayImage::from_raw(width, height, dst.into_vec())
            .ok_or_else(|| resize_failure(path, "resized buffer has the wrong length"))
    }
}

fn resize_failure(path: &Path, reason: impl ToString) -> LoadError {
    LoadError::Decode {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn create_test_image(width: u32, height: u32) -> DynamicImage {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            let r = (x * 255 / width.max(1)) as u8;
            let g = (y * 255 / height.max(1)) as u8;
            let b = ((x + y) * 128 / (width + height).max(1)) as u8;
            Rgb([r, g, b])
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn resize_produces_correct_dimensions() {
        let mut resizer = FrameResizer::new();
        let image = create_test_image(640, 480);
        let resized = resizer
            .resize_to_grayscale(Path::new("frame.png"), &image, 128, 96)
            .unwrap();

        assert_eq!(resized.width(), 128);
        assert_eq!(resized.height(), 96);
    }

    #[test]
    fn resize_ignores_aspect_ratio() {
        let mut resizer = FrameResizer::new();
        let image = create_test_image(200, 100);
        let resized = resizer
            .resize_to_grayscale(Path::new("frame.png"), &image, 96, 96)
            .unwrap();

        assert_eq!(resized.width(), 96);
        assert_eq!(resized.height(), 96);
    }

    #[test]
    fn resize_can_upscale() {
        let mut resizer = FrameResizer::new();
        let image = create_test_image(16, 16);
        let resized = resizer
            .resize_to_grayscale(Path::new("frame.png"), &image, 64, 64)
            .unwrap();

        assert_eq!(resized.width(), 64);
        assert_eq!(resized.height(), 64);
    }

    #[test]
    fn resizer_reuse_is_deterministic() {
        let mut resizer = FrameResizer::new();
        let image = create_test_image(100, 100);

        let resized1 = resizer
            .resize_to_grayscale(Path::new("frame.png"), &image, 32, 32)
            .unwrap();
        let resized2 = resizer
            .resize_to_grayscale(Path::new("frame.png"), &image, 32, 32)
            .unwrap();

        assert_eq!(resized1.as_raw(), resized2.as_raw());
    }

    #[test]
    fn zero_sized_source_error_names_the_frame() {
        let mut resizer = FrameResizer::new();
        let empty = DynamicImage::new_luma8(0, 0);

        let error = resizer
            .resize_to_grayscale(Path::new("/frames/empty.png"), &empty, 64, 64)
            .unwrap_err();

        assert!(error.to_string().contains("/frames/empty.png"));
    }
}
