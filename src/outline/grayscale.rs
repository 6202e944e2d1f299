use std::path::Path;

use image::{DynamicImage, GenericImageView, GrayImage, ImageBuffer, Luma};

use super::error::OutlineError;

/// Single-channel intensity image with values in `[0, 1]`.
pub type GrayscaleImage = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Opens an image file and reduces it to grayscale by averaging its channels.
pub fn load_grayscale(path: &Path) -> Result<GrayscaleImage, OutlineError> {
    let source = image::open(path).map_err(|source| OutlineError::Input {
        path: path.to_path_buf(),
        source,
    })?;
    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        return Err(OutlineError::EmptyImage {
            path: path.to_path_buf(),
        });
    }
    Ok(grayscale_from_image(&source))
}

/// Plain mean over every native channel of the image, alpha included.
/// No perceptual weighting is applied.
pub fn grayscale_from_image(source: &DynamicImage) -> GrayscaleImage {
    let (width, height) = source.dimensions();
    match source.color().channel_count() {
        1 => source.to_luma32f(),
        2 => {
            let la = source.to_luma_alpha32f();
            ImageBuffer::from_fn(width, height, |x, y| {
                let [l, a] = la.get_pixel(x, y).0;
                Luma([(l + a) / 2.0])
            })
        }
        3 => {
            let rgb = source.to_rgb32f();
            ImageBuffer::from_fn(width, height, |x, y| {
                let [r, g, b] = rgb.get_pixel(x, y).0;
                Luma([(r + g + b) / 3.0])
            })
        }
        _ => {
            let rgba = source.to_rgba32f();
            ImageBuffer::from_fn(width, height, |x, y| {
                let [r, g, b, a] = rgba.get_pixel(x, y).0;
                Luma([(r + g + b + a) / 4.0])
            })
        }
    }
}

/// Quantizes a `[0, 1]` intensity image to 8 bits.
pub fn to_gray8(image: &GrayscaleImage) -> GrayImage {
    ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        let v = image.get_pixel(x, y).0[0];
        Luma([(v.clamp(0.0, 1.0) * 255.0).round() as u8])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn averages_rgb_channels_equally() {
        let mut rgb = RgbImage::new(2, 1);
        rgb.put_pixel(0, 0, Rgb([255, 0, 0]));
        rgb.put_pixel(1, 0, Rgb([255, 255, 255]));
        let gray = grayscale_from_image(&DynamicImage::ImageRgb8(rgb));
        assert!((gray.get_pixel(0, 0).0[0] - 1.0 / 3.0).abs() < 1e-6);
        assert!((gray.get_pixel(1, 0).0[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn alpha_takes_part_in_the_average() {
        let mut rgba = RgbaImage::new(1, 1);
        rgba.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        let gray = grayscale_from_image(&DynamicImage::ImageRgba8(rgba));
        assert!((gray.get_pixel(0, 0).0[0] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn quantizes_back_to_bytes() {
        let gray: GrayscaleImage = ImageBuffer::from_fn(3, 1, |x, _| Luma([x as f32 / 2.0]));
        let bytes = to_gray8(&gray);
        assert_eq!(bytes.as_raw(), &vec![0u8, 128, 255]);
    }
}
