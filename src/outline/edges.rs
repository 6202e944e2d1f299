use std::io;
use std::path::Path;

use image::{GrayImage, ImageBuffer, Luma};
use imageproc::{edges::canny, filter::gaussian_blur_f32};

use super::config::OutlineConfig;
use super::error::OutlineError;
use super::grayscale::{GrayscaleImage, to_gray8};

/// Boolean edge map with the same shape as the image it was computed from.
///
/// Indexed as `(row, col)`, rows growing downwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeMask {
    width: u32,
    height: u32,
    data: Vec<bool>,
}

impl EdgeMask {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![false; width as usize * height as usize],
        }
    }

    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut mask = Self::new(width, height);
        for row in 0..height {
            for col in 0..width {
                mask.set(row, col, f(row, col));
            }
        }
        mask
    }

    /// Marks every non-zero pixel of a detector output as an edge.
    pub fn from_gray(edges: &GrayImage) -> Self {
        Self::from_fn(edges.width(), edges.height(), |row, col| {
            edges.get_pixel(col, row).0[0] != 0
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, row: u32, col: u32) -> bool {
        self.data[self.index(row, col)]
    }

    pub fn set(&mut self, row: u32, col: u32, value: bool) {
        let idx = self.index(row, col);
        self.data[idx] = value;
    }

    pub fn edge_count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    pub fn is_blank(&self) -> bool {
        !self.data.iter().any(|&v| v)
    }

    /// White edges on black, for inspection.
    pub fn to_image(&self) -> GrayImage {
        ImageBuffer::from_fn(self.width, self.height, |x, y| {
            Luma([if self.get(y, x) { 255u8 } else { 0u8 }])
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), OutlineError> {
        self.to_image().save(path).map_err(|e| OutlineError::Output {
            path: path.to_path_buf(),
            source: io::Error::other(e),
        })
    }

    fn index(&self, row: u32, col: u32) -> usize {
        assert!(row < self.height && col < self.width, "edge mask index out of bounds");
        row as usize * self.width as usize + col as usize
    }
}

/// Turns a grayscale image into an edge mask.
pub trait EdgeDetector {
    fn detect(&self, image: &GrayscaleImage) -> EdgeMask;
}

impl<F> EdgeDetector for F
where
    F: Fn(&GrayscaleImage) -> EdgeMask,
{
    fn detect(&self, image: &GrayscaleImage) -> EdgeMask {
        self(image)
    }
}

/// Gaussian smoothing at `sigma` followed by Canny hysteresis thresholding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CannyEdgeDetector {
    pub sigma: f32,
    pub low_threshold: f32,
    pub high_threshold: f32,
}

impl CannyEdgeDetector {
    pub fn from_config(config: &OutlineConfig) -> Self {
        Self {
            sigma: config.sigma,
            low_threshold: config.low_threshold,
            high_threshold: config.high_threshold,
        }
    }
}

impl Default for CannyEdgeDetector {
    fn default() -> Self {
        Self::from_config(&OutlineConfig::default())
    }
}

impl EdgeDetector for CannyEdgeDetector {
    fn detect(&self, image: &GrayscaleImage) -> EdgeMask {
        if image.width() == 0 || image.height() == 0 {
            return EdgeMask::new(image.width(), image.height());
        }
        let gray = to_gray8(image);
        let smoothed = gaussian_blur_f32(&gray, self.sigma);
        let edges = canny(&smoothed, self.low_threshold, self.high_threshold);
        EdgeMask::from_gray(&edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_image(width: u32, height: u32) -> GrayscaleImage {
        ImageBuffer::from_fn(width, height, |x, _| Luma([if x < width / 2 { 0.0 } else { 1.0 }]))
    }

    #[test]
    fn flat_image_has_no_edges() {
        let flat: GrayscaleImage = ImageBuffer::from_pixel(32, 32, Luma([0.5]));
        let mask = CannyEdgeDetector::default().detect(&flat);
        assert!(mask.is_blank());
        assert_eq!((mask.width(), mask.height()), (32, 32));
    }

    #[test]
    fn vertical_step_gives_a_vertical_edge() {
        let mask = CannyEdgeDetector::default().detect(&step_image(48, 48));
        assert!(!mask.is_blank());
        for row in 0..mask.height() {
            for col in 0..mask.width() {
                if mask.get(row, col) {
                    assert!((col as i64 - 24).abs() <= 3, "edge at col {col} far from the step");
                }
            }
        }
    }

    #[test]
    fn default_thresholds_are_on_the_8bit_gradient_scale() {
        // 5% contrast step: 13 grey levels, gradient well under the low threshold
        let faint: GrayscaleImage =
            ImageBuffer::from_fn(48, 48, |x, _| Luma([if x < 24 { 0.0 } else { 0.05 }]));
        assert!(CannyEdgeDetector::default().detect(&faint).is_blank());

        let sensitive = CannyEdgeDetector {
            low_threshold: 2.0,
            high_threshold: 4.0,
            ..CannyEdgeDetector::default()
        };
        assert!(!sensitive.detect(&faint).is_blank());
    }

    #[test]
    fn closures_act_as_detectors() {
        let detector = |img: &GrayscaleImage| EdgeMask::from_fn(img.width(), img.height(), |r, c| r == c);
        let mask = detector.detect(&step_image(4, 4));
        assert_eq!(mask.edge_count(), 4);
        assert!(mask.get(2, 2));
        assert!(!mask.get(2, 3));
    }

    #[test]
    fn mask_image_round_trips_through_gray() {
        let mask = EdgeMask::from_fn(3, 2, |r, c| (r + c) % 2 == 0);
        assert_eq!(EdgeMask::from_gray(&mask.to_image()), mask);
    }
}
