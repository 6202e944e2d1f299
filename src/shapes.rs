//! Synthetic outline images: a dark filled shape on a white page.

use std::io;
use std::path::Path;

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_polygon_mut};
use imageproc::point::Point;

use crate::outline::error::OutlineError;

const PAPER: Rgb<u8> = Rgb([255, 255, 255]);
const INK: Rgb<u8> = Rgb([20, 20, 20]);

/// Airplane silhouette seen from above, nose up, in unit coordinates
/// (`x` right, `y` down, both in `[0, 1]`).
const AIRPLANE: [(f32, f32); 18] = [
    (0.50, 0.06),
    (0.56, 0.16),
    (0.57, 0.38),
    (0.92, 0.56),
    (0.92, 0.62),
    (0.57, 0.55),
    (0.56, 0.80),
    (0.68, 0.89),
    (0.68, 0.93),
    (0.50, 0.89),
    (0.32, 0.93),
    (0.32, 0.89),
    (0.44, 0.80),
    (0.43, 0.55),
    (0.08, 0.62),
    (0.08, 0.56),
    (0.43, 0.38),
    (0.44, 0.16),
];

/// Fills the polygon given in unit coordinates, scaled to the canvas.
pub fn filled_polygon_image(width: u32, height: u32, outline: &[(f32, f32)]) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, PAPER);
    let mut points: Vec<Point<i32>> = outline
        .iter()
        .map(|&(x, y)| {
            Point::new(
                (x * (width.saturating_sub(1)) as f32).round() as i32,
                (y * (height.saturating_sub(1)) as f32).round() as i32,
            )
        })
        .collect();
    points.dedup();
    // polygon drawing rejects an explicitly closed outline
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    if points.len() >= 3 {
        draw_polygon_mut(&mut img, &points, INK);
    }
    img
}

pub fn filled_disc_image(width: u32, height: u32, radius: i32) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, PAPER);
    let center = ((width / 2) as i32, (height / 2) as i32);
    draw_filled_circle_mut(&mut img, center, radius, INK);
    img
}

pub fn airplane_image(width: u32, height: u32) -> RgbImage {
    filled_polygon_image(width, height, &AIRPLANE)
}

/// Writes the airplane test shape to `path`.
pub fn generate_test_image(path: &Path, width: u32, height: u32) -> Result<(), OutlineError> {
    airplane_image(width, height)
        .save(path)
        .map_err(|e| OutlineError::Output {
            path: path.to_path_buf(),
            source: io::Error::other(e),
        })
}
