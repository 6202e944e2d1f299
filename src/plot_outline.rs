use std::io;
use std::path::Path;

use plotters::prelude::*;

use crate::outline::error::OutlineError;
use crate::outline::finalize::NormalizedPoint;

const MARGIN: i32 = 16;

/// Side length of the saved preview.
pub const PREVIEW_SIZE: u32 = 512;

fn to_pixel(p: NormalizedPoint, size: u32) -> (i32, i32) {
    let span = (size as i32 - 2 * MARGIN).max(1) as f64;
    let x = MARGIN + (p.0 * span).round() as i32;
    let y = size as i32 - MARGIN - (p.1 * span).round() as i32;
    (x, y)
}

/// Renders the marker polygon into a square RGB buffer.
///
/// The marker frame is drawn with `x` to the right and `y` up, as a closed
/// path with a dot on every vertex; the first vertex is drawn larger so the
/// walking direction can be read off the preview.
pub fn render_polygon_rgb(size: u32, points: &[NormalizedPoint]) -> Result<Vec<u8>, String> {
    if size == 0 {
        return Ok(Vec::new());
    }
    let pixel_count = (size as usize)
        .checked_mul(size as usize)
        .ok_or_else(|| "size*size overflow".to_string())?;
    let mut rgb = vec![255u8; pixel_count * 3];

    {
        let root = BitMapBackend::with_buffer(&mut rgb, (size, size)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;

        let frame_color = RGBColor(220, 220, 220);
        let lo = MARGIN;
        let hi = size as i32 - MARGIN;
        root.draw(&PathElement::new(
            [(lo, lo), (hi, lo), (hi, hi), (lo, hi), (lo, lo)],
            frame_color,
        ))
        .map_err(|e| e.to_string())?;

        let mut path: Vec<(i32, i32)> = points.iter().map(|&p| to_pixel(p, size)).collect();
        if let Some(&first) = path.first() {
            path.push(first);
        }
        let line_color = RGBColor(60, 110, 220);
        root.draw(&PathElement::new(path.clone(), line_color))
            .map_err(|e| e.to_string())?;

        for (i, &pixel) in path.iter().take(points.len()).enumerate() {
            let (radius, color) = if i == 0 {
                (5, RGBColor(230, 130, 30))
            } else {
                (3, line_color)
            };
            root.draw(&Circle::new(pixel, radius, color.filled()))
                .map_err(|e| e.to_string())?;
        }

        root.present().map_err(|e| e.to_string())?;
    }

    Ok(rgb)
}

/// Saves a preview PNG of the marker polygon.
pub fn save_polygon_plot(path: &Path, size: u32, points: &[NormalizedPoint]) -> Result<(), OutlineError> {
    let rgb = render_polygon_rgb(size, points).map_err(OutlineError::Plot)?;
    let img = image::RgbImage::from_raw(size, size, rgb)
        .ok_or_else(|| OutlineError::Plot(format!("failed to build {size}x{size} preview")))?;
    img.save(path).map_err(|e| OutlineError::Output {
        path: path.to_path_buf(),
        source: io::Error::other(e),
    })
}
