//! End-to-end driver: image in, marker polygon out.

use std::fs;
use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView};
use log::{debug, info};

use crate::marker_io::{OutputFormat, write_points_file};
use crate::plot_outline::{PREVIEW_SIZE, save_polygon_plot};
use crate::outline::{
    CannyEdgeDetector, EdgeDetector, EdgeMask, GrayscaleImage, NormalizedPoint, OutlineConfig,
    OutlineError, Stage, finalize_polygon, find_vertices, grayscale_from_image, load_grayscale,
    order_vertices,
};

/// Everything a single run produced.
#[derive(Debug, Clone)]
pub struct TraceReport {
    pub width: u32,
    pub height: u32,
    pub edges: EdgeMask,
    pub edge_pixels: usize,
    pub ordered_vertices: usize,
    pub polygon: Vec<NormalizedPoint>,
}

impl TraceReport {
    /// Edge pixels the orderer discarded as ambiguous.
    pub fn dropped_vertices(&self) -> usize {
        self.edge_pixels - self.ordered_vertices
    }
}

/// Runs detection, extraction, ordering and finalization on a grayscale image.
pub fn trace_outline<D: EdgeDetector>(
    gray: &GrayscaleImage,
    detector: &D,
    stride: usize,
) -> Result<TraceReport, OutlineError> {
    let (width, height) = gray.dimensions();
    let edges = detector.detect(gray);
    debug!("edge mask {}x{}: {} edge pixels", width, height, edges.edge_count());

    let vertices = find_vertices(&edges);
    if vertices.is_empty() {
        return Err(OutlineError::degenerate(
            Stage::Extraction,
            "edge mask contains no edge pixels",
        ));
    }

    let ordered = order_vertices(&vertices);
    if ordered.is_empty() {
        return Err(OutlineError::degenerate(
            Stage::Ordering,
            format!("no vertex of {} kept a stable angular rank", vertices.len()),
        ));
    }

    let polygon = finalize_polygon(&ordered, stride)?;
    debug!(
        "{} ordered vertices decimated by {} to {} points",
        ordered.len(),
        stride,
        polygon.len()
    );

    Ok(TraceReport {
        width,
        height,
        edge_pixels: vertices.len(),
        ordered_vertices: ordered.len(),
        edges,
        polygon,
    })
}

/// Traces an already decoded image with Canny edges per `config`.
pub fn trace_image(source: &DynamicImage, config: &OutlineConfig) -> Result<TraceReport, OutlineError> {
    config.validate()?;
    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        return Err(OutlineError::degenerate(Stage::Load, "image has no pixels"));
    }
    let gray = grayscale_from_image(source);
    trace_outline(&gray, &CannyEdgeDetector::from_config(config), config.stride)
}

/// Optional inspection files written next to the point list.
#[derive(Debug, Clone, Default)]
pub struct Extras {
    /// Edge mask as PNG.
    pub edges: Option<PathBuf>,
    /// Polygon preview as PNG.
    pub plot: Option<PathBuf>,
}

/// Reads `input`, traces it and writes the point list to `output`.
///
/// Nothing is written unless every stage succeeds.
pub fn run(
    input: &Path,
    output: &Path,
    config: &OutlineConfig,
    format: OutputFormat,
) -> Result<TraceReport, OutlineError> {
    run_with_extras(input, output, config, format, &Extras::default())
}

/// Like [`run`], also writing the requested [`Extras`].
///
/// Extras are written first and the point list last. If any write fails the
/// extras already written are removed again and the point list is never
/// created.
pub fn run_with_extras(
    input: &Path,
    output: &Path,
    config: &OutlineConfig,
    format: OutputFormat,
    extras: &Extras,
) -> Result<TraceReport, OutlineError> {
    config.validate()?;
    let gray = load_grayscale(input)?;
    let report = trace_outline(&gray, &CannyEdgeDetector::from_config(config), config.stride)?;

    let mut written = Vec::new();
    if let Err(e) = write_outputs(&report, output, format, extras, &mut written) {
        for path in &written {
            let _ = fs::remove_file(path);
        }
        return Err(e);
    }

    info!(
        "{}: {} edge pixels, {} ordered, {} dropped, {} points written to {}",
        input.display(),
        report.edge_pixels,
        report.ordered_vertices,
        report.dropped_vertices(),
        report.polygon.len(),
        output.display()
    );
    Ok(report)
}

fn write_outputs(
    report: &TraceReport,
    output: &Path,
    format: OutputFormat,
    extras: &Extras,
    written: &mut Vec<PathBuf>,
) -> Result<(), OutlineError> {
    if let Some(path) = &extras.edges {
        report.edges.save(path)?;
        written.push(path.clone());
    }
    if let Some(path) = &extras.plot {
        save_polygon_plot(path, PREVIEW_SIZE, &report.polygon)?;
        written.push(path.clone());
    }
    write_points_file(output, &report.polygon, format)
}
