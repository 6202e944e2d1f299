//! Approximate counter-clockwise ordering of an unordered contour point set.
//!
//! Vertices are sorted by their polar angle around the per-axis median. The
//! sort is run twice, once on the angles and once on the negated angles with
//! the result reversed. Both walks are identical wherever angles are
//! distinct; vertices that share a direction from the center land at
//! different ranks and are dropped.

use std::cmp::Ordering;

use log::{debug, warn};

use super::vertices::Vertex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Walk {
    Ascending,
    DescendingReversed,
}

/// Per-coordinate median of the vertices, or `None` for an empty set.
pub fn median_center(vertices: &[Vertex]) -> Option<(f64, f64)> {
    if vertices.is_empty() {
        return None;
    }
    let mut xs: Vec<f64> = vertices.iter().map(|v| v.0 as f64).collect();
    let mut ys: Vec<f64> = vertices.iter().map(|v| v.1 as f64).collect();
    Some((median(&mut xs), median(&mut ys)))
}

fn median(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) * 0.5
    } else {
        values[mid]
    }
}

/// Angle of each vertex around `center`, as `atan2(dv, du)` for a vertex
/// `(u, v)`. Range is `(-pi, pi]`.
pub fn polar_angles(vertices: &[Vertex], center: (f64, f64)) -> Vec<f64> {
    vertices
        .iter()
        .map(|&(u, v)| (v as f64 - center.1).atan2(u as f64 - center.0))
        .collect()
}

fn angular_walk(vertices: &[Vertex], angles: &[f64], walk: Walk) -> Vec<Vertex> {
    let sign = match walk {
        Walk::Ascending => 1.0,
        Walk::DescendingReversed => -1.0,
    };
    let mut order: Vec<usize> = (0..vertices.len()).collect();
    // stable: ties keep their input order
    order.sort_by(|&a, &b| {
        (sign * angles[a])
            .partial_cmp(&(sign * angles[b]))
            .unwrap_or(Ordering::Equal)
    });
    if walk == Walk::DescendingReversed {
        order.reverse();
    }
    order.into_iter().map(|i| vertices[i]).collect()
}

/// Orders contour vertices counter-clockwise, dropping the ones whose rank
/// depends on how angle ties are broken.
///
/// The output is a subset of the input in ascending-angle order. An empty
/// input gives an empty output.
pub fn order_vertices(vertices: &[Vertex]) -> Vec<Vertex> {
    let Some(center) = median_center(vertices) else {
        return Vec::new();
    };
    let angles = polar_angles(vertices, center);
    let ascending = angular_walk(vertices, &angles, Walk::Ascending);
    let reversed = angular_walk(vertices, &angles, Walk::DescendingReversed);

    let ordered: Vec<Vertex> = ascending
        .iter()
        .zip(reversed.iter())
        .filter(|(a, b)| a == b)
        .map(|(a, _)| *a)
        .collect();

    let dropped = vertices.len() - ordered.len();
    debug!(
        "ordered {} of {} vertices around ({:.1}, {:.1})",
        ordered.len(),
        vertices.len(),
        center.0,
        center.1
    );
    if dropped > 0 {
        warn!("dropped {dropped} vertices with ambiguous angular rank");
    }
    ordered
}
