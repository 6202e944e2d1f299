use super::error::{OutlineError, Stage};
use super::vertices::Vertex;

/// Marker vertex scaled into `[0, 1]`.
pub type NormalizedPoint = (f64, f64);

/// Keeps every `stride`-th vertex starting at the first one, then divides
/// both coordinates by the single largest coordinate left, preserving the
/// aspect ratio.
///
/// Coordinates must be non-negative, as extracted vertices are; otherwise the
/// result would leave `[0, 1]`. Negative input, an empty subsample or a zero
/// largest coordinate is reported as degenerate geometry.
pub fn finalize_polygon(
    polygon: &[Vertex],
    stride: usize,
) -> Result<Vec<NormalizedPoint>, OutlineError> {
    if stride == 0 {
        return Err(OutlineError::InvalidConfig("stride must be at least 1".to_string()));
    }
    let sampled: Vec<Vertex> = polygon.iter().step_by(stride).copied().collect();
    if let Some(&(u, v)) = sampled.iter().find(|&&(u, v)| u < 0 || v < 0) {
        return Err(OutlineError::degenerate(
            Stage::Finalization,
            format!("vertex ({u}, {v}) has a negative coordinate"),
        ));
    }
    let Some(scale) = sampled.iter().map(|&(u, v)| u.max(v)).max() else {
        return Err(OutlineError::degenerate(
            Stage::Finalization,
            "no vertices left to normalize",
        ));
    };
    if scale <= 0 {
        return Err(OutlineError::degenerate(
            Stage::Finalization,
            format!("largest coordinate is {scale}, cannot normalize"),
        ));
    }
    let scale = scale as f64;
    Ok(sampled
        .into_iter()
        .map(|(u, v)| (u as f64 / scale, v as f64 / scale))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_keeps_every_nth_from_the_start() {
        let polygon: Vec<Vertex> = (0..100).map(|i| (i, 1)).collect();
        let points = finalize_polygon(&polygon, 20).expect("finalize");
        assert_eq!(points.len(), 5);
        let kept: Vec<f64> = points.iter().map(|p| p.0 * 80.0).collect();
        assert_eq!(kept, vec![0.0, 20.0, 40.0, 60.0, 80.0]);
    }

    #[test]
    fn count_is_ceiling_of_len_over_stride() {
        let polygon: Vec<Vertex> = (1..=41).map(|i| (i, i)).collect();
        assert_eq!(finalize_polygon(&polygon, 20).expect("finalize").len(), 3);
        assert_eq!(finalize_polygon(&polygon, 1).expect("finalize").len(), 41);
    }

    #[test]
    fn scale_is_shared_between_axes() {
        let polygon = [(2, 8), (4, 1), (0, 0)];
        let points = finalize_polygon(&polygon, 1).expect("finalize");
        assert_eq!(points, vec![(0.25, 1.0), (0.5, 0.125), (0.0, 0.0)]);
    }

    #[test]
    fn normalized_values_stay_in_unit_range() {
        let polygon: Vec<Vertex> = (0..250).map(|i| ((i * 7) % 113, (i * 13) % 97)).collect();
        let points = finalize_polygon(&polygon, 3).expect("finalize");
        let mut max = 0.0f64;
        for &(x, y) in &points {
            assert!((0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y));
            max = max.max(x).max(y);
        }
        assert!((max - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_polygon_is_degenerate() {
        let err = finalize_polygon(&[], 20).expect_err("empty input must fail");
        assert!(matches!(
            err,
            OutlineError::DegenerateGeometry { stage: Stage::Finalization, .. }
        ));
    }

    #[test]
    fn all_zero_polygon_is_degenerate() {
        let err = finalize_polygon(&[(0, 0)], 20).expect_err("zero scale must fail");
        assert!(matches!(err, OutlineError::DegenerateGeometry { .. }));
    }

    #[test]
    fn negative_coordinates_are_degenerate() {
        let err = finalize_polygon(&[(4, 4), (-5, 2)], 1).expect_err("negative input must fail");
        assert!(matches!(
            err,
            OutlineError::DegenerateGeometry { stage: Stage::Finalization, .. }
        ));
        // only the kept subsample is inspected
        assert!(finalize_polygon(&[(4, 4), (-5, 2)], 2).is_ok());
    }

    #[test]
    fn zero_stride_is_rejected() {
        assert!(matches!(
            finalize_polygon(&[(1, 1)], 0),
            Err(OutlineError::InvalidConfig(_))
        ));
    }
}
