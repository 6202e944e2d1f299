//! Persistence of the finished marker polygon.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::outline::error::OutlineError;
use crate::outline::finalize::NormalizedPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One `x y` pair per line, numpy `savetxt` style.
    #[default]
    Text,
    /// `[[x, y], ...]`
    Json,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PointsParseError {
    #[error("line {line}: expected 2 values, found {found}")]
    WrongArity { line: usize, found: usize },
    #[error("line {line}: invalid number {token:?}")]
    BadNumber { line: usize, token: String },
}

/// Formats a value like C's `%.18e`: eighteen fraction digits and a signed,
/// at least two-digit exponent.
pub fn format_scientific(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let raw = format!("{value:.18e}");
    let Some((mantissa, exponent)) = raw.split_once('e') else {
        return raw;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.abs())
}

pub fn write_points_string(points: &[NormalizedPoint]) -> String {
    let mut out = String::new();
    for &(x, y) in points {
        out.push_str(&format_scientific(x));
        out.push(' ');
        out.push_str(&format_scientific(y));
        out.push('\n');
    }
    out
}

pub fn write_points_json_string(points: &[NormalizedPoint]) -> Result<String, serde_json::Error> {
    let pairs: Vec<[f64; 2]> = points.iter().map(|&(x, y)| [x, y]).collect();
    serde_json::to_string_pretty(&pairs)
}

/// Parses whitespace separated coordinate pairs, one per line. Blank lines
/// are skipped.
pub fn read_points_text(text: &str) -> Result<Vec<NormalizedPoint>, PointsParseError> {
    let mut points = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        let line_no = idx + 1;
        if tokens.len() != 2 {
            return Err(PointsParseError::WrongArity {
                line: line_no,
                found: tokens.len(),
            });
        }
        let parse = |token: &str| {
            token.parse::<f64>().map_err(|_| PointsParseError::BadNumber {
                line: line_no,
                token: token.to_string(),
            })
        };
        points.push((parse(tokens[0])?, parse(tokens[1])?));
    }
    Ok(points)
}

/// Writes the polygon to `path`.
///
/// Content goes to a hidden sibling file first and is renamed into place, so
/// a failed write never leaves a truncated point list behind.
pub fn write_points_file(
    path: &Path,
    points: &[NormalizedPoint],
    format: OutputFormat,
) -> Result<(), OutlineError> {
    let output_err = |source| OutlineError::Output {
        path: path.to_path_buf(),
        source,
    };
    let contents = match format {
        OutputFormat::Text => write_points_string(points),
        OutputFormat::Json => {
            write_points_json_string(points).map_err(|e| output_err(io::Error::other(e)))?
        }
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(output_err)?;
    }
    let staging = staging_path(path);
    if let Err(e) = fs::write(&staging, contents) {
        let _ = fs::remove_file(&staging);
        return Err(output_err(e));
    }
    if let Err(e) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(output_err(e));
    }
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "points".to_string());
    path.with_file_name(format!(".{name}.partial"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scientific_matches_savetxt_layout() {
        assert_eq!(format_scientific(1.0), "1.000000000000000000e+00");
        assert_eq!(format_scientific(0.0), "0.000000000000000000e+00");
        assert_eq!(format_scientific(0.25), "2.500000000000000000e-01");
        assert_eq!(format_scientific(-1234.5), "-1.234500000000000000e+03");
        assert_eq!(format_scientific(1e-120), "9.999999999999999786e-121");
        assert_eq!(format_scientific(2f64.powi(-10)), "9.765625000000000000e-04");
    }

    #[test]
    fn text_output_is_one_pair_per_line() {
        let text = write_points_string(&[(1.0, 0.5), (0.0, 0.25)]);
        assert_eq!(
            text,
            "1.000000000000000000e+00 5.000000000000000000e-01\n\
             0.000000000000000000e+00 2.500000000000000000e-01\n"
        );
        assert_eq!(read_points_text(&text), Ok(vec![(1.0, 0.5), (0.0, 0.25)]));
    }

    #[test]
    fn reader_reports_malformed_lines() {
        assert_eq!(
            read_points_text("1 2\n\n3\n"),
            Err(PointsParseError::WrongArity { line: 3, found: 1 })
        );
        assert!(matches!(
            read_points_text("1 x"),
            Err(PointsParseError::BadNumber { line: 1, .. })
        ));
        assert_eq!(read_points_text(""), Ok(Vec::new()));
    }

    #[test]
    fn json_output_is_nested_pairs() {
        let json = write_points_json_string(&[(0.5, 1.0)]).expect("serialize");
        let parsed: Vec<[f64; 2]> = serde_json::from_str(&json).expect("json");
        assert_eq!(parsed, vec![[0.5, 1.0]]);
    }

    #[test]
    fn file_write_leaves_no_staging_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("verts.txt");
        write_points_file(&path, &[(1.0, 1.0)], OutputFormat::Text).expect("write");
        assert!(path.exists());
        assert!(!staging_path(&path).exists());
    }
}
