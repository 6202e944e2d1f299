use std::fmt;
use std::path::PathBuf;

/// Pipeline stage an error is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Config,
    Load,
    EdgeDetection,
    Extraction,
    Ordering,
    Finalization,
    Output,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Config => "config",
            Stage::Load => "load",
            Stage::EdgeDetection => "edge detection",
            Stage::Extraction => "vertex extraction",
            Stage::Ordering => "vertex ordering",
            Stage::Finalization => "finalization",
            Stage::Output => "output",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while turning an outline image into a marker polygon.
#[derive(Debug, thiserror::Error)]
pub enum OutlineError {
    #[error("failed to read image {}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("input image {} is empty", path.display())]
    EmptyImage { path: PathBuf },
    #[error("degenerate geometry during {stage}: {reason}")]
    DegenerateGeometry { stage: Stage, reason: String },
    #[error("failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to read config {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to render preview: {0}")]
    Plot(String),
}

impl OutlineError {
    pub(crate) fn degenerate(stage: Stage, reason: impl Into<String>) -> Self {
        OutlineError::DegenerateGeometry {
            stage,
            reason: reason.into(),
        }
    }

    /// Stage of the run that failed.
    pub fn stage(&self) -> Stage {
        match self {
            OutlineError::Input { .. } | OutlineError::EmptyImage { .. } => Stage::Load,
            OutlineError::DegenerateGeometry { stage, .. } => *stage,
            OutlineError::Output { .. } | OutlineError::Plot(_) => Stage::Output,
            OutlineError::InvalidConfig(_)
            | OutlineError::ConfigIo { .. }
            | OutlineError::ConfigFile { .. } => Stage::Config,
        }
    }
}
