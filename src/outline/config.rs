use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::OutlineError;

const SIGMA: f32 = 4.0;
// Thresholds apply to the unnormalized Sobel magnitude of the smoothed 8-bit
// image, where a full black-to-white step peaks around 8 * 255 / (sigma * 2.5).
// They are not fractions of the intensity range.
const LOW_THRESHOLD: f32 = 25.5;
const HIGH_THRESHOLD: f32 = 51.0;
const STRIDE: usize = 20;

/// Configuration parameters for outline tracing.
///
/// `sigma` is the Gaussian smoothing scale applied before edge detection,
/// `low_threshold`/`high_threshold` are the Canny hysteresis bounds on the
/// 8-bit gradient magnitude, and `stride` is the decimation step applied to
/// the ordered polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    pub sigma: f32,
    pub low_threshold: f32,
    pub high_threshold: f32,
    pub stride: usize,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            sigma: SIGMA,
            low_threshold: LOW_THRESHOLD,
            high_threshold: HIGH_THRESHOLD,
            stride: STRIDE,
        }
    }
}

impl OutlineConfig {
    /// Reads a JSON config file. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, OutlineError> {
        let text = fs::read_to_string(path).map_err(|source| OutlineError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| OutlineError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), OutlineError> {
        if !self.sigma.is_finite() || self.sigma <= 0.0 {
            return Err(OutlineError::InvalidConfig(format!(
                "sigma must be a positive number, got {}",
                self.sigma
            )));
        }
        for (name, value) in [("low_threshold", self.low_threshold), ("high_threshold", self.high_threshold)] {
            if !value.is_finite() || value < 0.0 {
                return Err(OutlineError::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if self.low_threshold > self.high_threshold {
            return Err(OutlineError::InvalidConfig(format!(
                "low_threshold ({}) exceeds high_threshold ({})",
                self.low_threshold, self.high_threshold
            )));
        }
        if self.stride == 0 {
            return Err(OutlineError::InvalidConfig("stride must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = OutlineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.stride, 20);
        assert_eq!(config.sigma, 4.0);
    }

    #[test]
    fn rejects_bad_values() {
        let zero_stride = OutlineConfig { stride: 0, ..OutlineConfig::default() };
        assert!(matches!(zero_stride.validate(), Err(OutlineError::InvalidConfig(_))));

        let flat_blur = OutlineConfig { sigma: 0.0, ..OutlineConfig::default() };
        assert!(flat_blur.validate().is_err());

        let nan_blur = OutlineConfig { sigma: f32::NAN, ..OutlineConfig::default() };
        assert!(nan_blur.validate().is_err());

        let inverted = OutlineConfig {
            low_threshold: 80.0,
            high_threshold: 40.0,
            ..OutlineConfig::default()
        };
        assert!(inverted.validate().is_err());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: OutlineConfig = serde_json::from_str(r#"{ "stride": 5 }"#).expect("parse");
        assert_eq!(config.stride, 5);
        assert_eq!(config.high_threshold, HIGH_THRESHOLD);
    }
}
