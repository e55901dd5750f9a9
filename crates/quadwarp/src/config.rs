use quadwarp_imgproc::warp::SamplingPolicy;
use quadwarp_io::EncodeFormat;
use serde::{Deserialize, Serialize};

use crate::error::ManipulationError;

/// Settings for [`crop`](crate::crop) and [`distort`](crate::distort).
///
/// Missing fields take their default values when deserializing.
///
/// # Examples
///
/// ```
/// use quadwarp::ManipulationConfig;
/// use quadwarp::io::EncodeFormat;
///
/// let config = ManipulationConfig::from_json_str(r#"{"format": "jpeg", "quality": 85}"#).unwrap();
///
/// assert_eq!(config.format, EncodeFormat::Jpeg);
/// assert_eq!(config.quality, 85);
/// assert_eq!(config.scaling_factor, 1.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManipulationConfig {
    /// Format of the encoded result.
    pub format: EncodeFormat,
    /// Encoder quality in `0..=100`.
    pub quality: u8,
    /// The source is downscaled by this factor before distorting. `1.0` disables it.
    pub scaling_factor: f64,
    /// How distortion samples outside the source are resolved.
    pub sampling: SamplingPolicy,
}

impl Default for ManipulationConfig {
    fn default() -> Self {
        Self {
            format: EncodeFormat::Png,
            quality: 100,
            scaling_factor: 1.0,
            sampling: SamplingPolicy::Clamp,
        }
    }
}

impl ManipulationConfig {
    /// Parse and validate a configuration from JSON.
    pub fn from_json_str(s: &str) -> Result<Self, ManipulationError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the values are usable.
    ///
    /// # Errors
    ///
    /// * [`ManipulationError::InvalidQuality`] if the quality exceeds 100.
    /// * [`ManipulationError::InvalidScalingFactor`] if the factor is not a positive finite number.
    pub fn validate(&self) -> Result<(), ManipulationError> {
        if self.quality > 100 {
            return Err(ManipulationError::InvalidQuality(self.quality));
        }

        if !self.scaling_factor.is_finite() || self.scaling_factor <= 0.0 {
            return Err(ManipulationError::InvalidScalingFactor(self.scaling_factor));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use quadwarp_imgproc::warp::SamplingPolicy;
    use quadwarp_io::EncodeFormat;

    use super::ManipulationConfig;
    use crate::error::ManipulationError;

    #[test]
    fn default_config() -> Result<(), ManipulationError> {
        let config = ManipulationConfig::from_json_str("{}")?;
        assert_eq!(config, ManipulationConfig::default());
        Ok(())
    }

    #[test]
    fn full_config() -> Result<(), ManipulationError> {
        let config = ManipulationConfig::from_json_str(
            r#"{"format": "webp", "quality": 40, "scaling_factor": 2.5, "sampling": "strict"}"#,
        )?;
        assert_eq!(config.format, EncodeFormat::Webp);
        assert_eq!(config.quality, 40);
        assert_eq!(config.scaling_factor, 2.5);
        assert_eq!(config.sampling, SamplingPolicy::Strict);
        Ok(())
    }

    #[test]
    fn invalid_values() {
        let res = ManipulationConfig::from_json_str(r#"{"quality": 101}"#);
        assert!(matches!(res, Err(ManipulationError::InvalidQuality(101))));

        let res = ManipulationConfig::from_json_str(r#"{"scaling_factor": 0.0}"#);
        assert!(matches!(res, Err(ManipulationError::InvalidScalingFactor(_))));

        let res = ManipulationConfig::from_json_str(r#"{"scaling_factor": -2.0}"#);
        assert!(matches!(res, Err(ManipulationError::InvalidScalingFactor(_))));

        let res = ManipulationConfig::from_json_str(r#"{"format": "gif"}"#);
        assert!(matches!(res, Err(ManipulationError::Config(_))));
    }
}
