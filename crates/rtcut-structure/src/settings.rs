//! Cut settings.

use rtcut_math::Tolerance;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StructureError};

/// Parameters shared by every region of a structure set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CutSettings {
    /// Geometric comparison tolerances.
    pub tolerance: Tolerance,
    /// Slice spacing assumed for regions with fewer than two distinct slices (mm).
    pub default_slice_spacing: f64,
}

impl Default for CutSettings {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::DEFAULT,
            default_slice_spacing: 1.0,
        }
    }
}

impl CutSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.tolerance.linear) {
            return Err(StructureError::InvalidSettings(
                "tolerance.linear must be a positive number".into(),
            ));
        }
        if !positive(self.tolerance.angular) {
            return Err(StructureError::InvalidSettings(
                "tolerance.angular must be a positive number".into(),
            ));
        }
        if !positive(self.default_slice_spacing) {
            return Err(StructureError::InvalidSettings(
                "default_slice_spacing must be a positive number".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let settings = CutSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.tolerance.linear, 1e-6);
        assert_eq!(settings.default_slice_spacing, 1.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut settings = CutSettings::default();
        settings.default_slice_spacing = 0.0;
        assert!(matches!(
            settings.validate(),
            Err(StructureError::InvalidSettings(_))
        ));

        let mut settings = CutSettings::default();
        settings.tolerance.linear = f64::NAN;
        assert!(settings.validate().is_err());

        let mut settings = CutSettings::default();
        settings.tolerance.angular = -1.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: CutSettings =
            serde_json::from_str(r#"{"default_slice_spacing": 2.5}"#).unwrap();
        assert_eq!(settings.default_slice_spacing, 2.5);
        assert_eq!(settings.tolerance, Tolerance::DEFAULT);
    }
}
