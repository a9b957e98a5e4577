//! Volume control
//!
//! Volume is a linear gain in `[0.0, 1.0]`, handed to the audio engine as-is.
//! Out-of-range input is clamped at this boundary; NaN is rejected.

/// Volume controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    /// Volume level (0.0 - 1.0)
    level: f32,
}

impl Volume {
    /// Create new volume controller
    ///
    /// NaN falls back to full volume.
    pub fn new(level: f32) -> Self {
        Self {
            level: Self::sanitize(level).unwrap_or(1.0),
        }
    }

    /// Set volume level, clamped to `[0.0, 1.0]`
    ///
    /// Returns the applied level, or `None` if `level` is NaN.
    pub fn set_level(&mut self, level: f32) -> Option<f32> {
        let level = Self::sanitize(level)?;
        self.level = level;
        Some(level)
    }

    /// Get current volume level
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Convert linear gain to dB, for logging
    pub fn to_db(&self) -> f32 {
        if self.level == 0.0 {
            f32::NEG_INFINITY
        } else {
            20.0 * self.level.log10()
        }
    }

    fn sanitize(level: f32) -> Option<f32> {
        if level.is_nan() {
            None
        } else {
            Some(level.clamp(0.0, 1.0))
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_volume() {
        assert_eq!(Volume::new(0.8).level(), 0.8);
        assert_eq!(Volume::default().level(), 1.0);
    }

    #[test]
    fn set_volume_clamps() {
        let mut vol = Volume::new(0.5);

        assert_eq!(vol.set_level(1.7), Some(1.0));
        assert_eq!(vol.level(), 1.0);

        assert_eq!(vol.set_level(-0.2), Some(0.0));
        assert_eq!(vol.level(), 0.0);
    }

    #[test]
    fn nan_is_rejected() {
        let mut vol = Volume::new(0.3);
        assert_eq!(vol.set_level(f32::NAN), None);
        assert_eq!(vol.level(), 0.3);

        assert_eq!(Volume::new(f32::NAN).level(), 1.0);
    }

    #[test]
    fn db_conversion() {
        assert!((Volume::new(1.0).to_db() - 0.0).abs() < 0.01);
        assert!((Volume::new(0.5).to_db() + 6.02).abs() < 0.01);
        assert_eq!(Volume::new(0.0).to_db(), f32::NEG_INFINITY);
    }
}
