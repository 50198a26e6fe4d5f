use crate::error::PipelineError;

/// Icon sizes generated for the numeric series
pub const DEFAULT_SIZES: [u32; 7] = [16, 32, 64, 128, 256, 512, 1024];

/// Edge softening applied where the subject meets the background
///
/// The step and floor were tuned by eye on a single subject; treat them as
/// starting points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeSoftening {
    /// Alpha removed per background neighbor
    pub step: u8,
    /// Lowest alpha an edge pixel may reach
    pub min_alpha: u8,
}

impl EdgeSoftening {
    pub fn alpha_for(&self, background_neighbors: u32) -> u8 {
        let reduced = 255i64 - background_neighbors as i64 * self.step as i64;
        reduced.max(self.min_alpha as i64).clamp(0, 255) as u8
    }
}

impl Default for EdgeSoftening {
    fn default() -> Self {
        Self {
            step: 20,
            min_alpha: 128,
        }
    }
}

/// A fixed-name icon emitted outside the numeric series
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedIcon {
    pub file_name: String,
    pub size: u32,
}

impl NamedIcon {
    pub fn new(file_name: impl Into<String>, size: u32) -> Self {
        Self {
            file_name: file_name.into(),
            size,
        }
    }
}

/// Tunables for one extraction run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Max RGB distance from a corner color for a pixel to count as background
    pub distance_tolerance: f64,
    /// Max channel spread for a pixel to count as achromatic
    pub grayish_tolerance: u8,
    /// Padding around the cropped content, percent of its larger side
    pub padding_percent: u32,
    /// Numeric icon series
    pub target_sizes: Vec<u32>,
    /// Square size the cropped image is resampled to before the series
    pub master_size: Option<u32>,
    pub edge: EdgeSoftening,
    pub main_icon: NamedIcon,
    pub window_icon: NamedIcon,
}

impl PipelineConfig {
    /// Loose thresholds for arbitrary flat-background images
    pub fn generic() -> Self {
        Self {
            distance_tolerance: 60.0,
            grayish_tolerance: 25,
            padding_percent: 5,
            ..Self::operational()
        }
    }

    /// Thresholds used for the product icon
    pub fn operational() -> Self {
        Self {
            distance_tolerance: 80.0,
            grayish_tolerance: 30,
            padding_percent: 8,
            target_sizes: DEFAULT_SIZES.to_vec(),
            master_size: Some(1024),
            edge: EdgeSoftening::default(),
            main_icon: NamedIcon::new("app_icon.png", 512),
            window_icon: NamedIcon::new("window_icon.png", 64),
        }
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if !self.distance_tolerance.is_finite() || self.distance_tolerance < 0.0 {
            return Err(PipelineError::Config(format!(
                "distance tolerance must be a non-negative number, got {}",
                self.distance_tolerance
            )));
        }
        if self.target_sizes.is_empty() {
            return Err(PipelineError::Config("no target sizes".into()));
        }
        if self.target_sizes.contains(&0) {
            return Err(PipelineError::Config("target sizes must be non-zero".into()));
        }
        if self.master_size == Some(0) {
            return Err(PipelineError::Config("master size must be non-zero".into()));
        }
        for named in [&self.main_icon, &self.window_icon] {
            if named.size == 0 {
                return Err(PipelineError::Config(format!(
                    "`{}` has zero size",
                    named.file_name
                )));
            }
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::operational()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets() {
        let generic = PipelineConfig::generic();
        assert_eq!(generic.distance_tolerance, 60.0);
        assert_eq!(generic.grayish_tolerance, 25);
        assert_eq!(generic.padding_percent, 5);

        let operational = PipelineConfig::default();
        assert_eq!(operational.distance_tolerance, 80.0);
        assert_eq!(operational.grayish_tolerance, 30);
        assert_eq!(operational.padding_percent, 8);
        assert_eq!(operational.target_sizes, DEFAULT_SIZES);
        assert_eq!(operational.main_icon.size, 512);
        assert_eq!(operational.window_icon.size, 64);
        assert!(operational.validate().is_ok());
    }

    #[test]
    fn validation() {
        let mut config = PipelineConfig::default();
        config.target_sizes = vec![16, 0];
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::default();
        config.target_sizes.clear();
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::default();
        config.distance_tolerance = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::default();
        config.master_size = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn softening_clamps_with_custom_floor() {
        let soft = EdgeSoftening {
            step: 100,
            min_alpha: 0,
        };
        assert_eq!(soft.alpha_for(2), 55);
        assert_eq!(soft.alpha_for(3), 0);
    }
}
