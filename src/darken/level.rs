use std::fmt;

use facetprep_common::{Error, Result};

/// A validated darkness factor in `[0.1, 1.0]`.
///
/// `1.0` leaves the image unchanged; smaller factors darken it.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct DarknessLevel(f32);

impl DarknessLevel {
    pub const MIN: f32 = 0.1;
    pub const MAX: f32 = 1.0;

    pub fn new(factor: f32) -> Result<Self> {
        if !factor.is_finite() || !(Self::MIN..=Self::MAX).contains(&factor) {
            return Err(Error::invalid_input(format!(
                "darkness level must be between {:.1} and {:.1}, got {}",
                Self::MIN,
                Self::MAX,
                factor
            )));
        }
        Ok(Self(factor))
    }

    pub fn factor(self) -> f32 {
        self.0
    }

    /// Name of the level's output directory, e.g. `darkness_0.5`.
    pub fn dir_name(self) -> String {
        format!("darkness_{:.1}", self.0)
    }
}

impl fmt::Display for DarknessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(DarknessLevel::new(0.1).is_ok());
        assert!(DarknessLevel::new(1.0).is_ok());
        assert!(DarknessLevel::new(0.55).is_ok());

        assert!(DarknessLevel::new(0.0).is_err());
        assert!(DarknessLevel::new(0.09).is_err());
        assert!(DarknessLevel::new(1.01).is_err());
        assert!(DarknessLevel::new(-0.5).is_err());
        assert!(DarknessLevel::new(f32::NAN).is_err());
        assert!(DarknessLevel::new(f32::INFINITY).is_err());
    }

    #[test]
    fn test_out_of_range_is_invalid_input() {
        let err = DarknessLevel::new(2.0).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().contains("between 0.1 and 1.0"));
    }

    #[test]
    fn test_dir_name() {
        let names: Vec<String> = [0.9, 0.7, 0.5, 0.3, 0.1, 1.0]
            .into_iter()
            .map(|f| DarknessLevel::new(f).unwrap().dir_name())
            .collect();
        assert_eq!(
            names,
            [
                "darkness_0.9",
                "darkness_0.7",
                "darkness_0.5",
                "darkness_0.3",
                "darkness_0.1",
                "darkness_1.0"
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(DarknessLevel::new(0.6).unwrap().to_string(), "0.6");
    }
}
