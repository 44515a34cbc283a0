use serde::{Deserialize, Serialize};

/// Options controlling how an axis scale is inferred from a field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleOptions {
    /// Extend the domain to human-friendly boundaries
    pub nice: bool,
    /// Fraction of the data span added below and above the data
    pub pad_fraction: [f64; 2],
    /// Include zero when it adds no more than this fraction of whitespace.
    /// 0 never forces zero, 1 always does.
    pub zero_tolerance: f64,
    /// Target number of ticks; values below 1 pick a count from the data distribution
    pub desired_tick_count: i32,
    /// Domain and ticks will be used as bin boundaries
    pub for_binning: bool,
}

impl Default for ScaleOptions {
    fn default() -> Self {
        Self {
            nice: true,
            pad_fraction: [0.0, 0.0],
            zero_tolerance: 0.0,
            desired_tick_count: 0,
            for_binning: false,
        }
    }
}

impl ScaleOptions {
    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }

    pub fn with_pad_fraction(mut self, low: f64, high: f64) -> Self {
        self.pad_fraction = [low, high];
        self
    }

    pub fn with_zero_tolerance(mut self, zero_tolerance: f64) -> Self {
        self.zero_tolerance = zero_tolerance;
        self
    }

    pub fn with_desired_tick_count(mut self, count: i32) -> Self {
        self.desired_tick_count = count;
        self
    }

    pub fn with_for_binning(mut self, for_binning: bool) -> Self {
        self.for_binning = for_binning;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let options: ScaleOptions =
            serde_json::from_str(r#"{"zero_tolerance": 0.2, "pad_fraction": [0.05, 0.1]}"#)
                .unwrap();
        assert_eq!(
            options,
            ScaleOptions::default()
                .with_zero_tolerance(0.2)
                .with_pad_fraction(0.05, 0.1)
        );
    }
}
