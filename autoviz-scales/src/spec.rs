use autoviz_data::{DateUnit, TransformKind};
use serde::{Deserialize, Serialize};

/// Axis scale decision for one field.
///
/// Date domains and ticks are expressed in days since 1970-01-01.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleSpec {
    pub transform: TransformKind,
    /// Domain after zero inclusion, padding and nice rounding
    pub domain: (f64, f64),
    /// Tick count requested of the renderer
    pub tick_count: usize,
    pub nice: bool,
    /// Tick positions inside the domain
    pub ticks: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_unit: Option<DateUnit>,
}

impl ScaleSpec {
    pub fn span(&self) -> f64 {
        self.domain.1 - self.domain.0
    }

    pub fn contains(&self, value: f64) -> bool {
        let (lo, hi) = self.domain;
        lo.min(hi) <= value && value <= lo.max(hi)
    }
}
