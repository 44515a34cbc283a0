use autoviz_data::Field;

const CUBE_ROOT: f64 = 0.33333;

/// Histogram bin count using the larger of the Freedman–Diaconis and Scott bin widths.
///
/// Returns 1 when both widths are zero, i.e. for constant fields.
pub fn optimal_bin_count(field: &Field) -> usize {
    let stats = field.stats();
    let n = (stats.valid as f64).powf(CUBE_ROOT);
    let iqr = stats.q3.unwrap_or(0.0) - stats.q1.unwrap_or(0.0);
    let h1 = 2.0 * iqr / n;
    let h2 = 3.5 * stats.stddev.unwrap_or(0.0) / n;
    let h = h1.max(h2);
    if h == 0.0 || !h.is_finite() {
        return 1;
    }

    let span = field.max().unwrap_or(0.0) - field.min().unwrap_or(0.0);
    ((span / h + 0.499).round() as usize).max(1)
}
