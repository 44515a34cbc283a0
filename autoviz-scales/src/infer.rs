use autoviz_data::{Field, TransformKind};
use log::debug;

use crate::array;
use crate::bins::optimal_bin_count;
use crate::config::ScaleOptions;
use crate::numeric::{LinearNumericScale, LogNumericScale};
use crate::spec::ScaleSpec;
use crate::temporal::DateScale;
use crate::transform::set_transform;

/// Cap on the automatically chosen tick count, before the extra boundary tick
const MAX_AUTO_TICKS: usize = 20;

/// Cap on any requested tick count
const MAX_TICK_COUNT: usize = 1_000;

const INTEGER_TOLERANCE: f64 = 1e-6;

/// Infer the axis scale for a numeric or date field.
///
/// The field's transform is computed and memoized on first use. Never fails: fields
/// without an extent get a small domain around zero.
pub fn make_numeric_scale(field: &Field, options: &ScaleOptions) -> ScaleSpec {
    let transform = set_transform(field);
    let tick_count = if options.desired_tick_count < 1 {
        optimal_bin_count(field).min(MAX_AUTO_TICKS) + 1
    } else {
        (options.desired_tick_count as usize).min(MAX_TICK_COUNT)
    };
    let domain = (field.min().unwrap_or(0.0), field.max().unwrap_or(0.0));

    let spec = if field.is_date() {
        make_date_scale(field, domain, tick_count, options)
    } else {
        match transform {
            TransformKind::Log if domain.0 > 0.0 => {
                make_log_scale(domain, tick_count, options)
            }
            TransformKind::Root => {
                let options = root_adjusted(domain, options);
                make_linear_scale(field, domain, tick_count, &options, TransformKind::Root)
            }
            _ => make_linear_scale(field, domain, tick_count, options, TransformKind::Linear),
        }
    };

    debug!(
        "scale for {}: {} domain {:?} with {} ticks",
        field.name(),
        spec.transform,
        spec.domain,
        spec.ticks.len()
    );
    spec
}

/// Whitespace measured on a root axis shrinks by sqrt(min/max) relative to linear
fn root_adjusted(domain: (f64, f64), options: &ScaleOptions) -> ScaleOptions {
    let (min, max) = domain;
    if min <= 0.0 {
        return *options;
    }
    let factor = (min / max).sqrt();
    let mut adjusted = *options;
    adjusted.zero_tolerance *= factor;
    adjusted.pad_fraction[0] *= factor;
    adjusted
}

fn make_linear_scale(
    field: &Field,
    domain: (f64, f64),
    tick_count: usize,
    options: &ScaleOptions,
    transform: TransformKind,
) -> ScaleSpec {
    let count = tick_count as f64;
    let scale = LinearNumericScale::new(domain)
        .expand_degenerate()
        .include_zero(options.zero_tolerance)
        .pad(options.pad_fraction);

    let (scale, ticks) = if options.for_binning {
        let (lo, hi) = scale.get_domain();
        match array::tick_step(lo, hi, count) {
            Some(step) => {
                let step = step.max(integral_granularity(field).unwrap_or(0.0));
                let scale = scale.snap_to_step(step);
                let ticks = scale.stepped_ticks(step);
                (scale, ticks)
            }
            None => {
                let ticks = scale.ticks(count);
                (scale, ticks)
            }
        }
    } else {
        let scale = if options.nice { scale.nice(count) } else { scale };
        let ticks = scale.ticks(count);
        (scale, ticks)
    };

    ScaleSpec {
        transform,
        domain: scale.get_domain(),
        tick_count,
        nice: options.nice || options.for_binning,
        ticks,
        date_unit: None,
    }
}

fn make_log_scale(domain: (f64, f64), tick_count: usize, options: &ScaleOptions) -> ScaleSpec {
    let mut scale = LogNumericScale::new(domain)
        .include_zero(options.zero_tolerance)
        .pad(options.pad_fraction);
    if options.nice || options.for_binning {
        scale = scale.nice();
    }

    ScaleSpec {
        transform: TransformKind::Log,
        domain: scale.get_domain(),
        tick_count,
        nice: options.nice || options.for_binning,
        ticks: scale.ticks(tick_count),
        date_unit: None,
    }
}

fn make_date_scale(
    field: &Field,
    domain: (f64, f64),
    tick_count: usize,
    options: &ScaleOptions,
) -> ScaleSpec {
    let mut scale = DateScale::new(domain)
        .with_unit(field.date_unit())
        .expand_degenerate()
        .pad(options.pad_fraction);
    let interval = scale.tick_interval(tick_count);
    if options.nice || options.for_binning {
        scale = scale.nice(interval.as_ref());
    }

    ScaleSpec {
        transform: TransformKind::Date,
        domain: scale.get_domain(),
        tick_count,
        nice: options.nice || options.for_binning,
        ticks: scale.ticks(interval.as_ref()),
        date_unit: field.date_unit(),
    }
}

/// The field's granularity when every value sits on a whole-number grid
fn integral_granularity(field: &Field) -> Option<f64> {
    field
        .stats()
        .granularity
        .filter(|g| *g >= 1.0 && (g - g.round()).abs() < INTEGER_TOLERANCE)
        .map(f64::round)
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoviz_data::DateUnit;
    use chrono::NaiveDate;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    fn skewed(low: f64, high: f64) -> Field {
        let values = std::iter::repeat(Some(low))
            .take(9)
            .chain(std::iter::once(Some(high)));
        Field::numeric("x", values)
    }

    #[test]
    fn test_linear_nice() {
        let field = Field::numeric("x", [Some(1.1), Some(10.9)]);
        let spec = make_numeric_scale(
            &field,
            &ScaleOptions::default().with_desired_tick_count(5),
        );
        assert_eq!(spec.transform, TransformKind::Linear);
        assert_eq!(spec.domain, (0.0, 12.0));
        assert_eq!(spec.tick_count, 5);
        assert_eq!(spec.ticks, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 12.0]);
    }

    #[test]
    fn test_log_scale() {
        let field = skewed(10.0, 1000.0);
        let spec = make_numeric_scale(&field, &ScaleOptions::default());
        assert_eq!(spec.transform, TransformKind::Log);
        assert_approx_eq!(f64, spec.domain.0, 10.0);
        assert_approx_eq!(f64, spec.domain.1, 1000.0);
        assert!(spec.ticks.contains(&100.0));
        assert_eq!(field.transform(), Some(TransformKind::Log));
    }

    #[test]
    fn test_root_scales_zero_tolerance() {
        // min/max = 0.04 and sqrt(0.04) = 0.2: a tolerance of 0.15 becomes 0.03
        let field = skewed(4.0, 100.0);
        let options = ScaleOptions::default()
            .with_nice(false)
            .with_desired_tick_count(5);

        let spec = make_numeric_scale(&field, &options.with_zero_tolerance(0.15));
        assert_eq!(spec.transform, TransformKind::Root);
        assert_eq!(spec.domain, (4.0, 100.0));

        let spec = make_numeric_scale(&field, &options.with_zero_tolerance(0.25));
        assert_eq!(spec.domain, (0.0, 100.0));
    }

    #[test]
    fn test_degenerate_field() {
        let field = Field::numeric("x", [Some(5.0), Some(5.0), Some(5.0)]);
        let spec = make_numeric_scale(&field, &ScaleOptions::default());
        assert_eq!(spec.tick_count, 2);
        assert!(spec.span() > 0.0);
        assert!(spec.contains(5.0));
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    fn test_huge_tick_count_is_capped(#[case] for_binning: bool) {
        let field = Field::numeric("x", [Some(1.1), Some(10.9)]);
        let options = ScaleOptions::default()
            .with_for_binning(for_binning)
            .with_desired_tick_count(20_000_000);
        let spec = make_numeric_scale(&field, &options);
        assert_eq!(spec.tick_count, MAX_TICK_COUNT);
        assert!(spec.ticks.len() <= 2 * MAX_TICK_COUNT);

        let spec = make_numeric_scale(&field, &options.with_desired_tick_count(i32::MAX));
        assert!(spec.ticks.len() <= 2 * MAX_TICK_COUNT);
    }

    #[test]
    fn test_empty_field() {
        let field = Field::numeric("x", [None, None]);
        let spec = make_numeric_scale(&field, &ScaleOptions::default().with_nice(false));
        assert_eq!(spec.domain, (-1.0, 1.0));
    }

    #[test]
    fn test_binning_respects_integer_granularity() {
        let field = Field::numeric("x", (0..10).map(|i| Some(i as f64)));
        let options = ScaleOptions::default()
            .with_nice(false)
            .with_for_binning(true)
            .with_desired_tick_count(20);
        let spec = make_numeric_scale(&field, &options);
        assert_eq!(spec.domain, (0.0, 9.0));
        assert_eq!(spec.ticks, (0..10).map(|i| i as f64).collect::<Vec<_>>());
        assert!(spec.nice);
    }

    #[test]
    fn test_date_field() {
        let field = Field::dates(
            "when",
            (2000..2010).map(|y| NaiveDate::from_ymd_opt(y, 1, 1)?.and_hms_opt(0, 0, 0)),
        );
        let spec = make_numeric_scale(&field, &ScaleOptions::default());
        assert_eq!(spec.transform, TransformKind::Date);
        assert_eq!(spec.date_unit, Some(DateUnit::Year));
        assert!(spec.ticks.len() >= 2);
        assert!(spec.contains(field.min().unwrap()));
        assert!(spec.contains(field.max().unwrap()));
    }
}
