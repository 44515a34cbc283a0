use autoviz_data::{Field, TransformKind};

/// Strongly right-skewed data spanning more than this ratio gets a log axis
const LOG_SPAN_RATIO: f64 = 75.0;

/// Pick the axis transform for a field from its skew and extent.
///
/// Fields without a skew statistic (anything non-numeric) are linear.
pub fn choose_transform(field: &Field) -> TransformKind {
    let Some(skew) = field.stats().skew else {
        return TransformKind::Linear;
    };
    let (Some(min), Some(max)) = (field.min(), field.max()) else {
        return TransformKind::Linear;
    };

    if skew > 2.0 && min > 0.0 && max > LOG_SPAN_RATIO * min {
        TransformKind::Log
    } else if skew > 1.0 && min >= 0.0 {
        TransformKind::Root
    } else {
        TransformKind::Linear
    }
}

/// The field's memoized transform, computed on first use
pub fn set_transform(field: &Field) -> TransformKind {
    field.transform_or_init(choose_transform)
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoviz_data::FieldStats;
    use rstest::rstest;

    fn field_with(skew: Option<f64>, min: f64, max: f64) -> Field {
        Field::numeric("x", [Some(min), Some(max)]).with_stats(FieldStats {
            valid: 2,
            min: Some(min),
            max: Some(max),
            skew,
            ..Default::default()
        })
    }

    #[rstest]
    #[case(Some(3.5), 10.0, 1000.0, TransformKind::Log)]
    #[case(Some(3.5), 10.0, 700.0, TransformKind::Root)]
    #[case(Some(3.5), 0.0, 1000.0, TransformKind::Root)]
    #[case(Some(1.5), 0.0, 100.0, TransformKind::Root)]
    #[case(Some(1.5), -1.0, 100.0, TransformKind::Linear)]
    #[case(Some(0.3), 0.0, 100.0, TransformKind::Linear)]
    #[case(None, 10.0, 1000.0, TransformKind::Linear)]
    fn test_choose_transform(
        #[case] skew: Option<f64>,
        #[case] min: f64,
        #[case] max: f64,
        #[case] expected: TransformKind,
    ) {
        assert_eq!(choose_transform(&field_with(skew, min, max)), expected);
    }

    #[test]
    fn test_set_transform_memoizes() {
        let field = field_with(Some(3.5), 10.0, 1000.0);
        assert_eq!(field.transform(), None);
        assert_eq!(set_transform(&field), TransformKind::Log);
        assert_eq!(field.transform(), Some(TransformKind::Log));
    }

    #[test]
    fn test_categorical_is_linear() {
        let field = Field::categorical("c", [Some("a"), Some("b")]);
        assert_eq!(set_transform(&field), TransformKind::Linear);
    }
}
