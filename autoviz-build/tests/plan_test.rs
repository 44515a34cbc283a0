use autoviz_build::{
    is_usable_key, select_keys, BuildError, ChartConfig, DataPlan, Diagram, Element,
    Interaction, Stage, TransformParameters,
};
use autoviz_data::{Dataset, Field, FieldConverter, TransformKind};
use autoviz_scales::ScaleOptions;
use rstest::rstest;

fn text(name: &str, values: &[&str]) -> Field {
    Field::categorical(name, values.iter().map(|v| Some(*v)))
}

fn raw_dataset() -> Dataset {
    Dataset::try_new([
        text("year", &["2001", "2002", "2003", "2001", "2002", "2003"]),
        text("region", &["north", "north", "north", "south", "south", "south"]),
        text("revenue", &["10", "25", "61", "8", "430", "1,200"]),
    ])
    .unwrap()
}

#[test]
fn test_line_chart_plan() -> Result<(), BuildError> {
    let dataset = raw_dataset().convert_fields(&mut FieldConverter::seeded(42));
    assert!(dataset.field("year")?.is_date());
    assert!(dataset.field("revenue")?.is_numeric());

    let config = ChartConfig::from_json(
        r#"{
            "x": ["year"],
            "y": ["revenue"],
            "color": ["region"],
            "size": ["revenue"],
            "element": "line",
            "interactions": [{"filter": null}],
            "transforms": {"series": "revenue", "used": "year, revenue, region", "sort": "year"}
        }"#,
    )?;
    let plan = DataPlan::build(&config, &dataset, &ScaleOptions::default())?;

    assert_eq!(plan.keys.fields(), ["region"]);
    assert_eq!(plan.split_fields, vec!["region"]);
    assert_eq!(
        plan.transforms.iter().map(|t| t.stage).collect::<Vec<_>>(),
        vec![Stage::Filter, Stage::Reduce, Stage::Series, Stage::Sort]
    );
    assert_eq!(plan.transforms[0].command, "#selection is ✓");

    let x = plan.x_scale.expect("year is a date axis");
    assert_eq!(x.transform, TransformKind::Date);
    let y = plan.y_scale.expect("revenue is a numeric axis");
    assert!(y.contains(8.0) && y.contains(1200.0));
    Ok(())
}

#[test]
fn test_scatter_keys_from_x_and_color() -> Result<(), BuildError> {
    let dataset = raw_dataset().convert_fields(&mut FieldConverter::seeded(1));
    let config = ChartConfig::default()
        .with_x(["year"])
        .with_y(["revenue"])
        .with_color(["region"])
        .with_element(Element::Point);
    let keys = select_keys(&config, &dataset)?;
    assert_eq!(keys.fields(), ["year", "region"]);
    assert_eq!(keys.key_for_row(&dataset, 4)?, "2002-01-01T00:00:00|south");
    Ok(())
}

#[test]
fn test_treemap_without_positions_is_an_error() {
    let config = ChartConfig::default()
        .with_diagram(Diagram::Treemap)
        .with_color(["region"]);
    let result = DataPlan::build(&config, &raw_dataset(), &ScaleOptions::default());
    assert!(matches!(result, Err(BuildError::Configuration(_))));
}

#[test]
fn test_duplicate_rows_are_not_a_key() -> Result<(), BuildError> {
    let dataset = Dataset::try_new([text("k", &["A", "A", "B"])])?;
    assert!(!is_usable_key(&["k"], &dataset)?);
    Ok(())
}

#[rstest]
#[case(&["year", "region"], false)]
#[case(&["region", "year"], false)]
#[case(&["year", "region"], true)]
#[case(&["revenue"], true)]
fn test_sorting_keeps_key_usable(
    #[case] key: &[&str],
    #[case] descending: bool,
) -> Result<(), BuildError> {
    let dataset = raw_dataset().convert_fields(&mut FieldConverter::seeded(9));
    assert!(is_usable_key(key, &dataset)?);

    let sorted = dataset.sort_by(key, descending)?;
    assert!(is_usable_key(key, &sorted)?);
    Ok(())
}

#[test]
fn test_unselected_filter() {
    let config = ChartConfig::default()
        .with_interaction(Interaction::Filter(Some("unselected".to_string())))
        .with_transforms(TransformParameters {
            stack: "revenue".to_string(),
            ..Default::default()
        });
    let plan = DataPlan::build(&config, &raw_dataset(), &ScaleOptions::default()).unwrap();
    assert_eq!(plan.transforms[0].command, "#selection is ✗");
    assert_eq!(plan.transforms[1].stage, Stage::Stack);
    assert!(plan.keys.is_row());
}
