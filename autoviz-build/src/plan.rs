use autoviz_data::Dataset;
use autoviz_scales::{make_numeric_scale, ScaleOptions, ScaleSpec};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::ChartConfig;
use crate::error::BuildError;
use crate::keys::{select_keys, split_fields, KeySpec};
use crate::pipeline::{build_pipeline, TransformCommand};

/// Everything the renderer needs to prepare one chart's data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPlan {
    pub keys: KeySpec,
    pub split_fields: Vec<String>,
    pub transforms: Vec<TransformCommand>,
    /// Scale for the first x field when it is numeric or a date
    pub x_scale: Option<ScaleSpec>,
    pub y_scale: Option<ScaleSpec>,
}

impl DataPlan {
    pub fn build(
        config: &ChartConfig,
        dataset: &Dataset,
        options: &ScaleOptions,
    ) -> Result<Self, BuildError> {
        let keys = select_keys(config, dataset)?;
        let split_fields = split_fields(config);
        let transforms = build_pipeline(&config.transforms, &config.interactions);
        let x_scale = axis_scale(&config.x, dataset, options)?;
        let y_scale = axis_scale(&config.y, dataset, options)?;

        debug!(
            "data plan: keys {:?}, {} split fields, {} transform stages",
            keys.fields(),
            split_fields.len(),
            transforms.len()
        );

        Ok(Self {
            keys,
            split_fields,
            transforms,
            x_scale,
            y_scale,
        })
    }

    pub fn to_json(&self) -> Result<String, BuildError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn axis_scale(
    fields: &[String],
    dataset: &Dataset,
    options: &ScaleOptions,
) -> Result<Option<ScaleSpec>, BuildError> {
    let Some(name) = fields.first() else {
        return Ok(None);
    };
    let field = dataset.field(name)?;
    if field.is_numeric() || field.is_date() {
        Ok(Some(make_numeric_scale(field, options)))
    } else {
        Ok(None)
    }
}
