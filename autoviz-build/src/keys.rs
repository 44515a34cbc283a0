use autoviz_data::field::ROW_FIELD;
use autoviz_data::{DataError, Dataset, RowComparator};
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::{distinct, ChartConfig, Diagram, Element};
use crate::error::BuildError;

/// Ordered fields whose combined values identify a row across data updates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeySpec(Vec<String>);

impl KeySpec {
    pub fn new<I: IntoIterator<Item = S>, S: Into<String>>(fields: I) -> Self {
        Self(fields.into_iter().map(Into::into).collect())
    }

    /// Fallback key: the synthetic row index
    pub fn row() -> Self {
        Self(vec![ROW_FIELD.to_string()])
    }

    pub fn fields(&self) -> &[String] {
        &self.0
    }

    pub fn is_row(&self) -> bool {
        self.0.len() == 1 && self.0[0] == ROW_FIELD
    }

    /// Composite key string for one row, `"ALL"` when there are no key fields
    pub fn key_for_row(&self, dataset: &Dataset, row: usize) -> Result<String, DataError> {
        key_for_row(&self.0, dataset, row)
    }
}

/// Fields that partition rows into separately drawn groups.
///
/// Declared splits, then color and opacity. Size also splits, except for lines and paths.
pub fn split_fields(config: &ChartConfig) -> Vec<String> {
    let mut fields = config
        .split
        .iter()
        .chain(&config.color)
        .chain(&config.opacity)
        .cloned()
        .collect::<Vec<_>>();
    if !matches!(config.element, Element::Line | Element::Path) {
        fields.extend(config.size.iter().cloned());
    }
    fields
}

/// True when sorting by `fields` leaves no two adjacent rows equal.
///
/// An empty candidate never identifies rows.
pub fn is_usable_key<S: AsRef<str>>(fields: &[S], dataset: &Dataset) -> Result<bool, DataError> {
    if fields.is_empty() {
        return Ok(false);
    }
    Ok(RowComparator::new(dataset, fields, false)?.is_injective(dataset.row_count()))
}

/// Choose the key fields for a chart, first usable candidate wins
pub fn select_keys(config: &ChartConfig, dataset: &Dataset) -> Result<KeySpec, BuildError> {
    if !config.keys.is_empty() {
        debug!("using declared keys {:?}", config.keys);
        return Ok(KeySpec::new(config.keys.iter().cloned()));
    }

    match config.diagram {
        Some(Diagram::Chord) => {
            let positions = config.position_fields();
            require_fields(Diagram::Chord, &positions)?;
            let candidate = distinct([&positions, &config.aesthetic_fields()]);
            if is_usable_key(&candidate, dataset)? {
                debug!("chord keyed by {candidate:?}");
                return Ok(KeySpec(candidate));
            }
        }
        Some(diagram @ (Diagram::Tree | Diagram::Treemap | Diagram::Map)) => {
            let candidate = config.position_fields();
            require_fields(diagram, &candidate)?;
            debug!("{diagram} keyed by position fields {candidate:?}");
            return Ok(KeySpec(candidate));
        }
        _ => {}
    }

    if config.element.is_single_shape() {
        let fields = split_fields(config);
        debug!("{} keyed by split fields {fields:?}", config.element);
        return Ok(KeySpec(fields));
    }

    if config.diagram.is_none() {
        let candidate = distinct([&config.x, &config.aesthetic_fields()]);
        if is_usable_key(&candidate, dataset)? {
            debug!("keyed by x and aesthetic fields {candidate:?}");
            return Ok(KeySpec(candidate));
        }
    }

    debug!("no usable key fields, keying by {ROW_FIELD}");
    Ok(KeySpec::row())
}

fn require_fields(diagram: Diagram, positions: &[String]) -> Result<(), BuildError> {
    if positions.is_empty() {
        return Err(BuildError::Configuration(format!(
            "{diagram} diagram requires at least one position field"
        )));
    }
    Ok(())
}

/// Composite key string: field values joined by `|`, nulls written as `null`
pub fn key_for_row<S: AsRef<str>>(
    fields: &[S],
    dataset: &Dataset,
    row: usize,
) -> Result<String, DataError> {
    if fields.is_empty() {
        return Ok("ALL".to_string());
    }
    let values = fields
        .iter()
        .map(|name| {
            let field = dataset.field(name.as_ref())?;
            Ok(field
                .value(row)
                .map(|v| v.to_string())
                .unwrap_or_else(|| "null".to_string()))
        })
        .collect::<Result<Vec<_>, DataError>>()?;
    Ok(values.iter().join("|"))
}
