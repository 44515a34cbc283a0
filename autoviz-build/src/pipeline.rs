use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::config::Interaction;

/// Synthetic field holding each row's selection state
pub const SELECTION_FIELD: &str = "#selection";
pub const SELECTED: &str = "✓";
pub const UNSELECTED: &str = "✗";

/// Named data transform stages, in the vocabulary of the client-side runtime
#[derive(
    Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Stage {
    AddConstants,
    Filter,
    Bin,
    Summarize,
    Reduce,
    Series,
    Sort,
    Stack,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformCommand {
    pub stage: Stage,
    pub command: String,
}

impl TransformCommand {
    pub fn new(stage: Stage, command: impl Into<String>) -> Self {
        Self {
            stage,
            command: command.into(),
        }
    }
}

/// Command strings for each transform stage of one dataset. Empty strings are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformParameters {
    pub constants: String,
    pub filter: String,
    pub bin: String,
    pub summarize: String,
    /// Fields kept by the reduce stage ahead of a series transform
    pub used: String,
    pub series: String,
    pub sort: String,
    pub stack: String,
}

impl TransformParameters {
    pub fn has_series(&self) -> bool {
        !self.series.is_empty()
    }
}

/// Filter command implied by a selection-filter interaction, if any
pub fn selection_filter(interactions: &[Interaction]) -> Option<String> {
    interactions.iter().find_map(|interaction| match interaction {
        Interaction::Filter(mode) => {
            let state = match mode.as_deref() {
                Some("unselected") => UNSELECTED,
                _ => SELECTED,
            };
            Some(format!("{SELECTION_FIELD} is {state}"))
        }
        _ => None,
    })
}

/// Order the configured transforms into the fixed stage sequence.
///
/// Stages with an empty command are skipped. Reduce only runs ahead of a series
/// transform when nothing was summarized, and stack always comes last.
pub fn build_pipeline(
    params: &TransformParameters,
    interactions: &[Interaction],
) -> Vec<TransformCommand> {
    let selection = selection_filter(interactions).unwrap_or_default();
    let reduce = if params.has_series() && params.summarize.is_empty() {
        params.used.as_str()
    } else {
        ""
    };

    [
        (Stage::AddConstants, params.constants.as_str()),
        (Stage::Filter, selection.as_str()),
        (Stage::Filter, params.filter.as_str()),
        (Stage::Bin, params.bin.as_str()),
        (Stage::Summarize, params.summarize.as_str()),
        (Stage::Reduce, reduce),
        (Stage::Series, params.series.as_str()),
        (Stage::Sort, params.sort.as_str()),
        (Stage::Stack, params.stack.as_str()),
    ]
    .into_iter()
    .filter(|(_, command)| !command.is_empty())
    .map(|(stage, command)| TransformCommand::new(stage, command))
    .collect()
}
