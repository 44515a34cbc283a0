use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantNames};

use crate::error::BuildError;
use crate::pipeline::TransformParameters;

/// Structurally laid out chart kinds, as opposed to coordinate-axis charts
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Diagram {
    Bubble,
    Chord,
    Cloud,
    Map,
    Network,
    Tree,
    Treemap,
}

impl Diagram {
    /// Diagrams whose layout is driven by their position fields
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Diagram::Chord | Diagram::Tree | Diagram::Treemap | Diagram::Map
        )
    }
}

/// Graphical element used to draw each row or group
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Hash,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Element {
    #[default]
    Point,
    Bar,
    Text,
    Line,
    Path,
    Area,
    Edge,
    Polygon,
}

impl Element {
    /// Elements that draw one shape per group of rows rather than one per row
    pub fn is_single_shape(&self) -> bool {
        matches!(self, Element::Line | Element::Path | Element::Area)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interaction {
    Select,
    PanZoom,
    /// Filter rows by selection state; `"unselected"` keeps the unselected rows
    Filter(Option<String>),
    None,
}

/// Field encodings and options for a single chart element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Explicit key fields; used verbatim when present
    pub keys: Vec<String>,
    pub x: Vec<String>,
    pub y: Vec<String>,
    pub split: Vec<String>,
    pub color: Vec<String>,
    pub size: Vec<String>,
    pub opacity: Vec<String>,
    pub label: Vec<String>,
    pub diagram: Option<Diagram>,
    pub element: Element,
    pub interactions: Vec<Interaction>,
    pub transforms: TransformParameters,
}

impl ChartConfig {
    pub fn from_json(text: &str) -> Result<Self, BuildError> {
        Ok(serde_json::from_str(text)?)
    }

    /// x then y fields, without repeats
    pub fn position_fields(&self) -> Vec<String> {
        distinct([&self.x, &self.y])
    }

    /// color, size, opacity and label fields, without repeats
    pub fn aesthetic_fields(&self) -> Vec<String> {
        distinct([&self.color, &self.size, &self.opacity, &self.label])
    }

    pub fn with_keys<I: IntoIterator<Item = S>, S: Into<String>>(mut self, keys: I) -> Self {
        self.keys = names(keys);
        self
    }

    pub fn with_x<I: IntoIterator<Item = S>, S: Into<String>>(mut self, fields: I) -> Self {
        self.x = names(fields);
        self
    }

    pub fn with_y<I: IntoIterator<Item = S>, S: Into<String>>(mut self, fields: I) -> Self {
        self.y = names(fields);
        self
    }

    pub fn with_split<I: IntoIterator<Item = S>, S: Into<String>>(mut self, fields: I) -> Self {
        self.split = names(fields);
        self
    }

    pub fn with_color<I: IntoIterator<Item = S>, S: Into<String>>(mut self, fields: I) -> Self {
        self.color = names(fields);
        self
    }

    pub fn with_size<I: IntoIterator<Item = S>, S: Into<String>>(mut self, fields: I) -> Self {
        self.size = names(fields);
        self
    }

    pub fn with_opacity<I: IntoIterator<Item = S>, S: Into<String>>(mut self, fields: I) -> Self {
        self.opacity = names(fields);
        self
    }

    pub fn with_label<I: IntoIterator<Item = S>, S: Into<String>>(mut self, fields: I) -> Self {
        self.label = names(fields);
        self
    }

    pub fn with_diagram(mut self, diagram: Diagram) -> Self {
        self.diagram = Some(diagram);
        self
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.element = element;
        self
    }

    pub fn with_interaction(mut self, interaction: Interaction) -> Self {
        self.interactions.push(interaction);
        self
    }

    pub fn with_transforms(mut self, transforms: TransformParameters) -> Self {
        self.transforms = transforms;
        self
    }
}

fn names<I: IntoIterator<Item = S>, S: Into<String>>(items: I) -> Vec<String> {
    items.into_iter().map(Into::into).collect()
}

/// Concatenate field lists keeping the first occurrence of each name
pub(crate) fn distinct<'a>(lists: impl IntoIterator<Item = &'a Vec<String>>) -> Vec<String> {
    lists
        .into_iter()
        .flatten()
        .cloned()
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}
