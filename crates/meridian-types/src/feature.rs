use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::flow::FlowLinks;
use crate::geometry::{Coordinate, MultiPolygon};

/// A decoded region: geometry plus properties.
///
/// Features have no persisted key. Their identity is their index in the
/// decoded collection, which is also what flow links point at.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct Feature {
  pub geometry: MultiPolygon,
  pub properties: Properties,
}

impl Feature {
  #[must_use]
  pub fn new(geometry: MultiPolygon, properties: Properties) -> Self {
    Self {
      geometry,
      properties,
    }
  }

  #[must_use]
  pub fn vertex_count(&self) -> usize {
    self.geometry.vertex_count()
  }
}

/// Feature properties.
///
/// The fields the pipeline itself produces are typed. Anything else the
/// source carries is kept verbatim in `extra`.
///
/// ```text
/// ┌────────────────┬──────────────────────────────────────────────────┐
/// │ Field          │ Source                                           │
/// ├────────────────┼──────────────────────────────────────────────────┤
/// │ classification │ leading digit of a polyline record ("value")     │
/// │ name           │ topology `properties.name`                       │
/// │ flows          │ decoded `properties.flows`, then symmetrized     │
/// │ net_flow       │ sum of `flows`, computed after symmetrization    │
/// │ centroid       │ vertex mean of the largest outer ring            │
/// │ extra          │ every other source property                      │
/// └────────────────┴──────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Properties {
  #[serde(rename = "value", skip_serializing_if = "Option::is_none")]
  pub classification: Option<u8>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub flows: Option<FlowLinks>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub net_flow: Option<i64>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub centroid: Option<Coordinate>,

  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl Properties {
  /// Properties of a polyline record: just its classification digit.
  #[must_use]
  pub fn classified(classification: u8) -> Self {
    Self {
      classification: Some(classification),
      ..Self::default()
    }
  }
}
