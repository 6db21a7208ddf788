use std::collections::BTreeMap;

use meridian_types::{Coordinate, Feature, FlowLinks, MultiPolygon, Polygon, Properties, Ring};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::TopologyConfig;
use crate::error::DecodeError;
use crate::flow::{decode_flows, symmetrize};
use crate::session::{Framing, RecordDecoder};

#[derive(Debug, Deserialize)]
struct Topology {
    #[serde(default)]
    transform: Option<Transform>,
    #[serde(default)]
    arcs: Vec<Vec<Vec<f64>>>,
    objects: BTreeMap<String, Geometry>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
struct Transform {
    scale: [f64; 2],
    translate: [f64; 2],
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum Geometry {
    GeometryCollection {
        geometries: Vec<Geometry>,
    },
    Polygon {
        arcs: Vec<Vec<i64>>,
        #[serde(default)]
        properties: Map<String, Value>,
    },
    MultiPolygon {
        arcs: Vec<Vec<Vec<i64>>>,
        #[serde(default)]
        properties: Map<String, Value>,
    },
    #[serde(other)]
    Unsupported,
}

/// Decode a topology document into its features, with flows linked.
///
/// The document shares boundaries between regions as indexed arcs:
///
/// ```text
///   Topology
///   ├── transform?   scale/translate for quantized, delta-coded arcs
///   ├── arcs         [[x, y], …] polylines
///   └── objects
///       └── <name>   GeometryCollection
///           └── Polygon | MultiPolygon
///               ├── arcs        rings as arc indices (~i = arc i reversed)
///               └── properties  name, flows, anything else
/// ```
///
/// Feature order follows geometry order, and that position is the id flow
/// indices refer to. A geometry whose `flows` string is malformed keeps
/// its place with an empty row. Once every feature is built the rows are
/// symmetrized, then net flow and centroid are filled in.
///
/// # Errors
///
/// - [`DecodeError::Document`] if the text is not a topology.
/// - [`DecodeError::MissingObject`] / [`DecodeError::NoObjects`] when no
///   object can be selected.
/// - [`DecodeError::ArcOutOfRange`] for a dangling arc index.
pub fn decode_topology(text: &str, config: &TopologyConfig) -> Result<Vec<Feature>, DecodeError> {
    let mut topology: Topology = serde_json::from_str(text)?;
    let arcs = absolute_arcs(&topology.arcs, topology.transform);

    let root = match &config.object {
        Some(name) => topology
            .objects
            .remove(name)
            .ok_or_else(|| DecodeError::MissingObject(name.clone()))?,
        None => topology
            .objects
            .pop_first()
            .map(|(_, object)| object)
            .ok_or(DecodeError::NoObjects)?,
    };

    let mut geometries = Vec::new();
    flatten(root, &mut geometries);

    let mut features = geometries
        .into_iter()
        .enumerate()
        .map(|(index, geometry)| to_feature(index, geometry, &arcs))
        .collect::<Result<Vec<_>, _>>()?;

    let mirrored = link_features(&mut features);
    debug!(features = features.len(), arcs = arcs.len(), mirrored, "decoded topology");
    Ok(features)
}

/// Symmetrize the flow rows of a decoded collection and fill in each
/// feature's net flow and centroid. Features without a row get an empty
/// one. Returns the number of mirrored links added.
pub fn link_features(features: &mut [Feature]) -> usize {
    let mut rows: Vec<FlowLinks> = features
        .iter_mut()
        .map(|f| f.properties.flows.take().unwrap_or_default())
        .collect();
    let added = symmetrize(&mut rows);

    for (feature, row) in features.iter_mut().zip(rows) {
        let properties = &mut feature.properties;
        properties.net_flow = Some(row.total());
        properties.flows = Some(row);
        properties.centroid = feature.geometry.largest_outer_ring().and_then(Ring::vertex_mean);
    }
    added
}

/// Total number of flow links across a collection.
#[must_use]
pub fn flow_count(features: &[Feature]) -> usize {
    features
        .iter()
        .filter_map(|f| f.properties.flows.as_ref())
        .map(FlowLinks::len)
        .sum()
}

fn absolute_arcs(arcs: &[Vec<Vec<f64>>], transform: Option<Transform>) -> Vec<Vec<Coordinate>> {
    arcs.iter()
        .map(|arc| {
            let (mut x, mut y) = (0.0, 0.0);
            arc.iter()
                .filter_map(|position| match position.as_slice() {
                    [px, py, ..] => Some((*px, *py)),
                    _ => None,
                })
                .map(|(px, py)| match transform {
                    Some(t) => {
                        x += px;
                        y += py;
                        Coordinate::new(
                            x * t.scale[0] + t.translate[0],
                            y * t.scale[1] + t.translate[1],
                        )
                    }
                    None => Coordinate::new(px, py),
                })
                .collect()
        })
        .collect()
}

fn flatten(geometry: Geometry, out: &mut Vec<Geometry>) {
    match geometry {
        Geometry::GeometryCollection { geometries } => {
            for child in geometries {
                flatten(child, out);
            }
        }
        other => out.push(other),
    }
}

fn to_feature(index: usize, geometry: Geometry, arcs: &[Vec<Coordinate>]) -> Result<Feature, DecodeError> {
    let (polygons, properties) = match geometry {
        Geometry::Polygon { arcs: rings, properties } => (vec![polygon(&rings, arcs)?], properties),
        Geometry::MultiPolygon { arcs: polys, properties } => (
            polys
                .iter()
                .map(|rings| polygon(rings, arcs))
                .collect::<Result<Vec<_>, _>>()?,
            properties,
        ),
        Geometry::Unsupported | Geometry::GeometryCollection { .. } => {
            warn!(feature = index, "unsupported geometry type, keeping an empty feature");
            (Vec::new(), Map::new())
        }
    };
    Ok(Feature::new(
        MultiPolygon::new(polygons),
        read_properties(index, properties),
    ))
}

fn polygon(rings: &[Vec<i64>], arcs: &[Vec<Coordinate>]) -> Result<Polygon, DecodeError> {
    rings
        .iter()
        .map(|ring| stitch(ring, arcs))
        .collect::<Result<Vec<_>, _>>()
        .map(Polygon::new)
}

/// Join arcs into one ring. Consecutive arcs share an endpoint, which is
/// kept only once.
fn stitch(indices: &[i64], arcs: &[Vec<Coordinate>]) -> Result<Ring, DecodeError> {
    let mut coords: Vec<Coordinate> = Vec::new();
    for &index in indices {
        let (slot, reversed) = if index < 0 { (!index, true) } else { (index, false) };
        let arc = usize::try_from(slot)
            .ok()
            .and_then(|slot| arcs.get(slot))
            .ok_or(DecodeError::ArcOutOfRange {
                index,
                arcs: arcs.len(),
            })?;
        coords.pop();
        if reversed {
            coords.extend(arc.iter().rev());
        } else {
            coords.extend(arc.iter());
        }
    }
    Ok(Ring::new(coords))
}

fn read_properties(index: usize, mut map: Map<String, Value>) -> Properties {
    let flows = match map.remove("flows") {
        None => None,
        Some(Value::String(text)) => Some(decode_flows(&text).unwrap_or_else(|error| {
            warn!(feature = index, %error, "malformed flows, using an empty row");
            FlowLinks::new()
        })),
        Some(_) => {
            warn!(feature = index, "flows is not a string, using an empty row");
            Some(FlowLinks::new())
        }
    };

    let name = match map.remove("name") {
        Some(Value::String(name)) => Some(name),
        Some(other) => {
            map.insert("name".to_owned(), other);
            None
        }
        None => None,
    };

    let classification = match map.get("value").and_then(Value::as_u64) {
        Some(digit @ 0..=9) => {
            map.remove("value");
            u8::try_from(digit).ok()
        }
        _ => None,
    };

    // recomputed by link_features
    map.remove("netFlow");
    map.remove("centroid");

    Properties {
        classification,
        name,
        flows,
        extra: map,
        ..Properties::default()
    }
}

/// Document-framed decoder for topology sources.
#[derive(Clone, Debug, Default)]
pub struct FlowDocumentDecoder {
    config: TopologyConfig,
}

impl FlowDocumentDecoder {
    #[must_use]
    pub fn new(config: TopologyConfig) -> Self {
        Self { config }
    }
}

impl RecordDecoder for FlowDocumentDecoder {
    type Record = Feature;

    fn framing(&self) -> Framing {
        Framing::Document
    }

    fn decode(&mut self, unit: &str) -> Result<Vec<Feature>, DecodeError> {
        decode_topology(unit, &self.config)
    }

    /// Flow sources count links, not polygon vertices.
    fn vertex_count(&self, record: &Feature) -> usize {
        record.properties.flows.as_ref().map_or(0, FlowLinks::len)
    }
}
