use serde::{Deserialize, Serialize};

/// A geographic position in degrees.
///
/// Serializes as a `[lon, lat]` pair so decoded collections read like
/// ordinary `GeoJSON` coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
  pub lon: f64,
  pub lat: f64,
}

impl Coordinate {
  #[must_use]
  pub const fn new(lon: f64, lat: f64) -> Self {
    Self { lon, lat }
  }
}

impl From<[f64; 2]> for Coordinate {
  fn from([lon, lat]: [f64; 2]) -> Self {
    Self { lon, lat }
  }
}

impl From<Coordinate> for [f64; 2] {
  fn from(c: Coordinate) -> Self {
    [c.lon, c.lat]
  }
}

/// Closed polygon boundary, in decode order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ring {
  pub coords: Vec<Coordinate>,
}

impl Ring {
  #[must_use]
  pub fn new(coords: Vec<Coordinate>) -> Self {
    Self { coords }
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.coords.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.coords.is_empty()
  }

  /// Arithmetic mean of the ring's vertices, or `None` for an empty ring.
  ///
  /// A closing vertex that repeats the first one is counted once.
  #[must_use]
  pub fn vertex_mean(&self) -> Option<Coordinate> {
    let coords = match self.coords.as_slice() {
      [] => return None,
      [first, .., last] if first == last => &self.coords[..self.coords.len() - 1],
      all => all,
    };
    #[allow(clippy::cast_precision_loss)]
    let n = coords.len() as f64;
    let (lon, lat) = coords
      .iter()
      .fold((0.0, 0.0), |(lon, lat), c| (lon + c.lon, lat + c.lat));
    Some(Coordinate::new(lon / n, lat / n))
  }
}

/// Outer ring followed by any holes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon {
  pub rings: Vec<Ring>,
}

impl Polygon {
  #[must_use]
  pub fn new(rings: Vec<Ring>) -> Self {
    Self { rings }
  }

  #[must_use]
  pub fn vertex_count(&self) -> usize {
    self.rings.iter().map(Ring::len).sum()
  }
}

/// A feature geometry made of one or more polygons.
///
/// ```text
///   MultiPolygon
///   └── Polygon*        (one per 0x01-delimited segment in line sources)
///       └── Ring*       (outer ring first)
///           └── Coordinate*
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct MultiPolygon {
  #[serde(rename = "coordinates")]
  pub polygons: Vec<Polygon>,
}

impl MultiPolygon {
  #[must_use]
  pub fn new(polygons: Vec<Polygon>) -> Self {
    Self { polygons }
  }

  #[must_use]
  pub fn vertex_count(&self) -> usize {
    self.polygons.iter().map(Polygon::vertex_count).sum()
  }

  /// The outer ring with the most vertices, used as the representative
  /// boundary of the geometry.
  #[must_use]
  pub fn largest_outer_ring(&self) -> Option<&Ring> {
    self
      .polygons
      .iter()
      .filter_map(|p| p.rings.first())
      .max_by_key(|r| r.len())
  }
}
