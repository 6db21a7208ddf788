use serde::{Deserialize, Serialize};

use crate::geometry::Coordinate;

/// A single decoded grid sample, used as an instance centroid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
  pub position: Coordinate,
}

impl GridPoint {
  #[must_use]
  pub const fn new(lon: f64, lat: f64) -> Self {
    Self {
      position: Coordinate::new(lon, lat),
    }
  }
}
