use std::f64::consts::{FRAC_PI_4, PI};

use meridian_types::Coordinate;

/// Maps geographic coordinates into planar render space.
///
/// Any `Fn(Coordinate) -> [f64; 2]` is a projection, which keeps tests and
/// ad-hoc viewports cheap to write.
pub trait Projection {
    fn project(&self, position: Coordinate) -> [f64; 2];
}

impl<F> Projection for F
where
    F: Fn(Coordinate) -> [f64; 2],
{
    fn project(&self, position: Coordinate) -> [f64; 2] {
        self(position)
    }
}

/// Side of the world square at zoom 0, in render units.
pub const TILE_SIZE: f64 = 512.0;

/// Web Mercator at a fixed zoom. Y grows southward, matching tile rows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WebMercator {
    pub zoom: f64,
}

impl WebMercator {
    #[must_use]
    pub const fn new(zoom: f64) -> Self {
        Self { zoom }
    }

    fn world_size(self) -> f64 {
        TILE_SIZE * self.zoom.exp2()
    }
}

impl Projection for WebMercator {
    fn project(&self, position: Coordinate) -> [f64; 2] {
        let size = self.world_size();
        let x = (position.lon + 180.0) / 360.0 * size;
        let phi = position.lat.to_radians();
        let y = (PI - (FRAC_PI_4 + phi / 2.0).tan().ln()) / (2.0 * PI) * size;
        [x, y]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_is_world_center() {
        let [x, y] = WebMercator::new(0.0).project(Coordinate::new(0.0, 0.0));
        assert!((x - 256.0).abs() < 1e-9);
        assert!((y - 256.0).abs() < 1e-9);
    }

    #[test]
    fn each_zoom_doubles_the_world() {
        let c = Coordinate::new(90.0, 45.0);
        let [x0, y0] = WebMercator::new(3.0).project(c);
        let [x1, y1] = WebMercator::new(4.0).project(c);
        assert!((x1 - 2.0 * x0).abs() < 1e-9);
        assert!((y1 - 2.0 * y0).abs() < 1e-9);
    }

    #[test]
    fn closures_project() {
        let flip = |c: Coordinate| [c.lat, c.lon];
        assert_eq!(flip.project(Coordinate::new(1.0, 2.0)), [2.0, 1.0]);
    }
}
