use tracing::{debug, warn};

use crate::accessors::InstanceAccessors;
use crate::attributes::{InstanceAttributeSet, build};
use crate::config::LayerConfig;
use crate::error::DriverError;
use crate::orientation::{Orientation, compute_orientation};
use crate::projection::Projection;

/// What changed since the last update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChangeFlags {
    pub data_changed: bool,
    pub viewport_changed: bool,
}

impl ChangeFlags {
    pub const DATA: Self = Self {
        data_changed: true,
        viewport_changed: false,
    };
    pub const VIEWPORT: Self = Self {
        data_changed: false,
        viewport_changed: true,
    };
}

/// Instance attributes and uniforms for one layer of entities.
///
/// ```text
/// ┌──────────────────┬────────────┬──────────────────────────────────┐
/// │ Change           │ Attributes │ Orientation                      │
/// ├──────────────────┼────────────┼──────────────────────────────────┤
/// │ data             │ rebuilt    │ recomputed                       │
/// │ viewport         │ kept       │ recomputed                       │
/// │ neither          │ kept       │ kept                             │
/// └──────────────────┴────────────┴──────────────────────────────────┘
/// ```
///
/// A failed recomputation keeps the previous orientation, so a transient
/// empty dataset never leaves the layer with degenerate uniforms.
pub struct InstanceLayer<E> {
    config: LayerConfig,
    accessors: InstanceAccessors<E>,
    attributes: InstanceAttributeSet,
    orientation: Option<Orientation>,
}

impl<E> InstanceLayer<E> {
    #[must_use]
    pub fn new(accessors: InstanceAccessors<E>, config: LayerConfig) -> Self {
        Self {
            config,
            accessors,
            attributes: InstanceAttributeSet::default(),
            orientation: None,
        }
    }

    /// Apply a change to the layer.
    ///
    /// # Errors
    ///
    /// Returns the orientation error when recomputation fails. The
    /// attributes are still rebuilt in that case and the previous
    /// orientation stays in place.
    pub fn update(
        &mut self,
        data: &[E],
        projection: &impl Projection,
        flags: ChangeFlags,
    ) -> Result<(), DriverError> {
        if flags.data_changed {
            self.attributes = build(data, &self.accessors);
            debug!(instances = self.attributes.len(), "rebuilt instance attributes");
        }

        if flags.data_changed || flags.viewport_changed {
            match compute_orientation(data, &self.accessors, projection, &self.config) {
                Ok(orientation) => self.orientation = Some(orientation),
                Err(error) => {
                    warn!(%error, "keeping previous orientation");
                    return Err(error);
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn attributes(&self) -> &InstanceAttributeSet {
        &self.attributes
    }

    #[must_use]
    pub fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    #[must_use]
    pub fn config(&self) -> &LayerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_types::{Coordinate, GridPoint};
    use std::cell::Cell;

    fn hexagon() -> Vec<Coordinate> {
        (0..6)
            .map(|i| {
                let angle = std::f64::consts::FRAC_PI_3 * f64::from(i);
                Coordinate::new(angle.cos(), angle.sin())
            })
            .collect()
    }

    fn layer() -> InstanceLayer<GridPoint> {
        let config = LayerConfig {
            vertices: Some(hexagon()),
            ..LayerConfig::default()
        };
        InstanceLayer::new(InstanceAccessors::grid_points(), config)
    }

    #[test]
    fn data_change_builds_everything() {
        let mut layer = layer();
        let identity = |c: Coordinate| [c.lon, c.lat];
        layer
            .update(&[GridPoint::new(1.0, 1.0)], &identity, ChangeFlags::DATA)
            .unwrap();
        assert_eq!(layer.attributes().len(), 1);
        let orientation = layer.orientation().unwrap();
        // vertex 0 = (1, 0), vertex 3 = (-1, 0)
        assert!((orientation.instance_radius - 1.0).abs() < 1e-12);
    }

    #[test]
    fn viewport_change_only_recomputes_orientation() {
        let mut layer = layer();
        let calls = Cell::new(0);
        let counting = |c: Coordinate| {
            calls.set(calls.get() + 1);
            [c.lon, c.lat]
        };
        let data = [GridPoint::new(0.0, 0.0)];
        layer.update(&data, &counting, ChangeFlags::DATA).unwrap();
        assert_eq!(calls.get(), 2);

        layer.update(&[], &counting, ChangeFlags::default()).unwrap();
        assert_eq!(calls.get(), 2);
        assert_eq!(layer.attributes().len(), 1);

        let zoomed = |c: Coordinate| [c.lon * 4.0, c.lat * 4.0];
        layer.update(&data, &zoomed, ChangeFlags::VIEWPORT).unwrap();
        assert_eq!(layer.attributes().len(), 1);
        assert!((layer.orientation().unwrap().instance_radius - 4.0).abs() < 1e-12);
    }

    #[test]
    fn failed_recompute_keeps_previous_orientation() {
        let mut layer = layer();
        let identity = |c: Coordinate| [c.lon, c.lat];
        layer
            .update(&[GridPoint::new(0.0, 0.0)], &identity, ChangeFlags::DATA)
            .unwrap();
        let before = layer.orientation();

        assert_eq!(
            layer.update(&[], &identity, ChangeFlags::DATA),
            Err(DriverError::EmptyCollection)
        );
        assert!(layer.attributes().is_empty());
        assert_eq!(layer.orientation(), before);
    }
}
