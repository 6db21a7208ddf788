use std::f64::consts::FRAC_PI_2;

use bytemuck::{Pod, Zeroable};
use meridian_types::Coordinate;

use crate::accessors::InstanceAccessors;
use crate::config::LayerConfig;
use crate::error::DriverError;
use crate::projection::Projection;

/// Uniforms shared by every instance: how far the instance shape is
/// rotated and how large it is, both in render space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orientation {
    pub tilt_angle: f64,
    pub instance_radius: f64,
}

impl Orientation {
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn to_uniform(self) -> OrientationUniform {
        OrientationUniform {
            tilt_angle: self.tilt_angle as f32,
            instance_radius: self.instance_radius as f32,
            _padding: [0.0; 2],
        }
    }
}

/// GPU layout of [`Orientation`], padded to 16 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct OrientationUniform {
    pub tilt_angle: f32,
    pub instance_radius: f32,
    pub _padding: [f32; 2],
}

impl OrientationUniform {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Derive the orientation from the layer's reference boundary.
///
/// The reference is `config.vertices` when set, otherwise the vertices of
/// the first entity. Either way the collection must not be empty.
///
/// # Errors
///
/// [`DriverError::EmptyCollection`], or anything
/// [`orientation_from_vertices`] reports.
pub fn compute_orientation<E>(
    entities: &[E],
    accessors: &InstanceAccessors<E>,
    projection: &impl Projection,
    config: &LayerConfig,
) -> Result<Orientation, DriverError> {
    let first = entities.first().ok_or(DriverError::EmptyCollection)?;
    match &config.vertices {
        Some(vertices) => orientation_from_vertices(vertices, projection, config.dot_radius),
        None => orientation_from_vertices(&accessors.vertices(first), projection, config.dot_radius),
    }
}

/// Orientation from a boundary ring.
///
/// Vertices 0 and 3 sit opposite each other on a hexagon, so the segment
/// between them spans the shape:
///
/// ```text
///   dx = x0 - x3        dy = y0 - y3        d = hypot(dx, dy)
///   tilt   = acos(dx / d) * -sign(dy) + π/2
///   radius = d / 2 * min(1, dot_radius)
/// ```
///
/// `sign(0)` is 0, so a horizontal segment always gives a tilt of π/2.
///
/// # Errors
///
/// - [`DriverError::InsufficientGeometry`] with fewer than 4 vertices.
/// - [`DriverError::DegenerateGeometry`] when `d` is zero or not finite.
pub fn orientation_from_vertices(
    vertices: &[Coordinate],
    projection: &impl Projection,
    dot_radius: f64,
) -> Result<Orientation, DriverError> {
    let (v0, v3) = match vertices {
        [v0, _, _, v3, ..] => (*v0, *v3),
        _ => {
            return Err(DriverError::InsufficientGeometry {
                found: vertices.len(),
            });
        }
    };

    let [x0, y0] = projection.project(v0);
    let [x3, y3] = projection.project(v3);
    let (dx, dy) = (x0 - x3, y0 - y3);
    let d = dx.hypot(dy);
    if d == 0.0 || !d.is_finite() {
        return Err(DriverError::DegenerateGeometry);
    }

    Ok(Orientation {
        tilt_angle: (dx / d).acos() * -sign(dy) + FRAC_PI_2,
        instance_radius: d / 2.0 * dot_radius.min(1.0),
    })
}

// f64::signum(0.0) is 1.0
fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}
