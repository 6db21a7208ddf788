use crate::accessors::InstanceAccessors;

/// Components per instance in each buffer.
pub const POSITION_SIZE: usize = 2;
pub const ELEVATION_SIZE: usize = 1;
pub const COLOR_SIZE: usize = 4;

/// Parallel per-instance buffers, ready to upload.
///
/// ```text
///   instance k:  positions[2k..2k+2)   x, y        f32
///                elevations[k]         z           f32
///                colors[4k..4k+4)      r, g, b, a  u8
/// ```
///
/// Every call to [`build`] returns fresh buffers; nothing is shared with a
/// previous set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InstanceAttributeSet {
    pub positions: Vec<f32>,
    pub elevations: Vec<f32>,
    pub colors: Vec<u8>,
}

impl InstanceAttributeSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.elevations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elevations.is_empty()
    }

    #[must_use]
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    #[must_use]
    pub fn elevation_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.elevations)
    }
}

/// Write the instance buffers for `entities`, in order.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn build<E>(entities: &[E], accessors: &InstanceAccessors<E>) -> InstanceAttributeSet {
    let mut set = InstanceAttributeSet {
        positions: Vec::with_capacity(entities.len() * POSITION_SIZE),
        elevations: Vec::with_capacity(entities.len() * ELEVATION_SIZE),
        colors: Vec::with_capacity(entities.len() * COLOR_SIZE),
    };
    for entity in entities {
        let position = accessors.position(entity);
        set.positions.extend([position.lon as f32, position.lat as f32]);
        set.elevations.push(accessors.elevation(entity) as f32);
        set.colors.extend(accessors.color(entity).to_rgba());
    }
    set
}
