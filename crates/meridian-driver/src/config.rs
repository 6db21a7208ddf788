use meridian_types::Coordinate;

/// Default instance color: opaque dark red.
pub const DEFAULT_COLOR: [u8; 4] = [150, 0, 0, 255];

/// Configuration for an [`InstanceLayer`](crate::InstanceLayer).
///
/// ```text
/// ┌────────────┬─────────┬───────────────────────────────────────────────┐
/// │ Field      │ Default │ Purpose                                       │
/// ├────────────┼─────────┼───────────────────────────────────────────────┤
/// │ dot_radius │ 1.0     │ radius scale, applied as min(1, dot_radius)   │
/// │ vertices   │ None    │ reference boundary used for orientation; when │
/// │            │         │ None, the first entity's vertices are used    │
/// └────────────┴─────────┴───────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LayerConfig {
    pub dot_radius: f64,
    pub vertices: Option<Vec<Coordinate>>,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            dot_radius: 1.0,
            vertices: None,
        }
    }
}
