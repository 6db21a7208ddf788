use meridian_wire::scale::DEFAULT_PRECISION;

/// Default number of records buffered before a batch is emitted.
pub const DEFAULT_FLUSH_THRESHOLD: usize = 6000;

/// Settings shared by every decode session.
///
/// ```text
/// ┌─────────────────┬─────────┬──────────────────────────────────────────┐
/// │ Field           │ Default │ Purpose                                  │
/// ├─────────────────┼─────────┼──────────────────────────────────────────┤
/// │ precision       │ 5       │ decimal digits in a coordinate integer   │
/// │ flush_threshold │ 6000    │ records per emitted batch (values below  │
/// │                 │         │ 1 are treated as 1)                      │
/// └─────────────────┴─────────┴──────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeConfig {
    pub precision: u32,
    pub flush_threshold: usize,
}

impl DecodeConfig {
    /// The flush threshold actually applied.
    #[must_use]
    pub fn effective_threshold(&self) -> usize {
        self.flush_threshold.max(1)
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            flush_threshold: DEFAULT_FLUSH_THRESHOLD,
        }
    }
}

/// Settings for topology (flow document) sources.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TopologyConfig {
    /// Name of the geometry object to read. When `None`, the first object
    /// in key order is used.
    pub object: Option<String>,
}
