/// Errors from deriving render uniforms.
///
/// Building attribute buffers cannot fail; only the orientation step has
/// preconditions on its input.
///
/// ```text
/// ┌──────────────────────┬──────────────────────────────────────────────┐
/// │ Variant              │ Cause                                        │
/// ├──────────────────────┼──────────────────────────────────────────────┤
/// │ EmptyCollection      │ No entity to take reference vertices from    │
/// │ InsufficientGeometry │ Reference has fewer than 4 boundary vertices │
/// │ DegenerateGeometry   │ Vertices 0 and 3 project to the same point   │
/// └──────────────────────┴──────────────────────────────────────────────┘
/// ```
///
/// Callers keep their previous orientation on any of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DriverError {
    #[error("no entities to derive an orientation from")]
    EmptyCollection,

    #[error("reference entity has {found} boundary vertices, need at least 4")]
    InsufficientGeometry { found: usize },

    #[error("reference vertices 0 and 3 project to the same point")]
    DegenerateGeometry,
}
