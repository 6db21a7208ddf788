#![warn(clippy::pedantic)]

pub mod accessors;
pub mod arcs;
pub mod attributes;
pub mod config;
pub mod error;
pub mod layer;
pub mod orientation;
pub mod projection;

pub use accessors::{Color, InstanceAccessors};
pub use arcs::{FlowArc, QuantileScale, flow_arcs};
pub use attributes::{InstanceAttributeSet, build};
pub use config::{DEFAULT_COLOR, LayerConfig};
pub use error::DriverError;
pub use layer::{ChangeFlags, InstanceLayer};
pub use orientation::{Orientation, OrientationUniform, compute_orientation, orientation_from_vertices};
pub use projection::{Projection, WebMercator};
