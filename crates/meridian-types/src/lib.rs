#![warn(clippy::pedantic)]

pub mod batch;
pub mod feature;
pub mod flow;
pub mod geometry;
pub mod point;

pub use batch::{BatchMeta, DecodeBatch};
pub use feature::{Feature, Properties};
pub use flow::{FlowLink, FlowLinks};
pub use geometry::{Coordinate, MultiPolygon, Polygon, Ring};
pub use point::GridPoint;
