#![warn(clippy::pedantic)]

pub mod error;
pub mod scale;
pub mod varbase;
pub mod zigzag;

pub use error::CodecError;
pub use varbase::{Alphabet, POLYLINE_GROUP_SIZE, RING_DELIMITER};
