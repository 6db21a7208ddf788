#![warn(clippy::pedantic)]

pub mod encoder;
pub mod error;
pub mod flow;
pub mod ring;

pub use encoder::LineEncoder;
pub use error::EncodeError;
pub use flow::encode_flows;
