#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod flow;
pub mod polyline;
pub mod session;
pub mod topology;
pub mod worker;

pub use config::{DecodeConfig, TopologyConfig};
pub use error::{DecodeError, SessionError};
pub use flow::{decode_flows, net_flows, symmetrize};
pub use polyline::{GridPointDecoder, PolylineDecoder};
pub use session::{BatchSink, Framing, RecordDecoder, SessionState, StreamingDecodeSession};
pub use topology::{FlowDocumentDecoder, decode_topology, flow_count, link_features};
pub use worker::{SessionCommand, SessionEvents, SessionHandle, SessionManager, SessionMessage, StreamedData};
