//! Host adapter: message types, JSON-lines framing and the channel-driven node.

pub mod messages;
pub mod node;
pub mod wire;

pub use messages::{Inbound, Outbound};
pub use node::{InboundRouter, ScanNode, frame_channel};
pub use wire::JsonLines;
