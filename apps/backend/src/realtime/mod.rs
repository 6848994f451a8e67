//! Realtime transport: event sink, in-process hub and Redis bridge.

pub mod broker;
pub mod hub;
pub mod protocol;

pub use hub::{EventHub, EventSink};
pub use protocol::{EngineCommand, EngineEvent};
