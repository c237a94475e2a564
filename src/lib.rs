// Library crate for the mpsync client event layer
// This file exposes the public API for the binary and integration tests

pub mod config;
pub mod event;
pub mod hit;
pub mod messages;
pub mod network;
pub mod replay;
pub mod shared;
pub mod world;

// Re-export commonly used types for easier access in tests
pub use config::{ClientConfig, ConfigError};
pub use event::{EventBus, EventError, EventHandler, Subscription};
pub use hit::{DropReason, HitDeduplicator, HitFilter, HitService};
pub use messages::{AnyMessage, Envelope, Hit, MsgType, Reliability};
pub use network::{InboundRouter, MessageDispatcher, OutboundSink};
pub use shared::{ClientError, ClientState};
pub use world::{to_local, to_remote, LocalId, OwnershipRegistry, RemoteId};
