// Network-facing side of the bus: outbound dispatch, inbound routing,
// the transport loop and host negotiation.

pub use connection::{Connection, PacketHandler, PacketSocket, SocketError};
pub use dispatcher::MessageDispatcher;
pub use hosting::{HostingHandler, HostingSubscriptions};
pub use outbound::OutboundSink;
pub use router::InboundRouter;

mod connection;
mod dispatcher;
mod hosting;
mod outbound;
mod router;
