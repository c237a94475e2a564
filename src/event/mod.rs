// Typed, synchronous event bus
//
// Channels are declared once in `channels`; each one carries a single payload
// type, so a handler can only ever see the payload its channel declares.

// Public API - what other modules can use
pub use bus::{Channel, EmitReport, EventBus, HandlerSlot, Subscription};
pub use handler::{EventError, EventHandler, FnHandler};

pub mod channels;
pub mod events;

// Internal modules
mod bus;
mod handler;
