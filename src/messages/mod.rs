// Network message model
//
// Every message is an `AnyMessage` variant; its `t` tag picks the payload type.

pub use errors::MessageError;
pub use hit::Hit;
pub use payloads::*;
pub use types::{AnyMessage, ConnectionMessage, Envelope, MsgType, Reliability};

mod errors;
mod hit;
mod payloads;
mod types;
