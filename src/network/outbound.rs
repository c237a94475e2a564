use tokio::sync::mpsc;
use tracing::debug;

use crate::event::{EventError, EventHandler};
use crate::messages::Envelope;

/// Serializes outbound envelopes and queues them for the transport
pub struct OutboundSink {
    sender: mpsc::UnboundedSender<String>,
}

impl OutboundSink {
    pub fn new(sender: mpsc::UnboundedSender<String>) -> Self {
        Self { sender }
    }

    /// Creates a sink along with the receiving end the transport drains
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }
}

impl EventHandler<Envelope> for OutboundSink {
    fn handle(&self, envelope: &Envelope) -> Result<(), EventError> {
        let json = serde_json::to_string(envelope)
            .map_err(|e| EventError::rejected(format!("Failed to serialize envelope: {}", e)))?;

        self.sender
            .send(json)
            .map_err(|_| EventError::disconnected("Transport queue closed"))?;

        debug!(tag = %envelope.tag(), reliability = %envelope.reliability, "Queued outbound message");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "OutboundSink"
    }
}
