use tracing::debug;

use crate::event::channels::{SendMessage, SendMessageWithRefrId, SendRawMessage};
use crate::event::events::{SendMessageWithRefrIdEvent, SendRawMessageEvent};
use crate::event::{EmitReport, EventBus};
use crate::messages::{AnyMessage, Envelope, Reliability};
use crate::world::LocalId;

/// Hands outbound messages to whoever listens on `sendMessage`
#[derive(Debug, Clone)]
pub struct MessageDispatcher {
    event_bus: EventBus,
}

impl MessageDispatcher {
    pub fn new(event_bus: EventBus) -> Self {
        Self { event_bus }
    }

    pub fn publish(&self, envelope: Envelope) -> EmitReport {
        let tag: &'static str = envelope.tag().into();
        let report = self.event_bus.emit::<SendMessage>(&envelope);
        if report.delivered == 0 && report.failed == 0 {
            debug!(tag, "Outbound message has no transport listening");
        }
        report
    }

    pub fn send(&self, message: AnyMessage, reliability: Reliability) -> EmitReport {
        self.publish(Envelope::new(message, reliability))
    }

    pub fn send_raw(&self, message: Vec<u8>, reliability: Reliability) -> EmitReport {
        self.event_bus.emit::<SendRawMessage>(&SendRawMessageEvent {
            message,
            reliability,
        })
    }

    /// Sends a message about `refr_id`; the transport fills in its remote id
    pub fn send_with_refr_id(
        &self,
        message: AnyMessage,
        refr_id: Option<LocalId>,
        reliability: Reliability,
    ) -> EmitReport {
        self.event_bus
            .emit::<SendMessageWithRefrId>(&SendMessageWithRefrIdEvent {
                message,
                reliability,
                refr_id,
            })
    }
}
