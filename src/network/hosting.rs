use std::sync::Arc;
use tracing::info;

use crate::event::channels;
use crate::event::events::ConnectionDisconnect;
use crate::event::{EventBus, EventError, EventHandler, Subscription};
use crate::messages::{ConnectionMessage, HostStartMessage, HostStopMessage};
use crate::world::OwnershipRegistry;

/// Keeps the ownership registry in line with the server's host assignments
pub struct HostingHandler {
    registry: OwnershipRegistry,
}

/// Registrations made by [`HostingHandler::attach`]
#[derive(Debug, Clone, Copy)]
pub struct HostingSubscriptions {
    start: Subscription<channels::HostStartMessage>,
    stop: Subscription<channels::HostStopMessage>,
    disconnect: Subscription<channels::ConnectionDisconnect>,
}

impl HostingSubscriptions {
    pub fn detach(self, event_bus: &EventBus) {
        event_bus.off(self.start);
        event_bus.off(self.stop);
        event_bus.off(self.disconnect);
    }
}

impl HostingHandler {
    pub fn new(registry: OwnershipRegistry) -> Self {
        Self { registry }
    }

    pub fn attach(self, event_bus: &EventBus) -> HostingSubscriptions {
        let handler = Arc::new(self);
        HostingSubscriptions {
            start: event_bus.subscribe::<channels::HostStartMessage>(handler.clone()),
            stop: event_bus.subscribe::<channels::HostStopMessage>(handler.clone()),
            disconnect: event_bus.subscribe::<channels::ConnectionDisconnect>(handler),
        }
    }
}

impl EventHandler<ConnectionMessage<HostStartMessage>> for HostingHandler {
    fn handle(&self, event: &ConnectionMessage<HostStartMessage>) -> Result<(), EventError> {
        self.registry.host(event.message.target);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "HostingHandler"
    }
}

impl EventHandler<ConnectionMessage<HostStopMessage>> for HostingHandler {
    fn handle(&self, event: &ConnectionMessage<HostStopMessage>) -> Result<(), EventError> {
        self.registry.release(event.message.target);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "HostingHandler"
    }
}

impl EventHandler<ConnectionDisconnect> for HostingHandler {
    fn handle(&self, _event: &ConnectionDisconnect) -> Result<(), EventError> {
        info!(claims = self.registry.len(), "Disconnected, dropping hosting claims");
        self.registry.clear();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "HostingHandler"
    }
}
