use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::{ClientConfig, ConfigError};
use crate::event::channels::SendMessage;
use crate::event::{EventBus, Subscription};
use crate::hit::{start_dedup_sweep_task, HitDeduplicator, HitFilter, HitService};
use crate::messages::MessageError;
use crate::network::{
    HostingHandler, HostingSubscriptions, InboundRouter, MessageDispatcher, OutboundSink,
    SocketError,
};
use crate::world::{Clock, EngineQueries, OwnershipRegistry};

/// Shared client state containing all dependencies
#[derive(Clone)]
pub struct ClientState {
    pub event_bus: EventBus,
    pub ownership: OwnershipRegistry,
    pub deduplicator: Arc<HitDeduplicator>,
    pub clock: Arc<dyn Clock>,
    pub dispatcher: MessageDispatcher,
    pub router: InboundRouter,
    pub hits: Arc<HitService>,
    hosting: HostingSubscriptions,
}

impl ClientState {
    pub fn new(
        config: &ClientConfig,
        engine: Arc<dyn EngineQueries>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let event_bus = EventBus::new();
        let ownership = OwnershipRegistry::new();
        let deduplicator = Arc::new(HitDeduplicator::new(config.dedup_window));
        let dispatcher = MessageDispatcher::new(event_bus.clone());
        let router = InboundRouter::new(event_bus.clone());

        let filter = HitFilter::new(engine, Arc::new(ownership.clone()), deduplicator.clone());
        let hits = Arc::new(HitService::new(filter, dispatcher.clone(), clock.clone()));
        let hosting = HostingHandler::new(ownership.clone()).attach(&event_bus);

        info!(
            dedup_window_ms = config.dedup_window.as_millis() as u64,
            "Client state initialised"
        );

        Self {
            event_bus,
            ownership,
            deduplicator,
            clock,
            dispatcher,
            router,
            hits,
            hosting,
        }
    }

    /// Subscribes a transport queue to `sendMessage`. Envelopes arrive as JSON text.
    pub fn attach_outbound(&self) -> (Subscription<SendMessage>, mpsc::UnboundedReceiver<String>) {
        let (sink, receiver) = OutboundSink::channel();
        let subscription = self.event_bus.subscribe::<SendMessage>(Arc::new(sink));
        (subscription, receiver)
    }

    /// Starts the dedup sweep when the config asks for one
    pub fn spawn_dedup_sweep(&self, config: &ClientConfig) -> Option<JoinHandle<()>> {
        let interval = config.dedup_sweep_interval?;
        Some(tokio::spawn(start_dedup_sweep_task(
            self.deduplicator.clone(),
            self.clock.clone(),
            interval,
        )))
    }

    /// Stops mirroring host assignments into the ownership registry
    pub fn detach_hosting(&self) {
        self.hosting.detach(&self.event_bus);
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Message error: {0}")]
    Message(#[from] MessageError),

    #[error("Socket error: {0}")]
    Socket(#[from] SocketError),

    #[error("Invalid world description: {0}")]
    World(serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
