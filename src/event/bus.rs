use parking_lot::RwLock;
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error, trace};

use super::channels::Channels;
use super::handler::{EventError, EventHandler, FnHandler};

pub(super) mod sealed {
    /// Implemented by the `channels!` catalog only
    pub trait Sealed {}
}

/// A named conduit on the bus, bound to exactly one payload type.
///
/// Implemented only by the marker types in [`super::channels`]; the set is closed.
/// A channel declared anywhere else is rejected:
///
/// ```compile_fail
/// use mpsync::event::channels::{self, Channels};
/// use mpsync::event::{events, Channel, HandlerSlot};
///
/// struct Outside;
///
/// impl Channel for Outside {
///     type Payload = events::ConnectionFailed;
///     const NAME: &'static str = "outside";
///
///     fn slot(channels: &Channels) -> &HandlerSlot<Self::Payload> {
///         channels::ConnectionFailed::slot(channels)
///     }
/// }
/// ```
pub trait Channel: sealed::Sealed + 'static {
    type Payload: 'static;

    /// Wire-style name used in logs
    const NAME: &'static str;

    #[doc(hidden)]
    fn slot(channels: &Channels) -> &HandlerSlot<Self::Payload>;
}

struct Registration<P> {
    id: u64,
    handler: Arc<dyn EventHandler<P>>,
}

impl<P> Clone for Registration<P> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            handler: Arc::clone(&self.handler),
        }
    }
}

/// Ordered handler list for one channel. Only the bus creates these.
pub struct HandlerSlot<P> {
    handlers: RwLock<Vec<Registration<P>>>,
}

impl<P> HandlerSlot<P> {
    pub(super) fn new() -> Self {
        Self {
            handlers: RwLock::new(Vec::new()),
        }
    }

    pub(super) fn len(&self) -> usize {
        self.handlers.read().len()
    }
}

/// Token for one (channel, handler) registration
pub struct Subscription<C: Channel> {
    bus: u64,
    id: u64,
    _channel: PhantomData<fn() -> C>,
}

impl<C: Channel> Clone for Subscription<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: Channel> Copy for Subscription<C> {}

impl<C: Channel> fmt::Debug for Subscription<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("channel", &C::NAME)
            .field("bus", &self.bus)
            .field("id", &self.id)
            .finish()
    }
}

/// Outcome of a single emission
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitReport {
    pub delivered: usize,
    pub failed: usize,
}

impl EmitReport {
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// Source of per-bus identities so a token only ever matches its own bus
static NEXT_BUS_ID: AtomicU64 = AtomicU64::new(1);

struct BusInner {
    bus_id: u64,
    next_id: AtomicU64,
    channels: Channels,
}

/// Event bus for distributing events throughout the client
///
/// Emission is synchronous: every handler registered on the channel when
/// `emit` is called runs on the caller's thread, in registration order,
/// before `emit` returns. Cloning shares the same handler tables.
#[derive(Clone)]
pub struct EventBus {
    inner: Arc<BusInner>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(BusInner {
                bus_id: NEXT_BUS_ID.fetch_add(1, Ordering::Relaxed),
                next_id: AtomicU64::new(1),
                channels: Channels::new(),
            }),
        }
    }

    /// Appends a handler to the channel's list
    pub fn subscribe<C: Channel>(
        &self,
        handler: Arc<dyn EventHandler<C::Payload>>,
    ) -> Subscription<C> {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        trace!(
            channel = C::NAME,
            handler = handler.name(),
            subscription = id,
            "Registering event handler"
        );
        C::slot(&self.inner.channels)
            .handlers
            .write()
            .push(Registration { id, handler });

        Subscription {
            bus: self.inner.bus_id,
            id,
            _channel: PhantomData,
        }
    }

    /// Registers a closure as a handler
    pub fn on<C, F>(&self, name: &'static str, f: F) -> Subscription<C>
    where
        C: Channel,
        F: Fn(&C::Payload) -> Result<(), EventError> + Send + Sync + 'static,
    {
        self.subscribe::<C>(Arc::new(FnHandler::new(name, f)))
    }

    /// Removes a handler. Returns false if it was already gone or belongs to another bus.
    pub fn off<C: Channel>(&self, subscription: Subscription<C>) -> bool {
        if subscription.bus != self.inner.bus_id {
            debug!(
                channel = C::NAME,
                subscription = subscription.id,
                "Ignoring subscription from another bus"
            );
            return false;
        }

        let mut handlers = C::slot(&self.inner.channels).handlers.write();
        let before = handlers.len();
        handlers.retain(|registration| registration.id != subscription.id);
        let removed = handlers.len() != before;
        trace!(
            channel = C::NAME,
            subscription = subscription.id,
            removed,
            "Unregistering event handler"
        );
        removed
    }

    /// Delivers `payload` to every handler currently registered on `C`
    ///
    /// The handler list is captured before the first handler runs, so handlers
    /// may subscribe, unsubscribe or emit without affecting this delivery.
    pub fn emit<C: Channel>(&self, payload: &C::Payload) -> EmitReport {
        let snapshot: Vec<Registration<C::Payload>> =
            C::slot(&self.inner.channels).handlers.read().clone();

        let mut report = EmitReport::default();
        for registration in &snapshot {
            let handler = &registration.handler;
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler.handle(payload)))
                .unwrap_or_else(|panic| Err(EventError::Panic(panic_message(panic.as_ref()))));

            match outcome {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    report.failed += 1;
                    error!(
                        channel = C::NAME,
                        handler = handler.name(),
                        error = %e,
                        "Event handler failed"
                    );
                }
            }
        }

        trace!(
            channel = C::NAME,
            delivered = report.delivered,
            failed = report.failed,
            "Event emitted"
        );
        report
    }

    pub fn handler_count<C: Channel>(&self) -> usize {
        C::slot(&self.inner.channels).len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.inner.channels.total_handlers())
            .finish()
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
