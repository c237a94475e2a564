use thiserror::Error;

/// Errors a handler can report back to the bus
#[derive(Debug, Error)]
pub enum EventError {
    #[error("Handler rejected event: {0}")]
    Rejected(String),

    #[error("Downstream disconnected: {0}")]
    Disconnected(String),

    #[error("Handler panicked: {0}")]
    Panic(String),
}

impl EventError {
    pub fn rejected(msg: impl Into<String>) -> Self {
        EventError::Rejected(msg.into())
    }

    pub fn disconnected(msg: impl Into<String>) -> Self {
        EventError::Disconnected(msg.into())
    }
}

/// Trait for components that react to one channel's payload
///
/// Handlers run synchronously on the emitting thread. A failing handler
/// is logged by the bus and does not stop delivery to the others.
pub trait EventHandler<P>: Send + Sync {
    fn handle(&self, payload: &P) -> Result<(), EventError>;

    /// Get a human-readable name for this handler (for logging/debugging)
    fn name(&self) -> &'static str;
}

/// Adapts a closure into an [`EventHandler`]
pub struct FnHandler<F> {
    name: &'static str,
    f: F,
}

impl<F> FnHandler<F> {
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }
}

impl<P, F> EventHandler<P> for FnHandler<F>
where
    F: Fn(&P) -> Result<(), EventError> + Send + Sync,
{
    fn handle(&self, payload: &P) -> Result<(), EventError> {
        (self.f)(payload)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
