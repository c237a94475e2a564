use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use mpsync::event::{EventError, EventHandler};
use mpsync::messages::{AnyMessage, Envelope, Hit};
use mpsync::world::{EngineQueries, FormKind, InMemoryEngine, LocalId};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Engine binding that counts every query it answers
pub struct CountingEngine {
    inner: InMemoryEngine,
    kind_queries: AtomicUsize,
    source_queries: AtomicUsize,
}

impl CountingEngine {
    pub fn new(inner: InMemoryEngine) -> Self {
        Self {
            inner,
            kind_queries: AtomicUsize::new(0),
            source_queries: AtomicUsize::new(0),
        }
    }

    pub fn kind_queries(&self) -> usize {
        self.kind_queries.load(Ordering::SeqCst)
    }

    pub fn source_queries(&self) -> usize {
        self.source_queries.load(Ordering::SeqCst)
    }

    pub fn total_queries(&self) -> usize {
        self.kind_queries() + self.source_queries()
    }
}

impl EngineQueries for CountingEngine {
    fn base_kind(&self, object: LocalId) -> Option<FormKind> {
        self.kind_queries.fetch_add(1, Ordering::SeqCst);
        self.inner.base_kind(object)
    }

    fn is_weapon(&self, form: LocalId) -> bool {
        self.source_queries.fetch_add(1, Ordering::SeqCst);
        self.inner.is_weapon(form)
    }

    fn is_spell(&self, form: LocalId) -> bool {
        self.source_queries.fetch_add(1, Ordering::SeqCst);
        self.inner.is_spell(form)
    }

    fn is_scroll(&self, form: LocalId) -> bool {
        self.source_queries.fetch_add(1, Ordering::SeqCst);
        self.inner.is_scroll(form)
    }
}

/// `sendMessage` handler that keeps every envelope it sees
#[derive(Default)]
pub struct RecordingHandler {
    name: &'static str,
    envelopes: Mutex<Vec<Envelope>>,
}

impl RecordingHandler {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            envelopes: Mutex::new(Vec::new()),
        }
    }

    pub fn envelopes(&self) -> Vec<Envelope> {
        self.envelopes.lock().clone()
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.envelopes
            .lock()
            .iter()
            .filter_map(|envelope| match &envelope.message {
                AnyMessage::OnHit(hit) => Some(hit.clone()),
                _ => None,
            })
            .collect()
    }
}

impl EventHandler<Envelope> for RecordingHandler {
    fn handle(&self, envelope: &Envelope) -> Result<(), EventError> {
        self.envelopes.lock().push(envelope.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
