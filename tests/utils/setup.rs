use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use mpsync::event::channels::SendMessage;
use mpsync::hit::DropReason;
use mpsync::messages::Hit;
use mpsync::world::{FormKind, HitEvent, InMemoryEngine, LocalId, ManualClock};
use mpsync::{ClientConfig, ClientState};

use super::mocks::{CountingEngine, RecordingHandler};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub const NPC: LocalId = LocalId(0x0001_2e46);
pub const STATIC: LocalId = LocalId(0x0001_3001);
pub const MOVABLE_STATIC: LocalId = LocalId(0x0001_3002);
pub const WEAPON: LocalId = LocalId(0x0001_397e);
pub const SPELL: LocalId = LocalId(0x0001_2fcd);
pub const SCROLL: LocalId = LocalId(0x000a_44a1);

pub struct TestSetup {
    pub state: ClientState,
    pub clock: Arc<ManualClock>,
    pub engine: Arc<CountingEngine>,
    pub recorder: Arc<RecordingHandler>,
    pub outbound: mpsc::UnboundedReceiver<String>,
}

impl TestSetup {
    /// Moves the clock to `now_ms` and reports a hit at that time
    pub fn hit_at(&self, now_ms: u64, aggressor: LocalId, target: LocalId, source: LocalId) -> Option<Hit> {
        self.clock.set(now_ms);
        self.state.hits.on_hit(&HitEvent::new(aggressor, target, source))
    }

    pub fn try_hit(&self, event: &HitEvent) -> Result<Hit, DropReason> {
        self.state.hits.try_hit(event)
    }

    pub fn sent_hits(&self) -> Vec<Hit> {
        self.recorder.hits()
    }

    /// Everything the transport would have sent, parsed back into JSON
    pub fn drain_outbound(&mut self) -> Vec<serde_json::Value> {
        let mut sent = Vec::new();
        while let Ok(text) = self.outbound.try_recv() {
            sent.push(serde_json::from_str(&text).unwrap());
        }
        sent
    }
}

pub struct TestSetupBuilder {
    engine: InMemoryEngine,
    claims: Vec<u64>,
    dedup_window: Duration,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            engine: InMemoryEngine::new(),
            claims: vec![],
            dedup_window: Duration::from_millis(100),
        }
    }

    /// One object of every interesting kind plus one implement per registry
    pub fn with_standard_world(mut self) -> Self {
        self.engine = self
            .engine
            .with_object(NPC, FormKind::Npc)
            .with_object(STATIC, FormKind::Static)
            .with_object(MOVABLE_STATIC, FormKind::MovableStatic)
            .with_weapon(WEAPON)
            .with_spell(SPELL)
            .with_scroll(SCROLL);
        self
    }

    pub fn with_engine(mut self, engine: InMemoryEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_claims(mut self, claims: &[u64]) -> Self {
        self.claims.extend_from_slice(claims);
        self
    }

    pub fn with_dedup_window(mut self, window: Duration) -> Self {
        self.dedup_window = window;
        self
    }

    pub fn build(self) -> TestSetup {
        let config = ClientConfig {
            dedup_window: self.dedup_window,
            ..ClientConfig::default()
        };
        let clock = Arc::new(ManualClock::new(0));
        let engine = Arc::new(CountingEngine::new(self.engine));

        let state = ClientState::new(&config, engine.clone(), clock.clone());
        for claim in self.claims {
            state.ownership.host(claim);
        }

        let recorder = Arc::new(RecordingHandler::new("recorder"));
        state.event_bus.subscribe::<SendMessage>(recorder.clone());
        let (_subscription, outbound) = state.attach_outbound();

        TestSetup {
            state,
            clock,
            engine,
            recorder,
            outbound,
        }
    }
}

impl Default for TestSetupBuilder {
    fn default() -> Self {
        Self::new()
    }
}
