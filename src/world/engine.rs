use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use strum_macros::IntoStaticStr;

use super::ids::LocalId;

/// Coarse classification of an object's base form, as reported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr)]
#[serde(rename_all = "camelCase")]
pub enum FormKind {
    Npc,
    Container,
    Door,
    Activator,
    Furniture,
    Flora,
    Tree,
    Light,
    Static,
    MovableStatic,
    Other,
}

impl FormKind {
    /// Scenery that can be struck but has no state worth syncing
    pub fn is_static_scenery(self) -> bool {
        matches!(self, FormKind::Static | FormKind::MovableStatic)
    }
}

/// What caused a hit. Exactly one applies per source object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
#[serde(rename_all = "camelCase")]
pub enum HitSource {
    Melee,
    Spell,
    Scroll,
}

impl HitSource {
    /// Magic projectiles make the engine report the same hit twice
    pub fn fires_twice(self) -> bool {
        matches!(self, HitSource::Spell | HitSource::Scroll)
    }
}

/// A hit as observed by the local engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HitEvent {
    pub aggressor: LocalId,
    pub target: Option<LocalId>,
    #[serde(default)]
    pub source: Option<LocalId>,
    #[serde(default)]
    pub projectile: Option<LocalId>,
    #[serde(default)]
    pub is_bash_attack: bool,
    #[serde(default)]
    pub is_hit_blocked: bool,
    #[serde(default)]
    pub is_power_attack: bool,
    #[serde(default)]
    pub is_sneak_attack: bool,
}

impl HitEvent {
    pub fn new(aggressor: LocalId, target: LocalId, source: LocalId) -> Self {
        Self {
            aggressor,
            target: Some(target),
            source: Some(source),
            projectile: None,
            is_bash_attack: false,
            is_hit_blocked: false,
            is_power_attack: false,
            is_sneak_attack: false,
        }
    }
}

/// Synchronous queries the engine binding answers about its objects
pub trait EngineQueries: Send + Sync {
    /// Kind of the object's base form, `None` when it has none
    fn base_kind(&self, object: LocalId) -> Option<FormKind>;

    fn is_weapon(&self, form: LocalId) -> bool;

    fn is_spell(&self, form: LocalId) -> bool;

    fn is_scroll(&self, form: LocalId) -> bool;

    /// Resolves a hit source to a single kind. Weapons win over spells, spells over scrolls.
    fn classify_source(&self, form: LocalId) -> Option<HitSource> {
        if self.is_weapon(form) {
            Some(HitSource::Melee)
        } else if self.is_spell(form) {
            Some(HitSource::Spell)
        } else if self.is_scroll(form) {
            Some(HitSource::Scroll)
        } else {
            None
        }
    }
}

/// Wall-clock source in milliseconds
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> u64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        Utc::now().timestamp_millis().max(0) as u64
    }
}

/// Clock that only moves when told to. Used for replays and tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: AtomicU64::new(start_ms),
        }
    }

    pub fn set(&self, now_ms: u64) {
        self.now.store(now_ms, Ordering::SeqCst);
    }

    pub fn advance(&self, delta_ms: u64) {
        self.now.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Object and form tables for [`InMemoryEngine`], loadable from JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldDescription {
    pub objects: Vec<ObjectEntry>,
    pub weapons: Vec<LocalId>,
    pub spells: Vec<LocalId>,
    pub scrolls: Vec<LocalId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectEntry {
    pub id: LocalId,
    pub kind: FormKind,
}

/// Table-backed engine binding for replays and tests
#[derive(Debug, Clone, Default)]
pub struct InMemoryEngine {
    kinds: HashMap<LocalId, FormKind>,
    weapons: HashSet<LocalId>,
    spells: HashSet<LocalId>,
    scrolls: HashSet<LocalId>,
}

impl InMemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_description(description: WorldDescription) -> Self {
        Self {
            kinds: description
                .objects
                .into_iter()
                .map(|entry| (entry.id, entry.kind))
                .collect(),
            weapons: description.weapons.into_iter().collect(),
            spells: description.spells.into_iter().collect(),
            scrolls: description.scrolls.into_iter().collect(),
        }
    }

    pub fn with_object(mut self, id: LocalId, kind: FormKind) -> Self {
        self.kinds.insert(id, kind);
        self
    }

    pub fn with_weapon(mut self, id: LocalId) -> Self {
        self.weapons.insert(id);
        self
    }

    pub fn with_spell(mut self, id: LocalId) -> Self {
        self.spells.insert(id);
        self
    }

    pub fn with_scroll(mut self, id: LocalId) -> Self {
        self.scrolls.insert(id);
        self
    }
}

impl EngineQueries for InMemoryEngine {
    fn base_kind(&self, object: LocalId) -> Option<FormKind> {
        self.kinds.get(&object).copied()
    }

    fn is_weapon(&self, form: LocalId) -> bool {
        self.weapons.contains(&form)
    }

    fn is_spell(&self, form: LocalId) -> bool {
        self.spells.contains(&form)
    }

    fn is_scroll(&self, form: LocalId) -> bool {
        self.scrolls.contains(&form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORM: LocalId = LocalId(0x0001_2eb7);

    #[test]
    fn test_classify_source_priority() {
        let all = InMemoryEngine::new()
            .with_weapon(FORM)
            .with_spell(FORM)
            .with_scroll(FORM);
        assert_eq!(all.classify_source(FORM), Some(HitSource::Melee));

        let spell_and_scroll = InMemoryEngine::new().with_spell(FORM).with_scroll(FORM);
        assert_eq!(spell_and_scroll.classify_source(FORM), Some(HitSource::Spell));

        let scroll = InMemoryEngine::new().with_scroll(FORM);
        assert_eq!(scroll.classify_source(FORM), Some(HitSource::Scroll));

        assert_eq!(InMemoryEngine::new().classify_source(FORM), None);
    }

    #[test]
    fn test_world_description_from_json() {
        let json = r#"{
            "objects": [{ "id": 4278190096, "kind": "npc" }, { "id": 100, "kind": "movableStatic" }],
            "spells": [77]
        }"#;
        let description: WorldDescription = serde_json::from_str(json).unwrap();
        let engine = InMemoryEngine::from_description(description);

        assert_eq!(engine.base_kind(LocalId(0xff00_0010)), Some(FormKind::Npc));
        assert!(engine.base_kind(LocalId(100)).unwrap().is_static_scenery());
        assert_eq!(engine.classify_source(LocalId(77)), Some(HitSource::Spell));
    }

    #[test]
    fn test_hit_event_defaults_optional_fields() {
        let event: HitEvent =
            serde_json::from_str(r#"{ "aggressor": 20, "target": 4278190096 }"#).unwrap();
        assert_eq!(event.aggressor, LocalId::PLAYER);
        assert_eq!(event.source, None);
        assert!(!event.is_power_attack);
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(5);
        clock.advance(10);
        assert_eq!(clock.now_ms(), 15);
        clock.set(0);
        assert_eq!(clock.now_ms(), 0);
    }
}
