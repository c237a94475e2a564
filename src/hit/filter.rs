use std::sync::Arc;
use strum_macros::IntoStaticStr;
use tracing::warn;

use super::dedup::HitDeduplicator;
use crate::messages::Hit;
use crate::world::{EngineQueries, HitEvent, HostedEntities, LocalId};

/// Why a hit was not reported. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum DropReason {
    /// Another participant simulates the aggressor and will report the hit
    NotAuthoritative,
    MissingTarget,
    StaticTarget,
    UnsupportedSource,
    Duplicate,
}

/// Whether this client may report actions of `aggressor`.
///
/// The player and hosted client-created actors qualify. Anything else from the
/// game data is simulated by whoever hosts it.
pub fn is_authoritative(aggressor: LocalId, hosted: &dyn HostedEntities) -> bool {
    if aggressor.is_client_created() {
        hosted.is_hosted(aggressor.to_remote())
    } else {
        aggressor.is_player()
    }
}

/// Decides whether a locally observed hit becomes an `OnHit` message.
///
/// Gates run cheapest first and stop at the first failure:
/// authority, target shape, source kind, then (magic only) the dedup window.
pub struct HitFilter {
    engine: Arc<dyn EngineQueries>,
    hosted: Arc<dyn HostedEntities>,
    deduplicator: Arc<HitDeduplicator>,
}

impl HitFilter {
    pub fn new(
        engine: Arc<dyn EngineQueries>,
        hosted: Arc<dyn HostedEntities>,
        deduplicator: Arc<HitDeduplicator>,
    ) -> Self {
        Self {
            engine,
            hosted,
            deduplicator,
        }
    }

    pub fn evaluate(&self, event: &HitEvent, now_ms: u64) -> Result<Hit, DropReason> {
        if !is_authoritative(event.aggressor, self.hosted.as_ref()) {
            return Err(DropReason::NotAuthoritative);
        }

        let Some(target) = event.target else {
            warn!(aggressor = %event.aggressor, "Hit event without a target");
            return Err(DropReason::MissingTarget);
        };
        if self
            .engine
            .base_kind(target)
            .is_some_and(|kind| kind.is_static_scenery())
        {
            return Err(DropReason::StaticTarget);
        }

        let source = event
            .source
            .and_then(|source| self.engine.classify_source(source))
            .ok_or(DropReason::UnsupportedSource)?;

        if source.fires_twice() && !self.deduplicator.check_and_record(event.aggressor, now_ms) {
            return Err(DropReason::Duplicate);
        }

        Ok(Hit {
            aggressor: event.aggressor.to_remote(),
            target: target.to_remote(),
            source: event.source.map_or(0, |id| id.0),
            projectile: event.projectile.map_or(0, |id| id.0),
            is_bash_attack: event.is_bash_attack,
            is_hit_blocked: event.is_hit_blocked,
            is_power_attack: event.is_power_attack,
            is_sneak_attack: event.is_sneak_attack,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{FormKind, InMemoryEngine, OwnershipRegistry, RemoteId};

    const NPC: LocalId = LocalId(0xff00_0010);
    const TARGET: LocalId = LocalId(0xff00_0020);
    const ROCK: LocalId = LocalId(0x0001_0000);
    const SWORD: LocalId = LocalId(0x0001_2eb7);
    const FIREBALL: LocalId = LocalId(0x0001_c789);
    const SCROLL: LocalId = LocalId(0x000a_44b8);
    const ARROW: LocalId = LocalId(0xff00_0100);

    fn engine() -> InMemoryEngine {
        InMemoryEngine::new()
            .with_object(TARGET, FormKind::Npc)
            .with_object(ROCK, FormKind::Static)
            .with_weapon(SWORD)
            .with_spell(FIREBALL)
            .with_scroll(SCROLL)
    }

    fn filter_with(registry: OwnershipRegistry) -> HitFilter {
        HitFilter::new(
            Arc::new(engine()),
            Arc::new(registry),
            Arc::new(HitDeduplicator::default()),
        )
    }

    #[test]
    fn test_player_hit_builds_payload() {
        let filter = filter_with(OwnershipRegistry::new());
        let mut event = HitEvent::new(LocalId::PLAYER, TARGET, SWORD);
        event.projectile = Some(ARROW);
        event.is_power_attack = true;

        let hit = filter.evaluate(&event, 0).unwrap();

        assert_eq!(hit.aggressor, LocalId::PLAYER.to_remote());
        assert_eq!(hit.target, RemoteId(0x20));
        assert_eq!(hit.source, SWORD.0);
        assert_eq!(hit.projectile, ARROW.0);
        assert!(hit.is_power_attack);
        assert!(!hit.is_sneak_attack);
    }

    #[test]
    fn test_game_data_aggressor_is_dropped() {
        let filter = filter_with(OwnershipRegistry::new());
        let event = HitEvent::new(LocalId(0x0001_3bbf), TARGET, SWORD);
        assert_eq!(filter.evaluate(&event, 0), Err(DropReason::NotAuthoritative));
    }

    #[test]
    fn test_unhosted_npc_is_dropped_and_hosted_npc_passes() {
        let registry = OwnershipRegistry::new();
        let filter = filter_with(registry.clone());
        let event = HitEvent::new(NPC, TARGET, SWORD);

        assert_eq!(filter.evaluate(&event, 0), Err(DropReason::NotAuthoritative));

        registry.host(u64::from(NPC.to_remote().0));
        assert!(filter.evaluate(&event, 0).is_ok());
    }

    #[test]
    fn test_authority_checked_before_target() {
        let filter = filter_with(OwnershipRegistry::new());
        let mut event = HitEvent::new(LocalId(0x100), TARGET, SWORD);
        event.target = None;
        assert_eq!(filter.evaluate(&event, 0), Err(DropReason::NotAuthoritative));
    }

    #[test]
    fn test_missing_target_is_dropped() {
        let filter = filter_with(OwnershipRegistry::new());
        let mut event = HitEvent::new(LocalId::PLAYER, TARGET, SWORD);
        event.target = None;
        assert_eq!(filter.evaluate(&event, 0), Err(DropReason::MissingTarget));
    }

    #[test]
    fn test_static_target_is_dropped() {
        let filter = filter_with(OwnershipRegistry::new());
        let event = HitEvent::new(LocalId::PLAYER, ROCK, FIREBALL);
        assert_eq!(filter.evaluate(&event, 0), Err(DropReason::StaticTarget));
    }

    #[test]
    fn test_target_without_base_form_passes() {
        let filter = filter_with(OwnershipRegistry::new());
        let event = HitEvent::new(LocalId::PLAYER, LocalId(0xff00_0999), SWORD);
        assert!(filter.evaluate(&event, 0).is_ok());
    }

    #[test]
    fn test_unknown_or_missing_source_is_dropped() {
        let filter = filter_with(OwnershipRegistry::new());
        let mut event = HitEvent::new(LocalId::PLAYER, TARGET, LocalId(0xdead));
        assert_eq!(filter.evaluate(&event, 0), Err(DropReason::UnsupportedSource));

        event.source = None;
        assert_eq!(filter.evaluate(&event, 0), Err(DropReason::UnsupportedSource));
    }

    #[test]
    fn test_scroll_hits_are_deduplicated() {
        let filter = filter_with(OwnershipRegistry::new());
        let event = HitEvent::new(LocalId::PLAYER, TARGET, SCROLL);
        assert!(filter.evaluate(&event, 0).is_ok());
        assert_eq!(filter.evaluate(&event, 10), Err(DropReason::Duplicate));
    }

    #[test]
    fn test_melee_does_not_touch_dedup_state() {
        let deduplicator = Arc::new(HitDeduplicator::default());
        let filter = HitFilter::new(
            Arc::new(engine()),
            Arc::new(OwnershipRegistry::new()),
            deduplicator.clone(),
        );

        let melee = HitEvent::new(LocalId::PLAYER, TARGET, SWORD);
        assert!(filter.evaluate(&melee, 0).is_ok());
        assert!(deduplicator.is_empty());

        // A melee hit right before a spell hit must not suppress the spell
        let spell = HitEvent::new(LocalId::PLAYER, TARGET, FIREBALL);
        assert!(filter.evaluate(&spell, 1).is_ok());
    }

    #[test]
    fn test_drop_reason_names() {
        let name: &'static str = DropReason::NotAuthoritative.into();
        assert_eq!(name, "not_authoritative");
    }
}
