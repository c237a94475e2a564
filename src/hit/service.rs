use std::sync::Arc;
use tracing::{debug, instrument};

use super::filter::{DropReason, HitFilter};
use crate::messages::{AnyMessage, Envelope, Hit};
use crate::network::MessageDispatcher;
use crate::world::{Clock, HitEvent};

/// Turns the engine's hit callbacks into `OnHit` messages
pub struct HitService {
    filter: HitFilter,
    dispatcher: MessageDispatcher,
    clock: Arc<dyn Clock>,
}

impl HitService {
    pub fn new(filter: HitFilter, dispatcher: MessageDispatcher, clock: Arc<dyn Clock>) -> Self {
        Self {
            filter,
            dispatcher,
            clock,
        }
    }

    /// Entry point for the engine's hit callback. Returns the payload if one was sent.
    pub fn on_hit(&self, event: &HitEvent) -> Option<Hit> {
        self.try_hit(event).ok()
    }

    /// Same as [`on_hit`](Self::on_hit) but reports why a hit was dropped
    #[instrument(skip(self, event), fields(aggressor = %event.aggressor))]
    pub fn try_hit(&self, event: &HitEvent) -> Result<Hit, DropReason> {
        let hit = self
            .filter
            .evaluate(event, self.clock.now_ms())
            .map_err(|reason| {
                let name: &'static str = reason.into();
                debug!(reason = name, "Hit not reported");
                reason
            })?;

        debug!(target_id = %hit.target, source = hit.source, "Reporting hit");
        self.dispatcher
            .publish(Envelope::reliable(AnyMessage::OnHit(hit.clone())));
        Ok(hit)
    }
}
