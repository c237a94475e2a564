use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

use super::ids::RemoteId;

/// Offset the server may add to a remote id when it hands out a hosting claim.
/// Both forms refer to the same entity.
pub const CLAIM_OFFSET: u64 = 0x1_0000_0000;

/// Read-only view of which entities this client is authoritative for
pub trait HostedEntities: Send + Sync {
    fn is_hosted(&self, remote: RemoteId) -> bool;
}

/// Process-wide set of hosting claims.
///
/// Cloning shares the underlying set. Only the host negotiation side should
/// mutate it; everything else takes it as `&dyn HostedEntities`.
#[derive(Debug, Clone, Default)]
pub struct OwnershipRegistry {
    claims: Arc<RwLock<HashSet<u64>>>,
}

impl OwnershipRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a claim exactly as the server sent it
    pub fn host(&self, claim: u64) -> bool {
        let inserted = self.claims.write().insert(claim);
        if inserted {
            info!(claim, "Started hosting entity");
        }
        inserted
    }

    pub fn release(&self, claim: u64) -> bool {
        let removed = self.claims.write().remove(&claim);
        if removed {
            info!(claim, "Stopped hosting entity");
        } else {
            debug!(claim, "Release for unknown claim ignored");
        }
        removed
    }

    /// Swaps in a complete claim set
    pub fn replace(&self, claims: impl IntoIterator<Item = u64>) {
        let fresh: HashSet<u64> = claims.into_iter().collect();
        info!(count = fresh.len(), "Replaced hosting claims");
        *self.claims.write() = fresh;
    }

    pub fn clear(&self) {
        let mut claims = self.claims.write();
        if !claims.is_empty() {
            info!(count = claims.len(), "Cleared hosting claims");
        }
        claims.clear();
    }

    pub fn claims(&self) -> Vec<u64> {
        let mut claims: Vec<u64> = self.claims.read().iter().copied().collect();
        claims.sort_unstable();
        claims
    }

    pub fn len(&self) -> usize {
        self.claims.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.read().is_empty()
    }
}

impl HostedEntities for OwnershipRegistry {
    fn is_hosted(&self, remote: RemoteId) -> bool {
        let canonical = u64::from(remote.0);
        let claims = self.claims.read();
        claims.contains(&canonical) || claims.contains(&(canonical + CLAIM_OFFSET))
    }
}
