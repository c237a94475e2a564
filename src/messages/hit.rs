use serde::{Deserialize, Serialize};

use crate::world::RemoteId;

/// Outbound report of a hit this client is authoritative for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hit {
    pub aggressor: RemoteId,
    pub target: RemoteId,
    /// Raw engine form id of the weapon/spell/scroll, 0 when absent
    pub source: u32,
    /// Raw engine form id of the projectile, 0 when absent
    pub projectile: u32,
    pub is_bash_attack: bool,
    pub is_hit_blocked: bool,
    pub is_power_attack: bool,
    pub is_sneak_attack: bool,
}
