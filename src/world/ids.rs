use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest local id handed out for references created by this client.
///
/// Everything below it either comes from the loaded game data or is one of the
/// engine's reserved ids.
pub const CLIENT_CREATED_BASE: u32 = 0xff00_0000;

/// Local id the engine always assigns to the player's own avatar
pub const PLAYER_LOCAL_ID: u32 = 0x14;

/// Engine-session handle for an object. Only meaningful inside this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalId(pub u32);

/// Network-stable identifier shared by every participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteId(pub u32);

impl LocalId {
    pub const PLAYER: LocalId = LocalId(PLAYER_LOCAL_ID);

    /// References spawned by this client (remote actors mirrored locally) live at 0xff000000 and above
    pub fn is_client_created(self) -> bool {
        self.0 >= CLIENT_CREATED_BASE
    }

    pub fn is_player(self) -> bool {
        self.0 == PLAYER_LOCAL_ID
    }

    pub fn to_remote(self) -> RemoteId {
        to_remote(self)
    }
}

impl RemoteId {
    pub fn to_local(self) -> LocalId {
        to_local(self)
    }
}

impl fmt::Display for LocalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Translates a local handle into the id other participants know the object by.
///
/// The mapping flips the client-created range onto the low range and back, so
/// it is its own inverse and never collides.
pub fn to_remote(local: LocalId) -> RemoteId {
    RemoteId(local.0 ^ CLIENT_CREATED_BASE)
}

/// Inverse of [`to_remote`]
pub fn to_local(remote: RemoteId) -> LocalId {
    LocalId(remote.0 ^ CLIENT_CREATED_BASE)
}
