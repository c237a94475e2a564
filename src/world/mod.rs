// Engine-facing world model: identity mapping, hosting claims and the
// queries the engine binding answers.

pub use engine::{
    Clock, EngineQueries, FormKind, HitEvent, HitSource, InMemoryEngine, ManualClock,
    ObjectEntry, SystemClock, WorldDescription,
};
pub use ids::{to_local, to_remote, LocalId, RemoteId, CLIENT_CREATED_BASE, PLAYER_LOCAL_ID};
pub use ownership::{HostedEntities, OwnershipRegistry, CLAIM_OFFSET};

mod engine;
mod ids;
mod ownership;
