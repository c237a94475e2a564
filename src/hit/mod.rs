// Hit reporting: decides which locally observed hits this client is
// responsible for and sends them to the server.

pub use dedup::{start_dedup_sweep_task, HitDeduplicator, DEFAULT_DEDUP_WINDOW};
pub use filter::{is_authoritative, DropReason, HitFilter};
pub use service::HitService;

mod dedup;
mod filter;
mod service;
