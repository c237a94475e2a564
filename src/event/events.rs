//! Payloads for the local (non-message) channels.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::messages::{AnyMessage, Reliability};
use crate::world::LocalId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameLoadEvent {
    pub is_new_game: bool,
}

/// Pre-serialized packet for the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendRawMessageEvent {
    pub message: Vec<u8>,
    pub reliability: Reliability,
}

/// Outbound message about a specific reference; the transport resolves
/// `refr_id` to a remote id before sending
#[derive(Debug, Clone, PartialEq)]
pub struct SendMessageWithRefrIdEvent {
    pub message: AnyMessage,
    pub reliability: Reliability,
    pub refr_id: Option<LocalId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyDeathStateEvent {
    pub refr_id: LocalId,
    pub is_dead: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionFailed {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionDenied {
    pub error: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionAccepted;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionDisconnect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserWindowLoadedEvent;

#[derive(Debug, Clone, PartialEq)]
pub struct AuthAttemptEvent {
    pub auth_game_data: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthNeededEvent;

/// Packet that arrived from the transport, before any parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnyRawMessageEvent {
    pub packet: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewLocalLagValueCalculatedEvent {
    pub lag_ms: f64,
}

/// Asks handlers whether an incoming inventory update should be held back.
/// Any handler may call [`block`](Self::block).
#[derive(Debug, Default)]
pub struct QueryBlockSetInventoryEvent {
    blocked: AtomicBool,
}

impl QueryBlockSetInventoryEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(&self) {
        self.blocked.store(true, Ordering::Relaxed);
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::Relaxed)
    }
}

/// Collects the key codes bound to `action` from whoever owns key bindings
#[derive(Debug)]
pub struct QueryKeyCodeBindings {
    pub action: String,
    keys: Mutex<Vec<u32>>,
}

impl QueryKeyCodeBindings {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            keys: Mutex::new(Vec::new()),
        }
    }

    pub fn bind(&self, key_code: u32) {
        self.keys.lock().push(key_code);
    }

    pub fn keys(&self) -> Vec<u32> {
        self.keys.lock().clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NicknameCreateEvent {
    pub refr_id: LocalId,
    pub nickname: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NicknameDestroyEvent {
    pub refr_id: LocalId,
}
