use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Position, rotation and the worldspace or cell they are relative to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    pub pos: [f32; 3],
    pub rot: [f32; 3],
    pub world_or_cell: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMovementMessage {
    pub idx: u32,
    #[serde(flatten)]
    pub transform: Transform,
    pub run_mode: String,
    #[serde(default)]
    pub is_sneaking: bool,
    #[serde(default)]
    pub is_weap_drawn: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAnimationMessage {
    pub idx: u32,
    pub anim_event_name: String,
    pub num_changes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateEquipmentMessage {
    pub idx: u32,
    pub data: serde_json::Value,
}

/// Actor value percentages; absent fields are unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorValues {
    pub health: Option<f32>,
    pub magicka: Option<f32>,
    pub stamina: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeValuesMessage {
    pub idx: u32,
    pub data: ActorValues,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellCastMessage {
    pub idx: u32,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateAnimVariablesMessage {
    pub idx: u32,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateAppearanceMessage {
    pub idx: u32,
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeleportMessage {
    pub idx: u32,
    #[serde(flatten)]
    pub transform: Transform,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenContainerMessage {
    pub target: u32,
}

/// The server asks this client to start simulating `target`.
/// `target` may carry the 0x100000000 claim offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostStartMessage {
    pub target: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostStopMessage {
    pub target: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryEntry {
    pub base_id: u32,
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub entries: Vec<InventoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetInventoryMessage {
    pub inventory: Inventory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActorMessage {
    pub idx: u32,
    #[serde(default)]
    pub ref_r_id: Option<u32>,
    #[serde(default)]
    pub base_id: Option<u32>,
    pub transform: Transform,
    #[serde(default)]
    pub is_me: bool,
    #[serde(default)]
    pub appearance: Option<serde_json::Value>,
    #[serde(default)]
    pub equipment: Option<serde_json::Value>,
    #[serde(default)]
    pub props: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestroyActorMessage {
    pub idx: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetRaceMenuOpenMessage {
    pub open: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpSnippetMessage {
    pub class: String,
    pub function: String,
    pub arguments: Vec<serde_json::Value>,
    pub self_id: u32,
    pub snippet_idx: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGamemodeDataMessage {
    #[serde(default)]
    pub event_sources: HashMap<String, String>,
    #[serde(default)]
    pub update_owner_functions: HashMap<String, String>,
    #[serde(default)]
    pub update_neighbor_functions: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePropertyMessage {
    pub idx: u32,
    pub prop_name: String,
    pub data: serde_json::Value,
    #[serde(default)]
    pub ref_r_id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeathStateContainerMessage {
    pub idx: u32,
    pub is_dead: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeleportMessage2 {
    #[serde(flatten)]
    pub transform: Transform,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomPacketMessage {
    pub content_json_dump: String,
}
