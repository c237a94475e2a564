use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use super::hit::Hit;
use super::payloads::*;

/// Tag carried in the `t` field of every network message
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
pub enum MsgType {
    // Client -> Server
    OnHit,

    // Server -> Client
    UpdateMovement,
    UpdateAnimation,
    UpdateEquipment,
    ChangeValues,
    SpellCast,
    UpdateAnimVariables,
    UpdateAppearance,
    Teleport,
    OpenContainer,
    HostStart,
    HostStop,
    SetInventory,
    CreateActor,
    DestroyActor,
    SetRaceMenuOpen,
    SpSnippet,
    UpdateGamemodeData,
    UpdateProperty,
    DeathStateContainer,
    Teleport2,
    CustomPacket,
}

/// Delivery hint for the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, IntoStaticStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Reliability {
    Reliable,
    Unreliable,
}

/// Any network message. The `t` tag selects the payload type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "data")]
pub enum AnyMessage {
    OnHit(Hit),
    UpdateMovement(UpdateMovementMessage),
    UpdateAnimation(UpdateAnimationMessage),
    UpdateEquipment(UpdateEquipmentMessage),
    ChangeValues(ChangeValuesMessage),
    SpellCast(SpellCastMessage),
    UpdateAnimVariables(UpdateAnimVariablesMessage),
    UpdateAppearance(UpdateAppearanceMessage),
    Teleport(TeleportMessage),
    OpenContainer(OpenContainerMessage),
    HostStart(HostStartMessage),
    HostStop(HostStopMessage),
    SetInventory(SetInventoryMessage),
    CreateActor(CreateActorMessage),
    DestroyActor(DestroyActorMessage),
    SetRaceMenuOpen(SetRaceMenuOpenMessage),
    SpSnippet(SpSnippetMessage),
    UpdateGamemodeData(UpdateGamemodeDataMessage),
    UpdateProperty(UpdatePropertyMessage),
    DeathStateContainer(DeathStateContainerMessage),
    Teleport2(TeleportMessage2),
    CustomPacket(CustomPacketMessage),
}

impl AnyMessage {
    pub fn msg_type(&self) -> MsgType {
        match self {
            AnyMessage::OnHit(_) => MsgType::OnHit,
            AnyMessage::UpdateMovement(_) => MsgType::UpdateMovement,
            AnyMessage::UpdateAnimation(_) => MsgType::UpdateAnimation,
            AnyMessage::UpdateEquipment(_) => MsgType::UpdateEquipment,
            AnyMessage::ChangeValues(_) => MsgType::ChangeValues,
            AnyMessage::SpellCast(_) => MsgType::SpellCast,
            AnyMessage::UpdateAnimVariables(_) => MsgType::UpdateAnimVariables,
            AnyMessage::UpdateAppearance(_) => MsgType::UpdateAppearance,
            AnyMessage::Teleport(_) => MsgType::Teleport,
            AnyMessage::OpenContainer(_) => MsgType::OpenContainer,
            AnyMessage::HostStart(_) => MsgType::HostStart,
            AnyMessage::HostStop(_) => MsgType::HostStop,
            AnyMessage::SetInventory(_) => MsgType::SetInventory,
            AnyMessage::CreateActor(_) => MsgType::CreateActor,
            AnyMessage::DestroyActor(_) => MsgType::DestroyActor,
            AnyMessage::SetRaceMenuOpen(_) => MsgType::SetRaceMenuOpen,
            AnyMessage::SpSnippet(_) => MsgType::SpSnippet,
            AnyMessage::UpdateGamemodeData(_) => MsgType::UpdateGamemodeData,
            AnyMessage::UpdateProperty(_) => MsgType::UpdateProperty,
            AnyMessage::DeathStateContainer(_) => MsgType::DeathStateContainer,
            AnyMessage::Teleport2(_) => MsgType::Teleport2,
            AnyMessage::CustomPacket(_) => MsgType::CustomPacket,
        }
    }
}

/// Outbound message together with its delivery hint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub message: AnyMessage,
    pub reliability: Reliability,
}

impl Envelope {
    pub fn new(message: AnyMessage, reliability: Reliability) -> Self {
        Self {
            message,
            reliability,
        }
    }

    pub fn reliable(message: AnyMessage) -> Self {
        Self::new(message, Reliability::Reliable)
    }

    pub fn unreliable(message: AnyMessage) -> Self {
        Self::new(message, Reliability::Unreliable)
    }

    pub fn tag(&self) -> MsgType {
        self.message.msg_type()
    }
}

/// A message received from the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionMessage<M> {
    pub message: M,
}

impl<M> ConnectionMessage<M> {
    pub fn new(message: M) -> Self {
        Self { message }
    }
}
