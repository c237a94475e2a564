//! The closed channel catalog.
//!
//! Each entry declares a marker type, the payload it carries and the name it
//! goes by in logs. A channel that is not listed here cannot be emitted on.

use super::bus::{sealed, Channel, HandlerSlot};
use super::events;
use crate::messages as msg;
use crate::messages::ConnectionMessage;

macro_rules! channels {
    ($( $(#[$doc:meta])* $name:ident => $field:ident : $payload:ty = $wire:literal ),* $(,)?) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
            pub struct $name;

            impl sealed::Sealed for $name {}

            impl Channel for $name {
                type Payload = $payload;
                const NAME: &'static str = $wire;

                fn slot(channels: &Channels) -> &HandlerSlot<$payload> {
                    &channels.$field
                }
            }
        )*

        /// Handler tables for every channel
        pub struct Channels {
            $( $field: HandlerSlot<$payload>, )*
        }

        impl Channels {
            pub(super) fn new() -> Self {
                Self {
                    $( $field: HandlerSlot::new(), )*
                }
            }

            pub(super) fn total_handlers(&self) -> usize {
                0 $( + self.$field.len() )*
            }
        }

        /// Names of every channel, in declaration order
        pub const CHANNEL_NAMES: &[&str] = &[ $( $wire ),* ];
    };
}

channels! {
    GameLoad => game_load: events::GameLoadEvent = "gameLoad",

    /// Outbound messages for the transport
    SendMessage => send_message: msg::Envelope = "sendMessage",
    SendRawMessage => send_raw_message: events::SendRawMessageEvent = "sendRawMessage",
    SendMessageWithRefrId => send_message_with_refr_id: events::SendMessageWithRefrIdEvent = "sendMessageWithRefrId",

    ApplyDeathState => apply_death_state: events::ApplyDeathStateEvent = "applyDeathStateEvent",

    ConnectionFailed => connection_failed: events::ConnectionFailed = "connectionFailed",
    ConnectionDenied => connection_denied: events::ConnectionDenied = "connectionDenied",
    ConnectionAccepted => connection_accepted: events::ConnectionAccepted = "connectionAccepted",
    ConnectionDisconnect => connection_disconnect: events::ConnectionDisconnect = "connectionDisconnect",

    // Inbound, one channel per message kind
    UpdateMovementMessage => update_movement: ConnectionMessage<msg::UpdateMovementMessage> = "updateMovementMessage",
    UpdateAnimationMessage => update_animation: ConnectionMessage<msg::UpdateAnimationMessage> = "updateAnimationMessage",
    UpdateEquipmentMessage => update_equipment: ConnectionMessage<msg::UpdateEquipmentMessage> = "updateEquipmentMessage",
    ChangeValuesMessage => change_values: ConnectionMessage<msg::ChangeValuesMessage> = "changeValuesMessage",
    SpellCastMessage => spell_cast: ConnectionMessage<msg::SpellCastMessage> = "spellCastMessage",
    UpdateAnimVariablesMessage => update_anim_variables: ConnectionMessage<msg::UpdateAnimVariablesMessage> = "updateAnimVariablesMessage",
    UpdateAppearanceMessage => update_appearance: ConnectionMessage<msg::UpdateAppearanceMessage> = "updateAppearanceMessage",
    TeleportMessage => teleport: ConnectionMessage<msg::TeleportMessage> = "teleportMessage",
    OpenContainerMessage => open_container: ConnectionMessage<msg::OpenContainerMessage> = "openContainerMessage",
    HostStartMessage => host_start: ConnectionMessage<msg::HostStartMessage> = "hostStartMessage",
    HostStopMessage => host_stop: ConnectionMessage<msg::HostStopMessage> = "hostStopMessage",
    SetInventoryMessage => set_inventory: ConnectionMessage<msg::SetInventoryMessage> = "setInventoryMessage",
    CreateActorMessage => create_actor: ConnectionMessage<msg::CreateActorMessage> = "createActorMessage",
    DestroyActorMessage => destroy_actor: ConnectionMessage<msg::DestroyActorMessage> = "destroyActorMessage",
    SetRaceMenuOpenMessage => set_race_menu_open: ConnectionMessage<msg::SetRaceMenuOpenMessage> = "setRaceMenuOpenMessage",
    SpSnippetMessage => sp_snippet: ConnectionMessage<msg::SpSnippetMessage> = "spSnippetMessage",
    UpdateGamemodeDataMessage => update_gamemode_data: ConnectionMessage<msg::UpdateGamemodeDataMessage> = "updateGamemodeDataMessage",
    UpdatePropertyMessage => update_property: ConnectionMessage<msg::UpdatePropertyMessage> = "updatePropertyMessage",
    DeathStateContainerMessage => death_state_container: ConnectionMessage<msg::DeathStateContainerMessage> = "deathStateContainerMessage",
    TeleportMessage2 => teleport2: ConnectionMessage<msg::TeleportMessage2> = "teleportMessage2",
    CustomPacketMessage => custom_packet: ConnectionMessage<msg::CustomPacketMessage> = "customPacketMessage",

    // Local only
    BrowserWindowLoaded => browser_window_loaded: events::BrowserWindowLoadedEvent = "browserWindowLoaded",
    AuthAttempt => auth_attempt: events::AuthAttemptEvent = "authAttempt",
    AuthNeeded => auth_needed: events::AuthNeededEvent = "authNeeded",

    /// Every inbound message, before its per-kind channel
    AnyMessage => any_message: ConnectionMessage<msg::AnyMessage> = "anyMessage",
    AnyRawMessage => any_raw_message: events::AnyRawMessageEvent = "anyRawMessage",
    NewLocalLagValueCalculated => new_local_lag_value_calculated: events::NewLocalLagValueCalculatedEvent = "newLocalLagValueCalculated",
    QueryBlockSetInventory => query_block_set_inventory: events::QueryBlockSetInventoryEvent = "queryBlockSetInventoryEvent",
    QueryKeyCodeBindings => query_key_code_bindings: events::QueryKeyCodeBindings = "queryKeyCodeBindings",
    NicknameCreate => nickname_create: events::NicknameCreateEvent = "nicknameCreate",
    NicknameDestroy => nickname_destroy: events::NicknameDestroyEvent = "nicknameDestroy",
}
