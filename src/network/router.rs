use tracing::{debug, instrument, warn};

use crate::event::channels;
use crate::event::events::AnyRawMessageEvent;
use crate::event::{Channel, EmitReport, EventBus};
use crate::messages::{AnyMessage, ConnectionMessage, MessageError, MsgType};

/// Routes messages received from the server onto the bus.
///
/// Each message goes to `anyMessage` first and then to the channel for its tag.
#[derive(Debug, Clone)]
pub struct InboundRouter {
    event_bus: EventBus,
}

impl InboundRouter {
    pub fn new(event_bus: EventBus) -> Self {
        Self { event_bus }
    }

    /// Handles a packet straight off the transport
    pub fn route_packet(&self, packet: &[u8]) -> Result<MsgType, MessageError> {
        self.event_bus
            .emit::<channels::AnyRawMessage>(&AnyRawMessageEvent {
                packet: packet.to_vec(),
            });

        let text = std::str::from_utf8(packet).map_err(|_| MessageError::NotText)?;
        self.route_text(text)
    }

    #[instrument(skip(self, text), fields(len = text.len()))]
    pub fn route_text(&self, text: &str) -> Result<MsgType, MessageError> {
        let message: AnyMessage = serde_json::from_str(text).map_err(|e| {
            warn!(error = %e, "Failed to parse inbound message");
            MessageError::from(e)
        })?;

        let msg_type = message.msg_type();
        self.route(message);
        Ok(msg_type)
    }

    pub fn route(&self, message: AnyMessage) -> EmitReport {
        let msg_type = message.msg_type();
        debug!(tag = %msg_type, "Routing inbound message");

        let mut report = self
            .event_bus
            .emit::<channels::AnyMessage>(&ConnectionMessage::new(message.clone()));

        let kind_report = match message {
            AnyMessage::UpdateMovement(m) => self.deliver::<channels::UpdateMovementMessage, _>(m),
            AnyMessage::UpdateAnimation(m) => self.deliver::<channels::UpdateAnimationMessage, _>(m),
            AnyMessage::UpdateEquipment(m) => self.deliver::<channels::UpdateEquipmentMessage, _>(m),
            AnyMessage::ChangeValues(m) => self.deliver::<channels::ChangeValuesMessage, _>(m),
            AnyMessage::SpellCast(m) => self.deliver::<channels::SpellCastMessage, _>(m),
            AnyMessage::UpdateAnimVariables(m) => {
                self.deliver::<channels::UpdateAnimVariablesMessage, _>(m)
            }
            AnyMessage::UpdateAppearance(m) => {
                self.deliver::<channels::UpdateAppearanceMessage, _>(m)
            }
            AnyMessage::Teleport(m) => self.deliver::<channels::TeleportMessage, _>(m),
            AnyMessage::OpenContainer(m) => self.deliver::<channels::OpenContainerMessage, _>(m),
            AnyMessage::HostStart(m) => self.deliver::<channels::HostStartMessage, _>(m),
            AnyMessage::HostStop(m) => self.deliver::<channels::HostStopMessage, _>(m),
            AnyMessage::SetInventory(m) => self.deliver::<channels::SetInventoryMessage, _>(m),
            AnyMessage::CreateActor(m) => self.deliver::<channels::CreateActorMessage, _>(m),
            AnyMessage::DestroyActor(m) => self.deliver::<channels::DestroyActorMessage, _>(m),
            AnyMessage::SetRaceMenuOpen(m) => self.deliver::<channels::SetRaceMenuOpenMessage, _>(m),
            AnyMessage::SpSnippet(m) => self.deliver::<channels::SpSnippetMessage, _>(m),
            AnyMessage::UpdateGamemodeData(m) => {
                self.deliver::<channels::UpdateGamemodeDataMessage, _>(m)
            }
            AnyMessage::UpdateProperty(m) => self.deliver::<channels::UpdatePropertyMessage, _>(m),
            AnyMessage::DeathStateContainer(m) => {
                self.deliver::<channels::DeathStateContainerMessage, _>(m)
            }
            AnyMessage::Teleport2(m) => self.deliver::<channels::TeleportMessage2, _>(m),
            AnyMessage::CustomPacket(m) => self.deliver::<channels::CustomPacketMessage, _>(m),
            AnyMessage::OnHit(_) => {
                debug!(tag = %msg_type, "Client-to-server message received inbound, ignoring");
                EmitReport::default()
            }
        };

        report.delivered += kind_report.delivered;
        report.failed += kind_report.failed;
        report
    }

    fn deliver<C, M>(&self, message: M) -> EmitReport
    where
        C: Channel<Payload = ConnectionMessage<M>>,
    {
        self.event_bus.emit::<C>(&ConnectionMessage::new(message))
    }
}
