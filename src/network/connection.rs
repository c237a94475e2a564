use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::router::InboundRouter;
use crate::event::channels;
use crate::event::events::ConnectionDisconnect;
use crate::event::EventBus;

/// Simple transport abstraction - all we care about is send/receive
#[async_trait]
pub trait PacketSocket: Send {
    /// Send a serialized message to the server
    async fn send_message(&mut self, message: String) -> Result<(), SocketError>;

    /// Receive the next packet (None if connection closed)
    async fn receive_message(&mut self) -> Result<Option<Vec<u8>>, SocketError>;

    /// Close the connection
    async fn close(&mut self) -> Result<(), SocketError>;
}

/// Handler for packets arriving from the server
#[async_trait]
pub trait PacketHandler: Send + Sync {
    async fn handle_packet(&self, packet: Vec<u8>);
}

#[derive(Debug, Error)]
pub enum SocketError {
    #[error("Connection closed")]
    ConnectionClosed,

    #[error("Send failed: {0}")]
    SendFailed(String),

    #[error("Receive failed: {0}")]
    ReceiveFailed(String),
}

#[async_trait]
impl PacketHandler for InboundRouter {
    async fn handle_packet(&self, packet: Vec<u8>) {
        if let Err(e) = self.route_packet(&packet) {
            debug!(error = %e, "Inbound packet not routed as a message");
        }
    }
}

/// A managed connection to the server.
///
/// Drains the outbound queue fed by `OutboundSink` into the socket and hands
/// inbound packets to the packet handler. Emits `connectionDisconnect` when done.
pub struct Connection {
    socket: Box<dyn PacketSocket>,
    outbound_receiver: mpsc::UnboundedReceiver<String>,
    packet_handler: Arc<dyn PacketHandler>,
    event_bus: EventBus,
}

impl Connection {
    pub fn new(
        socket: Box<dyn PacketSocket>,
        outbound_receiver: mpsc::UnboundedReceiver<String>,
        packet_handler: Arc<dyn PacketHandler>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            socket,
            outbound_receiver,
            packet_handler,
            event_bus,
        }
    }

    /// Run the connection - handles both sending and receiving until disconnect
    pub async fn run(mut self) -> Result<(), SocketError> {
        let result = self.pump().await;

        if let Err(e) = self.socket.close().await {
            debug!(error = %e, "Socket close failed");
        }
        info!(clean = result.is_ok(), "Connection closed");
        self.event_bus
            .emit::<channels::ConnectionDisconnect>(&ConnectionDisconnect);
        result
    }

    async fn pump(&mut self) -> Result<(), SocketError> {
        loop {
            tokio::select! {
                biased;

                // Outbound: from the bus to the server
                msg = self.outbound_receiver.recv() => {
                    match msg {
                        Some(message) => self.socket.send_message(message).await?,
                        None => return Ok(()),
                    }
                }

                // Inbound: from the server to the bus
                msg = self.socket.receive_message() => {
                    match msg? {
                        Some(packet) => self.packet_handler.handle_packet(packet).await,
                        None => return Ok(()),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::channels::HostStartMessage;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Socket that replays scripted packets and records what was sent
    struct ScriptedSocket {
        inbound: mpsc::UnboundedReceiver<Vec<u8>>,
        sent: Arc<Mutex<Vec<String>>>,
        fail_close: bool,
    }

    #[async_trait]
    impl PacketSocket for ScriptedSocket {
        async fn send_message(&mut self, message: String) -> Result<(), SocketError> {
            self.sent.lock().push(message);
            Ok(())
        }

        async fn receive_message(&mut self) -> Result<Option<Vec<u8>>, SocketError> {
            Ok(self.inbound.recv().await)
        }

        async fn close(&mut self) -> Result<(), SocketError> {
            if self.fail_close {
                return Err(SocketError::ConnectionClosed);
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_connection_routes_inbound_and_flushes_outbound() {
        let bus = EventBus::new();
        let hosted = Arc::new(Mutex::new(Vec::new()));
        let hosted_log = hosted.clone();
        bus.on::<HostStartMessage, _>("record", move |m| {
            hosted_log.lock().push(m.message.target);
            Ok(())
        });
        let disconnected = Arc::new(AtomicBool::new(false));
        let flag = disconnected.clone();
        bus.on::<channels::ConnectionDisconnect, _>("flag", move |_| {
            flag.store(true, Ordering::SeqCst);
            Ok(())
        });

        let (packet_tx, packet_rx) = mpsc::unbounded_channel();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let sent = Arc::new(Mutex::new(Vec::new()));
        let socket = ScriptedSocket {
            inbound: packet_rx,
            sent: sent.clone(),
            fail_close: false,
        };

        outbound_tx.send("hello".to_string()).unwrap();
        packet_tx
            .send(br#"{"t":"HostStart","data":{"target":16}}"#.to_vec())
            .unwrap();
        drop(packet_tx);

        let connection = Connection::new(
            Box::new(socket),
            outbound_rx,
            Arc::new(InboundRouter::new(bus.clone())),
            bus.clone(),
        );
        connection.run().await.unwrap();

        assert_eq!(*hosted.lock(), vec![16]);
        assert!(disconnected.load(Ordering::SeqCst));
        // Outbound is drained first, so the queued message went out before the socket closed
        assert_eq!(*sent.lock(), vec!["hello".to_string()]);
        drop(outbound_tx);
    }

    #[tokio::test]
    async fn test_failed_close_still_disconnects_cleanly() {
        let bus = EventBus::new();
        let disconnected = Arc::new(AtomicBool::new(false));
        let flag = disconnected.clone();
        bus.on::<channels::ConnectionDisconnect, _>("flag", move |_| {
            flag.store(true, Ordering::SeqCst);
            Ok(())
        });

        let (packet_tx, packet_rx) = mpsc::unbounded_channel::<Vec<u8>>();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        drop(packet_tx);
        drop(outbound_tx);

        let socket = ScriptedSocket {
            inbound: packet_rx,
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_close: true,
        };
        let connection = Connection::new(
            Box::new(socket),
            outbound_rx,
            Arc::new(InboundRouter::new(bus.clone())),
            bus,
        );

        assert!(connection.run().await.is_ok());
        assert!(disconnected.load(Ordering::SeqCst));
    }
}
