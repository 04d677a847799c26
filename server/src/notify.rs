use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::{
    net::{TcpListener, TcpStream},
    sync::broadcast,
};
use tokio_websockets::{Message, ServerBuilder};
use tracing::info;

use common::models::CustomerOrder;

pub const EVENT_CAPACITY: usize = 100;

/// Order-change event pushed to every connected viewer. Serializes to the
/// wire as either `{"action":"add"}` or the full updated record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderEvent {
    Added {
        action: String,
    },
    Updated {
        id: i64,
        customer_name: String,
        product_name: String,
        status: String,
        email: String,
        updated_at: String,
    },
}

impl OrderEvent {
    pub fn added() -> Self {
        OrderEvent::Added {
            action: "add".to_string(),
        }
    }

    pub fn updated(order: &CustomerOrder) -> Self {
        OrderEvent::Updated {
            id: order.id,
            customer_name: order.customer_name.clone(),
            product_name: order.product_name.clone(),
            status: order.status.clone(),
            email: order.email.clone(),
            updated_at: order.updated_at_display(),
        }
    }
}

pub fn event_channel() -> broadcast::Sender<OrderEvent> {
    let (tx, _rx) = broadcast::channel(EVENT_CAPACITY);
    tx
}

/// Fan-out WebSocket server. Every accepted connection gets its own
/// subscription to the event channel; publish is fire-and-forget, with no
/// per-client state and no replay for clients that reconnect.
pub struct NotifyServer {
    events: broadcast::Sender<OrderEvent>,
}

impl NotifyServer {
    pub fn new(events: broadcast::Sender<OrderEvent>) -> Self {
        Self { events }
    }

    pub async fn start(&self, addr: &str) -> anyhow::Result<()> {
        let listener = TcpListener::bind(addr).await?;
        info!("Notify server listening on {}", addr);

        while let Ok((stream, _)) = listener.accept().await {
            let events = self.events.subscribe();

            tokio::spawn(async move {
                if let Err(e) = handle_connection(stream, events).await {
                    eprintln!("Error handling connection: {}", e);
                }
            });
        }

        Ok(())
    }
}

async fn handle_connection(
    stream: TcpStream,
    mut events: broadcast::Receiver<OrderEvent>,
) -> anyhow::Result<()> {
    let ws_stream = ServerBuilder::new().accept(stream).await?;
    info!("A viewer connected");

    let (mut ws_write, mut ws_read) = ws_stream.split();

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    let payload = serde_json::to_string(&event)?;
                    if ws_write.send(Message::text(payload)).await.is_err() {
                        break;
                    }
                }
                // A slow viewer that missed events just keeps going; there
                // is no replay.
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            },
            msg = ws_read.next() => match msg {
                // Clients send no meaningful payloads; reading only
                // notices the close.
                Some(Ok(_)) => continue,
                _ => break,
            },
        }
    }

    info!("A viewer disconnected");
    Ok(())
}
