use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use crate::AppState;

/// In-memory fan-out for the chat channel. Membership is volatile: a
/// subscriber exists only while its socket is open and is rebuilt on
/// reconnect. Nothing here is persisted.
#[derive(Clone)]
pub struct ChatHub {
    tx: broadcast::Sender<String>,
}

impl ChatHub {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.tx.subscribe()
    }

    pub fn publish(&self, message: String) {
        // Send only fails when nobody is listening, which is fine.
        let _ = self.tx.send(message);
    }
}

pub async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.chat.clone()))
}

async fn handle_socket(socket: WebSocket, hub: ChatHub) {
    let (mut outbound, mut inbound) = socket.split();
    let mut rx = hub.subscribe();

    let mut send_task = tokio::spawn(async move {
        while let Ok(text) = rx.recv().await {
            if outbound.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = inbound.next().await {
            if let Message::Text(text) = message {
                hub.publish(text);
            }
        }
    });

    // Whichever side closes first tears down the other.
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }
}
