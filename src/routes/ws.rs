//! WebSocket upgrade + message loop. Each connection owns one tutoring session.
//! Every client message gets exactly one JSON reply; hints resolved in the
//! background are pushed as extra `hint` messages when still relevant.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{info, error, instrument, debug};
use uuid::Uuid;

use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::logic::*;
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "quadramaster", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  let session = new_session(&state).await;
  let id = session.id;
  info!(target: "quadramaster", session = %id, "WebSocket connected");

  let (hint_tx, mut hint_rx) = mpsc::unbounded_channel::<ServerWsMessage>();
  if !send(&mut socket, &ServerWsMessage::Session { session }).await {
    return;
  }

  loop {
    let reply = tokio::select! {
      incoming = socket.recv() => match incoming {
        Some(Ok(Message::Text(txt))) => match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(msg) => {
            debug!(target: "quadramaster", "WS received: {:?}", &msg);
            handle_client_ws(msg, &state, id, &hint_tx).await
          }
          Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
        },
        Some(Ok(Message::Ping(payload))) => {
          let _ = socket.send(Message::Pong(payload)).await;
          continue;
        }
        Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
        Some(Ok(_)) => continue,
      },
      Some(hint) = hint_rx.recv() => hint,
    };

    if !send(&mut socket, &reply).await {
      break;
    }
  }

  state.sessions.write().await.remove(&id);
  info!(target: "quadramaster", session = %id, "WebSocket disconnected");
}

async fn send(socket: &mut WebSocket, msg: &ServerWsMessage) -> bool {
  let out = serde_json::to_string(msg).unwrap_or_else(|e| {
    serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
  });
  if let Err(e) = socket.send(Message::Text(out)).await {
    error!(target: "quadramaster", error = %e, "WS send error");
    return false;
  }
  true
}

#[instrument(level = "info", skip(state, hint_tx))]
async fn handle_client_ws(
  msg: ClientWsMessage,
  state: &Arc<AppState>,
  id: Uuid,
  hint_tx: &UnboundedSender<ServerWsMessage>,
) -> ServerWsMessage {
  let result = match msg {
    ClientWsMessage::Ping => return ServerWsMessage::Pong,
    ClientWsMessage::Practice => return ServerWsMessage::Practice { expression: state.sample_practice() },
    ClientWsMessage::State => session_view(state, id).await,
    ClientWsMessage::ChooseLanguage { language } => choose_language(state, id, language).await,
    ClientWsMessage::ChooseMode { mode } => choose_mode(state, id, mode).await,
    ClientWsMessage::ChooseMethod { method } => choose_method(state, id, method).await,
    ClientWsMessage::StartOver => start_over(state, id).await,
    ClientWsMessage::Submit { input } => {
      return match submit_answer(state, id, input, Some(hint_tx.clone())).await {
        Ok(result) => {
          info!(target: "tutor", session = %id, accepted = result.accepted, "WS submit evaluated");
          ServerWsMessage::SubmitResult { result }
        }
        Err(e) => ServerWsMessage::Error { message: e.to_string() },
      };
    }
  };

  match result {
    Ok(session) => ServerWsMessage::Session { session },
    Err(e) => ServerWsMessage::Error { message: e.to_string() },
  }
}
