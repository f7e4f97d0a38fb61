//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to the service layer. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{debug, error, info, instrument};

use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::service::{serve_question, stage_labels};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "math_dungeon", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "math_dungeon", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "math_dungeon", ?incoming, "WS received");
            handle_client_ws(incoming, &state)
          }
          Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "math_dungeon", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "math_dungeon", "WebSocket disconnected");
}

/// Generation is pure CPU work and fast, so it runs inline on the socket task.
pub fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::NewQuestion { stage, character, difficulty } => {
      match serve_question(state, &stage, character.as_deref(), difficulty.as_deref()) {
        Ok(question) => ServerWsMessage::Question { question },
        Err(message) => ServerWsMessage::Error { message },
      }
    }

    ClientWsMessage::StageLabels { stage } => {
      let labels = stage_labels(state, &stage);
      ServerWsMessage::StageLabels { stage_id: stage, labels }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ping_gets_pong() {
    let state = AppState::default();
    assert!(matches!(handle_client_ws(ClientWsMessage::Ping, &state), ServerWsMessage::Pong));
  }

  #[test]
  fn new_question_honours_stage_override() {
    let state = AppState::default();
    let msg = ClientWsMessage::NewQuestion { stage: "demon-3".into(), character: None, difficulty: Some("EASY".into()) };
    match handle_client_ws(msg, &state) {
      ServerWsMessage::Question { question } => assert_eq!(question.difficulty, crate::domain::Difficulty::Expert),
      other => panic!("unexpected {other:?}"),
    }
  }

  #[test]
  fn bad_character_becomes_error_message() {
    let state = AppState::default();
    let msg = ClientWsMessage::NewQuestion { stage: "forest-1".into(), character: Some("nobody".into()), difficulty: None };
    assert!(matches!(handle_client_ws(msg, &state), ServerWsMessage::Error { .. }));
  }
}
