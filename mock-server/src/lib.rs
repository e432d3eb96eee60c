use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::broadcast};
use tower_http::cors::CorsLayer;

/// Frames buffered per WebSocket subscriber before it starts lagging.
const EVENT_BUFFER: usize = 64;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InteractionPayload {
    pub model_id: String,
    pub hit_areas: Vec<String>,
    pub timestamp: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BackendAction {
    #[serde(rename = "type")]
    pub kind: String,
    pub expression: Option<String>,
    pub group: Option<String>,
    pub index: Option<u32>,
    pub priority: Option<u8>,
}

impl BackendAction {
    fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            expression: None,
            group: None,
            index: Some(0),
            priority: Some(3),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InteractionResponse {
    pub status: String,
    pub action: Option<BackendAction>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModelCommand {
    pub command_type: String,
    pub payload: Map<String, Value>,
}

/// Shared handler state: the fan-out channel feeding every `/ws/live2d` socket.
#[derive(Clone)]
pub struct AppState {
    events: broadcast::Sender<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self { events }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.events.subscribe()
    }

    pub fn connected_clients(&self) -> usize {
        self.events.receiver_count()
    }
}

pub fn app() -> Router {
    app_with_state(AppState::new())
}

pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/v1/live2d/interaction", post(handle_interaction))
        .route("/api/v1/live2d/trigger-action", post(trigger_action))
        .route("/ws/live2d", get(live2d_socket))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_state(listener, AppState::new()).await
}

pub async fn run_with_state(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_state(state)).await
}

/// Pick the model's reaction to an interaction. `Head` wins over `Body`.
pub fn react(payload: &InteractionPayload) -> Option<BackendAction> {
    let hit = |area: &str| payload.hit_areas.iter().any(|a| a == area);
    if hit("Head") {
        Some(BackendAction {
            expression: Some("Happy".to_string()),
            ..BackendAction::new("talk")
        })
    } else if hit("Body") {
        Some(BackendAction {
            group: Some("Tap@Body".to_string()),
            ..BackendAction::new("motion")
        })
    } else {
        None
    }
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome! The Live2D API is served from /api/v1/live2d/" }))
}

async fn handle_interaction(Json(payload): Json<InteractionPayload>) -> Json<InteractionResponse> {
    tracing::info!(
        model_id = %payload.model_id,
        hit_areas = ?payload.hit_areas,
        timestamp = %payload.timestamp,
        "received interaction"
    );
    let response = match react(&payload) {
        Some(action) => InteractionResponse {
            status: "success".to_string(),
            action: Some(action),
        },
        None => InteractionResponse {
            status: "ignored".to_string(),
            action: None,
        },
    };
    Json(response)
}

async fn trigger_action(State(state): State<AppState>, Json(command): Json<ModelCommand>) -> Json<Value> {
    let frame = json!({ "type": command.command_type, "data": command.payload }).to_string();
    // A send error only means nobody is listening.
    let delivered = state.events.send(frame).unwrap_or(0);
    tracing::info!(command_type = %command.command_type, delivered, "broadcast model command");
    Json(json!({
        "message": "Command sent to connected clients",
        "command": command,
    }))
}

async fn live2d_socket(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let events = state.subscribe();
    ws.on_upgrade(move |socket| relay_events(socket, events))
}

async fn relay_events(mut socket: WebSocket, mut events: broadcast::Receiver<String>) {
    tracing::info!("live2d client connected");
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(frame) => {
                    if socket.send(Message::Text(frame.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "live2d client lagging, frames dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }
    tracing::info!("live2d client disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(areas: &[&str]) -> InteractionPayload {
        InteractionPayload {
            model_id: "hiyori".to_string(),
            hit_areas: areas.iter().map(|a| a.to_string()).collect(),
            timestamp: "2024-05-01T12:00:00Z".to_string(),
        }
    }

    #[test]
    fn head_hit_talks_happily() {
        let action = react(&payload(&["Head"])).unwrap();
        assert_eq!(action.kind, "talk");
        assert_eq!(action.expression.as_deref(), Some("Happy"));
        assert_eq!(action.priority, Some(3));
    }

    #[test]
    fn body_hit_plays_tap_motion() {
        let action = react(&payload(&["Body"])).unwrap();
        assert_eq!(action.kind, "motion");
        assert_eq!(action.group.as_deref(), Some("Tap@Body"));
        assert_eq!(action.index, Some(0));
    }

    #[test]
    fn head_takes_precedence_over_body() {
        let action = react(&payload(&["Body", "Head"])).unwrap();
        assert_eq!(action.kind, "talk");
    }

    #[test]
    fn other_areas_get_no_reaction() {
        assert!(react(&payload(&["Arm"])).is_none());
        assert!(react(&payload(&[])).is_none());
    }

    #[test]
    fn action_serializes_type_field() {
        let json = serde_json::to_value(BackendAction::new("talk")).unwrap();
        assert_eq!(json["type"], "talk");
        assert_eq!(json["expression"], Value::Null);
    }

    #[test]
    fn interaction_payload_rejects_missing_model_id() {
        let result: Result<InteractionPayload, _> =
            serde_json::from_str(r#"{"hit_areas":["Head"],"timestamp":"t"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn state_tracks_subscribers() {
        let state = AppState::new();
        assert_eq!(state.connected_clients(), 0);
        let _rx = state.subscribe();
        assert_eq!(state.connected_clients(), 1);
    }
}
