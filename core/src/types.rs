//! Domain DTOs for the Live2D backend.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A user interaction with a rendered model, e.g. a tap on its head.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InteractionPayload {
    pub model_id: String,
    /// Hit areas touched by the interaction, e.g. `["Head"]` or `["Body", "Arm"]`.
    pub hit_areas: Vec<String>,
    pub timestamp: String,
}

/// Motion playback priority understood by the Live2D runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MotionPriority {
    Idle = 1,
    Normal = 2,
    Force = 3,
}

impl MotionPriority {
    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(MotionPriority::Idle),
            2 => Some(MotionPriority::Normal),
            3 => Some(MotionPriority::Force),
            _ => None,
        }
    }
}

fn default_index() -> Option<u32> {
    Some(0)
}

fn default_priority() -> Option<u8> {
    Some(MotionPriority::Force.level())
}

/// What the backend wants the model to do in reaction to an interaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackendAction {
    /// `"talk"`, `"motion"`, `"change_expression"`, ...
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub expression: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default = "default_index")]
    pub index: Option<u32>,
    #[serde(default = "default_priority")]
    pub priority: Option<u8>,
}

impl BackendAction {
    pub fn motion_priority(&self) -> Option<MotionPriority> {
        self.priority.and_then(MotionPriority::from_level)
    }
}

/// Body of a successful `POST /interaction`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InteractionResponse {
    pub status: String,
    #[serde(default)]
    pub action: Option<BackendAction>,
}

/// A command relayed by the backend to every connected front-end.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelCommand {
    pub command_type: String,
    pub payload: Map<String, Value>,
}

impl ModelCommand {
    pub fn new(command_type: impl Into<String>, payload: Map<String, Value>) -> Self {
        Self {
            command_type: command_type.into(),
            payload,
        }
    }

    /// Play motion `index` of `group`.
    pub fn motion(group: impl Into<String>, index: u32, priority: MotionPriority) -> Self {
        let mut payload = Map::new();
        payload.insert("group".to_string(), Value::String(group.into()));
        payload.insert("index".to_string(), Value::from(index));
        payload.insert("priority".to_string(), Value::from(priority.level()));
        Self::new("motion", payload)
    }

    /// Switch to a named expression. Expressions stick until another one is
    /// set; `"normal"` restores the neutral face.
    pub fn expression(name: impl Into<String>) -> Self {
        let mut payload = Map::new();
        payload.insert("name".to_string(), Value::String(name.into()));
        Self::new("expression", payload)
    }

    /// Lip-sync to the audio file at `audio_url`.
    pub fn speak(audio_url: impl Into<String>) -> Self {
        let mut payload = Map::new();
        payload.insert("audioUrl".to_string(), Value::String(audio_url.into()));
        Self::new("speak", payload)
    }
}

/// Body of a successful `POST /trigger-action`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriggerAck {
    pub message: String,
    pub command: ModelCommand,
}

/// Frame the backend pushes over its WebSocket for each triggered command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Map<String, Value>,
}

impl ModelEvent {
    pub fn parse(frame: &str) -> Result<Self, crate::ApiError> {
        serde_json::from_str(frame).map_err(|e| crate::ApiError::Deserialization(e.to_string()))
    }
}

impl From<ModelCommand> for ModelEvent {
    fn from(command: ModelCommand) -> Self {
        Self {
            kind: command.command_type,
            data: command.payload,
        }
    }
}
