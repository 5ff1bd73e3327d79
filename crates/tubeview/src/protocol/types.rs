use serde::{Deserialize, Serialize};

/// Playback state reported by the embedded player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    Playing,
    Paused,
    Ended,
    Buffering,
}

/// Progress snapshot, emitted once per second while playing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Seconds.
    pub duration: f64,
    /// Seconds.
    pub current_time: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChange {
    pub state: PlaybackState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityChange {
    pub quality: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerErrorPayload {
    pub code: i64,
}

/// Message posted by the embedded document.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    PlayerReady,
    StateChange(PlaybackState),
    Playing(Progress),
    QualityChange(String),
    Error { code: i64 },
}

impl InboundMessage {
    /// Wire name of this message kind.
    pub fn kind(&self) -> &'static str {
        match self {
            InboundMessage::PlayerReady => "PLAYER_READY",
            InboundMessage::StateChange(_) => "STATE_CHANGE",
            InboundMessage::Playing(_) => "PLAYING",
            InboundMessage::QualityChange(_) => "QUALITY_CHANGE",
            InboundMessage::Error { .. } => "ERROR",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("malformed message: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("message has no `type` field")]
    MissingKind,
    #[error("unrecognized message kind {kind:?}")]
    UnknownKind { kind: String, raw: String },
    #[error("invalid payload for {kind}: {source}")]
    InvalidPayload {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
