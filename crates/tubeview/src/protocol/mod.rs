pub mod command;
pub mod types;

pub use command::Command;
pub use types::*;

use serde::de::DeserializeOwned;

fn payload<T: DeserializeOwned>(
    v: &serde_json::Value,
    kind: &'static str,
) -> Result<T, ProtocolError> {
    let payload = v.get("payload").cloned().unwrap_or(serde_json::Value::Null);
    serde_json::from_value(payload).map_err(|source| ProtocolError::InvalidPayload { kind, source })
}

/// Decode a JSON message posted by the embedded document.
pub fn decode_message(text: &str) -> Result<InboundMessage, ProtocolError> {
    let v: serde_json::Value = serde_json::from_str(text).map_err(ProtocolError::Malformed)?;
    let kind = v
        .get("type")
        .and_then(|t| t.as_str())
        .ok_or(ProtocolError::MissingKind)?;

    match kind {
        "PLAYER_READY" => Ok(InboundMessage::PlayerReady),
        "STATE_CHANGE" => {
            let change: StateChange = payload(&v, "STATE_CHANGE")?;
            Ok(InboundMessage::StateChange(change.state))
        }
        "PLAYING" => Ok(InboundMessage::Playing(payload(&v, "PLAYING")?)),
        "QUALITY_CHANGE" => {
            let change: QualityChange = payload(&v, "QUALITY_CHANGE")?;
            Ok(InboundMessage::QualityChange(change.quality))
        }
        "ERROR" => {
            let err: PlayerErrorPayload = payload(&v, "ERROR")?;
            Ok(InboundMessage::Error { code: err.code })
        }
        other => Err(ProtocolError::UnknownKind {
            kind: other.to_string(),
            raw: text.to_string(),
        }),
    }
}
