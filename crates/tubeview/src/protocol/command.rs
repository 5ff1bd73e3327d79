//! Host → document commands, rendered as single script statements against the
//! document's global `player`.

use crate::document::PlayerIdentity;

/// An instruction executed once inside the embedded document. No acknowledgement.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Seek(f64),
    Next,
    Previous,
    PlayAt(u32),
    Resize { width: f64, height: f64 },
    LoadVideo(String),
    LoadVideos(Vec<String>),
    LoadPlaylist(String),
    Play,
    Pause,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{name} must be finite (got {value})")]
    NonFinite { name: &'static str, value: f64 },
    #[error("failed to encode string parameter: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Render `value` as a JS string literal. JSON escaping covers quotes,
/// backslashes and control characters; U+2028/U+2029 are escaped on top
/// since older engines treat them as line terminators inside literals.
fn js_string(value: &str) -> Result<String, CommandError> {
    Ok(serde_json::to_string(value)?
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029"))
}

fn finite(name: &'static str, value: f64) -> Result<f64, CommandError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CommandError::NonFinite { name, value })
    }
}

impl Command {
    /// The load command matching `identity`.
    pub fn load(identity: &PlayerIdentity) -> Self {
        match identity {
            PlayerIdentity::Video(id) => Command::LoadVideo(id.clone()),
            PlayerIdentity::Videos(ids) => Command::LoadVideos(ids.clone()),
            PlayerIdentity::Playlist(id) => Command::LoadPlaylist(id.clone()),
        }
    }

    pub fn is_play_toggle(&self) -> bool {
        matches!(self, Command::Play | Command::Pause)
    }

    /// Script statement for this command.
    pub fn to_script(&self) -> Result<String, CommandError> {
        Ok(match self {
            Command::Seek(seconds) => format!("player.seekTo({});", finite("seconds", *seconds)?),
            Command::Next => "player.nextVideo();".to_string(),
            Command::Previous => "player.previousVideo();".to_string(),
            Command::PlayAt(index) => format!("player.playVideoAt({index});"),
            Command::Resize { width, height } => format!(
                "player.setSize({}, {});",
                finite("width", *width)?,
                finite("height", *height)?
            ),
            Command::LoadVideo(id) => {
                format!("player.loadVideoById({{videoId: {}}});", js_string(id)?)
            }
            Command::LoadVideos(ids) => {
                let list = ids
                    .iter()
                    .map(|id| js_string(id))
                    .collect::<Result<Vec<_>, _>>()?
                    .join(",");
                format!("player.loadPlaylist([{list}]);")
            }
            Command::LoadPlaylist(id) => format!(
                "player.loadPlaylist({{list: {}, listType: \"playlist\"}});",
                js_string(id)?
            ),
            Command::Play => "player.playVideo();".to_string(),
            Command::Pause => "player.pauseVideo();".to_string(),
        })
    }
}
