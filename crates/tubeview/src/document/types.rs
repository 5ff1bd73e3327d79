use serde::{Deserialize, Serialize};

/// Player controls visibility, as understood by the embed endpoint's `controls` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ControlsMode {
    /// Controls never shown.
    #[default]
    Hidden,
    /// Controls shown on interaction.
    Default,
    /// Controls always visible.
    AlwaysVisible,
}

impl ControlsMode {
    pub fn as_u8(self) -> u8 {
        match self {
            ControlsMode::Hidden => 0,
            ControlsMode::Default => 1,
            ControlsMode::AlwaysVisible => 2,
        }
    }
}

impl TryFrom<u8> for ControlsMode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ControlsMode::Hidden),
            1 => Ok(ControlsMode::Default),
            2 => Ok(ControlsMode::AlwaysVisible),
            other => Err(format!("controls must be 0, 1 or 2 (got {other})")),
        }
    }
}

impl From<ControlsMode> for u8 {
    fn from(mode: ControlsMode) -> Self {
        mode.as_u8()
    }
}

/// What the player is asked to play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerIdentity {
    Video(String),
    /// Ad-hoc list; the first entry is embedded, the rest queued after it.
    Videos(Vec<String>),
    Playlist(String),
}

impl PlayerIdentity {
    /// All identifiers referenced by this identity.
    pub fn ids(&self) -> Vec<&str> {
        match self {
            PlayerIdentity::Video(id) | PlayerIdentity::Playlist(id) => vec![id.as_str()],
            PlayerIdentity::Videos(ids) => ids.iter().map(String::as_str).collect(),
        }
    }
}

/// Whether `id` only uses the identifier alphabet of the embed endpoint.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Options baked into a generated document. Changing any of them means
/// generating a new document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackOptions {
    pub autoplay: bool,
    pub plays_inline: bool,
    pub show_info: bool,
    pub modest_branding: bool,
    pub controls: ControlsMode,
    pub related_videos: bool,
    pub fullscreen_button: bool,
    /// Host origin, echoed to the embed endpoint for cross-origin checks.
    pub origin: String,
}

impl PlaybackOptions {
    /// Web-view defaults: inline, chromeless, minimal branding.
    pub fn for_origin(origin: impl Into<String>) -> Self {
        Self {
            autoplay: false,
            plays_inline: true,
            show_info: false,
            modest_branding: true,
            controls: ControlsMode::Hidden,
            related_videos: true,
            fullscreen_button: true,
            origin: origin.into(),
        }
    }
}

/// Input of [`generate_document`](super::generate_document).
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentRequest {
    pub identity: PlayerIdentity,
    pub width: f64,
    pub height: f64,
    pub options: PlaybackOptions,
}

/// A generated document together with the base URL the surface should load it under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSource {
    pub html: String,
    pub base_url: String,
}

/// Identity and options recovered from an embed URL. Autoplay is not part
/// of the URL and always comes back `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedParams {
    pub identity: PlayerIdentity,
    pub options: PlaybackOptions,
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("player identity is empty")]
    EmptyIdentity,
    #[error("invalid player identifier {0:?}")]
    InvalidId(String),
    #[error("{name} must be a positive finite number (got {value})")]
    InvalidDimension { name: &'static str, value: f64 },
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("not an embed URL: {0}")]
    NotEmbedUrl(String),
    #[error("missing embed parameter `{0}`")]
    MissingParam(&'static str),
    #[error("invalid value {value:?} for embed parameter `{name}`")]
    InvalidParam { name: &'static str, value: String },
}
