use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::document::{ControlsMode, PlaybackOptions, PlayerIdentity, is_valid_id};

/// Options that were dropped from the configuration surface, with their replacement.
const REMOVED_OPTIONS: &[(&str, &str)] = &[("playsInline", "fullscreen")];

/// Player component configuration. Everything except the callbacks; those
/// live in [`Callbacks`](crate::bridge::Callbacks).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerConfig {
    pub api_key: String,
    #[serde(default)]
    pub video_id: Option<String>,
    #[serde(default)]
    pub video_ids: Option<Vec<String>>,
    #[serde(default)]
    pub playlist_id: Option<String>,
    #[serde(default)]
    pub play: bool,
    #[serde(default, rename = "loop")]
    pub looping: bool,
    #[serde(default)]
    pub fullscreen: bool,
    #[serde(default)]
    pub controls: Option<ControlsMode>,
    #[serde(default = "default_true")]
    pub show_fullscreen_button: bool,
    pub origin: String,
    /// Unset until the host has measured the view; nothing renders before both are known.
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("`{field}` option was dropped. Please use `{replacement}`")]
    RemovedOption {
        field: &'static str,
        replacement: &'static str,
    },
    #[error("`{0}` is required")]
    Missing(&'static str),
    #[error("`{name}` must be a positive finite number (got {value})")]
    InvalidDimension { name: &'static str, value: f64 },
    #[error("invalid identifier {value:?} in `{field}`")]
    InvalidId { field: &'static str, value: String },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}

impl PlayerConfig {
    pub fn new(api_key: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            video_id: None,
            video_ids: None,
            playlist_id: None,
            play: false,
            looping: false,
            fullscreen: false,
            controls: None,
            show_fullscreen_button: true,
            origin: origin.into(),
            width: None,
            height: None,
        }
    }

    pub fn with_video(mut self, id: impl Into<String>) -> Self {
        self.video_id = Some(id.into());
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_play(mut self, play: bool) -> Self {
        self.play = play;
        self
    }

    /// Parse and validate a JSON configuration. Dropped options are rejected
    /// rather than silently ignored.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: serde_json::Value = serde_json::from_str(json)?;
        if let Some(fields) = raw.as_object() {
            for &(field, replacement) in REMOVED_OPTIONS {
                if fields.contains_key(field) {
                    return Err(ConfigError::RemovedOption {
                        field,
                        replacement,
                    });
                }
            }
        }
        let config: Self = serde_json::from_value(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        log::info!("Loaded player config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Missing("apiKey"));
        }
        if self.origin.trim().is_empty() {
            return Err(ConfigError::Missing("origin"));
        }
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if let Some(value) = value {
                if !value.is_finite() || value <= 0.0 {
                    return Err(ConfigError::InvalidDimension { name, value });
                }
            }
        }

        let check = |field: &'static str, id: &str| {
            if is_valid_id(id) {
                Ok(())
            } else {
                Err(ConfigError::InvalidId {
                    field,
                    value: id.to_string(),
                })
            }
        };
        if let Some(id) = &self.video_id {
            check("videoId", id)?;
        }
        for id in self.video_ids.iter().flatten() {
            check("videoIds", id)?;
        }
        if let Some(id) = &self.playlist_id {
            check("playlistId", id)?;
        }
        Ok(())
    }

    /// Configured identity: video id first, then the video list, then the playlist.
    pub fn identity(&self) -> Option<PlayerIdentity> {
        if let Some(id) = &self.video_id {
            return Some(PlayerIdentity::Video(id.clone()));
        }
        if let Some(ids) = self.video_ids.as_ref().filter(|ids| !ids.is_empty()) {
            return Some(PlayerIdentity::Videos(ids.clone()));
        }
        self.playlist_id
            .as_ref()
            .map(|id| PlayerIdentity::Playlist(id.clone()))
    }

    /// Both dimensions, once known.
    pub fn size(&self) -> Option<(f64, f64)> {
        self.width.zip(self.height)
    }

    /// Options baked into the document for the current props.
    pub fn playback_options(&self) -> PlaybackOptions {
        PlaybackOptions {
            autoplay: self.play,
            controls: self.controls.unwrap_or_default(),
            fullscreen_button: self.show_fullscreen_button,
            ..PlaybackOptions::for_origin(self.origin.clone())
        }
    }
}
