use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Event from the preview server threads to the bridge loop.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewEvent {
    /// A page opened the bridge socket, i.e. the document (re)loaded.
    Connected(usize),
    /// A message posted by the document.
    Message(String),
    Disconnected(usize),
}

/// Line command typed on stdin.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewCommand {
    Play,
    Pause,
    Seek(f64),
    Next,
    Prev,
    At(u32),
    Size(f64, f64),
    Load(String),
    Back,
    Quit,
}

pub const COMMAND_HELP: &str =
    "commands: play | pause | seek <s> | next | prev | at <i> | size <w> <h> | load <id> | back | quit";

/// Parse one stdin line. `None` for blank or unrecognised input.
pub fn parse_command(line: &str) -> Option<PreviewCommand> {
    let mut words = line.split_whitespace();
    let cmd = words.next()?;
    let command = match cmd {
        "play" => PreviewCommand::Play,
        "pause" => PreviewCommand::Pause,
        "seek" => PreviewCommand::Seek(words.next()?.parse().ok()?),
        "next" => PreviewCommand::Next,
        "prev" => PreviewCommand::Prev,
        "at" => PreviewCommand::At(words.next()?.parse().ok()?),
        "size" => {
            let width = words.next()?.parse().ok()?;
            let height = words.next()?.parse().ok()?;
            PreviewCommand::Size(width, height)
        }
        "load" => PreviewCommand::Load(words.next()?.to_string()),
        "back" => PreviewCommand::Back,
        "quit" | "exit" => PreviewCommand::Quit,
        _ => {
            log::debug!("Unknown preview command: {cmd}");
            return None;
        }
    };
    if words.next().is_some() {
        return None;
    }
    Some(command)
}

/// Persisted preview server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_api_key")]
    pub api_key: String,
    /// Defaults to `http://localhost:<port>`.
    #[serde(default)]
    pub origin: Option<String>,
}

fn default_port() -> u16 {
    9310
}

fn default_api_key() -> String {
    "preview".to_string()
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            api_key: default_api_key(),
            origin: None,
        }
    }
}

impl PreviewConfig {
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("tubeview").join("preview.json")
    }

    /// Origin the page is served from; passed to the embed as `origin`.
    pub fn origin(&self) -> String {
        self.origin
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.port))
    }

    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded preview config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Failed to parse preview config: {e}");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No preview config found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        self.save_to(&Self::config_path());
    }

    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                log::error!("Failed to create config dir: {e}");
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    log::error!("Failed to write preview config: {e}");
                } else {
                    log::debug!("Saved preview config to {}", path.display());
                }
            }
            Err(e) => log::error!("Failed to serialize preview config: {e}"),
        }
    }
}
