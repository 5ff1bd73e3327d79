use crate::protocol::{PlaybackState, Progress};

use super::surface::SurfaceError;

/// Lifecycle of the embedded document as seen from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// No document generated yet (dimensions or identity still unknown).
    Unloaded,
    /// Document handed to the surface, player not ready.
    Loading,
    Ready,
    Active(PlaybackState),
}

impl Lifecycle {
    /// Whether player commands can run right away.
    pub fn is_ready(self) -> bool {
        matches!(self, Lifecycle::Ready | Lifecycle::Active(_))
    }
}

/// Outcome of a navigation attempt inside the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationVerdict {
    /// The generated document's own load.
    Allow,
    /// Internal traffic (blank page, origin pings). Cancelled silently.
    Suppress,
    /// User-initiated; reported via `on_click` and cancelled.
    ClickThrough,
}

/// Error delivered to the `on_error` callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorEvent {
    Surface(SurfaceError),
    /// Error code reported by the embedded player API.
    Player { code: i64 },
}

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("{0} is not supported by the web-view player; use the progress callback instead")]
    Unsupported(&'static str),
}

/// Caller-supplied event handlers. Every slot is optional.
#[derive(Default)]
pub struct Callbacks {
    pub(crate) on_click: Option<Box<dyn FnMut(&str)>>,
    pub(crate) on_error: Option<Box<dyn FnMut(&ErrorEvent)>>,
    pub(crate) on_ready: Option<Box<dyn FnMut()>>,
    pub(crate) on_change_state: Option<Box<dyn FnMut(PlaybackState)>>,
    pub(crate) on_change_quality: Option<Box<dyn FnMut(&str)>>,
    pub(crate) on_change_fullscreen: Option<Box<dyn FnMut(bool)>>,
    pub(crate) on_progress: Option<Box<dyn FnMut(Progress)>>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Link or navigation inside the player, with the target URL.
    pub fn on_click(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    pub fn on_error(mut self, f: impl FnMut(&ErrorEvent) + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    pub fn on_ready(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_ready = Some(Box::new(f));
        self
    }

    pub fn on_change_state(mut self, f: impl FnMut(PlaybackState) + 'static) -> Self {
        self.on_change_state = Some(Box::new(f));
        self
    }

    pub fn on_change_quality(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_change_quality = Some(Box::new(f));
        self
    }

    pub fn on_change_fullscreen(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.on_change_fullscreen = Some(Box::new(f));
        self
    }

    pub fn on_progress(mut self, f: impl FnMut(Progress) + 'static) -> Self {
        self.on_progress = Some(Box::new(f));
        self
    }
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_click", &self.on_click.is_some())
            .field("on_error", &self.on_error.is_some())
            .field("on_ready", &self.on_ready.is_some())
            .field("on_change_state", &self.on_change_state.is_some())
            .field("on_change_quality", &self.on_change_quality.is_some())
            .field("on_change_fullscreen", &self.on_change_fullscreen.is_some())
            .field("on_progress", &self.on_progress.is_some())
            .finish()
    }
}
