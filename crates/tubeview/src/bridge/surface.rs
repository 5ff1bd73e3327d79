use crate::document::DocumentSource;

/// The embedded browser the player document runs in.
///
/// Implementations report navigation attempts back through
/// [`PlayerBridge::on_navigation`](super::PlayerBridge::on_navigation), including the
/// load triggered by [`load_document`](Self::load_document), which must surface as a
/// `data:text/html` URL. Messages posted by the document go to
/// [`PlayerBridge::on_message`](super::PlayerBridge::on_message).
pub trait EmbeddedSurface {
    /// Replace the surface content with `source`.
    fn load_document(&mut self, source: &DocumentSource);

    /// Run `script` inside the loaded document. Fire-and-forget.
    fn execute(&mut self, script: &str);

    /// Abort the navigation in progress.
    fn stop_loading(&mut self);
}

/// Load or script failure reported by the surface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{description}")]
pub struct SurfaceError {
    pub description: String,
    pub code: Option<i32>,
    pub url: Option<String>,
}

impl SurfaceError {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            code: None,
            url: None,
        }
    }
}

/// Surface double that records everything the bridge asks of it.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub documents: Vec<DocumentSource>,
    pub scripts: Vec<String>,
    pub stops: usize,
}

#[cfg(test)]
impl EmbeddedSurface for RecordingSurface {
    fn load_document(&mut self, source: &DocumentSource) {
        self.documents.push(source.clone());
    }

    fn execute(&mut self, script: &str) {
        self.scripts.push(script.to_string());
    }

    fn stop_loading(&mut self) {
        self.stops += 1;
    }
}
