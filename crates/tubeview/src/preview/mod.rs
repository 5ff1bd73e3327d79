//! Browser-backed preview host: serves the generated document over HTTP and
//! relays the postMessage bridge over a WebSocket, so the player can be
//! exercised in a desktop browser instead of a mobile web view.

pub mod client;
pub mod server;
pub mod types;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};

use self::types::{PreviewConfig, PreviewEvent};
use crate::bridge::EmbeddedSurface;
use crate::document::DocumentSource;

/// Routes `window.postMessage` over the bridge socket and evaluates inbound scripts.
const PREVIEW_SHIM: &str = include_str!("../../../../assets/player/preview_shim.js");

/// Script sent to open pages when a new document replaces the current one.
const RELOAD_SCRIPT: &str = "window.location.reload();";

pub(crate) type Clients = Arc<Mutex<Vec<Sender<String>>>>;

/// Insert the preview shim at the top of `<head>`, ahead of the bridge script.
pub fn inject_shim(html: &str) -> String {
    let tag = format!("<script type=\"text/javascript\">\n{PREVIEW_SHIM}</script>\n");
    match html.find("<head>") {
        Some(at) => {
            let split = at + "<head>".len();
            format!("{}\n{tag}{}", &html[..split], &html[split..])
        }
        None => format!("{tag}{html}"),
    }
}

/// Send `text` to every connected page. Prunes disconnected senders.
fn broadcast(clients: &Clients, text: &str) -> usize {
    let Ok(mut clients) = clients.lock() else {
        return 0;
    };
    clients.retain(|tx| match tx.try_send(text.to_string()) {
        Ok(()) | Err(crossbeam_channel::TrySendError::Full(_)) => true,
        Err(crossbeam_channel::TrySendError::Disconnected(_)) => false,
    });
    clients.len()
}

/// HTTP + WebSocket server: owns the accept thread and the client channels.
pub struct PreviewServer {
    inbound_rx: Receiver<PreviewEvent>,
    clients: Clients,
    latest_html: Arc<Mutex<String>>,
    shutdown: Arc<AtomicBool>,
    accept_handle: Option<JoinHandle<()>>,
    pub config: PreviewConfig,
}

impl PreviewServer {
    /// Bind and start serving. A configured port of 0 is replaced by the
    /// port actually bound.
    pub fn start(mut config: PreviewConfig) -> anyhow::Result<Self> {
        let (inbound_tx, inbound_rx) = crossbeam_channel::bounded(256);
        let clients: Clients = Arc::new(Mutex::new(Vec::new()));
        let latest_html = Arc::new(Mutex::new(String::new()));
        let shutdown = Arc::new(AtomicBool::new(false));

        let (port, handle) = server::spawn_accept_loop(
            config.port,
            inbound_tx,
            clients.clone(),
            latest_html.clone(),
            shutdown.clone(),
        )?;
        config.port = port;

        Ok(Self {
            inbound_rx,
            clients,
            latest_html,
            shutdown,
            accept_handle: Some(handle),
            config,
        })
    }

    pub fn port(&self) -> u16 {
        self.config.port
    }

    /// A surface that publishes documents and scripts through this server.
    pub fn surface(&self) -> PreviewSurface {
        PreviewSurface {
            latest_html: self.latest_html.clone(),
            clients: self.clients.clone(),
        }
    }

    pub fn events(&self) -> &Receiver<PreviewEvent> {
        &self.inbound_rx
    }

    pub fn client_count(&self) -> usize {
        self.clients.lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn stop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.accept_handle.take() {
            let _ = handle.join();
        }
        if let Ok(mut clients) = self.clients.lock() {
            clients.clear();
        }
    }
}

impl Drop for PreviewServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// [`EmbeddedSurface`] backed by whatever browser pages are connected to the
/// preview server.
#[derive(Clone)]
pub struct PreviewSurface {
    latest_html: Arc<Mutex<String>>,
    clients: Clients,
}

impl EmbeddedSurface for PreviewSurface {
    fn load_document(&mut self, source: &DocumentSource) {
        if let Ok(mut html) = self.latest_html.lock() {
            *html = inject_shim(&source.html);
        }
        let pages = broadcast(&self.clients, RELOAD_SCRIPT);
        log::info!("Published player document for {} ({pages} open pages)", source.base_url);
    }

    fn execute(&mut self, script: &str) {
        let pages = broadcast(&self.clients, script);
        if pages == 0 {
            log::debug!("No preview page connected, script dropped: {script}");
        }
    }

    fn stop_loading(&mut self) {
        log::debug!("Navigation stop requested; nothing to cancel in the preview");
    }
}
