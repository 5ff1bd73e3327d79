use std::io::{Read, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_channel::{Receiver, Sender};
use tungstenite::WebSocket;
use tungstenite::protocol::Message;

use super::types::PreviewEvent;

/// Per-page read/write loop. Text frames are messages posted by the document;
/// outbound strings are command scripts for the shim to evaluate.
pub fn run_client<S: Read + Write>(
    mut ws: WebSocket<S>,
    inbound_tx: &Sender<PreviewEvent>,
    outbound_rx: &Receiver<String>,
    shutdown: &Arc<AtomicBool>,
    client_id: usize,
) {
    log::info!("Preview page {client_id} connected");

    loop {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }

        match ws.read() {
            Ok(Message::Text(text)) => {
                if inbound_tx
                    .try_send(PreviewEvent::Message(text.as_str().to_owned()))
                    .is_err()
                {
                    log::warn!("Preview page {client_id}: bridge loop is behind, dropping message");
                }
            }
            Ok(Message::Close(_)) => {
                log::info!("Preview page {client_id} closed connection");
                break;
            }
            Ok(Message::Ping(data)) => {
                let _ = ws.send(Message::Pong(data));
            }
            Ok(_) => {}
            Err(tungstenite::Error::Io(ref e))
                if e.kind() == std::io::ErrorKind::WouldBlock
                    || e.kind() == std::io::ErrorKind::TimedOut => {}
            Err(e) => {
                log::debug!("Preview page {client_id} read error: {e}");
                break;
            }
        }

        let mut sent_any = false;
        for script in outbound_rx.try_iter() {
            if script.is_empty() {
                continue;
            }
            match ws.send(Message::text(script)) {
                Ok(()) => sent_any = true,
                Err(e) => {
                    log::debug!("Preview page {client_id} write error: {e}");
                    let _ = inbound_tx.try_send(PreviewEvent::Disconnected(client_id));
                    return;
                }
            }
        }

        if sent_any && ws.flush().is_err() {
            break;
        }
    }

    let _ = ws.close(None);
    let _ = inbound_tx.try_send(PreviewEvent::Disconnected(client_id));
    log::info!("Preview page {client_id} disconnected");
}
