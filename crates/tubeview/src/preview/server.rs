use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::Sender;

use super::Clients;
use super::client;
use super::types::PreviewEvent;

/// WebSocket path the preview shim connects to.
pub const BRIDGE_PATH: &str = "/bridge";

const PLAIN_TEXT: &str = "text/plain; charset=utf-8";

/// What a single request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    /// WebSocket upgrade on [`BRIDGE_PATH`].
    Bridge,
    /// The current player document.
    Page,
    Health,
    /// Plain request on [`BRIDGE_PATH`].
    UpgradeRequired,
    /// WebSocket upgrade anywhere else.
    UnknownSocket,
    Redirect,
}

/// Classify a request from its head. The query string is ignored.
fn route(request: &str) -> Route {
    let mut lines = request.lines();
    let target = lines
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/");
    let path = target.split('?').next().unwrap_or(target);
    let upgrade = lines.any(|header| {
        header.split_once(':').is_some_and(|(name, value)| {
            name.trim().eq_ignore_ascii_case("upgrade")
                && value.trim().eq_ignore_ascii_case("websocket")
        })
    });

    match (upgrade, path) {
        (true, BRIDGE_PATH) => Route::Bridge,
        (true, _) => Route::UnknownSocket,
        (false, BRIDGE_PATH) => Route::UpgradeRequired,
        (false, "/" | "/index.html") => Route::Page,
        (false, "/health") => Route::Health,
        (false, _) => Route::Redirect,
    }
}

/// Write a complete `Connection: close` response in one go.
fn respond(
    out: &mut impl Write,
    status: &str,
    headers: &[(&str, &str)],
    body: &str,
) -> std::io::Result<()> {
    let mut response = Vec::with_capacity(128 + body.len());
    write!(response, "HTTP/1.1 {status}\r\n")?;
    for (name, value) in headers {
        write!(response, "{name}: {value}\r\n")?;
    }
    write!(response, "Content-Length: {}\r\nConnection: close\r\n\r\n", body.len())?;
    response.extend_from_slice(body.as_bytes());
    out.write_all(&response)?;
    out.flush()
}

fn serve_http(
    out: &mut impl Write,
    route: Route,
    latest_html: &Mutex<String>,
) -> std::io::Result<()> {
    match route {
        Route::Page => {
            let html = latest_html.lock().map(|h| h.clone()).unwrap_or_default();
            if html.is_empty() {
                respond(
                    out,
                    "503 Service Unavailable",
                    &[("Content-Type", PLAIN_TEXT)],
                    "Player not rendered yet",
                )
            } else {
                let headers = [
                    ("Content-Type", "text/html; charset=utf-8"),
                    ("Cache-Control", "no-cache"),
                ];
                respond(out, "200 OK", &headers, &html)
            }
        }
        Route::Health => respond(
            out,
            "200 OK",
            &[("Content-Type", "application/json")],
            r#"{"status":"ok"}"#,
        ),
        Route::Bridge | Route::UpgradeRequired => respond(
            out,
            "426 Upgrade Required",
            &[("Upgrade", "websocket"), ("Content-Type", PLAIN_TEXT)],
            "The bridge only speaks WebSocket",
        ),
        Route::UnknownSocket => respond(out, "404 Not Found", &[], ""),
        Route::Redirect => respond(out, "302 Found", &[("Location", "/")], ""),
    }
}

/// State owned by the accept thread and handed to each page thread.
struct Shared {
    inbound_tx: Sender<PreviewEvent>,
    clients: Clients,
    latest_html: Arc<Mutex<String>>,
    shutdown: Arc<AtomicBool>,
    next_client_id: AtomicUsize,
}

impl Shared {
    fn handle_connection(&self, mut stream: TcpStream) {
        let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));

        let mut head = [0u8; 4096];
        let n = match stream.peek(&mut head) {
            Ok(n) if n > 0 => n,
            _ => return,
        };

        let requested = route(&String::from_utf8_lossy(&head[..n]));
        match requested {
            Route::Bridge => self.attach_page(stream),
            other => {
                if other == Route::UnknownSocket {
                    log::debug!("Rejecting WebSocket upgrade outside {BRIDGE_PATH}");
                }
                // Consume what was peeked so closing does not reset the connection.
                let _ = stream.read(&mut head[..n]);
                if let Err(e) = serve_http(&mut stream, other, &self.latest_html) {
                    log::debug!("Preview HTTP response failed: {e}");
                }
            }
        }
    }

    /// Complete the handshake on the untouched socket and start the page thread.
    fn attach_page(&self, stream: TcpStream) {
        // Short timeout so the client loop can interleave reads with outbound scripts
        let _ = stream.set_read_timeout(Some(Duration::from_millis(50)));
        let ws = match tungstenite::accept(stream) {
            Ok(ws) => ws,
            Err(e) => {
                log::debug!("WebSocket handshake failed: {e}");
                return;
            }
        };

        let client_id = self.next_client_id.fetch_add(1, Ordering::Relaxed);
        let (outbound_tx, outbound_rx) = crossbeam_channel::bounded(256);
        if let Ok(mut clients) = self.clients.lock() {
            clients.push(outbound_tx);
        }
        let _ = self.inbound_tx.try_send(PreviewEvent::Connected(client_id));

        let tx = self.inbound_tx.clone();
        let flag = self.shutdown.clone();
        let spawned = thread::Builder::new()
            .name(format!("tubeview-preview-client-{client_id}"))
            .spawn(move || client::run_client(ws, &tx, &outbound_rx, &flag, client_id));
        if let Err(e) = spawned {
            log::error!("Could not start thread for page {client_id}: {e}");
        }
    }
}

/// Bind `port` (0 picks a free one) and spawn the accept loop thread.
/// Returns the bound port and the thread handle.
pub fn spawn_accept_loop(
    port: u16,
    inbound_tx: Sender<PreviewEvent>,
    clients: Clients,
    latest_html: Arc<Mutex<String>>,
    shutdown: Arc<AtomicBool>,
) -> anyhow::Result<(u16, JoinHandle<()>)> {
    let listener = TcpListener::bind(("0.0.0.0", port))?;
    let port = listener.local_addr()?.port();
    listener.set_nonblocking(true)?;
    log::info!("Preview server listening on http://localhost:{port}");

    let shared = Shared {
        inbound_tx,
        clients,
        latest_html,
        shutdown,
        next_client_id: AtomicUsize::new(0),
    };

    let handle = thread::Builder::new()
        .name("tubeview-preview-accept".into())
        .spawn(move || {
            while !shared.shutdown.load(Ordering::Relaxed) {
                match listener.accept() {
                    Ok((stream, addr)) => {
                        log::debug!("Preview connection from {addr}");
                        let _ = stream.set_nonblocking(false);
                        shared.handle_connection(stream);
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(Duration::from_millis(50));
                    }
                    Err(e) => {
                        if !shared.shutdown.load(Ordering::Relaxed) {
                            log::error!("Preview accept error: {e}");
                        }
                        break;
                    }
                }
            }
            log::info!("Preview accept thread shutting down");
        })?;

    Ok((port, handle))
}
