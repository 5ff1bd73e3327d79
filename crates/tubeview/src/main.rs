use std::io::BufRead;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use crossbeam_channel::{Receiver, RecvTimeoutError};

use tubeview::bridge::navigation::DOCUMENT_URL_PREFIX;
use tubeview::bridge::{Callbacks, NavigationVerdict, PlayerBridge};
use tubeview::config::PlayerConfig;
use tubeview::preview::types::{
    COMMAND_HELP, PreviewCommand, PreviewConfig, PreviewEvent, parse_command,
};
use tubeview::preview::{PreviewServer, PreviewSurface};

const USAGE: &str = "usage: tubeview-preview <video-id> [--port N] [--width W --height H] [--play] [--loop] [--fullscreen] [--save-config]";

#[derive(Debug, Clone, PartialEq)]
struct Args {
    video_id: String,
    port: Option<u16>,
    width: f64,
    height: f64,
    play: bool,
    looping: bool,
    fullscreen: bool,
    save_config: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut parsed = Args {
        video_id: String::new(),
        port: None,
        width: 640.0,
        height: 360.0,
        play: false,
        looping: false,
        fullscreen: false,
        save_config: false,
    };

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| args.next().with_context(|| format!("{flag} needs a value"));
        match arg.as_str() {
            "--port" => parsed.port = Some(value("--port")?.parse().context("invalid --port")?),
            "--width" => parsed.width = value("--width")?.parse().context("invalid --width")?,
            "--height" => parsed.height = value("--height")?.parse().context("invalid --height")?,
            "--play" => parsed.play = true,
            "--loop" => parsed.looping = true,
            "--fullscreen" => parsed.fullscreen = true,
            "--save-config" => parsed.save_config = true,
            flag if flag.starts_with("--") => bail!("unknown option {flag}\n{USAGE}"),
            id if parsed.video_id.is_empty() => parsed.video_id = id.to_string(),
            extra => bail!("unexpected argument {extra}\n{USAGE}"),
        }
    }

    if parsed.video_id.is_empty() {
        bail!("missing video id\n{USAGE}");
    }
    Ok(parsed)
}

fn logging_callbacks() -> Callbacks {
    Callbacks::new()
        .on_ready(|| log::info!("Player ready"))
        .on_change_state(|state| log::info!("State: {state:?}"))
        .on_progress(|p| log::debug!("Progress: {:.1}s / {:.1}s", p.current_time, p.duration))
        .on_change_quality(|quality| log::info!("Quality: {quality}"))
        .on_change_fullscreen(|fullscreen| log::info!("Fullscreen: {fullscreen}"))
        .on_click(|url| log::info!("Click-through: {url}"))
        .on_error(|e| log::warn!("Player error: {e:?}"))
}

/// Apply a stdin command. Returns `false` on quit.
fn apply_command(bridge: &mut PlayerBridge<PreviewSurface>, command: PreviewCommand) -> bool {
    let mut next = bridge.config().clone();
    match command {
        PreviewCommand::Play => next.play = true,
        PreviewCommand::Pause => next.play = false,
        PreviewCommand::Size(width, height) => next = next.with_size(width, height),
        PreviewCommand::Load(id) => {
            next.video_ids = None;
            next.playlist_id = None;
            next = next.with_video(id);
        }
        PreviewCommand::Seek(seconds) => {
            bridge.seek_to(seconds);
            return true;
        }
        PreviewCommand::Next => {
            bridge.next_video();
            return true;
        }
        PreviewCommand::Prev => {
            bridge.previous_video();
            return true;
        }
        PreviewCommand::At(index) => {
            bridge.play_video_at(index);
            return true;
        }
        PreviewCommand::Back => {
            if !bridge.handle_back_press() {
                log::info!("Back gesture not consumed (not fullscreen)");
            }
            return true;
        }
        PreviewCommand::Quit => return false,
    }

    match bridge.update_props(next) {
        Ok(decision) => log::debug!("Props updated: {decision:?}"),
        Err(e) => log::warn!("Rejected update: {e}"),
    }
    true
}

fn handle_event(bridge: &mut PlayerBridge<PreviewSurface>, event: PreviewEvent) {
    match event {
        PreviewEvent::Connected(id) => {
            let url = format!("{DOCUMENT_URL_PREFIX};preview-page-{id}");
            if bridge.on_navigation(&url) == NavigationVerdict::Suppress {
                log::info!("Page {id} attached to an already loaded document");
            }
        }
        PreviewEvent::Message(text) => bridge.on_message(&text),
        PreviewEvent::Disconnected(id) => log::info!("Page {id} left"),
    }
}

fn spawn_stdin_reader() -> Result<Receiver<String>> {
    let (tx, rx) = crossbeam_channel::bounded(16);
    thread::Builder::new()
        .name("tubeview-preview-stdin".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
            log::debug!("stdin closed");
        })?;
    Ok(rx)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = parse_args(std::env::args().skip(1))?;

    let mut preview = PreviewConfig::load();
    if let Some(port) = args.port {
        preview.port = port;
    }
    if args.save_config {
        preview.save();
    }

    let server = PreviewServer::start(preview)?;
    let mut config = PlayerConfig::new(server.config.api_key.clone(), server.config.origin())
        .with_video(args.video_id)
        .with_size(args.width, args.height)
        .with_play(args.play);
    config.looping = args.looping;
    config.fullscreen = args.fullscreen;

    let mut bridge = PlayerBridge::new(config, logging_callbacks(), server.surface())?;
    log::info!("Open http://localhost:{} in a browser", server.port());
    log::info!("{COMMAND_HELP}");

    let stdin_rx = spawn_stdin_reader()?;
    let tick = Duration::from_millis(50);

    'run: loop {
        match server.events().recv_timeout(tick) {
            Ok(event) => handle_event(&mut bridge, event),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        for line in stdin_rx.try_iter() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match parse_command(line) {
                Some(command) => {
                    if !apply_command(&mut bridge, command) {
                        break 'run;
                    }
                }
                None => log::warn!("Unrecognised command {line:?}; {COMMAND_HELP}"),
            }
        }
    }

    log::info!("Shutting down preview");
    Ok(())
}
