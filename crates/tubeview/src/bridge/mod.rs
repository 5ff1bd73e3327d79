pub mod decision;
pub mod navigation;
pub mod surface;
pub mod types;

pub use decision::{RenderDecision, decide};
pub use navigation::NavigationFilter;
pub use surface::{EmbeddedSurface, SurfaceError};
pub use types::*;

use crate::config::{ConfigError, PlayerConfig};
use crate::document::{DocumentRequest, DocumentSource, generate_document};
use crate::protocol::{Command, InboundMessage, PlaybackState, ProtocolError, decode_message};

/// Host side of the player: owns the props, the surface and the callbacks.
///
/// Everything runs on the caller's thread. Messages from the document come in
/// through [`on_message`](Self::on_message), navigation attempts through
/// [`on_navigation`](Self::on_navigation).
pub struct PlayerBridge<S: EmbeddedSurface> {
    surface: S,
    config: PlayerConfig,
    callbacks: Callbacks,
    lifecycle: Lifecycle,
    fullscreen: bool,
    navigation: NavigationFilter,
    /// Commands issued while the document is still loading.
    pending: Vec<Command>,
}

impl<S: EmbeddedSurface> PlayerBridge<S> {
    /// Validate `config` and render right away when size and identity are known.
    pub fn new(
        config: PlayerConfig,
        callbacks: Callbacks,
        surface: S,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut bridge = Self {
            surface,
            navigation: NavigationFilter::new(config.origin.clone()),
            fullscreen: config.fullscreen,
            config,
            callbacks,
            lifecycle: Lifecycle::Unloaded,
            pending: Vec::new(),
        };
        bridge.render();
        Ok(bridge)
    }

    pub fn from_json(json: &str, callbacks: Callbacks, surface: S) -> Result<Self, ConfigError> {
        Self::new(PlayerConfig::from_json(json)?, callbacks, surface)
    }

    fn render(&mut self) {
        let (Some((width, height)), Some(identity)) = (self.config.size(), self.config.identity())
        else {
            log::debug!("Player not rendered yet: size or video still unknown");
            return;
        };
        let request = DocumentRequest {
            identity,
            width,
            height,
            options: self.config.playback_options(),
        };
        match generate_document(&request) {
            Ok(html) => {
                log::debug!("Rendering player document ({} bytes)", html.len());
                self.pending.clear();
                self.navigation.document_rendered();
                self.lifecycle = Lifecycle::Loading;
                self.surface.load_document(&DocumentSource {
                    html,
                    base_url: self.config.origin.clone(),
                });
            }
            Err(e) => log::error!("Failed to generate player document: {e}"),
        }
    }

    /// Apply new props. Returns what was done about them.
    pub fn update_props(&mut self, next: PlayerConfig) -> Result<RenderDecision, ConfigError> {
        next.validate()?;

        if next.fullscreen != self.config.fullscreen {
            self.fullscreen = next.fullscreen;
        }
        self.navigation.set_origin(&next.origin);

        let decision = decide(&self.config, &next, self.lifecycle != Lifecycle::Unloaded);
        self.config = next;
        match &decision {
            RenderDecision::FullRender => self.render(),
            RenderDecision::Remote(commands) => {
                for command in commands {
                    self.send(command.clone());
                }
            }
            RenderDecision::NoOp => {}
        }
        Ok(decision)
    }

    fn send(&mut self, command: Command) {
        if self.lifecycle.is_ready() {
            self.execute(&command);
            return;
        }
        if self.lifecycle == Lifecycle::Unloaded {
            log::warn!("No player document loaded, dropping {command:?}");
            return;
        }
        if command.is_play_toggle() {
            self.pending.retain(|c| !c.is_play_toggle());
        }
        log::debug!("Player not ready, queueing {command:?}");
        self.pending.push(command);
    }

    fn execute(&mut self, command: &Command) {
        match command.to_script() {
            Ok(script) => {
                log::trace!("-> {script}");
                self.surface.execute(&script);
            }
            Err(e) => log::warn!("Dropping player command {command:?}: {e}"),
        }
    }

    fn flush_pending(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        if !pending.is_empty() {
            log::debug!("Flushing {} queued player commands", pending.len());
        }
        for command in &pending {
            self.execute(command);
        }
    }

    pub fn seek_to(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            log::warn!("Ignoring seek to non-finite position {seconds}");
            return;
        }
        self.send(Command::Seek(seconds));
    }

    pub fn next_video(&mut self) {
        self.send(Command::Next);
    }

    pub fn previous_video(&mut self) {
        self.send(Command::Previous);
    }

    pub fn play_video_at(&mut self, index: u32) {
        self.send(Command::PlayAt(index));
    }

    /// Synchronous position reads are not available through the script channel.
    pub fn current_time(&self) -> Result<f64, BridgeError> {
        log::warn!("currentTime is not supported by the web-view player");
        Err(BridgeError::Unsupported("currentTime"))
    }

    pub fn videos_index(&self) -> Result<usize, BridgeError> {
        log::warn!("videosIndex is not supported by the web-view player");
        Err(BridgeError::Unsupported("videosIndex"))
    }

    /// Handle a message posted by the document. Never fails; anything that
    /// cannot be decoded is logged and dropped.
    pub fn on_message(&mut self, text: &str) {
        let message = match decode_message(text) {
            Ok(message) => message,
            Err(ProtocolError::UnknownKind { kind, raw }) => {
                log::warn!("Unhandled message from player document ({kind}): {raw}");
                return;
            }
            Err(e) => {
                log::warn!("Dropping message from player document: {e}");
                return;
            }
        };
        log::trace!("<- {}", message.kind());

        match message {
            InboundMessage::PlayerReady => {
                // Late messages from a replaced page leave the lifecycle alone.
                if self.lifecycle == Lifecycle::Loading {
                    self.lifecycle = Lifecycle::Ready;
                    self.flush_pending();
                } else {
                    log::debug!("Player ready while {:?}, lifecycle unchanged", self.lifecycle);
                }
                if let Some(cb) = self.callbacks.on_ready.as_mut() {
                    cb();
                }
            }
            InboundMessage::StateChange(state) => {
                if self.lifecycle.is_ready() {
                    self.lifecycle = Lifecycle::Active(state);
                } else {
                    log::debug!("State {state:?} while {:?}, lifecycle unchanged", self.lifecycle);
                }
                if let Some(cb) = self.callbacks.on_change_state.as_mut() {
                    cb(state);
                }
                if state == PlaybackState::Ended && self.config.looping {
                    if let Some(identity) = self.config.identity() {
                        log::debug!("Looping {identity:?}");
                        self.send(Command::load(&identity));
                    }
                }
            }
            InboundMessage::Playing(progress) => {
                if let Some(cb) = self.callbacks.on_progress.as_mut() {
                    cb(progress);
                }
            }
            InboundMessage::QualityChange(quality) => {
                if let Some(cb) = self.callbacks.on_change_quality.as_mut() {
                    cb(&quality);
                }
            }
            InboundMessage::Error { code } => {
                log::warn!("Player reported error {code}");
                self.report_error(&ErrorEvent::Player { code });
            }
        }
    }

    /// Classify a navigation attempt. The surface cancels anything that is not
    /// [`NavigationVerdict::Allow`].
    pub fn on_navigation(&mut self, url: &str) -> NavigationVerdict {
        let verdict = self.navigation.classify(url);
        match verdict {
            NavigationVerdict::Allow => log::debug!("Loading player document"),
            NavigationVerdict::Suppress => log::trace!("Suppressed navigation to {url}"),
            NavigationVerdict::ClickThrough => {
                log::debug!("Click-through to {url}");
                if let Some(cb) = self.callbacks.on_click.as_mut() {
                    cb(url);
                }
                self.surface.stop_loading();
            }
        }
        verdict
    }

    pub fn on_surface_error(&mut self, error: SurfaceError) {
        log::warn!("Player surface error: {error}");
        self.report_error(&ErrorEvent::Surface(error));
    }

    fn report_error(&mut self, event: &ErrorEvent) {
        if let Some(cb) = self.callbacks.on_error.as_mut() {
            cb(event);
        }
    }

    /// Back gesture. Leaves fullscreen and consumes the gesture when
    /// fullscreen is on; otherwise lets the host handle it.
    pub fn handle_back_press(&mut self) -> bool {
        if !self.fullscreen {
            return false;
        }
        self.fullscreen = false;
        if let Some(cb) = self.callbacks.on_change_fullscreen.as_mut() {
            cb(false);
        }
        true
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Commands waiting for the player to become ready.
    pub fn pending(&self) -> &[Command] {
        &self.pending
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Mutex;

    use super::surface::RecordingSurface;
    use super::*;
    use crate::protocol::Progress;

    const ORIGIN: &str = "https://app.example.com";
    const DOC_URL: &str = "data:text/html;charset=utf-8,";

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Click(String),
        Error(ErrorEvent),
        Ready,
        State(PlaybackState),
        Quality(String),
        Fullscreen(bool),
        Progress(Progress),
    }

    type Recorded = Rc<RefCell<Vec<Event>>>;

    fn recording_callbacks() -> (Callbacks, Recorded) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let push = |events: &Recorded| {
            let events = events.clone();
            move |e: Event| events.borrow_mut().push(e)
        };
        let (click, error, ready, state, quality, fullscreen, progress) = (
            push(&events),
            push(&events),
            push(&events),
            push(&events),
            push(&events),
            push(&events),
            push(&events),
        );
        let callbacks = Callbacks::new()
            .on_click(move |url| click(Event::Click(url.to_string())))
            .on_error(move |e| error(Event::Error(e.clone())))
            .on_ready(move || ready(Event::Ready))
            .on_change_state(move |s| state(Event::State(s)))
            .on_change_quality(move |q| quality(Event::Quality(q.to_string())))
            .on_change_fullscreen(move |f| fullscreen(Event::Fullscreen(f)))
            .on_progress(move |p| progress(Event::Progress(p)));
        (callbacks, events)
    }

    fn config() -> PlayerConfig {
        PlayerConfig::new("key", ORIGIN)
            .with_video("dQw4w9WgXcQ")
            .with_size(320.0, 180.0)
    }

    fn ready_bridge(config: PlayerConfig) -> (PlayerBridge<RecordingSurface>, Recorded) {
        let (callbacks, events) = recording_callbacks();
        let mut bridge = PlayerBridge::new(config, callbacks, RecordingSurface::default()).unwrap();
        assert_eq!(bridge.on_navigation(DOC_URL), NavigationVerdict::Allow);
        bridge.on_message(r#"{"type":"PLAYER_READY"}"#);
        events.borrow_mut().clear();
        (bridge, events)
    }

    struct CaptureLogger {
        lines: Mutex<Vec<String>>,
    }

    impl log::Log for CaptureLogger {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }
        fn log(&self, record: &log::Record) {
            if let Ok(mut lines) = self.lines.lock() {
                lines.push(format!("{} {}", record.level(), record.args()));
            }
        }
        fn flush(&self) {}
    }

    static CAPTURE: CaptureLogger = CaptureLogger {
        lines: Mutex::new(Vec::new()),
    };

    fn captured(needle: &str) -> Vec<String> {
        let _ = log::set_logger(&CAPTURE);
        log::set_max_level(log::LevelFilter::Trace);
        CAPTURE
            .lines
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.contains(needle))
            .cloned()
            .collect()
    }

    #[test]
    fn renders_when_size_known() {
        let (bridge, _) = ready_bridge(config());
        let docs = &bridge.surface().documents;
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].base_url, ORIGIN);
        assert!(docs[0].html.contains("width=\"320\""));
        assert!(docs[0].html.contains("dQw4w9WgXcQ"));
        assert_eq!(bridge.lifecycle(), Lifecycle::Ready);
    }

    #[test]
    fn waits_for_size_before_rendering() {
        let (callbacks, _) = recording_callbacks();
        let cfg = PlayerConfig::new("key", ORIGIN).with_video("dQw4w9WgXcQ");
        let mut bridge =
            PlayerBridge::new(cfg.clone(), callbacks, RecordingSurface::default()).unwrap();
        assert!(bridge.surface().documents.is_empty());
        assert_eq!(bridge.lifecycle(), Lifecycle::Unloaded);

        let decision = bridge.update_props(cfg.with_size(320.0, 180.0)).unwrap();
        assert_eq!(decision, RenderDecision::FullRender);
        assert_eq!(bridge.surface().documents.len(), 1);
        assert_eq!(bridge.lifecycle(), Lifecycle::Loading);
    }

    #[test]
    fn rejects_invalid_config() {
        let (callbacks, _) = recording_callbacks();
        let cfg = PlayerConfig::new("key", ORIGIN).with_size(0.0, 180.0);
        assert!(PlayerBridge::new(cfg, callbacks, RecordingSurface::default()).is_err());

        let (callbacks, _) = recording_callbacks();
        let json = r#"{"apiKey":"k","origin":"o","playsInline":true}"#;
        assert!(matches!(
            PlayerBridge::from_json(json, callbacks, RecordingSurface::default()),
            Err(ConfigError::RemovedOption { .. })
        ));
    }

    #[test]
    fn resize_issues_one_command_without_rerender() {
        let (mut bridge, _) = ready_bridge(config());
        bridge.update_props(config().with_size(640.0, 360.0)).unwrap();
        assert_eq!(bridge.surface().documents.len(), 1);
        assert_eq!(bridge.surface().scripts, vec!["player.setSize(640, 360);"]);
    }

    #[test]
    fn play_toggle_issues_one_command() {
        let (mut bridge, _) = ready_bridge(config());
        bridge.update_props(config().with_play(true)).unwrap();
        assert_eq!(bridge.surface().documents.len(), 1);
        assert_eq!(bridge.surface().scripts, vec!["player.playVideo();"]);

        bridge.update_props(config()).unwrap();
        assert_eq!(
            bridge.surface().scripts,
            vec!["player.playVideo();", "player.pauseVideo();"]
        );
    }

    #[test]
    fn video_change_loads_in_place() {
        let (mut bridge, _) = ready_bridge(config());
        bridge.update_props(config().with_video("9bZkp7q19f0")).unwrap();
        assert_eq!(bridge.surface().documents.len(), 1);
        assert_eq!(
            bridge.surface().scripts,
            vec![r#"player.loadVideoById({videoId: "9bZkp7q19f0"});"#]
        );
    }

    #[test]
    fn structural_change_rerenders() {
        let (mut bridge, _) = ready_bridge(config());
        let mut next = config();
        next.show_fullscreen_button = false;
        assert_eq!(bridge.update_props(next).unwrap(), RenderDecision::FullRender);
        assert_eq!(bridge.surface().documents.len(), 2);
        assert!(bridge.surface().documents[1].html.contains("fs=0"));
        assert_eq!(bridge.lifecycle(), Lifecycle::Loading);
        assert_eq!(bridge.on_navigation(DOC_URL), NavigationVerdict::Allow);
    }

    #[test]
    fn invalid_update_keeps_previous_props() {
        let (mut bridge, _) = ready_bridge(config());
        assert!(bridge.update_props(config().with_size(-1.0, 10.0)).is_err());
        assert_eq!(bridge.config().size(), Some((320.0, 180.0)));
        assert!(bridge.surface().scripts.is_empty());
    }

    #[test]
    fn commands_queue_until_ready() {
        let (callbacks, events) = recording_callbacks();
        let mut bridge =
            PlayerBridge::new(config(), callbacks, RecordingSurface::default()).unwrap();
        bridge.seek_to(30.0);
        bridge.update_props(config().with_play(true)).unwrap();
        bridge.update_props(config()).unwrap();
        assert!(bridge.surface().scripts.is_empty());
        assert_eq!(bridge.pending(), &[Command::Seek(30.0), Command::Pause]);

        bridge.on_message(r#"{"type":"PLAYER_READY"}"#);
        assert_eq!(
            bridge.surface().scripts,
            vec!["player.seekTo(30);", "player.pauseVideo();"]
        );
        assert!(bridge.pending().is_empty());
        assert_eq!(*events.borrow(), vec![Event::Ready]);
    }

    #[test]
    fn commands_before_render_are_dropped() {
        let (callbacks, _) = recording_callbacks();
        let cfg = PlayerConfig::new("key", ORIGIN).with_video("dQw4w9WgXcQ");
        let mut bridge = PlayerBridge::new(cfg, callbacks, RecordingSurface::default()).unwrap();
        bridge.next_video();
        assert!(bridge.pending().is_empty());
        assert!(bridge.surface().scripts.is_empty());
    }

    #[test]
    fn rerender_discards_queue() {
        let (callbacks, _) = recording_callbacks();
        let mut bridge =
            PlayerBridge::new(config(), callbacks, RecordingSurface::default()).unwrap();
        bridge.next_video();
        let mut next = config();
        next.controls = Some(crate::document::ControlsMode::Default);
        bridge.update_props(next).unwrap();
        assert!(bridge.pending().is_empty());
    }

    #[test]
    fn relay_commands() {
        let (mut bridge, _) = ready_bridge(config());
        bridge.seek_to(12.5);
        bridge.next_video();
        bridge.previous_video();
        bridge.play_video_at(2);
        bridge.seek_to(f64::NAN);
        assert_eq!(
            bridge.surface().scripts,
            vec![
                "player.seekTo(12.5);",
                "player.nextVideo();",
                "player.previousVideo();",
                "player.playVideoAt(2);",
            ]
        );
    }

    #[test]
    fn synchronous_reads_unsupported() {
        let (bridge, _) = ready_bridge(config());
        assert!(matches!(
            bridge.current_time(),
            Err(BridgeError::Unsupported("currentTime"))
        ));
        assert!(matches!(
            bridge.videos_index(),
            Err(BridgeError::Unsupported("videosIndex"))
        ));
    }

    #[test]
    fn dispatches_messages_to_callbacks() {
        let (mut bridge, events) = ready_bridge(config());
        bridge.on_message(r#"{"type":"STATE_CHANGE","payload":{"state":"playing"}}"#);
        bridge.on_message(r#"{"type":"PLAYING","payload":{"duration":200,"currentTime":4.5}}"#);
        bridge.on_message(r#"{"type":"QUALITY_CHANGE","payload":{"quality":"hd720"}}"#);
        bridge.on_message(r#"{"type":"ERROR","payload":{"code":150}}"#);
        bridge.on_message(r#"{"type":"STATE_CHANGE","payload":{"state":"paused"}}"#);

        assert_eq!(
            *events.borrow(),
            vec![
                Event::State(PlaybackState::Playing),
                Event::Progress(Progress {
                    duration: 200.0,
                    current_time: 4.5
                }),
                Event::Quality("hd720".into()),
                Event::Error(ErrorEvent::Player { code: 150 }),
                Event::State(PlaybackState::Paused),
            ]
        );
        assert_eq!(bridge.lifecycle(), Lifecycle::Active(PlaybackState::Paused));
    }

    #[test]
    fn unknown_kind_logs_and_invokes_nothing() {
        let _ = captured("");
        let (mut bridge, events) = ready_bridge(config());
        bridge.on_message(r#"{"type":"VOLUME_CHANGE_3e1f","payload":{"volume":3}}"#);
        assert!(events.borrow().is_empty());
        assert_eq!(bridge.lifecycle(), Lifecycle::Ready);

        let lines = captured("VOLUME_CHANGE_3e1f");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("WARN"));
    }

    #[test]
    fn malformed_messages_ignored() {
        let (mut bridge, events) = ready_bridge(config());
        bridge.on_message("");
        bridge.on_message("{not json");
        bridge.on_message(r#"{"payload":{}}"#);
        bridge.on_message(r#"{"type":"STATE_CHANGE","payload":{"state":"rewinding"}}"#);
        bridge.on_message(r#"{"type":"PLAYING"}"#);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn loop_reloads_on_end() {
        let mut cfg = config();
        cfg.looping = true;
        let (mut bridge, events) = ready_bridge(cfg);
        bridge.on_message(r#"{"type":"STATE_CHANGE","payload":{"state":"ended"}}"#);
        assert_eq!(*events.borrow(), vec![Event::State(PlaybackState::Ended)]);
        assert_eq!(
            bridge.surface().scripts,
            vec![r#"player.loadVideoById({videoId: "dQw4w9WgXcQ"});"#]
        );
    }

    #[test]
    fn ended_without_loop_stays() {
        let (mut bridge, _) = ready_bridge(config());
        bridge.on_message(r#"{"type":"STATE_CHANGE","payload":{"state":"ended"}}"#);
        assert!(bridge.surface().scripts.is_empty());
    }

    #[test]
    fn back_press_leaves_fullscreen() {
        let mut cfg = config();
        cfg.fullscreen = true;
        let (mut bridge, events) = ready_bridge(cfg);
        assert!(bridge.is_fullscreen());
        assert!(bridge.handle_back_press());
        assert!(!bridge.is_fullscreen());
        assert_eq!(*events.borrow(), vec![Event::Fullscreen(false)]);

        assert!(!bridge.handle_back_press());
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn fullscreen_prop_is_mirrored() {
        let (mut bridge, events) = ready_bridge(config());
        assert!(!bridge.handle_back_press());
        let mut next = config();
        next.fullscreen = true;
        assert_eq!(bridge.update_props(next).unwrap(), RenderDecision::NoOp);
        assert!(bridge.is_fullscreen());
        assert!(bridge.handle_back_press());
        assert_eq!(*events.borrow(), vec![Event::Fullscreen(false)]);
    }

    #[test]
    fn navigation_verdicts() {
        let (mut bridge, events) = ready_bridge(config());
        assert_eq!(bridge.on_navigation("about:blank"), NavigationVerdict::Suppress);
        assert_eq!(bridge.on_navigation(ORIGIN), NavigationVerdict::Suppress);
        assert_eq!(
            bridge.on_navigation("https://app.example.com/"),
            NavigationVerdict::Suppress
        );
        assert_eq!(bridge.on_navigation(DOC_URL), NavigationVerdict::Suppress);
        assert!(events.borrow().is_empty());
        assert_eq!(bridge.surface().stops, 0);

        let url = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
        assert_eq!(bridge.on_navigation(url), NavigationVerdict::ClickThrough);
        assert_eq!(*events.borrow(), vec![Event::Click(url.into())]);
        assert_eq!(bridge.surface().stops, 1);
    }

    #[test]
    fn surface_errors_reported() {
        let (mut bridge, events) = ready_bridge(config());
        let err = SurfaceError {
            description: "net::ERR_NAME_NOT_RESOLVED".into(),
            code: Some(-2),
            url: Some("https://www.youtube.com/iframe_api".into()),
        };
        bridge.on_surface_error(err.clone());
        assert_eq!(*events.borrow(), vec![Event::Error(ErrorEvent::Surface(err))]);
    }

    #[test]
    fn stale_state_after_rerender_keeps_queueing() {
        let (mut bridge, events) = ready_bridge(config());
        let mut next = config();
        next.show_fullscreen_button = false;
        assert_eq!(bridge.update_props(next).unwrap(), RenderDecision::FullRender);
        assert_eq!(bridge.lifecycle(), Lifecycle::Loading);

        bridge.on_message(r#"{"type":"STATE_CHANGE","payload":{"state":"paused"}}"#);
        assert_eq!(bridge.lifecycle(), Lifecycle::Loading);
        assert_eq!(*events.borrow(), vec![Event::State(PlaybackState::Paused)]);

        bridge.seek_to(10.0);
        assert!(bridge.surface().scripts.is_empty());
        assert_eq!(bridge.pending(), &[Command::Seek(10.0)]);

        bridge.on_message(r#"{"type":"PLAYER_READY"}"#);
        assert_eq!(bridge.lifecycle(), Lifecycle::Ready);
        assert_eq!(bridge.surface().scripts, vec!["player.seekTo(10);"]);
    }

    #[test]
    fn ready_before_any_document_is_not_a_transition() {
        let (callbacks, events) = recording_callbacks();
        let cfg = PlayerConfig::new("key", ORIGIN).with_video("dQw4w9WgXcQ");
        let mut bridge = PlayerBridge::new(cfg, callbacks, RecordingSurface::default()).unwrap();
        bridge.on_message(r#"{"type":"PLAYER_READY"}"#);
        bridge.on_message(r#"{"type":"STATE_CHANGE","payload":{"state":"playing"}}"#);
        assert_eq!(bridge.lifecycle(), Lifecycle::Unloaded);
        assert_eq!(
            *events.borrow(),
            vec![Event::Ready, Event::State(PlaybackState::Playing)]
        );

        bridge.next_video();
        assert!(bridge.surface().scripts.is_empty());
        assert!(bridge.pending().is_empty());
    }

    #[test]
    fn repeated_ready_keeps_active_state() {
        let (mut bridge, events) = ready_bridge(config());
        bridge.on_message(r#"{"type":"STATE_CHANGE","payload":{"state":"playing"}}"#);
        bridge.on_message(r#"{"type":"PLAYER_READY"}"#);
        assert_eq!(bridge.lifecycle(), Lifecycle::Active(PlaybackState::Playing));
        assert_eq!(
            *events.borrow(),
            vec![Event::State(PlaybackState::Playing), Event::Ready]
        );
    }

    #[test]
    fn missing_callbacks_are_fine() {
        let mut bridge =
            PlayerBridge::new(config(), Callbacks::new(), RecordingSurface::default()).unwrap();
        bridge.on_message(r#"{"type":"PLAYER_READY"}"#);
        bridge.on_message(r#"{"type":"ERROR","payload":{"code":2}}"#);
        assert_eq!(
            bridge.on_navigation("https://example.org"),
            NavigationVerdict::ClickThrough
        );
        bridge.on_surface_error(SurfaceError::new("boom"));
        assert_eq!(bridge.lifecycle(), Lifecycle::Ready);
    }
}
