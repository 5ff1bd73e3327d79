//! Embedded YouTube player for web-view hosts.
//!
//! [`document`] generates the self-contained HTML page that hosts the player
//! and its postMessage bridge. [`bridge`] is the host side: it decodes the
//! page's messages into callbacks, relays commands back as script, decides
//! between re-rendering and in-place updates when props change, and filters
//! navigation inside the surface. [`preview`] serves the same page to a
//! desktop browser for manual testing.

pub mod bridge;
pub mod config;
pub mod document;
pub mod preview;
pub mod protocol;

pub use bridge::{Callbacks, EmbeddedSurface, PlayerBridge, RenderDecision};
pub use config::{ConfigError, PlayerConfig};
