//! Prop-change handling: decide between regenerating the document and issuing
//! in-place commands.

use crate::config::PlayerConfig;
use crate::protocol::Command;

#[derive(Debug, Clone, PartialEq)]
pub enum RenderDecision {
    /// Regenerate and reload the whole document.
    FullRender,
    /// Nothing to do.
    NoOp,
    /// Keep the document and run these commands, in order.
    Remote(Vec<Command>),
}

/// Fields baked into the document that no command can change.
fn structural_change(prev: &PlayerConfig, next: &PlayerConfig) -> bool {
    prev.origin != next.origin
        || prev.controls != next.controls
        || prev.show_fullscreen_button != next.show_fullscreen_button
}

/// Compare `prev` and `next` props. `rendered` is whether a document has
/// already been generated for `prev`.
///
/// Several simultaneous in-place changes all apply, as resize, then load,
/// then play or pause.
pub fn decide(prev: &PlayerConfig, next: &PlayerConfig, rendered: bool) -> RenderDecision {
    let (Some((width, height)), Some(identity)) = (next.size(), next.identity()) else {
        return RenderDecision::NoOp;
    };
    if !rendered || structural_change(prev, next) {
        return RenderDecision::FullRender;
    }

    let mut commands = Vec::new();
    if prev.size() != Some((width, height)) {
        commands.push(Command::Resize { width, height });
    }
    if prev.identity().as_ref() != Some(&identity) {
        commands.push(Command::load(&identity));
    }
    if prev.play != next.play {
        commands.push(if next.play { Command::Play } else { Command::Pause });
    }

    if commands.is_empty() {
        RenderDecision::NoOp
    } else {
        RenderDecision::Remote(commands)
    }
}
