//! Player document generation.
//!
//! The generated page hosts the embed iframe and a small bridge script that
//! republishes player lifecycle events as JSON strings via `window.postMessage`:
//!
//! - `PLAYER_READY` once the player API has attached to the iframe
//! - `STATE_CHANGE` on playing / paused / ended / buffering transitions
//! - `PLAYING` progress snapshots, immediately on play and then every second
//!   from a single interval timer that is cleared on pause and end
//! - `QUALITY_CHANGE` and `ERROR` as reported by the player API
//!
//! Host commands are executed against the script's global `player` handle.

pub mod embed;
pub mod types;

pub use embed::{embed_url, parse_embed_url};
pub use types::*;

/// Bridge script, shared by every generated document. Expects a global
/// `autoplay` boolean to be defined before it runs.
const BRIDGE_SCRIPT: &str = include_str!("../../../../assets/player/bridge.js");

/// Escape text for use inside a double-quoted HTML attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// The inline script of a generated document: the autoplay flag followed by the bridge.
pub fn bridge_script(autoplay: bool) -> String {
    format!("var autoplay = {autoplay};\n{BRIDGE_SCRIPT}")
}

fn check_dimension(name: &'static str, value: f64) -> Result<(), DocumentError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DocumentError::InvalidDimension { name, value })
    }
}

/// Produce the complete player document for `request`. Pure: no I/O.
pub fn generate_document(request: &DocumentRequest) -> Result<String, DocumentError> {
    check_dimension("width", request.width)?;
    check_dimension("height", request.height)?;
    let src = embed_url(&request.identity, &request.options)?;

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta name="viewport" content="width=device-width, initial-scale=1">
<style>
html, body {{ margin: 0; background: black; }}
</style>
</head>
<body>
<iframe id="youtube-player" type="text/html" width="{width}" height="{height}" src="{src}" frameborder="0" allow="autoplay; encrypted-media" allowfullscreen></iframe>
<script type="text/javascript">
{script}
</script>
</body>
</html>
"#,
        width = request.width,
        height = request.height,
        src = escape_html(src.as_str()),
        script = bridge_script(request.options.autoplay),
    ))
}
