//! Embed endpoint URLs: building the iframe `src` and reading one back.

use url::Url;

use super::types::{
    ControlsMode, DocumentError, EmbedParams, PlaybackOptions, PlayerIdentity, is_valid_id,
};

pub const EMBED_ENDPOINT: &str = "https://www.youtube.com/embed/";

/// Path segment the endpoint uses for playlist embeds.
const PLAYLIST_SEGMENT: &str = "videoseries";

fn flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

fn validate_ids(identity: &PlayerIdentity) -> Result<(), DocumentError> {
    let ids = identity.ids();
    if ids.is_empty() {
        return Err(DocumentError::EmptyIdentity);
    }
    for id in ids {
        if id.is_empty() {
            return Err(DocumentError::EmptyIdentity);
        }
        if !is_valid_id(id) {
            return Err(DocumentError::InvalidId(id.to_string()));
        }
    }
    Ok(())
}

/// Build the iframe source URL for `identity`, carrying every option field.
pub fn embed_url(
    identity: &PlayerIdentity,
    options: &PlaybackOptions,
) -> Result<Url, DocumentError> {
    validate_ids(identity)?;

    let (segment, queued, list) = match identity {
        PlayerIdentity::Video(id) => (id.as_str(), None, None),
        PlayerIdentity::Videos(ids) => (ids[0].as_str(), Some(ids[1..].join(",")), None),
        PlayerIdentity::Playlist(id) => (PLAYLIST_SEGMENT, None, Some(id.as_str())),
    };

    let mut url = Url::parse(EMBED_ENDPOINT)?;
    url.path_segments_mut()
        .map_err(|()| DocumentError::NotEmbedUrl(EMBED_ENDPOINT.to_string()))?
        .pop_if_empty()
        .push(segment);

    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("enablejsapi", "1")
            .append_pair("rel", flag(options.related_videos))
            .append_pair("playsinline", flag(options.plays_inline))
            .append_pair("showinfo", flag(options.show_info))
            .append_pair("modestbranding", flag(options.modest_branding))
            .append_pair("controls", &options.controls.as_u8().to_string())
            .append_pair("fs", flag(options.fullscreen_button))
            .append_pair("version", "3")
            .append_pair("origin", &options.origin);
        if let Some(queued) = queued.filter(|q| !q.is_empty()) {
            query.append_pair("playlist", &queued);
        }
        if let Some(list) = list {
            query.append_pair("listType", "playlist").append_pair("list", list);
        }
    }

    Ok(url)
}

fn parse_flag(name: &'static str, value: Option<&str>) -> Result<bool, DocumentError> {
    match value {
        Some("1") => Ok(true),
        Some("0") => Ok(false),
        Some(other) => Err(DocumentError::InvalidParam {
            name,
            value: other.to_string(),
        }),
        None => Err(DocumentError::MissingParam(name)),
    }
}

/// Recover identity and options from an embed URL produced by [`embed_url`].
pub fn parse_embed_url(src: &str) -> Result<EmbedParams, DocumentError> {
    let url = Url::parse(src)?;
    if url.host_str() != Some("www.youtube.com") {
        return Err(DocumentError::NotEmbedUrl(src.to_string()));
    }

    let segments: Vec<&str> = url
        .path_segments()
        .map(|segments| segments.collect())
        .unwrap_or_default();
    let segment = match segments.as_slice() {
        ["embed", segment] if !segment.is_empty() => *segment,
        _ => return Err(DocumentError::NotEmbedUrl(src.to_string())),
    };

    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    let get = |name: &str| {
        pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    };

    if get("enablejsapi") != Some("1") {
        return Err(DocumentError::InvalidParam {
            name: "enablejsapi",
            value: get("enablejsapi").unwrap_or_default().to_string(),
        });
    }

    let controls_raw = get("controls").ok_or(DocumentError::MissingParam("controls"))?;
    let controls = controls_raw
        .parse::<u8>()
        .ok()
        .and_then(|n| ControlsMode::try_from(n).ok())
        .ok_or_else(|| DocumentError::InvalidParam {
            name: "controls",
            value: controls_raw.to_string(),
        })?;

    let options = PlaybackOptions {
        autoplay: false,
        plays_inline: parse_flag("playsinline", get("playsinline"))?,
        show_info: parse_flag("showinfo", get("showinfo"))?,
        modest_branding: parse_flag("modestbranding", get("modestbranding"))?,
        controls,
        related_videos: parse_flag("rel", get("rel"))?,
        fullscreen_button: parse_flag("fs", get("fs"))?,
        origin: get("origin")
            .ok_or(DocumentError::MissingParam("origin"))?
            .to_string(),
    };

    let identity = if segment == PLAYLIST_SEGMENT {
        let list = get("list").ok_or(DocumentError::MissingParam("list"))?;
        PlayerIdentity::Playlist(list.to_string())
    } else if let Some(queued) = get("playlist") {
        let mut ids = vec![segment.to_string()];
        ids.extend(queued.split(',').map(str::to_string));
        PlayerIdentity::Videos(ids)
    } else {
        PlayerIdentity::Video(segment.to_string())
    };

    Ok(EmbedParams { identity, options })
}
