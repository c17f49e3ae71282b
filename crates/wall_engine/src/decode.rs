use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::ImageRecord;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("response body is not valid UTF-8")]
    NotUtf8,
    #[error("malformed image payload: {0}")]
    Malformed(String),
}

#[derive(Debug, Deserialize)]
struct WireImage {
    uri: String,
    #[serde(default)]
    is_generic: bool,
    crawler: WireCrawler,
    #[serde(default)]
    source: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireCrawler {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct WireControl {
    timeout: f64,
}

/// Decode a content endpoint body.
///
/// JSON objects are `{uri, is_generic, crawler: {type}, source?}`; anything else is read as the
/// older plain-text form `<uri>#<crawler>`.
pub fn decode_image_body(bytes: &[u8]) -> Result<ImageRecord, DecodeError> {
    let text = std::str::from_utf8(bytes).map_err(|_| DecodeError::NotUtf8)?;
    let text = text.trim();

    if text.starts_with('{') {
        let wire: WireImage =
            serde_json::from_str(text).map_err(|err| DecodeError::Malformed(err.to_string()))?;
        return Ok(ImageRecord {
            uri: wire.uri,
            is_generic: wire.is_generic,
            crawler: wire.crawler.kind,
            source: wire.source.filter(|source| !source.is_empty()),
        });
    }

    let (uri, crawler) = text.split_once('#').unwrap_or((text, ""));
    let uri = uri.trim();
    Url::parse(uri)
        .map_err(|err| DecodeError::Malformed(format!("legacy body is not a uri: {err}")))?;
    Ok(ImageRecord {
        uri: uri.to_string(),
        is_generic: false,
        crawler: crawler.trim().to_string(),
        source: None,
    })
}

/// Decode the re-enable delay of a control endpoint: `{"timeout": <seconds>}` or bare milliseconds.
pub fn decode_control_delay(bytes: &[u8]) -> Option<Duration> {
    let text = std::str::from_utf8(bytes).ok()?.trim();

    if let Ok(wire) = serde_json::from_str::<WireControl>(text) {
        return seconds_to_duration(wire.timeout);
    }
    let millis: f64 = text.parse().ok()?;
    seconds_to_duration(millis / 1000.0)
}

fn seconds_to_duration(seconds: f64) -> Option<Duration> {
    (seconds.is_finite() && seconds >= 0.0).then(|| Duration::from_secs_f64(seconds))
}
