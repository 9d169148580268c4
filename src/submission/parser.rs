use axum::http::HeaderMap;
use bytes::Bytes;
use serde_json::{Map, Value};

use crate::error::RelayError;

/// Where the submission object comes from.
///
/// Form-style bodies are decoded up front into a field map; everything else
/// (JSON, `text/plain` beacons, no content type at all) is kept as raw bytes
/// and decoded as JSON on [`BodySource::resolve`].
#[derive(Debug)]
pub enum BodySource {
    PreParsed(Map<String, Value>),
    Stream(Bytes),
}

impl BodySource {
    /// Pick a strategy from the request's `Content-Type`.
    pub async fn from_request(headers: &HeaderMap, body: Bytes) -> Result<Self, RelayError> {
        let content_type = headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        // Media types are case-insensitive; the multipart boundary is not.
        let media_type = content_type.to_ascii_lowercase();

        if media_type.contains("application/x-www-form-urlencoded") {
            Ok(BodySource::PreParsed(parse_form_urlencoded(&body)))
        } else if media_type.contains("multipart/form-data") {
            Ok(BodySource::PreParsed(parse_multipart(content_type, body).await?))
        } else {
            Ok(BodySource::Stream(body))
        }
    }

    /// The submission object. Non-object JSON documents resolve to `{}`.
    pub fn resolve(self) -> Result<Map<String, Value>, RelayError> {
        match self {
            BodySource::PreParsed(fields) if !fields.is_empty() => Ok(fields),
            // An empty pre-parsed body has nothing left to decode.
            BodySource::PreParsed(_) => Ok(Map::new()),
            BodySource::Stream(raw) => decode_stream(&raw),
        }
    }
}

fn decode_stream(raw: &[u8]) -> Result<Map<String, Value>, RelayError> {
    if raw.is_empty() {
        return Ok(Map::new());
    }

    match serde_json::from_slice::<Value>(raw)? {
        Value::Object(map) => Ok(map),
        other => {
            tracing::debug!("Submission body is not an object ({other}), using defaults");
            Ok(Map::new())
        }
    }
}

fn parse_form_urlencoded(body: &[u8]) -> Map<String, Value> {
    form_urlencoded::parse(body)
        .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
        .collect()
}

async fn parse_multipart(content_type: &str, body: Bytes) -> Result<Map<String, Value>, RelayError> {
    let boundary = multer::parse_boundary(content_type)
        .map_err(|e| RelayError::MalformedBody(format!("Missing multipart boundary: {e}")))?;

    let stream = futures_util::stream::once(async { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut map = Map::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| RelayError::MalformedBody(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("unknown").to_string();
        let value = field
            .text()
            .await
            .map_err(|e| RelayError::MalformedBody(format!("Field read error: {e}")))?;
        map.insert(name, Value::String(value));
    }

    Ok(map)
}
