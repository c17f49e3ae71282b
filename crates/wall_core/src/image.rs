pub type ImageId = u64;

/// Image metadata as delivered by the content endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingImage {
    pub uri: String,
    pub is_generic: bool,
    pub crawler_tag: String,
    pub source: Option<String>,
}

/// A wall entry, ready to be loaded and attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayedImage {
    pub id: ImageId,
    /// URI to load; carries the cache-busting parameter for generic images.
    pub uri: String,
    pub source_label: String,
    pub crawler_tag: String,
    pub is_generic: bool,
}

impl DisplayedImage {
    pub(crate) fn prepare(id: ImageId, incoming: IncomingImage, marker: u64) -> Option<Self> {
        let original = incoming.uri.trim();
        if original.is_empty() {
            return None;
        }

        let uri = if incoming.is_generic {
            cache_busted_uri(original, marker)
        } else {
            original.to_string()
        };
        let source_label = incoming
            .source
            .filter(|source| !source.trim().is_empty())
            .unwrap_or_else(|| original.to_string());

        Some(Self {
            id,
            uri,
            source_label,
            crawler_tag: incoming.crawler_tag.to_lowercase(),
            is_generic: incoming.is_generic,
        })
    }
}

/// Appends `is_generic=<marker>` so the same URI with changing content is not served from cache.
pub fn cache_busted_uri(uri: &str, marker: u64) -> String {
    let separator = if uri.contains('?') { '&' } else { '?' };
    format!("{uri}{separator}is_generic={marker}")
}
