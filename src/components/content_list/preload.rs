use log::debug;
use url::Url;
use web_sys::HtmlImageElement;

use crate::config::PreviewConfig;
use crate::content::{ContentItem, ImageField};

const TRANSFORM_KEYS: [&str; 4] = ["fit", "w", "h", "exp"];

/// Rewrites an image URL to request the preview thumbnail crop.
/// Query parameters other than the crop transform are kept.
pub fn thumbnail_url(image: &ImageField, config: &PreviewConfig) -> Option<String> {
    if !image.is_filled() {
        return None;
    }
    let mut url = Url::parse(image.url.as_deref()?.trim()).ok()?;
    if url.cannot_be_a_base() {
        return None;
    }

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !TRANSFORM_KEYS.contains(&key.as_ref()))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("fit", "crop")
        .append_pair("w", &config.thumbnail_width.to_string())
        .append_pair("h", &config.thumbnail_height.to_string())
        .append_pair("exp", &config.thumbnail_exposure.to_string());

    Some(url.into())
}

/// The item's own image when it is usable, the fallback otherwise.
pub fn resolve_preview_url(
    item: &ContentItem,
    fallback: &ImageField,
    config: &PreviewConfig,
) -> Option<String> {
    item.preview_image
        .as_ref()
        .and_then(|image| thumbnail_url(image, config))
        .or_else(|| thumbnail_url(fallback, config))
}

/// One entry per item, in the collection's original order.
pub fn resolve_preview_urls(
    items: &[ContentItem],
    fallback: &ImageField,
    config: &PreviewConfig,
) -> Vec<Option<String>> {
    items
        .iter()
        .map(|item| resolve_preview_url(item, fallback, config))
        .collect()
}

/// Starts a detached image load for each URL so hovering later hits the cache.
pub fn warm_image_cache(urls: &[Option<String>]) {
    for url in urls.iter().flatten() {
        match HtmlImageElement::new() {
            Ok(image) => image.set_src(url),
            Err(_) => debug!("Skipping preview preload for {}", url),
        }
    }
}
