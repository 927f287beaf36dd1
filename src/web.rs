//! Browser image loading.

use async_trait::async_trait;
use js_sys::Promise;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;

use crate::error::LoadError;
use crate::image::{ImageLoader, LoadedImage};
use crate::render::{self, ImageCache};

/// Loads images through `HtmlImageElement::decode` and stores each decoded
/// element in the shared [`ImageCache`] for the canvas painter.
#[derive(Debug, Clone)]
pub struct BrowserImageLoader {
    cache: ImageCache,
}

impl BrowserImageLoader {
    #[must_use]
    pub fn new(cache: ImageCache) -> Self {
        Self { cache }
    }
}

#[async_trait(?Send)]
impl ImageLoader for BrowserImageLoader {
    async fn fetch(&self, url: &str) -> Result<LoadedImage, LoadError> {
        let img = HtmlImageElement::new()
            .map_err(|e| LoadError::Fetch { url: url.to_string(), reason: format!("{e:?}") })?;
        img.set_cross_origin(Some("anonymous"));
        img.set_src(url);
        let decoded: Promise = img.decode();
        JsFuture::from(decoded)
            .await
            .map_err(|e| LoadError::Decode { url: url.to_string(), reason: format!("{e:?}") })?;
        let width = f64::from(img.natural_width());
        let height = f64::from(img.natural_height());
        if width <= 0.0 || height <= 0.0 {
            return Err(LoadError::InvalidDimensions { url: url.to_string() });
        }
        render::replace_cached(&self.cache, url, img);
        Ok(LoadedImage { url: url.to_string(), width, height })
    }
}
