//! Browser plumbing
//!
//! Callback-style browser APIs wrapped as futures so the game loop can be a
//! plain `loop { next_animation_frame().await; ... }`.

use std::collections::BTreeMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;

use crate::assets::{AssetKind, AssetManifest, AssetSet};

/// Resolves with the timestamp (ms) of the next animation frame
pub async fn next_animation_frame() -> f64 {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let callback = Closure::once_into_js(move |time: f64| {
            let _ = resolve.call1(&JsValue::NULL, &JsValue::from_f64(time));
        });
        if let Some(window) = web_sys::window() {
            let _ = window.request_animation_frame(callback.unchecked_ref());
        }
    });
    JsFuture::from(promise)
        .await
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

/// Start loading one image. The promise resolves `true` on load, `false` on error.
fn request_image(url: &str) -> Result<(HtmlImageElement, js_sys::Promise), JsValue> {
    let img = HtmlImageElement::new()?;
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let on_load = resolve.clone();
        let onload = Closure::once_into_js(move || {
            let _ = on_load.call1(&JsValue::NULL, &JsValue::TRUE);
        });
        let onerror = Closure::once_into_js(move || {
            let _ = resolve.call1(&JsValue::NULL, &JsValue::FALSE);
        });
        img.set_onload(Some(onload.unchecked_ref()));
        img.set_onerror(Some(onerror.unchecked_ref()));
    });
    img.set_src(url);
    Ok((img, promise))
}

/// Loaded sprite images plus the settle status of every declared sprite
#[derive(Debug, Default)]
pub struct Sprites {
    pub status: AssetSet,
    images: BTreeMap<AssetKind, HtmlImageElement>,
}

impl Sprites {
    /// Image ready to draw: loaded successfully and decoded
    pub fn drawable(&self, kind: AssetKind) -> Option<&HtmlImageElement> {
        if !self.status.is_ready(kind) {
            return None;
        }
        self.images
            .get(&kind)
            .filter(|img| img.complete() && img.natural_width() > 0)
    }
}

/// Request every sprite in the manifest, then wait until each has settled
pub async fn load_sprites(manifest: &AssetManifest) -> Sprites {
    let mut sprites = Sprites::default();

    // Issue all requests before awaiting any so they load concurrently
    let mut in_flight = Vec::new();
    for (kind, url) in manifest.iter() {
        match request_image(url) {
            Ok((img, promise)) => in_flight.push((kind, url.to_string(), img, promise)),
            Err(_) => sprites.status.mark_failed(kind, url),
        }
    }

    for (kind, url, img, promise) in in_flight {
        let loaded = JsFuture::from(promise)
            .await
            .ok()
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        if loaded {
            sprites.status.mark_loaded(kind);
            sprites.images.insert(kind, img);
        } else {
            sprites.status.mark_failed(kind, &url);
        }
    }

    log::info!(
        "Assets settled: {} loaded, {} failed",
        sprites.status.loaded_count(),
        sprites.status.failed_count()
    );
    sprites
}
