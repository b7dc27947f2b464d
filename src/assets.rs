//! Required assets
//!
//! The session only starts once every entry in the manifest has loaded. A
//! single failure is fatal: the loader reports it and the loop never starts.

use serde::{Deserialize, Serialize};

use crate::error::AssetError;

/// One image the game needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEntry {
    pub key: String,
    pub src: String,
}

/// Everything that must load before the first tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetManifest {
    pub entries: Vec<AssetEntry>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            entries: vec![AssetEntry {
                key: Self::FACE.to_string(),
                src: "assets/face.png".to_string(),
            }],
        }
    }
}

impl AssetManifest {
    /// Player portrait drawn inside the avatar's head
    pub const FACE: &'static str = "face";

    /// Reject manifests the loader could never satisfy
    pub fn validate(&self) -> Result<(), AssetError> {
        if self.entries.is_empty() {
            return Err(AssetError::EmptyManifest);
        }
        for (i, entry) in self.entries.iter().enumerate() {
            if entry.src.trim().is_empty() {
                return Err(AssetError::Load {
                    key: entry.key.clone(),
                    src: entry.src.clone(),
                });
            }
            if self.entries[..i].iter().any(|e| e.key == entry.key) {
                return Err(AssetError::DuplicateKey(entry.key.clone()));
            }
        }
        Ok(())
    }
}

/// Browser image loading
#[cfg(target_arch = "wasm32")]
pub mod web {
    use std::collections::HashMap;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::HtmlImageElement;

    use super::{AssetEntry, AssetManifest};
    use crate::error::AssetError;

    /// Loaded images by manifest key
    #[derive(Default)]
    pub struct ImageSet {
        images: HashMap<String, HtmlImageElement>,
    }

    impl ImageSet {
        pub fn get(&self, key: &str) -> Option<&HtmlImageElement> {
            self.images.get(key)
        }
    }

    /// Load every image in the manifest, failing on the first error
    pub async fn load_images(manifest: &AssetManifest) -> Result<ImageSet, AssetError> {
        manifest.validate()?;
        let mut set = ImageSet::default();
        for entry in &manifest.entries {
            let image = load_image(entry).await?;
            log::info!("Loaded asset `{}` ({})", entry.key, entry.src);
            set.images.insert(entry.key.clone(), image);
        }
        Ok(set)
    }

    async fn load_image(entry: &AssetEntry) -> Result<HtmlImageElement, AssetError> {
        let load_error = || AssetError::Load {
            key: entry.key.clone(),
            src: entry.src.clone(),
        };

        let image = HtmlImageElement::new().map_err(|_| AssetError::NoDocument)?;
        let promise = {
            let image = image.clone();
            let src = entry.src.clone();
            js_sys::Promise::new(&mut move |resolve, reject| {
                let on_load = Closure::once_into_js(move || {
                    let _ = resolve.call0(&JsValue::NULL);
                });
                let on_error = Closure::once_into_js(move || {
                    let _ = reject.call0(&JsValue::NULL);
                });
                image.set_onload(Some(on_load.unchecked_ref()));
                image.set_onerror(Some(on_error.unchecked_ref()));
                image.set_src(&src);
            })
        };

        JsFuture::from(promise).await.map_err(|_| load_error())?;
        Ok(image)
    }
}
