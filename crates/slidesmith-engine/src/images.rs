//! Stored image naming and the `images/<name>` reference convention.
//!
//! Image bytes live outside the document in an [`ImageStore`]; the document
//! references them as `images/<file name>`. Previews swap those references
//! for data URIs, and pasted base64 images can be moved into the store.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Folder prefix used in `src` attributes for stored images.
pub const IMAGES_FOLDER: &str = "images/";
/// Prefix of every uploaded image's file name.
pub const STORED_IMAGE_PREFIX: &str = "image_";
/// Prefix of images extracted from inline base64 data.
pub const CONVERTED_IMAGE_PREFIX: &str = "converted_";

static STORED_SRC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"src="images/([^"]+)""#).unwrap());
static BASE64_IMG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<img[^>]*src="data:image/[^;]+;base64,[^"]+"[^>]*>"#).unwrap()
});
static DATA_SRC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"src="(data:image/([^;]+);base64,[^"]+)""#).unwrap()
});
static ALT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"alt="([^"]*)""#).unwrap());

/// `image_<epoch ms>_<counter>.<ext>`, keeping the original extension
/// lowercased or falling back to `png`.
pub fn image_file_name(original_name: &str, counter: u32, epoch_ms: i64) -> String {
    let extension = original_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| "png".to_string());
    format!("{STORED_IMAGE_PREFIX}{epoch_ms}_{counter}.{extension}")
}

/// `converted_<epoch ms>_<counter>.<ext>`.
pub fn converted_file_name(extension: &str, counter: u32, epoch_ms: i64) -> String {
    format!("{CONVERTED_IMAGE_PREFIX}{epoch_ms}_{counter}.{extension}")
}

/// One stored image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredImage {
    /// Data URI with the image bytes.
    pub data: String,
    pub original_name: String,
    /// Approximate size in bytes.
    pub size: usize,
    pub mime_type: String,
    pub timestamp: i64,
}

/// Key-value storage for image data, keyed by file name.
pub trait ImageStore {
    fn get(&self, name: &str) -> Option<&StoredImage>;
    fn put(&mut self, name: String, image: StoredImage);
    fn remove(&mut self, name: &str) -> Option<StoredImage>;
    fn names(&self) -> Vec<String>;
}

/// An [`ImageStore`] held in memory, serialisable as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryImageStore {
    images: BTreeMap<String, StoredImage>,
}

impl MemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl ImageStore for MemoryImageStore {
    fn get(&self, name: &str) -> Option<&StoredImage> {
        self.images.get(name)
    }

    fn put(&mut self, name: String, image: StoredImage) {
        self.images.insert(name, image);
    }

    fn remove(&mut self, name: &str) -> Option<StoredImage> {
        self.images.remove(name)
    }

    fn names(&self) -> Vec<String> {
        self.images.keys().cloned().collect()
    }
}

/// Replaces `src="images/<name>"` with the stored data URI. References to
/// names the store does not know are left alone.
pub fn inline_stored_images(doc: &str, store: &dyn ImageStore) -> String {
    STORED_SRC_RE
        .replace_all(doc, |caps: &Captures| match store.get(&caps[1]) {
            Some(image) => format!("src=\"{}\"", image.data),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Moves every inline base64 `<img>` into `store` under a `converted_*`
/// name and points the tag at `images/<name>`. Returns the rewritten
/// document and the new names in document order.
pub fn externalize_base64_images(
    doc: &str,
    store: &mut dyn ImageStore,
    epoch_ms: i64,
) -> (String, Vec<String>) {
    let mut names = Vec::new();

    let content = BASE64_IMG_RE
        .replace_all(doc, |tag: &Captures| {
            let tag = &tag[0];
            let Some(src) = DATA_SRC_RE.captures(tag) else {
                return tag.to_string();
            };
            let data = &src[1];
            let extension = &src[2];
            let alt = ALT_RE
                .captures(tag)
                .map_or("converted_image".to_string(), |c| c[1].to_string());

            let counter = u32::try_from(names.len()).unwrap_or(u32::MAX);
            let name = converted_file_name(extension, counter, epoch_ms);
            store.put(
                name.clone(),
                StoredImage {
                    data: data.to_string(),
                    original_name: alt,
                    size: data.len() * 3 / 4,
                    mime_type: format!("image/{extension}"),
                    timestamp: epoch_ms,
                },
            );
            let rewritten = DATA_SRC_RE
                .replace(tag, format!("src=\"{IMAGES_FOLDER}{name}\"").as_str())
                .into_owned();
            names.push(name);
            rewritten
        })
        .into_owned();

    (content, names)
}
