//! Embedded media parts (images) referenced from the document body.

use serde::{Deserialize, Serialize};

/// An embedded media part, keyed in [`Document`](super::Document) by relationship id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Raw binary data
    #[serde(skip_serializing, default)]
    pub data: Vec<u8>,

    /// MIME type (e.g., "image/png")
    pub mime_type: String,

    /// Part name inside the package (e.g., "word/media/image1.png")
    pub part_name: Option<String>,
}

impl Resource {
    /// Create an image resource.
    pub fn image(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
            part_name: None,
        }
    }

    /// Create an image resource from a package part, inferring the MIME type
    /// from the part's extension and falling back to the data's magic bytes.
    pub fn from_part(part_name: impl Into<String>, data: Vec<u8>) -> Self {
        let part_name = part_name.into();
        let mime_type = extension_of(&part_name)
            .and_then(mime_for_extension)
            .or_else(|| Self::detect_mime_type(&data))
            .unwrap_or("application/octet-stream");
        Self {
            data,
            mime_type: mime_type.to_string(),
            part_name: Some(part_name),
        }
    }

    /// Set the originating part name.
    pub fn with_part_name(mut self, part_name: impl Into<String>) -> Self {
        self.part_name = Some(part_name.into());
        self
    }

    /// Size of the resource data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// File extension for the extracted asset.
    ///
    /// The part's own extension wins; otherwise it is derived from the MIME type.
    pub fn extension(&self) -> String {
        if let Some(ext) = self.part_name.as_deref().and_then(extension_of) {
            return ext.to_ascii_lowercase();
        }
        match self.mime_type.as_str() {
            "image/jpeg" => "jpg",
            "image/png" => "png",
            "image/gif" => "gif",
            "image/tiff" => "tiff",
            "image/bmp" => "bmp",
            "image/webp" => "webp",
            "image/svg+xml" => "svg",
            "image/x-emf" => "emf",
            "image/x-wmf" => "wmf",
            _ => "bin",
        }
        .to_string()
    }

    /// Detect MIME type from data magic bytes.
    pub fn detect_mime_type(data: &[u8]) -> Option<&'static str> {
        if data.len() < 4 {
            return None;
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some("image/jpeg");
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some("image/png");
        }

        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Some("image/gif");
        }

        // TIFF, both byte orders
        if data.starts_with(&[0x49, 0x49, 0x2A, 0x00])
            || data.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
        {
            return Some("image/tiff");
        }

        if data.starts_with(b"BM") {
            return Some("image/bmp");
        }

        if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some("image/webp");
        }

        None
    }
}

fn extension_of(part_name: &str) -> Option<&str> {
    let file_name = part_name.rsplit('/').next()?;
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        None
    } else {
        Some(ext)
    }
}

fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "tif" | "tiff" => Some("image/tiff"),
        "bmp" => Some("image/bmp"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "emf" => Some("image/x-emf"),
        "wmf" => Some("image/x-wmf"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_part_uses_extension() {
        let res = Resource::from_part("word/media/image1.PNG", vec![0xFF, 0xD8, 0xFF, 0xE0]);
        assert_eq!(res.mime_type, "image/png");
        assert_eq!(res.extension(), "png");
    }

    #[test]
    fn test_from_part_falls_back_to_magic() {
        let res = Resource::from_part("word/media/blob", vec![0xFF, 0xD8, 0xFF, 0xE0]);
        assert_eq!(res.mime_type, "image/jpeg");
        assert_eq!(res.extension(), "jpg");
    }

    #[test]
    fn test_detect_mime_type() {
        let png_data = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(Resource::detect_mime_type(&png_data), Some("image/png"));
        assert_eq!(Resource::detect_mime_type(&[0, 0, 0, 0]), None);
        assert_eq!(Resource::detect_mime_type(&[0xFF]), None);
    }

    #[test]
    fn test_unknown_extension() {
        let res = Resource::image(vec![1, 2, 3], "application/octet-stream");
        assert_eq!(res.extension(), "bin");
    }
}
