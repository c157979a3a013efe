//! Image naming and reference resolution.

use std::collections::HashMap;

use super::result::{AssetInstruction, Warning};
use crate::model::{Document, ImageRef};

/// Relationship id → asset file name, numbered by first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageMap {
    names: HashMap<String, String>,
    order: Vec<String>,
}

impl ImageMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `image_NNN.<ext>` names to every embedded image the body
    /// references, in order of first appearance.
    ///
    /// References whose bytes were not extracted get no entry.
    pub fn build(document: &Document) -> Self {
        let mut map = Self::new();
        for rel_id in document.paragraphs().flat_map(|p| p.images.iter()) {
            if map.names.contains_key(rel_id) {
                continue;
            }
            if let Some(resource) = document.get_resource(rel_id) {
                map.insert(rel_id.clone(), &resource.extension());
            }
        }
        map
    }

    /// Add the next image with the given file extension; returns its file name.
    pub fn insert(&mut self, relationship_id: impl Into<String>, extension: &str) -> &str {
        let relationship_id = relationship_id.into();
        if !self.names.contains_key(&relationship_id) {
            let name = format!("image_{:03}.{}", self.order.len() + 1, extension);
            self.names.insert(relationship_id.clone(), name);
            self.order.push(relationship_id.clone());
        }
        self.names[&relationship_id].as_str()
    }

    /// File name assigned to a relationship id.
    pub fn file_name(&self, relationship_id: &str) -> Option<&str> {
        self.names.get(relationship_id).map(String::as_str)
    }

    /// Number of mapped images.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no image is mapped.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Write instructions for every mapped image, in numbering order.
    pub fn instructions(&self) -> Vec<AssetInstruction> {
        self.order
            .iter()
            .map(|id| AssetInstruction {
                relationship_id: id.clone(),
                file_name: self.names[id].clone(),
            })
            .collect()
    }
}

/// Maps image references onto asset paths using a prebuilt [`ImageMap`].
#[derive(Debug, Clone, Copy)]
pub struct ImageReferenceResolver<'a> {
    map: &'a ImageMap,
    asset_dir: &'a str,
}

impl<'a> ImageReferenceResolver<'a> {
    /// Create a resolver rooted at `asset_dir` (e.g. "assets").
    pub fn new(map: &'a ImageMap, asset_dir: &'a str) -> Self {
        Self { map, asset_dir }
    }

    /// Resolve a relationship id. Unknown ids yield [`ImageRef::Missing`]
    /// and push a [`Warning::MissingImage`].
    pub fn resolve(&self, relationship_id: &str, warnings: &mut Vec<Warning>) -> ImageRef {
        match self.map.file_name(relationship_id) {
            Some(name) => ImageRef::Asset {
                path: format!("{}/{}", self.asset_dir, name),
            },
            None => {
                let warning = Warning::MissingImage {
                    relationship_id: relationship_id.to_string(),
                };
                log::warn!("{}", warning);
                warnings.push(warning);
                ImageRef::Missing {
                    relationship_id: relationship_id.to_string(),
                }
            }
        }
    }
}

/// Markdown for an image reference.
pub fn image_markdown(image: &ImageRef, alt: &str) -> String {
    match image {
        ImageRef::Asset { path } => format!("![{}](./{})", alt, path),
        ImageRef::Missing { relationship_id } => {
            format!("[missing image: {}]", relationship_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Paragraph, Resource};

    #[test]
    fn test_build_numbers_by_first_appearance() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("a").with_image("rId9"));
        doc.add_paragraph(Paragraph::new().with_image("rId2").with_image("rId9"));
        doc.add_paragraph(Paragraph::new().with_image("rIdMissing"));
        doc.add_resource(
            "rId2",
            Resource::from_part("word/media/image7.jpeg", vec![0xFF, 0xD8, 0xFF, 0xE0]),
        );
        doc.add_resource(
            "rId9",
            Resource::from_part("word/media/image1.png", vec![0x89, 0x50, 0x4E, 0x47]),
        );

        let map = ImageMap::build(&doc);
        assert_eq!(map.len(), 2);
        assert_eq!(map.file_name("rId9"), Some("image_001.png"));
        assert_eq!(map.file_name("rId2"), Some("image_002.jpeg"));
        assert_eq!(map.file_name("rIdMissing"), None);

        let instructions = map.instructions();
        assert_eq!(instructions[0].relationship_id, "rId9");
        assert_eq!(instructions[1].file_name, "image_002.jpeg");
    }

    #[test]
    fn test_resolve() {
        let mut map = ImageMap::new();
        map.insert("rId1", "png");
        let resolver = ImageReferenceResolver::new(&map, "assets");
        let mut warnings = Vec::new();

        let found = resolver.resolve("rId1", &mut warnings);
        assert_eq!(image_markdown(&found, "Image"), "![Image](./assets/image_001.png)");
        assert!(warnings.is_empty());

        let missing = resolver.resolve("rId42", &mut warnings);
        assert_eq!(image_markdown(&missing, "Image"), "[missing image: rId42]");
        assert_eq!(
            warnings,
            vec![Warning::MissingImage {
                relationship_id: "rId42".into()
            }]
        );
    }

    #[test]
    fn test_insert_is_stable() {
        let mut map = ImageMap::new();
        assert_eq!(map.insert("a", "gif"), "image_001.gif");
        assert_eq!(map.insert("a", "png"), "image_001.gif");
        assert_eq!(map.insert("b", "png"), "image_002.png");
    }
}
