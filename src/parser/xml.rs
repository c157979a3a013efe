//! WordprocessingML namespace constants and node helpers.

use std::io::{Read, Seek};

use roxmltree::Node;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{Error, Result};

pub(crate) const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub(crate) const DML_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub(crate) const REL_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub(crate) const VML_NS: &str = "urn:schemas-microsoft-com:vml";

/// Whether `node` is the WML element `name`.
pub(crate) fn is_wml(node: Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name && node.tag_name().namespace() == Some(WML_NS)
}

/// First WML child element named `name`.
pub(crate) fn wml<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| is_wml(*n, name))
}

/// The `w:val` attribute of the WML child element `child`.
pub(crate) fn wml_attr<'a, 'input>(node: Node<'a, 'input>, child: &str) -> Option<&'a str> {
    wml(node, child).and_then(|n| n.attribute((WML_NS, "val")))
}

/// A WML toggle property (w:b, w:i, ...).
/// Present with no val or val other than "0"/"false" means on.
pub(crate) fn wml_bool(parent: Node, name: &str) -> Option<bool> {
    wml(parent, name).map(|n| {
        n.attribute((WML_NS, "val"))
            .map_or(true, |v| v != "0" && v != "false" && v != "off")
    })
}

/// Flatten content controls: descend into w:sdtContent and collect effective children.
pub(crate) fn collect_block_nodes<'a, 'input>(parent: Node<'a, 'input>) -> Vec<Node<'a, 'input>> {
    let mut nodes = Vec::new();
    for child in parent.children().filter(|n| n.is_element()) {
        if is_wml(child, "sdt") {
            if let Some(content) = wml(child, "sdtContent") {
                nodes.extend(collect_block_nodes(content));
            }
        } else {
            nodes.push(child);
        }
    }
    nodes
}

/// Read a UTF-8 part from the archive. A missing part is `Ok(None)`.
pub(crate) fn read_zip_text<R: Read + Seek>(
    zip: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<String>> {
    match zip.by_name(name) {
        Ok(mut entry) => {
            let mut content = String::new();
            entry.read_to_string(&mut content)?;
            Ok(Some(content))
        }
        Err(ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(Error::Zip(e)),
    }
}

/// Resolve a relationship target against the `word/` part directory.
pub(crate) fn resolve_part_path(target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }
    let mut segments: Vec<&str> = vec!["word"];
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wml_bool() {
        let xml = format!(
            r#"<w:rPr xmlns:w="{WML_NS}"><w:b/><w:i w:val="0"/><w:caps w:val="true"/></w:rPr>"#
        );
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let rpr = doc.root_element();
        assert_eq!(wml_bool(rpr, "b"), Some(true));
        assert_eq!(wml_bool(rpr, "i"), Some(false));
        assert_eq!(wml_bool(rpr, "caps"), Some(true));
        assert_eq!(wml_bool(rpr, "u"), None);
    }

    #[test]
    fn test_collect_block_nodes_flattens_sdt() {
        let xml = format!(
            r#"<w:body xmlns:w="{WML_NS}"><w:p/><w:sdt><w:sdtContent><w:p/><w:tbl/></w:sdtContent></w:sdt></w:body>"#
        );
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let names: Vec<&str> = collect_block_nodes(doc.root_element())
            .iter()
            .map(|n| n.tag_name().name())
            .collect();
        assert_eq!(names, vec!["p", "p", "tbl"]);
    }

    #[test]
    fn test_resolve_part_path() {
        assert_eq!(resolve_part_path("media/image1.png"), "word/media/image1.png");
        assert_eq!(resolve_part_path("../media/a.jpg"), "media/a.jpg");
        assert_eq!(resolve_part_path("/word/media/b.gif"), "word/media/b.gif");
    }
}
