//! Maps TMX / TSX elements onto the records in [`crate::map`].
//! Nothing here decodes tile data; `<data>` payloads are stored verbatim.
mod map;
mod tileset;
mod layer;
mod object;

pub use map::*;
pub use tileset::*;

use std::num::{ParseFloatError, ParseIntError};
use derive_more::*;
use roxmltree::Node;
use crate::map::Properties;

#[derive(Error, Display, From, Debug)]
pub enum TmxParseError {
    XmlError(roxmltree::Error),
    #[display(fmt="{}", _0)]
    ParseIntError(ParseIntError),
    #[display(fmt="{}", _0)]
    ParseFloatError(ParseFloatError),
    #[display(fmt="Unexpected tag '{}'", tag_name)]
    #[from(ignore)]
    UnexpectedTagError { tag_name: String },
    #[display(fmt="Missing attribute '{}'", name)]
    #[from(ignore)]
    MissingAttributeError { name: String },
    #[display(fmt="Unexpected value {}", value)]
    #[from(ignore)]
    InvalidAttributeValue { value: String },
    #[display(fmt="Tileset with firstgid {} follows tileset with firstgid {}", first_gid, previous)]
    #[from(ignore)]
    UnorderedTilesets { previous: u32, first_gid: u32 },
}

/// Reads a `0` / `1` attribute.
pub(crate) fn parse_bool(value: &str) -> Result<bool, TmxParseError> {
    match value {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(TmxParseError::InvalidAttributeValue { value: String::from(value) }),
    }
}

/// Joins a path found in a document with the directory of that document.
pub(crate) fn resolve_path(parent_path: Option<&str>, value: &str) -> String {
    match parent_path {
        Some(parent) => format!("{parent}/{value}"),
        None => String::from(value),
    }
}

/// Reads the `<property>` children of a `<properties>` node.
/// Multiline string properties keep their value as element text instead of an attribute.
pub(crate) fn parse_properties(properties_node: Node) -> Properties {
    let mut properties = Properties::default();
    for property in properties_node.children().filter(|node| node.has_tag_name("property")) {
        let Some(name) = property.attribute("name") else { continue };
        let value = property
            .attribute("value")
            .or_else(|| property.text())
            .unwrap_or_default();
        properties.insert(String::from(name), String::from(value));
    }
    properties
}

#[cfg(test)]
mod test {
    use roxmltree::Document;
    use super::{parse_bool, parse_properties, resolve_path};

    #[test]
    fn properties() {
        let doc = Document::parse(
r#"<properties>
  <property name="speed" type="float" value="1.5"/>
  <property name="text">line one
line two</property>
  <property value="nameless"/>
</properties>"#).unwrap();
        let properties = parse_properties(doc.root_element());
        assert_eq!(2, properties.len());
        assert_eq!(Some("1.5"), properties.get("speed").map(String::as_str));
        assert_eq!(Some("line one\nline two"), properties.get("text").map(String::as_str));
    }

    #[test]
    fn bools() {
        assert_eq!(Some(true), parse_bool("1").ok());
        assert_eq!(Some(false), parse_bool("0").ok());
        assert!(parse_bool("true").is_err());
    }

    #[test]
    fn paths() {
        assert_eq!("maps/tiles.tsx", resolve_path(Some("maps"), "tiles.tsx"));
        assert_eq!("tiles.tsx", resolve_path(None, "tiles.tsx"));
    }
}
