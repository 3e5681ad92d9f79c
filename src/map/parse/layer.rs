use roxmltree::Node;
use crate::map::{Compression, Data, Encoding, Layer, TmxParseError};
use super::{parse_bool, parse_properties};

impl Layer {
    pub(crate) fn parse(layer_node: Node) -> Result<Layer, TmxParseError> {
        let mut layer = Layer::default();
        for attribute in layer_node.attributes() {
            let name = attribute.name();
            let value = attribute.value();
            match name {
                "id" => layer.id = value.parse()?,
                "name" => layer.name = String::from(value),
                "width" => layer.width = value.parse()?,
                "height" => layer.height = value.parse()?,
                "opacity" => layer.opacity = value.parse()?,
                "visible" => layer.visible = parse_bool(value)?,
                "offsetx" => layer.offset_x = parse_offset(value)?,
                "offsety" => layer.offset_y = parse_offset(value)?,
                _ => {}
            }
        }
        for child in layer_node.children() {
            match child.tag_name().name() {
                "properties" => layer.properties = parse_properties(child),
                "data" => layer.data = Data::parse(child),
                _ => {}
            }
        }
        Ok(layer)
    }
}

/// Offsets are integers in old maps and may carry a fraction in newer ones.
fn parse_offset(value: &str) -> Result<i32, TmxParseError> {
    match value.parse::<i32>() {
        Ok(offset) => Ok(offset),
        Err(_) => Ok(value.parse::<f64>()?.round() as i32),
    }
}

impl Data {
    fn parse(data_node: Node) -> Data {
        Data {
            encoding: Encoding::parse(data_node.attribute("encoding").unwrap_or_default()),
            compression: Compression::parse(data_node.attribute("compression").unwrap_or_default()),
            payload: String::from(data_node.text().unwrap_or_default()),
        }
    }
}

#[cfg(test)]
mod test {
    use roxmltree::Document;
    use crate::map::{Compression, Encoding, Layer, TmxParseError};

    fn parse(source: &str) -> Result<Layer, TmxParseError> {
        let doc = Document::parse(source)?;
        Layer::parse(doc.root_element())
    }

    #[test]
    fn defaults() {
        let layer = parse(r#"<layer name="Empty" width="3" height="2"/>"#).unwrap();
        assert_eq!((3, 2), (layer.width, layer.height));
        assert_eq!(1.0, layer.opacity);
        assert!(layer.visible);
        assert_eq!(Encoding::Xml, layer.data.encoding);
        assert_eq!(Compression::None, layer.data.compression);
        assert_eq!("", layer.data.payload);
    }

    #[test]
    fn data_tags_kept() {
        let layer = parse(r#"<layer><data encoding="base64" compression="zstd">abc</data></layer>"#).unwrap();
        assert_eq!(Encoding::Base64, layer.data.encoding);
        assert_eq!(Compression::Zstd, layer.data.compression);
        assert_eq!("abc", layer.data.payload);

        let layer = parse(r#"<layer><data encoding="hex" compression="lz4"/></layer>"#).unwrap();
        assert_eq!(Encoding::Other(String::from("hex")), layer.data.encoding);
        assert_eq!(Compression::Other(String::from("lz4")), layer.data.compression);
    }

    #[test]
    fn fractional_offset() {
        let layer = parse(r#"<layer offsetx="2.6" offsety="-1"/>"#).unwrap();
        assert_eq!((3, -1), (layer.offset_x, layer.offset_y));
        assert!(parse(r#"<layer offsetx="left"/>"#).is_err());
    }
}
