use roxmltree::{Document, Node};
use crate::map::{Layer, ObjectGroup, Orientation, RenderOrder, TiledMap, Tileset, TmxParseError};
use super::{parse_bool, parse_properties, resolve_path};

/// Parses a `.tmx` document.
/// External tilesets are recorded with their `source` and left unloaded.
pub fn parse_map(source: &str, parent_path: Option<&str>) -> Result<TiledMap, TmxParseError> {
    let doc = Document::parse(source)?;
    TiledMap::parse_doc(doc, parent_path)
}

impl TiledMap {

    pub fn parse_doc(map_doc: Document, parent_path: Option<&str>) -> Result<Self, TmxParseError> {
        let root = map_doc.root_element();
        let tag_name = root.tag_name().name();
        if tag_name != "map" {
            return Err(TmxParseError::UnexpectedTagError { tag_name: String::from(tag_name) });
        }
        let mut map = Self::default();
        map.parse(root, parent_path)?;
        map.check_tileset_order()?;
        Ok(map)
    }

    fn parse(&mut self, map_node: Node, parent_path: Option<&str>) -> Result<(), TmxParseError> {

        // Parses map attributes
        for attribute in map_node.attributes() {
            let name = attribute.name();
            let value = attribute.value();
            match name {
                "version" => self.version = String::from(value),
                "orientation" => self.orientation = Orientation::parse(value)?,
                "renderorder" => self.render_order = RenderOrder::parse(value)?,
                "width" => self.width = value.parse()?,
                "height" => self.height = value.parse()?,
                "tilewidth" => self.tile_width = value.parse()?,
                "tileheight" => self.tile_height = value.parse()?,
                "infinite" => self.infinite = parse_bool(value)?,
                _ => {}
            }
        }

        // Traverses children
        for node in map_node.children() {
            let tag_name = node.tag_name().name();
            match tag_name {
                "properties" => self.properties = parse_properties(node),
                "tileset" => self.tilesets.push(Tileset::parse_entry(node, parent_path)?),
                "layer" => self.layers.push(Layer::parse(node)?),
                "objectgroup" => self.object_groups.push(ObjectGroup::parse(node)?),
                _ => {},
            }
        }

        Ok(())
    }
}

impl Tileset {

    /// Parses a `<tileset>` inside a map.
    /// Either holds the tileset, or references it in another file.
    fn parse_entry(entry_node: Node, parent_path: Option<&str>) -> Result<Self, TmxParseError> {
        let first_gid: u32 = entry_node
            .attribute("firstgid")
            .ok_or(TmxParseError::MissingAttributeError { name: String::from("firstgid") })?
            .parse()?;
        let mut tileset = match entry_node.attribute("source") {
            Some(source) => Tileset {
                source: Some(resolve_path(parent_path, source)),
                ..Default::default()
            },
            None => {
                let mut tileset = Tileset::default();
                tileset.parse(entry_node, parent_path)?;
                tileset
            }
        };
        tileset.first_gid = first_gid;
        Ok(tileset)
    }
}

#[cfg(test)]
mod test {
    use crate::map::{parse_map, Compression, Encoding, Orientation, RenderOrder, TmxParseError};

    const MAP: &str =
r##"<?xml version="1.0" encoding="UTF-8"?>
<map version="1.10" orientation="isometric" renderorder="left-up" width="2" height="1" tilewidth="16" tileheight="8" infinite="0">
 <properties>
  <property name="music" value="town.ogg"/>
 </properties>
 <tileset firstgid="1" name="ground" tilewidth="16" tileheight="8" tilecount="4" columns="2">
  <image source="ground.png" width="32" height="16"/>
 </tileset>
 <tileset firstgid="5" source="props.tsx"/>
 <layer id="1" name="Ground" width="2" height="1" opacity="0.5" visible="0" offsetx="3" offsety="-4">
  <data encoding="base64" compression="zlib">
   eJxjZGBgYAJiAAAYAAQ=
  </data>
 </layer>
 <objectgroup id="2" name="Collision" color="#ff0000">
  <object id="1" name="wall" type="solid" x="1.5" y="2" width="10" height="4">
   <polygon points="0,0 10,0 10,4"/>
  </object>
  <object id="2" gid="2147483653" x="0" y="0" visible="0"/>
 </objectgroup>
</map>"##;

    #[test]
    fn parse() {
        let map = parse_map(MAP, Some("maps")).unwrap();
        assert_eq!("1.10", map.version);
        assert_eq!(Orientation::Isometric, map.orientation);
        assert_eq!(RenderOrder::LeftUp, map.render_order);
        assert_eq!((2, 1, 16, 8), (map.width, map.height, map.tile_width, map.tile_height));
        assert!(!map.infinite);
        assert_eq!(Some("town.ogg"), map.properties.get("music").map(String::as_str));

        assert_eq!(2, map.tilesets.len());
        let ground = &map.tilesets[0];
        assert_eq!(1, ground.first_gid);
        assert_eq!("ground", ground.name);
        assert_eq!(4, ground.tile_count);
        assert_eq!(Some("maps/ground.png"), ground.image.as_ref().map(|image| image.source.as_str()));
        let props = &map.tilesets[1];
        assert_eq!(5, props.first_gid);
        assert_eq!(Some("maps/props.tsx"), props.source.as_deref());
        assert!(props.is_unloaded());

        let layer = &map.layers[0];
        assert_eq!("Ground", layer.name);
        assert_eq!(0.5, layer.opacity);
        assert!(!layer.visible);
        assert_eq!((3, -4), (layer.offset_x, layer.offset_y));
        assert_eq!(Encoding::Base64, layer.data.encoding);
        assert_eq!(Compression::Zlib, layer.data.compression);
        assert_eq!("eJxjZGBgYAJiAAAYAAQ=", layer.data.payload.trim());

        let group = &map.object_groups[0];
        assert_eq!("Collision", group.name);
        assert_eq!("#ff0000", group.color);
        assert_eq!(1.0, group.opacity);
        assert!(group.visible);
        let wall = &group.objects[0];
        assert_eq!(("wall", "solid"), (wall.name.as_str(), wall.kind.as_str()));
        assert_eq!((1.5, 2.0, 10.0, 4.0), (wall.x, wall.y, wall.width, wall.height));
        assert_eq!("0,0 10,0 10,4", wall.polygons[0].points);
        assert!(wall.visible);
        let tile_object = &group.objects[1];
        assert_eq!(0x80000005, tile_object.gid);
        assert!(!tile_object.visible);
    }

    #[test]
    fn missing_firstgid() {
        let result = parse_map(r#"<map><tileset name="x"/></map>"#, None);
        assert!(matches!(result, Err(TmxParseError::MissingAttributeError { name }) if name == "firstgid"));
    }

    #[test]
    fn unordered_tilesets() {
        let result = parse_map(r#"<map><tileset firstgid="10" source="a.tsx"/><tileset firstgid="1" source="b.tsx"/></map>"#, None);
        assert!(matches!(result, Err(TmxParseError::UnorderedTilesets { previous: 10, first_gid: 1 })));
    }

    #[test]
    fn wrong_root() {
        let result = parse_map(r#"<tileset firstgid="1"/>"#, None);
        assert!(matches!(result, Err(TmxParseError::UnexpectedTagError { tag_name }) if tag_name == "tileset"));
    }

    #[test]
    fn bad_attribute() {
        assert!(matches!(parse_map(r#"<map width="wide"/>"#, None), Err(TmxParseError::ParseIntError(_))));
        assert!(matches!(parse_map(r#"<map orientation="round"/>"#, None), Err(TmxParseError::InvalidAttributeValue { .. })));
        assert!(matches!(parse_map(r#"<map"#, None), Err(TmxParseError::XmlError(_))));
    }
}
