use roxmltree::{Document, Node};
use crate::map::{Animation, FillMode, Frame, Grid, Image, ObjectAlignment, ObjectGroup, Orientation, Terrain, Tile, TileOffset, TileRenderSize, Tileset, TmxParseError, WangColor, WangSet, WangTile};
use super::{parse_properties, resolve_path};

/// Parses a standalone `.tsx` document.
/// The returned tileset has a `first_gid` of 0; the referencing map supplies it.
pub fn parse_tileset(source: &str, parent_path: Option<&str>) -> Result<Tileset, TmxParseError> {
    let doc = Document::parse(source)?;
    Tileset::parse_doc(doc, parent_path)
}

impl Tileset {

    pub fn parse_doc(doc: Document, parent_path: Option<&str>) -> Result<Self, TmxParseError> {
        let root = doc.root_element();
        let tag_name = root.tag_name().name();
        if tag_name != "tileset" {
            return Err(TmxParseError::UnexpectedTagError { tag_name: String::from(tag_name) });
        }
        let mut tileset = Tileset::default();
        tileset.parse(root, parent_path)?;
        Ok(tileset)
    }

    pub(crate) fn parse(&mut self, tileset_node: Node, parent_path: Option<&str>) -> Result<(), TmxParseError> {

        // Parses attributes
        for attribute in tileset_node.attributes() {
            let name = attribute.name();
            let value = attribute.value();
            match name {
                "name" => self.name = String::from(value),
                "class" => self.class = String::from(value),
                "tilewidth" => self.tile_width = value.parse()?,
                "tileheight" => self.tile_height = value.parse()?,
                "spacing" => self.spacing = value.parse()?,
                "margin" => self.margin = value.parse()?,
                "tilecount" => self.tile_count = value.parse()?,
                "columns" => self.columns = value.parse()?,
                "objectalignment" => self.object_alignment = ObjectAlignment::parse(value)?,
                "tilerendersize" => self.tile_render_size = TileRenderSize::parse(value)?,
                "fillmode" => self.fill_mode = FillMode::parse(value)?,
                _ => {}
            }
        }

        // Parses children
        for child in tileset_node.children() {
            let tag = child.tag_name().name();
            match tag {
                "tileoffset" => self.tile_offset = Some(TileOffset {
                    x: child.attribute("x").unwrap_or("0").parse()?,
                    y: child.attribute("y").unwrap_or("0").parse()?,
                }),
                "grid" => self.grid = Some(parse_grid(child)?),
                "properties" => self.properties = parse_properties(child),
                "image" => self.image = Some(Image::parse(child, parent_path)?),
                "terraintypes" => {
                    for terrain in child.children().filter(|node| node.has_tag_name("terrain")) {
                        self.terrains.push(Terrain {
                            name: String::from(terrain.attribute("name").unwrap_or_default()),
                            tile_id: terrain.attribute("tile").unwrap_or("-1").parse()?,
                            properties: properties_child(terrain),
                        });
                    }
                },
                "tile" => {
                    let tile = Tile::parse(child, parent_path)?;
                    self.tiles.insert(tile.id, tile);
                },
                "wangsets" => {
                    for wang_set in child.children().filter(|node| node.has_tag_name("wangset")) {
                        self.wang_sets.push(WangSet::parse(wang_set)?);
                    }
                },
                _ => {}
            }
        }
        Ok(())
    }
}

fn parse_grid(grid_node: Node) -> Result<Grid, TmxParseError> {
    let mut grid = Grid::default();
    for attribute in grid_node.attributes() {
        let value = attribute.value();
        match attribute.name() {
            "orientation" => grid.orientation = Orientation::parse(value)?,
            "width" => grid.width = value.parse()?,
            "height" => grid.height = value.parse()?,
            _ => {}
        }
    }
    Ok(grid)
}

/// Properties of the first `<properties>` child, or none.
fn properties_child(node: Node) -> crate::map::Properties {
    node.children()
        .find(|child| child.has_tag_name("properties"))
        .map(parse_properties)
        .unwrap_or_default()
}

impl Image {
    pub fn parse(image_node: Node, parent_path: Option<&str>) -> Result<Image, TmxParseError> {
        let mut image = Image::default();
        for attribute in image_node.attributes() {
            let name = attribute.name();
            let value = attribute.value();
            match name {
                "format" => image.format = String::from(value),
                "source" => image.source = resolve_path(parent_path, value),
                "trans" => image.trans = Some(String::from(value)),
                "width" => image.width = Some(value.parse()?),
                "height" => image.height = Some(value.parse()?),
                _ => {}
            }
        }
        Ok(image)
    }
}

impl Tile {
    fn parse(tile_node: Node, parent_path: Option<&str>) -> Result<Tile, TmxParseError> {
        let mut tile = Tile::default();
        for attribute in tile_node.attributes() {
            let value = attribute.value();
            match attribute.name() {
                "id" => tile.id = value.parse()?,
                "type" | "class" => tile.kind = String::from(value),
                "terrain" => tile.terrain = String::from(value),
                "probability" => tile.probability = value.parse()?,
                _ => {}
            }
        }
        for child in tile_node.children() {
            match child.tag_name().name() {
                "properties" => tile.properties = parse_properties(child),
                "image" => tile.image = Some(Image::parse(child, parent_path)?),
                "objectgroup" => tile.object_groups.push(ObjectGroup::parse(child)?),
                "animation" => tile.animation = parse_animation(child)?,
                _ => {}
            }
        }
        Ok(tile)
    }
}

fn parse_animation(animation_node: Node) -> Result<Animation, TmxParseError> {
    let mut animation = Animation::default();
    for frame in animation_node.children().filter(|node| node.has_tag_name("frame")) {
        animation.frames.push(Frame {
            tile_id: frame.attribute("tileid").unwrap_or("0").parse()?,
            duration: frame.attribute("duration").unwrap_or("0").parse()?,
        });
    }
    Ok(animation)
}

impl WangSet {
    fn parse(wang_set_node: Node) -> Result<WangSet, TmxParseError> {
        let mut wang_set = WangSet {
            name: String::from(wang_set_node.attribute("name").unwrap_or_default()),
            tile_id: wang_set_node.attribute("tile").unwrap_or("-1").parse()?,
            ..Default::default()
        };
        for child in wang_set_node.children() {
            match child.tag_name().name() {
                "wangcornercolor" => wang_set.corners.push(WangColor::parse(child)?),
                "wangedgecolor" => wang_set.edges.push(WangColor::parse(child)?),
                "wangcolor" => wang_set.colors.push(WangColor::parse(child)?),
                "wangtile" => wang_set.tiles.push(WangTile {
                    tile_id: child.attribute("tileid").unwrap_or("0").parse()?,
                    wang_id: String::from(child.attribute("wangid").unwrap_or_default()),
                }),
                _ => {}
            }
        }
        Ok(wang_set)
    }
}

impl WangColor {
    fn parse(color_node: Node) -> Result<WangColor, TmxParseError> {
        Ok(WangColor {
            name: String::from(color_node.attribute("name").unwrap_or_default()),
            color: String::from(color_node.attribute("color").unwrap_or_default()),
            tile_id: color_node.attribute("tile").unwrap_or("-1").parse()?,
            probability: color_node.attribute("probability").unwrap_or("0").parse()?,
        })
    }
}

#[cfg(test)]
mod test {
    use crate::URect;
    use crate::map::{parse_tileset, Orientation, TmxParseError};

    const TILESET: &str =
r##"<?xml version="1.0" encoding="UTF-8"?>
<tileset version="1.2" name="dungeon" tilewidth="16" tileheight="16" spacing="1" margin="2" tilecount="8" columns="4" objectalignment="bottom">
 <tileoffset x="0" y="-8"/>
 <grid orientation="isometric" width="32" height="16"/>
 <image source="dungeon.png" trans="ff00ff" width="70" height="36"/>
 <terraintypes>
  <terrain name="Lava" tile="3"/>
 </terraintypes>
 <tile id="5" type="door" probability="0.25">
  <properties>
   <property name="locked" type="bool" value="true"/>
  </properties>
  <objectgroup draworder="index">
   <object id="1" x="0" y="0" width="16" height="16"/>
  </objectgroup>
  <animation>
   <frame tileid="5" duration="100"/>
   <frame tileid="6" duration="150"/>
  </animation>
 </tile>
 <wangsets>
  <wangset name="Paths" tile="-1">
   <wangedgecolor name="Dirt" color="#ff0000" tile="-1" probability="1"/>
   <wangtile tileid="2" wangid="0x10101010"/>
  </wangset>
  <wangset name="Walls" type="corner" tile="4">
   <wangcolor name="Stone" color="#808080" tile="4" probability="0.5"/>
   <wangtile tileid="4" wangid="0,1,0,1,0,1,0,1"/>
  </wangset>
 </wangsets>
</tileset>"##;

    #[test]
    fn parse() {
        let tileset = parse_tileset(TILESET, Some("tilesets")).unwrap();
        assert_eq!(0, tileset.first_gid);
        assert_eq!("dungeon", tileset.name);
        assert_eq!((16, 16, 1, 2), (tileset.tile_width, tileset.tile_height, tileset.spacing, tileset.margin));
        assert_eq!((8, 4), (tileset.tile_count, tileset.columns));
        assert_eq!(Some(-8), tileset.tile_offset.map(|offset| offset.y));
        assert_eq!(Some(Orientation::Isometric), tileset.grid.map(|grid| grid.orientation));

        let image = tileset.image.as_ref().unwrap();
        assert_eq!("tilesets/dungeon.png", image.source);
        assert_eq!(Some("ff00ff"), image.trans.as_deref());
        assert_eq!((Some(70), Some(36)), (image.width, image.height));

        assert_eq!("Lava", tileset.terrains[0].name);
        assert_eq!(3, tileset.terrains[0].tile_id);

        let door = tileset.tile(5).unwrap();
        assert_eq!("door", door.kind);
        assert_eq!(0.25, door.probability);
        assert_eq!(Some("true"), door.properties.get("locked").map(String::as_str));
        assert_eq!(1, door.object_groups[0].objects.len());
        let frames: Vec<(u32, u32)> = door.animation.frames.iter().map(|f| (f.tile_id, f.duration)).collect();
        assert_eq!(vec![(5, 100), (6, 150)], frames);
        assert_eq!(Some(URect::new(19, 19, 16, 16)), tileset.tile_rect(5));

        let paths = &tileset.wang_sets[0];
        assert_eq!("Paths", paths.name);
        assert_eq!(-1, paths.tile_id);
        assert_eq!("Dirt", paths.edges[0].name);
        assert_eq!("0x10101010", paths.tiles[0].wang_id);
        let walls = &tileset.wang_sets[1];
        assert_eq!(4, walls.tile_id);
        assert_eq!(0.5, walls.colors[0].probability);
        assert_eq!("0,1,0,1,0,1,0,1", walls.tiles[0].wang_id);
    }

    #[test]
    fn invalid_alignment() {
        let result = parse_tileset(r#"<tileset objectalignment="middle"/>"#, None);
        assert!(matches!(result, Err(TmxParseError::InvalidAttributeValue { value }) if value == "middle"));
    }
}
