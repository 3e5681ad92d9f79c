use derive_more::*;
use super::{DecodedTile, Properties};

/// A `<layer>` as written in the document, with its tile data still encoded.
#[derive(Clone, Debug)]
pub struct Layer {
    pub id: u32,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub opacity: f32,
    pub visible: bool,
    pub offset_x: i32,
    pub offset_y: i32,
    pub properties: Properties,
    pub data: Data,
}

impl Default for Layer {
    fn default() -> Self {
        Self {
            id: Default::default(),
            name: Default::default(),
            width: Default::default(),
            height: Default::default(),
            opacity: 1.0,
            visible: true,
            offset_x: Default::default(),
            offset_y: Default::default(),
            properties: Default::default(),
            data: Default::default(),
        }
    }
}

/// Contents of a layer's `<data>` element.
#[derive(Clone, Eq, PartialEq, Default, Debug)]
pub struct Data {
    pub encoding: Encoding,
    pub compression: Compression,
    /// Text content of the element, untouched.
    pub payload: String,
}

/// Text encoding of layer data.
#[derive(Clone, Eq, PartialEq, Default, Debug, Display)]
pub enum Encoding {
    /// No `encoding` attribute: one `<tile>` element per cell.
    #[default]
    #[display(fmt="xml")]
    Xml,
    #[display(fmt="csv")]
    Csv,
    #[display(fmt="base64")]
    Base64,
    #[display(fmt="{}", _0)]
    Other(String),
}

impl Encoding {
    pub fn parse(str: &str) -> Self {
        match str {
            "" => Self::Xml,
            "csv" => Self::Csv,
            "base64" => Self::Base64,
            _ => Self::Other(String::from(str)),
        }
    }
}

/// Compression applied to layer data before encoding.
#[derive(Clone, Eq, PartialEq, Default, Debug, Display)]
pub enum Compression {
    #[default]
    #[display(fmt="uncompressed")]
    None,
    #[display(fmt="gzip")]
    Gzip,
    #[display(fmt="zlib")]
    Zlib,
    #[display(fmt="zstd")]
    Zstd,
    #[display(fmt="{}", _0)]
    Other(String),
}

impl Compression {
    pub fn parse(str: &str) -> Self {
        match str {
            "" => Self::None,
            "gzip" => Self::Gzip,
            "zlib" => Self::Zlib,
            "zstd" => Self::Zstd,
            _ => Self::Other(String::from(str)),
        }
    }
}

/// Tile layer after its data was decoded and every gid resolved against the map's tilesets.
/// Built once, never mutated.
#[derive(Clone, Eq, PartialEq, Default, Debug)]
pub struct DecodedLayer {
    pub width: u32,
    pub height: u32,
    /// Tile (x, y) is at `tiles[y * width + x]`. `None` is an empty cell.
    pub tiles: Vec<Option<DecodedTile>>,
    /// Only set when every non-empty tile uses the same tileset.
    pub tileset_index: Option<usize>,
    /// Set when every tile is empty.
    pub empty: bool,
    /// Set when non-empty tiles come from more than one tileset.
    pub multi_tileset: bool,
}

impl DecodedLayer {

    /// Wraps resolved tiles and attaches their classification.
    pub fn new(width: u32, height: u32, tiles: Vec<Option<DecodedTile>>) -> Self {
        let class = LayerClass::of(&tiles);
        Self {
            width,
            height,
            tiles,
            tileset_index: class.tileset_index,
            empty: class.empty,
            multi_tileset: class.multi_tileset,
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Option<&DecodedTile> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.tiles.get(idx)?.as_ref()
    }

    /// Non-empty tiles and their coordinates, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, &DecodedTile)> {
        let width = self.width.max(1) as usize;
        self.tiles
            .iter()
            .enumerate()
            .filter_map(move |(idx, tile)| {
                let tile = tile.as_ref()?;
                Some(((idx % width) as u32, (idx / width) as u32, tile))
            })
    }
}

/// Which tilesets a layer's tiles reference.
#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub struct LayerClass {
    pub tileset_index: Option<usize>,
    pub empty: bool,
    pub multi_tileset: bool,
}

impl LayerClass {

    /// Classifies a layer, stopping as soon as a second tileset shows up.
    pub fn of(tiles: &[Option<DecodedTile>]) -> Self {
        let mut tileset_index = None;
        for tile in tiles.iter().flatten() {
            match tileset_index {
                None => tileset_index = Some(tile.tileset_index),
                Some(index) if index != tile.tileset_index => {
                    return Self { tileset_index: None, empty: false, multi_tileset: true };
                },
                Some(_) => {},
            }
        }
        match tileset_index {
            None => Self { tileset_index: None, empty: true, multi_tileset: false },
            Some(_) => Self { tileset_index, empty: false, multi_tileset: false },
        }
    }
}
