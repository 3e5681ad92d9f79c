use crate::{IntMap, URect};
use super::{Orientation, Properties, Tile, TmxParseError};

/// A `<tileset>` of a map, either declared inline or loaded from a `.tsx` file.
/// Owns the gid range `[first_gid, first_gid + tile_count)`.
#[derive(Clone, Default, Debug)]
pub struct Tileset {
    pub first_gid: u32,
    /// Path of the external `.tsx` file, if the tileset is not inline.
    pub source: Option<String>,
    pub name: String,
    pub class: String,
    pub tile_width: u32,
    pub tile_height: u32,
    pub spacing: u32,
    pub margin: u32,
    pub tile_count: u32,
    pub columns: u32,
    pub object_alignment: ObjectAlignment,
    pub tile_render_size: TileRenderSize,
    pub fill_mode: FillMode,
    pub tile_offset: Option<TileOffset>,
    pub grid: Option<Grid>,
    pub properties: Properties,
    pub image: Option<Image>,
    pub terrains: Vec<Terrain>,
    pub tiles: IntMap<u32, Tile>,
    pub wang_sets: Vec<WangSet>,
}

impl Tileset {

    /// True if the tileset only declares a `source` and its contents have not been loaded.
    pub fn is_unloaded(&self) -> bool {
        self.source.is_some() && self.tile_count == 0 && self.image.is_none() && self.tiles.is_empty()
    }

    /// Whether `gid` falls in this tileset's range.
    pub fn contains(&self, gid: u32) -> bool {
        gid >= self.first_gid && gid - self.first_gid < self.tile_count
    }

    /// Region of the tileset image that holds the tile with local id `id`.
    /// None if the id is out of range, if the tileset has no columns (image collections),
    /// or if the position does not fit in a `u32`.
    pub fn tile_rect(&self, id: u32) -> Option<URect> {
        if id >= self.tile_count || self.columns == 0 {
            return None;
        }
        let col = id % self.columns;
        let row = id / self.columns;
        let x = self.tile_width
            .checked_add(self.spacing)?
            .checked_mul(col)?
            .checked_add(self.margin)?;
        let y = self.tile_height
            .checked_add(self.spacing)?
            .checked_mul(row)?
            .checked_add(self.margin)?;
        Some(URect::new(x, y, self.tile_width, self.tile_height))
    }

    /// Extra data declared for a tile, if any.
    pub fn tile(&self, id: u32) -> Option<&Tile> {
        self.tiles.get(&id)
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub enum ObjectAlignment {
    #[default]
    Unspecified,
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl ObjectAlignment {
    pub fn parse(str: &str) -> Result<Self, TmxParseError> {
        match str {
            "unspecified" => Ok(Self::Unspecified),
            "topleft" => Ok(Self::TopLeft),
            "top" => Ok(Self::Top),
            "topright" => Ok(Self::TopRight),
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            "bottomleft" => Ok(Self::BottomLeft),
            "bottom" => Ok(Self::Bottom),
            "bottomright" => Ok(Self::BottomRight),
            _ => Err(TmxParseError::InvalidAttributeValue { value: String::from(str) })
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub enum FillMode {
    #[default]
    Stretch,
    PreserveAspectFit,
}

impl FillMode {
    pub fn parse(str: &str) -> Result<Self, TmxParseError> {
        match str {
            "stretch" => Ok(Self::Stretch),
            "preserve-aspect-fit" => Ok(Self::PreserveAspectFit),
            _ => Err(TmxParseError::InvalidAttributeValue { value: String::from(str) })
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub enum TileRenderSize {
    #[default]
    Tile,
    Grid,
}

impl TileRenderSize {
    pub fn parse(str: &str) -> Result<Self, TmxParseError> {
        match str {
            "tile" => Ok(Self::Tile),
            "grid" => Ok(Self::Grid),
            _ => Err(TmxParseError::InvalidAttributeValue { value: String::from(str) })
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub struct TileOffset { pub x: i32, pub y: i32 }

#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub struct Grid {
    pub orientation: Orientation,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Eq, PartialEq, Default, Debug)]
pub struct Image {
    pub format: String,
    pub source: String,
    pub trans: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Clone, Default, Debug)]
pub struct Terrain {
    pub name: String,
    /// -1 if no tile represents the terrain.
    pub tile_id: i32,
    pub properties: Properties,
}

#[derive(Clone, Default, Debug)]
pub struct WangSet {
    pub name: String,
    pub tile_id: i32,
    /// Tiled 1.5+ colors.
    pub colors: Vec<WangColor>,
    pub corners: Vec<WangColor>,
    pub edges: Vec<WangColor>,
    pub tiles: Vec<WangTile>,
}

#[derive(Clone, PartialEq, Default, Debug)]
pub struct WangColor {
    pub name: String,
    pub color: String,
    pub tile_id: i32,
    pub probability: f32,
}

#[derive(Clone, Eq, PartialEq, Default, Debug)]
pub struct WangTile {
    pub tile_id: u32,
    /// Kept as written: hex before Tiled 1.5, comma separated after.
    pub wang_id: String,
}

#[cfg(test)]
mod test {
    use crate::URect;
    use crate::map::Tileset;

    fn tileset() -> Tileset {
        Tileset {
            first_gid: 10,
            tile_width: 16,
            tile_height: 8,
            spacing: 2,
            margin: 1,
            tile_count: 6,
            columns: 3,
            ..Default::default()
        }
    }

    #[test]
    fn tile_rect() {
        let tileset = tileset();
        assert_eq!(Some(URect::new(1, 1, 16, 8)), tileset.tile_rect(0));
        assert_eq!(Some(URect::new(37, 1, 16, 8)), tileset.tile_rect(2));
        assert_eq!(Some(URect::new(19, 11, 16, 8)), tileset.tile_rect(4));
        assert_eq!(None, tileset.tile_rect(6));
    }

    #[test]
    fn tile_rect_overflow() {
        let tileset = Tileset {
            tile_width: u32::MAX,
            tile_height: 16,
            tile_count: 6,
            columns: 3,
            ..Default::default()
        };
        assert_eq!(Some(URect::new(0, 0, u32::MAX, 16)), tileset.tile_rect(0));
        assert_eq!(None, tileset.tile_rect(2));

        let tileset = Tileset { spacing: u32::MAX, ..tileset };
        assert_eq!(None, tileset.tile_rect(0));
    }

    #[test]
    fn contains() {
        let tileset = tileset();
        assert!(!tileset.contains(9));
        assert!(tileset.contains(10));
        assert!(tileset.contains(15));
        assert!(!tileset.contains(16));
    }
}
