use rayon::prelude::*;
use tracing::instrument;
use super::{DecodeError, DecodedLayer, DecodedTile, Gid, Layer, ObjectGroup, Properties, Tileset, TmxParseError};

/// A `<map>` document, as written.
/// Tile layer data stays encoded until [`TiledMap::decoded_layers`] is called.
#[derive(Clone, Debug)]
pub struct TiledMap {
    pub version: String,
    pub orientation: Orientation,
    pub render_order: RenderOrder,
    pub width: u32,
    pub height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub infinite: bool,
    pub properties: Properties,
    /// Sorted by `first_gid`, ascending.
    pub tilesets: Vec<Tileset>,
    pub layers: Vec<Layer>,
    pub object_groups: Vec<ObjectGroup>,
}

impl Default for TiledMap {
    fn default() -> Self {
        Self {
            version: String::from("1.0"),
            orientation: Default::default(),
            render_order: Default::default(),
            width: Default::default(),
            height: Default::default(),
            tile_width: Default::default(),
            tile_height: Default::default(),
            infinite: Default::default(),
            properties: Default::default(),
            tilesets: Default::default(),
            layers: Default::default(),
            object_groups: Default::default(),
        }
    }
}

impl TiledMap {

    /// Resolves a raw gid to its tileset and local id.
    /// Gid 0 resolves to `None`.
    /// Tilesets are scanned from last to first, so they must be sorted by `first_gid`.
    pub fn decode_gid(&self, gid: Gid) -> Result<Option<DecodedTile>, DecodeError> {
        if gid.is_empty() {
            return Ok(None);
        }
        let masked = gid.masked();
        let (tileset_index, tileset) = self.tilesets
            .iter()
            .enumerate()
            .rev()
            .find(|(_, tileset)| tileset.first_gid <= masked)
            .ok_or(DecodeError::InvalidGid { gid })?;
        Ok(Some(DecodedTile {
            id: masked - tileset.first_gid,
            tileset_index,
            flip: gid.flip(),
        }))
    }

    /// Decodes a single layer and classifies it.
    pub fn decode_layer(&self, layer: &Layer) -> Result<DecodedLayer, DecodeError> {
        let tiles = layer
            .decode()?
            .into_iter()
            .map(|gid| self.decode_gid(gid))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(DecodedLayer::new(layer.width, layer.height, tiles))
    }

    /// Decodes every layer in document order.
    /// Fails with the first error encountered.
    #[instrument(skip_all, fields(layers = self.layers.len()))]
    pub fn decoded_layers(&self) -> Result<Vec<DecodedLayer>, DecodeError> {
        self.layers
            .iter()
            .map(|layer| self.decode_layer(layer))
            .collect()
    }

    /// Same as [`Self::decoded_layers`], with one task per layer on the rayon pool.
    /// The error returned is the one of the first failing layer in document order.
    #[instrument(skip_all, fields(layers = self.layers.len()))]
    pub fn par_decoded_layers(&self) -> Result<Vec<DecodedLayer>, DecodeError> {
        let results: Vec<Result<DecodedLayer, DecodeError>> = self.layers
            .par_iter()
            .map(|layer| self.decode_layer(layer))
            .collect();
        results.into_iter().collect()
    }

    /// Tileset a decoded tile belongs to.
    pub fn tileset_of(&self, tile: &DecodedTile) -> Option<&Tileset> {
        self.tilesets.get(tile.tileset_index)
    }

    /// Fails if a tileset starts before the one preceding it.
    pub fn check_tileset_order(&self) -> Result<(), TmxParseError> {
        for pair in self.tilesets.windows(2) {
            let (previous, next) = (&pair[0], &pair[1]);
            if next.first_gid < previous.first_gid {
                return Err(TmxParseError::UnorderedTilesets {
                    previous: previous.first_gid,
                    first_gid: next.first_gid,
                });
            }
        }
        Ok(())
    }
}

/// See: https://doc.mapeditor.org/en/stable/reference/tmx-map-format/#map
#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub enum Orientation {
    #[default]
    Orthogonal,
    Isometric,
    Staggered,
    Hexagonal,
}

impl Orientation {
    pub fn parse(str: &str) -> Result<Self, TmxParseError> {
        match str {
            "orthogonal" => Ok(Self::Orthogonal),
            "isometric" => Ok(Self::Isometric),
            "staggered" => Ok(Self::Staggered),
            "hexagonal" => Ok(Self::Hexagonal),
            _ => Err(TmxParseError::InvalidAttributeValue { value: String::from(str) })
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub enum RenderOrder {
    #[default]
    RightDown,
    RightUp,
    LeftDown,
    LeftUp,
}

impl RenderOrder {
    pub fn parse(str: &str) -> Result<Self, TmxParseError> {
        match str {
            "right-down" => Ok(Self::RightDown),
            "right-up" => Ok(Self::RightUp),
            "left-down" => Ok(Self::LeftDown),
            "left-up" => Ok(Self::LeftUp),
            _ => Err(TmxParseError::InvalidAttributeValue { value: String::from(str) })
        }
    }
}
