use bitflags::bitflags;
use derive_more::*;
use smallvec::SmallVec;
use super::{Image, ObjectGroup, Properties};

/// Raw global tile id, as stored in layer data.
/// The top three bits carry orientation, the rest is the id looked up against tilesets.
#[derive(Copy, Clone, Eq, PartialEq, Default, Debug, Hash, Ord, PartialOrd, Display, From, Deref)]
#[display(fmt="{:#010x}", _0)]
pub struct Gid(pub u32);

impl Gid {

    /// Gid of a cell that contains no tile.
    pub const EMPTY: Self = Self(0);

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Id with the orientation bits cleared.
    /// Bit 28 is left as-is.
    pub fn masked(self) -> u32 {
        self.0 & !FlipFlags::all().bits()
    }

    pub fn flip(self) -> FlipFlags {
        FlipFlags::from_bits_truncate(self.0)
    }

    /// Packs an id and orientation back into a raw gid.
    pub fn new(id: u32, flip: FlipFlags) -> Self {
        Self((id & !FlipFlags::all().bits()) | flip.bits())
    }
}

bitflags! {
    /// Orientation bits of a [`Gid`], at their raw bit positions.
    #[derive(Copy, Clone, Eq, PartialEq, Default, Debug, Hash)]
    pub struct FlipFlags: u32 {
        const HORIZONTAL    = 0x80000000;
        const VERTICAL      = 0x40000000;
        const DIAGONAL      = 0x20000000;
    }
}

/// A resolved, non-empty cell of a tile layer.
/// Empty cells are represented as `None` wherever decoded tiles are stored.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct DecodedTile {
    /// ID of tile local to its tileset
    pub id: u32,
    /// Index of the owning tileset in [`super::TiledMap::tilesets`].
    pub tileset_index: usize,
    pub flip: FlipFlags,
}

impl DecodedTile {
    pub fn horizontal_flip(&self) -> bool {
        self.flip.contains(FlipFlags::HORIZONTAL)
    }

    pub fn vertical_flip(&self) -> bool {
        self.flip.contains(FlipFlags::VERTICAL)
    }

    pub fn diagonal_flip(&self) -> bool {
        self.flip.contains(FlipFlags::DIAGONAL)
    }
}

/// Per-tile data declared inside a tileset.
#[derive(Clone, Default, Debug)]
pub struct Tile {
    /// ID of tile local to its tileset
    pub id: u32,
    pub kind: String,
    pub terrain: String,
    pub probability: f32,
    pub properties: Properties,
    /// Set only for image collection tilesets.
    pub image: Option<Image>,
    pub object_groups: Vec<ObjectGroup>,
    pub animation: Animation,
}

#[derive(Clone, Default, Debug)]
pub struct Animation {
    pub frames: SmallVec<[Frame; 4]>,
}

#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub struct Frame {
    pub tile_id: u32,
    /// Milliseconds
    pub duration: u32,
}
