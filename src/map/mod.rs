//! In-memory model of a Tiled map and the decoding of its tile layers.
mod map;
mod tile;
mod tileset;
mod layer;
mod object;
mod decode;
mod parse;

pub use map::*;
pub use tile::*;
pub use tileset::*;
pub use layer::*;
pub use object::*;
pub use decode::*;
pub use parse::*;

use crate::HashMap;

/// Custom `<properties>` of an element, by name.
pub type Properties = HashMap<String, String>;
