//! Decoding of Tiled `.tmx` maps: tile layers, tilesets and object groups.
pub mod map;
mod loader;
mod config;
mod util;

pub use loader::*;
pub use config::*;
pub use util::*;
