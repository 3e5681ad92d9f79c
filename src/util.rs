use fxhash::FxHashMap;
use glam::UVec2;

/**
 * Hash map with a fast non-cryptographically secure hash function.
 */
pub type HashMap<K, V> = FxHashMap<K, V>;

/**
 * Hash map whose hash function is only suitable for small int types.
 * Outputs the original integer when used.
 */
pub type IntMap<K, V> = identity_hash::IntMap<K, V>;

/// Integer rectangle, in pixels.
#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub struct URect {
    pub origin: UVec2,
    pub size: UVec2,
}

impl URect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            origin: UVec2::new(x, y),
            size: UVec2::new(width, height),
        }
    }
}
