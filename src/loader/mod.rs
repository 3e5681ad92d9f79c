mod loader;
mod source;
mod path;

pub use loader::*;
pub use source::*;
pub use path::*;
