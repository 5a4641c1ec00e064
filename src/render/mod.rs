mod error;
mod map;

pub use error::RenderError;
pub use map::{MapRenderer, MapTemplate};
