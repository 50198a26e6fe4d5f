mod antialias;
mod compositor;
mod crop;

pub use antialias::soften_edges;
pub use compositor::composite;
pub use crop::{crop_to_content, BoundingBox};
