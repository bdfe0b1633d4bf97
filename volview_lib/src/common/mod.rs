mod bound_box;
mod input;
mod value_range;
mod viewport;

pub use bound_box::{BoundBox, BoundBoxIterator, CUBE_EDGES};
pub use input::{InputEvent, PointerButton};
pub use value_range::ValueRange;
pub use viewport::Viewport;
