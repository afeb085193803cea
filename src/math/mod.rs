pub mod color;
pub mod shape;

pub use color::{parse_color, BLUE};
pub use shape::{extrude, shape_bounds, Contour, FlatShape};
