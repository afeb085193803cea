pub mod svg;

pub use svg::{load_svg_file, SvgPath};
