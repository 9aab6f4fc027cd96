pub mod geometry;
pub mod names;

pub use geometry::*;
pub use names::*;
