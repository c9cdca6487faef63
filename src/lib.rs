//! A small 2D vector scene: named primitives, nestable groups, z-ordered
//! hit testing and exact intersection queries.

pub mod bbox;
pub mod common_traits;
pub mod config;
pub mod error;
pub mod geom;
mod listing;
pub mod point;
pub mod scene;
pub mod shapes;

pub use bbox::BoundingBox;
pub use config::SceneConfig;
pub use error::{Result, SceneError};
pub use point::Point;
pub use scene::{Scene, ShapeId, ShapeRef, ZOrder};
pub use shapes::{Circle, Line, Primitive, Rectangle, Square};
