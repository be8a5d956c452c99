/// Objwire Core Library - Mesh loading and wireframe projection
///
/// This library provides the stateful core of a wireframe viewer: parsing
/// Wavefront OBJ geometry into an indexed mesh, Euler rotation transforms,
/// perspective projection with change tracking, and draw-command emission
/// onto an abstract drawing surface supplied by the host.

pub mod error;
pub mod geometry;
pub mod obj;
pub mod projection;
pub mod surface;
pub mod transform;
pub mod view;

// Re-export commonly used types
pub use error::ParseError;
pub use geometry::{Face, Mesh};
pub use obj::parse_obj;
pub use projection::Projector;
pub use surface::{Colour, Style, Surface};
pub use transform::Rotation;
pub use view::{Direction, ViewState};
