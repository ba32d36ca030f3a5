// Engine module - cage geometry, subdivision, depth-sorted painting and the
// viewer glue around it. Everything except overlay/input is window-free.

pub mod camera;
pub mod color;
pub mod config;
pub mod entities;
pub mod error;
pub mod grid;
pub mod input;
pub mod mesh;
pub mod overlay;
pub mod point;
pub mod scene;
pub mod shapes;
pub mod subdivide;
pub mod surface;
pub mod vector;
pub mod viewer;
pub mod weights;
pub mod wireframe;

// Re-export commonly used items
pub use camera::{Axis, Camera};
pub use color::Color;
pub use config::{GridConfig, MeshStyle, ViewerConfig};
pub use error::MeshError;
pub use input::{InputEvent, InputState};
pub use mesh::{EdgeId, Shape, Topology};
pub use overlay::{EguiSurface, Overlay};
pub use scene::{Layer, Scene, Visibility};
pub use shapes::ShapeKind;
pub use surface::{DrawCall, RecordingSurface, RenderSurface};
pub use viewer::{Action, Viewer};
pub use weights::WeightMap;
pub use wireframe::{Part, Wireframe};
