mod bounds;
mod lights;
mod model;
mod solids;

pub use bounds::BoundingBox;
pub use lights::{AmbientLight, DirectionalLight, SpotLight};
pub use model::{build_scene_model, SceneModel};
pub use solids::{default_solids, Solid, SolidKind};
