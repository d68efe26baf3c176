#[macro_use]
mod macros;

pub mod app;
pub mod camera;
pub mod loaders;
pub mod math;
pub mod nurbs;
pub mod renderer;
pub mod scene;
