mod capture;
mod curve_gpu;
mod framebuffer;
mod runtime;
mod shaders;

pub mod mesh_gpu;
pub mod shader_program;
pub mod texture_gpu;

pub use runtime::run;
