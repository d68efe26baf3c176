mod curve;
mod editor;

pub use curve::NurbsCurve;
pub use editor::CurveEditor;
