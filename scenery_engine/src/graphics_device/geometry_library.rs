/// GeometryLibrary trait and the primitive shape set

use std::fmt;
use crate::error::Result;

/// Primitive shapes provided by the geometry library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKind {
    Plane,
    Box,
    Cone,
    Cylinder,
    Prism,
    TaperedCylinder,
    Sphere,
    Torus,
}

impl ShapeKind {
    /// Every shape, in the order the geometry library loads them
    pub const ALL: [ShapeKind; 8] = [
        ShapeKind::Plane,
        ShapeKind::Box,
        ShapeKind::Cone,
        ShapeKind::Cylinder,
        ShapeKind::Prism,
        ShapeKind::TaperedCylinder,
        ShapeKind::Sphere,
        ShapeKind::Torus,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Plane => "plane",
            ShapeKind::Box => "box",
            ShapeKind::Cone => "cone",
            ShapeKind::Cylinder => "cylinder",
            ShapeKind::Prism => "prism",
            ShapeKind::TaperedCylinder => "tapered_cylinder",
            ShapeKind::Sphere => "sphere",
            ShapeKind::Torus => "torus",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mesh generation and drawing for primitive shapes
///
/// `load_mesh` is called once per shape during preparation; `draw_mesh`
/// consumes whatever uniform state is bound at the time of the call.
pub trait GeometryLibrary: Send + Sync {
    fn load_mesh(&mut self, shape: ShapeKind) -> Result<()>;
    fn draw_mesh(&mut self, shape: ShapeKind) -> Result<()>;
}
