use serde::{Deserialize, Serialize};

/// Primitive shapes the toolbar can create
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeshType {
    Cube,
    Cylinder,
    Sphere,
    Icosahedron,
    Plane,
}

impl MeshType {
    pub const ALL: [MeshType; 5] = [MeshType::Cube, MeshType::Cylinder, MeshType::Sphere, MeshType::Icosahedron, MeshType::Plane];

    pub fn display_name(self) -> &'static str {
        match self {
            MeshType::Cube => "Cube",
            MeshType::Cylinder => "Cylinder",
            MeshType::Sphere => "Sphere",
            MeshType::Icosahedron => "Icosahedron",
            MeshType::Plane => "Plane",
        }
    }

    /// Parse a case-insensitive shape name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.display_name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for MeshType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: [f32; 3],
    /// Euler angles in degrees
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
        }
    }
}

impl Transform {
    pub fn translate(&mut self, delta: [f32; 3]) {
        for (p, d) in self.position.iter_mut().zip(delta) {
            *p += d;
        }
    }

    pub fn rotate(&mut self, delta: [f32; 3]) {
        for (r, d) in self.rotation.iter_mut().zip(delta) {
            *r = (*r + d).rem_euclid(360.0);
        }
    }

    pub fn scale_by(&mut self, factor: [f32; 3]) {
        for (s, f) in self.scale.iter_mut().zip(factor) {
            *s *= f;
        }
    }
}

/// Geometry is owned by the rendering engine; the document only tracks how an
/// item was built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Mesh {
    Primitive { kind: MeshType, steps: u32 },
    Merged { parts: Vec<Item> },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default)]
    pub selected: bool,
    pub mesh: Mesh,
    #[serde(default)]
    pub transform: Transform,
}

impl Item {
    pub fn primitive(kind: MeshType, steps: u32) -> Self {
        Self {
            name: kind.display_name().to_string(),
            selected: false,
            mesh: Mesh::Primitive { kind, steps },
            transform: Transform::default(),
        }
    }

    pub fn merged(parts: Vec<Item>) -> Self {
        Self {
            name: "Merged".to_string(),
            selected: false,
            mesh: Mesh::Merged { parts },
            transform: Transform::default(),
        }
    }
}
