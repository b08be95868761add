//! Built-in meshes.
//!
//! The viewer draws exactly one hard-coded pyramid. Both variants keep their
//! original vertex data so rendered output stays comparable; which one is used
//! is chosen by [`MeshKind`] in the configuration, never loaded from disk.

use bytemuck::{Pod, Zeroable};
use pyramid_common::MeshKind;

/// Vertex layout shared with the shaders: position then RGB color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ColorVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

const fn v(position: [f32; 3], color: [f32; 3]) -> ColorVertex {
    ColorVertex { position, color }
}

/// Errors from mesh validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetError {
    #[error("mesh `{0}` has no vertices")]
    Empty(&'static str),
    #[error("mesh `{mesh}`: index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        mesh: &'static str,
        index: u16,
        vertex_count: usize,
    },
    #[error("mesh `{mesh}`: {count} elements is not a whole number of triangles")]
    NotTriangles { mesh: &'static str, count: usize },
}

/// A triangle-list mesh, drawn either directly or through an index buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub name: &'static str,
    pub vertices: Vec<ColorVertex>,
    pub indices: Option<Vec<u16>>,
}

impl Mesh {
    pub fn builtin(kind: MeshKind) -> Self {
        match kind {
            MeshKind::IndexedSquarePyramid => Self::indexed_square_pyramid(),
            MeshKind::FlatShadedPyramid => Self::flat_shaded_pyramid(),
        }
    }

    /// Square base on z=0, apex at (0, 0, 1). Base corners are red, green,
    /// blue and yellow; the apex is orange.
    pub fn indexed_square_pyramid() -> Self {
        #[rustfmt::skip]
        let vertices = vec![
            v([-0.5, -0.5, 0.0], [1.0, 0.0, 0.0]),
            v([ 0.5, -0.5, 0.0], [0.0, 1.0, 0.0]),
            v([ 0.5,  0.5, 0.0], [0.0, 0.0, 1.0]),
            v([-0.5,  0.5, 0.0], [1.0, 1.0, 0.0]),
            v([ 0.0,  0.0, 1.0], [1.0, 0.5, 0.2]),
        ];
        #[rustfmt::skip]
        let indices = vec![
            0, 1, 2,  2, 3, 0, // base
            0, 1, 4,           // front
            1, 2, 4,           // right
            2, 3, 4,           // back
            3, 0, 4,           // left
        ];
        Self {
            name: "indexed_square_pyramid",
            vertices,
            indices: Some(indices),
        }
    }

    /// Square base on y=0, apex at (0, 0.8, 0). Each face has its own color
    /// and the apex is grey, so there is no vertex sharing.
    pub fn flat_shaded_pyramid() -> Self {
        const APEX: [f32; 3] = [0.0, 0.8, 0.0];
        const GREY: [f32; 3] = [0.5, 0.5, 0.5];
        #[rustfmt::skip]
        let vertices = vec![
            // base, first half
            v([-0.5, 0.0, -0.5], [1.0, 0.0, 0.0]),
            v([-0.5, 0.0,  0.5], [1.0, 0.0, 0.0]),
            v([ 0.5, 0.0, -0.5], [1.0, 0.0, 0.0]),
            // base, second half
            v([-0.5, 0.0,  0.5], [0.0, 1.0, 0.0]),
            v([ 0.5, 0.0, -0.5], [0.0, 1.0, 0.0]),
            v([ 0.5, 0.0,  0.5], [0.0, 1.0, 0.0]),
            // -X side
            v([-0.5, 0.0, -0.5], [0.0, 0.0, 1.0]),
            v([-0.5, 0.0,  0.5], [0.0, 0.0, 1.0]),
            v(APEX, GREY),
            // +Z side
            v([-0.5, 0.0,  0.5], [1.0, 1.0, 0.0]),
            v([ 0.5, 0.0,  0.5], [1.0, 1.0, 0.0]),
            v(APEX, GREY),
            // +X side
            v([ 0.5, 0.0,  0.5], [0.0, 1.0, 1.0]),
            v([ 0.5, 0.0, -0.5], [0.0, 1.0, 1.0]),
            v(APEX, GREY),
            // -Z side
            v([ 0.5, 0.0, -0.5], [1.0, 0.0, 1.0]),
            v([-0.5, 0.0, -0.5], [1.0, 0.0, 1.0]),
            v(APEX, GREY),
        ];
        Self {
            name: "flat_shaded_pyramid",
            vertices,
            indices: None,
        }
    }

    pub fn is_indexed(&self) -> bool {
        self.indices.is_some()
    }

    /// Number of vertices the draw call consumes: the index count for an
    /// indexed mesh, the vertex count otherwise.
    pub fn element_count(&self) -> u32 {
        match &self.indices {
            Some(indices) => indices.len() as u32,
            None => self.vertices.len() as u32,
        }
    }

    pub fn validate(&self) -> Result<(), AssetError> {
        if self.vertices.is_empty() {
            return Err(AssetError::Empty(self.name));
        }
        let count = self.element_count() as usize;
        if count % 3 != 0 {
            return Err(AssetError::NotTriangles {
                mesh: self.name,
                count,
            });
        }
        if let Some(indices) = &self.indices {
            if let Some(&index) = indices
                .iter()
                .find(|&&i| i as usize >= self.vertices.len())
            {
                return Err(AssetError::IndexOutOfRange {
                    mesh: self.name,
                    index,
                    vertex_count: self.vertices.len(),
                });
            }
        }
        tracing::debug!(
            "mesh `{}` ok: {} vertices, {} elements",
            self.name,
            self.vertices.len(),
            count
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_validate() {
        Mesh::builtin(MeshKind::IndexedSquarePyramid).validate().unwrap();
        Mesh::builtin(MeshKind::FlatShadedPyramid).validate().unwrap();
    }

    #[test]
    fn indexed_pyramid_shape() {
        let mesh = Mesh::indexed_square_pyramid();
        assert!(mesh.is_indexed());
        assert_eq!(mesh.vertices.len(), 5);
        assert_eq!(mesh.element_count(), 18);
        assert_eq!(mesh.vertices[4].position, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn flat_pyramid_shape() {
        let mesh = Mesh::flat_shaded_pyramid();
        assert!(!mesh.is_indexed());
        assert_eq!(mesh.element_count(), 18);
        let apex_count = mesh
            .vertices
            .iter()
            .filter(|v| v.position == [0.0, 0.8, 0.0])
            .count();
        assert_eq!(apex_count, 4);
    }

    #[test]
    fn vertex_layout_is_six_floats() {
        assert_eq!(std::mem::size_of::<ColorVertex>(), 24);
        let mesh = Mesh::indexed_square_pyramid();
        let bytes: &[u8] = bytemuck::cast_slice(&mesh.vertices);
        assert_eq!(bytes.len(), 5 * 24);
    }

    #[test]
    fn rejects_out_of_range_index() {
        let mut mesh = Mesh::indexed_square_pyramid();
        if let Some(indices) = &mut mesh.indices {
            indices[0] = 9;
        }
        assert_eq!(
            mesh.validate(),
            Err(AssetError::IndexOutOfRange {
                mesh: "indexed_square_pyramid",
                index: 9,
                vertex_count: 5
            })
        );
    }

    #[test]
    fn rejects_partial_triangle() {
        let mut mesh = Mesh::flat_shaded_pyramid();
        mesh.vertices.pop();
        assert!(matches!(
            mesh.validate(),
            Err(AssetError::NotTriangles { count: 17, .. })
        ));
    }

    #[test]
    fn rejects_empty() {
        let mesh = Mesh {
            name: "empty",
            vertices: Vec::new(),
            indices: None,
        };
        assert_eq!(mesh.validate(), Err(AssetError::Empty("empty")));
    }
}
