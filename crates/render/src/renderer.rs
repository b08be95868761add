use crate::uniforms::UniformSet;
use pyramid_assets::{AssetError, Mesh};
use pyramid_common::UniformLayout;

/// Errors raised by render back ends.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("missing uniform `{0}`")]
    MissingUniform(&'static str),
    #[error("invalid mesh: {0}")]
    Mesh(#[from] AssetError),
    #[error("indexed draw requested but no index buffer was uploaded")]
    MissingIndexBuffer,
    #[error("surface error: {0}")]
    Surface(String),
}

/// The fixed draw call issued each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Draw {
    /// Triangle list through the index buffer.
    Indexed { index_count: u32 },
    /// Triangle list straight from the vertex buffer.
    Arrays { vertex_count: u32 },
}

impl Draw {
    pub fn for_mesh(mesh: &Mesh) -> Self {
        if mesh.is_indexed() {
            Draw::Indexed {
                index_count: mesh.element_count(),
            }
        } else {
            Draw::Arrays {
                vertex_count: mesh.element_count(),
            }
        }
    }

    pub fn element_count(&self) -> u32 {
        match *self {
            Draw::Indexed { index_count } => index_count,
            Draw::Arrays { vertex_count } => vertex_count,
        }
    }
}

/// Renderer-agnostic interface. All back ends implement this trait.
///
/// A renderer binds the uniform map and issues one draw call. It never sees
/// or mutates the transform state.
pub trait Renderer {
    /// What a rendered frame produces.
    type Output;
    type Error;

    fn render(&mut self, uniforms: &UniformSet, draw: &Draw) -> Result<Self::Output, Self::Error>;
}

/// Text renderer for headless runs and tests.
///
/// Produces a readable dump of the bound matrices and the draw call.
#[derive(Debug)]
pub struct DebugTextRenderer {
    layout: UniformLayout,
    frames: u64,
}

impl DebugTextRenderer {
    pub fn new(layout: UniformLayout) -> Self {
        Self { layout, frames: 0 }
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;
    type Error = RenderError;

    fn render(&mut self, uniforms: &UniformSet, draw: &Draw) -> Result<String, RenderError> {
        let columns = uniforms.ordered_columns(self.layout)?;
        self.frames += 1;

        let mut out = String::new();
        let call = match draw {
            Draw::Indexed { index_count } => format!("draw_indexed({index_count})"),
            Draw::Arrays { vertex_count } => format!("draw({vertex_count})"),
        };
        out.push_str(&format!("=== Frame {} {} ===\n", self.frames, call));
        for (name, cols) in self.layout.names().iter().zip(&columns) {
            out.push_str(&format!("{name}:\n"));
            // Print row by row; storage is column-major.
            for row in 0..4 {
                out.push_str(&format!(
                    "  [{:>9.4} {:>9.4} {:>9.4} {:>9.4}]\n",
                    cols[0][row], cols[1][row], cols[2][row], cols[3][row]
                ));
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Vec3};

    #[test]
    fn draw_for_builtin_meshes() {
        assert_eq!(
            Draw::for_mesh(&Mesh::indexed_square_pyramid()),
            Draw::Indexed { index_count: 18 }
        );
        assert_eq!(
            Draw::for_mesh(&Mesh::flat_shaded_pyramid()),
            Draw::Arrays { vertex_count: 18 }
        );
    }

    #[test]
    fn debug_renderer_prints_rows() {
        let mut r = DebugTextRenderer::new(UniformLayout::Combined);
        let set = UniformSet::new(
            UniformLayout::Combined,
            vec![("transform", Mat4::from_translation(Vec3::new(7.0, 0.0, 0.0)))],
        );
        let out = r
            .render(&set, &Draw::Indexed { index_count: 18 })
            .unwrap();
        assert!(out.contains("Frame 1 draw_indexed(18)"));
        assert!(out.contains("transform:"));
        // Translation shows up at the end of the first row.
        assert!(out.contains("7.0000]"));
        // Header, matrix name, four rows.
        assert_eq!(out.lines().count(), 6);
        assert!(out.ends_with("]\n"));
        assert_eq!(r.frames(), 1);
    }

    #[test]
    fn debug_renderer_rejects_wrong_layout() {
        let mut r = DebugTextRenderer::new(UniformLayout::Separate);
        let set = UniformSet::new(UniformLayout::Combined, vec![("transform", Mat4::IDENTITY)]);
        let err = r.render(&set, &Draw::Arrays { vertex_count: 18 }).unwrap_err();
        assert!(matches!(err, RenderError::MissingUniform("model")));
        assert_eq!(r.frames(), 0);
    }
}
