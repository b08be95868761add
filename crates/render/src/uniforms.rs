use crate::renderer::RenderError;
use glam::Mat4;
use pyramid_common::UniformLayout;

/// Named matrices bound before the frame's draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformSet {
    layout: UniformLayout,
    entries: Vec<(&'static str, Mat4)>,
}

impl UniformSet {
    pub fn new(layout: UniformLayout, entries: Vec<(&'static str, Mat4)>) -> Self {
        Self { layout, entries }
    }

    pub fn layout(&self) -> UniformLayout {
        self.layout
    }

    pub fn get(&self, name: &str) -> Option<Mat4> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, m)| *m)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Mat4)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Column-major matrices in the order `layout` declares them, ready for a
    /// uniform buffer.
    pub fn ordered_columns(&self, layout: UniformLayout) -> Result<Vec<[[f32; 4]; 4]>, RenderError> {
        layout
            .names()
            .iter()
            .map(|name| {
                self.get(name)
                    .map(|m| m.to_cols_array_2d())
                    .ok_or(RenderError::MissingUniform(*name))
            })
            .collect()
    }
}
