use pyramid_common::UniformLayout;

/// WGSL shader taking one pre-multiplied `transform` matrix.
pub const COMBINED_SHADER: &str = r#"
struct Uniforms {
    transform: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.transform * vec4<f32>(vertex.position, 1.0);
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(in.color, 1.0);
}
"#;

/// WGSL shader taking separate model, view and projection matrices.
pub const SEPARATE_SHADER: &str = r#"
struct Uniforms {
    model: mat4x4<f32>,
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position =
        uniforms.projection * uniforms.view * uniforms.model * vec4<f32>(vertex.position, 1.0);
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(in.color, 1.0);
}
"#;

pub fn source(layout: UniformLayout) -> &'static str {
    match layout {
        UniformLayout::Combined => COMBINED_SHADER,
        UniformLayout::Separate => SEPARATE_SHADER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shaders_declare_layout_uniforms() {
        for layout in [UniformLayout::Combined, UniformLayout::Separate] {
            let src = source(layout);
            for name in layout.names() {
                assert!(src.contains(&format!("{name}: mat4x4<f32>")));
            }
        }
    }
}
