use miniquad::*;

pub const VERTEX: &str = r#"
    #version 100

    attribute vec3 pos;

    uniform float scale;

    void main() {
        gl_Position = vec4(pos.xy * scale, pos.z, 1.0);
    }
"#;

pub const FRAGMENT: &str = r#"
    #version 100

    uniform lowp vec4 color;

    void main() {
        gl_FragColor = color;
    }
"#;

pub fn meta() -> ShaderMeta {
    ShaderMeta {
        images: Vec::new(),
        uniforms: UniformBlockLayout {
            uniforms: vec![
                UniformDesc::new("color", UniformType::Float4),
                UniformDesc::new("scale", UniformType::Float1),
            ],
        },
    }
}

#[repr(C)]
pub struct Uniforms {
    pub color: (f32, f32, f32, f32),
    pub scale: f32,
}
