use wasm_bindgen::JsValue;
use web_sys::{WebGl2RenderingContext as GL, WebGlProgram, WebGlShader, WebGlUniformLocation};

/// Full-screen quad. `vUv` spans 0..1 with the origin bottom-left.
pub const VERTEX_SHADER: &str = r#"#version 300 es
in vec2 position;
out vec2 vUv;

void main() {
    vUv = position * 0.5 + 0.5;
    gl_Position = vec4(position, 0.0, 1.0);
}
"#;

pub fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader, JsValue> {
    let shader = gl
        .create_shader(kind)
        .ok_or("unable to create shader object")?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| "unknown error creating shader".into());
        gl.delete_shader(Some(&shader));
        Err(JsValue::from_str(&log))
    }
}

pub fn link_program(gl: &GL, fragment_source: &str) -> Result<WebGlProgram, JsValue> {
    let vert = compile_shader(gl, GL::VERTEX_SHADER, VERTEX_SHADER)?;
    let frag = compile_shader(gl, GL::FRAGMENT_SHADER, fragment_source)?;

    let program = gl
        .create_program()
        .ok_or("unable to create program object")?;
    gl.attach_shader(&program, &vert);
    gl.attach_shader(&program, &frag);
    // Both programs share the quad buffer at location 0.
    gl.bind_attrib_location(&program, 0, "position");
    gl.link_program(&program);

    gl.delete_shader(Some(&vert));
    gl.delete_shader(Some(&frag));

    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let log = gl
            .get_program_info_log(&program)
            .unwrap_or_else(|| "unknown error linking program".into());
        gl.delete_program(Some(&program));
        Err(JsValue::from_str(&log))
    }
}

/// Resolves uniform locations once at startup. A uniform the compiler
/// optimized away resolves to `None`, which GL accepts as a no-op target.
pub fn uniform_locations<const N: usize>(
    gl: &GL,
    program: &WebGlProgram,
    names: [&str; N],
) -> [Option<WebGlUniformLocation>; N] {
    names.map(|name| gl.get_uniform_location(program, name))
}
