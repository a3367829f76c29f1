use image::{imageops, RgbaImage};
use wasm_bindgen::JsValue;
use web_sys::{
    HtmlVideoElement, WebGl2RenderingContext as GL, WebGlProgram, WebGlTexture,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use super::gl::{link_program, uniform_locations};
use crate::params::ActivePattern;
use crate::{cosmic, pixelate};

/// Two triangles covering clip space.
const QUAD: [f32; 12] = [
    -1.0, -1.0, 1.0, -1.0, -1.0, 1.0, //
    -1.0, 1.0, 1.0, -1.0, 1.0, 1.0,
];

const COSMIC_UNIFORMS: [&str; 6] = [
    "iTime",
    "iResolution",
    "u_timeScale",
    "u_ditherIntensity",
    "u_frequency",
    "u_seed",
];

const PIXELATED_UNIFORMS: [&str; 9] = [
    "iResolution",
    "iChannel0",
    "u_vxOffset",
    "u_pixelW",
    "u_pixelH",
    "u_bgColor",
    "u_fgColor",
    "u_threshold",
    "u_style",
];

/// `HAVE_CURRENT_DATA`
const VIDEO_HAS_FRAME: u16 = 2;

struct Program<const N: usize> {
    program: WebGlProgram,
    uniforms: [Option<WebGlUniformLocation>; N],
}

impl<const N: usize> Program<N> {
    fn new(gl: &GL, fragment: &str, names: [&str; N]) -> Result<Self, JsValue> {
        let program = link_program(gl, fragment)?;
        let uniforms = uniform_locations(gl, &program, names);
        Ok(Self { program, uniforms })
    }

    fn at(&self, i: usize) -> Option<&WebGlUniformLocation> {
        self.uniforms[i].as_ref()
    }
}

/// Both pattern programs, the quad they draw with, and the video texture.
pub struct Renderer {
    gl: GL,
    vao: WebGlVertexArrayObject,
    cosmic: Program<6>,
    pixelated: Program<9>,
    video_texture: WebGlTexture,
}

impl Renderer {
    pub fn new(gl: GL) -> Result<Self, JsValue> {
        let cosmic = Program::new(&gl, cosmic::FRAGMENT_SHADER, COSMIC_UNIFORMS)?;
        let pixelated = Program::new(&gl, pixelate::FRAGMENT_SHADER, PIXELATED_UNIFORMS)?;

        let vao = gl
            .create_vertex_array()
            .ok_or("unable to create vertex array")?;
        gl.bind_vertex_array(Some(&vao));
        let buffer = gl.create_buffer().ok_or("unable to create buffer")?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
        let vertices = js_sys::Float32Array::from(&QUAD[..]);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &vertices, GL::STATIC_DRAW);
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_with_i32(0, 2, GL::FLOAT, false, 0, 0);
        gl.bind_vertex_array(None);

        let video_texture = gl.create_texture().ok_or("unable to create texture")?;
        gl.bind_texture(GL::TEXTURE_2D, Some(&video_texture));
        for (param, value) in [
            (GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE),
            (GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE),
            (GL::TEXTURE_MIN_FILTER, GL::LINEAR),
            (GL::TEXTURE_MAG_FILTER, GL::LINEAR),
        ] {
            gl.tex_parameteri(GL::TEXTURE_2D, param, value as i32);
        }
        // Blank until the camera delivers a frame.
        gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
            GL::TEXTURE_2D,
            0,
            GL::RGBA as i32,
            1,
            1,
            0,
            GL::RGBA,
            GL::UNSIGNED_BYTE,
            Some(&[0u8, 0, 0, 255][..]),
        )?;
        // Video rows arrive top-down; the shaders sample bottom-up.
        gl.pixel_storei(GL::UNPACK_FLIP_Y_WEBGL, 1);

        Ok(Self {
            gl,
            vao,
            cosmic,
            pixelated,
            video_texture,
        })
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.gl.viewport(0, 0, width as i32, height as i32);
    }

    /// Copies the video's current frame into the texture. A video without
    /// data leaves the previous (possibly blank) frame in place.
    pub fn upload_frame(&self, video: &HtmlVideoElement) -> Result<(), JsValue> {
        if video.ready_state() < VIDEO_HAS_FRAME {
            return Ok(());
        }
        let gl = &self.gl;
        gl.bind_texture(GL::TEXTURE_2D, Some(&self.video_texture));
        gl.tex_image_2d_with_u32_and_u32_and_html_video_element(
            GL::TEXTURE_2D,
            0,
            GL::RGBA as i32,
            GL::RGBA,
            GL::UNSIGNED_BYTE,
            video,
        )
    }

    pub fn draw(&self, active: ActivePattern<'_>) {
        let gl = &self.gl;
        match active {
            ActivePattern::Cosmic(u) => {
                let p = &self.cosmic;
                gl.use_program(Some(&p.program));
                gl.uniform1f(p.at(0), u.time);
                gl.uniform3f(p.at(1), u.resolution.x, u.resolution.y, 1.0);
                gl.uniform1f(p.at(2), u.time_scale);
                gl.uniform1f(p.at(3), u.dither_intensity);
                gl.uniform1f(p.at(4), u.frequency);
                gl.uniform1f(p.at(5), u.seed);
            }
            ActivePattern::Pixelated(u) => {
                let p = &self.pixelated;
                gl.use_program(Some(&p.program));
                gl.active_texture(GL::TEXTURE0);
                gl.bind_texture(GL::TEXTURE_2D, Some(&self.video_texture));
                gl.uniform2f(p.at(0), u.resolution.x, u.resolution.y);
                gl.uniform1i(p.at(1), 0);
                gl.uniform1f(p.at(2), u.split_offset);
                gl.uniform1f(p.at(3), u.pixel_w);
                gl.uniform1f(p.at(4), u.pixel_h);
                let (bg, fg) = (u.background, u.foreground);
                gl.uniform3f(p.at(5), bg.r, bg.g, bg.b);
                gl.uniform3f(p.at(6), fg.r, fg.g, fg.b);
                gl.uniform1f(p.at(7), u.threshold);
                gl.uniform1f(p.at(8), u.style.as_uniform());
            }
        }

        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_arrays(GL::TRIANGLES, 0, 6);
        gl.bind_vertex_array(None);
    }

    /// Reads the drawing buffer back as a top-down image.
    pub fn read_frame(&self, width: u32, height: u32) -> Result<RgbaImage, JsValue> {
        let mut pixels = vec![0u8; width as usize * height as usize * 4];
        self.gl.read_pixels_with_opt_u8_array(
            0,
            0,
            width as i32,
            height as i32,
            GL::RGBA,
            GL::UNSIGNED_BYTE,
            Some(pixels.as_mut_slice()),
        )?;
        let mut frame = RgbaImage::from_raw(width, height, pixels)
            .ok_or("frame buffer size mismatch")?;
        imageops::flip_vertical_in_place(&mut frame);
        Ok(frame)
    }
}
