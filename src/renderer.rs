use std::mem;
use std::os::raw::c_void;
use std::ptr;

use anyhow::{Context, Result};
use gl::types::{GLsizei, GLsizeiptr, GLuint};
use log::debug;

use crate::shader::{Program, Shader, ShaderKind};
use crate::vertex::{Triangle, Vertex};

pub const POSITION_ATTRIBUTE: GLuint = 0;

const VERTEX_SHADER: &str = include_str!("shaders/triangle.vert");
const FRAGMENT_SHADER: &str = include_str!("shaders/triangle.frag");

/// One program, one vertex buffer, one triangle per frame.
pub struct Renderer {
    program: Program,
    vbo: GLuint,
    clear_color: [f32; 4],
}

impl Renderer {
    pub fn new(clear_color: [f32; 4]) -> Result<Self> {
        let vertex = Shader::compile(ShaderKind::Vertex, VERTEX_SHADER)?;
        let fragment = Shader::compile(ShaderKind::Fragment, FRAGMENT_SHADER)?;
        let program = Program::link(&vertex, &fragment, &[(POSITION_ATTRIBUTE, "a_position")])
            .context("failed to set up the triangle program")?;
        program.bind();
        debug!("shader program linked");

        let mut vbo = 0;
        unsafe {
            gl::GenBuffers(1, &mut vbo);
            gl_check!();
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl_check!();
            gl::VertexAttribPointer(
                POSITION_ATTRIBUTE,
                2,
                gl::FLOAT,
                gl::FALSE,
                mem::size_of::<Vertex>() as GLsizei,
                ptr::null(),
            );
            gl_check!();
            gl::EnableVertexAttribArray(POSITION_ATTRIBUTE);
            gl_check!();
        }

        let renderer = Self {
            program,
            vbo,
            clear_color,
        };
        renderer.clear();

        Ok(renderer)
    }

    pub fn draw(&mut self, triangle: &Triangle) {
        self.program.bind();
        unsafe {
            gl::BindBuffer(gl::ARRAY_BUFFER, self.vbo);
            gl_check!();
            gl::BufferData(
                gl::ARRAY_BUFFER,
                mem::size_of::<Triangle>() as GLsizeiptr,
                triangle as *const Triangle as *const c_void,
                gl::STREAM_DRAW,
            );
            gl_check!();
            gl::DrawArrays(gl::TRIANGLES, 0, 3);
            gl_check!();
        }
    }

    pub fn clear(&self) {
        let [r, g, b, a] = self.clear_color;
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl_check!();
            gl::Clear(gl::COLOR_BUFFER_BIT);
            gl_check!();
        }
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        unsafe { gl::DeleteBuffers(1, &self.vbo) };
        gl_check!();
    }
}
