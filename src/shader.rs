use std::ffi::CString;
use std::fmt;
use std::ptr;

use anyhow::{bail, Result};
use gl::types::{GLchar, GLenum, GLint, GLsizei, GLuint};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

impl ShaderKind {
    fn gl_enum(self) -> GLenum {
        match self {
            ShaderKind::Vertex => gl::VERTEX_SHADER,
            ShaderKind::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ShaderKind::Vertex => f.write_str("vertex"),
            ShaderKind::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug)]
pub struct Shader {
    id: GLuint,
}

impl Shader {
    pub fn compile(kind: ShaderKind, source: &str) -> Result<Self> {
        let source = CString::new(source)?;

        let id = unsafe { gl::CreateShader(kind.gl_enum()) };
        gl_check!();
        if id == 0 {
            bail!("failed to create {} shader", kind);
        }
        let shader = Shader { id };

        unsafe {
            gl::ShaderSource(id, 1, &source.as_ptr(), ptr::null());
            gl_check!();
            gl::CompileShader(id);
            gl_check!();
        }

        let mut compiled = 0;
        unsafe { gl::GetShaderiv(id, gl::COMPILE_STATUS, &mut compiled) };
        gl_check!();
        if compiled == 0 {
            let log = info_log(id, gl::GetShaderiv, gl::GetShaderInfoLog);
            bail!("error compiling {} shader: {}", kind, log);
        }

        Ok(shader)
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe { gl::DeleteShader(self.id) };
        gl_check!();
    }
}

#[derive(Debug)]
pub struct Program {
    id: GLuint,
}

impl Program {
    /// Attribute locations are bound before linking.
    pub fn link(vertex: &Shader, fragment: &Shader, attributes: &[(GLuint, &str)]) -> Result<Self> {
        let id = unsafe { gl::CreateProgram() };
        gl_check!();
        if id == 0 {
            bail!("failed to create GL program");
        }
        let program = Program { id };

        unsafe {
            gl::AttachShader(id, vertex.id);
            gl_check!();
            gl::AttachShader(id, fragment.id);
            gl_check!();
        }

        for &(location, name) in attributes {
            let name = CString::new(name)?;
            unsafe { gl::BindAttribLocation(id, location, name.as_ptr()) };
            gl_check!();
        }

        unsafe { gl::LinkProgram(id) };
        gl_check!();

        let mut linked = 0;
        unsafe { gl::GetProgramiv(id, gl::LINK_STATUS, &mut linked) };
        gl_check!();
        if linked == 0 {
            let log = info_log(id, gl::GetProgramiv, gl::GetProgramInfoLog);
            bail!("error linking program: {}", log);
        }

        Ok(program)
    }

    pub fn bind(&self) {
        unsafe { gl::UseProgram(self.id) };
        gl_check!();
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) };
        gl_check!();
    }
}

type GetIv = unsafe fn(GLuint, GLenum, *mut GLint);
type GetInfoLog = unsafe fn(GLuint, GLsizei, *mut GLsizei, *mut GLchar);

fn info_log(id: GLuint, get_iv: GetIv, get_log: GetInfoLog) -> String {
    let mut len: GLint = 0;
    unsafe { get_iv(id, gl::INFO_LOG_LENGTH, &mut len) };
    if len <= 1 {
        return String::new();
    }

    let mut buf = vec![0u8; len as usize];
    let mut written: GLsizei = 0;
    unsafe { get_log(id, len, &mut written, buf.as_mut_ptr() as *mut GLchar) };
    buf.truncate(written.max(0) as usize);

    String::from_utf8_lossy(&buf).trim_end().to_owned()
}
