use std::fmt;

use gl::types::GLenum;

/// Upper bound on `glGetError` calls per check. Without a current context
/// some drivers keep returning an error forever.
const MAX_DRAINED: usize = 16;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GlError {
    InvalidEnum,
    InvalidValue,
    InvalidOperation,
    StackOverflow,
    StackUnderflow,
    OutOfMemory,
    InvalidFramebufferOperation,
    Unknown(GLenum),
}

impl GlError {
    pub fn from_code(code: GLenum) -> Option<Self> {
        let err = match code {
            gl::NO_ERROR => return None,
            gl::INVALID_ENUM => GlError::InvalidEnum,
            gl::INVALID_VALUE => GlError::InvalidValue,
            gl::INVALID_OPERATION => GlError::InvalidOperation,
            gl::STACK_OVERFLOW => GlError::StackOverflow,
            gl::STACK_UNDERFLOW => GlError::StackUnderflow,
            gl::OUT_OF_MEMORY => GlError::OutOfMemory,
            gl::INVALID_FRAMEBUFFER_OPERATION => GlError::InvalidFramebufferOperation,
            code => GlError::Unknown(code),
        };

        Some(err)
    }

    pub fn code(self) -> GLenum {
        match self {
            GlError::InvalidEnum => gl::INVALID_ENUM,
            GlError::InvalidValue => gl::INVALID_VALUE,
            GlError::InvalidOperation => gl::INVALID_OPERATION,
            GlError::StackOverflow => gl::STACK_OVERFLOW,
            GlError::StackUnderflow => gl::STACK_UNDERFLOW,
            GlError::OutOfMemory => gl::OUT_OF_MEMORY,
            GlError::InvalidFramebufferOperation => gl::INVALID_FRAMEBUFFER_OPERATION,
            GlError::Unknown(code) => code,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GlError::InvalidEnum => "GL_INVALID_ENUM",
            GlError::InvalidValue => "GL_INVALID_VALUE",
            GlError::InvalidOperation => "GL_INVALID_OPERATION",
            GlError::StackOverflow => "GL_STACK_OVERFLOW",
            GlError::StackUnderflow => "GL_STACK_UNDERFLOW",
            GlError::OutOfMemory => "GL_OUT_OF_MEMORY",
            GlError::InvalidFramebufferOperation => "GL_INVALID_FRAMEBUFFER_OPERATION",
            GlError::Unknown(..) => "unknown GL error",
        }
    }
}

impl fmt::Display for GlError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.name())
    }
}

/// Pops every pending error flag. Requires loaded GL function pointers.
pub fn drain_errors() -> Vec<GlError> {
    let mut errors = Vec::new();

    for _ in 0..MAX_DRAINED {
        let code = unsafe { gl::GetError() };
        match GlError::from_code(code) {
            Some(err) => errors.push(err),
            None => break,
        }
    }

    errors
}

/// Logs pending GL errors together with the call site. Never fails.
macro_rules! gl_check {
    () => {
        for err in $crate::glerror::drain_errors() {
            log::error!("{}:{}: {}", file!(), line!(), err);
        }
    };
}

#[test]
fn no_error_is_none() {
    assert_eq!(None, GlError::from_code(gl::NO_ERROR));
}

#[test]
fn known_codes() {
    assert_eq!(Some(GlError::InvalidEnum), GlError::from_code(0x0500));
    assert_eq!(Some(GlError::InvalidValue), GlError::from_code(0x0501));
    assert_eq!(Some(GlError::InvalidOperation), GlError::from_code(0x0502));
    assert_eq!(Some(GlError::StackOverflow), GlError::from_code(0x0503));
    assert_eq!(Some(GlError::StackUnderflow), GlError::from_code(0x0504));
    assert_eq!(Some(GlError::OutOfMemory), GlError::from_code(0x0505));
    assert_eq!(Some(GlError::InvalidFramebufferOperation), GlError::from_code(0x0506));
}

#[test]
fn unknown_code_keeps_value() {
    let err = GlError::from_code(0x1234).unwrap();
    assert_eq!(GlError::Unknown(0x1234), err);
    assert_eq!(0x1234, err.code());
}

#[test]
fn display_has_code_and_name() {
    assert_eq!("1282: GL_INVALID_OPERATION", GlError::InvalidOperation.to_string());
}
