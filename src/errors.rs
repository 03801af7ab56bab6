use std::fmt;

use gl;
use gl::types::*;

use crate::context::Context;

/// Status codes reported by the sticky error flag of a context.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StateCode {
    NoError,
    InvalidEnum,
    InvalidValue,
    InvalidOperation,
    InvalidFramebufferOperation,
    OutOfMemory,
    StackUnderflow,
    StackOverflow,
    Unknown(GLenum),
}

impl StateCode {
    pub fn from_raw(code: GLenum) -> Self {
        match code {
            gl::NO_ERROR => StateCode::NoError,
            gl::INVALID_ENUM => StateCode::InvalidEnum,
            gl::INVALID_VALUE => StateCode::InvalidValue,
            gl::INVALID_OPERATION => StateCode::InvalidOperation,
            gl::INVALID_FRAMEBUFFER_OPERATION => StateCode::InvalidFramebufferOperation,
            gl::OUT_OF_MEMORY => StateCode::OutOfMemory,
            gl::STACK_UNDERFLOW => StateCode::StackUnderflow,
            gl::STACK_OVERFLOW => StateCode::StackOverflow,
            v => StateCode::Unknown(v),
        }
    }

    pub fn raw(self) -> GLenum {
        match self {
            StateCode::NoError => gl::NO_ERROR,
            StateCode::InvalidEnum => gl::INVALID_ENUM,
            StateCode::InvalidValue => gl::INVALID_VALUE,
            StateCode::InvalidOperation => gl::INVALID_OPERATION,
            StateCode::InvalidFramebufferOperation => gl::INVALID_FRAMEBUFFER_OPERATION,
            StateCode::OutOfMemory => gl::OUT_OF_MEMORY,
            StateCode::StackUnderflow => gl::STACK_UNDERFLOW,
            StateCode::StackOverflow => gl::STACK_OVERFLOW,
            StateCode::Unknown(v) => v,
        }
    }

    /// A human readable description of what the code means.
    pub fn description(self) -> &'static str {
        match self {
            StateCode::NoError => "No error has been recorded.",
            StateCode::InvalidEnum => "An unacceptable value is specified for an enumerated argument.",
            StateCode::InvalidValue => "A numeric argument is out of range.",
            StateCode::InvalidOperation => {
                "The specified operation is not allowed in the current state."
            }
            StateCode::InvalidFramebufferOperation => {
                "The command is trying to render to or read from the framebuffer while the \
                 currently bound framebuffer is not framebuffer complete."
            }
            StateCode::OutOfMemory => "There is not enough memory left to execute the command.",
            StateCode::StackUnderflow => "An attempt has been made to perform an operation that \
                                          would cause an internal stack to underflow.",
            StateCode::StackOverflow => "An attempt has been made to perform an operation that \
                                         would cause an internal stack to overflow.",
            StateCode::Unknown(_) => "Oops, Unknown OpenGL error.",
        }
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            StateCode::NoError => write!(f, "GL_NO_ERROR"),
            StateCode::InvalidEnum => write!(f, "GL_INVALID_ENUM"),
            StateCode::InvalidValue => write!(f, "GL_INVALID_VALUE"),
            StateCode::InvalidOperation => write!(f, "GL_INVALID_OPERATION"),
            StateCode::InvalidFramebufferOperation => write!(f, "GL_INVALID_FRAMEBUFFER_OPERATION"),
            StateCode::OutOfMemory => write!(f, "GL_OUT_OF_MEMORY"),
            StateCode::StackUnderflow => write!(f, "GL_STACK_UNDERFLOW"),
            StateCode::StackOverflow => write!(f, "GL_STACK_OVERFLOW"),
            StateCode::Unknown(v) => write!(f, "GL_UNKNOWN_ERROR(0x{:04X})", v),
        }
    }
}

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "[GL] Failed to create object: {}", _0)]
    CreateFailure(String),
    #[fail(display = "[GL] {}: {}", code, message)]
    ContextState { code: StateCode, message: String },
    #[fail(display = "{}", _0)]
    Argument(String),
}

impl Error {
    /// Returns the state code if this is a context state error.
    pub fn state_code(&self) -> Option<StateCode> {
        match *self {
            Error::ContextState { code, .. } => Some(code),
            _ => None,
        }
    }
}

pub type Result<T> = ::std::result::Result<T, Error>;

/// Consumes the sticky error flag of `ctx`, and fails with `Error::ContextState`
/// if anything has been recorded since the last query.
///
/// Reading the flag clears it, so a second call right after a failure passes.
pub fn assert_no_error<C: Context + ?Sized>(ctx: &mut C, message: Option<&str>) -> Result<()> {
    let code = StateCode::from_raw(ctx.get_error());
    if code == StateCode::NoError {
        return Ok(());
    }

    let message = message.unwrap_or_else(|| code.description()).to_owned();
    Err(Error::ContextState { code, message })
}

/// Shortcut of `assert_no_error` with the default description of each code.
#[inline]
pub fn check<C: Context + ?Sized>(ctx: &mut C) -> Result<()> {
    assert_no_error(ctx, None)
}
