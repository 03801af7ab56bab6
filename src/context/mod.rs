//! The native graphics context that every object wrapper talks to.
//!
//! A context is a stateful, global collaborator: bindings made through it are visible
//! to every later call, no matter which wrapper issued them. It is bound to exactly one
//! thread, and none of the implementations here are `Send` or `Sync`.
//!
//! Errors are never reported by the calls themselves. Like the native API, a failed
//! call raises the sticky error flag which can be consumed with `get_error`, see
//! `errors::assert_no_error`.

pub mod opengl;
pub mod headless;
pub mod info;

use std::ffi::CStr;
use std::fmt;

use gl::types::*;
use serde::{Deserialize, Serialize};

pub use self::opengl::GLContext;
pub use self::headless::{Call, HeadlessContext, HeadlessParams};
pub use self::info::{ContextInfo, Version};

/// Kinds of objects whose names are allocated in batches with `glGen*`, and released
/// with `glDelete*`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Buffer,
    Texture,
    VertexArray,
    Query,
    Sampler,
    Framebuffer,
    Renderbuffer,
    ProgramPipeline,
    TransformFeedback,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 9] = [
        ObjectKind::Buffer,
        ObjectKind::Texture,
        ObjectKind::VertexArray,
        ObjectKind::Query,
        ObjectKind::Sampler,
        ObjectKind::Framebuffer,
        ObjectKind::Renderbuffer,
        ObjectKind::ProgramPipeline,
        ObjectKind::TransformFeedback,
    ];
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            ObjectKind::Buffer => "buffer",
            ObjectKind::Texture => "texture",
            ObjectKind::VertexArray => "vertex array",
            ObjectKind::Query => "query",
            ObjectKind::Sampler => "sampler",
            ObjectKind::Framebuffer => "framebuffer",
            ObjectKind::Renderbuffer => "renderbuffer",
            ObjectKind::ProgramPipeline => "program pipeline",
            ObjectKind::TransformFeedback => "transform feedback",
        };

        write!(f, "{}", name)
    }
}

/// Entry points of a native graphics context.
///
/// Names are plain `GLuint`s, `0` always means "no object". Buffers passed to the
/// `get_*_log`, `get_shader_source` and `get_program_binary` calls are owned by the
/// caller; the context writes into them and returns how many bytes it wrote, without
/// the trailing nul.
pub trait Context {
    /// Fills `names` with newly reserved names of `kind`, in order.
    fn gen_names(&mut self, kind: ObjectKind, names: &mut [GLuint]);
    fn delete_names(&mut self, kind: ObjectKind, names: &[GLuint]);
    fn is_name(&mut self, kind: ObjectKind, name: GLuint) -> bool;
    /// Binds `name` to `target`. Kinds with a single bind point ignore `target`.
    fn bind_name(&mut self, kind: ObjectKind, target: GLenum, name: GLuint);
    fn active_texture(&mut self, unit: GLenum);

    fn get_error(&mut self) -> GLenum;
    fn get_integer(&mut self, pname: GLenum) -> GLint;
    fn get_integer64(&mut self, pname: GLenum) -> GLint64;
    fn get_float(&mut self, pname: GLenum) -> GLfloat;
    fn get_boolean(&mut self, pname: GLenum) -> bool;
    fn get_string(&mut self, name: GLenum) -> String;
    fn get_string_indexed(&mut self, name: GLenum, index: GLuint) -> String;

    fn buffer_data(&mut self, target: GLenum, data: &[u8], usage: GLenum);
    fn buffer_sub_data(&mut self, target: GLenum, offset: usize, data: &[u8]);

    fn create_shader(&mut self, kind: GLenum) -> GLuint;
    fn delete_shader(&mut self, shader: GLuint);
    fn is_shader(&mut self, shader: GLuint) -> bool;
    /// Replaces all the source strings of `shader` at once.
    fn shader_source(&mut self, shader: GLuint, sources: &[&str]);
    fn compile_shader(&mut self, shader: GLuint);
    fn get_shader_iv(&mut self, shader: GLuint, pname: GLenum) -> GLint;
    fn get_shader_info_log(&mut self, shader: GLuint, buf: &mut [u8]) -> usize;
    fn get_shader_source(&mut self, shader: GLuint, buf: &mut [u8]) -> usize;

    fn create_program(&mut self) -> GLuint;
    fn delete_program(&mut self, program: GLuint);
    fn is_program(&mut self, program: GLuint) -> bool;
    fn attach_shader(&mut self, program: GLuint, shader: GLuint);
    fn detach_shader(&mut self, program: GLuint, shader: GLuint);
    fn link_program(&mut self, program: GLuint);
    fn validate_program(&mut self, program: GLuint);
    fn use_program(&mut self, program: GLuint);
    fn get_program_iv(&mut self, program: GLuint, pname: GLenum) -> GLint;
    fn get_program_info_log(&mut self, program: GLuint, buf: &mut [u8]) -> usize;
    fn get_uniform_location(&mut self, program: GLuint, name: &CStr) -> GLint;
    fn get_subroutine_uniform_location(
        &mut self,
        program: GLuint,
        shader_kind: GLenum,
        name: &CStr,
    ) -> GLint;
    fn bind_attrib_location(&mut self, program: GLuint, index: GLuint, name: &CStr);
    fn bind_frag_data_location(&mut self, program: GLuint, color: GLuint, name: &CStr);
    fn program_binary(&mut self, program: GLuint, format: GLenum, data: &[u8]);
    /// Writes the binary of `program` into `buf`, and its format into `format`.
    fn get_program_binary(&mut self, program: GLuint, format: &mut GLenum, buf: &mut [u8])
        -> usize;
}
