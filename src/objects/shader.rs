use std::fmt;

use gl;
use gl::types::*;
use serde::{Deserialize, Serialize};

use super::read_string;
use crate::context::Context;
use crate::errors::*;

/// The stage a shader object is compiled for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShaderKind {
    Vertex,
    Fragment,
    Geometry,
    TessControl,
    TessEvaluation,
    Compute,
}

impl From<ShaderKind> for GLenum {
    fn from(kind: ShaderKind) -> Self {
        match kind {
            ShaderKind::Vertex => gl::VERTEX_SHADER,
            ShaderKind::Fragment => gl::FRAGMENT_SHADER,
            ShaderKind::Geometry => gl::GEOMETRY_SHADER,
            ShaderKind::TessControl => gl::TESS_CONTROL_SHADER,
            ShaderKind::TessEvaluation => gl::TESS_EVALUATION_SHADER,
            ShaderKind::Compute => gl::COMPUTE_SHADER,
        }
    }
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The source strings of a shader, either one string or an ordered list of them that
/// the compiler reads as if they were concatenated.
#[derive(Debug, Copy, Clone)]
pub enum ShaderSource<'a> {
    Single(&'a str),
    Many(&'a [&'a str]),
}

impl<'a> From<&'a str> for ShaderSource<'a> {
    fn from(v: &'a str) -> Self {
        ShaderSource::Single(v)
    }
}

impl<'a> From<&'a String> for ShaderSource<'a> {
    fn from(v: &'a String) -> Self {
        ShaderSource::Single(v.as_str())
    }
}

impl<'a, 'b: 'a> From<&'a [&'b str]> for ShaderSource<'a> {
    fn from(v: &'a [&'b str]) -> Self {
        ShaderSource::Many(v)
    }
}

impl<'a, 'b: 'a> From<&'a Vec<&'b str>> for ShaderSource<'a> {
    fn from(v: &'a Vec<&'b str>) -> Self {
        ShaderSource::Many(v.as_slice())
    }
}

/// A shader object. Unlike buffers and textures, shaders have no bind point, so the
/// native object is created right away.
#[derive(Debug)]
pub struct Shader {
    name: GLuint,
    kind: ShaderKind,
}

impl Shader {
    pub fn new<C: Context + ?Sized>(ctx: &mut C, kind: ShaderKind) -> Result<Self> {
        let name = ctx.create_shader(kind.into());
        if name == 0 {
            return Err(Error::CreateFailure(format!(
                "Unable to allocate {} shader.",
                kind
            )));
        }

        debug!("Creates {} shader {}.", kind, name);
        Ok(Shader { name, kind })
    }

    /// Wraps an existing shader `name`, which is owned by the wrapper from now on.
    pub fn with_name(kind: ShaderKind, name: GLuint) -> Self {
        Shader { name, kind }
    }

    #[inline]
    pub fn name(&self) -> GLuint {
        self.name
    }

    #[inline]
    pub fn kind(&self) -> ShaderKind {
        self.kind
    }

    pub fn delete<C: Context + ?Sized>(&mut self, ctx: &mut C) {
        if self.name != 0 {
            debug!("Deletes {} shader {}.", self.kind, self.name);
            ctx.delete_shader(self.name);
            self.name = 0;
        }
    }

    pub fn is_shader<C: Context + ?Sized>(&self, ctx: &mut C) -> bool {
        self.name != 0 && ctx.is_shader(self.name)
    }

    /// Replaces every source string of the shader with one call.
    pub fn set_source<'a, C, S>(&mut self, ctx: &mut C, sources: S) -> Result<()>
    where
        C: Context + ?Sized,
        S: Into<ShaderSource<'a>>,
    {
        self.assert_allocated()?;

        match sources.into() {
            ShaderSource::Single(v) => ctx.shader_source(self.name, &[v]),
            ShaderSource::Many(v) => ctx.shader_source(self.name, v),
        }

        Ok(())
    }

    /// Reads back the source strings, concatenated. Empty if there is none.
    pub fn source<C: Context + ?Sized>(&self, ctx: &mut C) -> String {
        if self.name == 0 {
            return String::new();
        }

        let len = ctx.get_shader_iv(self.name, gl::SHADER_SOURCE_LENGTH);
        read_string(len, |buf| ctx.get_shader_source(self.name, buf))
    }

    /// Compiles the shader, and returns whether it succeeded. On failure the
    /// diagnostics are available from `info_log`.
    pub fn compile<C: Context + ?Sized>(&mut self, ctx: &mut C) -> Result<bool> {
        self.assert_allocated()?;
        ctx.compile_shader(self.name);

        let compiled = self.compiled(ctx);
        if !compiled {
            let len = ctx.get_shader_iv(self.name, gl::INFO_LOG_LENGTH);
            warn!(
                "Failed to compile {} shader {}, {} bytes of info log.",
                self.kind, self.name, len
            );
        }

        Ok(compiled)
    }

    pub fn compiled<C: Context + ?Sized>(&self, ctx: &mut C) -> bool {
        self.name != 0 && ctx.get_shader_iv(self.name, gl::COMPILE_STATUS) != GLint::from(gl::FALSE)
    }

    /// The diagnostics of the last compilation. Empty, never missing, when there is no log.
    pub fn info_log<C: Context + ?Sized>(&self, ctx: &mut C) -> String {
        if self.name == 0 {
            return String::new();
        }

        let len = ctx.get_shader_iv(self.name, gl::INFO_LOG_LENGTH);
        read_string(len, |buf| ctx.get_shader_info_log(self.name, buf))
    }

    fn assert_allocated(&self) -> Result<()> {
        if self.name == 0 {
            return Err(Error::Argument(format!(
                "The {} shader has been deleted.",
                self.kind
            )));
        }

        Ok(())
    }
}
