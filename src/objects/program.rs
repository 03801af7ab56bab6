use gl;
use gl::types::*;
use serde::{Deserialize, Serialize};

use super::binding;
use super::shader::{Shader, ShaderKind};
use super::uniform::UniformCache;
use super::{c_name, read_string};
use crate::context::Context;
use crate::errors::*;

/// A linked program, as returned by `glGetProgramBinary`. It can only be loaded back into
/// the same implementation that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramBinary {
    pub format: GLenum,
    pub data: Vec<u8>,
}

/// Either a `Shader` or the raw name of a shader object.
#[derive(Debug, Copy, Clone)]
pub enum ShaderRef<'a> {
    Shader(&'a Shader),
    Name(GLuint),
}

impl<'a> ShaderRef<'a> {
    fn resolve(self) -> Result<GLuint> {
        let name = match self {
            ShaderRef::Shader(v) => v.name(),
            ShaderRef::Name(v) => v,
        };

        if name == 0 {
            return Err(Error::Argument(
                "A deleted or unallocated shader can not be attached to programs.".into(),
            ));
        }

        Ok(name)
    }
}

impl<'a> From<&'a Shader> for ShaderRef<'a> {
    fn from(v: &'a Shader) -> Self {
        ShaderRef::Shader(v)
    }
}

impl<'a> From<GLuint> for ShaderRef<'a> {
    fn from(v: GLuint) -> Self {
        ShaderRef::Name(v)
    }
}

/// A program object, along with the uniform locations resolved from it.
#[derive(Debug)]
pub struct Program {
    name: GLuint,
    uniforms: UniformCache,
}

impl Program {
    pub fn new<C: Context + ?Sized>(ctx: &mut C) -> Result<Self> {
        let name = ctx.create_program();
        if name == 0 {
            return Err(Error::CreateFailure("Unable to allocate program.".into()));
        }

        debug!("Creates program {}.", name);
        Ok(Program::with_name(name))
    }

    /// Wraps an existing program `name`, which is owned by the wrapper from now on.
    pub fn with_name(name: GLuint) -> Self {
        Program {
            name,
            uniforms: UniformCache::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> GLuint {
        self.name
    }

    #[inline]
    pub fn uniforms(&self) -> &UniformCache {
        &self.uniforms
    }

    /// Reads the name of the program in use.
    #[inline]
    pub fn current_program<C: Context + ?Sized>(ctx: &mut C) -> GLuint {
        binding::current_program(ctx)
    }

    /// Runs `body` and puts the program that was in use before it back into use.
    pub fn preserve_binding<C, F, R>(ctx: &mut C, body: F) -> Result<R>
    where
        C: Context + ?Sized,
        F: FnOnce(&mut C) -> Result<R>,
    {
        binding::preserve_program(ctx, body)
    }

    pub fn delete<C: Context + ?Sized>(&mut self, ctx: &mut C) {
        if self.name != 0 {
            debug!("Deletes program {}.", self.name);
            ctx.delete_program(self.name);
            self.name = 0;
        }
    }

    pub fn is_program<C: Context + ?Sized>(&self, ctx: &mut C) -> bool {
        self.name != 0 && ctx.is_program(self.name)
    }

    pub fn attach_shader<'a, C, S>(&mut self, ctx: &mut C, shader: S) -> Result<()>
    where
        C: Context + ?Sized,
        S: Into<ShaderRef<'a>>,
    {
        self.assert_allocated()?;
        let shader = shader.into().resolve()?;
        ctx.attach_shader(self.name, shader);
        Ok(())
    }

    pub fn detach_shader<'a, C, S>(&mut self, ctx: &mut C, shader: S) -> Result<()>
    where
        C: Context + ?Sized,
        S: Into<ShaderRef<'a>>,
    {
        self.assert_allocated()?;
        let shader = shader.into().resolve()?;
        ctx.detach_shader(self.name, shader);
        Ok(())
    }

    /// Links the program, and returns whether it succeeded.
    ///
    /// On success every known uniform name is resolved again. On failure the cached
    /// locations are left untouched; they still describe the previous successful link,
    /// which stays installed, but must not be used with the new one.
    ///
    /// A deleted program never links, and the context is not asked.
    pub fn link<C: Context + ?Sized>(&mut self, ctx: &mut C) -> bool {
        if self.name == 0 {
            return false;
        }

        ctx.link_program(self.name);
        self.reload_if_linked(ctx)
    }

    /// Installs a precompiled binary, and returns whether the program is linked
    /// afterwards. Uniforms are resolved again in the same way as `link` does.
    pub fn load_binary<C: Context + ?Sized>(&mut self, ctx: &mut C, format: GLenum, data: &[u8]) -> bool {
        if self.name == 0 {
            return false;
        }

        ctx.program_binary(self.name, format, data);
        self.reload_if_linked(ctx)
    }

    /// Retrieves the binary of the linked program, or `None` if the implementation
    /// reports no binary for it.
    pub fn binary<C: Context + ?Sized>(&self, ctx: &mut C) -> Option<ProgramBinary> {
        if self.name == 0 {
            return None;
        }

        let len = ctx.get_program_iv(self.name, gl::PROGRAM_BINARY_LENGTH);
        if len <= 0 {
            return None;
        }

        let mut format: GLenum = 0;
        let mut data = vec![0u8; len as usize];
        let written = ctx.get_program_binary(self.name, &mut format, &mut data);
        data.truncate(written);

        Some(ProgramBinary { format, data })
    }

    pub fn linked<C: Context + ?Sized>(&self, ctx: &mut C) -> bool {
        self.name != 0 && ctx.get_program_iv(self.name, gl::LINK_STATUS) != GLint::from(gl::FALSE)
    }

    /// Validates the program against the current context state.
    pub fn validate<C: Context + ?Sized>(&self, ctx: &mut C) -> bool {
        if self.name == 0 {
            return false;
        }

        ctx.validate_program(self.name);
        ctx.get_program_iv(self.name, gl::VALIDATE_STATUS) != GLint::from(gl::FALSE)
    }

    /// The diagnostics of the last link or validation. Empty when there is no log.
    pub fn info_log<C: Context + ?Sized>(&self, ctx: &mut C) -> String {
        if self.name == 0 {
            return String::new();
        }

        let len = ctx.get_program_iv(self.name, gl::INFO_LOG_LENGTH);
        read_string(len, |buf| ctx.get_program_info_log(self.name, buf))
    }

    /// Puts the program in use.
    pub fn use_program<C: Context + ?Sized>(&self, ctx: &mut C) -> Result<()> {
        self.assert_allocated()?;
        ctx.use_program(self.name);
        Ok(())
    }

    /// Puts the program in use for the duration of `body` only.
    pub fn use_with<C, F, R>(&mut self, ctx: &mut C, body: F) -> Result<R>
    where
        C: Context + ?Sized,
        F: FnOnce(&mut C, &mut Self) -> Result<R>,
    {
        self.assert_allocated()?;
        Self::preserve_binding(ctx, |ctx| {
            self.use_program(ctx)?;
            body(ctx, self)
        })
    }

    /// Registers a uniform name to be resolved on every successful link.
    pub fn hint_uniform(&mut self, name: &str) -> Result<()> {
        self.uniforms.hint(name)
    }

    /// The location of the uniform `name`, `-1` if the program has no such uniform.
    pub fn uniform_location<C: Context + ?Sized>(&mut self, ctx: &mut C, name: &str) -> Result<GLint> {
        self.assert_allocated()?;
        self.uniforms.location(ctx, self.name, name)
    }

    /// Forgets every cached location and hinted name.
    pub fn clear_uniform_location_cache(&mut self) {
        self.uniforms.clear();
    }

    pub fn subroutine_uniform_location<C>(
        &self,
        ctx: &mut C,
        kind: ShaderKind,
        name: &str,
    ) -> Result<GLint>
    where
        C: Context + ?Sized,
    {
        self.assert_allocated()?;
        let name = c_name(name)?;
        Ok(ctx.get_subroutine_uniform_location(self.name, kind.into(), &name))
    }

    /// Binds the vertex attribute `name` to `index`, effective from the next link.
    pub fn bind_attrib_location<C>(&mut self, ctx: &mut C, index: GLuint, name: &str) -> Result<()>
    where
        C: Context + ?Sized,
    {
        self.assert_allocated()?;
        let name = c_name(name)?;
        ctx.bind_attrib_location(self.name, index, &name);
        Ok(())
    }

    /// Binds the fragment output `name` to the color number `color`, effective from the
    /// next link.
    pub fn bind_frag_data_location<C>(&mut self, ctx: &mut C, color: GLuint, name: &str) -> Result<()>
    where
        C: Context + ?Sized,
    {
        self.assert_allocated()?;
        let name = c_name(name)?;
        ctx.bind_frag_data_location(self.name, color, &name);
        Ok(())
    }

    fn assert_allocated(&self) -> Result<()> {
        if self.name == 0 {
            return Err(Error::Argument("The program has been deleted.".into()));
        }

        Ok(())
    }

    fn reload_if_linked<C: Context + ?Sized>(&mut self, ctx: &mut C) -> bool {
        let linked = self.linked(ctx);
        if linked {
            self.uniforms.reload(ctx, self.name);
        } else {
            let len = ctx.get_program_iv(self.name, gl::INFO_LOG_LENGTH);
            warn!(
                "Failed to link program {}, {} bytes of info log.",
                self.name, len
            );
        }

        linked
    }
}
