use gl;
use gl::types::*;

use super::binding;
use super::name::BoundName;
use crate::context::{Context, ObjectKind};
use crate::errors::*;

/// A texture object. The native name is allocated by the first bind.
///
/// Texture bindings are per texture unit, all the binds here happen on the unit that
/// is active at the time of the call, unless stated otherwise.
#[derive(Debug)]
pub struct Texture {
    inner: BoundName,
}

impl Texture {
    /// `GL_TEXTURE_2D`, used when a texture is bound without any target.
    pub const DEFAULT_TARGET: GLenum = gl::TEXTURE_2D;

    pub fn new(target: Option<GLenum>) -> Self {
        Texture::with_name(target, 0)
    }

    /// Wraps an existing texture `name`, which is owned by the wrapper from now on.
    pub fn with_name(target: Option<GLenum>, name: GLuint) -> Self {
        Texture {
            inner: BoundName::new(ObjectKind::Texture, target, name, Self::DEFAULT_TARGET),
        }
    }

    #[inline]
    pub fn name(&self) -> GLuint {
        self.inner.name().get()
    }

    #[inline]
    pub fn target(&self) -> Option<GLenum> {
        self.inner.target()
    }

    /// Reads the active texture unit.
    #[inline]
    pub fn current_unit<C: Context + ?Sized>(ctx: &mut C) -> GLenum {
        binding::current_unit(ctx)
    }

    /// Reads the texture bound at `target` on the active unit.
    pub fn current_binding<C: Context + ?Sized>(ctx: &mut C, target: GLenum) -> Result<GLuint> {
        binding::current_binding(ctx, ObjectKind::Texture, target)
    }

    pub fn preserve_unit<C, F, R>(ctx: &mut C, body: F) -> Result<R>
    where
        C: Context + ?Sized,
        F: FnOnce(&mut C) -> Result<R>,
    {
        binding::preserve_unit(ctx, body)
    }

    /// Runs `body` and restores the active unit and the texture bound at `target` on it.
    pub fn preserve_binding<C, F, R>(ctx: &mut C, target: GLenum, body: F) -> Result<R>
    where
        C: Context + ?Sized,
        F: FnOnce(&mut C) -> Result<R>,
    {
        binding::preserve_texture_binding(ctx, target, body)
    }

    pub fn is_texture<C: Context + ?Sized>(&self, ctx: &mut C) -> bool {
        self.inner.name().is_live(ctx)
    }

    pub fn delete<C: Context + ?Sized>(&mut self, ctx: &mut C) {
        self.inner.name_mut().delete(ctx);
    }

    /// Binds the texture on the active unit, allocating it first if needed.
    pub fn bind<C: Context + ?Sized>(&mut self, ctx: &mut C, target: Option<GLenum>) -> Result<()> {
        self.inner.bind(ctx, target)?;
        Ok(())
    }

    /// Binds the texture on the active unit for the duration of `body` only.
    pub fn bind_with<C, F, R>(&mut self, ctx: &mut C, target: Option<GLenum>, body: F) -> Result<R>
    where
        C: Context + ?Sized,
        F: FnOnce(&mut C, &mut Self) -> Result<R>,
    {
        let target = self.inner.resolve_target(target)?;
        Self::preserve_binding(ctx, target, |ctx| {
            self.inner.bind(ctx, Some(target))?;
            body(ctx, self)
        })
    }

    /// Binds the texture on the `index`-th unit, i.e. `GL_TEXTURE0 + index`, for the
    /// duration of `body` only. The active unit and the binding on that unit are both
    /// restored afterwards. An `index` past the last representable unit is an
    /// `Error::Argument`.
    pub fn bind_unit_with<C, F, R>(
        &mut self,
        ctx: &mut C,
        index: GLuint,
        target: Option<GLenum>,
        body: F,
    ) -> Result<R>
    where
        C: Context + ?Sized,
        F: FnOnce(&mut C, &mut Self) -> Result<R>,
    {
        let unit = gl::TEXTURE0.checked_add(index).ok_or_else(|| {
            Error::Argument(format!("Texture unit {} is out of range.", index))
        })?;

        Self::preserve_unit(ctx, |ctx| {
            ctx.active_texture(unit);
            self.bind_with(ctx, target, body)
        })
    }
}
