use gl;
use gl::types::*;

use super::binding;
use super::name::BoundName;
use crate::context::{Context, ObjectKind};
use crate::errors::*;

/// Hint about how the data store of a buffer will be accessed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BufferUsage {
    /// Written once, drawn many times.
    Static,
    /// Written repeatedly, drawn many times.
    Dynamic,
    /// Written once, drawn at most a few times.
    Stream,
}

impl From<BufferUsage> for GLenum {
    fn from(usage: BufferUsage) -> Self {
        match usage {
            BufferUsage::Static => gl::STATIC_DRAW,
            BufferUsage::Dynamic => gl::DYNAMIC_DRAW,
            BufferUsage::Stream => gl::STREAM_DRAW,
        }
    }
}

/// A buffer object. The native name is allocated by the first bind.
#[derive(Debug)]
pub struct Buffer {
    inner: BoundName,
}

impl Buffer {
    /// `GL_ARRAY_BUFFER`, used when a buffer is bound without any target.
    pub const DEFAULT_TARGET: GLenum = gl::ARRAY_BUFFER;

    pub fn new(target: Option<GLenum>) -> Self {
        Buffer::with_name(target, 0)
    }

    /// Wraps an existing buffer `name`, which is owned by the wrapper from now on.
    pub fn with_name(target: Option<GLenum>, name: GLuint) -> Self {
        Buffer {
            inner: BoundName::new(ObjectKind::Buffer, target, name, Self::DEFAULT_TARGET),
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

    /// Reads the buffer bound at `target`.
    pub fn current_binding<C: Context + ?Sized>(ctx: &mut C, target: GLenum) -> Result<GLuint> {
        binding::current_binding(ctx, ObjectKind::Buffer, target)
    }

    /// Runs `body` and restores the buffer that was bound at `target` before it.
    pub fn preserve_binding<C, F, R>(ctx: &mut C, target: GLenum, body: F) -> Result<R>
    where
        C: Context + ?Sized,
        F: FnOnce(&mut C) -> Result<R>,
    {
        binding::preserve_binding(ctx, ObjectKind::Buffer, target, body)
    }

    pub fn is_buffer<C: Context + ?Sized>(&self, ctx: &mut C) -> bool {
        self.inner.name().is_live(ctx)
    }

    pub fn delete<C: Context + ?Sized>(&mut self, ctx: &mut C) {
        self.inner.name_mut().delete(ctx);
    }

    /// Binds the buffer, allocating it first if needed. Without a `target` the one of
    /// the previous bind is used, or `DEFAULT_TARGET` for the first bind.
    pub fn bind<C: Context + ?Sized>(&mut self, ctx: &mut C, target: Option<GLenum>) -> Result<()> {
        self.inner.bind(ctx, target)?;
        Ok(())
    }

    /// Binds the buffer for the duration of `body` only. The buffer that was bound at the
    /// same target before is bound again once `body` returns or fails.
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

    /// Creates a new data store filled with `data`, replacing the previous one.
    pub fn upload<C>(&mut self, ctx: &mut C, data: &[u8], usage: BufferUsage) -> Result<()>
    where
        C: Context + ?Sized,
    {
        self.bind_with(ctx, None, |ctx, buffer| {
            let target = buffer.target().unwrap_or(Self::DEFAULT_TARGET);
            ctx.buffer_data(target, data, usage.into());
            Ok(())
        })
    }

    /// Overwrites part of the data store, starting at `offset` bytes.
    pub fn upload_range<C>(&mut self, ctx: &mut C, offset: usize, data: &[u8]) -> Result<()>
    where
        C: Context + ?Sized,
    {
        self.bind_with(ctx, None, |ctx, buffer| {
            let target = buffer.target().unwrap_or(Self::DEFAULT_TARGET);
            ctx.buffer_sub_data(target, offset, data);
            Ok(())
        })
    }
}
