use gl::types::*;

use super::binding::{self, VERTEX_ARRAY};
use super::name::BoundName;
use crate::context::{Context, ObjectKind};
use crate::errors::*;

/// A vertex array object. The native name is allocated by the first bind.
#[derive(Debug)]
pub struct VertexArray {
    inner: BoundName,
}

impl Default for VertexArray {
    fn default() -> Self {
        VertexArray::new()
    }
}

impl VertexArray {
    pub fn new() -> Self {
        VertexArray::with_name(0)
    }

    /// Wraps an existing vertex array `name`, which is owned by the wrapper from now on.
    pub fn with_name(name: GLuint) -> Self {
        VertexArray {
            inner: BoundName::new(ObjectKind::VertexArray, None, name, VERTEX_ARRAY),
        }
    }

    #[inline]
    pub fn name(&self) -> GLuint {
        self.inner.name().get()
    }

    pub fn current_binding<C: Context + ?Sized>(ctx: &mut C) -> Result<GLuint> {
        binding::current_binding(ctx, ObjectKind::VertexArray, VERTEX_ARRAY)
    }

    pub fn preserve_binding<C, F, R>(ctx: &mut C, body: F) -> Result<R>
    where
        C: Context + ?Sized,
        F: FnOnce(&mut C) -> Result<R>,
    {
        binding::preserve_binding(ctx, ObjectKind::VertexArray, VERTEX_ARRAY, body)
    }

    pub fn is_vertex_array<C: Context + ?Sized>(&self, ctx: &mut C) -> bool {
        self.inner.name().is_live(ctx)
    }

    pub fn delete<C: Context + ?Sized>(&mut self, ctx: &mut C) {
        self.inner.name_mut().delete(ctx);
    }

    pub fn bind<C: Context + ?Sized>(&mut self, ctx: &mut C) -> Result<()> {
        self.inner.bind(ctx, None)?;
        Ok(())
    }

    pub fn bind_with<C, F, R>(&mut self, ctx: &mut C, body: F) -> Result<R>
    where
        C: Context + ?Sized,
        F: FnOnce(&mut C, &mut Self) -> Result<R>,
    {
        Self::preserve_binding(ctx, |ctx| {
            self.inner.bind(ctx, None)?;
            body(ctx, self)
        })
    }
}
