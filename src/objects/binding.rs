//! Save-and-restore of the global binding slots.
//!
//! Every `preserve_*` function reads the name currently bound to a slot, runs the body
//! and binds the saved name back on every way out of the body: a normal return, an
//! error propagated with `?`, or a panic. Scopes nest; the innermost one restores first.
//!
//! The slots are never cached here, they are read from the context each time.

use gl;
use gl::types::*;

use crate::context::{Context, ObjectKind};
use crate::errors::*;
use crate::utils::finally;

/// The single bind point of vertex array objects.
pub const VERTEX_ARRAY: GLenum = 0x8074;

// `GL_TEXTURE_BUFFER_BINDING` shares its value with `GL_TEXTURE_BUFFER`.
const TEXTURE_BUFFER_BINDING: GLenum = 0x8C2A;

/// Buffer targets and the parameters that read their current binding.
pub const BUFFER_BINDINGS: &[(GLenum, GLenum)] = &[
    (gl::ARRAY_BUFFER, gl::ARRAY_BUFFER_BINDING),
    (gl::ATOMIC_COUNTER_BUFFER, gl::ATOMIC_COUNTER_BUFFER_BINDING),
    (gl::DISPATCH_INDIRECT_BUFFER, gl::DISPATCH_INDIRECT_BUFFER_BINDING),
    (gl::DRAW_INDIRECT_BUFFER, gl::DRAW_INDIRECT_BUFFER_BINDING),
    (gl::ELEMENT_ARRAY_BUFFER, gl::ELEMENT_ARRAY_BUFFER_BINDING),
    (gl::PIXEL_PACK_BUFFER, gl::PIXEL_PACK_BUFFER_BINDING),
    (gl::PIXEL_UNPACK_BUFFER, gl::PIXEL_UNPACK_BUFFER_BINDING),
    (gl::QUERY_BUFFER, gl::QUERY_BUFFER_BINDING),
    (gl::SHADER_STORAGE_BUFFER, gl::SHADER_STORAGE_BUFFER_BINDING),
    (gl::TEXTURE_BUFFER, TEXTURE_BUFFER_BINDING),
    (
        gl::TRANSFORM_FEEDBACK_BUFFER,
        gl::TRANSFORM_FEEDBACK_BUFFER_BINDING,
    ),
    (gl::UNIFORM_BUFFER, gl::UNIFORM_BUFFER_BINDING),
];

/// Texture targets and the parameters that read their binding on the active unit.
pub const TEXTURE_BINDINGS: &[(GLenum, GLenum)] = &[
    (gl::TEXTURE_1D, gl::TEXTURE_BINDING_1D),
    (gl::TEXTURE_2D, gl::TEXTURE_BINDING_2D),
    (gl::TEXTURE_3D, gl::TEXTURE_BINDING_3D),
    (gl::TEXTURE_1D_ARRAY, gl::TEXTURE_BINDING_1D_ARRAY),
    (gl::TEXTURE_2D_ARRAY, gl::TEXTURE_BINDING_2D_ARRAY),
    (gl::TEXTURE_RECTANGLE, gl::TEXTURE_BINDING_RECTANGLE),
    (gl::TEXTURE_CUBE_MAP, gl::TEXTURE_BINDING_CUBE_MAP),
    (gl::TEXTURE_CUBE_MAP_ARRAY, gl::TEXTURE_BINDING_CUBE_MAP_ARRAY),
    (gl::TEXTURE_BUFFER, gl::TEXTURE_BINDING_BUFFER),
    (gl::TEXTURE_2D_MULTISAMPLE, gl::TEXTURE_BINDING_2D_MULTISAMPLE),
    (
        gl::TEXTURE_2D_MULTISAMPLE_ARRAY,
        gl::TEXTURE_BINDING_2D_MULTISAMPLE_ARRAY,
    ),
];

pub const VERTEX_ARRAY_BINDINGS: &[(GLenum, GLenum)] =
    &[(VERTEX_ARRAY, gl::VERTEX_ARRAY_BINDING)];

// `GL_DRAW_FRAMEBUFFER_BINDING` is an alias of `GL_FRAMEBUFFER_BINDING`.
pub const FRAMEBUFFER_BINDINGS: &[(GLenum, GLenum)] = &[
    (gl::FRAMEBUFFER, gl::FRAMEBUFFER_BINDING),
    (gl::READ_FRAMEBUFFER, gl::READ_FRAMEBUFFER_BINDING),
];

pub const RENDERBUFFER_BINDINGS: &[(GLenum, GLenum)] =
    &[(gl::RENDERBUFFER, gl::RENDERBUFFER_BINDING)];

/// Returns the target-to-parameter table of `kind`. Kinds without queryable bind
/// points have an empty table.
pub fn bindings(kind: ObjectKind) -> &'static [(GLenum, GLenum)] {
    match kind {
        ObjectKind::Buffer => BUFFER_BINDINGS,
        ObjectKind::Texture => TEXTURE_BINDINGS,
        ObjectKind::VertexArray => VERTEX_ARRAY_BINDINGS,
        ObjectKind::Framebuffer => FRAMEBUFFER_BINDINGS,
        ObjectKind::Renderbuffer => RENDERBUFFER_BINDINGS,
        _ => &[],
    }
}

/// Returns the parameter that reads the name bound at `target`.
pub fn binding_parameter(kind: ObjectKind, target: GLenum) -> Result<GLenum> {
    bindings(kind)
        .iter()
        .find(|v| v.0 == target)
        .map(|v| v.1)
        .ok_or_else(|| {
            Error::Argument(format!(
                "No queryable {} binding target for 0x{:04X}.",
                kind, target
            ))
        })
}

/// Reads the name bound at `target`, on the active unit for textures.
pub fn current_binding<C>(ctx: &mut C, kind: ObjectKind, target: GLenum) -> Result<GLuint>
where
    C: Context + ?Sized,
{
    let pname = binding_parameter(kind, target)?;
    Ok(ctx.get_integer(pname) as GLuint)
}

/// Runs `body` and restores whatever was bound at `target` before it.
///
/// Texture bindings belong to the active unit, so for `ObjectKind::Texture` this also
/// preserves the active unit, see `preserve_texture_binding`.
pub fn preserve_binding<C, F, R>(ctx: &mut C, kind: ObjectKind, target: GLenum, body: F) -> Result<R>
where
    C: Context + ?Sized,
    F: FnOnce(&mut C) -> Result<R>,
{
    if kind == ObjectKind::Texture {
        return preserve_texture_binding(ctx, target, body);
    }

    let previous = current_binding(ctx, kind, target)?;
    let mut guard = finally(ctx, move |ctx| {
        trace!("Restores {} binding 0x{:04X} to {}.", kind, target, previous);
        ctx.bind_name(kind, target, previous);
    });

    body(&mut **guard)
}

/// Reads the active texture unit, e.g. `GL_TEXTURE0`.
#[inline]
pub fn current_unit<C: Context + ?Sized>(ctx: &mut C) -> GLenum {
    ctx.get_integer(gl::ACTIVE_TEXTURE) as GLenum
}

/// Runs `body` and re-activates the texture unit that was active before it.
pub fn preserve_unit<C, F, R>(ctx: &mut C, body: F) -> Result<R>
where
    C: Context + ?Sized,
    F: FnOnce(&mut C) -> Result<R>,
{
    let unit = current_unit(ctx);
    let mut guard = finally(ctx, move |ctx| ctx.active_texture(unit));
    body(&mut **guard)
}

/// Runs `body` and restores both the active unit and the texture bound at `target` on
/// that unit. The binding is restored first, then the unit.
pub fn preserve_texture_binding<C, F, R>(ctx: &mut C, target: GLenum, body: F) -> Result<R>
where
    C: Context + ?Sized,
    F: FnOnce(&mut C) -> Result<R>,
{
    let pname = binding_parameter(ObjectKind::Texture, target)?;

    preserve_unit(ctx, |ctx| {
        let unit = current_unit(ctx);
        let previous = ctx.get_integer(pname) as GLuint;

        let mut guard = finally(ctx, move |ctx| {
            trace!("Restores texture binding 0x{:04X} to {}.", target, previous);
            // The saved name belongs to `unit`, which the body might have switched away from.
            ctx.active_texture(unit);
            ctx.bind_name(ObjectKind::Texture, target, previous);
        });

        body(&mut **guard)
    })
}

/// Reads the name of the program in use.
#[inline]
pub fn current_program<C: Context + ?Sized>(ctx: &mut C) -> GLuint {
    ctx.get_integer(gl::CURRENT_PROGRAM) as GLuint
}

/// Runs `body` and puts the program that was in use before it back into use.
pub fn preserve_program<C, F, R>(ctx: &mut C, body: F) -> Result<R>
where
    C: Context + ?Sized,
    F: FnOnce(&mut C) -> Result<R>,
{
    let previous = current_program(ctx);
    let mut guard = finally(ctx, move |ctx| {
        trace!("Restores current program to {}.", previous);
        ctx.use_program(previous);
    });

    body(&mut **guard)
}
