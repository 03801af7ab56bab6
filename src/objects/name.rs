//! Lazily allocated object names.

use gl::types::*;
use smallvec::SmallVec;

use super::binding;
use crate::context::{Context, ObjectKind};
use crate::errors::*;

/// Names returned by a batch allocation, in the order the context produced them.
pub type Names = SmallVec<[GLuint; 4]>;

/// Reserves `count` new names of `kind` with one batch call.
///
/// The i-th returned name is the i-th name written by the context. If the context
/// hands out the `0` sentinel for any of them, the valid ones are released again and
/// the call fails with `Error::CreateFailure`.
pub fn gen_names<C>(ctx: &mut C, kind: ObjectKind, count: usize) -> Result<Names>
where
    C: Context + ?Sized,
{
    let mut names = Names::new();
    if count == 0 {
        return Ok(names);
    }

    names.extend(::std::iter::repeat(0).take(count));
    ctx.gen_names(kind, &mut names);

    if names.iter().any(|v| *v == 0) {
        delete_names(ctx, kind, &names);

        return Err(Error::CreateFailure(format!(
            "Unable to allocate {} {} object(s).",
            count, kind
        )));
    }

    debug!("Allocates {} name(s) {:?}.", kind, &names[..]);
    Ok(names)
}

/// Releases `names` with one batch call. Sentinel names are skipped, and nothing is
/// called if no name is left.
pub fn delete_names<C>(ctx: &mut C, kind: ObjectKind, names: &[GLuint])
where
    C: Context + ?Sized,
{
    let names: Names = names.iter().cloned().filter(|v| *v != 0).collect();
    if names.is_empty() {
        return;
    }

    debug!("Deletes {} name(s) {:?}.", kind, &names[..]);
    ctx.delete_names(kind, &names);
}

/// The name of a single object of `kind`, allocated on demand.
///
/// A zero name means there is no native object behind this one, either because it was
/// never allocated or because it has been deleted.
#[derive(Debug, PartialEq, Eq)]
pub struct ObjectName {
    kind: ObjectKind,
    name: GLuint,
}

impl ObjectName {
    #[inline]
    pub fn new(kind: ObjectKind) -> Self {
        ObjectName { kind, name: 0 }
    }

    /// Adopts an existing `name`, `0` is treated as unallocated.
    #[inline]
    pub fn with_name(kind: ObjectKind, name: GLuint) -> Self {
        ObjectName { kind, name }
    }

    #[inline]
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    #[inline]
    pub fn get(&self) -> GLuint {
        self.name
    }

    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.name != 0
    }

    /// Allocates a name if there is none yet. Repeated calls return the same name
    /// without touching the context.
    pub fn ensure_allocated<C>(&mut self, ctx: &mut C) -> Result<GLuint>
    where
        C: Context + ?Sized,
    {
        if self.name == 0 {
            self.name = gen_names(ctx, self.kind, 1)?[0];
        }

        Ok(self.name)
    }

    /// Releases the native object. The name is reset to `0` whatever the context does,
    /// since deletion has no success signal. Deleting an unallocated name is a no-op.
    pub fn delete<C>(&mut self, ctx: &mut C)
    where
        C: Context + ?Sized,
    {
        if self.name != 0 {
            delete_names(ctx, self.kind, &[self.name]);
            self.name = 0;
        }
    }

    /// Asks the context whether the name refers to a live object. Unallocated names are
    /// answered without asking.
    pub fn is_live<C>(&self, ctx: &mut C) -> bool
    where
        C: Context + ?Sized,
    {
        self.name != 0 && ctx.is_name(self.kind, self.name)
    }
}

/// An `ObjectName` that is attached to one bind target for its whole life.
#[derive(Debug)]
pub struct BoundName {
    name: ObjectName,
    target: Option<GLenum>,
    default_target: GLenum,
}

impl BoundName {
    pub fn new(kind: ObjectKind, target: Option<GLenum>, name: GLuint, default: GLenum) -> Self {
        BoundName {
            name: ObjectName::with_name(kind, name),
            target,
            default_target: default,
        }
    }

    #[inline]
    pub fn name(&self) -> &ObjectName {
        &self.name
    }

    #[inline]
    pub fn name_mut(&mut self) -> &mut ObjectName {
        &mut self.name
    }

    #[inline]
    pub fn target(&self) -> Option<GLenum> {
        self.target
    }

    /// Picks the target of the next bind: the requested one, else the remembered one, else
    /// the default. The first pick is remembered, and a later request for a different
    /// target is rejected.
    pub fn resolve_target(&mut self, requested: Option<GLenum>) -> Result<GLenum> {
        let kind = self.name.kind();
        let target = match (requested, self.target) {
            (Some(v), Some(remembered)) if v != remembered => {
                return Err(Error::Argument(format!(
                    "The {} {} is attached to target 0x{:04X}, and can not be bound to 0x{:04X}.",
                    kind,
                    self.name.get(),
                    remembered,
                    v
                )));
            }
            (Some(v), _) => v,
            (None, Some(remembered)) => remembered,
            (None, None) => self.default_target,
        };

        binding::binding_parameter(kind, target)?;
        self.target = Some(target);
        Ok(target)
    }

    /// Allocates the name if needed, and binds it to the resolved target.
    pub fn bind<C>(&mut self, ctx: &mut C, requested: Option<GLenum>) -> Result<GLenum>
    where
        C: Context + ?Sized,
    {
        let target = self.resolve_target(requested)?;
        let name = self.name.ensure_allocated(ctx)?;
        ctx.bind_name(self.name.kind(), target, name);
        Ok(target)
    }
}
