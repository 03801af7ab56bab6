//! Per-program cache of uniform locations.

use std::collections::HashMap;
use std::ffi::CString;

use gl::types::*;

use super::c_name;
use crate::context::Context;
use crate::errors::*;

/// The location the context reports for names that are not active uniforms.
pub const UNKNOWN_LOCATION: GLint = -1;

#[derive(Debug)]
struct Entry {
    c_name: CString,
    // `None` until the name is resolved against a linked program.
    location: Option<GLint>,
}

/// Uniform locations of one program, keyed by the exact uniform name.
///
/// Locations belong to one link of the program. After every successful link, or binary
/// load, `reload` has to be called so that every known name, hinted or looked up, is
/// resolved again.
#[derive(Debug, Default)]
pub struct UniformCache {
    entries: HashMap<String, Entry>,
}

impl UniformCache {
    pub fn new() -> Self {
        UniformCache::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registers `name` without resolving it. It will be resolved by the next `reload`
    /// or `location`. Hinting a known name keeps its location.
    pub fn hint(&mut self, name: &str) -> Result<()> {
        if !self.entries.contains_key(name) {
            let entry = Entry {
                c_name: c_name(name)?,
                location: None,
            };

            self.entries.insert(name.to_owned(), entry);
        }

        Ok(())
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns the cached location of `name`, without asking the context. Hinted but
    /// unresolved names return `None`.
    pub fn cached(&self, name: &str) -> Option<GLint> {
        self.entries.get(name).and_then(|v| v.location)
    }

    /// Returns the location of `name` in `program`, asking the context only if it has
    /// not been resolved yet. Unknown names resolve to `UNKNOWN_LOCATION`, which is
    /// cached as well.
    pub fn location<C>(&mut self, ctx: &mut C, program: GLuint, name: &str) -> Result<GLint>
    where
        C: Context + ?Sized,
    {
        if let Some(location) = self.cached(name) {
            return Ok(location);
        }

        let c_name = match self.entries.remove(name) {
            Some(entry) => entry.c_name,
            None => c_name(name)?,
        };

        let location = ctx.get_uniform_location(program, &c_name);
        let entry = Entry {
            c_name,
            location: Some(location),
        };

        self.entries.insert(name.to_owned(), entry);
        Ok(location)
    }

    /// Resolves every known name against `program` again, overwriting stale locations.
    pub fn reload<C>(&mut self, ctx: &mut C, program: GLuint)
    where
        C: Context + ?Sized,
    {
        for (name, entry) in &mut self.entries {
            let location = ctx.get_uniform_location(program, &entry.c_name);
            trace!("Resolves uniform {:?} of program {} to {}.", name, program, location);
            entry.location = Some(location);
        }
    }

    /// Forgets every name, hinted ones included.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates the known names with their cached locations.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<GLint>)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.location))
    }
}
