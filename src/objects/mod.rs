//! Wrappers of native objects.
//!
//! Every wrapper owns exactly one name. Buffers, textures and vertex arrays allocate
//! theirs on the first bind; shaders and programs have no bind point and allocate on
//! construction. Deleting resets the name to `0`, and deleting twice is a no-op.
//!
//! Binding through a wrapper changes the global state of the context. The `*_with`
//! variants scope such a change to a closure, and restore the previous state once
//! the closure is done, see `binding`.

pub mod binding;
pub mod buffer;
pub mod name;
pub mod program;
pub mod shader;
pub mod texture;
pub mod uniform;
pub mod vertex_array;

pub use self::buffer::{Buffer, BufferUsage};
pub use self::name::{delete_names, gen_names, BoundName, Names, ObjectName};
pub use self::program::{Program, ProgramBinary, ShaderRef};
pub use self::shader::{Shader, ShaderKind, ShaderSource};
pub use self::texture::Texture;
pub use self::uniform::UniformCache;
pub use self::vertex_array::VertexArray;

use std::ffi::CString;

use gl::types::*;

use crate::errors::*;

/// Converts `name` into a nul-terminated string for the native API.
pub(crate) fn c_name(name: &str) -> Result<CString> {
    CString::new(name.as_bytes())
        .map_err(|_| Error::Argument(format!("Name {:?} contains a nul byte.", name)))
}

/// Reads a string whose length, trailing nul included, has been queried as `len`. The
/// buffer is owned here and handed to `fill`, which returns how many bytes it wrote.
pub(crate) fn read_string<F>(len: GLint, fill: F) -> String
where
    F: FnOnce(&mut [u8]) -> usize,
{
    if len <= 0 {
        return String::new();
    }

    let mut buf = vec![0u8; len as usize];
    let written = fill(&mut buf).min(buf.len());
    buf.truncate(written);

    String::from_utf8_lossy(&buf).into_owned()
}
