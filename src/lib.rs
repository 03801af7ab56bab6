//! # Crayon GL Auxiliary
//!
//! Object wrappers over a stateful OpenGL context. Buffers, textures and vertex
//! arrays allocate their names on the first bind, every `*_with` call puts the bindings
//! it touched back the way it found them, and programs remember the locations of
//! their uniforms between links.
//!
//! Every operation takes the context explicitly, as anything implementing
//! `context::Context`. `GLContext` forwards to the functions loaded into the `gl` crate,
//! and `HeadlessContext` simulates one in memory.
//!
//! ```rust,ignore
//! use crayon_glaux::prelude::*;
//!
//! let mut ctx = unsafe { GLContext::load_with(|s| window.get_proc_address(s) as *const _)? };
//!
//! let mut vbo = Buffer::new(None);
//! vbo.upload(&mut ctx, &vertices, BufferUsage::Static)?;
//!
//! let mut program = Program::new(&mut ctx)?;
//! program.attach_shader(&mut ctx, &vs)?;
//! program.attach_shader(&mut ctx, &fs)?;
//! program.link(&mut ctx);
//!
//! let tint = program.uniform_location(&mut ctx, "tint")?;
//! ```

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;

pub extern crate gl;

pub mod context;
pub mod errors;
pub mod objects;
pub mod prelude;
pub mod utils;
