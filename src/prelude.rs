pub use crate::context::{Context, ContextInfo, GLContext, HeadlessContext, HeadlessParams, ObjectKind, Version};
pub use crate::errors::{assert_no_error, check, Error, Result, StateCode};
pub use crate::objects::{
    Buffer, BufferUsage, Program, ProgramBinary, Shader, ShaderKind, ShaderRef, ShaderSource,
    Texture, UniformCache, VertexArray,
};
