use std::ffi::CStr;
use std::marker::PhantomData;
use std::os::raw::c_void;
use std::ptr;

use gl;
use gl::types::*;
use smallvec::SmallVec;

use super::info::ContextInfo;
use super::{Context, ObjectKind};
use crate::errors::*;

/// Batch entry points shared by every kind of object name.
struct NameEntries {
    gen: unsafe fn(GLsizei, *mut GLuint),
    delete: unsafe fn(GLsizei, *const GLuint),
    is: unsafe fn(GLuint) -> GLboolean,
}

fn entries(kind: ObjectKind) -> NameEntries {
    match kind {
        ObjectKind::Buffer => NameEntries {
            gen: gl::GenBuffers,
            delete: gl::DeleteBuffers,
            is: gl::IsBuffer,
        },
        ObjectKind::Texture => NameEntries {
            gen: gl::GenTextures,
            delete: gl::DeleteTextures,
            is: gl::IsTexture,
        },
        ObjectKind::VertexArray => NameEntries {
            gen: gl::GenVertexArrays,
            delete: gl::DeleteVertexArrays,
            is: gl::IsVertexArray,
        },
        ObjectKind::Query => NameEntries {
            gen: gl::GenQueries,
            delete: gl::DeleteQueries,
            is: gl::IsQuery,
        },
        ObjectKind::Sampler => NameEntries {
            gen: gl::GenSamplers,
            delete: gl::DeleteSamplers,
            is: gl::IsSampler,
        },
        ObjectKind::Framebuffer => NameEntries {
            gen: gl::GenFramebuffers,
            delete: gl::DeleteFramebuffers,
            is: gl::IsFramebuffer,
        },
        ObjectKind::Renderbuffer => NameEntries {
            gen: gl::GenRenderbuffers,
            delete: gl::DeleteRenderbuffers,
            is: gl::IsRenderbuffer,
        },
        ObjectKind::ProgramPipeline => NameEntries {
            gen: gl::GenProgramPipelines,
            delete: gl::DeleteProgramPipelines,
            is: gl::IsProgramPipeline,
        },
        ObjectKind::TransformFeedback => NameEntries {
            gen: gl::GenTransformFeedbacks,
            delete: gl::DeleteTransformFeedbacks,
            is: gl::IsTransformFeedback,
        },
    }
}

/// A `Context` backed by the OpenGL functions loaded into the `gl` crate.
pub struct GLContext {
    // The functions belong to the context current on the thread that loaded them.
    _thread_bound: PhantomData<*const ()>,
}

impl GLContext {
    /// Loads the OpenGL functions with `loader`, usually the `get_proc_address` of the
    /// window that owns the context.
    ///
    /// # Unsafe
    ///
    /// The context must be current on this thread, and must stay current for as long as
    /// the returned `GLContext` is in use.
    pub unsafe fn load_with<F>(loader: F) -> Result<Self>
    where
        F: FnMut(&str) -> *const c_void,
    {
        gl::load_with(loader);

        if !gl::GenBuffers::is_loaded() || !gl::GetIntegerv::is_loaded() {
            return Err(Error::CreateFailure(
                "OpenGL functions are not available from the loader.".into(),
            ));
        }

        let mut ctx = GLContext {
            _thread_bound: PhantomData,
        };

        let info = ContextInfo::query(&mut ctx)?;
        info!("GLContext {:#?}", info);
        Ok(ctx)
    }

    #[inline]
    fn read_string(ptr: *const GLubyte) -> String {
        if ptr.is_null() {
            return String::new();
        }

        unsafe { CStr::from_ptr(ptr as *const _) }
            .to_string_lossy()
            .into_owned()
    }

    #[inline]
    fn len(v: usize) -> GLsizei {
        v.min(GLsizei::max_value() as usize) as GLsizei
    }
}

impl Context for GLContext {
    fn gen_names(&mut self, kind: ObjectKind, names: &mut [GLuint]) {
        if names.is_empty() {
            return;
        }

        unsafe { (entries(kind).gen)(Self::len(names.len()), names.as_mut_ptr()) }
    }

    fn delete_names(&mut self, kind: ObjectKind, names: &[GLuint]) {
        if names.is_empty() {
            return;
        }

        unsafe { (entries(kind).delete)(Self::len(names.len()), names.as_ptr()) }
    }

    fn is_name(&mut self, kind: ObjectKind, name: GLuint) -> bool {
        unsafe { (entries(kind).is)(name) != gl::FALSE }
    }

    fn bind_name(&mut self, kind: ObjectKind, target: GLenum, name: GLuint) {
        unsafe {
            match kind {
                ObjectKind::Buffer => gl::BindBuffer(target, name),
                ObjectKind::Texture => gl::BindTexture(target, name),
                ObjectKind::VertexArray => gl::BindVertexArray(name),
                ObjectKind::Sampler => gl::BindSampler(target, name),
                ObjectKind::Framebuffer => gl::BindFramebuffer(target, name),
                ObjectKind::Renderbuffer => gl::BindRenderbuffer(target, name),
                ObjectKind::ProgramPipeline => gl::BindProgramPipeline(name),
                ObjectKind::TransformFeedback => gl::BindTransformFeedback(target, name),
                // Queries are made active with `glBeginQuery`, they have no bind point.
                ObjectKind::Query => {}
            }
        }
    }

    fn active_texture(&mut self, unit: GLenum) {
        unsafe { gl::ActiveTexture(unit) }
    }

    fn get_error(&mut self) -> GLenum {
        unsafe { gl::GetError() }
    }

    fn get_integer(&mut self, pname: GLenum) -> GLint {
        let mut v = 0;
        unsafe { gl::GetIntegerv(pname, &mut v) };
        v
    }

    fn get_integer64(&mut self, pname: GLenum) -> GLint64 {
        let mut v = 0;
        unsafe { gl::GetInteger64v(pname, &mut v) };
        v
    }

    fn get_float(&mut self, pname: GLenum) -> GLfloat {
        let mut v = 0.0;
        unsafe { gl::GetFloatv(pname, &mut v) };
        v
    }

    fn get_boolean(&mut self, pname: GLenum) -> bool {
        let mut v = gl::FALSE;
        unsafe { gl::GetBooleanv(pname, &mut v) };
        v != gl::FALSE
    }

    fn get_string(&mut self, name: GLenum) -> String {
        Self::read_string(unsafe { gl::GetString(name) })
    }

    fn get_string_indexed(&mut self, name: GLenum, index: GLuint) -> String {
        Self::read_string(unsafe { gl::GetStringi(name, index) })
    }

    fn buffer_data(&mut self, target: GLenum, data: &[u8], usage: GLenum) {
        let value = if data.is_empty() {
            ptr::null()
        } else {
            data.as_ptr() as *const c_void
        };

        unsafe { gl::BufferData(target, data.len() as GLsizeiptr, value, usage) }
    }

    fn buffer_sub_data(&mut self, target: GLenum, offset: usize, data: &[u8]) {
        if data.is_empty() {
            return;
        }

        unsafe {
            gl::BufferSubData(
                target,
                offset as GLintptr,
                data.len() as GLsizeiptr,
                data.as_ptr() as *const c_void,
            )
        }
    }

    fn create_shader(&mut self, kind: GLenum) -> GLuint {
        unsafe { gl::CreateShader(kind) }
    }

    fn delete_shader(&mut self, shader: GLuint) {
        unsafe { gl::DeleteShader(shader) }
    }

    fn is_shader(&mut self, shader: GLuint) -> bool {
        unsafe { gl::IsShader(shader) != gl::FALSE }
    }

    fn shader_source(&mut self, shader: GLuint, sources: &[&str]) {
        let pointers: SmallVec<[*const GLchar; 4]> = sources
            .iter()
            .map(|v| v.as_ptr() as *const GLchar)
            .collect();

        let lengths: SmallVec<[GLint; 4]> = sources.iter().map(|v| v.len() as GLint).collect();

        unsafe {
            gl::ShaderSource(
                shader,
                Self::len(sources.len()),
                pointers.as_ptr(),
                lengths.as_ptr(),
            )
        }
    }

    fn compile_shader(&mut self, shader: GLuint) {
        unsafe { gl::CompileShader(shader) }
    }

    fn get_shader_iv(&mut self, shader: GLuint, pname: GLenum) -> GLint {
        let mut v = 0;
        unsafe { gl::GetShaderiv(shader, pname, &mut v) };
        v
    }

    fn get_shader_info_log(&mut self, shader: GLuint, buf: &mut [u8]) -> usize {
        let mut written = 0;
        unsafe {
            gl::GetShaderInfoLog(
                shader,
                Self::len(buf.len()),
                &mut written,
                buf.as_mut_ptr() as *mut GLchar,
            )
        };

        written.max(0) as usize
    }

    fn get_shader_source(&mut self, shader: GLuint, buf: &mut [u8]) -> usize {
        let mut written = 0;
        unsafe {
            gl::GetShaderSource(
                shader,
                Self::len(buf.len()),
                &mut written,
                buf.as_mut_ptr() as *mut GLchar,
            )
        };

        written.max(0) as usize
    }

    fn create_program(&mut self) -> GLuint {
        unsafe { gl::CreateProgram() }
    }

    fn delete_program(&mut self, program: GLuint) {
        unsafe { gl::DeleteProgram(program) }
    }

    fn is_program(&mut self, program: GLuint) -> bool {
        unsafe { gl::IsProgram(program) != gl::FALSE }
    }

    fn attach_shader(&mut self, program: GLuint, shader: GLuint) {
        unsafe { gl::AttachShader(program, shader) }
    }

    fn detach_shader(&mut self, program: GLuint, shader: GLuint) {
        unsafe { gl::DetachShader(program, shader) }
    }

    fn link_program(&mut self, program: GLuint) {
        unsafe { gl::LinkProgram(program) }
    }

    fn validate_program(&mut self, program: GLuint) {
        unsafe { gl::ValidateProgram(program) }
    }

    fn use_program(&mut self, program: GLuint) {
        unsafe { gl::UseProgram(program) }
    }

    fn get_program_iv(&mut self, program: GLuint, pname: GLenum) -> GLint {
        let mut v = 0;
        unsafe { gl::GetProgramiv(program, pname, &mut v) };
        v
    }

    fn get_program_info_log(&mut self, program: GLuint, buf: &mut [u8]) -> usize {
        let mut written = 0;
        unsafe {
            gl::GetProgramInfoLog(
                program,
                Self::len(buf.len()),
                &mut written,
                buf.as_mut_ptr() as *mut GLchar,
            )
        };

        written.max(0) as usize
    }

    fn get_uniform_location(&mut self, program: GLuint, name: &CStr) -> GLint {
        unsafe { gl::GetUniformLocation(program, name.as_ptr()) }
    }

    fn get_subroutine_uniform_location(
        &mut self,
        program: GLuint,
        shader_kind: GLenum,
        name: &CStr,
    ) -> GLint {
        unsafe { gl::GetSubroutineUniformLocation(program, shader_kind, name.as_ptr()) }
    }

    fn bind_attrib_location(&mut self, program: GLuint, index: GLuint, name: &CStr) {
        unsafe { gl::BindAttribLocation(program, index, name.as_ptr()) }
    }

    fn bind_frag_data_location(&mut self, program: GLuint, color: GLuint, name: &CStr) {
        unsafe { gl::BindFragDataLocation(program, color, name.as_ptr()) }
    }

    fn program_binary(&mut self, program: GLuint, format: GLenum, data: &[u8]) {
        unsafe {
            gl::ProgramBinary(
                program,
                format,
                data.as_ptr() as *const c_void,
                Self::len(data.len()),
            )
        }
    }

    fn get_program_binary(
        &mut self,
        program: GLuint,
        format: &mut GLenum,
        buf: &mut [u8],
    ) -> usize {
        let mut written = 0;
        unsafe {
            gl::GetProgramBinary(
                program,
                Self::len(buf.len()),
                &mut written,
                format,
                buf.as_mut_ptr() as *mut c_void,
            )
        };

        written.max(0) as usize
    }
}

