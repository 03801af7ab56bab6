//! An in-memory context that mimics the observable behavior of a real one, without
//! touching any GPU.
//!
//! It keeps track of names, bindings, the active texture unit, the program in use and
//! the sticky error flag, and it records the calls it receives so the protocol of the
//! wrappers can be checked. Shaders "compile" unless their source is empty or contains
//! an `#error` directive; programs "link" when every attached shader compiled, and
//! expose the uniforms declared in their shaders, in order of declaration.

use std::collections::HashMap;
use std::ffi::CStr;
use std::marker::PhantomData;

use gl;
use gl::types::*;

use super::{Context, ObjectKind};
use crate::objects::binding;

/// The only binary format accepted by `HeadlessContext`.
pub const HEADLESS_BINARY_FORMAT: GLenum = 0x4845;

const BINARY_MAGIC: &[u8] = b"headless-program\n";

/// Configuration of a `HeadlessContext`.
#[derive(Debug, Clone)]
pub struct HeadlessParams {
    pub version: String,
    pub vendor: String,
    pub renderer: String,
    pub shading_language_version: String,
    pub extensions: Vec<String>,
    /// The first name handed out for every kind of object, shaders and programs included.
    pub first_name: GLuint,
    /// Number of texture units, `GL_TEXTURE0` to `GL_TEXTURE0 + texture_units - 1`.
    pub texture_units: u32,
    /// Kinds whose batch allocations hand out the `0` sentinel.
    pub exhausted: Vec<ObjectKind>,
    /// Makes shader and program creation hand out the `0` sentinel.
    pub exhausted_objects: bool,
}

impl Default for HeadlessParams {
    fn default() -> Self {
        HeadlessParams {
            version: "4.5.0 Headless".into(),
            vendor: "Crayon".into(),
            renderer: "Headless".into(),
            shading_language_version: "4.50".into(),
            extensions: vec![
                "GL_ARB_get_program_binary".into(),
                "GL_ARB_vertex_array_object".into(),
            ],
            first_name: 1,
            texture_units: 16,
            exhausted: Vec::new(),
            exhausted_objects: false,
        }
    }
}

/// A call received by a `HeadlessContext`. Queries that have no side effect other than
/// their cost are only recorded when the wrappers are expected to avoid them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GenNames(ObjectKind, Vec<GLuint>),
    DeleteNames(ObjectKind, Vec<GLuint>),
    IsName(ObjectKind, GLuint),
    BindName(ObjectKind, GLenum, GLuint),
    ActiveTexture(GLenum),
    GetError,
    GetInteger(GLenum),
    BufferData(GLenum, usize, GLenum),
    BufferSubData(GLenum, usize, usize),
    CreateShader(GLenum),
    DeleteShader(GLuint),
    ShaderSource(GLuint, Vec<String>),
    CompileShader(GLuint),
    CreateProgram,
    DeleteProgram(GLuint),
    AttachShader(GLuint, GLuint),
    DetachShader(GLuint, GLuint),
    LinkProgram(GLuint),
    ValidateProgram(GLuint),
    UseProgram(GLuint),
    GetUniformLocation(GLuint, String),
    ProgramBinary(GLuint, GLenum, usize),
    GetProgramBinary(GLuint),
}

#[derive(Debug)]
struct HeadlessShader {
    kind: GLenum,
    sources: Vec<String>,
    compiled: bool,
    log: String,
    deleted: bool,
}

#[derive(Debug, Default)]
struct HeadlessProgram {
    shaders: Vec<GLuint>,
    linked: bool,
    validated: bool,
    log: String,
    uniforms: Vec<String>,
    attributes: HashMap<String, GLuint>,
    outputs: HashMap<String, GLuint>,
}

#[derive(Debug)]
pub struct HeadlessContext {
    params: HeadlessParams,
    calls: Vec<Call>,
    error: GLenum,
    next_names: HashMap<ObjectKind, GLuint>,
    // Reserved names, and whether they have been bound once.
    names: HashMap<(ObjectKind, GLuint), bool>,
    // Keyed by kind, target and texture unit (`0` for non-texture kinds).
    bindings: HashMap<(ObjectKind, GLenum, GLenum), GLuint>,
    unit: GLenum,
    program: GLuint,
    next_object: GLuint,
    shaders: HashMap<GLuint, HeadlessShader>,
    programs: HashMap<GLuint, HeadlessProgram>,
    buffers: HashMap<GLuint, Vec<u8>>,
    _thread_bound: PhantomData<*const ()>,
}

impl Default for HeadlessContext {
    fn default() -> Self {
        HeadlessContext::new()
    }
}

impl HeadlessContext {
    pub fn new() -> Self {
        HeadlessContext::with_params(HeadlessParams::default())
    }

    pub fn with_params(params: HeadlessParams) -> Self {
        let first = params.first_name.max(1);

        HeadlessContext {
            params,
            calls: Vec::new(),
            error: gl::NO_ERROR,
            next_names: HashMap::new(),
            names: HashMap::new(),
            bindings: HashMap::new(),
            unit: gl::TEXTURE0,
            program: 0,
            next_object: first,
            shaders: HashMap::new(),
            programs: HashMap::new(),
            buffers: HashMap::new(),
            _thread_bound: PhantomData,
        }
    }

    #[inline]
    pub fn params(&self) -> &HeadlessParams {
        &self.params
    }

    /// The calls received so far, oldest first.
    #[inline]
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Returns and forgets the calls received so far.
    pub fn take_calls(&mut self) -> Vec<Call> {
        ::std::mem::replace(&mut self.calls, Vec::new())
    }

    /// Raises the sticky error flag, unless an error is already pending.
    pub fn raise(&mut self, code: GLenum) {
        if self.error == gl::NO_ERROR {
            self.error = code;
        }
    }

    /// Peeks at the sticky error flag without clearing it.
    #[inline]
    pub fn pending_error(&self) -> GLenum {
        self.error
    }

    /// The name bound at `target`, on the active unit for textures.
    pub fn binding(&self, kind: ObjectKind, target: GLenum) -> GLuint {
        let unit = self.unit_of(kind);
        self.bindings
            .get(&(kind, target, unit))
            .cloned()
            .unwrap_or(0)
    }

    /// The texture bound at `target` on `unit`, e.g. `GL_TEXTURE1`.
    pub fn texture_binding(&self, unit: GLenum, target: GLenum) -> GLuint {
        self.bindings
            .get(&(ObjectKind::Texture, target, unit))
            .cloned()
            .unwrap_or(0)
    }

    #[inline]
    pub fn active_unit(&self) -> GLenum {
        self.unit
    }

    #[inline]
    pub fn program_in_use(&self) -> GLuint {
        self.program
    }

    /// Number of names of `kind` that are reserved and not deleted yet.
    pub fn reserved_names(&self, kind: ObjectKind) -> usize {
        self.names.keys().filter(|v| v.0 == kind).count()
    }

    /// The data store of the buffer `name`.
    pub fn buffer_contents(&self, name: GLuint) -> Option<&[u8]> {
        self.buffers.get(&name).map(|v| v.as_slice())
    }

    /// The source strings of the shader `name`, as submitted.
    pub fn shader_sources(&self, name: GLuint) -> Option<&[String]> {
        self.shaders.get(&name).map(|v| v.sources.as_slice())
    }

    /// The shaders attached to the program `name`, in order of attachment.
    pub fn attached_shaders(&self, name: GLuint) -> Option<&[GLuint]> {
        self.programs.get(&name).map(|v| v.shaders.as_slice())
    }

    #[inline]
    fn unit_of(&self, kind: ObjectKind) -> GLenum {
        if kind == ObjectKind::Texture {
            self.unit
        } else {
            0
        }
    }

    fn integer(&mut self, pname: GLenum) -> GLint {
        match pname {
            gl::ACTIVE_TEXTURE => return self.unit as GLint,
            gl::CURRENT_PROGRAM => return self.program as GLint,
            gl::NUM_EXTENSIONS => return self.params.extensions.len() as GLint,
            gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS => return self.params.texture_units as GLint,
            _ => {}
        }

        for kind in ObjectKind::ALL.iter() {
            for &(target, v) in binding::bindings(*kind) {
                if v == pname {
                    return self.binding(*kind, target) as GLint;
                }
            }
        }

        self.raise(gl::INVALID_ENUM);
        0
    }

    fn shader_source_text(shader: &HeadlessShader) -> String {
        shader.sources.concat()
    }

    fn write_c_string(src: &str, buf: &mut [u8]) -> usize {
        if buf.is_empty() {
            return 0;
        }

        let n = src.len().min(buf.len() - 1);
        buf[..n].copy_from_slice(&src.as_bytes()[..n]);
        buf[n] = 0;
        n
    }

    fn c_string_len(src: &str) -> GLint {
        if src.is_empty() {
            0
        } else {
            src.len() as GLint + 1
        }
    }

    fn declared_uniforms(source: &str, uniforms: &mut Vec<String>) {
        for statement in source.split(';') {
            // Uniform blocks are not plain uniforms.
            if statement.contains('{') || statement.contains('}') {
                continue;
            }

            let tokens: Vec<&str> = statement.split_whitespace().collect();
            let pos = match tokens.iter().position(|v| *v == "uniform") {
                Some(pos) => pos,
                None => continue,
            };

            if tokens.len() < pos + 3 {
                continue;
            }

            if let Some(name) = tokens[tokens.len() - 1].split('[').next() {
                if !name.is_empty() && !uniforms.iter().any(|v| v == name) {
                    uniforms.push(name.to_owned());
                }
            }
        }
    }

    fn encode_binary(program: &HeadlessProgram) -> Vec<u8> {
        let mut data = BINARY_MAGIC.to_vec();
        data.extend_from_slice(program.uniforms.join("\n").as_bytes());
        data
    }
}

impl Context for HeadlessContext {
    fn gen_names(&mut self, kind: ObjectKind, names: &mut [GLuint]) {
        let exhausted = self.params.exhausted.contains(&kind);

        for v in names.iter_mut() {
            if exhausted {
                *v = 0;
                continue;
            }

            let first = self.params.first_name.max(1);
            let next = self.next_names.entry(kind).or_insert(first);
            *v = *next;
            *next += 1;

            self.names.insert((kind, *v), false);
        }

        self.calls.push(Call::GenNames(kind, names.to_vec()));
    }

    fn delete_names(&mut self, kind: ObjectKind, names: &[GLuint]) {
        self.calls.push(Call::DeleteNames(kind, names.to_vec()));

        for &name in names {
            if name == 0 || self.names.remove(&(kind, name)).is_none() {
                continue;
            }

            for (key, v) in self.bindings.iter_mut() {
                if key.0 == kind && *v == name {
                    *v = 0;
                }
            }

            if kind == ObjectKind::Buffer {
                self.buffers.remove(&name);
            }
        }
    }

    fn is_name(&mut self, kind: ObjectKind, name: GLuint) -> bool {
        self.calls.push(Call::IsName(kind, name));
        self.names.get(&(kind, name)).cloned().unwrap_or(false)
    }

    fn bind_name(&mut self, kind: ObjectKind, target: GLenum, name: GLuint) {
        self.calls.push(Call::BindName(kind, target, name));

        let targets = binding::bindings(kind);
        if !targets.is_empty() && !targets.iter().any(|v| v.0 == target) {
            self.raise(gl::INVALID_ENUM);
            return;
        }

        if name != 0 {
            match self.names.get_mut(&(kind, name)) {
                Some(created) => *created = true,
                None => {
                    self.raise(gl::INVALID_OPERATION);
                    return;
                }
            }
        }

        let unit = self.unit_of(kind);
        self.bindings.insert((kind, target, unit), name);
    }

    fn active_texture(&mut self, unit: GLenum) {
        self.calls.push(Call::ActiveTexture(unit));

        if unit < gl::TEXTURE0 || unit >= gl::TEXTURE0 + self.params.texture_units {
            self.raise(gl::INVALID_ENUM);
            return;
        }

        self.unit = unit;
    }

    fn get_error(&mut self) -> GLenum {
        self.calls.push(Call::GetError);
        ::std::mem::replace(&mut self.error, gl::NO_ERROR)
    }

    fn get_integer(&mut self, pname: GLenum) -> GLint {
        self.calls.push(Call::GetInteger(pname));
        self.integer(pname)
    }

    fn get_integer64(&mut self, pname: GLenum) -> GLint64 {
        GLint64::from(self.integer(pname))
    }

    fn get_float(&mut self, pname: GLenum) -> GLfloat {
        self.integer(pname) as GLfloat
    }

    fn get_boolean(&mut self, pname: GLenum) -> bool {
        self.integer(pname) != 0
    }

    fn get_string(&mut self, name: GLenum) -> String {
        match name {
            gl::VERSION => self.params.version.clone(),
            gl::VENDOR => self.params.vendor.clone(),
            gl::RENDERER => self.params.renderer.clone(),
            gl::SHADING_LANGUAGE_VERSION => self.params.shading_language_version.clone(),
            _ => {
                self.raise(gl::INVALID_ENUM);
                String::new()
            }
        }
    }

    fn get_string_indexed(&mut self, name: GLenum, index: GLuint) -> String {
        if name != gl::EXTENSIONS {
            self.raise(gl::INVALID_ENUM);
            return String::new();
        }

        match self.params.extensions.get(index as usize) {
            Some(v) => v.clone(),
            None => {
                self.raise(gl::INVALID_VALUE);
                String::new()
            }
        }
    }

    fn buffer_data(&mut self, target: GLenum, data: &[u8], usage: GLenum) {
        self.calls.push(Call::BufferData(target, data.len(), usage));

        let name = self.binding(ObjectKind::Buffer, target);
        if name == 0 {
            self.raise(gl::INVALID_OPERATION);
            return;
        }

        self.buffers.insert(name, data.to_vec());
    }

    fn buffer_sub_data(&mut self, target: GLenum, offset: usize, data: &[u8]) {
        self.calls
            .push(Call::BufferSubData(target, offset, data.len()));

        let name = self.binding(ObjectKind::Buffer, target);
        if name == 0 {
            self.raise(gl::INVALID_OPERATION);
            return;
        }

        let fits = match self.buffers.get_mut(&name) {
            Some(store) if offset + data.len() <= store.len() => {
                store[offset..offset + data.len()].copy_from_slice(data);
                true
            }
            _ => false,
        };

        if !fits {
            self.raise(gl::INVALID_VALUE);
        }
    }

    fn create_shader(&mut self, kind: GLenum) -> GLuint {
        self.calls.push(Call::CreateShader(kind));

        match kind {
            gl::VERTEX_SHADER
            | gl::FRAGMENT_SHADER
            | gl::GEOMETRY_SHADER
            | gl::TESS_CONTROL_SHADER
            | gl::TESS_EVALUATION_SHADER
            | gl::COMPUTE_SHADER => {}
            _ => {
                self.raise(gl::INVALID_ENUM);
                return 0;
            }
        }

        if self.params.exhausted_objects {
            return 0;
        }

        let name = self.next_object;
        self.next_object += 1;

        let shader = HeadlessShader {
            kind,
            sources: Vec::new(),
            compiled: false,
            log: String::new(),
            deleted: false,
        };

        self.shaders.insert(name, shader);
        name
    }

    fn delete_shader(&mut self, shader: GLuint) {
        self.calls.push(Call::DeleteShader(shader));

        if shader == 0 {
            return;
        }

        let attached = self.programs.values().any(|v| v.shaders.contains(&shader));
        match self.shaders.get_mut(&shader) {
            Some(v) => v.deleted = true,
            None => {
                self.raise(gl::INVALID_VALUE);
                return;
            }
        }

        // Attached shaders live until they are detached.
        if !attached {
            self.shaders.remove(&shader);
        }
    }

    fn is_shader(&mut self, shader: GLuint) -> bool {
        self.shaders
            .get(&shader)
            .map(|v| !v.deleted)
            .unwrap_or(false)
    }

    fn shader_source(&mut self, shader: GLuint, sources: &[&str]) {
        let sources: Vec<String> = sources.iter().map(|v| (*v).to_owned()).collect();
        self.calls.push(Call::ShaderSource(shader, sources.clone()));

        match self.shaders.get_mut(&shader) {
            Some(v) => v.sources = sources,
            None => self.raise(gl::INVALID_VALUE),
        }
    }

    fn compile_shader(&mut self, shader: GLuint) {
        self.calls.push(Call::CompileShader(shader));

        let v = match self.shaders.get_mut(&shader) {
            Some(v) => v,
            None => {
                self.raise(gl::INVALID_VALUE);
                return;
            }
        };

        let source = Self::shader_source_text(v);
        if source.trim().is_empty() {
            v.compiled = false;
            v.log = "ERROR: 0:0: '' : empty shader source\n".into();
        } else if let Some(line) = source.lines().position(|l| l.trim_start().starts_with("#error")) {
            v.compiled = false;
            v.log = format!("ERROR: 0:{}: '#error' : compilation terminated\n", line + 1);
        } else {
            v.compiled = true;
            v.log.clear();
        }
    }

    fn get_shader_iv(&mut self, shader: GLuint, pname: GLenum) -> GLint {
        let (compiled, log_len, source_len, kind, deleted) = match self.shaders.get(&shader) {
            Some(v) => (
                v.compiled,
                Self::c_string_len(&v.log),
                Self::c_string_len(&Self::shader_source_text(v)),
                v.kind,
                v.deleted,
            ),
            None => {
                self.raise(gl::INVALID_VALUE);
                return 0;
            }
        };

        match pname {
            gl::COMPILE_STATUS => compiled as GLint,
            gl::INFO_LOG_LENGTH => log_len,
            gl::SHADER_SOURCE_LENGTH => source_len,
            gl::SHADER_TYPE => kind as GLint,
            gl::DELETE_STATUS => deleted as GLint,
            _ => {
                self.raise(gl::INVALID_ENUM);
                0
            }
        }
    }

    fn get_shader_info_log(&mut self, shader: GLuint, buf: &mut [u8]) -> usize {
        match self.shaders.get(&shader) {
            Some(v) => Self::write_c_string(&v.log, buf),
            None => {
                self.raise(gl::INVALID_VALUE);
                0
            }
        }
    }

    fn get_shader_source(&mut self, shader: GLuint, buf: &mut [u8]) -> usize {
        match self.shaders.get(&shader) {
            Some(v) => Self::write_c_string(&Self::shader_source_text(v), buf),
            None => {
                self.raise(gl::INVALID_VALUE);
                0
            }
        }
    }

    fn create_program(&mut self) -> GLuint {
        self.calls.push(Call::CreateProgram);

        if self.params.exhausted_objects {
            return 0;
        }

        let name = self.next_object;
        self.next_object += 1;
        self.programs.insert(name, HeadlessProgram::default());
        name
    }

    fn delete_program(&mut self, program: GLuint) {
        self.calls.push(Call::DeleteProgram(program));

        if program == 0 {
            return;
        }

        match self.programs.remove(&program) {
            Some(v) => {
                for shader in v.shaders {
                    let deleted = self.shaders.get(&shader).map(|v| v.deleted);
                    if deleted == Some(true) {
                        self.shaders.remove(&shader);
                    }
                }
            }
            None => self.raise(gl::INVALID_VALUE),
        }
    }

    fn is_program(&mut self, program: GLuint) -> bool {
        self.programs.contains_key(&program)
    }

    fn attach_shader(&mut self, program: GLuint, shader: GLuint) {
        self.calls.push(Call::AttachShader(program, shader));

        if !self.shaders.contains_key(&shader) {
            self.raise(gl::INVALID_VALUE);
            return;
        }

        let attached = match self.programs.get_mut(&program) {
            Some(v) if !v.shaders.contains(&shader) => {
                v.shaders.push(shader);
                true
            }
            Some(_) => {
                self.raise(gl::INVALID_OPERATION);
                return;
            }
            None => false,
        };

        if !attached {
            self.raise(gl::INVALID_VALUE);
        }
    }

    fn detach_shader(&mut self, program: GLuint, shader: GLuint) {
        self.calls.push(Call::DetachShader(program, shader));

        let detached = match self.programs.get_mut(&program) {
            Some(v) => match v.shaders.iter().position(|s| *s == shader) {
                Some(i) => {
                    v.shaders.remove(i);
                    true
                }
                None => false,
            },
            None => {
                self.raise(gl::INVALID_VALUE);
                return;
            }
        };

        if !detached {
            self.raise(gl::INVALID_OPERATION);
            return;
        }

        let still_attached = self.programs.values().any(|v| v.shaders.contains(&shader));
        let deleted = self.shaders.get(&shader).map(|v| v.deleted) == Some(true);
        if deleted && !still_attached {
            self.shaders.remove(&shader);
        }
    }

    fn link_program(&mut self, program: GLuint) {
        self.calls.push(Call::LinkProgram(program));

        let attached = match self.programs.get(&program) {
            Some(v) => v.shaders.clone(),
            None => {
                self.raise(gl::INVALID_VALUE);
                return;
            }
        };

        let mut uniforms = Vec::new();
        let mut log = String::new();

        if attached.is_empty() {
            log = "error: no shaders attached to the program\n".into();
        }

        for shader in &attached {
            match self.shaders.get(shader) {
                Some(v) if v.compiled => Self::declared_uniforms(&Self::shader_source_text(v), &mut uniforms),
                _ => log.push_str(&format!("error: shader {} is not compiled\n", shader)),
            }
        }

        if let Some(v) = self.programs.get_mut(&program) {
            v.validated = false;

            if log.is_empty() {
                v.linked = true;
                v.uniforms = uniforms;
                v.log.clear();
            } else {
                v.linked = false;
                v.log = log;
            }
        }
    }

    fn validate_program(&mut self, program: GLuint) {
        self.calls.push(Call::ValidateProgram(program));

        match self.programs.get_mut(&program) {
            Some(v) => {
                v.validated = v.linked;
                if !v.linked {
                    v.log = "error: the program is not linked\n".into();
                }
            }
            None => self.raise(gl::INVALID_VALUE),
        }
    }

    fn use_program(&mut self, program: GLuint) {
        self.calls.push(Call::UseProgram(program));

        if program != 0 {
            match self.programs.get(&program) {
                Some(v) if v.linked => {}
                _ => {
                    self.raise(gl::INVALID_OPERATION);
                    return;
                }
            }
        }

        self.program = program;
    }

    fn get_program_iv(&mut self, program: GLuint, pname: GLenum) -> GLint {
        let v = match self.programs.get(&program) {
            Some(v) => match pname {
                gl::LINK_STATUS => Some(v.linked as GLint),
                gl::VALIDATE_STATUS => Some(v.validated as GLint),
                gl::INFO_LOG_LENGTH => Some(Self::c_string_len(&v.log)),
                gl::ATTACHED_SHADERS => Some(v.shaders.len() as GLint),
                gl::ACTIVE_UNIFORMS => Some(v.uniforms.len() as GLint),
                gl::DELETE_STATUS => Some(0),
                gl::PROGRAM_BINARY_LENGTH if v.linked => {
                    Some(Self::encode_binary(v).len() as GLint)
                }
                gl::PROGRAM_BINARY_LENGTH => Some(0),
                _ => None,
            },
            None => {
                self.raise(gl::INVALID_VALUE);
                return 0;
            }
        };

        match v {
            Some(v) => v,
            None => {
                self.raise(gl::INVALID_ENUM);
                0
            }
        }
    }

    fn get_program_info_log(&mut self, program: GLuint, buf: &mut [u8]) -> usize {
        match self.programs.get(&program) {
            Some(v) => Self::write_c_string(&v.log, buf),
            None => {
                self.raise(gl::INVALID_VALUE);
                0
            }
        }
    }

    fn get_uniform_location(&mut self, program: GLuint, name: &CStr) -> GLint {
        let name = name.to_string_lossy().into_owned();
        self.calls
            .push(Call::GetUniformLocation(program, name.clone()));

        let location = match self.programs.get(&program) {
            Some(v) if v.linked => v.uniforms.iter().position(|u| *u == name),
            Some(_) => {
                self.raise(gl::INVALID_OPERATION);
                return -1;
            }
            None => {
                self.raise(gl::INVALID_VALUE);
                return -1;
            }
        };

        location.map(|v| v as GLint).unwrap_or(-1)
    }

    fn get_subroutine_uniform_location(&mut self, program: GLuint, _: GLenum, _: &CStr) -> GLint {
        if !self.programs.contains_key(&program) {
            self.raise(gl::INVALID_VALUE);
        }

        -1
    }

    fn bind_attrib_location(&mut self, program: GLuint, index: GLuint, name: &CStr) {
        match self.programs.get_mut(&program) {
            Some(v) => {
                v.attributes
                    .insert(name.to_string_lossy().into_owned(), index);
            }
            None => self.raise(gl::INVALID_VALUE),
        }
    }

    fn bind_frag_data_location(&mut self, program: GLuint, color: GLuint, name: &CStr) {
        match self.programs.get_mut(&program) {
            Some(v) => {
                v.outputs.insert(name.to_string_lossy().into_owned(), color);
            }
            None => self.raise(gl::INVALID_VALUE),
        }
    }

    fn program_binary(&mut self, program: GLuint, format: GLenum, data: &[u8]) {
        self.calls
            .push(Call::ProgramBinary(program, format, data.len()));

        if !self.programs.contains_key(&program) {
            self.raise(gl::INVALID_VALUE);
            return;
        }

        if format != HEADLESS_BINARY_FORMAT {
            self.raise(gl::INVALID_ENUM);
        }

        let uniforms = if format == HEADLESS_BINARY_FORMAT && data.starts_with(BINARY_MAGIC) {
            String::from_utf8(data[BINARY_MAGIC.len()..].to_vec())
                .ok()
                .map(|v| {
                    v.split('\n')
                        .filter(|v| !v.is_empty())
                        .map(|v| v.to_owned())
                        .collect::<Vec<_>>()
                })
        } else {
            None
        };

        if let Some(v) = self.programs.get_mut(&program) {
            v.validated = false;

            match uniforms {
                Some(uniforms) => {
                    v.linked = true;
                    v.uniforms = uniforms;
                    v.log.clear();
                }
                None => {
                    v.linked = false;
                    v.log = "error: the program binary is invalid\n".into();
                }
            }
        }
    }

    fn get_program_binary(
        &mut self,
        program: GLuint,
        format: &mut GLenum,
        buf: &mut [u8],
    ) -> usize {
        self.calls.push(Call::GetProgramBinary(program));

        let data = match self.programs.get(&program) {
            Some(v) if v.linked => Self::encode_binary(v),
            Some(_) => {
                self.raise(gl::INVALID_OPERATION);
                return 0;
            }
            None => {
                self.raise(gl::INVALID_VALUE);
                return 0;
            }
        };

        if buf.len() < data.len() {
            self.raise(gl::INVALID_OPERATION);
            return 0;
        }

        *format = HEADLESS_BINARY_FORMAT;
        buf[..data.len()].copy_from_slice(&data);
        data.len()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn uniforms() {
        let mut uniforms = Vec::new();
        HeadlessContext::declared_uniforms(
            "uniform highp vec4 tint;\nuniform mat4 bones[16];\nlayout(std140) uniform Lights { vec4 color; };\nuniform vec4 tint;",
            &mut uniforms,
        );

        assert_eq!(uniforms, vec!["tint".to_owned(), "bones".to_owned()]);
    }

    #[test]
    fn c_strings() {
        let mut buf = [0xFFu8; 4];
        assert_eq!(HeadlessContext::write_c_string("hello", &mut buf), 3);
        assert_eq!(&buf, b"hel\0");
        assert_eq!(HeadlessContext::write_c_string("hello", &mut []), 0);
        assert_eq!(HeadlessContext::c_string_len(""), 0);
        assert_eq!(HeadlessContext::c_string_len("abc"), 4);
    }
}
