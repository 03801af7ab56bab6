use std::cmp;

use gl;
use serde::{Deserialize, Serialize};

use super::Context;
use crate::errors::*;

/// The API and version number a context implements.
///
/// Only versions of the same API are ordered. A desktop version and an embedded one
/// have no ordering.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Version {
    GL(u8, u8),
    ES(u8, u8),
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Version) -> Option<cmp::Ordering> {
        match (*self, *other) {
            (Version::GL(a, b), Version::GL(c, d)) | (Version::ES(a, b), Version::ES(c, d)) => {
                Some((a, b).cmp(&(c, d)))
            }
            _ => None,
        }
    }
}

impl Version {
    /// Parses the string returned by `glGetString(GL_VERSION)`, e.g. `4.5.0 NVIDIA 390.77`
    /// or `OpenGL ES 3.0 Mesa 18.0.5`.
    pub fn parse(desc: &str) -> Result<Version> {
        let malformed = || Error::Argument(format!("[GL] Version string {:?} is malformed.", desc));

        let (es, rest) = if desc.starts_with("OpenGL ES-") {
            // e.g. "OpenGL ES-CM 1.1"
            (true, desc[10..].splitn(2, ' ').nth(1).unwrap_or(""))
        } else if desc.starts_with("OpenGL ES ") {
            (true, &desc[10..])
        } else {
            (false, desc)
        };

        let number = rest.split(' ').next().ok_or_else(malformed)?;
        let mut iter = number.split('.');

        let major = iter
            .next()
            .and_then(|v| v.parse().ok())
            .ok_or_else(malformed)?;

        let minor = iter
            .next()
            .and_then(|v| v.parse().ok())
            .ok_or_else(malformed)?;

        if es {
            Ok(Version::ES(major, minor))
        } else {
            Ok(Version::GL(major, minor))
        }
    }
}

/// Strings describing the implementation behind a context.
#[derive(Debug, Clone)]
pub struct ContextInfo {
    pub version: Version,
    pub vendor: String,
    pub renderer: String,
    pub shading_language_version: String,
    pub extensions: Vec<String>,
}

impl ContextInfo {
    /// Queries the implementation strings. The extension list is read string by string,
    /// so callers should keep the result around instead of querying it repeatedly.
    pub fn query<C: Context + ?Sized>(ctx: &mut C) -> Result<ContextInfo> {
        let version = Version::parse(&ctx.get_string(gl::VERSION))?;
        let vendor = ctx.get_string(gl::VENDOR);
        let renderer = ctx.get_string(gl::RENDERER);
        let shading_language_version = ctx.get_string(gl::SHADING_LANGUAGE_VERSION);

        let num = ctx.get_integer(gl::NUM_EXTENSIONS).max(0) as u32;
        let extensions = (0..num)
            .map(|i| ctx.get_string_indexed(gl::EXTENSIONS, i))
            .collect();

        Ok(ContextInfo {
            version,
            vendor,
            renderer,
            shading_language_version,
            extensions,
        })
    }

    #[inline]
    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.iter().any(|v| v == name)
    }
}
