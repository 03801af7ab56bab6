extern crate crayon_glaux;

use crayon_glaux::context::Call;
use crayon_glaux::gl;
use crayon_glaux::prelude::*;

#[test]
fn state_errors() {
    let mut ctx = HeadlessContext::new();
    check(&mut ctx).unwrap();

    ctx.active_texture(gl::TEXTURE0 + 100);
    match assert_no_error(&mut ctx, Some("activates texture unit 100")) {
        Err(Error::ContextState { code, message }) => {
            assert_eq!(code, StateCode::InvalidEnum);
            assert_eq!(message, "activates texture unit 100");
        }
        v => panic!("unexpected {:?}", v),
    }

    // Reading the flag clears it.
    check(&mut ctx).unwrap();

    // Only the first error is kept until it is read.
    ctx.bind_name(ObjectKind::Buffer, gl::ARRAY_BUFFER, 42);
    ctx.bind_name(ObjectKind::Buffer, 0xFFFF, 0);
    let err = check(&mut ctx).unwrap_err();
    assert_eq!(err.state_code(), Some(StateCode::InvalidOperation));
    assert!(format!("{}", err).contains("GL_INVALID_OPERATION"));

    ctx.raise(0x1234);
    assert_eq!(
        check(&mut ctx).unwrap_err().state_code(),
        Some(StateCode::Unknown(0x1234))
    );
}

#[test]
fn info() {
    let mut ctx = HeadlessContext::new();
    let info = ContextInfo::query(&mut ctx).unwrap();

    assert_eq!(info.version, Version::GL(4, 5));
    assert!(info.version >= Version::GL(3, 3));
    assert_eq!(info.renderer, ctx.params().renderer);
    assert!(info.has_extension("GL_ARB_get_program_binary"));
    assert!(!info.has_extension("GL_ARB_bindless_texture"));
    check(&mut ctx).unwrap();

    let params = HeadlessParams {
        version: "OpenGL ES 3.0 Headless".into(),
        extensions: Vec::new(),
        ..Default::default()
    };

    let mut ctx = HeadlessContext::with_params(params);
    let info = ContextInfo::query(&mut ctx).unwrap();
    assert_eq!(info.version, Version::ES(3, 0));
    assert!(info.extensions.is_empty());

    let params = HeadlessParams {
        version: "unknown".into(),
        ..Default::default()
    };

    let mut ctx = HeadlessContext::with_params(params);
    assert!(ContextInfo::query(&mut ctx).is_err());
}

#[test]
fn queries() {
    let mut ctx = HeadlessContext::new();
    assert_eq!(ctx.get_integer(gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS), 16);
    assert_eq!(ctx.get_integer64(gl::ACTIVE_TEXTURE), i64::from(gl::TEXTURE0));
    assert!(!ctx.get_boolean(gl::CURRENT_PROGRAM));

    ctx.take_calls();
    assert_eq!(ctx.get_integer(0xFFFF), 0);
    assert_eq!(ctx.take_calls(), vec![Call::GetInteger(0xFFFF)]);
    assert_eq!(
        check(&mut ctx).unwrap_err().state_code(),
        Some(StateCode::InvalidEnum)
    );
}
