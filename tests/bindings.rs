extern crate crayon_glaux;

use std::panic;

use crayon_glaux::context::Call;
use crayon_glaux::gl;
use crayon_glaux::gl::types::GLuint;
use crayon_glaux::prelude::*;

#[test]
fn buffer() {
    let mut ctx = HeadlessContext::new();
    let mut a = Buffer::new(None);
    let mut b = Buffer::new(None);

    a.bind(&mut ctx, None).unwrap();

    let inside = b
        .bind_with(&mut ctx, None, |ctx, b| {
            Ok(Buffer::current_binding(ctx, gl::ARRAY_BUFFER)? == b.name())
        })
        .unwrap();

    assert!(inside);
    assert!(b.name() != 0);
    assert_eq!(
        Buffer::current_binding(&mut ctx, gl::ARRAY_BUFFER).unwrap(),
        a.name()
    );

    // Other targets are left alone.
    assert_eq!(
        Buffer::current_binding(&mut ctx, gl::ELEMENT_ARRAY_BUFFER).unwrap(),
        0
    );
}

#[test]
fn nested() {
    let mut ctx = HeadlessContext::new();
    let mut a = Buffer::new(None);
    let mut b = Buffer::new(None);
    let mut c = Buffer::new(None);

    a.bind(&mut ctx, None).unwrap();

    Buffer::preserve_binding(&mut ctx, gl::ARRAY_BUFFER, |ctx| {
        b.bind(ctx, None)?;

        Buffer::preserve_binding(ctx, gl::ARRAY_BUFFER, |ctx| {
            c.bind(ctx, None)?;
            assert_eq!(Buffer::current_binding(ctx, gl::ARRAY_BUFFER)?, c.name());
            Ok(())
        })?;

        assert_eq!(Buffer::current_binding(ctx, gl::ARRAY_BUFFER)?, b.name());
        Ok(())
    })
    .unwrap();

    assert_eq!(ctx.binding(ObjectKind::Buffer, gl::ARRAY_BUFFER), a.name());
}

#[test]
fn restore_on_error() {
    let mut ctx = HeadlessContext::new();
    let mut a = Buffer::new(None);
    let mut b = Buffer::new(None);
    a.bind(&mut ctx, None).unwrap();

    let result: Result<()> = b.bind_with(&mut ctx, None, |_, _| {
        Err(Error::Argument("interrupted".into()))
    });

    match result {
        Err(Error::Argument(ref v)) if v == "interrupted" => {}
        v => panic!("unexpected {:?}", v),
    }

    assert_eq!(ctx.binding(ObjectKind::Buffer, gl::ARRAY_BUFFER), a.name());
}

#[test]
fn restore_on_panic() {
    let mut ctx = HeadlessContext::new();
    let mut a = Buffer::new(None);
    let mut b = Buffer::new(None);
    a.bind(&mut ctx, None).unwrap();

    let result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
        Buffer::preserve_binding(&mut ctx, gl::ARRAY_BUFFER, |ctx| -> Result<()> {
            b.bind(ctx, None)?;
            panic!("interrupted");
        })
    }));

    assert!(result.is_err());
    assert!(b.name() != 0);
    assert_eq!(ctx.binding(ObjectKind::Buffer, gl::ARRAY_BUFFER), a.name());
}

#[test]
fn target() {
    let mut ctx = HeadlessContext::new();

    let mut buffer = Buffer::new(Some(gl::ELEMENT_ARRAY_BUFFER));
    buffer.bind(&mut ctx, None).unwrap();
    assert_eq!(
        ctx.binding(ObjectKind::Buffer, gl::ELEMENT_ARRAY_BUFFER),
        buffer.name()
    );

    match buffer.bind(&mut ctx, Some(gl::ARRAY_BUFFER)) {
        Err(Error::Argument(_)) => {}
        v => panic!("unexpected {:?}", v),
    }

    assert_eq!(ctx.binding(ObjectKind::Buffer, gl::ARRAY_BUFFER), 0);
    buffer.bind(&mut ctx, Some(gl::ELEMENT_ARRAY_BUFFER)).unwrap();

    // The first explicit target is remembered.
    let mut uniforms = Buffer::new(None);
    uniforms.bind(&mut ctx, Some(gl::UNIFORM_BUFFER)).unwrap();
    assert_eq!(uniforms.target(), Some(gl::UNIFORM_BUFFER));
    assert!(uniforms.bind(&mut ctx, Some(gl::ARRAY_BUFFER)).is_err());

    // Unknown targets are rejected before anything is allocated.
    let mut invalid = Buffer::new(Some(gl::TEXTURE_2D));
    assert!(invalid.bind(&mut ctx, None).is_err());
    assert_eq!(invalid.name(), 0);
}

#[test]
fn texture_restores_unit_last() {
    let mut ctx = HeadlessContext::new();
    let mut a = Texture::new(None);
    let mut b = Texture::new(None);

    ctx.active_texture(gl::TEXTURE2);
    a.bind(&mut ctx, None).unwrap();
    ctx.take_calls();

    Texture::preserve_binding(&mut ctx, gl::TEXTURE_2D, |ctx| {
        ctx.active_texture(gl::TEXTURE5);
        b.bind(ctx, None)?;
        Ok(())
    })
    .unwrap();

    assert_eq!(ctx.active_unit(), gl::TEXTURE2);
    assert_eq!(ctx.texture_binding(gl::TEXTURE2, gl::TEXTURE_2D), a.name());
    assert_eq!(ctx.texture_binding(gl::TEXTURE5, gl::TEXTURE_2D), b.name());

    let calls = ctx.take_calls();
    assert_eq!(
        calls[calls.len() - 3..].to_vec(),
        vec![
            Call::ActiveTexture(gl::TEXTURE2),
            Call::BindName(ObjectKind::Texture, gl::TEXTURE_2D, a.name()),
            Call::ActiveTexture(gl::TEXTURE2),
        ]
    );
}

#[test]
fn texture_restores_each_unit_and_target() {
    let mut ctx = HeadlessContext::new();
    let mut a = Texture::new(None);
    let mut b = Texture::new(None);
    let mut c = Texture::new(Some(gl::TEXTURE_CUBE_MAP));
    let mut d = Texture::new(Some(gl::TEXTURE_CUBE_MAP));

    ctx.active_texture(gl::TEXTURE4);
    c.bind(&mut ctx, None).unwrap();
    ctx.active_texture(gl::TEXTURE2);
    a.bind(&mut ctx, None).unwrap();
    ctx.take_calls();

    Texture::preserve_binding(&mut ctx, gl::TEXTURE_2D, |ctx| {
        ctx.active_texture(gl::TEXTURE4);

        Texture::preserve_binding(ctx, gl::TEXTURE_CUBE_MAP, |ctx| {
            ctx.active_texture(gl::TEXTURE6);
            d.bind(ctx, None)?;
            Ok(())
        })?;

        assert_eq!(Texture::current_unit(ctx), gl::TEXTURE4);
        b.bind(ctx, None)?;
        Ok(())
    })
    .unwrap();

    assert_eq!(ctx.active_unit(), gl::TEXTURE2);
    assert_eq!(ctx.texture_binding(gl::TEXTURE2, gl::TEXTURE_2D), a.name());
    assert_eq!(ctx.texture_binding(gl::TEXTURE4, gl::TEXTURE_CUBE_MAP), c.name());
    assert_eq!(ctx.texture_binding(gl::TEXTURE6, gl::TEXTURE_CUBE_MAP), d.name());
    assert_eq!(ctx.texture_binding(gl::TEXTURE4, gl::TEXTURE_2D), b.name());

    let calls = ctx.take_calls();
    let inner = vec![
        Call::ActiveTexture(gl::TEXTURE4),
        Call::BindName(ObjectKind::Texture, gl::TEXTURE_CUBE_MAP, c.name()),
        Call::ActiveTexture(gl::TEXTURE4),
    ];

    assert!(calls.windows(3).any(|v| v == &inner[..]));
    assert_eq!(
        calls[calls.len() - 3..].to_vec(),
        vec![
            Call::ActiveTexture(gl::TEXTURE2),
            Call::BindName(ObjectKind::Texture, gl::TEXTURE_2D, a.name()),
            Call::ActiveTexture(gl::TEXTURE2),
        ]
    );
}

#[test]
fn texture_unit() {
    let mut ctx = HeadlessContext::new();
    let mut texture = Texture::new(Some(gl::TEXTURE_CUBE_MAP));

    texture
        .bind_unit_with(&mut ctx, 3, None, |ctx, texture| {
            assert_eq!(Texture::current_unit(ctx), gl::TEXTURE3);
            assert_eq!(
                Texture::current_binding(ctx, gl::TEXTURE_CUBE_MAP)?,
                texture.name()
            );
            Ok(())
        })
        .unwrap();

    assert_eq!(ctx.active_unit(), gl::TEXTURE0);
    assert_eq!(ctx.texture_binding(gl::TEXTURE3, gl::TEXTURE_CUBE_MAP), 0);

    Texture::preserve_unit(&mut ctx, |ctx| {
        ctx.active_texture(gl::TEXTURE7);
        Ok(())
    })
    .unwrap();

    assert_eq!(ctx.active_unit(), gl::TEXTURE0);
}

#[test]
fn texture_unit_out_of_range() {
    let mut ctx = HeadlessContext::new();
    let mut texture = Texture::new(None);

    let result = texture.bind_unit_with(&mut ctx, GLuint::max_value(), None, |_, _| Ok(()));
    match result {
        Err(Error::Argument(_)) => {}
        v => panic!("unexpected {:?}", v),
    }

    assert_eq!(texture.name(), 0);
    assert!(ctx.calls().is_empty());
}

#[test]
fn vertex_array() {
    let mut ctx = HeadlessContext::new();
    let mut a = VertexArray::new();
    let mut b = VertexArray::default();

    a.bind(&mut ctx).unwrap();

    b.bind_with(&mut ctx, |ctx, b| {
        assert_eq!(VertexArray::current_binding(ctx)?, b.name());
        Ok(())
    })
    .unwrap();

    assert_eq!(VertexArray::current_binding(&mut ctx).unwrap(), a.name());

    VertexArray::preserve_binding(&mut ctx, |ctx| {
        b.bind(ctx)?;
        b.delete(ctx);
        Ok(())
    })
    .unwrap();

    assert_eq!(VertexArray::current_binding(&mut ctx).unwrap(), a.name());
}

#[test]
fn upload() {
    let mut ctx = HeadlessContext::new();
    let mut a = Buffer::new(None);
    let mut vbo = Buffer::new(None);
    a.bind(&mut ctx, None).unwrap();

    vbo.upload(&mut ctx, &[1, 2, 3, 4], BufferUsage::Static)
        .unwrap();
    vbo.upload_range(&mut ctx, 2, &[9, 9]).unwrap();
    check(&mut ctx).unwrap();

    assert_eq!(ctx.buffer_contents(vbo.name()), Some(&[1u8, 2, 9, 9][..]));
    assert_eq!(ctx.binding(ObjectKind::Buffer, gl::ARRAY_BUFFER), a.name());

    vbo.upload_range(&mut ctx, 3, &[0, 0]).unwrap();
    assert_eq!(
        check(&mut ctx).unwrap_err().state_code(),
        Some(StateCode::InvalidValue)
    );
}
