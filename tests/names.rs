extern crate crayon_glaux;
extern crate rand;

use crayon_glaux::context::Call;
use crayon_glaux::gl;
use crayon_glaux::objects::{delete_names, gen_names, ObjectName};
use crayon_glaux::prelude::*;
use rand::Rng;

fn gens(ctx: &HeadlessContext) -> usize {
    ctx.calls()
        .iter()
        .filter(|v| match v {
            Call::GenNames(..) => true,
            _ => false,
        })
        .count()
}

#[test]
fn lazy() {
    let mut ctx = HeadlessContext::new();
    let mut buffer = Buffer::new(None);
    let mut texture = Texture::new(None);
    let mut vao = VertexArray::new();

    assert_eq!(buffer.name(), 0);
    assert_eq!(texture.name(), 0);
    assert_eq!(vao.name(), 0);

    // Unallocated names are answered without asking the context.
    assert!(!buffer.is_buffer(&mut ctx));
    assert!(!texture.is_texture(&mut ctx));
    assert!(!vao.is_vertex_array(&mut ctx));
    assert!(ctx.calls().is_empty());

    buffer.bind(&mut ctx, None).unwrap();
    texture.bind(&mut ctx, None).unwrap();
    vao.bind(&mut ctx).unwrap();
    assert_eq!(gens(&ctx), 3);

    let names = (buffer.name(), texture.name(), vao.name());
    assert!(names.0 != 0 && names.1 != 0 && names.2 != 0);

    buffer.bind(&mut ctx, None).unwrap();
    texture.bind(&mut ctx, None).unwrap();
    vao.bind(&mut ctx).unwrap();
    assert_eq!(gens(&ctx), 3);
    assert_eq!(names, (buffer.name(), texture.name(), vao.name()));

    assert!(buffer.is_buffer(&mut ctx));
    assert!(texture.is_texture(&mut ctx));
    assert!(vao.is_vertex_array(&mut ctx));

    assert_eq!(buffer.target(), Some(Buffer::DEFAULT_TARGET));
    assert_eq!(texture.target(), Some(Texture::DEFAULT_TARGET));
}

#[test]
fn delete() {
    let mut ctx = HeadlessContext::new();
    let mut buffer = Buffer::new(None);

    // Deleting an unallocated buffer is a no-op.
    buffer.delete(&mut ctx);
    assert!(ctx.calls().is_empty());

    buffer.bind(&mut ctx, None).unwrap();
    let name = buffer.name();
    assert_eq!(ctx.binding(ObjectKind::Buffer, gl::ARRAY_BUFFER), name);

    buffer.delete(&mut ctx);
    assert_eq!(buffer.name(), 0);
    assert_eq!(ctx.binding(ObjectKind::Buffer, gl::ARRAY_BUFFER), 0);
    assert_eq!(ctx.reserved_names(ObjectKind::Buffer), 0);

    ctx.take_calls();
    buffer.delete(&mut ctx);
    assert!(ctx.calls().is_empty());

    // The target survives, and the next bind allocates a fresh name.
    assert_eq!(buffer.target(), Some(gl::ARRAY_BUFFER));
    buffer.bind(&mut ctx, None).unwrap();
    assert!(buffer.name() != 0);
    assert!(buffer.name() != name);
}

#[test]
fn batch() {
    let mut rng = rand::thread_rng();
    let mut ctx = HeadlessContext::new();

    for _ in 0..64 {
        let kind = ObjectKind::ALL[rng.gen_range(0, ObjectKind::ALL.len())];
        let count = rng.gen_range(0, 8);

        ctx.take_calls();
        let names = gen_names(&mut ctx, kind, count).unwrap();
        assert_eq!(names.len(), count);

        if count == 0 {
            assert!(ctx.calls().is_empty());
            continue;
        }

        assert!(names.iter().all(|v| *v != 0));
        assert_eq!(ctx.take_calls(), vec![Call::GenNames(kind, names.to_vec())]);

        delete_names(&mut ctx, kind, &names);
        assert_eq!(
            ctx.take_calls(),
            vec![Call::DeleteNames(kind, names.to_vec())]
        );
    }

    for kind in ObjectKind::ALL.iter() {
        assert_eq!(ctx.reserved_names(*kind), 0);
    }

    delete_names(&mut ctx, ObjectKind::Sampler, &[]);
    delete_names(&mut ctx, ObjectKind::Sampler, &[0, 0]);
    assert!(ctx.calls().is_empty());
}

#[test]
fn batch_of_three() {
    let params = HeadlessParams {
        first_name: 100,
        ..Default::default()
    };

    let mut ctx = HeadlessContext::with_params(params);
    let names = gen_names(&mut ctx, ObjectKind::Texture, 3).unwrap();
    assert_eq!(names.to_vec(), vec![100u32, 101, 102]);

    for v in names.iter() {
        ctx.bind_name(ObjectKind::Texture, gl::TEXTURE_2D, *v);
        assert!(ctx.is_name(ObjectKind::Texture, *v));
    }

    delete_names(&mut ctx, ObjectKind::Texture, &names);
    for v in names.iter() {
        assert!(!ctx.is_name(ObjectKind::Texture, *v));
    }

    assert_eq!(ctx.binding(ObjectKind::Texture, gl::TEXTURE_2D), 0);
    check(&mut ctx).unwrap();
}

#[test]
fn exhausted() {
    let params = HeadlessParams {
        exhausted: vec![ObjectKind::Texture],
        ..Default::default()
    };

    let mut ctx = HeadlessContext::with_params(params);

    match gen_names(&mut ctx, ObjectKind::Texture, 3) {
        Err(Error::CreateFailure(_)) => {}
        v => panic!("unexpected {:?}", v),
    }

    let mut texture = Texture::new(None);
    assert!(texture.bind(&mut ctx, None).is_err());
    assert_eq!(texture.name(), 0);

    // Other kinds are still available.
    let mut buffer = Buffer::new(None);
    buffer.bind(&mut ctx, None).unwrap();
    assert!(buffer.name() != 0);
}

#[test]
fn object_name() {
    let mut ctx = HeadlessContext::new();
    let mut sampler = ObjectName::new(ObjectKind::Sampler);
    assert!(!sampler.is_allocated());
    assert!(!sampler.is_live(&mut ctx));

    let name = sampler.ensure_allocated(&mut ctx).unwrap();
    assert_eq!(sampler.ensure_allocated(&mut ctx).unwrap(), name);
    assert_eq!(sampler.get(), name);
    assert_eq!(gens(&ctx), 1);

    // Reserved, but never bound.
    assert!(!sampler.is_live(&mut ctx));

    sampler.delete(&mut ctx);
    assert!(!sampler.is_allocated());
    assert_eq!(sampler.kind(), ObjectKind::Sampler);
}

#[test]
fn adopt() {
    let mut ctx = HeadlessContext::new();
    let names = gen_names(&mut ctx, ObjectKind::Buffer, 2).unwrap();

    let mut buffer = Buffer::with_name(Some(gl::UNIFORM_BUFFER), names[1]);
    ctx.take_calls();
    buffer.bind(&mut ctx, None).unwrap();

    assert_eq!(
        ctx.take_calls(),
        vec![Call::BindName(ObjectKind::Buffer, gl::UNIFORM_BUFFER, names[1])]
    );
}
