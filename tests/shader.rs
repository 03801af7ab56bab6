extern crate crayon_glaux;

use crayon_glaux::context::Call;
use crayon_glaux::prelude::*;

const VS: &str = "#version 330
uniform mat4 mvp;
in vec3 position;
void main() { gl_Position = mvp * vec4(position, 1.0); }
";

#[test]
fn compile() {
    let mut ctx = HeadlessContext::new();
    let mut shader = Shader::new(&mut ctx, ShaderKind::Vertex).unwrap();
    assert!(shader.name() != 0);
    assert_eq!(shader.kind(), ShaderKind::Vertex);
    assert!(shader.is_shader(&mut ctx));
    assert!(!shader.compiled(&mut ctx));

    shader.set_source(&mut ctx, VS).unwrap();
    assert_eq!(shader.source(&mut ctx), VS);

    assert!(shader.compile(&mut ctx).unwrap());
    assert!(shader.compiled(&mut ctx));
    assert_eq!(shader.info_log(&mut ctx), "");
}

#[test]
fn sources() {
    let mut ctx = HeadlessContext::new();
    let mut shader = Shader::new(&mut ctx, ShaderKind::Fragment).unwrap();

    let parts = vec!["#version 330\n", "out vec4 color;\n", "void main() { color = vec4(1.0); }\n"];
    ctx.take_calls();
    shader.set_source(&mut ctx, &parts).unwrap();

    let owned: Vec<String> = parts.iter().map(|v| v.to_string()).collect();
    assert_eq!(ctx.take_calls(), vec![Call::ShaderSource(shader.name(), owned)]);
    assert_eq!(shader.source(&mut ctx), parts.concat());

    // Replaces the previous strings at once.
    let single = String::from("void main() {}\n");
    shader.set_source(&mut ctx, &single).unwrap();
    assert_eq!(ctx.shader_sources(shader.name()).unwrap().len(), 1);
    assert_eq!(shader.source(&mut ctx), single);
}

#[test]
fn failure() {
    let mut ctx = HeadlessContext::new();
    let mut shader = Shader::new(&mut ctx, ShaderKind::Fragment).unwrap();

    // Nothing to compile.
    assert!(!shader.compile(&mut ctx).unwrap());
    assert!(!shader.info_log(&mut ctx).is_empty());
    assert_eq!(shader.source(&mut ctx), "");

    shader
        .set_source(&mut ctx, "#version 330\n#error unsupported\n")
        .unwrap();

    assert!(!shader.compile(&mut ctx).unwrap());
    assert!(shader.info_log(&mut ctx).contains("#error"));

    shader.set_source(&mut ctx, VS).unwrap();
    assert!(shader.compile(&mut ctx).unwrap());
    assert_eq!(shader.info_log(&mut ctx), "");
}

#[test]
fn delete() {
    let mut ctx = HeadlessContext::new();
    let mut shader = Shader::new(&mut ctx, ShaderKind::Geometry).unwrap();

    shader.delete(&mut ctx);
    assert_eq!(shader.name(), 0);
    assert!(!shader.is_shader(&mut ctx));

    ctx.take_calls();
    shader.delete(&mut ctx);
    assert!(ctx.calls().is_empty());

    match shader.set_source(&mut ctx, VS) {
        Err(Error::Argument(_)) => {}
        v => panic!("unexpected {:?}", v),
    }

    assert!(shader.compile(&mut ctx).is_err());
    assert_eq!(shader.info_log(&mut ctx), "");
    assert_eq!(shader.source(&mut ctx), "");
}

#[test]
fn exhausted() {
    let params = HeadlessParams {
        exhausted_objects: true,
        ..Default::default()
    };

    let mut ctx = HeadlessContext::with_params(params);
    match Shader::new(&mut ctx, ShaderKind::Compute) {
        Err(Error::CreateFailure(_)) => {}
        v => panic!("unexpected {:?}", v),
    }
}
