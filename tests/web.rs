// Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

extern crate wasm_bindgen_test;
use particle_field::canvas::CanvasSurface;
use particle_field::{FieldConfig, ParticleField, ParticleFieldOptions, ParticleSystem, Surface};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

wasm_bindgen_test_configure!(run_in_browser);

fn canvas() -> HtmlCanvasElement {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.create_element("canvas").ok())
        .and_then(|e| e.dyn_into::<HtmlCanvasElement>().ok())
        .expect("canvas element")
}

#[wasm_bindgen_test]
fn canvas_surface_draws_a_frame() {
    let mut surface = CanvasSurface::new(canvas()).expect("2d context");
    surface.resize(200.0, 100.0);
    assert_eq!(surface.canvas().width(), 200);
    assert_eq!(surface.canvas().height(), 100);

    let mut config = FieldConfig::default().with_size(200.0, 100.0);
    config.particle_count = 25;
    config.colors.push("not a colour".to_owned());
    let mut field = ParticleField::new(config);
    field.on_pointer_move(100.0, 50.0);
    for _ in 0..10 {
        field.advance_and_render(&mut surface).expect("frame");
    }
}

#[wasm_bindgen_test]
fn system_mounts_into_body_and_stops() {
    let mut options = ParticleFieldOptions::new();
    options.set_canvas(canvas());
    options.set_particle_count(10);
    let system = ParticleSystem::new(&options).expect("particle system");
    assert!(system.is_running());

    system.append_to(Some("#does-not-exist".to_owned())).expect("mount");
    let parent = system.canvas().parent_element().expect("mounted");
    assert_eq!(parent.tag_name().to_lowercase(), "body");

    system.stop();
    assert!(!system.is_running());
    let pointer_events = system.canvas().style().get_property_value("pointer-events");
    assert_eq!(pointer_events.ok().as_deref(), Some("none"));
}
