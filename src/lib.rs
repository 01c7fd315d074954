mod utils;

pub mod animation;
pub mod canvas;
pub mod color;
pub mod config;
pub mod field;
pub mod particle;
pub mod surface;
pub mod web;

pub use animation::AnimationLoop;
pub use color::{OpacityPolicy, ParticleColor, Rgba};
pub use config::FieldConfig;
pub use field::ParticleField;
pub use particle::Particle;
pub use surface::{Glow, Link, Surface};
pub use web::{bootstrap, PageFields, ParticleFieldOptions, ParticleSystem};

use wasm_bindgen::prelude::*;
use web_sys::console;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    utils::init_logging(log::Level::Info);
}

// Scoped console.time/console.timeEnd pair, used around frames when the
// `frame-timing` feature is on
pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}
