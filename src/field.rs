// The particle field: owns the particles and the pointer state, and
// advances and draws everything once per display frame.

use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::surface::{Link, Surface};
use rand::Rng;
use vecmath::Vector2;

#[derive(Clone, Debug)]
pub struct ParticleField {
    config: FieldConfig,
    width: f64,
    height: f64,
    paint_background: bool,
    particles: Vec<Particle>,
    pointer: Option<Vector2<f64>>,
}

impl ParticleField {
    pub fn new(config: FieldConfig) -> ParticleField {
        ParticleField::with_rng(config, &mut rand::thread_rng())
    }

    /// Builds a field whose particles are rolled from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(config: FieldConfig, rng: &mut R) -> ParticleField {
        let config = config.sanitized();
        let particles = (0..config.particle_count)
            .map(|_| {
                Particle::spawn(
                    rng,
                    config.width,
                    config.height,
                    config.max_speed,
                    &config.colors,
                    config.opacity_policy,
                )
            })
            .collect();
        ParticleField::from_particles(config, particles)
    }

    /// Builds a field around an existing set of particles.
    pub fn from_particles(config: FieldConfig, particles: Vec<Particle>) -> ParticleField {
        let config = config.sanitized();
        log::debug!(
            "particle field {}x{} with {} particles",
            config.width,
            config.height,
            particles.len()
        );
        ParticleField {
            width: config.width,
            height: config.height,
            paint_background: config.has_background(),
            particles,
            pointer: None,
            config,
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn pointer(&self) -> Option<Vector2<f64>> {
        self.pointer
    }

    /// Records the pointer position; picked up by the next frame. Ignored
    /// when pointer interaction is disabled.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        if self.config.mouse_interaction {
            self.pointer = Some([x, y]);
        }
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer = None;
    }

    /// Stores new viewport bounds. Particles are left where they are and
    /// get clamped on their next move.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        if width == self.width && height == self.height {
            return;
        }
        log::debug!("particle field resized to {}x{}", width, height);
        self.width = width;
        self.height = height;
    }

    /// Advances every particle one frame and draws the result.
    pub fn advance_and_render<S: Surface>(&mut self, surface: &mut S) -> Result<(), S::Error> {
        let (width, height) = (self.width, self.height);
        surface.clear(width, height)?;
        if self.paint_background {
            surface.fill_background(&self.config.background_color, width, height)?;
        }

        let pointer = self.pointer;
        let interact_radius = self.config.interact_radius;
        for i in 0..self.particles.len() {
            let (head, tail) = self.particles.split_at_mut(i + 1);
            let particle = &mut head[i];
            particle.advance(width, height, pointer, interact_radius);

            surface.fill_circle(particle.pos, particle.size, particle.color.css())?;
            if let Some(glow) = particle.glow() {
                surface.fill_glow(&glow)?;
            }

            // later particles still hold last frame's position and size
            for other in tail.iter() {
                if let Some(link) = link(particle, other, &self.config) {
                    surface.stroke_link(&link)?;
                }
            }
        }
        Ok(())
    }
}

fn link<'a>(a: &'a Particle, b: &'a Particle, config: &FieldConfig) -> Option<Link<'a>> {
    let distance = vecmath::vec2_len(vecmath::vec2_sub(a.pos, b.pos));
    if distance >= config.connect_distance {
        return None;
    }
    Some(Link {
        from: a.pos,
        to: b.pos,
        from_color: a.color.css(),
        to_color: b.color.css(),
        width: a.size.min(b.size) * 0.3,
        alpha: (1.0 - distance / config.connect_distance) * config.connect_opacity,
    })
}
