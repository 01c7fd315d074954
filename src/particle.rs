// Particle record and its per-frame motion: wobble drift, linear motion,
// reflection off the viewport edges, and the pointer push.

use crate::color::{OpacityPolicy, ParticleColor};
use crate::config::DEFAULT_PALETTE;
use crate::surface::Glow;
use rand::seq::SliceRandom;
use rand::Rng;
use vecmath::Vector2;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub size: f64,
    pub original_size: f64,
    pub color: ParticleColor,
    pub opacity: f64,
    pub wobble: f64,
    pub wobble_speed: f64,
}

impl Particle {
    pub const MIN_SIZE: f64 = 0.5;
    pub const SIZE_RANGE: f64 = 4.0;
    pub const MIN_OPACITY: f64 = 0.3;
    pub const OPACITY_RANGE: f64 = 0.5;
    pub const WOBBLE_AMPLITUDE: f64 = 0.1;
    pub const MIN_WOBBLE_SPEED: f64 = 0.01;
    pub const MAX_WOBBLE_SPEED: f64 = 0.1;
    pub const INITIAL_WOBBLE_SPEED_RANGE: f64 = 0.02;
    pub const WOBBLE_GROWTH: f64 = 1.05;
    pub const WOBBLE_DECAY: f64 = 0.98;
    pub const PUSH: f64 = 2.0;
    pub const GLOW_MIN_SIZE: f64 = 2.0;

    pub fn new(
        pos: Vector2<f64>,
        vel: Vector2<f64>,
        size: f64,
        color: ParticleColor,
        opacity: f64,
    ) -> Particle {
        Particle {
            pos,
            vel,
            size,
            original_size: size,
            color,
            opacity,
            wobble: 0.0,
            wobble_speed: Particle::MIN_WOBBLE_SPEED,
        }
    }

    /// Rolls a fresh particle somewhere inside `width` x `height`.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        width: f64,
        height: f64,
        max_speed: f64,
        palette: &[String],
        policy: OpacityPolicy,
    ) -> Particle {
        let size = rng.gen::<f64>() * Particle::SIZE_RANGE + Particle::MIN_SIZE;
        let entry = palette
            .choose(rng)
            .map(String::as_str)
            .unwrap_or(DEFAULT_PALETTE[0]);
        let opacity = rng.gen::<f64>() * Particle::OPACITY_RANGE + Particle::MIN_OPACITY;
        let color = ParticleColor::resolve(entry, opacity, policy);

        let pos_x = rng.gen::<f64>() * width;
        let pos_y = rng.gen::<f64>() * height;
        let vel_x = (rng.gen::<f64>() - 0.5) * max_speed;
        let vel_y = (rng.gen::<f64>() - 0.5) * max_speed;

        Particle {
            pos: [pos_x, pos_y],
            vel: [vel_x, vel_y],
            size,
            original_size: size,
            color,
            opacity,
            wobble: rng.gen::<f64>() * 2.0 - 1.0,
            wobble_speed: rng.gen::<f64>() * Particle::INITIAL_WOBBLE_SPEED_RANGE
                + Particle::MIN_WOBBLE_SPEED,
        }
    }

    /// Moves the particle one frame and resolves its size for this frame.
    pub fn advance(
        &mut self,
        width: f64,
        height: f64,
        pointer: Option<Vector2<f64>>,
        interact_radius: f64,
    ) {
        self.drift();
        self.integrate();
        self.reflect(width, height);
        self.interact(pointer, interact_radius);
    }

    fn drift(&mut self) {
        self.wobble += self.wobble_speed;
        self.pos[0] += self.wobble.sin() * Particle::WOBBLE_AMPLITUDE;
        self.pos[1] += self.wobble.cos() * Particle::WOBBLE_AMPLITUDE;
    }

    fn integrate(&mut self) {
        self.pos = vecmath::vec2_add(self.pos, self.vel);
    }

    fn reflect(&mut self, width: f64, height: f64) {
        let bounds = [width, height];
        for axis in 0..2 {
            if self.pos[axis] < 0.0 {
                self.pos[axis] = 0.0;
                self.vel[axis] *= -1.0;
            } else if self.pos[axis] > bounds[axis] {
                self.pos[axis] = bounds[axis];
                self.vel[axis] *= -1.0;
            }
        }
    }

    fn interact(&mut self, pointer: Option<Vector2<f64>>, interact_radius: f64) {
        let pointer = match pointer {
            Some(pointer) => pointer,
            None => {
                self.size = self.original_size;
                return;
            }
        };

        let away = vecmath::vec2_sub(self.pos, pointer);
        let distance = vecmath::vec2_len(away);
        if distance < interact_radius {
            let force = (interact_radius - distance) / interact_radius;
            // atan2 keeps a particle sitting exactly on the pointer moving along +x
            let angle = away[1].atan2(away[0]);
            let push = vecmath::vec2_scale([angle.cos(), angle.sin()], force * Particle::PUSH);
            self.pos = vecmath::vec2_add(self.pos, push);
            self.size = self.original_size * (1.0 + force);
            self.wobble_speed =
                (self.wobble_speed * Particle::WOBBLE_GROWTH).min(Particle::MAX_WOBBLE_SPEED);
        } else {
            self.size = self.original_size;
            self.wobble_speed =
                (self.wobble_speed * Particle::WOBBLE_DECAY).max(Particle::MIN_WOBBLE_SPEED);
        }
    }

    /// Glow for the current frame, if the particle is large enough and its
    /// colour has rgba channels to fade.
    pub fn glow(&self) -> Option<Glow> {
        if self.size <= Particle::GLOW_MIN_SIZE {
            return None;
        }
        let channels = self.color.channels()?;
        Some(Glow {
            center: self.pos,
            inner_radius: self.size * 0.5,
            radius: self.size * 1.5,
            inner: channels.with_alpha(self.opacity * 0.5),
            outer: channels.with_alpha(0.0),
        })
    }
}
