// Frame scheduling state. The host calls `step` from its display refresh
// callback and only asks for another frame while `step` says so.

use crate::field::ParticleField;
use crate::surface::Surface;
use std::fmt::Debug;

pub struct AnimationLoop<S: Surface> {
    field: ParticleField,
    surface: S,
    running: bool,
    frames: u64,
}

impl<S: Surface> AnimationLoop<S>
where
    S::Error: Debug,
{
    /// Wraps a field and the surface it draws on. The loop starts stopped.
    pub fn new(field: ParticleField, mut surface: S) -> Self {
        surface.resize(field.width(), field.height());
        AnimationLoop {
            field,
            surface,
            running: false,
            frames: 0,
        }
    }

    pub fn start(&mut self) {
        if !self.running {
            log::info!("particle animation started");
        }
        self.running = true;
    }

    pub fn stop(&mut self) {
        if self.running {
            log::info!("particle animation stopped after {} frames", self.frames);
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs one frame if the loop is running. Returns whether another
    /// frame should be scheduled. Drawing errors are logged and the loop
    /// carries on.
    pub fn step(&mut self) -> bool {
        if !self.running {
            return false;
        }
        if let Err(e) = self.field.advance_and_render(&mut self.surface) {
            log::warn!("particle frame {} failed to draw: {:?}", self.frames, e);
        }
        self.frames += 1;
        self.running
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.field.on_pointer_move(x, y);
    }

    pub fn on_pointer_leave(&mut self) {
        self.field.on_pointer_leave();
    }

    /// New viewport bounds for both the field and its surface.
    pub fn on_resize(&mut self, width: f64, height: f64) {
        self.field.set_viewport(width, height);
        self.surface.resize(width, height);
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldConfig;
    use crate::surface::recording::{DrawCall, Recorder};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn animation() -> AnimationLoop<Recorder> {
        let mut rng = StdRng::seed_from_u64(11);
        let mut config = FieldConfig::default().with_size(320.0, 240.0);
        config.particle_count = 12;
        AnimationLoop::new(ParticleField::with_rng(config, &mut rng), Recorder::default())
    }

    fn clears(animation: &AnimationLoop<Recorder>) -> usize {
        animation
            .surface()
            .calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Clear(..)))
            .count()
    }

    #[test]
    fn surface_is_sized_on_creation() {
        let animation = animation();
        assert_eq!(animation.surface().calls, vec![DrawCall::Resize(320.0, 240.0)]);
        assert!(!animation.is_running());
    }

    #[test]
    fn stopped_loop_draws_nothing() {
        let mut animation = animation();
        assert!(!animation.step());
        assert_eq!(animation.frames(), 0);
        assert_eq!(clears(&animation), 0);
    }

    #[test]
    fn start_stop_and_restart() {
        let mut animation = animation();
        animation.start();
        assert!(animation.step());
        assert!(animation.step());
        animation.stop();
        assert!(!animation.step());
        assert_eq!(animation.frames(), 2);

        animation.start();
        assert!(animation.step());
        assert_eq!(animation.frames(), 3);
        assert_eq!(clears(&animation), 3);
    }

    #[test]
    fn resize_twice_is_idempotent_for_particles() {
        let mut animation = animation();
        let before: Vec<_> = animation.field().particles().iter().map(|p| p.pos).collect();
        animation.on_resize(320.0, 240.0);
        animation.on_resize(320.0, 240.0);
        let after: Vec<_> = animation.field().particles().iter().map(|p| p.pos).collect();
        assert_eq!(before, after);
        assert_eq!(
            animation.surface().calls.last(),
            Some(&DrawCall::Resize(320.0, 240.0))
        );
    }

    #[test]
    fn pointer_notifications_reach_the_field() {
        let mut animation = animation();
        animation.on_pointer_move(3.0, 4.0);
        assert_eq!(animation.field().pointer(), Some([3.0, 4.0]));
        animation.on_pointer_leave();
        assert_eq!(animation.field().pointer(), None);
    }
}
