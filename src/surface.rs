// Drawing primitives a particle field needs from its host. The browser
// implementation lives in canvas.rs; tests record the calls instead.

use crate::color::Rgba;
use vecmath::Vector2;

/// Radial glow around a particle: a circle of `radius` filled with a
/// gradient running from `inner` at `inner_radius` to `outer` at `radius`.
#[derive(Clone, Debug, PartialEq)]
pub struct Glow {
    pub center: Vector2<f64>,
    pub inner_radius: f64,
    pub radius: f64,
    pub inner: Rgba,
    pub outer: Rgba,
}

/// Line between two particles, stroked with a linear gradient between
/// their colours at `alpha` global opacity.
#[derive(Clone, Debug, PartialEq)]
pub struct Link<'a> {
    pub from: Vector2<f64>,
    pub to: Vector2<f64>,
    pub from_color: &'a str,
    pub to_color: &'a str,
    pub width: f64,
    pub alpha: f64,
}

pub trait Surface {
    type Error;

    fn resize(&mut self, width: f64, height: f64);

    fn clear(&mut self, width: f64, height: f64) -> Result<(), Self::Error>;

    fn fill_background(&mut self, color: &str, width: f64, height: f64)
        -> Result<(), Self::Error>;

    fn fill_circle(
        &mut self,
        center: Vector2<f64>,
        radius: f64,
        color: &str,
    ) -> Result<(), Self::Error>;

    fn fill_glow(&mut self, glow: &Glow) -> Result<(), Self::Error>;

    /// Strokes the link; global opacity is back at 1.0 when this returns.
    fn stroke_link(&mut self, link: &Link<'_>) -> Result<(), Self::Error>;
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;
    use std::convert::Infallible;

    #[derive(Clone, Debug, PartialEq)]
    pub enum DrawCall {
        Resize(f64, f64),
        Clear(f64, f64),
        Background(String),
        Circle { center: Vector2<f64>, radius: f64, color: String },
        Glow(Glow),
        Link {
            from: Vector2<f64>,
            to: Vector2<f64>,
            colors: (String, String),
            width: f64,
            alpha: f64,
        },
    }

    #[derive(Default, Debug)]
    pub struct Recorder {
        pub calls: Vec<DrawCall>,
    }

    impl Recorder {
        pub fn glows(&self) -> usize {
            self.calls.iter().filter(|c| matches!(c, DrawCall::Glow(_))).count()
        }

        pub fn links(&self) -> Vec<&DrawCall> {
            self.calls
                .iter()
                .filter(|c| matches!(c, DrawCall::Link { .. }))
                .collect()
        }
    }

    impl Surface for Recorder {
        type Error = Infallible;

        fn resize(&mut self, width: f64, height: f64) {
            self.calls.push(DrawCall::Resize(width, height));
        }

        fn clear(&mut self, width: f64, height: f64) -> Result<(), Infallible> {
            self.calls.push(DrawCall::Clear(width, height));
            Ok(())
        }

        fn fill_background(
            &mut self,
            color: &str,
            _width: f64,
            _height: f64,
        ) -> Result<(), Infallible> {
            self.calls.push(DrawCall::Background(color.to_owned()));
            Ok(())
        }

        fn fill_circle(
            &mut self,
            center: Vector2<f64>,
            radius: f64,
            color: &str,
        ) -> Result<(), Infallible> {
            self.calls.push(DrawCall::Circle {
                center,
                radius,
                color: color.to_owned(),
            });
            Ok(())
        }

        fn fill_glow(&mut self, glow: &Glow) -> Result<(), Infallible> {
            self.calls.push(DrawCall::Glow(glow.clone()));
            Ok(())
        }

        fn stroke_link(&mut self, link: &Link<'_>) -> Result<(), Infallible> {
            self.calls.push(DrawCall::Link {
                from: link.from,
                to: link.to,
                colors: (link.from_color.to_owned(), link.to_color.to_owned()),
                width: link.width,
                alpha: link.alpha,
            });
            Ok(())
        }
    }
}
