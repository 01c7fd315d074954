// Colour handling for particles. Palette entries are parsed once when a
// particle is created; the painted CSS text and its rgba channels are kept
// side by side so the glow never has to re-parse anything per frame.

use std::fmt;

// Structured colour, rgb channels plus a CSS alpha in [0, 1]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: f64) -> Rgba {
        Rgba { r, g, b, a }
    }

    // Built from an unsigned 32 holding 0x00RRGGBB
    pub fn from_rgb_u32(num: u32, a: f64) -> Rgba {
        let r = (num >> 16) as u8;
        let g = (num >> 8) as u8;
        let b = num as u8;

        Rgba { r, g, b, a }
    }

    /// Parses the first six hex digits after `#`, so `#rrggbbaa` keeps
    /// only its rgb part. Short forms such as `#fff` return `None`.
    pub fn from_hex(text: &str, a: f64) -> Option<Rgba> {
        let digits = text.strip_prefix('#')?.get(..6)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let num = u32::from_str_radix(digits, 16).ok()?;
        Some(Rgba::from_rgb_u32(num, a))
    }

    /// Parses the `rgba(r, g, b, a)` form: integer channels, optional
    /// whitespace after each comma, and a plain decimal alpha. Channels
    /// above 255 are clamped the way the canvas clamps them.
    pub fn from_css(text: &str) -> Option<Rgba> {
        let rest = text.strip_prefix("rgba(")?;
        let (r, rest) = take_channel(rest)?;
        let rest = rest.strip_prefix(',')?.trim_start();
        let (g, rest) = take_channel(rest)?;
        let rest = rest.strip_prefix(',')?.trim_start();
        let (b, rest) = take_channel(rest)?;
        let rest = rest.strip_prefix(',')?.trim_start();

        let alpha_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or_else(|| rest.len());
        if alpha_len == 0 {
            return None;
        }
        let (alpha, rest) = rest.split_at(alpha_len);
        if !rest.starts_with(')') {
            return None;
        }
        let a = alpha.parse::<f64>().ok()?;

        Some(Rgba { r, g, b, a })
    }

    pub fn with_alpha(self, a: f64) -> Rgba {
        Rgba { a, ..self }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0.0
    }
}

fn take_channel(text: &str) -> Option<(u8, &str)> {
    let len = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or_else(|| text.len());
    if len == 0 {
        return None;
    }
    let (digits, rest) = text.split_at(len);
    // all digits, so parsing only fails on overflow
    let channel = digits.parse::<u32>().map(|v| v.min(255) as u8).unwrap_or(255);
    Some((channel, rest))
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Whether the opacity rolled for a particle is baked into palette entries
/// that already carry their own alpha.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpacityPolicy {
    /// Only `#rrggbb` entries receive the rolled opacity; `rgba(...)`
    /// entries are painted exactly as written.
    HexOnly,
    /// Every parseable entry receives the rolled opacity.
    All,
}

impl Default for OpacityPolicy {
    fn default() -> Self {
        OpacityPolicy::HexOnly
    }
}

/// Colour of a single particle.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleColor {
    css: String,
    channels: Option<Rgba>,
}

impl ParticleColor {
    /// Resolves a palette entry for a particle whose rolled opacity is
    /// `opacity`. Text that is neither hex nor rgba is kept verbatim.
    pub fn resolve(entry: &str, opacity: f64, policy: OpacityPolicy) -> ParticleColor {
        if entry.starts_with('#') {
            return match Rgba::from_hex(entry, opacity) {
                Some(rgba) => ParticleColor::from(rgba),
                None => ParticleColor::verbatim(entry),
            };
        }
        match (Rgba::from_css(entry), policy) {
            (Some(rgba), OpacityPolicy::All) => ParticleColor::from(rgba.with_alpha(opacity)),
            _ => ParticleColor::verbatim(entry),
        }
    }

    pub fn verbatim(css: &str) -> ParticleColor {
        ParticleColor {
            css: css.to_owned(),
            channels: Rgba::from_css(css),
        }
    }

    pub fn css(&self) -> &str {
        &self.css
    }

    /// The rgba channels, when the painted text has the `rgba(...)` form.
    pub fn channels(&self) -> Option<Rgba> {
        self.channels
    }
}

impl From<Rgba> for ParticleColor {
    fn from(rgba: Rgba) -> Self {
        ParticleColor {
            css: rgba.to_string(),
            channels: Some(rgba),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_with_opacity_formats_as_rgba() {
        let color = ParticleColor::resolve("#4a6fa5", 0.5, OpacityPolicy::HexOnly);
        assert_eq!(color.css(), "rgba(74, 111, 165, 0.5)");
        assert_eq!(color.channels(), Some(Rgba::new(74, 111, 165, 0.5)));
    }

    #[test]
    fn long_hex_uses_first_six_digits() {
        let color = ParticleColor::resolve("#4a6fa5ff", 0.5, OpacityPolicy::HexOnly);
        assert_eq!(color.css(), "rgba(74, 111, 165, 0.5)");
        assert_eq!(color.channels(), Some(Rgba::new(74, 111, 165, 0.5)));

        let color = ParticleColor::resolve("#4a6fzz", 0.5, OpacityPolicy::HexOnly);
        assert_eq!(color.css(), "#4a6fzz");
        assert_eq!(color.channels(), None);
    }

    #[test]
    fn oversized_rgba_channels_clamp_and_still_glow() {
        let entry = "rgba(300, 0, 99999999999, 0.5)";
        let color = ParticleColor::resolve(entry, 0.4, OpacityPolicy::HexOnly);
        assert_eq!(color.css(), entry);
        assert_eq!(color.channels(), Some(Rgba::new(255, 0, 255, 0.5)));
    }

    #[test]
    fn rgba_entry_is_painted_unchanged_by_default() {
        let color = ParticleColor::resolve("rgba(255,255,255,0.9)", 0.4, OpacityPolicy::HexOnly);
        assert_eq!(color.css(), "rgba(255,255,255,0.9)");
        assert_eq!(color.channels(), Some(Rgba::new(255, 255, 255, 0.9)));
    }

    #[test]
    fn rgba_entry_takes_rolled_opacity_when_asked() {
        let color = ParticleColor::resolve("rgba(10, 20, 30, 0.9)", 0.4, OpacityPolicy::All);
        assert_eq!(color.css(), "rgba(10, 20, 30, 0.4)");
    }

    #[test]
    fn unknown_text_has_no_channels() {
        for entry in &["tomato", "rgb(1, 2, 3)", "#fff", "rgba(1, 2, 3)", "rgba(-1, 0, 0, 1)"] {
            let color = ParticleColor::resolve(entry, 0.5, OpacityPolicy::HexOnly);
            assert_eq!(color.css(), *entry);
            assert_eq!(color.channels(), None, "{}", entry);
        }
    }

    #[test]
    fn css_parser_allows_space_after_commas_only() {
        assert!(Rgba::from_css("rgba(1, 2,3,  0.25)").is_some());
        assert!(Rgba::from_css("rgba(1 , 2, 3, 0.25)").is_none());
        assert!(Rgba::from_css("rgba(1, 2, 3, )").is_none());
    }

    #[test]
    fn transparent_alpha_formats_as_zero() {
        let rgba = Rgba::new(1, 2, 3, 0.7).with_alpha(0.0);
        assert!(rgba.is_transparent());
        assert_eq!(rgba.to_string(), "rgba(1, 2, 3, 0)");
    }
}
