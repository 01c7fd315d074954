// Field configuration, its defaults, and the presets used by the page
// bootstrap.

use crate::color::{OpacityPolicy, Rgba};

pub const DEFAULT_PARTICLE_COUNT: usize = 100;
pub const DEFAULT_INTERACT_RADIUS: f64 = 150.0;
pub const DEFAULT_MAX_SPEED: f64 = 1.0;
pub const DEFAULT_CONNECT_DISTANCE: f64 = 150.0;
pub const DEFAULT_CONNECT_OPACITY: f64 = 0.5;
pub const TRANSPARENT: &str = "rgba(0, 0, 0, 0)";
pub const DEFAULT_PALETTE: [&str; 4] = ["#4a6fa5", "#166d67", "#6a8d92", "#f0f7f7"];

/// Immutable settings of a `ParticleField`.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub width: f64,
    pub height: f64,
    pub particle_count: usize,
    pub colors: Vec<String>,
    pub interact_radius: f64,
    pub max_speed: f64,
    pub connect_distance: f64,
    pub connect_opacity: f64,
    pub mouse_interaction: bool,
    pub background_color: String,
    pub opacity_policy: OpacityPolicy,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            width: 0.0,
            height: 0.0,
            particle_count: DEFAULT_PARTICLE_COUNT,
            colors: palette(&DEFAULT_PALETTE),
            interact_radius: DEFAULT_INTERACT_RADIUS,
            max_speed: DEFAULT_MAX_SPEED,
            connect_distance: DEFAULT_CONNECT_DISTANCE,
            connect_opacity: DEFAULT_CONNECT_OPACITY,
            mouse_interaction: true,
            background_color: TRANSPARENT.to_owned(),
            opacity_policy: OpacityPolicy::default(),
        }
    }
}

impl FieldConfig {
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Replaces unusable values with defaults. Numeric settings that are
    /// zero, negative or not finite fall back, as does an empty palette or
    /// background. Width and height only have to be finite and
    /// non-negative; the host fills them in from the viewport.
    pub fn sanitized(mut self) -> Self {
        let defaults = FieldConfig::default();
        self.interact_radius = positive_or(self.interact_radius, defaults.interact_radius);
        self.max_speed = positive_or(self.max_speed, defaults.max_speed);
        self.connect_distance = positive_or(self.connect_distance, defaults.connect_distance);
        self.connect_opacity = positive_or(self.connect_opacity, defaults.connect_opacity);
        if self.particle_count == 0 {
            self.particle_count = defaults.particle_count;
        }
        self.colors.retain(|c| !c.trim().is_empty());
        if self.colors.is_empty() {
            self.colors = defaults.colors;
        }
        if self.background_color.trim().is_empty() {
            self.background_color = defaults.background_color;
        }
        self.width = positive_or(self.width, 0.0);
        self.height = positive_or(self.height, 0.0);
        self
    }

    /// True when the background needs a fill pass before particles are
    /// drawn.
    pub fn has_background(&self) -> bool {
        if self.background_color == TRANSPARENT {
            return false;
        }
        !Rgba::from_css(&self.background_color)
            .map(|rgba| rgba.is_transparent())
            .unwrap_or(false)
    }

    /// Full-page field behind the content.
    pub fn page_background() -> Self {
        FieldConfig {
            particle_count: 100,
            colors: palette(&DEFAULT_PALETTE),
            max_speed: 0.3,
            connect_distance: 150.0,
            interact_radius: 200.0,
            connect_opacity: 0.3,
            ..FieldConfig::default()
        }
    }

    /// Lighter, tinted field for the page header.
    pub fn header() -> Self {
        FieldConfig {
            particle_count: 50,
            colors: palette(&["#ffffff", "#f0f7f7", "#e0e0e0", "#4a6fa5"]),
            max_speed: 0.2,
            connect_distance: 120.0,
            interact_radius: 180.0,
            connect_opacity: 0.4,
            background_color: "rgba(22, 109, 103, 0.05)".to_owned(),
            ..FieldConfig::default()
        }
    }

    /// Field for the features section.
    pub fn features() -> Self {
        FieldConfig {
            particle_count: 60,
            colors: palette(&["#166d67", "#4a6fa5", "#f0f7f7"]),
            max_speed: 0.25,
            connect_distance: 130.0,
            interact_radius: 160.0,
            connect_opacity: 0.35,
            ..FieldConfig::default()
        }
    }
}

fn palette(colors: &[&str]) -> Vec<String> {
    colors.iter().map(|c| (*c).to_owned()).collect()
}

fn positive_or(value: f64, default: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = FieldConfig::default();
        assert_eq!(config.particle_count, 100);
        assert_eq!(config.colors, vec!["#4a6fa5", "#166d67", "#6a8d92", "#f0f7f7"]);
        assert_eq!(config.interact_radius, 150.0);
        assert_eq!(config.max_speed, 1.0);
        assert_eq!(config.connect_distance, 150.0);
        assert_eq!(config.connect_opacity, 0.5);
        assert!(config.mouse_interaction);
        assert_eq!(config.opacity_policy, OpacityPolicy::HexOnly);
        assert!(!config.has_background());
    }

    #[test]
    fn sanitize_falls_back_like_falsy_options() {
        let config = FieldConfig {
            particle_count: 0,
            colors: vec![" ".to_owned()],
            interact_radius: 0.0,
            max_speed: f64::NAN,
            connect_distance: -4.0,
            connect_opacity: f64::INFINITY,
            background_color: String::new(),
            width: -10.0,
            height: 300.0,
            ..FieldConfig::default()
        }
        .sanitized();

        assert_eq!(config, FieldConfig::default().with_size(0.0, 300.0));
    }

    #[test]
    fn sanitize_keeps_valid_values() {
        let config = FieldConfig::header().with_size(800.0, 200.0);
        assert_eq!(config.clone().sanitized(), config);
    }

    #[test]
    fn transparent_backgrounds_are_skipped() {
        let mut config = FieldConfig::default();
        config.background_color = "rgba(255, 0, 0, 0)".to_owned();
        assert!(!config.has_background());
        config.background_color = "black".to_owned();
        assert!(config.has_background());
        assert!(FieldConfig::header().has_background());
    }

    #[test]
    fn presets_carry_page_parameters() {
        let background = FieldConfig::page_background();
        assert_eq!(
            (background.particle_count, background.max_speed, background.interact_radius),
            (100, 0.3, 200.0)
        );

        let header = FieldConfig::header();
        assert_eq!(header.particle_count, 50);
        assert_eq!(header.connect_distance, 120.0);
        assert_eq!(header.background_color, "rgba(22, 109, 103, 0.05)");

        let features = FieldConfig::features();
        assert_eq!(features.colors.len(), 3);
        assert_eq!(features.connect_opacity, 0.35);
    }
}
