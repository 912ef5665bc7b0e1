use serde::{Deserialize, Serialize};
use std::path::Path;

/// Geometry and text knobs for the chord layout. Radii are derived from the
/// requested canvas size via the `*_ratio` factors; the label relaxation
/// constants match the interactive original (2px nudge steps, 1.5px margin).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Angular gap reserved around each arc, radians.
    pub pad_angle: f32,
    /// Half-width of the angular window a chord occupies at each endpoint.
    pub chord_width: f32,
    /// inner radius = min((width - 100) / 2, height) * inner_radius_factor
    pub inner_radius_factor: f32,
    /// outer (arc ring) radius as a multiple of the inner radius.
    pub outer_radius_ratio: f32,
    /// chord attachment radius as a multiple of the inner radius.
    pub chord_radius_ratio: f32,
    /// radial label anchor radius as a multiple of the inner radius.
    pub label_radius_ratio: f32,
    /// Horizontal padding added to each measured label box.
    pub label_padding_x: f32,
    /// Minimum clearance enforced between any two label boxes.
    pub label_margin: f32,
    /// Outward nudge applied per relaxation move.
    pub label_step: f32,
    /// Relaxation scan cap per phase, as a multiple of n^2.
    pub max_pass_factor: usize,
    /// Labels longer than this many characters are cut with an ellipsis.
    pub max_label_chars: usize,
    pub font_family: String,
    pub font_size: f32,
    /// Line-height multiplier applied when deriving label box heights.
    pub label_line_height: f32,
    /// Skip font loading and measure with calibrated character widths.
    pub fast_text_metrics: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            pad_angle: 0.01,
            chord_width: 0.04,
            inner_radius_factor: 0.41,
            outer_radius_ratio: 1.05,
            chord_radius_ratio: 0.99,
            label_radius_ratio: 1.15,
            label_padding_x: 5.0,
            label_margin: 1.5,
            label_step: 2.0,
            max_pass_factor: 10,
            max_label_chars: 27,
            font_family: "\"trebuchet ms\", verdana, arial, sans-serif".to_string(),
            font_size: 11.0,
            label_line_height: 1.2,
            fast_text_metrics: false,
        }
    }
}

/// Load a config overlay from a JSON file; absent path means defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<LayoutConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            let config: LayoutConfig = serde_json::from_str(&text)?;
            Ok(config)
        }
        None => Ok(LayoutConfig::default()),
    }
}
