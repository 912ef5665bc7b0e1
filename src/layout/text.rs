use crate::config::LayoutConfig;
use crate::text_metrics;

use super::labels::LabelBox;

/// Measure one label line. Uses real font metrics unless the config asks
/// for the fast path; the calibrated table also backstops a failed font
/// lookup so layout stays deterministic on fontless systems.
pub(crate) fn measure_label(text: &str, config: &LayoutConfig) -> LabelBox {
    let width = if config.fast_text_metrics {
        fast_text_width(text, config.font_size)
    } else {
        text_metrics::measure_text_width(text, config.font_size, &config.font_family)
            .unwrap_or_else(|| fast_text_width(text, config.font_size))
    };
    LabelBox {
        width,
        height: config.font_size * config.label_line_height,
    }
}

/// Cut to `max_chars`, ellipsis included, the way the interactive views
/// shorten department names.
pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}

pub(crate) fn fast_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(|ch| char_width_factor(ch) * font_size).sum()
}

/// Per-character width fractions calibrated against the default font
/// stack at a 16px baseline.
fn char_width_factor(ch: char) -> f32 {
    match ch {
        ' ' => 0.306,
        '.' | ',' | ':' | ';' | '|' | '!' | '(' | ')' | '[' | ']' => 0.321,
        '-' | '\'' => 0.34,
        'i' | 'j' | 'l' => 0.26,
        'f' | 't' => 0.35,
        'r' => 0.40,
        'I' => 0.272,
        'J' => 0.557,
        'E' | 'F' | 'L' | 'T' | 'Z' => 0.60,
        'B' | 'K' | 'P' | 'R' | 'S' | 'Y' | 'A' | 'V' | 'X' => 0.65,
        'C' | 'D' | 'N' | 'O' | 'Q' | 'U' => 0.74,
        'G' | 'H' => 0.742,
        'M' => 0.903,
        'W' => 0.958,
        'm' => 0.89,
        'w' => 0.80,
        '0'..='9' => 0.572,
        'a'..='z' => 0.56,
        'A'..='Z' => 0.66,
        _ => 0.62,
    }
}
