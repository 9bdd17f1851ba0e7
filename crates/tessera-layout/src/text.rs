//! Text size estimation for text leaves.
//!
//! Real glyph metrics belong to the host platform. This module gives text
//! leaves a deterministic, character-based estimate so that layouts involving
//! text can be measured without a font stack.

/// Font parameters used for estimation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TextStyle {
    /// Font size in pixels
    pub font_size: f64,
    /// Line height as a multiplier of the font size
    pub line_height: f64,
    /// Extra spacing after every character, in pixels
    pub letter_spacing: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            line_height: 1.2,
            letter_spacing: 0.0,
        }
    }
}

impl TextStyle {
    /// Style with the given font size and default spacing.
    pub fn sized(font_size: f64) -> Self {
        Self {
            font_size,
            ..Default::default()
        }
    }

    /// Estimated advance of one character.
    pub fn char_width(&self) -> f64 {
        // Proportional fonts average roughly 0.55em per character
        self.font_size * 0.55 + self.letter_spacing
    }

    /// Height of one line of text.
    pub fn line_extent(&self) -> f64 {
        self.font_size * self.line_height
    }
}

/// Estimated text bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    /// Number of laid out lines, at least 1
    pub lines: u32,
}

/// Estimate the bounds of `text`.
///
/// Explicit newlines always break. With `max_width`, words wrap onto new
/// lines once the current line would overflow; a single word wider than the
/// limit keeps its own line.
pub fn measure_text(text: &str, style: &TextStyle, max_width: Option<f64>) -> TextMetrics {
    let char_width = style.char_width();
    let limit = max_width.filter(|w| *w > 0.0).unwrap_or(f64::MAX);

    let mut widest = 0.0_f64;
    let mut lines = 0_u32;
    for paragraph in text.split('\n') {
        let mut line_width = 0.0_f64;
        let mut line_open = false;
        for word in paragraph.split_whitespace() {
            let word_width = word.chars().count() as f64 * char_width;
            if !line_open {
                line_width = word_width;
                line_open = true;
            } else if line_width + char_width + word_width <= limit {
                line_width += char_width + word_width;
            } else {
                widest = widest.max(line_width);
                lines += 1;
                line_width = word_width;
            }
        }
        widest = widest.max(line_width);
        lines += 1;
    }

    let lines = lines.max(1);
    TextMetrics {
        width: widest,
        height: lines as f64 * style.line_extent(),
        lines,
    }
}
