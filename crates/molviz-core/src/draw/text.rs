//! Text styles and text measurement.
//!
//! Atom labels, charge superscripts and the formula notations all render as
//! text runs. [`TextStyle`] describes the font; [`measure`] shapes a string
//! with cosmic-text to obtain its rendered size.
//!
//! ```
//! # use molviz_core::draw::{TextStyle, measure};
//! let style = TextStyle::new("Arial", 24.0);
//! let size = measure("CH4", &style);
//! assert!(size.width() > 0.0);
//! ```

use std::sync::{Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::{info, warn};

use crate::geometry::Size;

/// Smallest font size any label is drawn with.
pub const MIN_FONT_SIZE: f32 = 8.0;

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    font_family: String,
    font_size: f32,
}

impl TextStyle {
    pub fn new(font_family: &str, font_size: f32) -> Self {
        Self {
            font_family: font_family.to_string(),
            font_size,
        }
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    /// Key under which renderers cache resolved text formats.
    pub fn cache_key(&self) -> String {
        format!("{}_{:.1}", self.font_family, self.font_size)
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new("Arial", 24.0)
    }
}

/// Rendered size of `text` in `style`; empty text measures as zero.
pub fn measure(text: &str, style: &TextStyle) -> Size {
    TEXT_MANAGER
        .get_or_init(TextManager::new)
        .calculate_text_size(text, style)
}

struct TextManager {
    font_system: Mutex<FontSystem>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    fn calculate_text_size(&self, text: &str, style: &TextStyle) -> Size {
        if text.is_empty() {
            return Size::default();
        }

        let line_height = style.font_size() * 1.15;
        let estimate = Size::new(
            text.chars().count() as f32 * style.font_size() * 0.6,
            line_height,
        );

        let Ok(mut font_system) = self.font_system.lock() else {
            warn!("FontSystem lock poisoned, estimating text size");
            return estimate;
        };

        let metrics = Metrics::new(style.font_size(), line_height);
        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = Attrs::new().family(Family::Name(style.font_family()));
        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let mut max_width: f32 = 0.0;
        let mut total_height: f32 = 0.0;
        for run in buffer.layout_runs() {
            if let Some(last) = run.glyphs.last() {
                max_width = max_width.max(last.x + last.w);
            }
            total_height += metrics.line_height;
        }

        // No shaped glyphs means no usable font was found.
        if max_width == 0.0 {
            return estimate;
        }
        Size::new(max_width, total_height)
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();
