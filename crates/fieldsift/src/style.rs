//! Terminal styling.
//!
//! All ANSI output goes through a [`Painter`], which is either enabled or not
//! for a whole run. When enabled, styles are forced on so output looks the
//! same whether or not stdout is a terminal.

use console::Style;
use fieldsift_markup::{strip_tags, MarkupParser, TagTransform};
use std::collections::HashMap;

/// When to emit ANSI styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Style output when stdout supports it.
    #[default]
    Auto,
    /// Always style output.
    Always,
    /// Never style output.
    Never,
}

impl ColorMode {
    /// Resolves the mode against the current terminal.
    pub fn enabled(self) -> bool {
        match self {
            ColorMode::Auto => console::colors_enabled(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Applies styles to output text, or leaves it plain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            enabled: mode.enabled(),
        }
    }

    /// A painter that never styles.
    pub fn plain() -> Self {
        Self { enabled: false }
    }

    /// Styles `text`. Empty text and a missing style give plain text.
    pub fn paint(&self, text: &str, style: Option<&Style>) -> String {
        match style {
            Some(style) if self.enabled && !text.is_empty() => style
                .clone()
                .force_styling(true)
                .apply_to(text)
                .to_string(),
            _ => text.to_string(),
        }
    }

    /// Renders a markup value: tags become styles, or are stripped when
    /// styling is off.
    pub(crate) fn markup(
        &self,
        text: &str,
        tags: &HashMap<String, Style>,
        base: Option<&Style>,
    ) -> String {
        if !self.enabled {
            return strip_tags(text);
        }
        let forced = tags
            .iter()
            .map(|(name, style)| (name.clone(), style.clone().force_styling(true)))
            .collect();
        let mut parser = MarkupParser::new(forced, TagTransform::Apply);
        if let Some(base) = base {
            parser = parser.base_style(base.clone().force_styling(true));
        }
        parser.process(text)
    }
}

/// Default style of a model's first field.
pub(crate) fn title_style() -> Style {
    Style::new().cyan().bold()
}

/// Style of group headers.
pub(crate) fn group_style() -> Style {
    Style::new().yellow().bold()
}

/// Style of value labels in count breakdowns.
pub(crate) fn label_style() -> Style {
    Style::new().bold()
}

/// Style of count headers and the total line.
pub(crate) fn count_style() -> Style {
    Style::new().green().bold()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_painter_leaves_text() {
        let painter = Painter::plain();
        assert_eq!(painter.paint("x", Some(&title_style())), "x");
        assert_eq!(painter.markup("<b>x</b>", &HashMap::new(), None), "x");
    }

    #[test]
    fn enabled_painter_styles() {
        let painter = Painter::new(ColorMode::Always);
        let painted = painter.paint("x", Some(&title_style()));
        assert!(painted.contains('x'));
        assert!(painted.starts_with("\x1b["));
        assert_eq!(console::strip_ansi_codes(&painted), "x");
    }

    #[test]
    fn empty_text_is_never_styled() {
        let painter = Painter::new(ColorMode::Always);
        assert_eq!(painter.paint("", Some(&title_style())), "");
        assert_eq!(painter.paint("x", None), "x");
    }
}
