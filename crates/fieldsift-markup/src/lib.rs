//! HTML-like tag parser for terminal styling of field values.
//!
//! Record values sometimes carry light markup such as `<b>bold</b>` or
//! `<i>italic</i>`. This crate turns that markup into terminal styling, strips
//! it for plain-text matching, or leaves it untouched for debugging.
//!
//! # Example
//!
//! ```rust
//! use fieldsift_markup::{MarkupParser, TagTransform};
//!
//! // Strip tags (plain text)
//! let parser = MarkupParser::with_default_tags(TagTransform::Remove);
//! assert_eq!(parser.process("xxx<b>foo</b>yyy"), "xxxfooyyy");
//!
//! // Keep tags visible (debug mode)
//! let parser = MarkupParser::with_default_tags(TagTransform::Keep);
//! assert_eq!(parser.process("<b>foo</b>"), "<b>foo</b>");
//! ```
//!
//! # Tag Syntax
//!
//! A tag is `<name ...>` or `</name>`, where `name` starts with an ASCII letter
//! followed by letters, digits, `_` or `-`. Anything after the name up to `>`
//! (attributes) is ignored. Names are matched case-insensitively. A `<` that
//! does not start a tag (`a < b`) is plain text.
//!
//! Unlike strict HTML, an opening tag without a closing tag styles the rest of
//! the value, and an orphan closing tag is dropped.

use console::Style;
use std::collections::HashMap;

/// How to transform matched tags in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagTransform {
    /// Apply ANSI escape codes from the associated Style.
    Apply,

    /// Remove all tags, outputting only the content.
    Remove,

    /// Keep tags as-is in the output.
    Keep,
}

/// Parser for `<tag>content</tag>` markup.
#[derive(Debug, Clone)]
pub struct MarkupParser {
    styles: HashMap<String, Style>,
    base: Option<Style>,
    transform: TagTransform,
}

impl MarkupParser {
    /// Creates a new parser with the given tag styles and transform mode.
    ///
    /// Tag names in `styles` should be lowercase.
    pub fn new(styles: HashMap<String, Style>, transform: TagTransform) -> Self {
        Self {
            styles,
            base: None,
            transform,
        }
    }

    /// Creates a parser that knows `<b>` (bold) and `<i>` (magenta bold).
    pub fn with_default_tags(transform: TagTransform) -> Self {
        Self::new(default_tag_styles(), transform)
    }

    /// Sets the style applied to text outside any known tag.
    pub fn base_style(mut self, style: Style) -> Self {
        self.base = Some(style);
        self
    }

    /// Parses `input` and transforms tags according to the configured mode.
    pub fn process(&self, input: &str) -> String {
        if self.transform == TagTransform::Keep {
            return input.to_string();
        }

        let mut output = String::with_capacity(input.len());
        let mut stack: Vec<String> = Vec::new();

        for token in Tokenizer::new(input) {
            match token {
                Token::Text(text) => self.append(&mut output, text, &stack),
                Token::OpenTag(name) => {
                    let name = name.to_ascii_lowercase();
                    if self.styles.contains_key(&name) {
                        stack.push(name);
                    }
                }
                Token::CloseTag(name) => {
                    let name = name.to_ascii_lowercase();
                    if let Some(pos) = stack.iter().rposition(|open| *open == name) {
                        stack.truncate(pos);
                    }
                }
            }
        }

        output
    }

    /// Appends a text run, styled by the innermost open tags or the base style.
    fn append(&self, output: &mut String, text: &str, stack: &[String]) {
        if text.is_empty() {
            return;
        }
        if self.transform == TagTransform::Remove {
            output.push_str(text);
            return;
        }

        if stack.is_empty() {
            match &self.base {
                Some(style) => output.push_str(&style.apply_to(text).to_string()),
                None => output.push_str(text),
            }
            return;
        }

        let mut current = text.to_string();
        for name in stack.iter().rev() {
            if let Some(style) = self.styles.get(name) {
                current = style.apply_to(current).to_string();
            }
        }
        output.push_str(&current);
    }
}

/// Returns the built-in tag styles: `b` is bold, `i` is magenta bold.
pub fn default_tag_styles() -> HashMap<String, Style> {
    let mut styles = HashMap::new();
    styles.insert("b".to_string(), Style::new().bold());
    styles.insert("i".to_string(), Style::new().magenta().bold());
    styles
}

/// Removes every tag from `input`, keeping the text between them.
///
/// ```rust
/// assert_eq!(fieldsift_markup::strip_tags("<i>Hero</i> of <b>the</b> day"), "Hero of the day");
/// ```
pub fn strip_tags(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for token in Tokenizer::new(input) {
        if let Token::Text(text) = token {
            output.push_str(text);
        }
    }
    output
}

/// Token types produced by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    /// Plain text content.
    Text(&'a str),
    /// Opening tag name: `<name>`
    OpenTag(&'a str),
    /// Closing tag name: `</name>`
    CloseTag(&'a str),
}

/// Tokenizer for HTML-like tags.
struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Returns the tag name at the start of `content`, if it forms a valid tag.
    fn tag_name(content: &str) -> Option<&str> {
        let mut chars = content.char_indices();
        let (_, first) = chars.next()?;
        if !first.is_ascii_alphabetic() {
            return None;
        }
        let end = chars
            .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
            .map(|(i, _)| i)
            .unwrap_or(content.len());
        let rest = &content[end..];
        if rest.is_empty() || rest.starts_with(char::is_whitespace) || rest == "/" {
            Some(&content[..end])
        } else {
            None
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.input.len() {
            return None;
        }

        let remaining = &self.input[self.pos..];
        let mut search_from = 0;

        loop {
            let Some(offset) = remaining[search_from..].find('<') else {
                self.pos = self.input.len();
                return Some(Token::Text(remaining));
            };
            let lt = search_from + offset;

            if let Some(gt) = remaining[lt..].find('>') {
                let content = &remaining[lt + 1..lt + gt];
                let (closing, body) = match content.strip_prefix('/') {
                    Some(body) => (true, body),
                    None => (false, content),
                };

                if let Some(name) = Self::tag_name(body) {
                    if lt > 0 {
                        // Emit the text first, the tag on the next call
                        self.pos += lt;
                        return Some(Token::Text(&remaining[..lt]));
                    }
                    self.pos += gt + 1;
                    return Some(if closing {
                        Token::CloseTag(name)
                    } else {
                        Token::OpenTag(name)
                    });
                }
            }

            // Not a tag; keep scanning past this '<'
            search_from = lt + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forced_styles() -> HashMap<String, Style> {
        let mut styles = HashMap::new();
        styles.insert("b".to_string(), Style::new().bold().force_styling(true));
        styles.insert(
            "i".to_string(),
            Style::new().magenta().bold().force_styling(true),
        );
        styles
    }

    mod tokenizer {
        use super::*;

        fn tokens(input: &str) -> Vec<Token<'_>> {
            Tokenizer::new(input).collect()
        }

        #[test]
        fn plain_text() {
            assert_eq!(tokens("hello"), vec![Token::Text("hello")]);
        }

        #[test]
        fn tags_and_text() {
            assert_eq!(
                tokens("a<b>c</b>d"),
                vec![
                    Token::Text("a"),
                    Token::OpenTag("b"),
                    Token::Text("c"),
                    Token::CloseTag("b"),
                    Token::Text("d"),
                ]
            );
        }

        #[test]
        fn comparison_is_not_a_tag() {
            assert_eq!(tokens("a < b"), vec![Token::Text("a < b")]);
            assert_eq!(tokens("1 <2> 3"), vec![Token::Text("1 <2> 3")]);
        }

        #[test]
        fn attributes_are_ignored() {
            assert_eq!(
                tokens("<span class=\"x\">y</span>"),
                vec![
                    Token::OpenTag("span"),
                    Token::Text("y"),
                    Token::CloseTag("span"),
                ]
            );
        }

        #[test]
        fn unterminated_bracket_is_text() {
            assert_eq!(tokens("x<b"), vec![Token::Text("x<b")]);
        }
    }

    mod remove_mode {
        use super::*;

        #[test]
        fn single_tag_stripped() {
            let parser = MarkupParser::with_default_tags(TagTransform::Remove);
            assert_eq!(parser.process("<b>foo</b>"), "foo");
        }

        #[test]
        fn unknown_tags_stripped() {
            let parser = MarkupParser::with_default_tags(TagTransform::Remove);
            assert_eq!(parser.process("<u>foo</u>"), "foo");
        }

        #[test]
        fn orphan_close_stripped() {
            let parser = MarkupParser::with_default_tags(TagTransform::Remove);
            assert_eq!(parser.process("xxx</b>foo"), "xxxfoo");
        }

        #[test]
        fn strip_tags_matches_remove() {
            let parser = MarkupParser::with_default_tags(TagTransform::Remove);
            let input = "xxx<i>foo</i>yyy <b>bar";
            assert_eq!(parser.process(input), strip_tags(input));
        }
    }

    mod keep_mode {
        use super::*;

        #[test]
        fn input_unchanged() {
            let parser = MarkupParser::with_default_tags(TagTransform::Keep);
            assert_eq!(parser.process("x<b>y</b>"), "x<b>y</b>");
        }
    }

    mod apply_mode {
        use super::*;

        #[test]
        fn bold_tag_applied() {
            let parser = MarkupParser::new(forced_styles(), TagTransform::Apply);
            assert_eq!(parser.process("<b>foo</b>"), "\x1b[1mfoo\x1b[0m");
        }

        #[test]
        fn unclosed_tag_styles_rest() {
            let parser = MarkupParser::new(forced_styles(), TagTransform::Apply);
            assert_eq!(parser.process("xxx<b>foo"), "xxx\x1b[1mfoo\x1b[0m");
        }

        #[test]
        fn base_style_outside_tags() {
            let parser = MarkupParser::new(forced_styles(), TagTransform::Apply)
                .base_style(Style::new().cyan().force_styling(true));
            let output = parser.process("a<b>b</b>");
            assert!(output.starts_with("\x1b[36ma\x1b[0m"));
            assert!(output.ends_with("\x1b[1mb\x1b[0m"));
        }

        #[test]
        fn uppercase_tags_match() {
            let parser = MarkupParser::new(forced_styles(), TagTransform::Apply);
            assert_eq!(parser.process("<B>foo</B>"), "\x1b[1mfoo\x1b[0m");
        }
    }
}
