use console::Style;
use fieldsift_markup::{strip_tags, MarkupParser, TagTransform};
use proptest::prelude::*;
use std::collections::HashMap;

fn test_styles() -> HashMap<String, Style> {
    let mut styles = HashMap::new();
    styles.insert("b".to_string(), Style::new().bold().force_styling(true));
    styles.insert("i".to_string(), Style::new().red().force_styling(true));
    styles
}

#[test]
fn test_output_modes() {
    let input = "<i>hello</i> <b>world</b>";

    let parser = MarkupParser::new(test_styles(), TagTransform::Keep);
    assert_eq!(parser.process(input), input);

    let parser = MarkupParser::new(test_styles(), TagTransform::Remove);
    assert_eq!(parser.process(input), "hello world");

    let parser = MarkupParser::new(test_styles(), TagTransform::Apply);
    let output = parser.process(input);
    assert!(output.contains("\x1b[31m"));
    assert!(output.contains("\x1b[1m"));
    assert!(output.contains("hello"));
    assert!(output.contains("world"));
}

#[test]
fn test_compact_ansi_output() {
    // A styled run is wrapped once, not per character.
    let parser = MarkupParser::new(test_styles(), TagTransform::Apply);
    let output = parser.process("<i>text</i>");
    let escape_count = output.matches("\x1b[").count();
    assert!(
        escape_count <= 2,
        "Found {} escapes for 'text'. Output: {:?}",
        escape_count,
        output
    );
}

proptest! {
    #[test]
    fn text_without_brackets_is_untouched(input in "[a-zA-Z0-9 .,!?]{0,40}") {
        prop_assert_eq!(strip_tags(&input), input.clone());
        let parser = MarkupParser::new(test_styles(), TagTransform::Remove);
        prop_assert_eq!(parser.process(&input), input);
    }

    #[test]
    fn stripping_never_grows(input in "[a-z<>/ ]{0,40}") {
        prop_assert!(strip_tags(&input).len() <= input.len());
    }
}
