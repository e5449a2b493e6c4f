//! Plain-text extraction from post bodies

use pulldown_cmark::{Event, Options, Parser};

/// Markdown options for MDX bodies. Embedded components come through as
/// inline or block HTML and are skipped.
fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
}

/// Extract the readable text of a markdown body
pub fn plain_text(markdown: &str) -> String {
    let mut text = String::with_capacity(markdown.len());

    for event in Parser::new_ext(markdown, options()) {
        match event {
            Event::Text(t) | Event::Code(t) => {
                text.push_str(&t);
                text.push(' ');
            }
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }

    text
}

/// Count the words of a markdown body, ignoring markup and components
pub fn word_count(markdown: &str) -> usize {
    plain_text(markdown).split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_is_not_counted() {
        let md = "# Title\n\nSome **bold** and `code` text.\n\n- one\n- two\n";
        assert_eq!(word_count(md), 8);
    }

    #[test]
    fn test_components_are_skipped() {
        let md = "<Callout type=\"warn\" />\n\nThree words here.\n";
        assert_eq!(word_count(md), 3);
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(word_count(""), 0);
    }
}
