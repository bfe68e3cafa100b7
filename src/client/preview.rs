//! Compact previews of delivered content for verbose log lines.

/// Extract the visible text of a markup fragment, whitespace-collapsed
/// and capped at `limit` characters.
///
/// Falls back to the raw (shortened) input when parsing fails, so a
/// preview is always available.
pub fn markup_text(markup: &str, limit: usize) -> String {
    let Ok(dom) = tl::parse(markup, tl::ParserOptions::default()) else {
        return shorten(markup, limit);
    };

    let parser = dom.parser();
    let mut text = String::new();
    for handle in dom.children() {
        if let Some(node) = handle.get(parser) {
            collect_text(node, parser, &mut text);
        }
    }

    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    shorten(&collapsed, limit)
}

/// Append the text content of a node, skipping script and style bodies.
fn collect_text(node: &tl::Node, parser: &tl::Parser, out: &mut String) {
    match node {
        tl::Node::Tag(tag) => {
            let name = tag.name().as_utf8_str().to_lowercase();
            if name == "script" || name == "style" {
                return;
            }
            for child in tag.children().top().iter() {
                if let Some(node) = child.get(parser) {
                    collect_text(node, parser, out);
                }
            }
        }
        tl::Node::Raw(bytes) => {
            out.push_str(&bytes.as_utf8_str());
            out.push(' ');
        }
        tl::Node::Comment(_) => {}
    }
}

/// Truncate to `limit` characters on a char boundary, marking the cut.
pub fn shorten(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let cut: String = text.chars().take(limit).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_text_strips_tags() {
        let markup = "<h1>Hello</h1><p>first <b>bold</b> line</p>";
        assert_eq!(markup_text(markup, 80), "Hello first bold line");
    }

    #[test]
    fn test_markup_text_skips_script_and_style() {
        let markup = "<style>p { color: red }</style><p>visible</p><script>let x = 1;</script>";
        assert_eq!(markup_text(markup, 80), "visible");
    }

    #[test]
    fn test_markup_text_collapses_whitespace() {
        let markup = "<p>one\n   two</p>\n<p>three</p>";
        assert_eq!(markup_text(markup, 80), "one two three");
    }

    #[test]
    fn test_shorten_below_limit_is_unchanged() {
        assert_eq!(shorten("short", 10), "short");
    }

    #[test]
    fn test_shorten_cuts_on_char_boundary() {
        assert_eq!(shorten("中文中文中文", 3), "中文中...");
    }

    #[test]
    fn test_markup_text_truncates() {
        let markup = "<p>abcdefghij</p>";
        assert_eq!(markup_text(markup, 4), "abcd...");
    }
}
