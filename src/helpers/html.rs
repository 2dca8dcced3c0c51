//! HTML text helpers

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Strip HTML tags from a string
pub fn strip_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;

    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => {
                // Keep words from adjacent blocks apart
                in_tag = false;
                result.push(' ');
            }
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
}

/// Decode the entities produced by the markdown renderer
pub fn decode_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Collapse runs of whitespace into single spaces
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Shorten text to at most `length` characters on a word boundary,
/// appending an ellipsis when anything was cut
pub fn prune(s: &str, length: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= length {
        return s.to_string();
    }

    let mut end = length;
    if !chars[length].is_whitespace() {
        while end > 0 && !chars[end - 1].is_whitespace() {
            end -= 1;
        }
        // A single word longer than the limit gets cut mid-word
        if end == 0 {
            end = length;
        }
    }

    let cut: String = chars[..end].iter().collect();
    let cut = cut.trim_end_matches(|c: char| c.is_whitespace() || c.is_ascii_punctuation());
    format!("{}…", cut)
}

/// Build a plain-text excerpt from rendered HTML
pub fn excerpt_from_html(html: &str, length: usize) -> String {
    let text = collapse_whitespace(&decode_entities(&strip_html(html)));
    prune(&text, length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html() {
        assert_eq!(
            collapse_whitespace(&strip_html("<p>Hello <b>World</b></p>")),
            "Hello World"
        );
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_prune_on_word_boundary() {
        assert_eq!(prune("Hello brave new world", 13), "Hello brave…");
        assert_eq!(prune("Hi", 10), "Hi");
    }

    #[test]
    fn test_prune_long_word() {
        assert_eq!(prune("abcdefghij", 4), "abcd…");
    }

    #[test]
    fn test_excerpt_from_html() {
        let html = "<h1>Title</h1>\n<p>First &amp; second paragraph.</p>";
        assert_eq!(excerpt_from_html(html, 140), "Title First & second paragraph.");
        assert_eq!(excerpt_from_html(html, 12), "Title First…");
    }
}
