use std::borrow::Cow;

/// Removes ASCII control characters (U+0000..=U+001F).
///
/// IRC bridges occasionally forward raw formatting bytes (the GitHub bot sends
/// a "Shift Up" byte) glued to URLs; left in place they end up inside the href.
pub fn strip_control_chars(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_control) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.chars().filter(|ch| !is_control(*ch)).collect())
}

fn is_control(ch: char) -> bool {
    (ch as u32) < 0x20
}

/// Splits text into alternating word and whitespace-run tokens.
///
/// Concatenating the returned slices yields the input.
pub fn split_words(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;

    for (idx, ch) in text.char_indices() {
        let space = ch.is_whitespace();
        match in_space {
            Some(prev) if prev != space => {
                tokens.push(&text[start..idx]);
                start = idx;
            }
            _ => {}
        }
        in_space = Some(space);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

pub(crate) fn is_whitespace_token(token: &str) -> bool {
    token.chars().next().is_some_and(char::is_whitespace)
}

/// HTML-escapes text content, including both quote characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub(crate) fn escape_attr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
