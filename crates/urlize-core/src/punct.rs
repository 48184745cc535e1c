/// Characters peeled off the end of a word before URL matching.
pub const TRAILING_PUNCTUATION: &[char] = &['.', ',', ':', ';', '!', '"', '\''];

/// Opening/closing pairs that may wrap a URL.
///
/// The closer is only removed when it is the single unbalanced one, so
/// `wiki/Foo_(bar)` keeps its parens.
pub const WRAPPING_PUNCTUATION: &[(&str, &str)] = &[
    ("(", ")"),
    ("<", ">"),
    ("[", "]"),
    ("&lt;", "&gt;"),
    ("\"", "\""),
    ("'", "'"),
];

/// A word split into leading punctuation, URL candidate and trailing punctuation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Word<'a> {
    pub lead: &'a str,
    pub middle: &'a str,
    pub trail: &'a str,
}

/// Whether a word is worth running through the URL matchers at all.
pub fn is_candidate(word: &str) -> bool {
    word.contains(['.', '@', ':'])
}

pub fn split_punctuation(word: &str) -> Word<'_> {
    let mut start = 0;
    let mut end = word.len();

    while let Some(ch) = word[start..end].chars().next_back() {
        if !TRAILING_PUNCTUATION.contains(&ch) {
            break;
        }
        end -= ch.len_utf8();
    }

    for (opening, closing) in WRAPPING_PUNCTUATION {
        if word[start..end].starts_with(opening) {
            start += opening.len();
        }
        let middle = &word[start..end];
        if middle.ends_with(closing)
            && middle.matches(closing).count() == middle.matches(opening).count() + 1
        {
            end -= closing.len();
        }
    }

    Word {
        lead: &word[..start],
        middle: &word[start..end],
        trail: &word[end..],
    }
}
