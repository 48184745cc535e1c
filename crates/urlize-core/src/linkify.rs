use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::attrs::{AttrValue, HtmlAttrs};
use crate::candidate::parse_url;
use crate::embed::{Embed, EmbedKind, resolve_embed};
use crate::error::LinkifyError;
use crate::punct::{Word, is_candidate, split_punctuation};
use crate::text::{escape_html, is_whitespace_token, split_words, strip_control_chars};

/// Input text together with its trust marking.
///
/// `Trusted` text is already HTML and is never escaped again.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Source<'a> {
    Untrusted(&'a str),
    Trusted(&'a str),
}

impl<'a> Source<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Source::Untrusted(text) | Source::Trusted(text) => text,
        }
    }

    pub fn is_trusted(&self) -> bool {
        matches!(self, Source::Trusted(_))
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LinkifyOptions {
    /// Maximum number of characters of link text; longer text ends in `...`.
    pub trim_url_limit: Option<usize>,
    /// Adds `rel="nofollow"` to every non-`mailto` link.
    pub nofollow: bool,
    /// Escapes everything outside the generated anchors.
    pub autoescape: bool,
}

/// HTML that is safe to embed as-is.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Markup(String);

impl Markup {
    pub(crate) fn from_sanitized(html: String) -> Self {
        Self(html)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Markup> for String {
    fn from(markup: Markup) -> Self {
        markup.0
    }
}

/// Classification of one linkified word.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Link {
    /// Display text, after truncation.
    pub text: String,
    pub href: String,
    /// `data-src` of embeddable links.
    pub source: Option<String>,
    pub kind: EmbedKind,
    pub embeddable: bool,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Linkified {
    pub markup: Markup,
    pub links: Vec<Link>,
}

/// Shortens link text to `limit` characters, the last three being `...`.
pub fn trim_url(text: &str, limit: Option<usize>) -> Cow<'_, str> {
    match limit {
        Some(limit) if text.chars().count() > limit => {
            let head: String = text.chars().take(limit.saturating_sub(3)).collect();
            Cow::Owned(format!("{}...", head))
        }
        _ => Cow::Borrowed(text),
    }
}

/// Converts URLs and email addresses in `source` into anchors.
///
/// Never fails: if building any anchor goes wrong the whole input comes back
/// unchanged (escaped when escaping was requested) with no links.
pub fn linkify(source: Source<'_>, options: &LinkifyOptions) -> Linkified {
    linkify_with(source, options, resolve_embed)
}

type ResolveEmbed = fn(&Url) -> Result<Embed, LinkifyError>;

fn linkify_with(
    source: Source<'_>,
    options: &LinkifyOptions,
    resolve: ResolveEmbed,
) -> Linkified {
    match linkify_words(source, options, resolve) {
        Ok(linkified) => linkified,
        Err(err) => {
            tracing::warn!(error = %err, "linkify failed, returning input unchanged");
            let text = source.text();
            let markup = if escapes(source, options) {
                escape_html(text)
            } else {
                text.to_string()
            };
            Linkified {
                markup: Markup(markup),
                links: Vec::new(),
            }
        }
    }
}

pub fn urlize(source: Source<'_>, options: &LinkifyOptions) -> Markup {
    linkify(source, options).markup
}

/// Template filter form: untrusted text, `nofollow` and escaping on.
pub fn urlize_trunc(text: &str, limit: usize) -> Markup {
    let options = LinkifyOptions {
        trim_url_limit: Some(limit),
        nofollow: true,
        autoescape: true,
    };
    urlize(Source::Untrusted(text), &options)
}

fn escapes(source: Source<'_>, options: &LinkifyOptions) -> bool {
    options.autoescape && !source.is_trusted()
}

fn linkify_words(
    source: Source<'_>,
    options: &LinkifyOptions,
    resolve: ResolveEmbed,
) -> Result<Linkified, LinkifyError> {
    let escape = escapes(source, options);
    let text = strip_control_chars(source.text());
    let mut out = String::with_capacity(text.len());
    let mut links = Vec::new();

    for token in split_words(&text) {
        if is_whitespace_token(token) || !is_candidate(token) {
            push_plain(&mut out, token, escape);
            continue;
        }
        let word = split_punctuation(token);
        let Some(url) = parse_url(word.middle) else {
            push_plain(&mut out, token, escape);
            continue;
        };
        let embed = resolve(&url)?;
        let link = anchor(&mut out, &word, &url, embed, options, escape);
        links.push(link);
    }

    Ok(Linkified {
        markup: Markup(out),
        links,
    })
}

fn push_plain(out: &mut String, token: &str, escape: bool) {
    if escape {
        out.push_str(&escape_html(token));
    } else {
        out.push_str(token);
    }
}

fn anchor(
    out: &mut String,
    word: &Word<'_>,
    url: &Url,
    embed: Embed,
    options: &LinkifyOptions,
    escape: bool,
) -> Link {
    let mut attrs = HtmlAttrs::new();
    attrs.set("class", AttrValue::List(Vec::new()));
    if options.nofollow && url.scheme() != "mailto" {
        attrs.set_text("rel", "nofollow");
    }

    let kind = embed.kind();
    let (href, source) = match embed {
        Embed::NoEmbed => (url.to_string(), None),
        Embed::Image { link, source } | Embed::Video { link, source } => {
            attrs.push_token("class", "image");
            if let Some(data_type) = kind.data_type() {
                attrs.set_text("data-type", data_type);
            }
            (link, Some(source))
        }
    };
    attrs.set_text("href", href.as_str());
    if let Some(source) = &source {
        attrs.set_text("data-src", source.as_str());
    }

    let display = trim_url(word.middle, options.trim_url_limit);
    push_plain(out, word.lead, escape);
    out.push_str("<a");
    out.push_str(&attrs.render());
    out.push('>');
    push_plain(out, &display, escape);
    out.push_str("</a>");
    push_plain(out, word.trail, escape);

    Link {
        text: display.into_owned(),
        href,
        embeddable: source.is_some(),
        source,
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::{LinkifyOptions, Source, linkify, linkify_with, trim_url, urlize, urlize_trunc};
    use crate::embed::{Embed, EmbedKind};
    use crate::error::LinkifyError;
    use url::Url;

    fn nofollow() -> LinkifyOptions {
        LinkifyOptions {
            nofollow: true,
            autoescape: true,
            ..Default::default()
        }
    }

    #[test]
    fn trim_keeps_short_text() {
        assert_eq!(trim_url("http://a.com", Some(12)), "http://a.com");
        assert_eq!(trim_url("http://a.com", None), "http://a.com");
    }

    #[test]
    fn trim_adds_ellipsis() {
        let trimmed = trim_url("http://example.com/long/path", Some(15));
        assert_eq!(trimmed, "http://examp...");
        assert_eq!(trimmed.chars().count(), 15);
    }

    #[test]
    fn trim_counts_characters() {
        assert_eq!(trim_url("http://ü.com/ääää", Some(10)), "http://...");
        assert_eq!(trim_url("http://a.com", Some(1)), "...");
    }

    #[test]
    fn plain_url() {
        let html = urlize(Source::Untrusted("see http://a.com now"), &nofollow());
        assert_eq!(
            html.as_str(),
            "see <a rel=\"nofollow\" href=\"http://a.com/\">http://a.com</a> now"
        );
    }

    #[test]
    fn links_report_classification() {
        let linkified = linkify(
            Source::Untrusted("https://www.youtube.com/watch?v=abc123 user@example.com"),
            &nofollow(),
        );
        assert_eq!(linkified.links.len(), 2);
        assert_eq!(linkified.links[0].kind, EmbedKind::Video);
        assert!(linkified.links[0].embeddable);
        assert_eq!(
            linkified.links[0].source.as_deref(),
            Some("//www.youtube.com/embed/abc123")
        );
        assert_eq!(linkified.links[1].kind, EmbedKind::None);
        assert_eq!(linkified.links[1].href, "mailto:user@example.com");
        assert!(!linkified.links[1].embeddable);
    }

    #[test]
    fn trusted_text_is_not_escaped() {
        let options = nofollow();
        let html = urlize(Source::Trusted("<b>x</b> www.a.com"), &options);
        assert_eq!(
            html.as_str(),
            "<b>x</b> <a rel=\"nofollow\" href=\"http://www.a.com/\">www.a.com</a>"
        );
        let html = urlize(Source::Untrusted("<b>x</b> www.a.com"), &options);
        assert_eq!(
            html.as_str(),
            "&lt;b&gt;x&lt;/b&gt; <a rel=\"nofollow\" href=\"http://www.a.com/\">www.a.com</a>"
        );
    }

    #[test]
    fn autoescape_off_passes_text_through() {
        let options = LinkifyOptions::default();
        let html = urlize(Source::Untrusted("<i> \"http://a.com\""), &options);
        assert_eq!(
            html.as_str(),
            "<i> \"<a href=\"http://a.com/\">http://a.com</a>\""
        );
    }

    #[test]
    fn filter_form_truncates_and_escapes() {
        let html = urlize_trunc("(http://example.com/a/very/long/path)", 20);
        assert_eq!(
            html.as_str(),
            "(<a rel=\"nofollow\" href=\"http://example.com/a/very/long/path\">http://example.co...</a>)"
        );
    }

    fn failing_resolver(url: &Url) -> Result<Embed, LinkifyError> {
        Err(LinkifyError::MissingVideoId {
            url: url.to_string(),
        })
    }

    #[test]
    fn failed_anchor_returns_input_unchanged() {
        let input = "<b> see\u{2} http://a.com & www.b.org";
        let linkified = linkify_with(Source::Untrusted(input), &nofollow(), failing_resolver);
        assert_eq!(
            linkified.markup.as_str(),
            "&lt;b&gt; see\u{2} http://a.com &amp; www.b.org"
        );
        assert!(linkified.links.is_empty());

        let linkified = linkify_with(
            Source::Untrusted(input),
            &LinkifyOptions::default(),
            failing_resolver,
        );
        assert_eq!(linkified.markup.as_str(), input);
        assert!(linkified.links.is_empty());

        let linkified = linkify_with(Source::Trusted(input), &nofollow(), failing_resolver);
        assert_eq!(linkified.markup.as_str(), input);
    }

    #[test]
    fn text_without_links_never_reaches_the_resolver() {
        let linkified = linkify_with(
            Source::Untrusted("no links here"),
            &nofollow(),
            failing_resolver,
        );
        assert_eq!(linkified.markup.as_str(), "no links here");
    }
}
