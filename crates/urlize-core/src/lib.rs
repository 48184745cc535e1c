mod attrs;
mod candidate;
mod embed;
mod error;
mod linkify;
mod punct;
mod sanitize;
mod template;
mod text;

pub use attrs::{AttrValue, HtmlAttrs};
pub use candidate::parse_url;
pub use embed::{
    Embed, EmbedKind, IMAGE_EXTENSIONS, VIDEO_EMBED_HOST, is_embeddable, resolve_embed,
};
pub use error::{LinkifyError, TemplateError};
pub use linkify::{
    Link, Linkified, LinkifyOptions, Markup, Source, linkify, trim_url, urlize, urlize_trunc,
};
pub use punct::{TRAILING_PUNCTUATION, WRAPPING_PUNCTUATION, Word, is_candidate, split_punctuation};
pub use sanitize::{linkify_sanitized, urlize_sanitized};
pub use template::{Node, Template, TextNode, WhiteLineless, strip_empty_lines, whitelineless};
pub use text::{escape_html, split_words, strip_control_chars};
pub use url::Url;
