use ammonia::Builder;
use std::collections::{HashMap, HashSet};

use crate::linkify::{Linkified, LinkifyOptions, Markup, Source, linkify};

/// Linkifies `source` and then runs the result through an allow-list that only
/// keeps the anchors this crate emits.
///
/// Useful when `source` is trusted markup from a less trusted producer (for
/// example bot plugins) and escaping is off.
pub fn urlize_sanitized(source: Source<'_>, options: &LinkifyOptions) -> Markup {
    linkify_sanitized(source, options).markup
}

/// [`urlize_sanitized`] that also reports the links it built.
pub fn linkify_sanitized(source: Source<'_>, options: &LinkifyOptions) -> Linkified {
    let Linkified { markup, links } = linkify(source, options);
    Linkified {
        markup: sanitize(markup.as_str()),
        links,
    }
}

fn sanitize(raw_html: &str) -> Markup {

    let tags: HashSet<&'static str> = ["a"].iter().copied().collect();

    let mut tag_attributes = HashMap::new();
    tag_attributes.insert("a", ["class", "href", "rel"].iter().copied().collect());

    // data-type / data-src for embeds
    let mut generic_attribute_prefixes = HashSet::new();
    generic_attribute_prefixes.insert("data-");

    let clean = Builder::new()
        .tags(tags)
        .tag_attributes(tag_attributes)
        .generic_attribute_prefixes(generic_attribute_prefixes)
        .link_rel(None)
        .clean(raw_html)
        .to_string();
    Markup::from_sanitized(clean)
}
