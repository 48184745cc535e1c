use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use url::Url;
use url::form_urlencoded;

use crate::error::LinkifyError;

pub const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif"];
pub const VIDEO_EMBED_HOST: &str = "www.youtube.com";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedKind {
    None,
    Image,
    Video,
}

impl EmbedKind {
    /// Value of the `data-type` attribute for embeddable links.
    pub fn data_type(self) -> Option<&'static str> {
        match self {
            EmbedKind::None => None,
            EmbedKind::Image => Some("image"),
            EmbedKind::Video => Some("youtube"),
        }
    }
}

/// Where a matched URL should point (`link`) and what a previewer should load (`source`).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Embed {
    NoEmbed,
    Image { link: String, source: String },
    Video { link: String, source: String },
}

impl Embed {
    pub fn kind(&self) -> EmbedKind {
        match self {
            Embed::NoEmbed => EmbedKind::None,
            Embed::Image { .. } => EmbedKind::Image,
            Embed::Video { .. } => EmbedKind::Video,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum HostRule {
    /// `cl.ly/<id>` pages whose raw image lives at `/<id>/content`.
    ImageShorthand,
    /// Share pages whose bytes are served from another host.
    RawContent { content_host: &'static str },
    VideoWatch,
}

const DROPBOX: HostRule = HostRule::RawContent {
    content_host: "dl.dropboxusercontent.com",
};

static HOST_RULES: &[(&str, HostRule)] = &[
    ("cl.ly", HostRule::ImageShorthand),
    ("www.dropbox.com", DROPBOX),
    ("dropbox.com", DROPBOX),
    ("www.youtube.com", HostRule::VideoWatch),
];

static SHORTHAND_IMAGE_PATH: Lazy<Regex> = Lazy::new(|| compile(r"^/image/([-\w.]+)"));
static SHORTHAND_PATH: Lazy<Regex> = Lazy::new(|| compile(r"^/([-\w.]+)"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static pattern compiles")
}

fn host_rule(url: &Url) -> Option<HostRule> {
    let host = url.host_str()?;
    HOST_RULES
        .iter()
        .find(|(name, _)| *name == host)
        .map(|(_, rule)| *rule)
}

fn video_id(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, value)| key == "v" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

fn shorthand_id(path: &str) -> Option<&str> {
    SHORTHAND_IMAGE_PATH
        .captures(path)
        .or_else(|| SHORTHAND_PATH.captures(path))
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str())
}

/// Classifies a URL as an image or video that a log viewer can preview inline.
pub fn is_embeddable(url: &Url) -> (EmbedKind, bool) {
    if url.scheme() == "mailto" {
        return (EmbedKind::None, false);
    }
    let path = url.path();
    if IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        return (EmbedKind::Image, true);
    }
    match host_rule(url) {
        Some(HostRule::VideoWatch) if path.starts_with("/watch") && video_id(url).is_some() => {
            (EmbedKind::Video, true)
        }
        Some(HostRule::ImageShorthand) => (EmbedKind::Image, true),
        _ => (EmbedKind::None, false),
    }
}

pub fn resolve_embed(url: &Url) -> Result<Embed, LinkifyError> {
    let (kind, embeddable) = is_embeddable(url);
    if !embeddable {
        return Ok(Embed::NoEmbed);
    }
    let link = url.to_string();
    match kind {
        EmbedKind::Image => {
            let source = image_source(url)?.unwrap_or_else(|| link.clone());
            Ok(Embed::Image { link, source })
        }
        EmbedKind::Video => {
            let id = video_id(url).ok_or_else(|| LinkifyError::MissingVideoId {
                url: link.clone(),
            })?;
            let id: String = form_urlencoded::byte_serialize(id.as_bytes()).collect();
            let source = format!("//{}/embed/{}", VIDEO_EMBED_HOST, id);
            Ok(Embed::Video { link, source })
        }
        EmbedKind::None => Ok(Embed::NoEmbed),
    }
}

fn image_source(url: &Url) -> Result<Option<String>, LinkifyError> {
    match host_rule(url) {
        Some(HostRule::RawContent { content_host }) => {
            let mut source = host_only(url)?;
            source
                .set_host(Some(content_host))
                .map_err(|err| LinkifyError::HostRewrite {
                    url: url.to_string(),
                    host: content_host,
                    source: err,
                })?;
            Ok(Some(source.to_string()))
        }
        Some(HostRule::ImageShorthand) => match shorthand_id(url.path()) {
            Some(id) => {
                let mut source = host_only(url)?;
                source.set_path(&format!("/{}/content", id));
                Ok(Some(source.to_string()))
            }
            None => Ok(None),
        },
        _ => Ok(None),
    }
}

/// Copy of `url` whose authority is the bare host: no userinfo, default port.
fn host_only(url: &Url) -> Result<Url, LinkifyError> {
    let mut source = url.clone();
    source
        .set_username("")
        .and_then(|()| source.set_password(None))
        .and_then(|()| source.set_port(None))
        .map_err(|()| LinkifyError::StripAuthority {
            url: url.to_string(),
        })?;
    Ok(source)
}
