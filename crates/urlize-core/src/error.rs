use thiserror::Error;

/// Failure while building the markup for a single matched word.
///
/// `linkify` never returns this; it logs it and falls back to the input text.
#[derive(Debug, Error)]
pub enum LinkifyError {
    #[error("cannot point {url} at content host {host}")]
    HostRewrite {
        url: String,
        host: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("cannot drop credentials or port from {url}")]
    StripAuthority { url: String },
    #[error("video link {url} has no `v` parameter")]
    MissingVideoId { url: String },
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TemplateError {
    #[error("`{{% {tag} %}}` opened at byte {offset} is never closed")]
    Unclosed { tag: &'static str, offset: usize },
    #[error("unexpected `{{% {tag} %}}` at byte {offset}")]
    UnexpectedEnd { tag: &'static str, offset: usize },
}
