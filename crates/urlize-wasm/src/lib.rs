use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UrlizeOptions {
    trim_url_limit: Option<usize>,
    nofollow: Option<bool>,
    autoescape: Option<bool>,
    trusted: Option<bool>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UrlizeResult {
    html: String,
    links: Vec<JsLink>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsLink {
    text: String,
    href: String,
    src: Option<String>,
    kind: String,
    embeddable: bool,
}

#[wasm_bindgen]
pub fn urlize(text: &str) -> Result<JsValue, JsValue> {
    urlize_with_options(text, JsValue::UNDEFINED)
}

#[wasm_bindgen]
pub fn urlize_with_options(text: &str, options: JsValue) -> Result<JsValue, JsValue> {
    let (options, trusted) = options_from_js(options)?;
    let source = if trusted {
        urlize_core::Source::Trusted(text)
    } else {
        urlize_core::Source::Untrusted(text)
    };
    let linkified = urlize_core::linkify(source, &options);

    let links = linkified
        .links
        .into_iter()
        .map(|link| JsLink {
            text: link.text,
            href: link.href,
            src: link.source,
            kind: match link.kind {
                urlize_core::EmbedKind::None => "none".to_string(),
                urlize_core::EmbedKind::Image => "image".to_string(),
                urlize_core::EmbedKind::Video => "video".to_string(),
            },
            embeddable: link.embeddable,
        })
        .collect();

    let result = UrlizeResult {
        html: linkified.markup.into_string(),
        links,
    };
    serde_wasm_bindgen::to_value(&result).map_err(|err| JsValue::from_str(&err.to_string()))
}

#[wasm_bindgen]
pub fn whitelineless(source: &str) -> Result<String, JsValue> {
    urlize_core::whitelineless(source).map_err(|err| JsValue::from_str(&err.to_string()))
}

/// Missing fields fall back to the log-page defaults: nofollow and escaping on.
fn options_from_js(value: JsValue) -> Result<(urlize_core::LinkifyOptions, bool), JsValue> {
    let mut out = urlize_core::LinkifyOptions {
        trim_url_limit: None,
        nofollow: true,
        autoescape: true,
    };
    if value.is_null() || value.is_undefined() {
        return Ok((out, false));
    }
    let parsed: UrlizeOptions =
        serde_wasm_bindgen::from_value(value).map_err(|err| JsValue::from_str(&err.to_string()))?;
    if parsed.trim_url_limit.is_some() {
        out.trim_url_limit = parsed.trim_url_limit;
    }
    if let Some(nofollow) = parsed.nofollow {
        out.nofollow = nofollow;
    }
    if let Some(autoescape) = parsed.autoescape {
        out.autoescape = autoescape;
    }
    Ok((out, parsed.trusted.unwrap_or(false)))
}
