use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static ABSOLUTE_URL: Lazy<Regex> = Lazy::new(|| compile(r"(?i)^(?:https?|ftp)://\[?\w"));
static WWW_PREFIX: Lazy<Regex> = Lazy::new(|| compile(r"(?i)^www\."));
static BARE_DOMAIN: Lazy<Regex> =
    Lazy::new(|| compile(r"(?i)^\w[^@]+\.(?:com|edu|gov|int|mil|net|org)(?:$|/.*$)"));
static EMAIL: Lazy<Regex> =
    Lazy::new(|| compile(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static pattern compiles")
}

/// Turns a trimmed word into a URL if it looks like one.
///
/// Tries, in order: an absolute `http`/`https`/`ftp` URL, a bare domain
/// (`www.` prefix or one of the original gTLDs) which gets `http://`
/// prepended, and finally an email address which becomes a `mailto:` URL once
/// its domain passes the IDNA label checks.
pub fn parse_url(word: &str) -> Option<Url> {
    if ABSOLUTE_URL.is_match(word) {
        return parse_logged(word);
    }
    if word.contains(':') {
        return None;
    }
    if is_bare_domain(word) {
        return parse_logged(&format!("http://{}", word));
    }
    if EMAIL.is_match(word) {
        return mailto(word);
    }
    None
}

fn is_bare_domain(word: &str) -> bool {
    if WWW_PREFIX.is_match(word) {
        return true;
    }
    let starts_with_http = word
        .get(..4)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("http"));
    !starts_with_http && BARE_DOMAIN.is_match(word)
}

/// Longest DNS label IDNA will encode.
const MAX_LABEL_LEN: usize = 63;

fn mailto(word: &str) -> Option<Url> {
    let (local, domain) = word.rsplit_once('@')?;
    if let Err(label) = check_domain_labels(domain) {
        tracing::debug!(%domain, %label, "email domain is not IDNA-encodable");
        return None;
    }
    parse_logged(&format!("mailto:{}@{}", local, domain))
}

/// IDNA encoding of an ASCII domain: every label must be 1 to 63 bytes long.
/// Only the final label may be empty, which is the root of `example.com.`.
/// ASCII labels pass through unchanged, `xn--` ones included.
fn check_domain_labels(domain: &str) -> Result<(), &str> {
    let mut labels = domain.split('.').peekable();
    while let Some(label) = labels.next() {
        let last = labels.peek().is_none();
        if label.len() > MAX_LABEL_LEN || (label.is_empty() && !last) {
            return Err(label);
        }
    }
    Ok(())
}

fn parse_logged(candidate: &str) -> Option<Url> {
    match Url::parse(candidate) {
        Ok(url) => Some(url),
        Err(err) => {
            tracing::debug!(%candidate, %err, "candidate looked like a URL but did not parse");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::parse_url;

    fn href(word: &str) -> Option<String> {
        parse_url(word).map(|url| url.to_string())
    }

    #[test]
    fn absolute_urls() {
        assert_eq!(
            href("https://example.com/photo.png").as_deref(),
            Some("https://example.com/photo.png")
        );
        assert_eq!(
            href("FTP://files.example.org/a").as_deref(),
            Some("ftp://files.example.org/a")
        );
        assert_eq!(href("http://").as_deref(), None);
    }

    #[test]
    fn bare_domains_get_http() {
        assert_eq!(
            href("www.example.co.uk/path").as_deref(),
            Some("http://www.example.co.uk/path")
        );
        assert_eq!(
            href("example.org").as_deref(),
            Some("http://example.org/")
        );
        assert_eq!(
            href("botbot.net/freenode/").as_deref(),
            Some("http://botbot.net/freenode/")
        );
    }

    #[test]
    fn bare_domains_need_known_tld() {
        assert_eq!(href("example.io"), None);
        assert_eq!(href("file.txt"), None);
        assert_eq!(href("httpbin.org"), None);
    }

    #[test]
    fn colon_blocks_bare_and_email_forms() {
        assert_eq!(href("www.example.com:8080"), None);
        assert_eq!(href("user@example.com:25"), None);
        assert_eq!(href("note:"), None);
    }

    #[test]
    fn emails_become_mailto() {
        assert_eq!(
            href("user@example.com").as_deref(),
            Some("mailto:user@example.com")
        );
        assert_eq!(
            href("first.last+irc@Example-Host.NET").as_deref(),
            Some("mailto:first.last+irc@Example-Host.NET")
        );
        assert_eq!(href("u@xn--a.com").as_deref(), Some("mailto:u@xn--a.com"));
    }

    #[test]
    fn empty_domain_labels_are_rejected() {
        assert_eq!(href("u@example..com"), None);
        assert_eq!(href("u@a.b..org"), None);
    }

    #[test]
    fn overlong_domain_labels_are_rejected() {
        let at_limit = format!("u@{}.com", "a".repeat(63));
        assert_eq!(href(&at_limit), Some(format!("mailto:{}", at_limit)));
        let too_long = format!("u@{}.com", "a".repeat(64));
        assert_eq!(href(&too_long), None);
    }

    #[test]
    fn malformed_emails_are_rejected() {
        assert_eq!(href("user@localhost"), None);
        assert_eq!(href("us er@example.com"), None);
        assert_eq!(href("@example.com"), None);
    }
}
