use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use url::{ParseError, Url};

pub const IMAGE_PROXY: &str = "https://wsrv.nl/";

static UNSUPPORTED_FORMAT: Lazy<Regex> = Lazy::new(|| {
    regex::RegexBuilder::new(r"\.(heic|heif)$")
        .case_insensitive(true)
        .build()
        .unwrap()
});

/// Absolute form of the cover url. Protocol relative urls get `https`.
fn absolute(input: &str) -> Option<(Cow<'_, str>, Url)> {
    match Url::parse(input) {
        Ok(url) => Some((Cow::Borrowed(input), url)),
        Err(ParseError::RelativeUrlWithoutBase) if input.starts_with("//") => {
            let full = format!("https:{input}");
            let url = Url::parse(&full).ok()?;
            Some((Cow::Owned(full), url))
        }
        Err(_) => None,
    }
}

/// Whether browsers are unlikely to display the image behind this url.
pub fn is_unsupported(input: &str) -> bool {
    absolute(input).map_or(false, |(_, url)| UNSUPPORTED_FORMAT.is_match(url.path()))
}

/// Routes images browsers cannot decode through the image proxy, asking for a jpeg.
pub fn rewrite(input: &str) -> String {
    rewrite_with(IMAGE_PROXY, input)
}

pub fn rewrite_with(proxy: &str, input: &str) -> String {
    let target = match absolute(input) {
        Some((target, url)) if UNSUPPORTED_FORMAT.is_match(url.path()) => target,
        _ => return input.to_string(),
    };
    Url::parse_with_params(proxy, [("url", target.as_ref()), ("output", "jpg")])
        .map(|url| url.to_string())
        .unwrap_or_else(|_| input.to_string())
}

/// Trims the raw cover and rewrites it when needed, `None` when there is nothing usable.
pub fn usable(input: Option<&str>) -> Option<String> {
    input
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(rewrite)
}
