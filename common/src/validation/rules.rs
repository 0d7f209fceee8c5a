//! Per-field rules applied by `validate_submission`.
//!
//! Each rule returns the user-facing message on failure; the caller decides
//! which field the message belongs to.

use regex::Regex;
use std::net::Ipv4Addr;
use std::sync::LazyLock;

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_URL: &str = "Invalid URL.";
pub const INVALID_CHOICE: &str = "Not a valid choice.";

/// Schemes a stored link may use. Anything else (`javascript:`, `data:`)
/// would end up as a clickable `href` on the listing page.
const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "ftp"];

// scheme://[userinfo@]host[:port][path|query|fragment]
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<scheme>[A-Za-z][A-Za-z0-9+.\-]*)://",
        r"(?:[^\s/?#@]+@)?(?P<host>[^\s/?#:@]+)",
        r"(?::[0-9]{1,5})?(?:[/?#]\S*)?$",
    ))
    .expect("URL_REGEX: invalid regex pattern")
});

static HOST_LABEL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}\p{N}](?:[\p{L}\p{N}\-]{0,61}[\p{L}\p{N}])?$")
        .expect("HOST_LABEL_REGEX: invalid regex pattern")
});

/// Present and not blank. Returns the trimmed value.
pub fn required_text(raw: Option<&str>) -> Result<String, String> {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(REQUIRED.to_string()),
    }
}

/// Length limit counted in characters, like the `VARCHAR(n)` columns.
pub fn max_length(value: &str, max: usize) -> Result<(), String> {
    if value.chars().count() > max {
        Err(format!("Field cannot be longer than {} characters.", max))
    } else {
        Ok(())
    }
}

/// A URL needs an `http`, `https` or `ftp` scheme and a host that is either
/// an IPv4 address or a dotted domain name whose last label is not purely
/// numeric.
pub fn url(value: &str) -> Result<(), String> {
    let caps = URL_REGEX
        .captures(value)
        .ok_or_else(|| INVALID_URL.to_string())?;
    let scheme = caps.name("scheme").map_or("", |m| m.as_str());
    if !ALLOWED_SCHEMES.iter().any(|s| s.eq_ignore_ascii_case(scheme)) {
        return Err(INVALID_URL.to_string());
    }
    let host = caps
        .name("host")
        .map(|m| m.as_str())
        .ok_or_else(|| INVALID_URL.to_string())?;

    if host.parse::<Ipv4Addr>().is_ok() {
        return Ok(());
    }

    let labels: Vec<&str> = host.split('.').collect();
    let tld_ok = labels
        .last()
        .is_some_and(|tld| tld.chars().any(char::is_alphabetic));
    if labels.len() < 2 || !tld_ok || !labels.iter().all(|l| HOST_LABEL_REGEX.is_match(l)) {
        return Err(INVALID_URL.to_string());
    }
    Ok(())
}

/// Checkbox semantics: an absent or empty value is an explicit "no".
pub fn boolean(raw: Option<&str>) -> Result<bool, String> {
    let value = raw.map(|v| v.trim().to_ascii_lowercase()).unwrap_or_default();
    match value.as_str() {
        "y" | "yes" | "on" | "true" | "1" => Ok(true),
        "" | "n" | "no" | "off" | "false" | "0" => Ok(false),
        _ => Err(INVALID_CHOICE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_trims_and_rejects_blank() {
        assert_eq!(required_text(Some("  Blue Bottle ")).unwrap(), "Blue Bottle");
        assert_eq!(required_text(Some("   ")).unwrap_err(), REQUIRED);
        assert_eq!(required_text(None).unwrap_err(), REQUIRED);
    }

    #[test]
    fn max_length_counts_characters_not_bytes() {
        let pounds = "£".repeat(250);
        assert!(max_length(&pounds, 250).is_ok());
        assert!(max_length(&format!("{}x", pounds), 250).is_err());
    }

    #[test]
    fn url_accepts_common_shapes() {
        for ok in [
            "https://maps.example/x",
            "http://img.example/y.jpg?size=large#top",
            "https://goo.gl/maps/abc123",
            "http://user@example.com:8080/path",
            "http://192.168.0.1/img.png",
            "ftp://files.example.org",
            "HTTPS://MAPS.EXAMPLE/X",
        ] {
            assert!(url(ok).is_ok(), "{} should be accepted", ok);
        }
    }

    #[test]
    fn url_rejects_missing_scheme_or_host() {
        for bad in [
            "maps.example/x",
            "not a url",
            "https://",
            "https://localhost/x",
            "https://example.123",
            "https://-bad-.example",
            "https://exa mple.com",
            "javascript://example.com/%0Aalert(document.cookie)",
            "data://example.com/text",
        ] {
            assert_eq!(url(bad).unwrap_err(), INVALID_URL, "{} should be rejected", bad);
        }
    }

    #[test]
    fn boolean_accepts_checkbox_and_literal_values() {
        assert!(boolean(Some("y")).unwrap());
        assert!(boolean(Some("on")).unwrap());
        assert!(boolean(Some("True")).unwrap());
        assert!(!boolean(Some("false")).unwrap());
        assert!(!boolean(Some("")).unwrap());
        assert!(!boolean(None).unwrap());
        assert_eq!(boolean(Some("maybe")).unwrap_err(), INVALID_CHOICE);
    }
}
