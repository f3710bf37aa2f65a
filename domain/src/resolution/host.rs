//! URL host canonicalization.
//!
//! Canonical records are keyed by their normalized website host:
//! scheme + host, lowercased, with a leading `www.` stripped. These helpers
//! are the single place that normalization lives — the validator, the merger
//! and the store adapters all go through them.

use url::Url;

/// Canonicalize a website URL into the identity key used by the store.
///
/// `https://WWW.Naukri.com/jobs?x=1` → `https://naukri.com`
///
/// Inputs without a scheme are retried with `https://` prepended, since
/// models frequently return bare domains in the `websiteUrl` field.
/// Returns `None` for unparsable input or URLs without a host.
pub fn canonical_host(website_url: &str) -> Option<String> {
    let host = host_of(website_url)?;
    let scheme = match Url::parse(website_url.trim()) {
        Ok(u) => u.scheme().to_ascii_lowercase(),
        Err(_) => "https".to_string(),
    };
    Some(format!("{}://{}", scheme, host))
}

/// Extract the bare host from a URL: lowercased, `www.` stripped.
///
/// Returns `None` when no host can be parsed.
pub fn host_of(website_url: &str) -> Option<String> {
    let trimmed = website_url.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parsed = Url::parse(trimmed)
        .ok()
        .filter(|u| u.host_str().is_some())
        .or_else(|| Url::parse(&format!("https://{}", trimmed)).ok())?;

    let host = parsed.host_str()?.to_ascii_lowercase();
    Some(strip_www(&host).to_string())
}

/// Normalize a free-text domain field: trimmed, lowercased, `www.` stripped.
pub fn normalize_domain(domain: &str) -> String {
    let lowered = domain.trim().to_ascii_lowercase();
    strip_www(&lowered).to_string()
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}
