use super::host::is_same_domain;
use fxhash::FxHashMap;
use url::Url;

/// Methods that never change state and skip origin verification.
pub const SAFE_METHODS: &[&str] = &["GET", "HEAD", "OPTIONS", "TRACE"];

#[must_use]
pub fn is_safe_method(method: &str) -> bool {
    SAFE_METHODS.contains(&method)
}

/// Origins trusted for unsafe requests, compiled from the settings list.
///
/// Entries are matched exactly, except those containing `*`, which become subdomain patterns
/// for their scheme (`https://*.example.com` trusts any `https` subdomain of `example.com`).
#[derive(Debug, Clone, Default)]
pub struct TrustedOrigins {
    exact: Vec<String>,
    subdomains: FxHashMap<String, Vec<String>>,
}

impl TrustedOrigins {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trusted = Self::default();
        for origin in origins {
            let origin = origin.as_ref();
            if origin.contains('*') {
                if let Some((scheme, netloc)) = origin.split_once("://") {
                    trusted
                        .subdomains
                        .entry(scheme.to_ascii_lowercase())
                        .or_default()
                        .push(netloc.trim_start_matches('*').to_ascii_lowercase());
                }
            } else {
                trusted.exact.push(origin.to_owned());
            }
        }
        trusted
    }

    /// Verifies the `Origin` header of an unsafe request.
    ///
    /// `good_host` is the request's own validated host (with port, as sent), if any; an origin
    /// equal to `scheme://good_host` is always accepted.
    #[must_use]
    pub fn verify(&self, origin: &str, good_host: Option<&str>, secure: bool) -> bool {
        if let Some(host) = good_host {
            let scheme = if secure { "https" } else { "http" };
            if origin == format!("{scheme}://{host}") {
                return true;
            }
        }

        if self.exact.iter().any(|trusted| trusted == origin) {
            return true;
        }

        let Ok(parsed) = Url::parse(origin) else {
            return false;
        };
        if parsed.host_str().is_none() {
            return false;
        }
        // Compared as sent: an explicit default port does not match a bare pattern.
        let Some(netloc) = raw_netloc(origin) else {
            return false;
        };

        self.subdomains
            .get(parsed.scheme())
            .is_some_and(|patterns| patterns.iter().any(|p| is_same_domain(netloc, p)))
    }
}

/// Authority part of `origin` exactly as written, e.g. `a.example.com:443`.
fn raw_netloc(origin: &str) -> Option<&str> {
    let (_, rest) = origin.split_once("://")?;
    let netloc = rest.split(['/', '?', '#']).next().unwrap_or_default();
    (!netloc.is_empty()).then_some(netloc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contest_domain::settings::CSRF_TRUSTED_ORIGINS;

    #[test]
    fn safe_methods() {
        assert!(is_safe_method("GET"));
        assert!(is_safe_method("OPTIONS"));
        assert!(!is_safe_method("POST"));
        assert!(!is_safe_method("DELETE"));
    }

    #[test]
    fn configured_origins_are_trusted_exactly() {
        let trusted = TrustedOrigins::new(CSRF_TRUSTED_ORIGINS);
        assert!(trusted.verify("https://contest.bitnp.net", None, true));
        assert!(trusted.verify("https://everything411.top", None, false));
        assert!(!trusted.verify("http://contest.bitnp.net", None, false));
        assert!(!trusted.verify("https://evil.bitnp.net", None, true));
        assert!(!trusted.verify("null", None, true));
    }

    #[test]
    fn same_origin_is_trusted() {
        let trusted = TrustedOrigins::new(Vec::<String>::new());
        assert!(trusted.verify("http://127.0.0.1:8000", Some("127.0.0.1:8000"), false));
        assert!(!trusted.verify("http://127.0.0.1:8000", Some("127.0.0.1:8000"), true));
        assert!(!trusted.verify("http://127.0.0.1:9000", Some("127.0.0.1:8000"), false));
    }

    #[test]
    fn wildcard_origins_match_subdomains_per_scheme() {
        let trusted = TrustedOrigins::new(["https://*.bitnp.net"]);
        assert!(trusted.verify("https://contest.bitnp.net", None, true));
        assert!(trusted.verify("https://a.b.bitnp.net", None, true));
        assert!(trusted.verify("https://bitnp.net", None, true));
        assert!(!trusted.verify("http://contest.bitnp.net", None, false));
        assert!(!trusted.verify("https://notbitnp.net", None, true));
    }

    #[test]
    fn explicit_port_is_part_of_the_compared_origin() {
        let trusted = TrustedOrigins::new(["https://*.bitnp.net"]);
        assert!(!trusted.verify("https://a.bitnp.net:443", None, true));
        assert!(!trusted.verify("https://a.bitnp.net:8443", None, true));

        let with_port = TrustedOrigins::new(["https://*.bitnp.net:8443"]);
        assert!(with_port.verify("https://a.bitnp.net:8443", None, true));
        assert!(!with_port.verify("https://a.bitnp.net", None, true));
    }
}
