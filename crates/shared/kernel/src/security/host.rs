/// A `Host` header split into its domain and port.
///
/// The domain is lower-cased, keeps IPv6 brackets, and has a trailing dot removed. An empty
/// domain means the header was malformed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HostParts {
    pub domain: String,
    pub port: Option<String>,
}

/// Splits `host` into domain and port.
///
/// Accepted shapes are `name[:port]` with `name` made of `[a-z0-9.-]`, and
/// `[ipv6][:port]` with hex digits, colons and dots inside the brackets.
#[must_use]
pub fn split_domain_port(host: &str) -> HostParts {
    let host = host.to_ascii_lowercase();

    let (domain, rest) = if host.starts_with('[') {
        let Some(end) = host.find(']') else {
            return HostParts::default();
        };
        let (domain, rest) = host.split_at(end + 1);
        if !is_ipv6_literal(&domain[1..domain.len() - 1]) {
            return HostParts::default();
        }
        (domain, rest)
    } else {
        let end = host.find(':').unwrap_or(host.len());
        let (domain, rest) = host.split_at(end);
        if domain.is_empty() || !domain.bytes().all(is_domain_byte) {
            return HostParts::default();
        }
        (domain, rest)
    };

    let port = match rest.strip_prefix(':') {
        None if rest.is_empty() => None,
        Some(port) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => {
            Some(port.to_owned())
        }
        _ => return HostParts::default(),
    };

    HostParts { domain: domain.strip_suffix('.').unwrap_or(domain).to_owned(), port }
}

/// Whether `host` matches `pattern`.
///
/// A pattern with a leading dot matches the bare domain and every subdomain; any other pattern
/// must match exactly. Matching ignores ASCII case.
#[must_use]
pub fn is_same_domain(host: &str, pattern: &str) -> bool {
    if pattern.is_empty() {
        return false;
    }
    let host = host.to_ascii_lowercase();
    let pattern = pattern.to_ascii_lowercase();

    match pattern.strip_prefix('.') {
        Some(bare) => host.ends_with(&pattern) || host == bare,
        None => host == pattern,
    }
}

fn is_domain_byte(b: u8) -> bool {
    b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'.' || b == b'-'
}

fn is_ipv6_literal(inner: &str) -> bool {
    // [0-9a-f]*:[0-9a-f.:]+
    let Some(colon) = inner.find(':') else {
        return false;
    };
    let (head, tail) = (&inner[..colon], &inner[colon + 1..]);
    head.bytes().all(|b| b.is_ascii_hexdigit())
        && !tail.is_empty()
        && tail.bytes().all(|b| b.is_ascii_hexdigit() || b == b'.' || b == b':')
}

/// The compiled host allowlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedHosts {
    patterns: Vec<String>,
}

impl AllowedHosts {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { patterns: patterns.into_iter().map(|p| p.into().to_ascii_lowercase()).collect() }
    }

    /// Whether an already split domain is allowed. `*` allows everything.
    #[must_use]
    pub fn allows_domain(&self, domain: &str) -> bool {
        !domain.is_empty()
            && self.patterns.iter().any(|pattern| pattern == "*" || is_same_domain(domain, pattern))
    }

    /// Validates a raw `Host` header value, returning its parts when allowed.
    #[must_use]
    pub fn validate(&self, raw_host: &str) -> Option<HostParts> {
        let parts = split_domain_port(raw_host);
        self.allows_domain(&parts.domain).then_some(parts)
    }

    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}
