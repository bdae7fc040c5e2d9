//! Hostname normalization and reverse-mapping names.

use hickory_resolver::proto::rr::Name as DnsName;
use std::net::IpAddr;

/// Canonical, comparison-ready form of a hostname: lower-cased, with a
/// single trailing dot removed.
pub fn normalize(name: &str) -> String {
    name.strip_suffix('.').unwrap_or(name).to_ascii_lowercase()
}

/// Renders a normalized domain as a fully-qualified name.
pub fn fqdn(domain: &str) -> String {
    if domain.ends_with('.') {
        domain.to_string()
    } else {
        format!("{domain}.")
    }
}

/// Reverse-mapping zone name for an address, e.g. `5.0.0.10.in-addr.arpa.`
/// or the nibble form under `ip6.arpa.`.
pub fn reverse_name(addr: IpAddr) -> String {
    DnsName::from(addr).to_string().to_ascii_lowercase()
}

/// Puts a reverse query name into the form produced by [`reverse_name`].
pub(crate) fn normalize_reverse(name: &str) -> String {
    fqdn(&name.to_ascii_lowercase())
}
