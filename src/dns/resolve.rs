//! Core DNS resolution types and traits.
//!
//! This module defines the `Resolve` trait the surrounding resolution
//! pipeline talks to, and `HostsResolver`, which answers from a hosts file
//! before handing misses to another resolver.

use crate::base::error::HostsError;
use crate::hosts::{name, HostsFile};
use std::{fmt, future::Future, net::IpAddr, net::SocketAddr, pin::Pin, sync::Arc};

/// A domain name to resolve into IP addresses.
///
/// This is a lightweight wrapper around a hostname string that provides
/// a type-safe way to pass domain names to resolvers.
#[derive(Clone, Hash, Eq, PartialEq)]
pub struct Name {
    host: Box<str>,
}

impl Name {
    /// Creates a new [`Name`] from any string-like type.
    #[inline]
    pub fn new(host: impl Into<Box<str>>) -> Self {
        Self { host: host.into() }
    }

    /// View the hostname as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.host
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Name::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Name::new(value)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.host, f)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.host, f)
    }
}

/// Alias for an `Iterator` trait object over `SocketAddr`.
pub type Addrs = Box<dyn Iterator<Item = SocketAddr> + Send>;

/// Alias for the `Future` type returned by a DNS resolver.
pub type Resolving = Pin<Box<dyn Future<Output = Result<Addrs, HostsError>> + Send>>;

/// Trait for DNS resolution.
///
/// Implementations must be thread-safe.
///
/// # Design Notes
///
/// - Resolution is assumed to always be ready (no backpressure).
/// - Uses `&self` for concurrent resolution without mutable access.
/// - Returns boxed futures for trait object compatibility.
pub trait Resolve: Send + Sync {
    /// Resolves a domain name to IP addresses.
    ///
    /// The returned addresses will have port 0; callers should set the
    /// appropriate port based on the target service.
    fn resolve(&self, name: Name) -> Resolving;
}

/// Blanket implementation for Arc-wrapped resolvers.
impl<R: Resolve + ?Sized> Resolve for Arc<R> {
    fn resolve(&self, name: Name) -> Resolving {
        (**self).resolve(name)
    }
}

/// Resolver that answers from a hosts file first.
///
/// Names listed in the hosts file resolve to their addresses in file order.
/// Anything else goes to the fallback resolver, or fails with
/// [`HostsError::NameNotResolved`] when there is none.
///
/// # Example
///
/// ```rust,ignore
/// use hostsfile::dns::{HostsResolver, Name, Resolve};
/// use hostsfile::hosts::{HostsConfig, HostsFile};
/// use std::sync::Arc;
///
/// let hosts = Arc::new(HostsFile::new("/etc/hosts", HostsConfig::default()).await?);
/// let resolver = HostsResolver::new(hosts);
/// let addrs: Vec<_> = resolver.resolve(Name::new("localhost")).await?.collect();
/// ```
pub struct HostsResolver {
    hosts: Arc<HostsFile>,
    fallback: Option<Arc<dyn Resolve>>,
}

impl HostsResolver {
    /// Creates a resolver that only consults the hosts file.
    pub fn new(hosts: Arc<HostsFile>) -> Self {
        Self {
            hosts,
            fallback: None,
        }
    }

    /// Creates a resolver that hands hosts-file misses to `fallback`.
    pub fn with_fallback(hosts: Arc<HostsFile>, fallback: Arc<dyn Resolve>) -> Self {
        Self {
            hosts,
            fallback: Some(fallback),
        }
    }

    /// The hosts file this resolver reads from.
    pub fn hosts(&self) -> &Arc<HostsFile> {
        &self.hosts
    }

    /// PTR-style lookup: the fully-qualified hostname for `addr`, if listed.
    pub fn reverse(&self, addr: IpAddr) -> Option<String> {
        self.hosts.find_reverse(&name::reverse_name(addr))
    }
}

impl Resolve for HostsResolver {
    fn resolve(&self, name: Name) -> Resolving {
        let addrs = self.hosts.find_hosts(name.as_str());
        if !addrs.is_empty() {
            tracing::debug!(domain = %name, count = addrs.len(), "resolved from hosts file");
            let addrs: Addrs = Box::new(addrs.into_iter().map(|ip| SocketAddr::new(ip, 0)));
            return Box::pin(std::future::ready(Ok(addrs)));
        }

        match &self.fallback {
            Some(fallback) => fallback.resolve(name),
            None => Box::pin(std::future::ready(Err(HostsError::NameNotResolved {
                domain: name.as_str().to_string(),
            }))),
        }
    }
}

impl fmt::Debug for HostsResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostsResolver")
            .field("entries", &self.hosts.len())
            .field("has_fallback", &self.fallback.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hosts::HostsConfig;
    use std::net::Ipv4Addr;

    #[test]
    fn test_name_from_str() {
        let name = Name::from("example.com");
        assert_eq!(name.as_str(), "example.com");
        assert_eq!(name.to_string(), "example.com");
    }

    #[test]
    fn test_name_equality() {
        let name1 = Name::new("example.com");
        let name2 = Name::new("example.com");
        let name3 = Name::new("other.com");

        assert_eq!(name1, name2);
        assert_ne!(name1, name3);
    }

    struct MockResolver {
        response: Vec<SocketAddr>,
    }

    impl Resolve for MockResolver {
        fn resolve(&self, _name: Name) -> Resolving {
            let addrs = self.response.clone();
            Box::pin(async move { Ok(Box::new(addrs.into_iter()) as Addrs) })
        }
    }

    async fn hosts_with(content: &str) -> (tempfile::TempDir, Arc<HostsFile>) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts");
        std::fs::write(&path, content).unwrap();
        let hosts = HostsFile::new(&path, HostsConfig::default()).await.unwrap();
        (dir, Arc::new(hosts))
    }

    #[tokio::test]
    async fn test_hosts_resolver_hit() {
        let (_dir, hosts) = hosts_with("10.0.0.5 foo.example.com\n").await;
        let mock = Arc::new(MockResolver {
            response: vec![SocketAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)), 0)],
        });

        let resolver = HostsResolver::with_fallback(hosts, mock);
        let addrs: Vec<_> = resolver
            .resolve(Name::new("FOO.example.com."))
            .await
            .unwrap()
            .collect();

        assert_eq!(addrs, vec![SocketAddr::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5)), 0)]);
    }

    #[tokio::test]
    async fn test_hosts_resolver_fallback() {
        let (_dir, hosts) = hosts_with("10.0.0.5 foo.example.com\n").await;
        let mock = Arc::new(MockResolver {
            response: vec![SocketAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)), 0)],
        });

        let resolver = HostsResolver::with_fallback(hosts, mock);
        let addrs: Vec<_> = resolver
            .resolve(Name::new("not-listed.com"))
            .await
            .unwrap()
            .collect();

        assert_eq!(addrs.len(), 1);
        assert_eq!(addrs[0].ip(), IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)));
    }

    #[tokio::test]
    async fn test_hosts_resolver_miss_without_fallback() {
        let resolver = HostsResolver::new(Arc::new(HostsFile::empty()));
        let err = resolver.resolve(Name::new("missing.local")).await.err().unwrap();

        match err {
            HostsError::NameNotResolved { domain } => assert_eq!(domain, "missing.local"),
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_hosts_resolver_reverse() {
        let (_dir, hosts) = hosts_with("10.0.0.5 foo.example.com bar.example.com\n").await;
        let resolver = HostsResolver::new(hosts);

        assert_eq!(
            resolver.reverse(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5))),
            Some("foo.example.com.".to_string())
        );
        assert_eq!(resolver.reverse(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 6))), None);
    }
}
