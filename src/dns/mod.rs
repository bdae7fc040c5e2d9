//! DNS Resolution Module
//!
//! Connects the hosts table to a DNS-resolution pipeline through the
//! pluggable `Resolve` trait:
//! - `HostsResolver` answers from the installed hosts table
//! - misses fall through to any other `Resolve` implementation
//!
//! # Example
//!
//! ```rust,ignore
//! use hostsfile::dns::{HostsResolver, Name, Resolve};
//!
//! let resolver = HostsResolver::with_fallback(hosts, upstream);
//! let addrs = resolver.resolve(Name::new("example.com")).await?;
//! for addr in addrs {
//!     println!("Resolved: {}", addr);
//! }
//! ```

mod resolve;

pub use resolve::{Addrs, HostsResolver, Name, Resolve, Resolving};
