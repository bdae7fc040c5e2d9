//! # hostsfile
//!
//! A concurrent, hot-reloading hostname resolution table backed by a hosts
//! file.
//!
//! `hostsfile` serves forward lookups (hostname -> addresses) and reverse
//! lookups (reverse-mapping name -> hostname) to a DNS-resolution pipeline,
//! while a background task re-checks the file and atomically swaps in a new
//! table when it changes.
//!
//! ## Features
//!
//! - **Snapshot Tables**: Each parse yields an immutable, indexed table
//! - **Cheap Change Detection**: Only re-parses when mtime or size changes
//! - **Deterministic Order**: Results follow file order; first match wins for reverse lookups
//! - **Explicit Shutdown**: The refresh task stops on demand or on drop
//! - **Resolver Seam**: `HostsResolver` plugs into any `Resolve` pipeline
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hostsfile::hosts::{HostsConfig, HostsFile};
//!
//! #[tokio::main]
//! async fn main() {
//!     let hosts = HostsFile::new("/etc/hosts", HostsConfig::from_secs(5, false))
//!         .await
//!         .unwrap();
//!     println!("{:?}", hosts.find_hosts("localhost"));
//!     println!("{:?}", hosts.find_reverse("1.0.0.127.in-addr.arpa."));
//!     hosts.shutdown().await.unwrap();
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error definitions
//! - [`hosts`] - Parser, table snapshots and the refresh controller
//! - [`dns`] - `Resolve` trait and the hosts-first resolver

pub mod base;
pub mod dns;
pub mod hosts;
