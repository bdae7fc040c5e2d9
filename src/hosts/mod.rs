//! Hosts-file resolution table.
//!
//! Serves forward lookups (hostname -> addresses) and reverse lookups
//! (reverse-mapping name -> hostname) from a static hosts file, reloading it
//! in the background when its modification time or size changes.
//!
//! - [`parse`] turns file content into a [`HostTable`]
//! - [`HostTable`] is an immutable snapshot; reloads swap it as a whole
//! - [`HostsFile`] owns the installed table and the refresh task
//!
//! # Example
//!
//! ```rust,ignore
//! use hostsfile::hosts::{HostsConfig, HostsFile};
//!
//! let hosts = HostsFile::new("/etc/hosts", HostsConfig::from_secs(10, false)).await?;
//! for addr in hosts.find_hosts("localhost") {
//!     println!("localhost -> {addr}");
//! }
//! ```

mod config;
mod file;
pub mod name;
mod parser;
mod table;

pub use config::{system_hosts_path, HostsConfig};
pub use file::HostsFile;
pub use parser::{parse, parse_bytes, ParsedHosts};
pub use table::{HostEntry, HostTable};
