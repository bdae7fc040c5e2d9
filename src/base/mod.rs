//! Base types and error handling.
//!
//! - [`HostsError`](error::HostsError): failures from loading and refreshing a hosts file

pub mod error;

pub use error::{HostsError, Result};

#[cfg(test)]
mod tests;
