use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by the hosts table and its refresh controller.
///
/// Lookups never produce these; only construction, explicit refreshes and
/// the [`Resolve`](crate::dns::Resolve) seam do. `io::Error` sources are
/// shared behind `Arc` so the error stays `Clone`.
#[derive(Debug, Error, Clone)]
pub enum HostsError {
    #[error("failed to read hosts file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: Arc<io::Error>,
    },

    #[error("failed to stat hosts file {}: {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: Arc<io::Error>,
    },

    #[error("Name not resolved: {domain}")]
    NameNotResolved { domain: String },

    #[error("Hosts refresh task failed")]
    RefreshTaskFailed,
}

impl HostsError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        HostsError::Read {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    pub(crate) fn stat(path: impl Into<PathBuf>, source: io::Error) -> Self {
        HostsError::Stat {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    /// Returns the `io::ErrorKind` behind a read or stat failure.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            HostsError::Read { source, .. } | HostsError::Stat { source, .. } => {
                Some(source.kind())
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, HostsError>;
