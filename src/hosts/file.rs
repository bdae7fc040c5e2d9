//! Hot-reloading hosts file.
//!
//! [`HostsFile`] owns the installed [`HostTable`] and the refresh baseline
//! (modification time and size of the file when it was last loaded). When
//! polling is enabled a background task re-stats the file on every tick and
//! only re-reads and re-parses it when the baseline no longer matches.
//!
//! # Concurrency
//!
//! The table and baseline sit behind a single `RwLock`. Readers hold the read
//! lock just long enough to clone the `Arc<HostTable>`, then query the
//! immutable snapshot. A reload reads and parses the file with no lock held
//! and takes the write lock only to swap the table and advance the baseline,
//! so a reader sees either the old table or the new one, never a mix.
//!
//! The background task stops when [`HostsFile::shutdown`] is called or when
//! the `HostsFile` is dropped.

use super::config::HostsConfig;
use super::parser;
use super::table::HostTable;
use crate::base::error::{HostsError, Result};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::fs::Metadata;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// File state the last installed table was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Baseline {
    mtime: Option<SystemTime>,
    size: u64,
}

impl Baseline {
    fn from_metadata(metadata: &Metadata) -> Self {
        Self {
            mtime: metadata.modified().ok(),
            size: metadata.len(),
        }
    }
}

struct Installed {
    table: Arc<HostTable>,
    baseline: Option<Baseline>,
}

struct Shared {
    path: Option<PathBuf>,
    config: HostsConfig,
    installed: RwLock<Installed>,
    loads: AtomicU64,
}

impl Shared {
    fn new(path: Option<PathBuf>, config: HostsConfig) -> Self {
        Self {
            path,
            config,
            installed: RwLock::new(Installed {
                table: Arc::new(HostTable::new()),
                baseline: None,
            }),
            loads: AtomicU64::new(0),
        }
    }

    fn snapshot(&self) -> Arc<HostTable> {
        Arc::clone(&self.installed.read().table)
    }

    async fn load(path: &Path, loads: &AtomicU64) -> Result<HostTable> {
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| HostsError::read(path, e))?;
        loads.fetch_add(1, Ordering::Relaxed);
        Ok(parser::parse_bytes(&data).table)
    }

    fn install(&self, table: HostTable, baseline: Option<Baseline>) {
        let table = Arc::new(table);
        let mut installed = self.installed.write();
        installed.table = table;
        installed.baseline = baseline;
    }

    /// One poll tick. The previous table and baseline stay in place on error.
    async fn refresh(&self) -> Result<bool> {
        let Some(path) = self.path.as_deref() else {
            return Ok(false);
        };

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| HostsError::stat(path, e))?;
        let current = Baseline::from_metadata(&metadata);

        let unchanged = self.installed.read().baseline == Some(current);
        if unchanged {
            tracing::trace!(path = %path.display(), "hosts file unchanged");
            return Ok(false);
        }

        let table = Self::load(path, &self.loads).await?;
        let count = table.len();
        self.install(table, Some(current));

        tracing::debug!(path = %path.display(), entries = count, "hosts file reloaded");
        Ok(true)
    }
}

struct Refresher {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Hosts-file backed resolution table with optional background refresh.
///
/// # Example
///
/// ```rust,ignore
/// use hostsfile::hosts::{HostsConfig, HostsFile};
/// use std::time::Duration;
///
/// let config = HostsConfig::new().with_poll_interval(Duration::from_secs(5));
/// let hosts = HostsFile::new("/etc/hosts", config).await?;
///
/// let addrs = hosts.find_hosts("localhost");
/// let name = hosts.find_reverse("1.0.0.127.in-addr.arpa.");
///
/// hosts.shutdown().await?;
/// ```
pub struct HostsFile {
    shared: Arc<Shared>,
    refresher: Mutex<Option<Refresher>>,
}

impl HostsFile {
    /// Loads `path` and, if `config` enables polling, starts the refresh task.
    ///
    /// An empty path yields an empty table and no background work. Fails if
    /// a non-empty path cannot be read. Must be called inside a tokio runtime.
    pub async fn new(path: impl AsRef<Path>, config: HostsConfig) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Ok(Self::with_shared(Shared::new(None, config)));
        }

        let shared = Shared::new(Some(path.to_path_buf()), config);

        // Stat before reading: a write landing in between leaves the baseline
        // stale, which only costs one extra reload.
        let baseline = match tokio::fs::metadata(path).await {
            Ok(metadata) => Some(Baseline::from_metadata(&metadata)),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "initial stat failed");
                None
            }
        };
        let table = Shared::load(path, &shared.loads).await?;
        shared.install(table, baseline);

        let hosts = Self::with_shared(shared);
        hosts.log_entries();

        if hosts.shared.config.is_polling() {
            hosts.start_refresh_task(hosts.shared.config.poll_interval);
        }

        Ok(hosts)
    }

    /// Instance with an empty table and no file to watch.
    pub fn empty() -> Self {
        Self::with_shared(Shared::new(None, HostsConfig::default()))
    }

    fn with_shared(shared: Shared) -> Self {
        Self {
            shared: Arc::new(shared),
            refresher: Mutex::new(None),
        }
    }

    fn log_entries(&self) {
        let table = self.shared.snapshot();
        let path = self.shared.path.as_deref().unwrap_or(Path::new(""));

        if self.shared.config.verbose {
            tracing::info!(path = %path.display(), "found entries in hosts file");
            for entry in table.iter() {
                tracing::info!(domain = %entry.domain, address = %entry.address, "hosts entry");
            }
        }
        tracing::debug!(path = %path.display(), entries = table.len(), "hosts file loaded");
    }

    fn start_refresh_task(&self, interval: Duration) {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let shared = Arc::clone(&self.shared);
        let handle = tokio::spawn(poll_loop(shared, interval, shutdown_rx));

        *self.refresher.lock() = Some(Refresher {
            shutdown_tx,
            handle,
        });
    }

    /// All addresses listed for `name`, in file order. Never fails; a miss
    /// or an unloaded table both give an empty result.
    pub fn find_hosts(&self, name: &str) -> Vec<IpAddr> {
        self.shared.installed.read().table.find_hosts(name)
    }

    /// Fully-qualified domain of the first entry whose address maps to the
    /// reverse query name (e.g. `5.0.0.10.in-addr.arpa.`).
    pub fn find_reverse(&self, reverse_name: &str) -> Option<String> {
        self.shared.installed.read().table.find_reverse(reverse_name)
    }

    /// The currently installed table.
    pub fn snapshot(&self) -> Arc<HostTable> {
        self.shared.snapshot()
    }

    /// Runs one refresh check now.
    ///
    /// Returns `Ok(true)` if a new table was installed, `Ok(false)` if the
    /// file is unchanged or no path is configured.
    pub async fn refresh(&self) -> Result<bool> {
        self.shared.refresh().await
    }

    /// Stops the background refresh task and waits for it to exit.
    pub async fn shutdown(&self) -> Result<()> {
        let refresher = self.refresher.lock().take();
        let Some(refresher) = refresher else {
            return Ok(());
        };

        let _ = refresher.shutdown_tx.send(true);
        refresher.handle.await.map_err(|e| {
            tracing::error!(error = %e, "hosts refresh task failed");
            HostsError::RefreshTaskFailed
        })
    }

    /// Whether the background refresh task is running.
    pub fn is_refreshing(&self) -> bool {
        self.refresher
            .lock()
            .as_ref()
            .is_some_and(|r| !r.handle.is_finished())
    }

    pub fn path(&self) -> Option<&Path> {
        self.shared.path.as_deref()
    }

    pub fn config(&self) -> &HostsConfig {
        &self.shared.config
    }

    /// Number of times file content has been read and parsed.
    pub fn load_count(&self) -> u64 {
        self.shared.loads.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.shared.installed.read().table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for HostsFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostsFile")
            .field("path", &self.shared.path)
            .field("entries", &self.len())
            .field("refreshing", &self.is_refreshing())
            .finish_non_exhaustive()
    }
}

async fn poll_loop(shared: Arc<Shared>, interval: Duration, mut shutdown: watch::Receiver<bool>) {
    let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            // Fires on an explicit shutdown or when the sender is dropped
            _ = shutdown.changed() => break,
        }

        match shared.refresh().await {
            Ok(true) if shared.config.verbose => {
                tracing::info!(entries = shared.snapshot().len(), "reloaded changed hosts file");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, "hosts file refresh failed, keeping previous entries");
            }
        }
    }

    tracing::debug!("hosts refresh task stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn hosts_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn test_empty_path() {
        let hosts = HostsFile::new("", HostsConfig::from_secs(1, true)).await.unwrap();

        assert!(hosts.is_empty());
        assert!(hosts.path().is_none());
        assert!(!hosts.is_refreshing());
        assert!(!hosts.refresh().await.unwrap());
        assert_eq!(hosts.load_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = HostsFile::new(dir.path().join("nope"), HostsConfig::default()).await;

        let err = result.unwrap_err();
        assert!(matches!(err, HostsError::Read { .. }));
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_refresh_skips_unchanged_file() {
        let file = hosts_file("127.0.0.1 localhost\n");
        let hosts = HostsFile::new(file.path(), HostsConfig::default()).await.unwrap();
        assert_eq!(hosts.load_count(), 1);

        assert!(!hosts.refresh().await.unwrap());
        assert!(!hosts.refresh().await.unwrap());
        assert_eq!(hosts.load_count(), 1);
    }

    #[tokio::test]
    async fn test_refresh_stat_failure_keeps_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts");
        std::fs::write(&path, "10.0.0.1 keep.me\n").unwrap();

        let hosts = HostsFile::new(&path, HostsConfig::default()).await.unwrap();
        std::fs::remove_file(&path).unwrap();

        let err = hosts.refresh().await.unwrap_err();
        assert!(matches!(err, HostsError::Stat { .. }));
        assert_eq!(hosts.find_hosts("keep.me").len(), 1);
    }

    #[tokio::test]
    async fn test_shutdown_stops_task() {
        let file = hosts_file("127.0.0.1 localhost\n");
        let config = HostsConfig::new().with_poll_interval(Duration::from_millis(50));
        let hosts = HostsFile::new(file.path(), config).await.unwrap();

        assert!(hosts.is_refreshing());
        hosts.shutdown().await.unwrap();
        assert!(!hosts.is_refreshing());

        // Second shutdown is a no-op
        hosts.shutdown().await.unwrap();
        assert_eq!(hosts.find_hosts("localhost").len(), 1);
    }
}
