use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::PathBuf;
use std::time::Duration;

/// Options for a [`HostsFile`](super::HostsFile).
///
/// On the wire the poll interval is `poll_interval_secs`, an integer where
/// any value `<= 0` disables background refresh.
#[must_use]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostsConfig {
    /// Time between checks of the file's mtime and size. Zero disables polling.
    #[serde(
        rename = "poll_interval_secs",
        default,
        serialize_with = "serialize_secs",
        deserialize_with = "deserialize_secs"
    )]
    pub poll_interval: Duration,

    /// Log every loaded entry once at startup.
    #[serde(default)]
    pub verbose: bool,
}

impl HostsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a config from a signed seconds value; `<= 0` disables polling.
    pub fn from_secs(poll_secs: i64, verbose: bool) -> Self {
        Self {
            poll_interval: secs_to_interval(poll_secs),
            verbose,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Whether a background refresh task will run.
    pub fn is_polling(&self) -> bool {
        !self.poll_interval.is_zero()
    }
}

fn secs_to_interval(secs: i64) -> Duration {
    u64::try_from(secs)
        .map(Duration::from_secs)
        .unwrap_or(Duration::ZERO)
}

fn serialize_secs<S: Serializer>(interval: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(interval.as_secs())
}

fn deserialize_secs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
    i64::deserialize(deserializer).map(secs_to_interval)
}

/// Conventional location of the system hosts file.
pub fn system_hosts_path() -> PathBuf {
    #[cfg(windows)]
    {
        let root = std::env::var_os("SystemRoot").unwrap_or_else(|| "C:\\Windows".into());
        PathBuf::from(root).join("System32\\drivers\\etc\\hosts")
    }

    #[cfg(not(windows))]
    {
        PathBuf::from("/etc/hosts")
    }
}
