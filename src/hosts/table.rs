//! Immutable host table snapshots.
//!
//! A [`HostTable`] is built once per parse and never mutated afterwards; a
//! reload replaces the whole table. Alongside the ordered entries it keeps
//! two indexes so lookups don't scan:
//! - domain -> addresses, in file order
//! - reverse-mapping name -> index of the first entry with that address

use super::name;
use std::collections::HashMap;
use std::net::IpAddr;

/// One (domain, address) pair from a hosts-file line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostEntry {
    /// Normalized hostname (lower-case, no trailing dot).
    pub domain: String,
    pub address: IpAddr,
}

impl HostEntry {
    /// Creates an entry, normalizing `domain`.
    pub fn new(domain: &str, address: IpAddr) -> Self {
        Self {
            domain: name::normalize(domain),
            address,
        }
    }
}

/// Ordered, immutable set of entries currently in effect.
#[derive(Debug, Clone, Default)]
pub struct HostTable {
    entries: Vec<HostEntry>,
    forward: HashMap<String, Vec<IpAddr>>,
    reverse: HashMap<String, usize>,
}

impl HostTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from entries in file order.
    pub fn from_entries(entries: Vec<HostEntry>) -> Self {
        let mut forward: HashMap<String, Vec<IpAddr>> = HashMap::new();
        let mut reverse = HashMap::new();

        for (idx, entry) in entries.iter().enumerate() {
            forward
                .entry(entry.domain.clone())
                .or_default()
                .push(entry.address);
            // First entry in file order owns the reverse mapping
            reverse
                .entry(name::reverse_name(entry.address))
                .or_insert(idx);
        }

        Self {
            entries,
            forward,
            reverse,
        }
    }

    /// All addresses listed for `name`, in file order.
    ///
    /// The query is case-insensitive and may carry a trailing dot.
    pub fn find_hosts(&self, name: &str) -> Vec<IpAddr> {
        self.forward
            .get(&name::normalize(name))
            .cloned()
            .unwrap_or_default()
    }

    /// Domain of the first entry whose address maps to the reverse query
    /// name, as a fully-qualified name.
    pub fn find_reverse(&self, reverse_name: &str) -> Option<String> {
        self.reverse
            .get(&name::normalize_reverse(reverse_name))
            .map(|&idx| name::fqdn(&self.entries[idx].domain))
    }

    pub fn entries(&self) -> &[HostEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HostEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<HostEntry> for HostTable {
    fn from_iter<I: IntoIterator<Item = HostEntry>>(iter: I) -> Self {
        Self::from_entries(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a HostTable {
    type Item = &'a HostEntry;
    type IntoIter = std::slice::Iter<'a, HostEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
