//! Parser for the conventional hosts-file text format.
//!
//! ```text
//! # comment
//! 127.0.0.1   localhost
//! 10.0.0.5    foo.example.com bar.example.com   # trailing comment
//! ```
//!
//! Each line is validated on its own; a bad line is counted and skipped,
//! never fatal.

use super::table::{HostEntry, HostTable};
use std::net::IpAddr;

/// Result of parsing one hosts file.
#[derive(Debug, Clone, Default)]
pub struct ParsedHosts {
    pub table: HostTable,
    /// Non-blank, non-comment lines that produced no entries.
    pub skipped: usize,
}

/// Parses raw file bytes. Invalid UTF-8 is replaced rather than rejected.
pub fn parse_bytes(data: &[u8]) -> ParsedHosts {
    parse(&String::from_utf8_lossy(data))
}

/// Parses hosts-file text into a table in file order.
pub fn parse(content: &str) -> ParsedHosts {
    let mut entries = Vec::new();
    let mut skipped = 0;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match parse_line(line) {
            Some(line_entries) => entries.extend(line_entries),
            None => skipped += 1,
        }
    }

    let table = HostTable::from_entries(entries);
    tracing::debug!(entries = table.len(), skipped, "parsed hosts file");

    ParsedHosts { table, skipped }
}

fn parse_line(line: &str) -> Option<Vec<HostEntry>> {
    let mut fields = line.split_whitespace();
    let address: IpAddr = fields.next()?.parse().ok()?;

    let entries: Vec<HostEntry> = fields
        .take_while(|field| !field.starts_with('#'))
        .map(|host| HostEntry::new(host, address))
        .collect();

    if entries.is_empty() {
        None
    } else {
        Some(entries)
    }
}
