//! `/proc/mtd` table parsing
//!
//! The kernel exposes one line per MTD device, preceded by a header:
//!
//! ```text
//! dev:    size   erasesize  name
//! mtd0: 00080000 00010000 "bios"
//! mtd1: 00040000 00010000 "u-boot-env"
//! ```
//!
//! Only the unit number and the name are interpreted. Size and erase size
//! are carried through untouched.

use crate::error::{MtdIndexError, Result};
use log::{trace, warn};
use std::collections::{BTreeSet, HashMap};
use std::io::BufRead;

/// Kernel MTD status table
pub const PROC_MTD: &str = "/proc/mtd";

/// Prefix of every device entry line
const ENTRY_PREFIX: &str = "mtd";

/// unit, size, erasesize, name
const FIELD_COUNT: usize = 4;

/// A single device line of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MtdEntry<'a> {
    unit: u32,
    name: &'a str,
}

/// Name to unit mapping built from one read of the device table
///
/// Once parsed the index is never modified. Duplicate names resolve to the
/// last matching line of the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameIndex {
    units: HashMap<String, u32>,
    /// Every unit listed, including ones whose name a later line reused
    devices: BTreeSet<u32>,
}

impl NameIndex {
    /// Parse a device table
    ///
    /// `source` only names the table in error messages. Header lines and
    /// anything else not starting with `mtd` are skipped. The first device
    /// line with a bad unit number aborts the whole parse. Bytes that are
    /// not valid UTF-8 are replaced rather than rejected.
    pub fn parse<R: BufRead>(reader: R, source: &str) -> Result<Self> {
        let mut units = HashMap::new();
        let mut devices = BTreeSet::new();

        for line in reader.split(b'\n') {
            let line = line.map_err(|e| MtdIndexError::Read {
                path: source.to_string(),
                source: e,
            })?;
            let line = line.strip_suffix(b"\r").unwrap_or(&line);
            let line = String::from_utf8_lossy(line);

            let Some(entry) = parse_line(&line)? else {
                continue;
            };

            trace!("mtd{}: '{}'", entry.unit, entry.name);
            devices.insert(entry.unit);
            if let Some(previous) = units.insert(entry.name.to_string(), entry.unit) {
                warn!(
                    "MTD name '{}' listed for both mtd{} and mtd{}, using mtd{}",
                    entry.name, previous, entry.unit, entry.unit
                );
            }
        }

        Ok(Self { units, devices })
    }

    /// Parse a device table held in memory
    pub fn from_table_str(table: &str) -> Result<Self> {
        Self::parse(table.as_bytes(), "<memory>")
    }

    /// Look up the unit number for a partition name
    pub fn get(&self, name: &str) -> Option<u32> {
        self.units.get(name).copied()
    }

    /// Whether the table listed `unit`
    pub fn contains_unit(&self, unit: u32) -> bool {
        self.devices.contains(&unit)
    }

    /// Number of indexed names
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the table listed no partitions
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// All `(name, unit)` pairs ordered by unit, then name
    pub fn entries(&self) -> Vec<(&str, u32)> {
        let mut entries: Vec<_> = self
            .units
            .iter()
            .map(|(name, &unit)| (name.as_str(), unit))
            .collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

/// Parse one table line, returning `None` for non-device lines
fn parse_line(line: &str) -> Result<Option<MtdEntry<'_>>> {
    let fields = split_fields(line);
    if !fields[0].starts_with(ENTRY_PREFIX) {
        return Ok(None);
    }

    let name = fields
        .get(FIELD_COUNT - 1)
        .ok_or_else(|| MtdIndexError::MalformedEntry {
            line: line.to_string(),
        })?;
    let name = unquote(name.trim_end_matches(' '));
    let unit = parse_unit(fields[0])?;

    Ok(Some(MtdEntry { unit, name }))
}

/// Split on the first three spaces, keeping each space on the field before it
///
/// Everything after the third space stays in the last field, so names with
/// embedded spaces survive intact.
fn split_fields(line: &str) -> Vec<&str> {
    let mut fields = Vec::with_capacity(FIELD_COUNT);
    let mut rest = line;

    while fields.len() < FIELD_COUNT - 1 {
        let Some(pos) = rest.find(' ') else {
            break;
        };
        let (head, tail) = rest.split_at(pos + 1);
        fields.push(head);
        rest = tail;
    }
    fields.push(rest);

    fields
}

/// `mtd12: ` -> 12
fn parse_unit(field: &str) -> Result<u32> {
    let digits = field.trim_end_matches(' ');
    let digits = digits.strip_prefix(ENTRY_PREFIX).unwrap_or(digits);
    let digits = digits.strip_suffix(':').unwrap_or(digits);

    digits.parse().map_err(|e| MtdIndexError::InvalidUnit {
        field: field.to_string(),
        source: e,
    })
}

/// Strip one pair of surrounding double quotes
fn unquote(name: &str) -> &str {
    if name.starts_with('"') && name.ends_with('"') {
        let inner = &name[1..];
        inner.strip_suffix('"').unwrap_or(inner)
    } else {
        name
    }
}
