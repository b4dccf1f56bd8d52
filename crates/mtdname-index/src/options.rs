//! Device selection from `key=value` options

use crate::error::{MtdIndexError, Result};
use crate::index::MtdIndex;
use log::warn;

/// An MTD device chosen either by unit number or by partition name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MtdTarget {
    /// `dev=N`
    Unit(u32),
    /// `name=NAME`
    Name(String),
}

impl MtdTarget {
    /// Resolve the target to a unit number present in the device table
    pub fn resolve(&self, index: &MtdIndex) -> Result<u32> {
        match self {
            Self::Name(name) => index.resolve(name),
            Self::Unit(unit) => {
                if index.snapshot()?.contains_unit(*unit) {
                    Ok(*unit)
                } else {
                    Err(MtdIndexError::NotFound(format!("mtd{}", unit)))
                }
            }
        }
    }
}

/// Parse device selection options from key-value pairs
///
/// # Supported options
/// - `dev=N` - MTD device number
/// - `name=NAME` - MTD partition name, as listed in `/proc/mtd`
///
/// Exactly one of `dev` and `name` is required.
///
/// # Example
/// ```
/// use mtdname_index::{parse_options, MtdTarget};
///
/// let target = parse_options(&[("name", "bios")])?;
/// assert_eq!(target, MtdTarget::Name("bios".into()));
/// # Ok::<(), mtdname_index::MtdIndexError>(())
/// ```
pub fn parse_options(options: &[(&str, &str)]) -> Result<MtdTarget> {
    let mut dev_num: Option<u32> = None;
    let mut name: Option<&str> = None;

    for (key, value) in options {
        match *key {
            "dev" => {
                dev_num = Some(value.parse().map_err(|_| MtdIndexError::InvalidParameter {
                    name: "dev",
                    message: format!("'{}' is not a valid device number", value),
                })?);
            }
            "name" => {
                if value.is_empty() {
                    return Err(MtdIndexError::InvalidParameter {
                        name: "name",
                        message: "partition name must not be empty".to_string(),
                    });
                }
                name = Some(*value);
            }
            _ => {
                warn!("Unknown MTD option: {}={}", key, value);
            }
        }
    }

    match (dev_num, name) {
        (Some(_), Some(_)) => Err(MtdIndexError::InvalidParameter {
            name: "name",
            message: "cannot be combined with 'dev'".to_string(),
        }),
        (Some(unit), None) => Ok(MtdTarget::Unit(unit)),
        (None, Some(name)) => Ok(MtdTarget::Name(name.to_string())),
        (None, None) => Err(MtdIndexError::MissingParameter("dev or name")),
    }
}

/// Parse a comma-separated option string such as `name=bios`
pub fn parse_target_string(s: &str) -> Result<MtdTarget> {
    let options: Vec<(&str, &str)> = s
        .split(',')
        .filter_map(|opt| opt.split_once('='))
        .collect();
    parse_options(&options)
}
